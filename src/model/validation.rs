use once_cell::sync::Lazy;
use regex::Regex;

use crate::consts::consts::CANONICAL_COLUMNS;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

/// Strips everything that is not an ASCII digit, `"123.456.789-09"` becomes
/// `"12345678909"`.
pub fn normalize_cpf(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Structural CPF check: exactly 11 digits after normalization. No
/// check-digit arithmetic.
pub fn is_valid_cpf(raw: &str) -> bool {
    normalize_cpf(raw).len() == 11
}

/// Basic `local@domain.tld` shape with a final label of at least two
/// letters.
pub fn is_valid_email(raw: &str) -> bool {
    EMAIL_RE.is_match(raw)
}

/// The fixed 13-column schema, in order. Used to create an empty store and
/// to select display columns.
pub fn canonical_columns() -> &'static [&'static str; 13] {
    &CANONICAL_COLUMNS
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("123.456.789-09", "12345678909")]
    #[case("111.222.333-44", "11122233344")]
    #[case("12345678909", "12345678909")]
    #[case("abc", "")]
    #[case("", "")]
    fn normalize_cpf_strips_non_digits(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_cpf(raw), expected);
    }

    #[rstest]
    #[case("111.222.333-44", true)]
    #[case("123.456.789-09", true)]
    #[case("12345678909", true)]
    #[case("12345", false)]
    #[case("123.456.789-091", false)]
    #[case("", false)]
    fn cpf_is_valid_iff_it_normalizes_to_11_digits(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(is_valid_cpf(raw), expected);
    }

    #[rstest]
    #[case("a@b.co", true)]
    #[case("joao@email.com", true)]
    #[case("joao.silva+tag@sub.dominio.com.br", true)]
    #[case("not-an-email", false)]
    #[case("a@b", false)]
    #[case("a@b.c", false)]
    #[case("@email.com", false)]
    #[case("", false)]
    fn email_matches_the_basic_address_pattern(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(is_valid_email(raw), expected);
    }

    #[test]
    fn canonical_schema_is_the_fixed_13_column_list() {
        let columns = canonical_columns();

        assert_eq!(columns.len(), 13);
        assert_eq!(columns[0], "ID");
        assert_eq!(columns[12], "Created At");
    }
}
