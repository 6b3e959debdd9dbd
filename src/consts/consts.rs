use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed column set and order of the persisted store. Every save and
/// every export writes exactly these columns; a freshly created store is
/// this header with zero rows.
pub const CANONICAL_COLUMNS: [&str; 13] = [
    "ID",
    "Full Name",
    "CPF",
    "RG",
    "Birth Date",
    "Email",
    "Phone",
    "Postal Code",
    "Address",
    "City",
    "State",
    "Profession",
    "Created At",
];

// New Type Pattern -- https://doc.rust-lang.org/rust-by-example/generics/new_types.html
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(pub u32);

impl RecordId {
    pub fn to_number(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
