use serde::{Deserialize, Serialize};

use crate::model::{person::Person, state::StateCode};

/// Query constraints over a loaded registry. Every supplied filter must
/// hold (AND); an absent or empty filter places no constraint on its field.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct RecordFilter {
    /// Case-insensitive substring of the full name.
    pub name_contains: Option<String>,
    /// Case-insensitive substring of the city.
    pub city_contains: Option<String>,
    /// Exact state code.
    pub state_equals: Option<StateCode>,
}

impl RecordFilter {
    pub fn matches(&self, person: &Person) -> bool {
        if let Some(name) = non_empty(&self.name_contains) {
            if !contains_ignore_case(&person.full_name, name) {
                return false;
            }
        }

        if let Some(city) = non_empty(&self.city_contains) {
            match &person.city {
                Some(person_city) => {
                    if !contains_ignore_case(person_city, city) {
                        return false;
                    }
                }
                None => return false,
            }
        }

        if let Some(state) = self.state_equals {
            if person.state != Some(state) {
                return false;
            }
        }

        true
    }
}

/// Lazy pass over a loaded registry, in load order. The iterator borrows
/// the records, so a new pass can be taken from the same registry at any
/// time.
pub fn matching<'a>(
    records: &'a [Person],
    filter: &'a RecordFilter,
) -> impl Iterator<Item = &'a Person> {
    records.iter().filter(move |person| filter.matches(person))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
