use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::person::Person;

/// How many cities the city distribution reports.
pub const TOP_CITY_LIMIT: usize = 10;

/// Aggregates over the whole registry, computed in one pass per field.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct RegistryStats {
    pub total_records: usize,
    /// Records whose creation timestamp falls on `today`.
    pub registered_today: usize,
    pub distinct_states: usize,
    pub distinct_cities: usize,
    /// Every state with at least one record, highest count first.
    pub state_distribution: Vec<(String, usize)>,
    /// The ten most frequent cities, highest count first. Ties keep the
    /// order in which the city was first seen in the registry.
    pub top_cities: Vec<(String, usize)>,
}

impl RegistryStats {
    pub fn compute(records: &[Person], today: NaiveDate) -> Self {
        let registered_today = records
            .iter()
            .filter(|person| person.created_at.date() == today)
            .count();

        let state_distribution = frequency(
            records
                .iter()
                .filter_map(|person| person.state.map(|state| state.to_string())),
        );

        let mut top_cities = frequency(
            records
                .iter()
                .filter_map(|person| person.city.as_deref())
                .filter(|city| !city.is_empty())
                .map(str::to_string),
        );

        let distinct_cities = top_cities.len();
        top_cities.truncate(TOP_CITY_LIMIT);

        RegistryStats {
            total_records: records.len(),
            registered_today,
            distinct_states: state_distribution.len(),
            distinct_cities,
            state_distribution,
            top_cities,
        }
    }
}

/// Counts occurrences preserving first-seen order, then sorts by descending
/// count. The sort is stable, so ties stay in encounter order.
fn frequency(values: impl Iterator<Item = String>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for value in values {
        match positions.get(&value) {
            Some(&position) => counts[position].1 += 1,
            None => {
                positions.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
}
