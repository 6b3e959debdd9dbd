use std::fs;

use cadastro::model::person::PersonDraft;
use cadastro::model::state::StateCode;
use cadastro::registry::filter::RecordFilter;
use cadastro::registry::options::RegistryOptions;
use cadastro::registry::registry::RegistryStore;
use tempfile::TempDir;
use test_log::test;

fn store_in(dir: &TempDir) -> RegistryStore {
    let options =
        RegistryOptions::default().set_store_path(dir.path().join("cadastro_pessoas.csv"));

    RegistryStore::new(options)
}

fn resident(name: &str, cpf: &str, email: &str, city: &str, state: StateCode) -> PersonDraft {
    PersonDraft {
        full_name: name.to_string(),
        cpf: cpf.to_string(),
        email: email.to_string(),
        city: Some(city.to_string()),
        state: Some(state),
        ..PersonDraft::default()
    }
}

fn seed(store: &RegistryStore) {
    store
        .create(resident(
            "João da Silva",
            "123.456.789-09",
            "joao@email.com",
            "São Paulo",
            StateCode::Sp,
        ))
        .unwrap();
    store
        .create(resident(
            "Maria Souza",
            "111.222.333-44",
            "maria@email.com",
            "Rio de Janeiro",
            StateCode::Rj,
        ))
        .unwrap();
    store
        .create(resident(
            "Pedro Santos",
            "222.333.444-55",
            "pedro@email.com",
            "Santos",
            StateCode::Sp,
        ))
        .unwrap();
}

#[test]
fn query_matches_city_substrings_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    seed(&store);

    let results = store.query(&RecordFilter {
        city_contains: Some("paulo".to_string()),
        ..RecordFilter::default()
    });

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].city.as_deref(), Some("São Paulo"));
}

#[test]
fn query_ands_every_supplied_filter_and_preserves_load_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    seed(&store);

    let results = store.query(&RecordFilter {
        name_contains: Some("s".to_string()),
        state_equals: Some(StateCode::Sp),
        ..RecordFilter::default()
    });

    let names: Vec<_> = results.iter().map(|p| p.full_name.as_str()).collect();
    assert_eq!(names, vec!["João da Silva", "Pedro Santos"]);
}

#[test]
fn query_summaries_carry_the_listing_columns() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    seed(&store);

    let summaries = store.query_summaries(&RecordFilter {
        state_equals: Some(StateCode::Rj),
        ..RecordFilter::default()
    });

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].full_name, "Maria Souza");
    assert_eq!(summaries[0].cpf, "111.222.333-44");
    assert_eq!(summaries[0].email, "maria@email.com");
    assert_eq!(summaries[0].state, Some(StateCode::Rj));
}

#[test]
fn statistics_on_an_empty_registry_are_all_zero() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let stats = store.statistics();

    assert_eq!(stats.total_records, 0);
    assert_eq!(stats.registered_today, 0);
    assert_eq!(stats.distinct_states, 0);
    assert_eq!(stats.distinct_cities, 0);
    assert!(stats.state_distribution.is_empty());
    assert!(stats.top_cities.is_empty());
}

#[test]
fn statistics_aggregate_the_registry() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    seed(&store);

    let stats = store.statistics();

    assert_eq!(stats.total_records, 3);
    // Everything was created within this test run
    assert_eq!(stats.registered_today, 3);
    assert_eq!(stats.distinct_states, 2);
    assert_eq!(stats.distinct_cities, 3);
    assert_eq!(stats.state_distribution[0], ("SP".to_string(), 2));
    assert_eq!(stats.state_distribution[1], ("RJ".to_string(), 1));
    assert_eq!(stats.top_cities.len(), 3);
}

#[test]
fn export_produces_the_same_bytes_the_store_persists() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    seed(&store);

    let records = store.query(&RecordFilter::default());
    let exported = store.export(&records).unwrap();

    let on_disk = fs::read(dir.path().join("cadastro_pessoas.csv")).unwrap();
    assert_eq!(exported, on_disk);
}

#[test]
fn exporting_a_filtered_subset_keeps_the_canonical_header() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    seed(&store);

    let subset = store.query(&RecordFilter {
        state_equals: Some(StateCode::Rj),
        ..RecordFilter::default()
    });
    let exported = store.export(&subset).unwrap();
    let text = String::from_utf8(exported).unwrap();

    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "ID,Full Name,CPF,RG,Birth Date,Email,Phone,Postal Code,Address,City,State,Profession,Created At"
    );
    assert_eq!(lines.clone().count(), 1);
    assert!(lines.next().unwrap().contains("Maria Souza"));
}
