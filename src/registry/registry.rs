use chrono::{Local, NaiveDateTime};
use thiserror::Error;

use crate::{
    consts::consts::RecordId,
    model::{
        person::{Person, PersonDraft, PersonSummary},
        validation::{is_valid_cpf, is_valid_email},
    },
    persistence::storage::{
        file::{to_csv_bytes, FileStorage},
        Storage, StorageError,
    },
};

use super::{
    filter::{self, RecordFilter},
    options::RegistryOptions,
    session::DeleteConfirmation,
    stats::RegistryStats,
};

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingRequiredField(&'static str),

    #[error("CPF is invalid: {0}")]
    InvalidCpf(String),

    #[error("CPF is already registered: {0}")]
    DuplicateCpf(String),

    #[error("Email is invalid: {0}")]
    InvalidEmail(String),

    #[error("Email is already registered: {0}")]
    DuplicateEmail(String),
}

#[derive(Error, Debug)]
pub enum RegistryError {
    /// Every field problem found in the submitted draft, together, so the
    /// caller can display them all at once.
    #[error("Validation failed: [{}]", describe(.0))]
    Validation(Vec<ValidationError>),

    #[error("Not found, record does not exist: {0}")]
    NotFound(RecordId),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// First request for this id. The caller must repeat the request to
    /// confirm.
    ConfirmationRequired,
    Deleted,
}

/// CRUD, query and aggregate operations over the persisted registry. Each
/// operation loads the full record set, works on it in memory and saves the
/// full set back; nothing is cached between calls.
pub struct RegistryStore {
    storage: Box<dyn Storage>,
}

impl RegistryStore {
    pub fn new(options: RegistryOptions) -> Self {
        Self {
            storage: Box::new(FileStorage::new(options.store_path)),
        }
    }

    /// Storage is a seam: tests point a store at a file inside a temp
    /// directory through `RegistryOptions`, other engines slot in here.
    pub fn with_storage(storage: Box<dyn Storage>) -> Self {
        Self { storage }
    }

    #[tracing::instrument(skip(self, draft))]
    pub fn create(&self, draft: PersonDraft) -> Result<RecordId, RegistryError> {
        let mut registry = self.storage.load();

        let errors = validate_draft(&draft, Some(&registry));
        if !errors.is_empty() {
            return Err(RegistryError::Validation(errors));
        }

        let id = next_record_id(&registry);
        registry.push(draft.into_person(id, Local::now().naive_local()));

        self.storage.save(&registry)?;

        log::info!("Created record [{}]", id);

        Ok(id)
    }

    pub fn get(&self, id: RecordId) -> Result<Person, RegistryError> {
        self.storage
            .load()
            .into_iter()
            .find(|person| person.id == id)
            .ok_or(RegistryError::NotFound(id))
    }

    #[tracing::instrument(skip(self, draft))]
    pub fn update(&self, id: RecordId, draft: PersonDraft) -> Result<(), RegistryError> {
        let mut registry = self.storage.load();

        let person = registry
            .iter_mut()
            .find(|person| person.id == id)
            .ok_or(RegistryError::NotFound(id))?;

        // Uniqueness is deliberately not re-checked on edit; see DESIGN.md
        let errors = validate_draft(&draft, None);
        if !errors.is_empty() {
            return Err(RegistryError::Validation(errors));
        }

        person.apply_draft(draft);

        self.storage.save(&registry)?;

        log::info!("Updated record [{}]", id);

        Ok(())
    }

    /// Two-step removal: the first call arms `confirmation` for `id` and
    /// leaves the registry untouched, the second call with the same id
    /// armed performs it. Requesting a different id re-arms for that id.
    #[tracing::instrument(skip(self, confirmation))]
    pub fn delete(
        &self,
        id: RecordId,
        confirmation: &mut DeleteConfirmation,
    ) -> Result<DeleteOutcome, RegistryError> {
        let mut registry = self.storage.load();

        if !registry.iter().any(|person| person.id == id) {
            return Err(RegistryError::NotFound(id));
        }

        if !confirmation.is_armed_for(id) {
            confirmation.arm(id);
            return Ok(DeleteOutcome::ConfirmationRequired);
        }

        registry.retain(|person| person.id != id);
        self.storage.save(&registry)?;
        confirmation.clear();

        log::info!("Deleted record [{}]", id);

        Ok(DeleteOutcome::Deleted)
    }

    /// Matching records in load order.
    #[tracing::instrument(skip(self, record_filter))]
    pub fn query(&self, record_filter: &RecordFilter) -> Vec<Person> {
        let registry = self.storage.load();

        filter::matching(&registry, record_filter)
            .cloned()
            .collect()
    }

    /// The same query projected onto the listing columns.
    pub fn query_summaries(&self, record_filter: &RecordFilter) -> Vec<PersonSummary> {
        self.query(record_filter)
            .iter()
            .map(PersonSummary::from)
            .collect()
    }

    #[tracing::instrument(skip(self))]
    pub fn statistics(&self) -> RegistryStats {
        RegistryStats::compute(&self.storage.load(), Local::now().date_naive())
    }

    /// Canonical tabular bytes for a download of `records`, identical to
    /// the format the store itself persists.
    pub fn export(&self, records: &[Person]) -> Result<Vec<u8>, RegistryError> {
        Ok(to_csv_bytes(records)?)
    }
}

/// Name the download the way the registry always has,
/// e.g. `cadastros_filtrados_20240301_1030.csv`.
pub fn export_file_name(timestamp: NaiveDateTime) -> String {
    format!(
        "cadastros_filtrados_{}.csv",
        timestamp.format("%Y%m%d_%H%M")
    )
}

/// Collects every validation failure instead of stopping at the first.
/// Duplicate checks compare against the freshly loaded registry and only
/// run when one is supplied (the create path).
fn validate_draft(draft: &PersonDraft, registry: Option<&[Person]>) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if draft.full_name.trim().is_empty() {
        errors.push(ValidationError::MissingRequiredField("Full Name"));
    }

    if draft.cpf.trim().is_empty() {
        errors.push(ValidationError::MissingRequiredField("CPF"));
    } else if !is_valid_cpf(&draft.cpf) {
        errors.push(ValidationError::InvalidCpf(draft.cpf.clone()));
    } else if let Some(registry) = registry {
        if registry.iter().any(|person| person.cpf == draft.cpf) {
            errors.push(ValidationError::DuplicateCpf(draft.cpf.clone()));
        }
    }

    if draft.email.trim().is_empty() {
        errors.push(ValidationError::MissingRequiredField("Email"));
    } else if !is_valid_email(&draft.email) {
        errors.push(ValidationError::InvalidEmail(draft.email.clone()));
    } else if let Some(registry) = registry {
        if registry.iter().any(|person| person.email == draft.email) {
            errors.push(ValidationError::DuplicateEmail(draft.email.clone()));
        }
    }

    errors
}

/// Highest existing id plus one, 1 for an empty registry. Count-based
/// assignment would hand out an id that is still present after a
/// non-terminal delete.
fn next_record_id(registry: &[Person]) -> RecordId {
    let highest = registry
        .iter()
        .map(|person| person.id.to_number())
        .max()
        .unwrap_or(0);

    RecordId(highest + 1)
}
