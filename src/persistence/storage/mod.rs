pub mod file;

use thiserror::Error;

use crate::model::person::Person;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Unable to initialize store: {0}")]
    UnableToInitializeStore(anyhow::Error),

    #[error("Unable to read store: {0}")]
    UnableToReadStore(anyhow::Error),

    #[error("Unable to write store: {0}")]
    UnableToWriteStore(anyhow::Error),

    #[error("Unable to encode records: {0}")]
    UnableToEncodeRecords(anyhow::Error),
}

pub fn io_to_generic_error(error: std::io::Error) -> anyhow::Error {
    anyhow::Error::new(error)
}

pub fn csv_to_generic_error(error: csv::Error) -> anyhow::Error {
    anyhow::Error::new(error)
}

/// Durable load/save of the entire registry as one tabular resource. The
/// registry is never partially read or partially grown, every save replaces
/// the whole resource.
pub trait Storage {
    /// Creates the resource with the canonical columns and zero rows when it
    /// does not exist. Idempotent.
    fn init(&self) -> StorageResult<()>;

    /// Every record currently in the resource, in file order. A missing or
    /// corrupt resource is never surfaced: the store is recreated when
    /// absent and the registry comes back empty.
    fn load(&self) -> Vec<Person>;

    /// Overwrites the resource with the full record set, columns in
    /// canonical order. Not transactional, a failure part way through can
    /// leave the resource truncated.
    fn save(&self, records: &[Person]) -> StorageResult<()>;
}
