use std::{fs, path::PathBuf};

use crate::model::{person::Person, validation::canonical_columns};

use super::{csv_to_generic_error, io_to_generic_error, Storage, StorageError, StorageResult};

/// Single-file CSV engine. One header row with the canonical columns, one
/// row per record.
pub struct FileStorage {
    store_path: PathBuf,
}

impl FileStorage {
    pub fn new(store_path: PathBuf) -> Self {
        Self { store_path }
    }

    pub fn store_path(&self) -> &PathBuf {
        &self.store_path
    }

    fn try_load(&self) -> StorageResult<Vec<Person>> {
        let mut reader = csv::Reader::from_path(&self.store_path)
            .map_err(|e| StorageError::UnableToReadStore(csv_to_generic_error(e)))?;

        let mut records = Vec::new();

        for row in reader.deserialize() {
            let person: Person =
                row.map_err(|e| StorageError::UnableToReadStore(csv_to_generic_error(e)))?;

            records.push(person);
        }

        Ok(records)
    }
}

impl Storage for FileStorage {
    #[tracing::instrument(skip(self))]
    fn init(&self) -> StorageResult<()> {
        if self.store_path.exists() {
            return Ok(());
        }

        if let Some(parent) = self.store_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| StorageError::UnableToInitializeStore(io_to_generic_error(e)))?;
            }
        }

        let empty_store = to_csv_bytes(&[])?;

        fs::write(&self.store_path, empty_store)
            .map_err(|e| StorageError::UnableToInitializeStore(io_to_generic_error(e)))
    }

    #[tracing::instrument(skip(self))]
    fn load(&self) -> Vec<Person> {
        if !self.store_path.exists() {
            if let Err(error) = self.init() {
                log::warn!(
                    "Unable to create store at [{}]: {}",
                    self.store_path.display(),
                    error
                );
            }

            return Vec::new();
        }

        match self.try_load() {
            Ok(records) => records,
            Err(error) => {
                log::warn!(
                    "Store at [{}] is unreadable, continuing with an empty registry: {}",
                    self.store_path.display(),
                    error
                );

                Vec::new()
            }
        }
    }

    #[tracing::instrument(skip(self, records))]
    fn save(&self, records: &[Person]) -> StorageResult<()> {
        let bytes = to_csv_bytes(records)?;

        // Full overwrite. A failure part way through truncates the store,
        // the caller sees the error and nothing is retried.
        fs::write(&self.store_path, bytes)
            .map_err(|e| StorageError::UnableToWriteStore(io_to_generic_error(e)))
    }
}

/// Encodes records into the canonical tabular byte format, header included.
/// The store file and the export download are both produced here so they
/// can never drift apart.
pub fn to_csv_bytes(records: &[Person]) -> StorageResult<Vec<u8>> {
    // The header is written by hand so an empty record set still produces
    // the canonical columns
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(canonical_columns())
        .map_err(|e| StorageError::UnableToEncodeRecords(csv_to_generic_error(e)))?;

    for record in records {
        writer
            .serialize(record)
            .map_err(|e| StorageError::UnableToEncodeRecords(csv_to_generic_error(e)))?;
    }

    writer
        .into_inner()
        .map_err(|e| StorageError::UnableToEncodeRecords(anyhow::Error::new(e)))
}
