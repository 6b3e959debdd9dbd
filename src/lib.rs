//! Registry of natural-person records backed by a single tabular store file.
//!
//! Callers drive the registry through `registry::registry::RegistryStore`;
//! every operation loads the full record set, validates and mutates it in
//! memory, and writes the whole set back. Single-writer by design.

pub mod consts;
pub mod model;
pub mod persistence;
pub mod registry;
