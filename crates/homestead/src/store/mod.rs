//! # Storage Layer
//!
//! Two pieces, leaves first:
//!
//! 1. **Backends** ([`backend::StorageBackend`]): raw load/save of the whole
//!    customer document. [`fs_backend::FsBackend`] writes a YAML file,
//!    [`mem_backend::MemBackend`] keeps the text in memory for tests.
//! 2. **Record store** ([`record_store::RecordStore`]): fetch, partial update and
//!    insert over whatever a backend loads. Implements [`CustomerStore`].
//!
//! ## The Cycle
//!
//! Every operation is `load → scan/mutate → save`. The file is the unit of I/O;
//! there are no partial reads or writes and no cache between calls.
//!
//! ## Invariants
//!
//! - `id` is unique across the collection.
//! - `email` is unique across the collection.
//!
//! Both are checked on insert only. An update may set an email another record
//! already uses; ids cannot be changed at all.
//!
//! ## Durability
//!
//! - Saves go to a temporary file in the same directory, then rename over the
//!   target, so readers see the old document or the new one.
//! - A missing file loads as an empty collection.
//! - Writers inside one process are serialized by a lock in the record store.
//!
//! ## Storage Layout
//!
//! ```text
//! customers.yaml          # the whole collection
//! .customers.yaml-*.tmp   # transient, only during a save
//! ```

use crate::error::Result;
use crate::model::{Customer, CustomerPatch, StoredCustomer};

pub mod backend;
pub mod document;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod record_store;

/// Abstract interface for customer storage.
pub trait CustomerStore: Send + Sync {
    /// Get a customer by id
    fn fetch(&self, id: &str) -> Result<Customer>;

    /// Overwrite the fields present in `patch` on the customer with `id`.
    /// A stored record missing required fields is still updated and comes
    /// back as [`StoredCustomer::Partial`].
    fn apply_update(&self, id: &str, patch: &CustomerPatch) -> Result<StoredCustomer>;

    /// Append a new customer, enforcing email and id uniqueness
    fn insert(&self, customer: &Customer) -> Result<Customer>;
}

/// Production store: a YAML file on disk.
pub type FileStore = record_store::RecordStore<fs_backend::FsBackend>;

impl FileStore {
    pub fn open(path: impl Into<std::path::PathBuf>) -> Self {
        record_store::RecordStore::with_backend(fs_backend::FsBackend::new(path))
    }
}
