use crate::error::Result;
use crate::model::Collection;

/// Raw whole-document I/O.
///
/// A backend knows how to read and write the customer document and nothing
/// else. Identity, uniqueness, and merging live in [`super::record_store`].
pub trait StorageBackend: Send + Sync {
    /// Load the full collection.
    /// A missing document yields an empty collection, not an error.
    fn load(&self) -> Result<Collection>;

    /// Replace the stored document with `collection`.
    /// MUST be atomic (e.g. write to tmp then rename) so readers never see a partial file.
    fn save(&self, collection: &Collection) -> Result<()>;

    /// Human-readable location, used in log events.
    fn describe(&self) -> String;
}

impl StorageBackend for Box<dyn StorageBackend> {
    fn load(&self) -> Result<Collection> {
        (**self).load()
    }

    fn save(&self, collection: &Collection) -> Result<()> {
        (**self).save(collection)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
