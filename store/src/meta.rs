//! Metadata storage trait.

use crate::StoreError;

/// Trait for storing singleton cells (token configuration, minimum
/// threshold, proposal sequence counter, event log).
///
/// This is a generic key-value store for state that doesn't belong in any
/// keyed table.
pub trait MetaStore {
    /// Store a metadata value.
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Retrieve a metadata value, or `None` if the cell was never written.
    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Delete a metadata entry.
    fn delete_meta(&self, key: &str) -> Result<(), StoreError>;
}
