//! Pages Module
//!
//! Owns the page record table: creation with generated ids and secrets,
//! lookup, administrative listing, deletion, and retention expiry.

mod memory;
mod record;
mod sqlite;
mod token;


// Re-export public types
pub use memory::MemoryPageStore;
pub use record::{NewPage, PageMeta, PageRecord, PageStats};
pub use sqlite::SqlitePageStore;
pub use token::{current_timestamp_ms, generate_page_id, generate_secret, SECRET_LEN};

use crate::error::Result;

/// How many times a store retries id generation on collision before giving
/// up. Hitting even one retry is already a 1-in-62^8 event per bucket.
pub(crate) const ID_COLLISION_RETRIES: usize = 3;

// == Page Store Contract ==
/// The page repository contract. Implementations own the record table and
/// are its only writers; every operation touches a single row or makes a
/// single pass over the table, so no cross-record transaction exists.
pub trait PageStore: Send + Sync {
    /// Validates, generates id/secret, persists, and returns the full record.
    /// The returned record is the only place the plaintext secret appears
    /// outside direct lookup.
    fn create(&self, page: NewPage) -> Result<PageRecord>;

    /// Single-row lookup, no side effects. Returns the full record; secret
    /// redaction is the caller's concern at the transport boundary.
    fn get_by_id(&self, id: &str) -> Result<Option<PageRecord>>;

    /// True iff a record with this id exists.
    fn exists(&self, id: &str) -> Result<bool>;

    /// Metadata for every record, ordered by `created_at` descending.
    /// Administrative listing only.
    fn list_all(&self) -> Result<Vec<PageMeta>>;

    /// Removes a record. Returns true iff a row was removed; deleting an
    /// already-deleted row is a no-op, not an error.
    fn delete_by_id(&self, id: &str) -> Result<bool>;

    /// Removes every record with `created_at < now - window_ms` and returns
    /// how many were removed. Called by the lifecycle janitor.
    fn delete_expired(&self, window_ms: u64) -> Result<usize>;

    /// Aggregate counts over the table.
    fn stats(&self) -> Result<PageStats>;
}
