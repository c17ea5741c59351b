// ABOUTME: Task store module for milepost
// ABOUTME: Persistence boundary with at-most-one-writer semantics per record

pub mod error;
pub mod file;
pub mod memory;

use async_trait::async_trait;

use crate::workflow::TaskRecord;

pub use error::StoreError;
pub use file::FileTaskStore;
pub use memory::MemoryTaskStore;

use error::Result;

/// Persistence boundary for task records.
///
/// `save` is a compare-and-swap: the incoming record's `version` must match
/// the stored one, and the stored copy comes back with the version bumped.
/// Callers re-fetch and retry once on `VersionConflict`.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Create a new record; rejects an id that already exists.
    async fn insert(&self, record: &TaskRecord) -> Result<()>;

    async fn load(&self, task_id: &str) -> Result<TaskRecord>;

    /// Persist an engine-produced record, returning the stored copy.
    async fn save(&self, record: &TaskRecord) -> Result<TaskRecord>;

    /// All records, in insertion order.
    async fn list(&self) -> Result<Vec<TaskRecord>>;
}
