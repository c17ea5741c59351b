// ABOUTME: Error types for task store operations
// ABOUTME: VersionConflict is the expected outcome of a stale save; the caller retries

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Task not found: {task_id}")]
    NotFound { task_id: String },

    #[error("Task already exists: {task_id}")]
    AlreadyExists { task_id: String },

    #[error("Version conflict for task {task_id}: expected {expected}, found {found}")]
    VersionConflict {
        task_id: String,
        expected: u64,
        found: u64,
    },

    #[error("Failed to read task store: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse task store: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl StoreError {
    pub fn is_version_conflict(&self) -> bool {
        matches!(self, StoreError::VersionConflict { .. })
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
