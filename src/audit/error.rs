// ABOUTME: Error types for audit sink operations
// ABOUTME: Covers log file I/O and event serialization failures

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Failed to write audit log: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to serialize audit event: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error("Malformed audit log line {line}: {message}")]
    MalformedLine { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, AuditError>;
