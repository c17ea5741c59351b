// ABOUTME: Audit module for milepost
// ABOUTME: Sink trait plus JSONL and in-memory implementations

pub mod error;
pub mod jsonl;
pub mod recorder;

pub use error::AuditError;
pub use jsonl::JsonlAuditSink;
pub use recorder::{AuditSink, MemoryAuditSink};
