// ABOUTME: Main library module for the milepost stage-tracking engine
// ABOUTME: Exports all core modules and provides the public API

pub mod audit;
pub mod cli;
pub mod store;
pub mod timeline;
pub mod workflow;

// Re-export commonly used types
pub use audit::{AuditSink, JsonlAuditSink, MemoryAuditSink};
pub use cli::{App, Args, Config};
pub use store::{FileTaskStore, MemoryTaskStore, StoreError, TaskStore};
pub use timeline::{project, TimelineProjection};
pub use workflow::{
    Actor, DenyReason, Role, Stage, TaskRecord, TaskStatus, TransitionEvent, TransitionKind,
    TransitionOutcome, WorkflowEngine,
};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
