// ABOUTME: Error and denial types for the workflow engine
// ABOUTME: Policy denials are values, not failures; parse errors guard the name boundary

use thiserror::Error;

use super::stage::Stage;

/// Why a requested transition was refused.
///
/// Every variant is an expected policy outcome. Adapters translate these
/// into user-facing messages or HTTP status codes; nothing here represents
/// an infrastructure failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    #[error("actor '{actor}' is neither the assignee nor a supervisor")]
    Unauthorized { actor: String },

    #[error("override from {from} to {to} requires a non-empty reason")]
    ReasonRequired { from: Stage, to: Stage },

    #[error("no transition from {from} to {to}")]
    InvalidTransition { from: Stage, to: Stage },

    #[error("task is already in stage {stage}")]
    NoOpTransition { stage: Stage },
}

/// Rejections for stage and role names arriving from outside the type
/// system (CLI arguments, config files).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown stage '{0}'")]
    UnknownStage(String),

    #[error("unknown role '{0}'")]
    UnknownRole(String),
}

pub type Result<T> = std::result::Result<T, DenyReason>;
