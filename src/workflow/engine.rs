// ABOUTME: The workflow engine orchestrating stage transitions
// ABOUTME: Validates a request, computes the next record, and emits a transition event

use chrono::{DateTime, Utc};
use tracing::debug;

use super::error::Result;
use super::event::{TransitionEvent, TransitionKind};
use super::record::{Actor, TaskRecord, TaskStatus};
use super::stage::Stage;
use super::validator::{Permit, TransitionValidator};

/// The result of a permitted transition: the successor record (the input
/// is never mutated) and the event describing what changed. The caller
/// persists the record and forwards the event to the audit sink.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub record: TaskRecord,
    pub event: TransitionEvent,
}

#[derive(Debug, Default)]
pub struct WorkflowEngine;

impl WorkflowEngine {
    pub fn new() -> Self {
        Self
    }

    /// Request a transition, stamping the current time on whatever the
    /// target stage records.
    pub fn request_transition(
        &self,
        record: &TaskRecord,
        actor: &Actor,
        target: Stage,
        reason: Option<&str>,
    ) -> Result<TransitionOutcome> {
        self.request_transition_at(record, actor, target, reason, Utc::now())
    }

    /// Same as `request_transition` with an explicit clock instant, for
    /// callers that need determinism.
    pub fn request_transition_at(
        &self,
        record: &TaskRecord,
        actor: &Actor,
        target: Stage,
        reason: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<TransitionOutcome> {
        let permit = TransitionValidator::validate(record, actor, target, reason)?;

        let mut next = record.clone();
        next.execution_stage = target;

        match target {
            Stage::Completed => next.status = TaskStatus::Completed,
            Stage::Review => next.status = TaskStatus::WaitingForReview,
            _ => {}
        }

        // First entry into a stage records its instant; revisits keep it.
        next.timestamps.record_entry(target, now);

        let (kind, note) = match permit {
            Permit::Ordinary { note } => (TransitionKind::Ordinary, note),
            Permit::Override { reason } => {
                next.last_override_reason = Some(reason.clone());
                (TransitionKind::Override, Some(reason))
            }
        };

        let event = TransitionEvent {
            event_id: uuid::Uuid::new_v4().to_string(),
            task_id: next.id.clone(),
            actor_id: actor.id.clone(),
            from_stage: record.execution_stage,
            to_stage: target,
            kind,
            note,
            occurred_at: now,
        };

        debug!(
            "Transition permitted for task {}: {} -> {} ({})",
            event.task_id, event.from_stage, event.to_stage, event.kind
        );

        Ok(TransitionOutcome { record: next, event })
    }
}
