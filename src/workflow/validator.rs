// ABOUTME: Transition validation rules for ordinary and override requests
// ABOUTME: Decides permit or deny from current stage, actor identity, and reason

use super::error::{DenyReason, Result};
use super::graph;
use super::record::{Actor, TaskRecord};
use super::stage::Stage;

/// A validated go-ahead for a transition. Ordinary permits may carry an
/// optional note; override permits always carry the mandatory reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Permit {
    Ordinary { note: Option<String> },
    Override { reason: String },
}

pub struct TransitionValidator;

impl TransitionValidator {
    /// Apply the permit rules in order. Denials are returned as values;
    /// this function does not panic for any well-formed input.
    pub fn validate(
        record: &TaskRecord,
        actor: &Actor,
        target: Stage,
        reason: Option<&str>,
    ) -> Result<Permit> {
        let current = record.execution_stage;

        // Re-requesting the current stage is a no-op. A repeated completed
        // request falls through and dies in the edge tables instead, since
        // completed -> completed is in neither of them.
        if target == current && target != Stage::Completed {
            return Err(DenyReason::NoOpTransition { stage: target });
        }

        let is_assignee = record.is_assigned_to(&actor.id);

        if !actor.role.is_supervisor() && !is_assignee {
            return Err(DenyReason::Unauthorized {
                actor: actor.id.clone(),
            });
        }

        if is_assignee && graph::is_ordinary(current, target) {
            return Ok(Permit::Ordinary {
                note: trimmed_nonempty(reason),
            });
        }

        if actor.role.is_supervisor() && graph::is_override(current, target) {
            return match trimmed_nonempty(reason) {
                Some(reason) => Ok(Permit::Override { reason }),
                None => Err(DenyReason::ReasonRequired {
                    from: current,
                    to: target,
                }),
            };
        }

        Err(DenyReason::InvalidTransition {
            from: current,
            to: target,
        })
    }
}

fn trimmed_nonempty(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
}
