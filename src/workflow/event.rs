// ABOUTME: Transition events emitted by the engine for audit and notification
// ABOUTME: One event per permitted transition, serialized as JSON lines by the audit sink

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stage::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Ordinary,
    Override,
}

impl TransitionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionKind::Ordinary => "ordinary",
            TransitionKind::Override => "override",
        }
    }
}

impl std::fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What changed, by whom, and why. For override transitions `note` holds
/// the mandatory reason; for ordinary ones it holds the optional note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEvent {
    pub event_id: String,
    pub task_id: String,
    pub actor_id: String,
    pub from_stage: Stage,
    pub to_stage: Stage,
    pub kind: TransitionKind,
    #[serde(default)]
    pub note: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl std::fmt::Display for TransitionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} -> {} by {} ({})",
            self.occurred_at.format("%Y-%m-%d %H:%M:%S"),
            self.task_id,
            self.from_stage,
            self.to_stage,
            self.actor_id,
            self.kind,
        )?;
        if let Some(ref note) = self.note {
            write!(f, ": {}", note)?;
        }
        Ok(())
    }
}
