// ABOUTME: Task record data model including actors, status, and stage timestamps
// ABOUTME: Records are mutated only through the engine; timestamps are set once per stage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::ParseError;
use super::stage::Stage;

/// Caller identity for a transition request, resolved by the surrounding
/// application. The engine never authenticates; it only consumes this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Manager,
    Admin,
    Owner,
}

impl Role {
    /// Supervisors hold override rights over any assignee's task.
    pub fn is_supervisor(&self) -> bool {
        matches!(self, Role::Manager | Role::Admin | Role::Owner)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Manager => "manager",
            Role::Admin => "admin",
            Role::Owner => "owner",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "manager" => Ok(Role::Manager),
            "admin" => Ok(Role::Admin),
            "owner" => Ok(Role::Owner),
            other => Err(ParseError::UnknownRole(other.to_string())),
        }
    }
}

/// Coarse task status derived from stage transitions. `Completed` is
/// terminal and wins over `execution_stage` for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    InProgress,
    WaitingForReview,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::InProgress => "in_progress",
            TaskStatus::WaitingForReview => "waiting_for_review",
            TaskStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// First-entry instants for the four stages that carry a timestamp.
/// Each field is written at most once per task lifecycle; re-entering a
/// stage after a reset keeps the original instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTimestamps {
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub local_run_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub live_run_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl StageTimestamps {
    /// The recorded first-entry instant for a stage, if any.
    /// `not_started` and `review` carry no timestamp.
    pub fn get(&self, stage: Stage) -> Option<DateTime<Utc>> {
        match stage {
            Stage::Started => self.started_at,
            Stage::LocalDone => self.local_run_at,
            Stage::LiveDone => self.live_run_at,
            Stage::Completed => self.completed_at,
            Stage::NotStarted | Stage::Review => None,
        }
    }

    /// Record the entry instant for a stage unless one is already set.
    pub(crate) fn record_entry(&mut self, stage: Stage, at: DateTime<Utc>) {
        let slot = match stage {
            Stage::Started => &mut self.started_at,
            Stage::LocalDone => &mut self.local_run_at,
            Stage::LiveDone => &mut self.live_run_at,
            Stage::Completed => &mut self.completed_at,
            Stage::NotStarted | Stage::Review => return,
        };

        if slot.is_none() {
            *slot = Some(at);
        }
    }
}

/// A task as seen by the workflow engine.
///
/// The `version` field is the store's optimistic-concurrency token; the
/// engine copies it through untouched and the store bumps it on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub assigned_to: String,
    pub execution_stage: Stage,
    pub status: TaskStatus,
    #[serde(default)]
    pub timestamps: StageTimestamps,
    #[serde(default)]
    pub last_override_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub version: u64,
}

impl TaskRecord {
    /// Create a freshly assigned task at the start of the workflow.
    pub fn new(id: impl Into<String>, assigned_to: impl Into<String>) -> Self {
        Self::assigned_at(id, assigned_to, Utc::now())
    }

    /// Same as `new` with an explicit creation instant.
    pub fn assigned_at(
        id: impl Into<String>,
        assigned_to: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            assigned_to: assigned_to.into(),
            execution_stage: Stage::NotStarted,
            status: TaskStatus::InProgress,
            timestamps: StageTimestamps::default(),
            last_override_reason: None,
            created_at: at,
            version: 0,
        }
    }

    pub fn is_assigned_to(&self, actor_id: &str) -> bool {
        self.assigned_to == actor_id
    }
}
