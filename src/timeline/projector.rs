// ABOUTME: Derives display-facing progress from a task record
// ABOUTME: Pure projection of stage and status into index, percent, and milestones

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::workflow::{Stage, TaskRecord, TaskStatus};

/// Rank of the final stage; the denominator of the percent computation.
const FINAL_RANK: u8 = 4;

/// Progress along the execution line as the UI renders it. A completed
/// status pins the projection to the end regardless of the current stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelineProjection {
    pub current_index: u8,
    pub percent: f64,
    pub is_terminal: bool,
}

/// One timestamped step along the main line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Milestone {
    pub stage: Stage,
    pub reached_at: Option<DateTime<Utc>>,
}

pub fn project(record: &TaskRecord) -> TimelineProjection {
    let current_index = match record.status {
        TaskStatus::Completed => Stage::Completed.rank(),
        TaskStatus::WaitingForReview => Stage::LiveDone.rank(),
        TaskStatus::InProgress => record.execution_stage.rank(),
    };

    TimelineProjection {
        current_index,
        percent: f64::from(current_index) / f64::from(FINAL_RANK) * 100.0,
        is_terminal: record.status == TaskStatus::Completed,
    }
}

/// The four timestamped stages with their first-entry instants, in rank
/// order. Stages not yet reached show no instant.
pub fn milestones(record: &TaskRecord) -> Vec<Milestone> {
    [
        Stage::Started,
        Stage::LocalDone,
        Stage::LiveDone,
        Stage::Completed,
    ]
    .into_iter()
    .map(|stage| Milestone {
        stage,
        reached_at: record.timestamps.get(stage),
    })
    .collect()
}
