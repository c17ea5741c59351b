// ABOUTME: JSONL audit log writing one transition event per line
// ABOUTME: Appends to a log file and reads it back for history display

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::error::{AuditError, Result};
use super::recorder::AuditSink;
use crate::workflow::TransitionEvent;

/// File-backed audit sink: one JSON object per line, append-only.
#[derive(Debug, Clone)]
pub struct JsonlAuditSink {
    path: PathBuf,
}

impl JsonlAuditSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every event back from the log, in write order.
    /// A missing log file reads as an empty history.
    pub async fn read_all(&self) -> Result<Vec<TransitionEvent>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).await?;
        let mut events = Vec::new();

        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let event: TransitionEvent =
                serde_json::from_str(line).map_err(|e| AuditError::MalformedLine {
                    line: index + 1,
                    message: e.to_string(),
                })?;
            events.push(event);
        }

        Ok(events)
    }

    /// Events for one task, in write order.
    pub async fn read_task(&self, task_id: &str) -> Result<Vec<TransitionEvent>> {
        let mut events = self.read_all().await?;
        events.retain(|e| e.task_id == task_id);
        Ok(events)
    }
}

#[async_trait]
impl AuditSink for JsonlAuditSink {
    async fn record(&self, event: &TransitionEvent) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let line = serde_json::to_string(event)?;

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.write_all(b"\n").await?;

        debug!(
            "Audit event {} appended to {}",
            event.event_id,
            self.path.display()
        );
        Ok(())
    }
}
