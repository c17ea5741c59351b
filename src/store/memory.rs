// ABOUTME: In-memory task store used by tests and embedding callers
// ABOUTME: An ordered map behind an async RwLock with compare-and-swap saves

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use super::error::{Result, StoreError};
use super::TaskStore;
use crate::workflow::TaskRecord;

#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<IndexMap<String, TaskRecord>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert(&self, record: &TaskRecord) -> Result<()> {
        let mut tasks = self.tasks.write().await;

        if tasks.contains_key(&record.id) {
            return Err(StoreError::AlreadyExists {
                task_id: record.id.clone(),
            });
        }

        tasks.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn load(&self, task_id: &str) -> Result<TaskRecord> {
        let tasks = self.tasks.read().await;
        tasks
            .get(task_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                task_id: task_id.to_string(),
            })
    }

    async fn save(&self, record: &TaskRecord) -> Result<TaskRecord> {
        let mut tasks = self.tasks.write().await;

        let current = tasks
            .get(&record.id)
            .ok_or_else(|| StoreError::NotFound {
                task_id: record.id.clone(),
            })?;

        if current.version != record.version {
            return Err(StoreError::VersionConflict {
                task_id: record.id.clone(),
                expected: record.version,
                found: current.version,
            });
        }

        let mut stored = record.clone();
        stored.version += 1;
        tasks.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<TaskRecord>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.values().cloned().collect())
    }
}
