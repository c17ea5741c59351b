// ABOUTME: YAML file-backed task store for the single-shot CLI
// ABOUTME: Reads and rewrites one ordered document per operation with CAS on version

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use super::error::{Result, StoreError};
use super::TaskStore;
use crate::workflow::TaskRecord;

/// On-disk document shape. Tasks keep their insertion order in the file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    tasks: IndexMap<String, TaskRecord>,
}

/// Store backed by a single YAML file. Each operation reads the whole
/// document and writes it back, which suits a one-command-at-a-time CLI;
/// the version check still rejects writes from a stale read.
#[derive(Debug, Clone)]
pub struct FileTaskStore {
    path: PathBuf,
}

impl FileTaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<StoreDocument> {
        if !self.path.exists() {
            return Ok(StoreDocument::default());
        }

        let contents = fs::read_to_string(&self.path).await?;
        if contents.trim().is_empty() {
            return Ok(StoreDocument::default());
        }

        Ok(serde_yaml::from_str(&contents)?)
    }

    async fn write_document(&self, document: &StoreDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let contents = serde_yaml::to_string(document)?;
        fs::write(&self.path, contents).await?;

        debug!(
            "Task store written: {} ({} tasks)",
            self.path.display(),
            document.tasks.len()
        );
        Ok(())
    }
}

#[async_trait]
impl TaskStore for FileTaskStore {
    async fn insert(&self, record: &TaskRecord) -> Result<()> {
        let mut document = self.read_document().await?;

        if document.tasks.contains_key(&record.id) {
            return Err(StoreError::AlreadyExists {
                task_id: record.id.clone(),
            });
        }

        document.tasks.insert(record.id.clone(), record.clone());
        self.write_document(&document).await
    }

    async fn load(&self, task_id: &str) -> Result<TaskRecord> {
        let document = self.read_document().await?;
        document
            .tasks
            .get(task_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                task_id: task_id.to_string(),
            })
    }

    async fn save(&self, record: &TaskRecord) -> Result<TaskRecord> {
        let mut document = self.read_document().await?;

        let current = document
            .tasks
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
        document.tasks.insert(stored.id.clone(), stored.clone());
        self.write_document(&document).await?;
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<TaskRecord>> {
        let document = self.read_document().await?;
        Ok(document.tasks.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::Stage;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_round_trip_through_file() {
        let dir = tempdir().unwrap();
        let store = FileTaskStore::new(dir.path().join("tasks.yaml"));

        let record = TaskRecord::new("t1", "u1");
        store.insert(&record).await.unwrap();

        let loaded = store.load("t1").await.unwrap();
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let dir = tempdir().unwrap();
        let store = FileTaskStore::new(dir.path().join("tasks.yaml"));

        assert!(store.list().await.unwrap().is_empty());
        let err = store.load("t1").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_save_persists_bumped_version() {
        let dir = tempdir().unwrap();
        let store = FileTaskStore::new(dir.path().join("tasks.yaml"));

        let record = TaskRecord::new("t1", "u1");
        store.insert(&record).await.unwrap();

        let mut updated = record.clone();
        updated.execution_stage = Stage::Started;
        let stored = store.save(&updated).await.unwrap();
        assert_eq!(stored.version, 1);

        // A second store instance sees the same state
        let reopened = FileTaskStore::new(store.path());
        let loaded = reopened.load("t1").await.unwrap();
        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.execution_stage, Stage::Started);
    }

    #[tokio::test]
    async fn test_stale_save_conflicts() {
        let dir = tempdir().unwrap();
        let store = FileTaskStore::new(dir.path().join("tasks.yaml"));

        let record = TaskRecord::new("t1", "u1");
        store.insert(&record).await.unwrap();
        store.save(&record).await.unwrap();

        let err = store.save(&record).await.unwrap_err();
        assert!(err.is_version_conflict());
    }
}
