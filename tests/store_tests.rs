// ABOUTME: Integration tests for the task stores
// ABOUTME: Exercises compare-and-swap semantics and YAML persistence

use tempfile::tempdir;

use milepost::store::{FileTaskStore, MemoryTaskStore, StoreError, TaskStore};
use milepost::workflow::{Stage, TaskRecord, TaskStatus, WorkflowEngine};

mod common;
use common::{assignee, fresh_task, manager};

#[tokio::test]
async fn test_memory_store_conflict_on_concurrent_writers() {
    let store = MemoryTaskStore::new();
    let engine = WorkflowEngine::new();
    store.insert(&fresh_task()).await.unwrap();

    // Two actors load the same version
    let seen_by_assignee = store.load("t1").await.unwrap();
    let seen_by_manager = store.load("t1").await.unwrap();

    // Assignee lands first
    let ours = engine
        .request_transition(&seen_by_assignee, &assignee(), Stage::Started, None)
        .unwrap();
    store.save(&ours.record).await.unwrap();

    // Manager's force-complete now carries a stale version
    let theirs = engine
        .request_transition(
            &seen_by_manager,
            &manager(),
            Stage::Completed,
            Some("cut from the sprint"),
        )
        .unwrap();
    let err = store.save(&theirs.record).await.unwrap_err();
    assert!(err.is_version_conflict());

    // The retry protocol: re-fetch and re-run against the fresh record
    let fresh = store.load("t1").await.unwrap();
    let retried = engine
        .request_transition(&fresh, &manager(), Stage::Completed, Some("cut from the sprint"))
        .unwrap();
    let stored = store.save(&retried.record).await.unwrap();

    assert_eq!(stored.execution_stage, Stage::Completed);
    assert_eq!(stored.status, TaskStatus::Completed);
    assert_eq!(stored.version, 2);
    // The assignee's first move survived the conflict
    assert!(stored.timestamps.started_at.is_some());
}

#[tokio::test]
async fn test_file_store_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.yaml");
    let engine = WorkflowEngine::new();

    {
        let store = FileTaskStore::new(&path);
        store.insert(&fresh_task()).await.unwrap();
        store.insert(&TaskRecord::new("t2", "u2")).await.unwrap();

        let record = store.load("t1").await.unwrap();
        let outcome = engine
            .request_transition(&record, &assignee(), Stage::Started, None)
            .unwrap();
        store.save(&outcome.record).await.unwrap();
    }

    // A brand-new store instance reads the same state back
    let store = FileTaskStore::new(&path);
    let records = store.list().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "t1");
    assert_eq!(records[0].execution_stage, Stage::Started);
    assert_eq!(records[0].version, 1);
    assert_eq!(records[1].id, "t2");
    assert_eq!(records[1].execution_stage, Stage::NotStarted);
}

#[tokio::test]
async fn test_file_store_rejects_unknown_and_duplicate_ids() {
    let dir = tempdir().unwrap();
    let store = FileTaskStore::new(dir.path().join("tasks.yaml"));

    let err = store.load("missing").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));

    store.insert(&fresh_task()).await.unwrap();
    let err = store.insert(&fresh_task()).await.unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists { .. }));

    let err = store.save(&TaskRecord::new("missing", "u1")).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}
