// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides record and actor builders plus isolated CLI environments

#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;

use milepost::workflow::{Actor, Role, Stage, TaskRecord, WorkflowEngine};

pub fn assignee() -> Actor {
    Actor::new("u1", Role::User)
}

pub fn manager() -> Actor {
    Actor::new("m1", Role::Manager)
}

pub fn stranger() -> Actor {
    Actor::new("u2", Role::User)
}

pub fn fresh_task() -> TaskRecord {
    TaskRecord::new("t1", "u1")
}

pub fn task_at(stage: Stage) -> TaskRecord {
    let mut record = fresh_task();
    record.execution_stage = stage;
    record
}

/// Walk a record through a sequence of ordinary assignee transitions,
/// returning the final record.
pub fn drive(engine: &WorkflowEngine, record: TaskRecord, stages: &[Stage]) -> TaskRecord {
    stages.iter().fold(record, |record, stage| {
        engine
            .request_transition(&record, &assignee(), *stage, None)
            .unwrap_or_else(|deny| panic!("transition to {stage} denied: {deny}"))
            .record
    })
}

/// Isolated working environment for CLI subprocess tests: a temp
/// directory holding the config file, task store, and audit log.
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("milepost.yaml");

        let config_content = format!(
            "store_path: {}\naudit_log: {}\nactor:\n  id: u1\n  role: user\n",
            temp_dir.path().join("tasks.yaml").display(),
            temp_dir.path().join("audit.jsonl").display(),
        );
        std::fs::write(&config_path, config_content).expect("Failed to write config");

        Self {
            temp_dir,
            config_path,
        }
    }

    pub fn config_arg(&self) -> String {
        self.config_path.to_string_lossy().to_string()
    }
}
