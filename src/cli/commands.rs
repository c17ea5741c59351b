// ABOUTME: Command implementations for the milepost CLI
// ABOUTME: Adapts store, engine, audit sink, and projections to the terminal

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use super::config::Config;
use crate::audit::{AuditSink, JsonlAuditSink};
use crate::store::{FileTaskStore, StoreError, TaskStore};
use crate::timeline;
use crate::workflow::{
    graph, Actor, DenyReason, Stage, TaskRecord, TransitionOutcome, WorkflowEngine,
};

/// Create a new task record in the store.
pub async fn create_task(id: String, assignee: String, config: &Config) -> Result<()> {
    let store = FileTaskStore::new(&config.store_path);
    let record = TaskRecord::new(id, assignee);

    store
        .insert(&record)
        .await
        .with_context(|| format!("Failed to create task '{}'", record.id))?;

    info!("Created task {} assigned to {}", record.id, record.assigned_to);
    println!(
        "Created task '{}' assigned to '{}' at stage {}",
        record.id, record.assigned_to, record.execution_stage
    );
    Ok(())
}

/// Request a stage transition: load, run the engine, save with one retry
/// on a version conflict, then hand the event to the audit sink.
pub async fn set_stage(
    id: String,
    stage: String,
    actor: Option<String>,
    role: Option<String>,
    reason: Option<String>,
    config: &Config,
) -> Result<()> {
    let target: Stage = stage
        .parse()
        .map_err(|e| anyhow!("invalid stage: {}", e))?;
    let actor = config.resolve_actor(actor.as_deref(), role.as_deref())?;

    let store = FileTaskStore::new(&config.store_path);
    let sink = JsonlAuditSink::new(&config.audit_log);
    let engine = WorkflowEngine::new();

    let outcome =
        transition_with_retry(&store, &engine, &id, &actor, target, reason.as_deref()).await?;

    // Fire-and-forget: a sink failure is worth a warning, not a rollback.
    if let Err(e) = sink.record(&outcome.event).await {
        warn!("Failed to record audit event: {}", e);
    }

    info!(
        "Task {} moved {} -> {} by {}",
        outcome.event.task_id, outcome.event.from_stage, outcome.event.to_stage, actor.id
    );

    let projection = timeline::project(&outcome.record);
    println!(
        "Task '{}' is now at {} ({} transition, {:.0}% complete)",
        outcome.record.id, outcome.record.execution_stage, outcome.event.kind, projection.percent
    );
    if let Some(ref override_reason) = outcome.record.last_override_reason {
        println!("  Last override reason: {}", override_reason);
    }
    Ok(())
}

async fn transition_with_retry(
    store: &FileTaskStore,
    engine: &WorkflowEngine,
    task_id: &str,
    actor: &Actor,
    target: Stage,
    reason: Option<&str>,
) -> Result<TransitionOutcome> {
    let record = store.load(task_id).await?;
    let outcome = run_engine(engine, &record, actor, target, reason)?;

    match store.save(&outcome.record).await {
        Ok(stored) => Ok(TransitionOutcome {
            record: stored,
            event: outcome.event,
        }),
        Err(err) if err.is_version_conflict() => {
            // Someone else wrote between our load and save; retry once
            // against the fresh record.
            warn!("Version conflict on task {}, retrying once", task_id);
            let fresh = store.load(task_id).await?;
            let outcome = run_engine(engine, &fresh, actor, target, reason)?;
            let stored = store.save(&outcome.record).await?;
            Ok(TransitionOutcome {
                record: stored,
                event: outcome.event,
            })
        }
        Err(err) => Err(err.into()),
    }
}

fn run_engine(
    engine: &WorkflowEngine,
    record: &TaskRecord,
    actor: &Actor,
    target: Stage,
    reason: Option<&str>,
) -> Result<TransitionOutcome> {
    engine
        .request_transition(record, actor, target, reason)
        .map_err(|deny| anyhow!(deny_message(&deny)))
}

/// Map every denial to an actionable message. The match is exhaustive so a
/// new variant cannot slip through unhandled.
fn deny_message(deny: &DenyReason) -> String {
    match deny {
        DenyReason::Unauthorized { .. } => {
            format!("{} (only the assignee or a supervisor may act)", deny)
        }
        DenyReason::ReasonRequired { .. } => {
            format!("{} (pass --reason to justify the override)", deny)
        }
        DenyReason::InvalidTransition { .. } => deny.to_string(),
        DenyReason::NoOpTransition { .. } => deny.to_string(),
    }
}

#[derive(Serialize)]
struct TaskView<'a> {
    #[serde(flatten)]
    record: &'a TaskRecord,
    projection: timeline::TimelineProjection,
}

/// Show a task with its timeline projection and available moves.
pub async fn show_task(id: String, format: String, config: &Config) -> Result<()> {
    let store = FileTaskStore::new(&config.store_path);
    let record = store.load(&id).await?;
    let projection = timeline::project(&record);

    match format.as_str() {
        "json" => {
            let view = TaskView {
                record: &record,
                projection,
            };
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        "yaml" => {
            let view = TaskView {
                record: &record,
                projection,
            };
            println!("{}", serde_yaml::to_string(&view)?);
        }
        "text" => {
            println!("Task '{}' (assigned to '{}')", record.id, record.assigned_to);
            println!(
                "  Stage: {}  Status: {}  Progress: {:.0}%",
                record.execution_stage, record.status, projection.percent
            );
            if let Some(ref reason) = record.last_override_reason {
                println!("  Last override reason: {}", reason);
            }

            println!("  Timeline:");
            for milestone in timeline::milestones(&record) {
                match milestone.reached_at {
                    Some(at) => println!(
                        "    {:<12} {}",
                        milestone.stage.as_str(),
                        at.format("%Y-%m-%d %H:%M:%S")
                    ),
                    None => println!("    {:<12} -", milestone.stage.as_str()),
                }
            }

            let ordinary = graph::ordinary_targets(record.execution_stage);
            let overrides = graph::override_targets(record.execution_stage);
            if !ordinary.is_empty() {
                println!("  Assignee moves: {}", stage_list(&ordinary));
            }
            if !overrides.is_empty() {
                println!("  Supervisor overrides: {}", stage_list(&overrides));
            }
        }
        other => return Err(anyhow!("unsupported format '{}'", other)),
    }

    Ok(())
}

/// List all tasks with stage, status, and progress.
pub async fn list_tasks(format: String, config: &Config) -> Result<()> {
    let store = FileTaskStore::new(&config.store_path);
    let records = store.list().await?;

    match format.as_str() {
        "json" => {
            let views: Vec<TaskView<'_>> = records
                .iter()
                .map(|record| TaskView {
                    record,
                    projection: timeline::project(record),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
        "yaml" => {
            let views: Vec<TaskView<'_>> = records
                .iter()
                .map(|record| TaskView {
                    record,
                    projection: timeline::project(record),
                })
                .collect();
            println!("{}", serde_yaml::to_string(&views)?);
        }
        "text" => {
            if records.is_empty() {
                println!("No tasks in {}", config.store_path.display());
                return Ok(());
            }
            for record in &records {
                let projection = timeline::project(record);
                println!(
                    "{:<16} {:<12} {:<20} {:>4.0}%  {}",
                    record.id,
                    record.execution_stage.as_str(),
                    record.status.as_str(),
                    projection.percent,
                    record.assigned_to
                );
            }
        }
        other => return Err(anyhow!("unsupported format '{}'", other)),
    }

    Ok(())
}

/// Show the transition history of a task from the audit log.
pub async fn show_history(id: String, config: &Config) -> Result<()> {
    let sink = JsonlAuditSink::new(&config.audit_log);

    // Surface a missing task as such rather than an empty history.
    let store = FileTaskStore::new(&config.store_path);
    match store.load(&id).await {
        Ok(_) => {}
        Err(StoreError::NotFound { .. }) => return Err(anyhow!("Task not found: {}", id)),
        Err(e) => return Err(e.into()),
    }

    let events = sink.read_task(&id).await?;
    if events.is_empty() {
        println!("No recorded transitions for task '{}'", id);
        return Ok(());
    }

    for event in events {
        println!("{}", event);
    }
    Ok(())
}

fn stage_list(stages: &[Stage]) -> String {
    stages
        .iter()
        .map(Stage::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
