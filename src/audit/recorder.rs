// ABOUTME: The audit sink boundary receiving transition events
// ABOUTME: Delivery is fire-and-forget; a sink failure never rolls back a transition

use async_trait::async_trait;
use std::sync::Mutex;

use super::error::Result;
use crate::workflow::TransitionEvent;

#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, event: &TransitionEvent) -> Result<()>;
}

/// In-memory sink for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    events: Mutex<Vec<TransitionEvent>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TransitionEvent> {
        self.events.lock().expect("audit sink lock poisoned").clone()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn record(&self, event: &TransitionEvent) -> Result<()> {
        self.events
            .lock()
            .expect("audit sink lock poisoned")
            .push(event.clone());
        Ok(())
    }
}
