//! A process-local relay.
//!
//! Useful for running the directory without a network (local development,
//! demos, integration tests). Nothing is persisted.

use std::collections::HashSet;

use async_trait::async_trait;
use findthem_types::Event;
use tokio::sync::RwLock;
use tracing::debug;

use crate::capability::RelayClient;
use crate::deadline::CancelSignal;
use crate::error::RelayError;
use crate::filter::Filter;

/// Stores events in memory and answers filters the way a relay does.
#[derive(Debug, Default)]
pub struct MemoryRelay {
    events: RwLock<Vec<Event>>,
}

impl MemoryRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a relay preloaded with events.
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: RwLock::new(events),
        }
    }

    /// Snapshot of every stored event in insertion order.
    pub async fn events(&self) -> Vec<Event> {
        self.events.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[async_trait]
impl RelayClient for MemoryRelay {
    /// Newest first (ties broken by id), each filter's limit applied to its
    /// own matches, events matched by several filters returned once.
    async fn query(
        &self,
        filters: &[Filter],
        cancel: CancelSignal,
    ) -> Result<Vec<Event>, RelayError> {
        if cancel.is_cancelled() {
            return Err(RelayError::Cancelled);
        }

        let stored = self.events.read().await;
        let mut seen = HashSet::new();
        let mut results = Vec::new();

        for filter in filters {
            let mut matching: Vec<&Event> = stored.iter().filter(|e| filter.matches(e)).collect();
            matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
            let limit = filter.limit.unwrap_or(usize::MAX);

            for event in matching.into_iter().take(limit) {
                if seen.insert(event.id.as_str()) {
                    results.push(event.clone());
                }
            }
        }

        debug!(count = results.len(), "memory relay query");
        Ok(results)
    }

    /// Accepting an event twice is a no-op.
    async fn submit(&self, event: &Event, cancel: CancelSignal) -> Result<(), RelayError> {
        if cancel.is_cancelled() {
            return Err(RelayError::Cancelled);
        }

        let mut stored = self.events.write().await;
        if stored.iter().any(|e| e.id == event.id) {
            debug!(event_id = %event.id, "duplicate event ignored");
            return Ok(());
        }
        stored.push(event.clone());
        Ok(())
    }
}
