//! Fan-out over several relays.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use findthem_types::Event;
use futures_util::future::{join_all, FutureExt};
use futures_util::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, warn};

use crate::capability::RelayClient;
use crate::deadline::CancelSignal;
use crate::error::RelayError;
use crate::filter::Filter;

/// How long a pool waits for any single relay before counting it as failed.
pub const DEFAULT_RELAY_TIMEOUT: Duration = Duration::from_secs(3);

/// A set of relays used as one client.
///
/// Every call goes to all relays concurrently with the same cancel signal,
/// and each relay gets at most the pool's relay timeout to answer. A relay
/// that runs out of time counts as failed, so one unresponsive relay cannot
/// hold up the others. A call succeeds if at least one relay succeeds;
/// individual failures are logged. When every relay fails, the error of the
/// first relay in pool order is returned.
#[derive(Clone)]
pub struct RelayPool {
    relays: Vec<Arc<dyn RelayClient>>,
    relay_timeout: Duration,
}

impl RelayPool {
    pub fn new(relays: Vec<Arc<dyn RelayClient>>) -> Self {
        Self {
            relays,
            relay_timeout: DEFAULT_RELAY_TIMEOUT,
        }
    }

    /// Sets how long each relay may take. Keep it below the deadlines the
    /// pool is used under, or a silent relay turns into a caller timeout.
    pub fn with_relay_timeout(mut self, relay_timeout: Duration) -> Self {
        self.relay_timeout = relay_timeout;
        self
    }

    pub fn relay_timeout(&self) -> Duration {
        self.relay_timeout
    }

    pub fn push(&mut self, relay: Arc<dyn RelayClient>) {
        self.relays.push(relay);
    }

    pub fn len(&self) -> usize {
        self.relays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relays.is_empty()
    }
}

impl Default for RelayPool {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl std::fmt::Debug for RelayPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayPool")
            .field("relays", &self.relays.len())
            .field("relay_timeout", &self.relay_timeout)
            .finish()
    }
}

/// Runs one relay call, turning silence past `limit` into `TimedOut`.
async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, RelayError>
where
    F: Future<Output = Result<T, RelayError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(outcome) => outcome,
        Err(_) => Err(RelayError::TimedOut),
    }
}

#[async_trait]
impl RelayClient for RelayPool {
    /// Results are merged in relay order; an event seen on several relays
    /// is kept at its first position.
    async fn query(
        &self,
        filters: &[Filter],
        cancel: CancelSignal,
    ) -> Result<Vec<Event>, RelayError> {
        if self.relays.is_empty() {
            return Err(RelayError::NoRelays);
        }

        let outcomes = join_all(
            self.relays
                .iter()
                .map(|relay| bounded(self.relay_timeout, relay.query(filters, cancel.clone()))),
        )
        .await;

        let mut seen = HashSet::new();
        let mut merged = Vec::new();
        let mut first_error = None;
        let mut succeeded = 0usize;

        for (index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(events) => {
                    succeeded += 1;
                    for event in events {
                        if seen.insert(event.id.clone()) {
                            merged.push(event);
                        }
                    }
                }
                Err(e) => {
                    warn!(relay = index, error = %e, "relay query failed");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) if succeeded == 0 => Err(e),
            _ => Ok(merged),
        }
    }

    /// Resolves as soon as one relay accepts. Relays that have answered by
    /// then are still counted; slower ones are dropped.
    async fn submit(&self, event: &Event, cancel: CancelSignal) -> Result<(), RelayError> {
        if self.relays.is_empty() {
            return Err(RelayError::NoRelays);
        }

        let mut pending: FuturesUnordered<_> = self
            .relays
            .iter()
            .enumerate()
            .map(|(index, relay)| {
                let call = bounded(self.relay_timeout, relay.submit(event, cancel.clone()));
                async move { (index, call.await) }
            })
            .collect();

        let mut failures: Vec<(usize, RelayError)> = Vec::new();
        let mut accepted = 0usize;

        while let Some((index, outcome)) = pending.next().await {
            match outcome {
                Ok(()) => {
                    accepted += 1;
                    break;
                }
                Err(e) => {
                    warn!(relay = index, event_id = %event.id, error = %e, "relay did not accept event");
                    failures.push((index, e));
                }
            }
        }

        if accepted == 0 {
            return failures
                .into_iter()
                .min_by_key(|(index, _)| *index)
                .map_or(Err(RelayError::NoRelays), |(_, e)| Err(e));
        }

        while let Some(Some((index, outcome))) = pending.next().now_or_never() {
            match outcome {
                Ok(()) => accepted += 1,
                Err(e) => {
                    warn!(relay = index, event_id = %event.id, error = %e, "relay did not accept event");
                }
            }
        }
        debug!(
            event_id = %event.id,
            accepted,
            abandoned = pending.len(),
            "event accepted by relay pool"
        );
        Ok(())
    }
}
