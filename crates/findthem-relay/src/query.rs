//! Bounded report queries with per-record decode isolation.

use findthem_codec::decode;
use findthem_types::{Event, Report};
use tracing::{debug, warn};

use crate::capability::RelayClient;
use crate::deadline::{run_until, Deadline, Elapsed};
use crate::error::QueryError;
use crate::filter::ReportQuery;

/// Runs report queries against a relay client under a deadline.
///
/// The executor never retries; a failed or timed-out query is reported to
/// the caller, who owns the retry policy. Results keep the order the relay
/// returned them in.
#[derive(Debug, Clone)]
pub struct QueryExecutor<C> {
    client: C,
}

impl<C: RelayClient> QueryExecutor<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Fetches the raw events for a query.
    ///
    /// # Errors
    ///
    /// `QueryError::Timeout` if the deadline passes (the request is
    /// cancelled), `QueryError::Network` if the relay fails first.
    pub async fn fetch(
        &self,
        query: &ReportQuery,
        deadline: Deadline,
    ) -> Result<Vec<Event>, QueryError> {
        let filters = [query.to_filter()];
        debug!(?query, budget_ms = deadline.remaining().as_millis(), "querying relays for reports");

        match run_until(deadline, |cancel| self.client.query(&filters, cancel)).await {
            Ok(Ok(events)) => {
                debug!(?query, count = events.len(), "relay query returned");
                Ok(events)
            }
            Ok(Err(e)) => {
                warn!(?query, error = %e, "relay query failed");
                Err(QueryError::Network(e))
            }
            Err(Elapsed) => {
                warn!(?query, "relay query timed out; request cancelled");
                Err(QueryError::Timeout)
            }
        }
    }

    /// Fetches and decodes reports. Undecodable events are dropped.
    pub async fn fetch_reports(
        &self,
        query: &ReportQuery,
        deadline: Deadline,
    ) -> Result<Vec<Report>, QueryError> {
        let events = self.fetch(query, deadline).await?;
        Ok(decode_reports(events).collect())
    }
}

/// Lazily decodes each event on its own.
///
/// An event that fails to decode is logged and skipped; it never aborts the
/// rest of the batch.
pub fn decode_reports<I>(events: I) -> impl Iterator<Item = Report>
where
    I: IntoIterator<Item = Event>,
{
    events
        .into_iter()
        .filter_map(|event| match decode(&event) {
            Ok(report) => Some(report),
            Err(e) => {
                warn!(event_id = %e.event_id, error = %e.failure, "dropping undecodable report event");
                None
            }
        })
}
