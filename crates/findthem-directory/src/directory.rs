//! The report directory façade.

use std::time::Duration;

use findthem_relay::{
    decode_reports, Deadline, PublishExecutor, QueryExecutor, RelayClient, ReportQuery, Signer,
};
use findthem_types::{Report, ReportDetails};
use tracing::{debug, info};

use crate::config::DirectoryConfig;
use crate::error::DirectoryError;

/// Lists, fetches and publishes missing reports.
///
/// The relay client is injected and shared with the rest of the
/// application; every operation builds its executor on the fly and keeps no
/// state between calls, so concurrent calls are independent. Callers never
/// see the wire event shape.
#[derive(Debug, Clone)]
pub struct ReportDirectory<C> {
    client: C,
    client_name: String,
    default_limit: usize,
    query_timeout: Duration,
    publish_timeout: Duration,
}

impl<C: RelayClient> ReportDirectory<C> {
    pub fn new(client: C) -> Self {
        Self::from_config(client, &DirectoryConfig::default())
    }

    pub fn from_config(client: C, config: &DirectoryConfig) -> Self {
        Self {
            client,
            client_name: config.client_name.clone(),
            default_limit: config.default_limit,
            query_timeout: config.query_timeout(),
            publish_timeout: config.publish_timeout(),
        }
    }

    /// Listing size to use when the caller has no preference.
    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// A fresh deadline for a read, using the configured timeout.
    pub fn query_deadline(&self) -> Deadline {
        Deadline::after(self.query_timeout)
    }

    /// A fresh deadline for a publish, using the configured timeout.
    pub fn publish_deadline(&self) -> Deadline {
        Deadline::after(self.publish_timeout)
    }

    /// Up to `limit` reports in relay order. An empty result means no
    /// decodable report matched; failures are always errors.
    pub async fn list_all(
        &self,
        limit: usize,
        deadline: Deadline,
    ) -> Result<Vec<Report>, DirectoryError> {
        let reports = QueryExecutor::new(&self.client)
            .fetch_reports(&ReportQuery::All { limit }, deadline)
            .await?;
        debug!(limit, count = reports.len(), "listed reports");
        Ok(reports)
    }

    /// Every report published by `author_key`, in relay order.
    pub async fn list_by_author(
        &self,
        author_key: &str,
        deadline: Deadline,
    ) -> Result<Vec<Report>, DirectoryError> {
        let reports = QueryExecutor::new(&self.client)
            .fetch_reports(&ReportQuery::ByAuthor(author_key.to_string()), deadline)
            .await?;
        debug!(author_key, count = reports.len(), "listed reports by author");
        Ok(reports)
    }

    /// The report with event id `id`.
    ///
    /// # Errors
    ///
    /// `NotFound` when the relays return no decodable event with that id.
    pub async fn get_by_id(&self, id: &str, deadline: Deadline) -> Result<Report, DirectoryError> {
        let events = QueryExecutor::new(&self.client)
            .fetch(&ReportQuery::ById(id.to_string()), deadline)
            .await?;

        decode_reports(events)
            .find(|report| report.id() == id)
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))
    }

    /// Publishes a new report and returns it with its network-assigned id,
    /// author key and timestamp.
    ///
    /// `signer` is the signed-in user's identity; without it the call fails
    /// with `Unauthenticated` before anything is sent.
    pub async fn submit(
        &self,
        intent: &ReportDetails,
        signer: Option<&dyn Signer>,
        deadline: Deadline,
    ) -> Result<Report, DirectoryError> {
        let event = PublishExecutor::new(&self.client)
            .with_client_name(self.client_name.as_str())
            .publish_report(intent, signer, deadline)
            .await?;

        info!(report_id = %event.id, kind = %intent.kind, "report submitted");
        Ok(Report::from_envelope(
            event.id,
            event.pubkey,
            event.created_at,
            intent.clone(),
        ))
    }
}
