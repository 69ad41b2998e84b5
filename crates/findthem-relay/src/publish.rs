//! Building, signing and submitting events.
//!
//! Publishing runs in three strictly ordered steps: assemble the unsigned
//! envelope (adding the client tag), ask the signer for a signature, then
//! submit the signed event. Signing and submission share the caller's
//! deadline. Nothing is retried; a failed publish discards the signed event
//! and the caller may start over, which yields a new signature and id.

use chrono::Utc;
use findthem_codec::{encode, EncodeError, EncodedReport};
use findthem_types::{
    Event, ReportDetails, Tag, UnsignedEvent, CLIENT_TAG, DEFAULT_CLIENT_NAME,
    MISSING_REPORT_KIND,
};
use tracing::{debug, info, warn};

use crate::capability::{RelayClient, Signer};
use crate::deadline::{run_until, CancelSignal, Deadline, Elapsed};
use crate::error::{PublishError, SignerError};

/// What the caller wants to publish, before any protocol augmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTemplate {
    pub kind: u16,
    pub content: String,
    pub tags: Vec<Tag>,
    /// Defaults to the current time when `None`.
    pub created_at: Option<u64>,
}

impl EventTemplate {
    /// Encodes a report intent into a template.
    pub fn report(details: &ReportDetails) -> Result<Self, EncodeError> {
        let EncodedReport { content, tags } = encode(details)?;
        Ok(Self {
            kind: MISSING_REPORT_KIND,
            content,
            tags,
            created_at: None,
        })
    }
}

/// Appends `["client", client_name]` unless a client tag is already present.
pub fn ensure_client_tag(tags: &mut Vec<Tag>, client_name: &str) {
    if !tags.iter().any(|tag| tag.key() == Some(CLIENT_TAG)) {
        tags.push(Tag::new([CLIENT_TAG, client_name]));
    }
}

/// Current time in seconds since the Unix epoch.
pub fn unix_now() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}

/// Signs and submits events through a relay client.
#[derive(Debug, Clone)]
pub struct PublishExecutor<C> {
    client: C,
    client_name: String,
}

impl<C: RelayClient> PublishExecutor<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            client_name: DEFAULT_CLIENT_NAME.to_string(),
        }
    }

    /// Sets the value written into the client tag.
    pub fn with_client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = client_name.into();
        self
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    /// Assembles the unsigned envelope for a template.
    pub fn envelope(&self, template: EventTemplate) -> UnsignedEvent {
        let mut tags = template.tags;
        ensure_client_tag(&mut tags, &self.client_name);
        UnsignedEvent {
            kind: template.kind,
            content: template.content,
            tags,
            created_at: template.created_at.unwrap_or_else(unix_now),
        }
    }

    /// Publishes a template, returning the signed event the relay accepted.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` without a signer (checked before any I/O), `Sign`
    /// if signing fails, `Rejected` if the relay refuses the event and
    /// `Timeout` if the deadline passes first.
    pub async fn publish(
        &self,
        template: EventTemplate,
        signer: Option<&dyn Signer>,
        deadline: Deadline,
    ) -> Result<Event, PublishError> {
        let Some(signer) = signer else {
            debug!("publish attempted without a signer");
            return Err(PublishError::Unauthenticated);
        };
        let unsigned = self.envelope(template);
        debug!(
            kind = unsigned.kind,
            tags = unsigned.tags.len(),
            budget_ms = deadline.remaining().as_millis(),
            "publishing event"
        );

        match run_until(deadline, |cancel| self.sign_and_submit(signer, unsigned, cancel)).await {
            Ok(Ok(event)) => {
                info!(event_id = %event.id, kind = event.kind, "event published");
                Ok(event)
            }
            Ok(Err(e)) => {
                warn!(error = %e, "publish failed");
                Err(e)
            }
            Err(Elapsed) => {
                warn!("publish timed out; submission cancelled");
                Err(PublishError::Timeout)
            }
        }
    }

    /// Encodes and publishes a report intent.
    pub async fn publish_report(
        &self,
        details: &ReportDetails,
        signer: Option<&dyn Signer>,
        deadline: Deadline,
    ) -> Result<Event, PublishError> {
        if signer.is_none() {
            return Err(PublishError::Unauthenticated);
        }
        let template = EventTemplate::report(details)?;
        self.publish(template, signer, deadline).await
    }

    async fn sign_and_submit(
        &self,
        signer: &dyn Signer,
        unsigned: UnsignedEvent,
        cancel: CancelSignal,
    ) -> Result<Event, PublishError> {
        let signed = signer.sign_event(unsigned.clone()).await?;
        check_signed(&unsigned, &signed)?;
        self.client.submit(&signed, cancel).await?;
        Ok(signed)
    }
}

/// The signer may only add identity, id and signature to the envelope.
fn check_signed(unsigned: &UnsignedEvent, signed: &Event) -> Result<(), SignerError> {
    if signed.kind != unsigned.kind {
        return Err(SignerError::Mismatch("kind"));
    }
    if signed.content != unsigned.content {
        return Err(SignerError::Mismatch("content"));
    }
    if signed.tags != unsigned.tags {
        return Err(SignerError::Mismatch("tags"));
    }
    if signed.created_at != unsigned.created_at {
        return Err(SignerError::Mismatch("created_at"));
    }
    Ok(())
}
