//! Fakes shared by the unit tests in this crate.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use findthem_codec::to_unsigned_event;
use findthem_types::{Event, ReportDetails, ReportKind, UnsignedEvent};
use sha2::{Digest, Sha256};

use crate::{CancelSignal, Filter, RelayClient, RelayError, Signer, SignerError};

pub fn make_details(kind: ReportKind, name: &str) -> ReportDetails {
    ReportDetails {
        kind,
        name: name.to_string(),
        description: format!("{name} went missing near the old mill"),
        last_seen: "Yesterday at dusk".to_string(),
        location: "Old Mill Road".to_string(),
        contact_info: "555-0100".to_string(),
        image_url: None,
    }
}

/// Event id as the network computes it: SHA-256 over the canonical array.
pub fn event_id(pubkey: &str, unsigned: &UnsignedEvent) -> String {
    let canonical = serde_json::json!([
        0,
        pubkey,
        unsigned.created_at,
        unsigned.kind,
        unsigned.tags,
        unsigned.content
    ]);
    hex::encode(Sha256::digest(canonical.to_string().as_bytes()))
}

pub fn sign(pubkey: &str, unsigned: UnsignedEvent) -> Event {
    Event {
        id: event_id(pubkey, &unsigned),
        pubkey: pubkey.to_string(),
        created_at: unsigned.created_at,
        kind: unsigned.kind,
        tags: unsigned.tags,
        content: unsigned.content,
        sig: "f".repeat(128),
    }
}

pub fn event_for(details: &ReportDetails, pubkey: &str, created_at: u64) -> Event {
    sign(pubkey, to_unsigned_event(details, created_at).unwrap())
}

/// Returns canned events (or a canned failure) and records every call.
#[derive(Debug, Default)]
pub struct ScriptedRelay {
    events: Vec<Event>,
    failure: Option<RelayError>,
    seen_filters: Mutex<Vec<Vec<Filter>>>,
    submitted: Mutex<Vec<Event>>,
    calls: AtomicUsize,
}

impl ScriptedRelay {
    pub fn returning(events: Vec<Event>) -> Self {
        Self {
            events,
            ..Self::default()
        }
    }

    pub fn failing(error: RelayError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn seen_filters(&self) -> Vec<Vec<Filter>> {
        self.seen_filters.lock().unwrap().clone()
    }

    pub fn submitted(&self) -> Vec<Event> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RelayClient for ScriptedRelay {
    async fn query(
        &self,
        filters: &[Filter],
        _cancel: CancelSignal,
    ) -> Result<Vec<Event>, RelayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_filters.lock().unwrap().push(filters.to_vec());
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(self.events.clone()),
        }
    }

    async fn submit(&self, event: &Event, _cancel: CancelSignal) -> Result<(), RelayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = &self.failure {
            return Err(e.clone());
        }
        self.submitted.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// Never answers. Starts background work that would land 60s later unless
/// the call is cancelled.
#[derive(Debug, Default)]
pub struct HangingRelay {
    cancelled: Arc<AtomicBool>,
    dropped: Arc<AtomicBool>,
    late: Arc<AtomicUsize>,
}

impl HangingRelay {
    pub fn was_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn future_dropped(&self) -> bool {
        self.dropped.load(Ordering::SeqCst)
    }

    pub fn late_side_effects(&self) -> usize {
        self.late.load(Ordering::SeqCst)
    }

    async fn hang(&self, cancel: CancelSignal) {
        let _flag = DropFlag(self.dropped.clone());
        let cancelled = self.cancelled.clone();
        let late = self.late.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => cancelled.store(true, Ordering::SeqCst),
                () = tokio::time::sleep(Duration::from_secs(60)) => {
                    late.fetch_add(1, Ordering::SeqCst);
                }
            }
        });
        std::future::pending::<()>().await;
    }
}

#[async_trait]
impl RelayClient for HangingRelay {
    async fn query(
        &self,
        _filters: &[Filter],
        cancel: CancelSignal,
    ) -> Result<Vec<Event>, RelayError> {
        self.hang(cancel).await;
        Ok(vec![])
    }

    async fn submit(&self, _event: &Event, cancel: CancelSignal) -> Result<(), RelayError> {
        self.hang(cancel).await;
        Ok(())
    }
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Signs with a fixed key.
#[derive(Debug)]
pub struct StaticSigner {
    pubkey: String,
    failure: Option<SignerError>,
    tamper: bool,
    signed: AtomicUsize,
}

impl StaticSigner {
    pub fn new(pubkey: &str) -> Self {
        Self {
            pubkey: pubkey.to_string(),
            failure: None,
            tamper: false,
            signed: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: SignerError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new("pk")
        }
    }

    /// Alters the content before signing.
    pub fn tampering(mut self) -> Self {
        self.tamper = true;
        self
    }

    pub fn signed_count(&self) -> usize {
        self.signed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Signer for StaticSigner {
    async fn sign_event(&self, mut unsigned: UnsignedEvent) -> Result<Event, SignerError> {
        if let Some(e) = &self.failure {
            return Err(e.clone());
        }
        if self.tamper {
            unsigned.content.push(' ');
        }
        self.signed.fetch_add(1, Ordering::SeqCst);
        Ok(sign(&self.pubkey, unsigned))
    }
}
