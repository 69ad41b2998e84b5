#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use findthem_codec::to_unsigned_event;
use findthem_relay::{CancelSignal, Filter, RelayClient, RelayError, Signer, SignerError};
use findthem_types::{Event, ReportDetails, ReportKind, UnsignedEvent};
use sha2::{Digest, Sha256};

pub fn details(kind: ReportKind, name: &str) -> ReportDetails {
    ReportDetails {
        kind,
        name: name.to_string(),
        description: format!("{name} was last seen wearing a red jacket"),
        last_seen: "Saturday afternoon".to_string(),
        location: "Riverside Park".to_string(),
        contact_info: "call 555-0199".to_string(),
        image_url: None,
    }
}

pub fn signed(pubkey: &str, unsigned: UnsignedEvent) -> Event {
    let canonical = serde_json::json!([
        0,
        pubkey,
        unsigned.created_at,
        unsigned.kind,
        unsigned.tags,
        unsigned.content
    ]);
    Event {
        id: hex::encode(Sha256::digest(canonical.to_string().as_bytes())),
        pubkey: pubkey.to_string(),
        created_at: unsigned.created_at,
        kind: unsigned.kind,
        tags: unsigned.tags,
        content: unsigned.content,
        sig: "a".repeat(128),
    }
}

pub fn report_event(details: &ReportDetails, pubkey: &str, created_at: u64) -> Event {
    signed(pubkey, to_unsigned_event(details, created_at).unwrap())
}

/// A kind 30001 event whose content is not a report.
pub fn garbage_event(id: &str, content: &str) -> Event {
    Event {
        id: id.to_string(),
        pubkey: "pk-garbage".to_string(),
        created_at: 1,
        kind: findthem_types::MISSING_REPORT_KIND,
        tags: vec![],
        content: content.to_string(),
        sig: "0".repeat(128),
    }
}

/// Replays canned events and records what it was asked.
#[derive(Default)]
pub struct RecordingRelay {
    events: Vec<Event>,
    failure: Option<RelayError>,
    filters: Mutex<Vec<Vec<Filter>>>,
    submitted: Mutex<Vec<Event>>,
    calls: AtomicUsize,
}

impl RecordingRelay {
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

    pub fn filters(&self) -> Vec<Vec<Filter>> {
        self.filters.lock().unwrap().clone()
    }

    pub fn submitted(&self) -> Vec<Event> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RelayClient for RecordingRelay {
    async fn query(
        &self,
        filters: &[Filter],
        _cancel: CancelSignal,
    ) -> Result<Vec<Event>, RelayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.filters.lock().unwrap().push(filters.to_vec());
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

/// Never responds. Schedules a write 60s out that only cancellation stops.
#[derive(Default)]
pub struct StalledRelay {
    cancelled: Arc<AtomicBool>,
    late_writes: Arc<AtomicUsize>,
}

impl StalledRelay {
    pub fn was_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn late_writes(&self) -> usize {
        self.late_writes.load(Ordering::SeqCst)
    }

    async fn stall(&self, cancel: CancelSignal) {
        let cancelled = self.cancelled.clone();
        let late = self.late_writes.clone();
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
impl RelayClient for StalledRelay {
    async fn query(
        &self,
        _filters: &[Filter],
        cancel: CancelSignal,
    ) -> Result<Vec<Event>, RelayError> {
        self.stall(cancel).await;
        Ok(vec![])
    }

    async fn submit(&self, _event: &Event, cancel: CancelSignal) -> Result<(), RelayError> {
        self.stall(cancel).await;
        Ok(())
    }
}

/// Signs with a fixed public key and counts signatures.
pub struct KeySigner {
    pubkey: String,
    failure: Option<SignerError>,
    count: AtomicUsize,
}

impl KeySigner {
    pub fn new(pubkey: &str) -> Self {
        Self {
            pubkey: pubkey.to_string(),
            failure: None,
            count: AtomicUsize::new(0),
        }
    }

    pub fn refusing(reason: &str) -> Self {
        Self {
            failure: Some(SignerError::Rejected(reason.to_string())),
            ..Self::new("pk-refusing")
        }
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Signer for KeySigner {
    async fn sign_event(&self, unsigned: UnsignedEvent) -> Result<Event, SignerError> {
        if let Some(e) = &self.failure {
            return Err(e.clone());
        }
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(signed(&self.pubkey, unsigned))
    }
}
