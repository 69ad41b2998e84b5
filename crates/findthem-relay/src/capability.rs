//! Capabilities injected into the executors.
//!
//! Both the network client and the signer are owned by the embedding
//! application. The executors only borrow them for the duration of a single
//! call, which is why the traits are also implemented for references and
//! `Arc`s.

use std::sync::Arc;

use async_trait::async_trait;
use findthem_types::{Event, UnsignedEvent};

use crate::deadline::CancelSignal;
use crate::error::{RelayError, SignerError};
use crate::filter::Filter;

/// A connection to one or more relays.
///
/// Implementations must be safe for concurrent use: a list query and a
/// detail query may be in flight at the same time. Each call receives a
/// [`CancelSignal`] that fires when the caller's deadline passes; work the
/// implementation started in the background must stop when it does.
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Fetches events matching any of the filters, in relay order.
    async fn query(&self, filters: &[Filter], cancel: CancelSignal)
        -> Result<Vec<Event>, RelayError>;

    /// Submits a signed event, resolving once a relay has accepted it.
    async fn submit(&self, event: &Event, cancel: CancelSignal) -> Result<(), RelayError>;
}

/// Turns an unsigned envelope into a signed event.
///
/// Key handling and the signature scheme live entirely behind this trait.
#[async_trait]
pub trait Signer: Send + Sync {
    async fn sign_event(&self, unsigned: UnsignedEvent) -> Result<Event, SignerError>;
}

#[async_trait]
impl<T: RelayClient + ?Sized> RelayClient for &T {
    async fn query(
        &self,
        filters: &[Filter],
        cancel: CancelSignal,
    ) -> Result<Vec<Event>, RelayError> {
        (**self).query(filters, cancel).await
    }

    async fn submit(&self, event: &Event, cancel: CancelSignal) -> Result<(), RelayError> {
        (**self).submit(event, cancel).await
    }
}

#[async_trait]
impl<T: RelayClient + ?Sized> RelayClient for Arc<T> {
    async fn query(
        &self,
        filters: &[Filter],
        cancel: CancelSignal,
    ) -> Result<Vec<Event>, RelayError> {
        (**self).query(filters, cancel).await
    }

    async fn submit(&self, event: &Event, cancel: CancelSignal) -> Result<(), RelayError> {
        (**self).submit(event, cancel).await
    }
}
