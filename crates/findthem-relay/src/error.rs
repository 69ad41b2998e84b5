//! Error types for relay queries and publishing.

use findthem_codec::EncodeError;

/// Failures reported by a [`crate::RelayClient`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    /// The relay could not be reached or the connection failed mid-request.
    #[error("relay transport error: {0}")]
    Transport(String),

    /// The relay answered but refused the request.
    #[error("relay rejected request: {0}")]
    Rejected(String),

    /// The call's cancellation signal fired before the relay answered.
    #[error("relay request cancelled")]
    Cancelled,

    /// A relay inside a pool did not answer within the pool's relay timeout.
    #[error("relay did not answer in time")]
    TimedOut,

    /// A pool was asked to do work without any relays configured.
    #[error("no relays configured")]
    NoRelays,
}

/// Failures reported by a [`crate::Signer`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignerError {
    /// The signer (or the user behind it) declined to sign.
    #[error("signing rejected: {0}")]
    Rejected(String),

    /// The signer is unreachable or failed internally.
    #[error("signer unavailable: {0}")]
    Unavailable(String),

    /// The signer returned an event that differs from the envelope it was given.
    #[error("signed event does not match the unsigned envelope ({0} differs)")]
    Mismatch(&'static str),
}

/// Errors from a bounded relay query.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The deadline passed; the in-flight request was cancelled.
    #[error("relay query timed out")]
    Timeout,

    /// The relay failed before the deadline.
    #[error("relay query failed: {0}")]
    Network(#[from] RelayError),
}

/// Errors from building, signing and submitting an event.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// No signer was supplied; nothing was sent.
    #[error("publishing requires a signed-in user")]
    Unauthenticated,

    /// The publish intent could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The signer failed or returned an altered event.
    #[error("signing failed: {0}")]
    Sign(#[from] SignerError),

    /// The deadline passed; signing or submission was cancelled.
    #[error("publish timed out")]
    Timeout,

    /// The relay did not accept the signed event.
    #[error("relay did not accept event: {0}")]
    Rejected(#[from] RelayError),
}
