//! Error type for directory operations.

use findthem_codec::EncodeError;
use findthem_relay::{PublishError, QueryError, RelayError, SignerError};

/// Errors returned by [`crate::ReportDirectory`].
///
/// Undecodable events never show up here: they are dropped (and logged)
/// while a listing is assembled.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// No decodable report with this id was returned.
    #[error("report not found: {0}")]
    NotFound(String),

    /// The deadline passed and the request was cancelled.
    #[error("request timed out")]
    Timeout,

    /// A read query failed before the deadline.
    #[error("network error: {0}")]
    Network(RelayError),

    /// Submitting requires a signer; nothing was sent.
    #[error("sign in to publish a report")]
    Unauthenticated,

    /// The signer failed.
    #[error("signing failed: {0}")]
    Sign(SignerError),

    /// The relay did not accept the signed report.
    #[error("publish failed: {0}")]
    Publish(RelayError),

    /// The report could not be encoded.
    #[error(transparent)]
    Encode(EncodeError),
}

impl DirectoryError {
    /// Whether trying the same operation again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout | Self::Network(_) | Self::Publish(_))
    }
}

impl From<QueryError> for DirectoryError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Timeout => Self::Timeout,
            QueryError::Network(e) => Self::Network(e),
        }
    }
}

impl From<PublishError> for DirectoryError {
    fn from(err: PublishError) -> Self {
        match err {
            PublishError::Unauthenticated => Self::Unauthenticated,
            PublishError::Encode(e) => Self::Encode(e),
            PublishError::Sign(e) => Self::Sign(e),
            PublishError::Timeout => Self::Timeout,
            PublishError::Rejected(e) => Self::Publish(e),
        }
    }
}
