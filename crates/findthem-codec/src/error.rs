//! Error types for the report codec.

use findthem_types::ParseReportKindError;

/// Errors that can occur while turning a publish intent into event content.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// JSON serialization of the payload failed.
    #[error("report encoding failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A report event that could not be turned into a [`findthem_types::Report`].
///
/// Carries the offending event id so that dropped records can be traced.
#[derive(Debug, thiserror::Error)]
#[error("cannot decode report event {event_id}: {failure}")]
pub struct DecodeError {
    pub event_id: String,
    #[source]
    pub failure: DecodeFailure,
}

impl DecodeError {
    pub(crate) fn new(event_id: &str, failure: impl Into<DecodeFailure>) -> Self {
        Self {
            event_id: event_id.to_string(),
            failure: failure.into(),
        }
    }
}

/// The reason a report event failed to decode.
#[derive(Debug, thiserror::Error)]
pub enum DecodeFailure {
    /// The event is not a report event at all.
    #[error("unexpected event kind {0}")]
    WrongEventKind(u16),

    /// The content is not valid JSON.
    #[error("content is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The content is JSON but not an object.
    #[error("content is not a JSON object")]
    NotAnObject,

    /// A required field is missing or has the wrong type.
    #[error("content does not match the report schema: {0}")]
    SchemaMismatch(#[source] serde_json::Error),

    /// The `kind` field holds something other than `person` or `animal`.
    #[error(transparent)]
    UnknownReportKind(#[from] ParseReportKindError),
}
