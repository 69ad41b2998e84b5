//! Mapping between missing reports and relay events.
//!
//! A report travels as an event whose `content` is a JSON object holding the
//! user-supplied fields and whose tags let relays index it by topic:
//!
//! ```text
//! kind:    30001
//! content: {"kind":"animal","name":"Rex","description":"...","lastSeen":"...",
//!           "location":"...","contactInfo":"...","imageUrl":"..."}
//! tags:    [["t","missing"], ["t","animal"]]
//! ```
//!
//! The id, author key and timestamp are never read from the content. They
//! belong to the signed envelope and are copied from it on [`decode`].
//!
//! Everything here is synchronous and performs no I/O.

mod error;

pub use error::{DecodeError, DecodeFailure, EncodeError};

use findthem_types::{
    Event, Report, ReportDetails, ReportKind, Tag, UnsignedEvent, CATEGORY_TOPIC,
    MISSING_REPORT_KIND, TOPIC_TAG,
};
use serde::{Deserialize, Serialize};

/// Content and tags derived from a publish intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedReport {
    pub content: String,
    pub tags: Vec<Tag>,
}

/// Outgoing content payload. Field order fixes the byte layout.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentOut<'a> {
    kind: &'a str,
    name: &'a str,
    description: &'a str,
    last_seen: &'a str,
    location: &'a str,
    contact_info: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<&'a str>,
}

/// Incoming content payload. Unknown fields written by other clients are
/// ignored; every listed field except `imageUrl` is required.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentIn {
    kind: String,
    name: String,
    description: String,
    last_seen: String,
    location: String,
    contact_info: String,
    #[serde(default)]
    image_url: Option<String>,
}

/// Returns the topic tags for a report of the given kind.
pub fn report_tags(kind: ReportKind) -> Vec<Tag> {
    vec![
        Tag::new([TOPIC_TAG, CATEGORY_TOPIC]),
        Tag::new([TOPIC_TAG, kind.as_str()]),
    ]
}

/// Serializes a publish intent into event content and derives its tags.
///
/// Identical intents always produce byte-identical content.
pub fn encode(details: &ReportDetails) -> Result<EncodedReport, EncodeError> {
    let payload = ContentOut {
        kind: details.kind.as_str(),
        name: &details.name,
        description: &details.description,
        last_seen: &details.last_seen,
        location: &details.location,
        contact_info: &details.contact_info,
        image_url: details.image_url.as_deref(),
    };

    Ok(EncodedReport {
        content: serde_json::to_string(&payload)?,
        tags: report_tags(details.kind),
    })
}

/// Encodes a publish intent into an unsigned report event.
pub fn to_unsigned_event(
    details: &ReportDetails,
    created_at: u64,
) -> Result<UnsignedEvent, EncodeError> {
    let EncodedReport { content, tags } = encode(details)?;
    Ok(UnsignedEvent {
        kind: MISSING_REPORT_KIND,
        content,
        tags,
        created_at,
    })
}

/// Decodes a report from a signed event.
///
/// Any mismatch between the content and the report schema yields a
/// [`DecodeError`]; no partially filled report is ever produced.
pub fn decode(event: &Event) -> Result<Report, DecodeError> {
    if event.kind != MISSING_REPORT_KIND {
        return Err(DecodeError::new(
            &event.id,
            DecodeFailure::WrongEventKind(event.kind),
        ));
    }

    let value: serde_json::Value = serde_json::from_str(&event.content)
        .map_err(|e| DecodeError::new(&event.id, DecodeFailure::InvalidJson(e)))?;
    if !value.is_object() {
        return Err(DecodeError::new(&event.id, DecodeFailure::NotAnObject));
    }

    let raw: ContentIn = serde_json::from_value(value)
        .map_err(|e| DecodeError::new(&event.id, DecodeFailure::SchemaMismatch(e)))?;
    let kind: ReportKind = raw
        .kind
        .parse()
        .map_err(|e| DecodeError::new(&event.id, DecodeFailure::UnknownReportKind(e)))?;

    let details = ReportDetails {
        kind,
        name: raw.name,
        description: raw.description,
        last_seen: raw.last_seen,
        location: raw.location,
        contact_info: raw.contact_info,
        image_url: raw.image_url,
    };

    Ok(Report::from_envelope(
        event.id.clone(),
        event.pubkey.clone(),
        event.created_at,
        details,
    ))
}
