//! The missing report domain record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a report is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// A missing person.
    Person,
    /// A missing animal.
    Animal,
}

impl ReportKind {
    /// Returns the canonical label, which is also the topic tag value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Animal => "animal",
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportKind {
    type Err = ParseReportKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "person" => Ok(Self::Person),
            "animal" => Ok(Self::Animal),
            _ => Err(ParseReportKindError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown report kind string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReportKindError(pub String);

impl std::fmt::Display for ParseReportKindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown report kind: {}", self.0)
    }
}

impl std::error::Error for ParseReportKindError {}

/// The user-supplied fields of a report.
///
/// This is both the publish intent handed to the directory and the payload
/// carried inside a report event. It never contains the report id, author
/// key or timestamp; those belong to the signed envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDetails {
    pub kind: ReportKind,
    pub name: String,
    pub description: String,
    /// Free-text description of when the subject was last seen.
    pub last_seen: String,
    /// Free-text location.
    pub location: String,
    pub contact_info: String,
    /// URL returned by the image upload service, if a photo was attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A published missing report.
///
/// Reports only come into existence from a signed event, either one fetched
/// from a relay or one just published. The envelope fields are private so
/// that the id, author key and timestamp can never be changed by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    id: String,
    #[serde(flatten)]
    details: ReportDetails,
    author_key: String,
    created_at: u64,
}

impl Report {
    /// Assembles a report from the envelope of a signed event and its
    /// decoded payload.
    pub fn from_envelope(
        id: impl Into<String>,
        author_key: impl Into<String>,
        created_at: u64,
        details: ReportDetails,
    ) -> Self {
        Self {
            id: id.into(),
            details,
            author_key: author_key.into(),
            created_at,
        }
    }

    /// Network-assigned content address of the report event.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Public key of the publisher.
    pub fn author_key(&self) -> &str {
        &self.author_key
    }

    /// Seconds since the Unix epoch, as assigned at signing time.
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Creation time as a UTC timestamp, if representable.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.created_at).ok()?;
        DateTime::from_timestamp(secs, 0)
    }

    pub fn details(&self) -> &ReportDetails {
        &self.details
    }

    pub fn kind(&self) -> ReportKind {
        self.details.kind
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn description(&self) -> &str {
        &self.details.description
    }

    pub fn last_seen(&self) -> &str {
        &self.details.last_seen
    }

    pub fn location(&self) -> &str {
        &self.details.location
    }

    pub fn contact_info(&self) -> &str {
        &self.details.contact_info
    }

    pub fn image_url(&self) -> Option<&str> {
        self.details.image_url.as_deref()
    }
}
