//! Relay filters and the report queries built on top of them.

use findthem_types::{Event, MISSING_REPORT_KIND};
use serde::Serialize;

/// A relay subscription filter.
///
/// Serializes to the network's filter object, omitting absent constraints.
/// An event matches when it satisfies every constraint that is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filter {
    /// Match any of these event ids.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,
    /// Match events by any of these authors.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    /// Match any of these event kinds.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub kinds: Vec<u16>,
    /// Maximum number of events the relay should return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: u16) -> Self {
        self.kinds.push(kind);
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.authors.push(author.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.ids.push(id.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns `true` if `event` satisfies every present constraint.
    ///
    /// The limit is not a match condition; relays apply it to the result set.
    pub fn matches(&self, event: &Event) -> bool {
        (self.ids.is_empty() || self.ids.contains(&event.id))
            && (self.authors.is_empty() || self.authors.contains(&event.pubkey))
            && (self.kinds.is_empty() || self.kinds.contains(&event.kind))
    }
}

/// The three ways the directory reads reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportQuery {
    /// The most recent reports, up to `limit`.
    All { limit: usize },
    /// Every report published by an author.
    ByAuthor(String),
    /// A single report by event id.
    ById(String),
}

impl ReportQuery {
    /// Builds the relay filter. Always restricted to the report event kind.
    pub fn to_filter(&self) -> Filter {
        let filter = Filter::new().kind(MISSING_REPORT_KIND);
        match self {
            Self::All { limit } => filter.limit(*limit),
            Self::ByAuthor(author) => filter.author(author.clone()),
            Self::ById(id) => filter.id(id.clone()),
        }
    }
}
