//! Wire entities owned by the relay network.
//!
//! Field names follow the network's event format so these types can be
//! handed to any relay client implementation unchanged.

use serde::{Deserialize, Serialize};

/// An ordered tag annotation, e.g. `["t", "missing"]`.
///
/// The first element is the tag key, the second (if any) its value. Further
/// elements are preserved but carry no meaning for reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(pub Vec<String>);

impl Tag {
    /// Builds a tag from its parts.
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    /// Returns the tag key.
    pub fn key(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Returns the tag value.
    pub fn value(&self) -> Option<&str> {
        self.0.get(1).map(String::as_str)
    }

    /// Returns `true` if this tag has the given key and value.
    pub fn is(&self, key: &str, value: &str) -> bool {
        self.key() == Some(key) && self.value() == Some(value)
    }
}

/// An event envelope that has not been signed yet.
///
/// This is what a signer receives; the signer fills in the author key, id
/// and signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedEvent {
    pub kind: u16,
    pub content: String,
    pub tags: Vec<Tag>,
    /// Seconds since the Unix epoch.
    pub created_at: u64,
}

impl UnsignedEvent {
    /// Returns `true` if any tag uses `key`.
    pub fn has_tag_key(&self, key: &str) -> bool {
        self.tags.iter().any(|tag| tag.key() == Some(key))
    }
}

/// A signed event as stored and served by relays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Content address of the event (hex), assigned at signing time.
    pub id: String,
    /// Public key of the author (hex).
    pub pubkey: String,
    /// Seconds since the Unix epoch.
    pub created_at: u64,
    pub kind: u16,
    pub tags: Vec<Tag>,
    pub content: String,
    pub sig: String,
}

impl Event {
    /// Returns `true` if the event carries the tag `[key, value]`.
    pub fn has_tag(&self, key: &str, value: &str) -> bool {
        self.tags.iter().any(|tag| tag.is(key, value))
    }

    /// Returns the value of the first tag with the given key.
    pub fn first_tag_value(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.key() == Some(key))
            .and_then(Tag::value)
    }

    /// Iterates over the values of every tag with the given key, in order.
    pub fn tag_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.tags
            .iter()
            .filter(move |tag| tag.key() == Some(key))
            .filter_map(Tag::value)
    }
}
