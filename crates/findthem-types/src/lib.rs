//! Shared types and protocol constants for the FindThem report directory.
//!
//! Missing person and animal reports are published as signed events on a
//! relay network instead of being stored in a central database. This crate
//! holds the two sides of that mapping:
//!
//! - the domain record, [`Report`], and the caller's publish intent,
//!   [`ReportDetails`];
//! - the generic wire entities owned by the network, [`Event`],
//!   [`UnsignedEvent`] and [`Tag`].
//!
//! Every other crate in the workspace depends on this one for its
//! cross-cutting definitions and nothing else, which keeps the codec, the
//! relay executors and the directory façade free of circular dependencies.

mod event;
mod report;

pub use event::{Event, Tag, UnsignedEvent};
pub use report::{ParseReportKindError, Report, ReportDetails, ReportKind};

/// Event kind discriminator for missing reports.
///
/// Relays and other clients reading the same network rely on this exact
/// value, so it must never change.
pub const MISSING_REPORT_KIND: u16 = 30001;

/// Tag key used for topic (hashtag) indexing.
pub const TOPIC_TAG: &str = "t";

/// Topic value carried by every report event.
pub const CATEGORY_TOPIC: &str = "missing";

/// Tag key identifying the publishing client.
pub const CLIENT_TAG: &str = "client";

/// Client name written into the client tag when none is configured.
pub const DEFAULT_CLIENT_NAME: &str = "FindThem";
