//! Bounded, cancellable relay access for missing reports.
//!
//! Reads and writes go through two executors that wrap an injected
//! [`RelayClient`]:
//!
//! - [`QueryExecutor`] turns a [`ReportQuery`] into a relay filter, runs it
//!   under a [`Deadline`] and decodes each returned event on its own, so
//!   one malformed record never fails a listing.
//! - [`PublishExecutor`] assembles an unsigned envelope, adds the client
//!   tag if missing, has an injected [`Signer`] sign it and submits the
//!   result under the same deadline.
//!
//! When a deadline passes, the in-flight future is dropped and the call's
//! [`CancelSignal`] fires. The caller sees a `Timeout`, distinct from relay
//! and decode failures. Neither executor retries.
//!
//! [`MemoryRelay`] and [`RelayPool`] are ready-made clients: a
//! process-local relay and a fan-out over several relays.
//!
//! # Usage
//!
//! ```rust,ignore
//! use findthem_relay::{Deadline, QueryExecutor, ReportQuery};
//! use std::time::Duration;
//!
//! let executor = QueryExecutor::new(&relay);
//! let reports = executor
//!     .fetch_reports(&ReportQuery::All { limit: 20 }, Deadline::after(Duration::from_secs(5)))
//!     .await?;
//! ```

mod capability;
mod deadline;
mod error;
mod filter;
mod memory;
mod pool;
mod publish;
mod query;

#[cfg(test)]
mod testing;

pub use capability::{RelayClient, Signer};
pub use deadline::{CancelSignal, Deadline};
pub use error::{PublishError, QueryError, RelayError, SignerError};
pub use filter::{Filter, ReportQuery};
pub use memory::MemoryRelay;
pub use pool::{RelayPool, DEFAULT_RELAY_TIMEOUT};
pub use publish::{ensure_client_tag, unix_now, EventTemplate, PublishExecutor};
pub use query::{decode_reports, QueryExecutor};
