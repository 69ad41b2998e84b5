//! Missing person and animal reports over a relay network.
//!
//! [`ReportDirectory`] is the entry point for the UI layer. It offers three
//! reads and one write, each bounded by an explicit [`Deadline`]:
//!
//! | Operation | Result |
//! |-----------|--------|
//! | `list_all(limit, deadline)` | reports in relay order |
//! | `list_by_author(author_key, deadline)` | reports by one publisher |
//! | `get_by_id(id, deadline)` | one report or `NotFound` |
//! | `submit(intent, signer, deadline)` | the published report with its id |
//!
//! Events that fail to decode are logged and left out of listings. Every
//! other failure reaches the caller as a [`DirectoryError`]: `Timeout`,
//! `Network` and `Publish` are retryable, `NotFound` means absence and
//! `Unauthenticated` means the user has to sign in first.
//!
//! # Usage
//!
//! ```rust,ignore
//! use findthem_directory::{config, telemetry, ReportDirectory};
//! use findthem_relay::MemoryRelay;
//!
//! let config = config::load_config(Some("findthem.toml"))?;
//! telemetry::init_tracing(&config.logging)?;
//!
//! let relay = MemoryRelay::new();
//! let directory = ReportDirectory::from_config(&relay, &config.directory);
//! let latest = directory
//!     .list_all(directory.default_limit(), directory.query_deadline())
//!     .await?;
//! ```

pub mod config;
mod directory;
mod error;
pub mod search;
pub mod telemetry;

pub use directory::ReportDirectory;
pub use error::DirectoryError;
pub use findthem_relay::{Deadline, RelayClient, Signer};
pub use findthem_types::{Report, ReportDetails, ReportKind};
