//! Nrdscan Library
//!
//! A Rust library for scanning newly registered domain (NRD) feeds for
//! lookalikes of domains you care about. This library provides functionality
//! to:
//!
//! - Download and unpack the daily whoisds.com NRD archive
//! - Match candidate domains against a reference watch list (direct substring
//!   and Ratcliff/Obershelp fuzzy matching)
//! - Render results as a console table, JSON, YAML, or an appendable CSV log
//!
//! # Example
//!
//! ```rust
//! use nrdscan::matcher::{match_domains, MatchKind};
//!
//! let references = ["paypal.com"];
//! let candidates = ["paypal-login.xyz", "paypa1.com", "unrelated.org"];
//!
//! let matches = match_domains(&references, &candidates, 75);
//! assert_eq!(matches.len(), 2);
//! assert_eq!(matches[0].kind, MatchKind::Direct);
//! assert_eq!(matches[1].kind, MatchKind::Fuzzy);
//! ```

// Re-export all modules for library use
pub mod app;
pub mod cli;
pub mod config;
pub mod errors;
pub mod feed;
pub mod lists;
pub mod matcher;
pub mod report;
pub mod similarity;
pub mod workdir;

// Re-export commonly used types and functions for convenience
pub use cli::Cli;
pub use config::Config;
pub use errors::{NrdscanError, Result};
pub use matcher::{match_domains, DomainMatch, MatchKind};
pub use report::{OutputFormat, ScanMetadata, ScanResults};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
