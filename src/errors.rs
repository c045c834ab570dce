//! Unified error handling.
//!
//! A `thiserror`-based model with:
//!   * Typed variants for the pipeline's failure domains
//!   * A categorization layer (`ErrorCategory`) for structured reporting
//!   * Helper constructors
//!   * `From` conversions for common lower-level errors
//!
//! Categories are intentionally coarse:
//!   - Input: user / data validation issues (bad date, bad threshold,
//!     working directory collisions)
//!   - Network: feed download problems
//!   - Parse: archive decoding issues
//!   - Internal: I/O faults and unexpected states
//!
//! Every failure here is fatal to the run: the pipeline stops at the first
//! error and reports it. There is no retry layer and no partial-resume state
//! to clean up.

use std::io;

use thiserror::Error;

/// High-level classification for structured reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Parse,
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorCategory::Input => "input",
            ErrorCategory::Network => "network",
            ErrorCategory::Parse => "parse",
            ErrorCategory::Internal => "internal",
        };
        f.write_str(s)
    }
}

/// Primary application error type.
#[derive(Error, Debug)]
pub enum NrdscanError {
    // ------------------------ Input / Validation ----------------------------
    #[error("Invalid feed date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Invalid fuzz ratio {value}: must be between 0 and 100")]
    InvalidThreshold { value: u32 },

    #[error("Directory {path} already exists. Aborting.")]
    WorkdirExists { path: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // ---------------------------- Parsing -----------------------------------
    #[error("Failed to extract feed archive {path}: {reason}")]
    ArchiveExtraction { path: String, reason: String },

    #[error("Feed archive {archive} does not contain {member}")]
    FeedListMissing { archive: String, member: String },

    // ----------------------------- Network ----------------------------------
    #[error("Download failed for '{url}': {source}")]
    Download {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Feed server returned HTTP {status} for '{url}'")]
    FeedStatus { url: String, status: u16 },

    // ----------------------------- I/O / FS ---------------------------------
    #[error("I/O error during {operation} on {path}: {source}")]
    Io {
        path: String,
        operation: String,
        #[source]
        source: io::Error,
    },

    // ---------------------------- Internal ----------------------------------
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl NrdscanError {
    /// Categorize the error for structured output.
    pub fn category(&self) -> ErrorCategory {
        use NrdscanError::*;
        match self {
            InvalidDate { .. }
            | InvalidThreshold { .. }
            | WorkdirExists { .. }
            | Configuration { .. } => ErrorCategory::Input,

            ArchiveExtraction { .. } | FeedListMissing { .. } => ErrorCategory::Parse,

            Download { .. } | FeedStatus { .. } => ErrorCategory::Network,

            Io { .. } | Internal { .. } => ErrorCategory::Internal,
        }
    }

    // ---------------------------- Constructors -----------------------------

    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }

    pub fn invalid_threshold(value: u32) -> Self {
        Self::InvalidThreshold { value }
    }

    pub fn workdir_exists(path: impl Into<String>) -> Self {
        Self::WorkdirExists { path: path.into() }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn archive_extraction(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ArchiveExtraction {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn feed_list_missing(archive: impl Into<String>, member: impl Into<String>) -> Self {
        Self::FeedListMissing {
            archive: archive.into(),
            member: member.into(),
        }
    }

    pub fn download(
        url: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Download {
            url: url.into(),
            source: source.into(),
        }
    }

    pub fn feed_status(url: impl Into<String>, status: u16) -> Self {
        Self::FeedStatus {
            url: url.into(),
            status,
        }
    }

    pub fn io(path: impl Into<String>, operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }
}

/// Public result alias.
pub type Result<T> = std::result::Result<T, NrdscanError>;

/// Map standard IO errors into `Io` variant (generic context).
impl From<io::Error> for NrdscanError {
    fn from(e: io::Error) -> Self {
        NrdscanError::Io {
            path: "<unknown>".into(),
            operation: "unspecified".into(),
            source: e,
        }
    }
}

/// Transport-level failures carry their request URL when reqwest still has it.
impl From<reqwest::Error> for NrdscanError {
    fn from(e: reqwest::Error) -> Self {
        let url = e
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".into());
        NrdscanError::Download {
            url,
            source: Box::new(e),
        }
    }
}

/// Extension trait for enriching IO results with path + operation context.
pub trait IoResultExt<T> {
    fn with_path(self, path: impl Into<String>, operation: impl Into<String>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, io::Error> {
    fn with_path(self, path: impl Into<String>, operation: impl Into<String>) -> Result<T> {
        self.map_err(|e| NrdscanError::io(path.into(), operation.into(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_mapping() {
        assert_eq!(
            NrdscanError::invalid_date("yesterday").category(),
            ErrorCategory::Input
        );
        assert_eq!(
            NrdscanError::feed_status("https://example.test/nrd", 404).category(),
            ErrorCategory::Network
        );
        assert_eq!(
            NrdscanError::archive_extraction("feed.zip", "bad magic").category(),
            ErrorCategory::Parse
        );
        assert_eq!(
            NrdscanError::io("f", "read", io::Error::new(io::ErrorKind::Other, "x")).category(),
            ErrorCategory::Internal
        );
    }

    #[test]
    fn display_snippets() {
        let e = NrdscanError::workdir_exists("/tmp/2024-01-02");
        let s = e.to_string();
        assert!(s.contains("/tmp/2024-01-02"));
        assert!(s.contains("already exists"));

        let t = NrdscanError::invalid_threshold(250);
        assert!(t.to_string().contains("250"));

        let m = NrdscanError::feed_list_missing("feed.zip", "domain-names.txt");
        assert!(m.to_string().contains("domain-names.txt"));
    }

    #[test]
    fn io_context() {
        let res: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let mapped = res.with_path("/tmp/file", "read");
        match mapped.err().unwrap() {
            NrdscanError::Io {
                path, operation, ..
            } => {
                assert_eq!(path, "/tmp/file");
                assert_eq!(operation, "read");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
