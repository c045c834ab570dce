//! Output formatting for scan results.
//!
//! Provides the fixed-width console table, machine-parsable JSON and YAML
//! documents, and the appending CSV sink the daily cron workflow relies on.
//! Formatters render to strings; writing them anywhere is the caller's
//! business, except for [`append_csv`] which owns the header-once contract.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::errors::{IoResultExt, Result};
use crate::matcher::DomainMatch;

/// Final results of one feed scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResults {
    /// Feed day that was scanned, YYYY-MM-DD
    pub feed_date: String,

    /// Match records in reference-major order
    pub matches: Vec<DomainMatch>,

    /// Metadata about the scan run
    pub metadata: ScanMetadata,
}

/// Metadata about the scan run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanMetadata {
    /// How long the whole run took
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,

    /// Number of reference domains loaded
    pub reference_count: usize,

    /// Number of candidate domains in the feed
    pub candidate_count: usize,

    /// Fuzzy threshold in effect (0 = fuzzy disabled)
    pub fuzz_ratio: u32,

    /// Records dropped by exclusion patterns or the results cap
    pub excluded: usize,

    /// URL the feed archive came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,

    /// When the report was assembled (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,

    /// Non-fatal problems encountered, cleanup mostly
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Output format options
#[derive(Debug, Clone)]
pub enum OutputFormat {
    /// Fixed-width console table
    Table,

    /// JSON document
    Json {
        /// Pretty-print the JSON
        pretty: bool,
    },

    /// YAML document
    Yaml,

    /// CSV rows
    Csv {
        /// Include header row
        include_header: bool,
    },
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Table
    }
}

/// Output formatter trait - dyn-compatible, no generic methods
pub trait OutputFormatter {
    /// Render the results to a string
    fn format_results(&self, results: &ScanResults) -> io::Result<String>;

    /// Get the MIME type for this format
    fn mime_type(&self) -> &'static str;

    /// Get the file extension for this format
    fn file_extension(&self) -> &'static str;
}

/// Console table formatter.
///
/// Reproduces the four-column layout the tool has always printed: a summary
/// line, 20-wide columns (text left-aligned, the ratio cell right-aligned),
/// a dashed rule, one row per record, or `No matches found.` when the scan
/// came up empty.
pub struct TableFormatter;

impl OutputFormatter for TableFormatter {
    fn format_results(&self, results: &ScanResults) -> io::Result<String> {
        let mut output = String::new();

        if results.matches.is_empty() {
            output.push_str("No matches found.\n");
            return Ok(output);
        }

        output.push_str(&format!(
            "Found {} new domains matching {} domains in your reference set:\n",
            results.matches.len(),
            results.metadata.reference_count
        ));
        output.push_str(&format!(
            "{:<20} {:<20} {:<20} {:<20}\n",
            "Domain", "NewDomain", "MatchType", "Ratio"
        ));
        output.push_str(&"-".repeat(99));
        output.push('\n');

        for m in &results.matches {
            output.push_str(&format!(
                "{:<20} {:<20} {:<20} {:>20}\n",
                m.domain,
                m.new_domain,
                m.kind.as_str(),
                m.ratio
            ));
        }

        Ok(output)
    }

    fn mime_type(&self) -> &'static str {
        "text/plain"
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }
}

/// JSON output formatter
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_results(&self, results: &ScanResults) -> io::Result<String> {
        let json_string = if self.pretty {
            serde_json::to_string_pretty(results).map_err(io::Error::other)?
        } else {
            serde_json::to_string(results).map_err(io::Error::other)?
        };

        Ok(format!("{}\n", json_string))
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }
}

/// YAML output formatter
pub struct YamlFormatter;

impl OutputFormatter for YamlFormatter {
    fn format_results(&self, results: &ScanResults) -> io::Result<String> {
        serde_yaml::to_string(results).map_err(io::Error::other)
    }

    fn mime_type(&self) -> &'static str {
        "application/yaml"
    }

    fn file_extension(&self) -> &'static str {
        "yaml"
    }
}

/// CSV output formatter
pub struct CsvFormatter {
    include_header: bool,
}

impl CsvFormatter {
    pub fn new(include_header: bool) -> Self {
        Self { include_header }
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_results(&self, results: &ScanResults) -> io::Result<String> {
        let mut output = String::new();

        if self.include_header {
            output.push_str("Domain,NewDomain,MatchType,Ratio\n");
        }

        for m in &results.matches {
            output.push_str(&format!(
                "{},{},{},{}\n",
                m.domain,
                m.new_domain,
                m.kind.as_str(),
                m.ratio
            ));
        }

        Ok(output)
    }

    fn mime_type(&self) -> &'static str {
        "text/csv"
    }

    fn file_extension(&self) -> &'static str {
        "csv"
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(format: &OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json { pretty } => Box::new(JsonFormatter::new(*pretty)),
        OutputFormat::Yaml => Box::new(YamlFormatter),
        OutputFormat::Csv { include_header } => Box::new(CsvFormatter::new(*include_header)),
    }
}

/// Utility function to format results to a string
pub fn format_results_to_string(
    results: &ScanResults,
    format: &OutputFormat,
) -> io::Result<String> {
    let formatter = create_formatter(format);
    formatter.format_results(results)
}

/// Append match rows to `path`, writing the header row first only when the
/// file does not exist yet. Later runs keep appending to the same file, so
/// one CSV accumulates across days.
pub fn append_csv(path: &Path, results: &ScanResults) -> Result<()> {
    let include_header = !path.exists();
    let rendered = CsvFormatter::new(include_header)
        .format_results(results)
        .with_path(path.to_string_lossy(), "render")?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_path(path.to_string_lossy(), "open")?;
    file.write_all(rendered.as_bytes())
        .with_path(path.to_string_lossy(), "append")?;
    Ok(())
}
