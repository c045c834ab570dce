//! Loading newline-delimited domain lists.

use std::fs;
use std::path::Path;

use crate::errors::{IoResultExt, Result};

/// Read a domain list file: one domain per line, surrounding whitespace
/// trimmed, blank lines and `#` comment lines skipped.
///
/// Used for both the user's reference list and the extracted feed list; feed
/// files routinely end with a trailing newline, and an empty entry must never
/// reach the matcher (an empty label is a substring of everything).
pub fn load_domain_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).with_path(path.to_string_lossy(), "read")?;

    let domains = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect();

    Ok(domains)
}
