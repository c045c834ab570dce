//! High-level application orchestration layer.
//!
//! This module provides the CLI-facing `App` façade for the daily scan. It
//! resolves the feed day, loads the watch list, claims the dated working
//! directory, downloads and unpacks the feed, runs the matcher and renders
//! either structured (JSON/YAML) or human-oriented output.
//!
//! Major steps in `App::run`:
//!   1. Config load / validation
//!   2. Feed day resolution (yesterday, or --date override)
//!   3. Reference list loading (before any side effects, so bad input fails
//!      offline)
//!   4. Working directory creation (aborts when the day was already scanned)
//!   5. Feed download + extraction
//!   6. Matching
//!   7. Exclusion / cap filtering
//!   8. Optional CSV append, optional cleanup
//!   9. Table or structured stdout rendering
//!
//! Stdout carries only the download announcement and the results (table,
//! JSON, YAML); everything else goes to stderr behind the verbosity gates.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::Cli;
use crate::config::Config;
use crate::errors::{NrdscanError, Result};
use crate::feed::{self, FeedClient};
use crate::lists;
use crate::matcher::{self, DomainMatch};
use crate::report::{self, OutputFormat, ScanMetadata, ScanResults};
use crate::workdir::Workdir;

/// Application façade.
pub struct App;

impl App {
    /// Execute the end-to-end daily scan workflow.
    ///
    /// Returns: intended process exit code (0 = success, including a scan
    /// with no matches).
    pub async fn run(cli: &Cli) -> Result<i32> {
        let config = Self::load_config(cli)?;
        let start_time = Instant::now();

        let stamp = Self::resolve_stamp(cli)?;
        if cli.is_trace() {
            eprintln!("[trace] Feed day: {stamp}");
        }

        let references = lists::load_domain_list(Path::new(&cli.inputfile))?;
        if cli.is_trace() {
            eprintln!(
                "[trace] Loaded {} reference domain(s) from {}",
                references.len(),
                cli.inputfile
            );
        }
        if references.is_empty() && cli.warn_enabled() {
            eprintln!(
                "Warning: reference list {} is empty; nothing can match",
                cli.inputfile
            );
        }

        let root = cli
            .workdir
            .clone()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let workdir = Workdir::create(&root, &stamp)?;

        let client = FeedClient::new(config.feed.clone(), &config.network)?;
        let url = client.archive_url(&stamp);
        if !cli.structured_output() {
            println!(
                "Downloading {} to {}",
                url,
                workdir.archive_path().display()
            );
        }
        let archive = client.download(&workdir).await?;
        let list_path = client.extract(&archive, &workdir)?;

        let candidates = lists::load_domain_list(&list_path)?;
        if cli.is_trace() {
            eprintln!("[trace] Feed contains {} candidate domain(s)", candidates.len());
        }

        let matches = matcher::match_domains(&references, &candidates, config.matching.fuzz_ratio);
        let (matches, excluded) = Self::filter_matches(matches, &config)?;
        if cli.is_trace() {
            eprintln!(
                "[trace] {} match(es) kept, {} excluded",
                matches.len(),
                excluded
            );
        }

        let mut results = ScanResults {
            feed_date: stamp,
            matches,
            metadata: ScanMetadata {
                duration_ms: None,
                reference_count: references.len(),
                candidate_count: candidates.len(),
                fuzz_ratio: config.matching.fuzz_ratio,
                excluded,
                feed_url: Some(url),
                generated_at: Some(
                    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
                ),
                warnings: Vec::new(),
            },
        };

        if let Some(ref outputfile) = cli.outputfile {
            report::append_csv(Path::new(outputfile), &results)?;
            if cli.is_trace() {
                eprintln!(
                    "[trace] Appended {} row(s) to {outputfile}",
                    results.matches.len()
                );
            }
        }

        if cli.clean {
            let warnings = workdir.cleanup(&list_path);
            if cli.warn_enabled() {
                for warning in &warnings {
                    eprintln!("Warning: {warning}");
                }
            }
            results.metadata.warnings = warnings;
        }

        results.metadata.duration_ms = Some(start_time.elapsed().as_millis() as u64);

        Self::render(cli, &results)?;

        Ok(0)
    }
}

impl App {
    fn load_config(cli: &Cli) -> Result<Config> {
        if cli.fuzz_ratio > 100 {
            return Err(NrdscanError::invalid_threshold(cli.fuzz_ratio));
        }

        let mut config = Config::from_env();
        config.merge_with_cli(cli);
        config
            .validate()
            .map_err(|e| NrdscanError::configuration(e.to_string()))?;
        Ok(config)
    }

    fn resolve_stamp(cli: &Cli) -> Result<String> {
        match cli.date {
            Some(ref value) => feed::validate_stamp(value),
            None => Ok(feed::default_stamp()),
        }
    }

    /// Drop records matching the configured exclusion patterns, then apply
    /// the results cap. Returns the kept records (order untouched) and how
    /// many were dropped. Patterns are compiled once per call; a pattern
    /// that fails to compile is an error, not a skipped filter.
    fn filter_matches(
        matches: Vec<DomainMatch>,
        config: &Config,
    ) -> Result<(Vec<DomainMatch>, usize)> {
        let total = matches.len();

        let exclude = config
            .compiled_exclude_patterns()
            .map_err(|e| NrdscanError::configuration(e.to_string()))?;
        let mut kept: Vec<DomainMatch> = if exclude.is_empty() {
            matches
        } else {
            matches
                .into_iter()
                .filter(|m| !exclude.iter().any(|re| re.is_match(&m.new_domain)))
                .collect()
        };

        if config.output.max_results > 0 && kept.len() > config.output.max_results {
            kept.truncate(config.output.max_results);
        }

        let dropped = total - kept.len();
        Ok((kept, dropped))
    }

    fn render(cli: &Cli, results: &ScanResults) -> Result<()> {
        let format = if cli.json {
            OutputFormat::Json { pretty: true }
        } else if cli.yaml {
            OutputFormat::Yaml
        } else {
            OutputFormat::Table
        };

        let rendered = report::format_results_to_string(results, &format)
            .map_err(|e| NrdscanError::internal(format!("formatting results: {e}")))?;
        print!("{rendered}");
        Ok(())
    }
}
