use clap::Parser;

/// Command-line interface definition.
/// Provides command-line options for the daily lookalike-domain scan.
///
/// Verbosity levels:
/// 0 - silent (only final output)
/// 1 - errors (default)
/// 2 - warnings + errors
/// 5 - trace/debug
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Check a daily feed of newly registered domains against the domains you watch"
)]
pub struct Cli {
    /// File containing the reference domains to watch, one per line
    #[arg(short = 'i', long, value_name = "FILE")]
    pub inputfile: String,

    /// CSV file to append matches to (header row written only when the file is new)
    #[arg(short = 'o', long, value_name = "FILE")]
    pub outputfile: Option<String>,

    /// Fuzzy match threshold, 0-100; 0 disables fuzzy matching entirely
    #[arg(
        short = 'r',
        long = "fuzz-ratio",
        alias = "fuzzratio",
        value_name = "RATIO",
        default_value_t = 75
    )]
    pub fuzz_ratio: u32,

    /// Remove the downloaded archive, the extracted list and the working directory after the run
    #[arg(short = 'c', long)]
    pub clean: bool,

    /// Feed day to fetch, YYYY-MM-DD (default: yesterday)
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,

    /// Directory under which the dated working directory is created (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub workdir: Option<String>,

    /// Print matches as JSON instead of the table
    #[arg(long, conflicts_with = "yaml")]
    pub json: bool,

    /// Print matches as YAML instead of the table
    #[arg(long, conflicts_with = "json")]
    pub yaml: bool,

    /// Verbosity level (0,1,2,5)
    #[arg(long, default_value_t = 1)]
    pub verbose: u8,
}

impl Cli {
    /// Parse CLI arguments from process args.
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Convenience: are we in very verbose/debug mode?
    pub fn is_trace(&self) -> bool {
        self.verbose >= 5
    }

    /// Are warning-level messages enabled?
    pub fn warn_enabled(&self) -> bool {
        self.verbose >= 2
    }

    /// Are error-level messages enabled?
    pub fn error_enabled(&self) -> bool {
        self.verbose >= 1
    }

    /// Structured stdout (JSON/YAML) replaces the table and progress lines.
    pub fn structured_output(&self) -> bool {
        self.json || self.yaml
    }
}
