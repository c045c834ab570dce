//! Configuration management for nrdscan.
//!
//! Structured configuration loaded from defaults, environment variables and
//! command-line arguments, in that order of precedence. Centralizes network
//! timeouts, feed location details and result-filtering preferences.

use std::time::Duration;

/// Main configuration structure for nrdscan.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Network operation settings
    pub network: NetworkConfig,

    /// Feed location settings
    pub feed: FeedConfig,

    /// Matching settings
    pub matching: MatchConfig,

    /// Output and filtering preferences
    pub output: OutputConfig,
}

/// Network-related configuration options
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Overall timeout for the feed download request
    pub http_timeout: Duration,

    /// Timeout for establishing the connection
    pub connect_timeout: Duration,

    /// User-Agent header sent with the download request
    pub user_agent: String,
}

/// Where the daily feed lives and what its pieces are called.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Base URL of the feed index
    pub base_url: String,

    /// Path segment appended after the encoded file name
    pub url_suffix: String,

    /// Name of the domain list inside the downloaded archive
    pub list_file_name: String,
}

/// Matching configuration
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Fuzzy match threshold, 0-100; 0 disables fuzzy matching
    pub fuzz_ratio: u32,
}

/// Output and filtering configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Candidate-domain patterns to drop from results (regex)
    pub exclude_patterns: Vec<String>,

    /// Maximum number of results to report (0 = unlimited)
    pub max_results: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            http_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("nrdscan/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.whoisds.com/whois-database/newly-registered-domains/"
                .to_string(),
            url_suffix: "/nrd".to_string(),
            list_file_name: "domain-names.txt".to_string(),
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { fuzz_ratio: 75 }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            exclude_patterns: vec![],
            max_results: 0, // unlimited
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(timeout) = std::env::var("NRDSCAN_HTTP_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse::<u64>() {
                config.network.http_timeout = Duration::from_secs(secs);
            }
        }

        if let Ok(timeout) = std::env::var("NRDSCAN_CONNECT_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse::<u64>() {
                config.network.connect_timeout = Duration::from_secs(secs);
            }
        }

        if let Ok(base_url) = std::env::var("NRDSCAN_FEED_BASE_URL") {
            config.feed.base_url = base_url;
        }

        if let Ok(patterns) = std::env::var("NRDSCAN_EXCLUDE_PATTERNS") {
            config.output.exclude_patterns = patterns
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect();
        }

        if let Ok(max_results) = std::env::var("NRDSCAN_MAX_RESULTS") {
            if let Ok(max) = max_results.parse::<usize>() {
                config.output.max_results = max;
            }
        }

        config
    }

    /// Merge with CLI arguments, giving CLI precedence
    pub fn merge_with_cli(&mut self, cli: &crate::cli::Cli) {
        self.matching.fuzz_ratio = cli.fuzz_ratio;
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.network.http_timeout.as_secs() == 0 {
            return Err(ConfigError::InvalidValue {
                field: "network.http_timeout".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        if self.feed.base_url.is_empty() || !self.feed.base_url.starts_with("http") {
            return Err(ConfigError::InvalidValue {
                field: "feed.base_url".to_string(),
                value: self.feed.base_url.clone(),
                reason: "Feed base URL must be an http(s) URL".to_string(),
            });
        }

        if self.feed.list_file_name.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "feed.list_file_name".to_string(),
                value: String::new(),
                reason: "List file name must not be empty".to_string(),
            });
        }

        if self.matching.fuzz_ratio > 100 {
            return Err(ConfigError::InvalidValue {
                field: "matching.fuzz_ratio".to_string(),
                value: self.matching.fuzz_ratio.to_string(),
                reason: "Ratio is a percentage; 0 disables fuzzy matching".to_string(),
            });
        }

        self.compiled_exclude_patterns()?;

        Ok(())
    }

    /// Compile the exclusion patterns, in configuration order. Callers keep
    /// the compiled set and reuse it across candidate domains. `validate`
    /// runs the same compilation, so a validated config cannot fail here.
    pub fn compiled_exclude_patterns(&self) -> Result<Vec<regex::Regex>, ConfigError> {
        self.output
            .exclude_patterns
            .iter()
            .map(|pattern| {
                regex::Regex::new(pattern).map_err(|e| ConfigError::Pattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect()
    }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
    /// Invalid configuration value
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Exclusion pattern failed to compile
    Pattern { pattern: String, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue {
                field,
                value,
                reason,
            } => {
                write!(f, "Invalid value '{}' for '{}': {}", value, field, reason)
            }
            ConfigError::Pattern { pattern, reason } => {
                write!(f, "Invalid exclude pattern '{}': {}", pattern, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.network.http_timeout, Duration::from_secs(60));
        assert_eq!(config.matching.fuzz_ratio, 75);
        assert_eq!(config.feed.list_file_name, "domain-names.txt");
        assert!(config.feed.base_url.starts_with("https://www.whoisds.com/"));
        assert_eq!(config.output.max_results, 0);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.network.http_timeout = Duration::from_secs(0);
        assert!(config.validate().is_err());

        config.network.http_timeout = Duration::from_secs(60);
        config.matching.fuzz_ratio = 101;
        assert!(config.validate().is_err());

        config.matching.fuzz_ratio = 75;
        config.output.exclude_patterns = vec!["[unclosed".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_loading() {
        env::set_var("NRDSCAN_HTTP_TIMEOUT_SECS", "15");
        env::set_var("NRDSCAN_FEED_BASE_URL", "https://mirror.example/feed/");
        env::set_var("NRDSCAN_EXCLUDE_PATTERNS", r"\.cn$, \.ru$");

        let config = Config::from_env();
        assert_eq!(config.network.http_timeout, Duration::from_secs(15));
        assert_eq!(config.feed.base_url, "https://mirror.example/feed/");
        assert_eq!(
            config.output.exclude_patterns,
            vec![r"\.cn$".to_string(), r"\.ru$".to_string()]
        );

        // Clean up
        env::remove_var("NRDSCAN_HTTP_TIMEOUT_SECS");
        env::remove_var("NRDSCAN_FEED_BASE_URL");
        env::remove_var("NRDSCAN_EXCLUDE_PATTERNS");
    }

    #[test]
    fn test_exclude_pattern_compilation() {
        let mut config = Config::default();
        assert!(config.compiled_exclude_patterns().unwrap().is_empty());

        config.output.exclude_patterns = vec![r"^internal-".to_string(), r"\.test$".to_string()];
        let compiled = config.compiled_exclude_patterns().unwrap();
        assert_eq!(compiled.len(), 2);
        assert!(compiled
            .iter()
            .any(|re| re.is_match("internal-tools.example.com")));
        assert!(compiled.iter().any(|re| re.is_match("staging.test")));
        assert!(!compiled.iter().any(|re| re.is_match("payppal-login.com")));

        config.output.exclude_patterns.push("[unclosed".to_string());
        assert!(matches!(
            config.compiled_exclude_patterns(),
            Err(ConfigError::Pattern { .. })
        ));
    }
}
