use clap::Parser;

use crate::utils::logging::{LogFormat, LogLevel};

/// Runtime settings. No config file: the embedding process supplies the
/// resource list and tunables through flags or environment variables.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Settings {
    /// Address the front end listens on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:1234")]
    pub bind: String,

    /// Base URL of the origin service, queried as <base>/item/<name>
    #[arg(long, env = "ORIGIN_BASE_URL", default_value = "http://localhost:8080")]
    pub origin_base_url: String,

    /// Resource names to keep fresh
    #[arg(
        long,
        env = "RESOURCES",
        value_delimiter = ',',
        default_value = "alpha,bravo,charlie,delta"
    )]
    pub resources: Vec<String>,

    /// Timeout for a single origin request, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout_secs: u64,

    /// First retry delay; doubles on every failed attempt
    #[arg(long, env = "BASE_RETRY_INTERVAL_MS", default_value_t = 100)]
    pub base_retry_interval_ms: u64,

    /// Upper bound on the retry delay
    #[arg(long, env = "MAX_RETRY_INTERVAL_MS", default_value_t = 3_600_000)]
    pub max_retry_interval_ms: u64,

    /// Fraction of an entry's TTL after which it is refetched
    #[arg(long, env = "REFRESH_FRACTION", default_value_t = 0.90)]
    pub refresh_fraction: f64,

    #[arg(long, env = "LOG_LEVEL", value_enum)]
    pub log_level: Option<LogLevel>,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "compact")]
    pub log_format: LogFormat,
}
