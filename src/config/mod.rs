//! Configuration management for the webseek crawler
//!
//! This module handles loading and validating configuration from environment
//! variables, TOML files, and command-line arguments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Crawler configuration
    pub crawler: CrawlerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Crawler-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of concurrent fetch workers
    pub max_workers: usize,

    /// Maximum number of distinct URLs admitted into a crawl
    pub max_pages: usize,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Rate limit (requests per second); unlimited when absent
    pub rate_limit: Option<u32>,

    /// User agent string
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_workers: 4,
            max_pages: 100,
            request_timeout_secs: 30,
            rate_limit: None,
            user_agent: format!("webseek/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to defaults.
    pub fn from_env() -> Self {
        let defaults = CrawlerConfig::default();

        let max_workers = std::env::var("WEBSEEK_MAX_WORKERS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.max_workers);

        let max_pages = std::env::var("WEBSEEK_MAX_PAGES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.max_pages);

        let request_timeout_secs = std::env::var("WEBSEEK_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.request_timeout_secs);

        let rate_limit = std::env::var("WEBSEEK_RATE_LIMIT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok());

        let user_agent = std::env::var("WEBSEEK_USER_AGENT").unwrap_or(defaults.user_agent);

        let level = std::env::var("WEBSEEK_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));
        let format = std::env::var("WEBSEEK_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Self {
            crawler: CrawlerConfig {
                max_workers,
                max_pages,
                request_timeout_secs,
                rate_limit,
                user_agent,
            },
            logging: LoggingConfig { level, format },
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.crawler.max_workers == 0 {
            anyhow::bail!("max_workers must be at least 1");
        }
        if self.crawler.max_pages == 0 {
            anyhow::bail!("max_pages must be at least 1");
        }
        if self.crawler.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be at least 1");
        }
        if self.crawler.rate_limit == Some(0) {
            anyhow::bail!("rate_limit must be at least 1 when set");
        }
        Ok(())
    }

    /// Request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.crawler.request_timeout_secs)
    }
}

impl CrawlerConfig {
    /// Worker count capped by available hardware concurrency
    pub fn clamped_workers(&self) -> usize {
        let hardware = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(self.max_workers.max(1));
        self.max_workers.clamp(1, hardware.max(1))
    }
}
