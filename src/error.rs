//! Error types for the webseek crawler
//!
//! This module defines custom error types used throughout the application.

use thiserror::Error;

/// Errors that can occur during HTTP fetching operations
///
/// Only transport-level failures are represented here. A response carrying a
/// non-2xx status code is still a fetched page and is classified normally.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Response body decoding error
    #[error("Decoding error: {0}")]
    Decode(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Stable numeric code reported as `http_code` for failed pages
    ///
    /// Negative so it can never collide with an HTTP status code.
    pub fn code(&self) -> i32 {
        match self {
            Self::Timeout => -1,
            Self::Http(_) => -2,
            Self::Decode(_) => -3,
            Self::InvalidUrl(_) => -4,
        }
    }
}

/// Errors surfaced synchronously when starting a crawl
#[derive(Error, Debug)]
pub enum EngineError {
    /// Seed URL rejected before any crawl starts
    #[error("Invalid seed URL {url:?}: {reason}")]
    InvalidSeed {
        /// The rejected URL as given
        url: String,
        /// Why it was rejected
        reason: String,
    },
}
