// Core data structures for the webseek crawler

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Classification of a single fetched page against the search text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchStatus {
    /// Page body contains the search text
    Found,
    /// Page fetched but the search text is absent
    NotFound,
    /// Transport-level failure (network error, timeout)
    Failed,
    /// Task dispatched, no result yet
    InProgress,
}

impl SearchStatus {
    /// Human-readable label, with the error code folded in for failures
    pub fn label(&self, code: i32) -> String {
        match self {
            Self::Found => "Found".to_string(),
            Self::NotFound => "NotFound".to_string(),
            Self::Failed => format!("Error ({code})"),
            Self::InProgress => "In Progress".to_string(),
        }
    }
}

/// Terminal outcome for one attempted URL
///
/// Immutable once produced; exactly one instance per fetch attempt. For
/// `Failed` results `http_code` carries the negative transport error code,
/// otherwise the page's HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub url: String,
    pub status: SearchStatus,
    pub http_code: i32,
}

impl SearchResult {
    pub fn new(url: impl Into<String>, status: SearchStatus, http_code: i32) -> Self {
        Self {
            url: url.into(),
            status,
            http_code,
        }
    }
}

/// What one crawl worker reports back: a result plus discovered URLs
///
/// Produced by a worker, consumed exactly once by the engine's frontier
/// update.
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    /// Result for the URL the worker was assigned
    pub result: SearchResult,
    /// Outbound links found on the page; empty on failure
    pub new_urls: HashSet<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels() {
        assert_eq!(SearchStatus::Found.label(200), "Found");
        assert_eq!(SearchStatus::NotFound.label(404), "NotFound");
        assert_eq!(SearchStatus::Failed.label(-1), "Error (-1)");
        assert_eq!(SearchStatus::InProgress.label(0), "In Progress");
    }

    #[test]
    fn result_serializes_to_json() {
        let result = SearchResult::new("http://a.test", SearchStatus::Found, 200);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"url\":\"http://a.test\""));
        assert!(json.contains("\"status\":\"Found\""));
        assert!(json.contains("\"http_code\":200"));
    }
}
