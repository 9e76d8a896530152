//! webseek - Bounded concurrent text-search web crawler
//!
//! A breadth-first crawler that fetches pages starting from a seed URL,
//! searches each body for a text fragment, and reports a per-URL status
//! while staying inside a fixed worker-pool and page budget.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - Page fetching, link extraction, and per-URL workers
//! - [`engine`] - Frontier, dispatch loop, and the pause/stop/restart protocol
//! - [`models`] - Core data structures and types
//! - [`error`] - Error taxonomy
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use webseek::crawler::HttpFetcher;
//! use webseek::engine::{self, CrawlEvent, CrawlOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (events_tx, mut events_rx) = engine::event_channel();
//!     let fetcher = Arc::new(HttpFetcher::new()?);
//!     let _handle = engine::start(
//!         CrawlOptions {
//!             seed: "http://example.com".into(),
//!             workers: 4,
//!             max_pages: 50,
//!             search_text: "rust".into(),
//!         },
//!         fetcher,
//!         events_tx,
//!     )?;
//!     while let Some(event) = events_rx.recv().await {
//!         if event == CrawlEvent::Finished {
//!             break;
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crawler;
pub mod engine;
pub mod error;
pub mod models;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::crawler::{HttpFetcher, LinkExtractor, PageFetcher};
    pub use crate::engine::{CrawlEvent, CrawlOptions, EngineHandle, EngineState};
    pub use crate::error::{EngineError, FetchError};
    pub use crate::models::{SearchResult, SearchStatus, TaskOutcome};
}

// Direct re-exports for convenience
pub use models::{SearchResult, SearchStatus, TaskOutcome};
