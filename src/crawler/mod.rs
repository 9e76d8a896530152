//! Page fetching and classification
//!
//! This module implements the per-URL side of the crawl: the HTTP fetcher
//! with rate limiting, the link extractor, and the worker that ties them
//! together for one fetch-and-classify unit of work. Shared crawl state
//! lives in [`crate::engine`]; nothing here touches it.

pub mod extract;
pub mod fetcher;
pub mod worker;

pub use extract::LinkExtractor;
pub use fetcher::{FetchedPage, FetcherSettings, HttpFetcher, PageFetcher};
