//! One fetch-and-classify unit of work
//!
//! A worker performs exactly one network fetch, classifies the page against
//! the search text, and reports the result plus newly discovered URLs. It
//! never touches shared crawl state; the engine applies its outcome.

use std::collections::HashSet;

use crate::crawler::extract::LinkExtractor;
use crate::crawler::fetcher::PageFetcher;
use crate::models::{SearchResult, SearchStatus, TaskOutcome};

/// Fetch `url`, classify it against `search_text`, and collect outbound links
///
/// Transport failure is terminal for the URL: the outcome carries `Failed`
/// with the negative error code and no discovered links. Any HTTP response,
/// 2xx or not, is classified by body content.
pub async fn process(
    fetcher: &dyn PageFetcher,
    extractor: &LinkExtractor,
    url: &str,
    search_text: &str,
) -> TaskOutcome {
    match fetcher.fetch(url).await {
        Ok(page) => {
            let status = if page.body.contains(search_text) {
                SearchStatus::Found
            } else {
                SearchStatus::NotFound
            };
            let new_urls = extractor.extract(&page.body);
            TaskOutcome {
                result: SearchResult::new(url, status, page.http_code),
                new_urls,
            }
        }
        Err(err) => {
            tracing::debug!(url = %url, error = %err, "fetch failed");
            TaskOutcome {
                result: SearchResult::new(url, SearchStatus::Failed, err.code()),
                new_urls: HashSet::new(),
            }
        }
    }
}
