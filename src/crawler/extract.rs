//! Outbound link extraction from page bodies
//!
//! Extraction is deliberately narrow: only `http://` URLs terminated by a
//! double quote are picked up, mirroring the restrictive pattern this crawler
//! has always used. `https://` links are not followed.

use regex::Regex;
use std::collections::HashSet;

/// Link extractor with a compiled pattern
pub struct LinkExtractor {
    /// Matches a quote-terminated http:// URL, e.g. href="http://a.test"
    pattern: Regex,
}

impl LinkExtractor {
    /// Create a new extractor with the compiled pattern
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r#"(http://[^\s"]+)""#).expect("link pattern is valid"),
        }
    }

    /// Extract the set of outbound `http://` URLs referenced in `body`
    pub fn extract(&self, body: &str) -> HashSet<String> {
        self.pattern
            .captures_iter(body)
            .map(|cap| cap[1].to_string())
            .collect()
    }
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_quoted_http_links() {
        let extractor = LinkExtractor::new();
        let body = r#"<a href="http://a.test/page">one</a> <a href="http://b.test">two</a>"#;
        let urls = extractor.extract(body);
        assert_eq!(urls.len(), 2);
        assert!(urls.contains("http://a.test/page"));
        assert!(urls.contains("http://b.test"));
    }

    #[test]
    fn ignores_https_links() {
        let extractor = LinkExtractor::new();
        let body = r#"<a href="https://secure.test">nope</a>"#;
        assert!(extractor.extract(body).is_empty());
    }

    #[test]
    fn ignores_unquoted_urls() {
        let extractor = LinkExtractor::new();
        let body = "plain text mentioning http://loose.test with no quote";
        assert!(extractor.extract(body).is_empty());
    }

    #[test]
    fn deduplicates_repeated_links() {
        let extractor = LinkExtractor::new();
        let body = r#"<a href="http://a.test"> <a href="http://a.test">"#;
        assert_eq!(extractor.extract(body).len(), 1);
    }

    #[test]
    fn empty_body_yields_no_links() {
        let extractor = LinkExtractor::new();
        assert!(extractor.extract("").is_empty());
    }
}
