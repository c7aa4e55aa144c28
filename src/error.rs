// src/error.rs
// =============================================================================
// Error types for the crawler.
//
// Only two errors stop a crawl before it starts: a bad start URL and an HTTP
// client that cannot be built. Everything else happens to one page or one
// link, gets logged, and the crawl carries on.
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    /// The start URL is unparsable, has no host, or is not http(s)
    #[error("invalid start URL '{url}': {reason}")]
    InvalidStartUrl { url: String, reason: String },

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Network failure, timeout or redirect loop
    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// An href that cannot be resolved against its page
    #[error("malformed link '{href}' on {page}: {source}")]
    LinkParse {
        href: String,
        page: String,
        #[source]
        source: url::ParseError,
    },

    /// The page body could not be read as HTML text
    #[error("could not parse page {url}: {reason}")]
    PageParse { url: String, reason: String },
}

impl CrawlError {
    /// Fatal errors abort the whole crawl; the rest only skip a page or link
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CrawlError::InvalidStartUrl { .. } | CrawlError::Client(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CrawlError>;
