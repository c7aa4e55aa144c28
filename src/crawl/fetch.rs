// src/crawl/fetch.rs
// =============================================================================
// This module downloads pages for the crawler.
//
// The crawler only needs two things from a fetch:
// - the body bytes, to extract links from
// - the final URL after redirects, to resolve relative links against and to
//   decide which host counts as "same domain"
//
// `PageFetcher` is the seam between the crawl algorithm and the network.
// `HttpFetcher` is the real implementation on top of reqwest; tests plug in
// an in-memory fetcher instead.
// =============================================================================

use super::config::CrawlConfig;
use crate::error::{CrawlError, Result};
use reqwest::{redirect, Client};
use tracing::debug;
use url::Url;

// A downloaded page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Where we ended up after following redirects
    pub final_url: Url,
    pub body: Vec<u8>,
}

// Anything that can turn a URL into a page
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

// Fetches pages over HTTP(S) with reqwest
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds the HTTP client once; it's reused for every page (connection pooling)
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .redirect(redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(CrawlError::Client)?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let fetch_error = |source| CrawlError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(fetch_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        if final_url.as_str() != url {
            debug!("{} resolved to {}", url, final_url);
        }

        // Headers arrived but the body didn't: nothing to extract links from
        let body = response.bytes().await.map_err(|e| CrawlError::PageParse {
            url: url.to_string(),
            reason: format!("could not read body: {}", e),
        })?;

        Ok(FetchedPage {
            final_url,
            body: body.to_vec(),
        })
    }
}
