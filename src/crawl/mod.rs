// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Level-by-level breadth-first crawling starting from a URL
// - Same-host restriction (doesn't crawl external sites)
// - Configurable depth limit
// - Polite crawling with a delay between requests
//
// Submodules:
// - bfs: the crawl loop and its session state
// - fetch: downloading pages (reqwest, or any other PageFetcher)
// - normalize: turning hrefs into comparable absolute URLs
// - config: crawl settings
// =============================================================================

mod bfs;
mod config;
mod fetch;
mod normalize;

pub use bfs::{Crawler, SiteMap};
pub use config::{CrawlConfig, MAX_DEPTH};
