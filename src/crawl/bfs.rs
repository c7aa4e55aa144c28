// src/crawl/bfs.rs
// =============================================================================
// This module maps a website with a level-by-level breadth-first search.
//
// How it works:
// 1. The start URL is the only entry of the first frontier
// 2. Every URL in the frontier that we haven't seen yet is marked seen and
//    fetched, and its same-host links go into the next frontier
// 3. The next frontier becomes the frontier and we go one level deeper
// 4. Stop after `max_depth + 1` levels, or earlier if a frontier is empty
//
// A URL is marked seen *before* it's fetched, so a page that fails to load
// still shows up in the site map; it just contributes no links.
//
// The crawl is pinned to one host: the host the start page ends up on after
// redirects. A page that redirects anywhere else stays in the map under the
// URL we asked for, but its links are not followed.
//
// One page is fetched at a time. A failed page or a bad link is logged and
// skipped; only a bad start URL stops the crawl.
// =============================================================================

use super::config::CrawlConfig;
use super::fetch::{FetchedPage, HttpFetcher, PageFetcher};
use super::normalize::{normalize_link, normalize_url, parse_start_url, same_host};
use crate::error::Result;
use crate::links::extract_links;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info, warn};
use url::Url;

// Result of a finished crawl
#[derive(Debug, Clone, Serialize)]
pub struct SiteMap {
    /// Normalized start URL
    pub start_url: String,
    pub max_depth: usize,
    /// Levels actually processed (at most max_depth + 1)
    pub levels: usize,
    /// HTTP fetches made, one per URL in `urls`
    pub fetches: usize,
    /// Fetches that failed or whose body couldn't be read
    pub failures: usize,
    /// Every visited URL, sorted
    pub urls: Vec<String>,
}

// Where a crawl session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CrawlPhase {
    Idle,
    Fetching { level: usize },
    Expanding { level: usize },
    Done,
}

impl CrawlPhase {
    fn level(&self) -> Option<usize> {
        match self {
            CrawlPhase::Fetching { level } | CrawlPhase::Expanding { level } => Some(*level),
            CrawlPhase::Idle | CrawlPhase::Done => None,
        }
    }
}

// All the mutable state of one crawl. Nothing here outlives the crawl.
#[derive(Debug)]
struct CrawlSession {
    /// Only grows; every URL in here was fetched exactly once
    seen: BTreeSet<String>,
    frontier: HashSet<String>,
    next_frontier: HashSet<String>,
    /// Final URLs of redirected pages; already fetched under another name
    redirected: HashSet<String>,
    /// Links must share this URL's host and port
    site: Url,
    fetches: usize,
    failures: usize,
    levels: usize,
    phase: CrawlPhase,
}

impl CrawlSession {
    fn new(start_url: String, site: Url) -> Self {
        Self {
            seen: BTreeSet::new(),
            frontier: HashSet::new(),
            next_frontier: HashSet::from([start_url]),
            redirected: HashSet::new(),
            site,
            fetches: 0,
            failures: 0,
            levels: 0,
            phase: CrawlPhase::Idle,
        }
    }

    fn set_phase(&mut self, phase: CrawlPhase) {
        debug!(level = ?phase.level(), "Crawl phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    // Moves the next frontier into place for `level`.
    // Returns false when there's nothing left to visit.
    fn advance(&mut self, level: usize) -> bool {
        self.frontier = std::mem::take(&mut self.next_frontier);
        if self.frontier.is_empty() {
            return false;
        }
        self.levels = level + 1;
        true
    }

    fn visited(&self, url: &str) -> bool {
        self.seen.contains(url) || self.redirected.contains(url)
    }

    // Returns true if the URL is new (and now marked seen)
    fn mark_seen(&mut self, url: &str) -> bool {
        if self.visited(url) {
            return false;
        }
        self.seen.insert(url.to_string());
        true
    }

    // Remembers where a fetch of `url` actually landed so the page isn't
    // fetched a second time under its final address
    fn record_final_url(&mut self, url: &str, final_url: &Url) {
        let landed = normalize_url(final_url);
        if landed != url {
            debug!("{} redirected to {}", url, landed);
            self.redirected.insert(landed);
        }
    }

    fn enqueue(&mut self, url: String) {
        if !self.visited(&url) {
            self.next_frontier.insert(url);
        }
    }

    fn into_site_map(self, start_url: String, max_depth: usize) -> SiteMap {
        SiteMap {
            start_url,
            max_depth,
            levels: self.levels,
            fetches: self.fetches,
            failures: self.failures,
            urls: self.seen.into_iter().collect(),
        }
    }
}

// Crawls a site with any PageFetcher
pub struct Crawler<F> {
    fetcher: F,
    config: CrawlConfig,
}

impl Crawler<HttpFetcher> {
    // Crawler that fetches over HTTP using the given settings
    pub fn http(config: CrawlConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::new(fetcher, config))
    }
}

impl<F: PageFetcher> Crawler<F> {
    pub fn new(fetcher: F, config: CrawlConfig) -> Self {
        Self { fetcher, config }
    }

    // Runs the breadth-first crawl
    //
    // Parameters:
    //   start_url: must have an http(s) scheme and a host
    //
    // Returns: the SiteMap, or InvalidStartUrl before anything is fetched
    pub async fn crawl(&self, start_url: &str) -> Result<SiteMap> {
        let start_url = parse_start_url(start_url)?;
        let start = normalize_url(&start_url);
        let max_depth = self.config.max_depth;

        let mut session = CrawlSession::new(start.clone(), start_url);

        for level in 0..=max_depth {
            if !session.advance(level) {
                break;
            }
            info!("Current level: {} ({} page(s) queued)", level, session.frontier.len());

            // Sorted so logs and request order are reproducible
            let mut frontier: Vec<String> = session.frontier.drain().collect();
            frontier.sort();

            session.set_phase(CrawlPhase::Fetching { level });
            let mut pages = Vec::with_capacity(frontier.len());
            for url in frontier {
                if !session.mark_seen(&url) {
                    continue;
                }
                if session.fetches > 0 && !self.config.delay.is_zero() {
                    tokio::time::sleep(self.config.delay).await;
                }

                session.fetches += 1;
                debug!("Fetching {}", url);
                match self.fetcher.fetch(&url).await {
                    Ok(page) => {
                        if level == 0 {
                            // The start page decides which host we stay on
                            session.site = page.final_url.clone();
                        }
                        session.record_final_url(&url, &page.final_url);
                        pages.push((url, page));
                    }
                    Err(e) => {
                        warn!("error getting links for {}: {}. Skipping page", url, e);
                        session.failures += 1;
                    }
                }
            }

            session.set_phase(CrawlPhase::Expanding { level });
            for (url, page) in pages {
                if !same_host(&session.site, &page.final_url) {
                    info!(
                        "{} left the site for {}. Not following its links",
                        url, page.final_url
                    );
                    continue;
                }
                for link in page_links(&url, &page, &session.site) {
                    session.enqueue(link);
                }
            }
        }

        session.set_phase(CrawlPhase::Done);
        info!("Number of HTTP calls made: {}", session.fetches);

        Ok(session.into_site_map(start, max_depth))
    }
}

// Normalized on-site links of one fetched page. Malformed hrefs are logged and
// skipped. Bytes that aren't UTF-8 (Latin-1, windows-1252 pages) are replaced,
// which never touches the ASCII markup around a link.
fn page_links(url: &str, page: &FetchedPage, site: &Url) -> Vec<String> {
    let html = String::from_utf8_lossy(&page.body);

    let mut links = Vec::new();
    for link in extract_links(&html) {
        match normalize_link(&page.final_url, site, &link.href) {
            Ok(Some(target)) => links.push(target),
            Ok(None) => debug!("Skipping link {} on {}", link.href, url),
            Err(e) => warn!("{}. Skipping link", e),
        }
    }

    debug!("Found {} crawlable link(s) on {}", links.len(), url);
    links
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why two sets per level instead of one VecDeque?
//    - Links found while processing level N belong to level N + 1
//    - Keeping them in `next_frontier` makes the level boundary explicit,
//      so the depth limit is just the loop bound
//
// 2. Why BTreeSet for `seen`?
//    - A BTreeSet keeps its items sorted
//    - The site map is the seen set in sorted order, so no extra sort needed
//
// 3. What is std::mem::take?
//    - Moves the value out and leaves Default::default() behind
//    - Here: the next frontier becomes the frontier, and a fresh empty set
//      takes its place without cloning anything
//
// 4. Why is Crawler generic over F?
//    - The crawl loop doesn't care where pages come from
//    - Production code uses HttpFetcher; tests use an in-memory site, so they
//      run without a network and always see the same pages
// -----------------------------------------------------------------------------
