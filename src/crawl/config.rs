// src/crawl/config.rs
// =============================================================================
// Settings for a crawl.
//
// The CLI fills this in from its flags; tests build one with `with_*`
// methods. Defaults match what the CLI uses when no flag is given.
// =============================================================================

use std::time::Duration;

/// Maximum number of link hops followed from the start page
pub const MAX_DEPTH: usize = 3;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Levels to expand beyond the start page (0 = only the start page)
    pub max_depth: usize,
    /// Per-request timeout
    pub timeout: Duration,
    pub user_agent: String,
    /// Redirects followed before a fetch counts as failed
    pub max_redirects: usize,
    /// Pause between fetches so we don't hammer the server
    pub delay: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            timeout: Duration::from_secs(10),
            user_agent: format!("site-map/{}", env!("CARGO_PKG_VERSION")),
            max_redirects: 10,
            delay: Duration::from_millis(100),
        }
    }
}

impl CrawlConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }
}
