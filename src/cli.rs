// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI structure is described with Rust structs
// and attributes, and clap generates the parsing, --help and --version.
//
// Subcommands:
// - crawl: map a website breadth-first
// - links: list the links in a local HTML file
// =============================================================================

use crate::crawl::MAX_DEPTH;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "site-map",
    version,
    about = "Build a map of a website by crawling its links",
    long_about = "site-map starts at a URL, follows links that stay on the same host \
                  level by level, and prints every page it visited in sorted order."
)]
pub struct Cli {
    /// Show debug logging (every link decision and request)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website and list every same-host page reachable within the depth limit
    ///
    /// Example: site-map crawl --target https://example.com --max-depth 2
    Crawl {
        /// Base URL to start crawling from; must have a scheme and a host
        #[arg(long, default_value = "https://www.calhoun.io")]
        target: String,

        /// Link hops to follow from the start page (0 = only the start page)
        #[arg(long, default_value_t = MAX_DEPTH)]
        max_depth: usize,

        /// Print the site map as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout: u64,

        /// Pause between requests in milliseconds
        #[arg(long, default_value_t = 100)]
        delay_ms: u64,

        /// Redirects to follow before giving up on a page
        #[arg(long, default_value_t = 10)]
        max_redirects: usize,
    },

    /// Print the links found in a local HTML file
    ///
    /// Example: site-map links --file-path ./page.html
    Links {
        /// Path to the HTML file to parse
        #[arg(long, default_value = "./testdata/ex1.html")]
        file_path: PathBuf,

        /// Print the links as JSON on stdout
        #[arg(long)]
        json: bool,
    },
}
