// src/links/mod.rs
// =============================================================================
// This module pulls hyperlinks out of HTML.
//
// Submodules:
// - parser: turns an HTML document into a list of (href, text) pairs
//
// The crawler uses this for every page it fetches, and the `links`
// subcommand uses it on a local file.
// =============================================================================

mod parser;

pub use parser::{extract_links, parse_file, Link};
