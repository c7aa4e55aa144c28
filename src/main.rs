// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing) on stderr
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 2 = error)
// =============================================================================

mod cli;     // src/cli.rs - command-line parsing
mod crawl;   // src/crawl/ - breadth-first site crawling
mod error;   // src/error.rs - crawler error types
mod links;   // src/links/ - HTML link extraction

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use crawl::{CrawlConfig, Crawler, SiteMap};
use std::path::Path;
use std::time::Duration;
use tracing::{error, info, Level};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Crawl {
            target,
            max_depth,
            json,
            timeout,
            delay_ms,
            max_redirects,
        } => {
            let config = CrawlConfig::default()
                .with_max_depth(max_depth)
                .with_timeout(Duration::from_secs(timeout))
                .with_delay(Duration::from_millis(delay_ms))
                .with_max_redirects(max_redirects);
            handle_crawl(&target, config, json).await
        }
        Commands::Links { file_path, json } => handle_links(&file_path, json),
    }
}

// Handles the 'crawl' subcommand
// Parameters:
//   target: the start URL, validated by the crawler before any request
//   config: depth, timeout and politeness settings from the flags
//   json: print the SiteMap as JSON instead of log lines
async fn handle_crawl(target: &str, config: CrawlConfig, json: bool) -> Result<()> {
    info!("Base target: {}", target);

    let crawler = Crawler::http(config)?;
    let site_map = crawler.crawl(target).await?;

    print_site_map(&site_map, json)
}

fn print_site_map(site_map: &SiteMap, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(site_map)?);
        return Ok(());
    }

    info!("Found {} links", site_map.urls.len());
    if site_map.failures > 0 {
        info!("{} page(s) could not be fetched or parsed", site_map.failures);
    }

    info!("All links:");
    for url in &site_map.urls {
        info!("Link: {}", url);
    }
    Ok(())
}

// Handles the 'links' subcommand
fn handle_links(path: &Path, json: bool) -> Result<()> {
    let found = links::parse_file(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    if found.is_empty() {
        info!("No links found in {}", path.display());
        return Ok(());
    }

    info!("Links found in {}:", path.display());
    for link in &found {
        info!("URL: {}, Text: {}", link.href, link.text);
    }
    Ok(())
}
