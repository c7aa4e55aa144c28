// src/crawl/normalize.rs
// =============================================================================
// URL normalization for the crawler.
//
// Two links that point at the same page must become the same string, or the
// seen set can't deduplicate them. Every URL that enters a crawl set goes
// through `normalize_url`:
// - the fragment is removed (#section is the same page)
// - one trailing slash on the path is removed ("https://h/" == "https://h")
// - scheme and host are lowercased by the url crate when parsing
//
// Links found on a page additionally go through `normalize_link`, which
// resolves them against the page and filters out anything we shouldn't crawl.
// =============================================================================

use crate::error::{CrawlError, Result};
use url::{Position, Url};

// Checks the URL the user gave us before any request is made
//
// Rejects:
// - strings that don't parse as absolute URLs ("example.com" has no scheme)
// - schemes other than http/https
// - URLs without a host
pub fn parse_start_url(raw: &str) -> Result<Url> {
    let invalid = |reason: String| CrawlError::InvalidStartUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;

    if !is_web_scheme(url.scheme()) {
        return Err(invalid(format!(
            "scheme '{}' is not http or https",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(invalid("target must have a host".to_string())),
    }
}

// Turns a parsed URL into the canonical string stored in the crawl sets
//
// Example:
//   "https://example.test/docs/#intro" -> "https://example.test/docs"
//   "https://example.test/?q=1"        -> "https://example.test?q=1"
pub fn normalize_url(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);

    let path = url.path();
    let path = path.strip_suffix('/').unwrap_or(path);

    format!(
        "{}{}{}",
        &url[..Position::BeforePath],
        path,
        &url[Position::AfterPath..]
    )
}

// Resolves an href found on `page` and decides whether to crawl it
//
// Parameters:
//   page: the final URL of the page the link was found on (after redirects)
//   site: the URL whose host the whole crawl is pinned to
//   href: the raw href attribute value
//
// Returns:
//   Ok(Some(url)) = a normalized http(s) URL on the site's host
//   Ok(None)      = a valid link we don't follow (mailto:, other host, ...)
//   Err(..)       = the href can't be resolved at all
pub fn normalize_link(page: &Url, site: &Url, href: &str) -> Result<Option<String>> {
    let href = href.trim();
    if href.is_empty() {
        return Ok(None);
    }

    let resolved = page.join(href).map_err(|source| CrawlError::LinkParse {
        href: href.to_string(),
        page: page.to_string(),
        source,
    })?;

    if !is_web_scheme(resolved.scheme()) || !same_host(site, &resolved) {
        return Ok(None);
    }

    Ok(Some(normalize_url(&resolved)))
}

// Host comparison includes an explicit port, so localhost:8080 and
// localhost:9090 are different sites. Default ports are implicit.
pub fn same_host(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port() == b.port()
}

fn is_web_scheme(scheme: &str) -> bool {
    scheme == "http" || scheme == "https"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://example.test/blog/post").unwrap()
    }

    #[test]
    fn test_start_url_accepts_http_and_https() {
        assert!(parse_start_url("https://example.test/").is_ok());
        assert!(parse_start_url("http://example.test:8080/a").is_ok());
    }

    #[test]
    fn test_start_url_requires_scheme() {
        let err = parse_start_url("example.test").unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, CrawlError::InvalidStartUrl { .. }));
    }

    #[test]
    fn test_start_url_rejects_other_schemes() {
        assert!(parse_start_url("mailto:someone@example.test").is_err());
        assert!(parse_start_url("ftp://example.test/file").is_err());
    }

    #[test]
    fn test_start_url_requires_host() {
        assert!(parse_start_url("https://").is_err());
        assert!(parse_start_url("file:///etc/hosts").is_err());
    }

    #[test]
    fn test_normalize_strips_root_slash() {
        let url = Url::parse("https://example.test/").unwrap();
        assert_eq!(normalize_url(&url), "https://example.test");
    }

    #[test]
    fn test_normalize_strips_trailing_slash_and_fragment() {
        let url = Url::parse("https://Example.TEST/docs/#intro").unwrap();
        assert_eq!(normalize_url(&url), "https://example.test/docs");
    }

    #[test]
    fn test_normalize_keeps_query_and_port() {
        let url = Url::parse("http://example.test:8080/search/?q=rust").unwrap();
        assert_eq!(normalize_url(&url), "http://example.test:8080/search?q=rust");
    }

    #[test]
    fn test_relative_link_resolves_against_page() {
        assert_eq!(
            normalize_link(&page(), &page(), "/about").unwrap(),
            Some("https://example.test/about".to_string())
        );
        assert_eq!(
            normalize_link(&page(), &page(), "other-post/").unwrap(),
            Some("https://example.test/blog/other-post".to_string())
        );
        assert_eq!(
            normalize_link(&page(), &page(), "../").unwrap(),
            Some("https://example.test".to_string())
        );
    }

    #[test]
    fn test_fragment_collapses_onto_page() {
        assert_eq!(
            normalize_link(&page(), &page(), "/about#team").unwrap(),
            Some("https://example.test/about".to_string())
        );
        assert_eq!(
            normalize_link(&page(), &page(), "#comments").unwrap(),
            Some("https://example.test/blog/post".to_string())
        );
    }

    #[test]
    fn test_other_host_is_dropped() {
        assert_eq!(normalize_link(&page(), &page(), "https://other.test/x").unwrap(), None);
        assert_eq!(normalize_link(&page(), &page(), "//cdn.example.test/app.js").unwrap(), None);
    }

    #[test]
    fn test_other_port_is_dropped() {
        assert_eq!(normalize_link(&page(), &page(), "https://example.test:8443/x").unwrap(), None);
    }

    #[test]
    fn test_site_host_wins_over_page_host() {
        // A page that redirected off the site still resolves relative links
        // against itself, but only the site's host is kept
        let moved = Url::parse("https://other.test/signin").unwrap();
        let site = Url::parse("https://example.test").unwrap();
        assert_eq!(normalize_link(&moved, &site, "/a").unwrap(), None);
        assert_eq!(
            normalize_link(&moved, &site, "https://example.test/back").unwrap(),
            Some("https://example.test/back".to_string())
        );
    }

    #[test]
    fn test_non_web_schemes_are_dropped() {
        assert_eq!(normalize_link(&page(), &page(), "mailto:me@example.test").unwrap(), None);
        assert_eq!(normalize_link(&page(), &page(), "tel:+15550100").unwrap(), None);
        assert_eq!(normalize_link(&page(), &page(), "javascript:void(0)").unwrap(), None);
    }

    #[test]
    fn test_empty_href_is_dropped() {
        assert_eq!(normalize_link(&page(), &page(), "   ").unwrap(), None);
    }

    #[test]
    fn test_unresolvable_href_is_an_error() {
        let err = normalize_link(&page(), &page(), "https://[::1").unwrap_err();
        assert!(matches!(err, CrawlError::LinkParse { .. }));
        assert!(!err.is_fatal());
    }
}
