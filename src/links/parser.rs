// src/links/parser.rs
// =============================================================================
// This module extracts links from HTML documents.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser), so broken markup still
//   produces a usable tree
//
// For each <a href="..."> we keep:
// - the raw href, exactly as written (resolving it is the crawler's job)
// - the text of the anchor's direct text children, trimmed and joined
// =============================================================================

use anyhow::{Context, Result};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::path::Path;

// A hyperlink found in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// The href attribute value, unresolved
    pub href: String,
    /// Visible text directly inside the <a> element
    pub text: String,
}

// Extracts every <a> element that has an href, in document order
//
// Parameters:
//   html: the HTML content to parse
//
// Returns: Vec<Link>, empty if the document has no links
//
// Example:
//   html = "<a href='/dog'>  A dog  </a>"
//   result = [Link { href: "/dog", text: "A dog" }]
pub fn extract_links(html: &str) -> Vec<Link> {
    let document = Html::parse_document(html);

    // "a[href]" is a constant selector known to be valid, so unwrap can't fire
    let selector = Selector::parse("a[href]").unwrap();

    document
        .select(&selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            Some(Link {
                href: href.to_string(),
                text: anchor_text(element),
            })
        })
        .collect()
}

// Reads an HTML file from disk and extracts its links
pub fn parse_file(path: &Path) -> Result<Vec<Link>> {
    let html = std::fs::read_to_string(path)
        .with_context(|| format!("error reading file {}", path.display()))?;
    Ok(extract_links(&html))
}

// Joins the direct text-node children of an anchor.
// Text inside nested elements (<strong>, <span>) and comments is not included.
fn anchor_text(element: ElementRef) -> String {
    let mut text = String::new();

    for child in element.children() {
        if let Some(node) = child.value().as_text() {
            let piece = node.trim().replace("  ", " ");
            text.push_str(&piece);
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_extract_links_in_document_order() {
        let html = r#"
            <html><body>
              <h1>Hello!</h1>
              <a href="/other-page">A link to another page</a>
              <p>Some text</p>
              <a href="/bob">Bob's page</a>
            </body></html>
        "#;
        let links = extract_links(html);
        assert_eq!(
            links,
            vec![
                Link { href: "/other-page".to_string(), text: "A link to another page".to_string() },
                Link { href: "/bob".to_string(), text: "Bob's page".to_string() },
            ]
        );
    }

    #[test]
    fn test_text_is_trimmed() {
        let html = "<a href=\"#\">\n      Login\n    </a>";
        let links = extract_links(html);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].href, "#");
        assert_eq!(links[0].text, "Login");
    }

    #[test]
    fn test_comments_are_not_text() {
        let html = r#"<a href="/dog-cat">dog cat <!-- commented text SHOULD NOT be included! --></a>"#;
        let links = extract_links(html);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].text, "dog cat");
    }

    #[test]
    fn test_nested_element_text_is_skipped() {
        let html = r#"<a href="https://github.com/gophercises">Gophercises is on <strong>Github</strong>!</a>"#;
        let links = extract_links(html);
        assert_eq!(links[0].text, "Gophercises is on!");
    }

    #[test]
    fn test_double_spaces_collapse() {
        let html = r#"<a href="/x">two  spaces</a>"#;
        let links = extract_links(html);
        assert_eq!(links[0].text, "two spaces");
    }

    #[test]
    fn test_anchor_without_href_is_skipped() {
        let html = r#"<a name="top">Top</a><a href="/a">A</a>"#;
        let links = extract_links(html);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].href, "/a");
    }

    #[test]
    fn test_no_links() {
        assert!(extract_links("<p>nothing to see</p>").is_empty());
    }

    #[test]
    fn test_parse_file() {
        let path = std::env::temp_dir().join(format!("site-map-links-{}.html", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, r#"<a href="/from-file">From a file</a>"#).unwrap();
        drop(file);

        let links = parse_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].href, "/from-file");
        assert_eq!(links[0].text, "From a file");
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_file(Path::new("/definitely/not/here.html")).unwrap_err();
        assert!(err.to_string().contains("error reading file"));
    }
}
