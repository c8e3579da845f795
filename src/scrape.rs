// src/scrape.rs
// =============================================================================
// This module extracts crawlable routes from rendered HTML.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// The matched grammar is deliberately narrow. A href is a route when it:
// - starts with '/' (same-origin, absolute path)
// - contains only path-safe characters: ASCII letters, digits, '/', '-', '_'
//
// Everything else (external URLs, `#fragments`, `?query=strings`, relative
// links, mailto:) silently fails the pattern and is skipped. Don't widen
// this grammar without also updating the route -> file path mapping in
// src/snapshot.rs: the two contracts move together.
//
// Rust concepts:
// - Pure functions: same input, same output, no side effects
// - Iterators and pattern guards for filtering
// =============================================================================

use scraper::{Html, Selector};

// Extracts candidate routes from a rendered document
//
// Parameters:
//   document: the fully rendered page markup
//
// Returns: deduplicated routes in first-seen order, with the leading
// slash stripped (so "/about" becomes "about" and "/" becomes "")
//
// If the page has no matching anchors at all we return vec![""] - the
// root route - so a crawl never stalls on a link-less page. (If the root
// itself has no links this is harmless: root is already in the visited
// set by the time its own extraction runs.)
pub fn parse_for_routes(document: &str) -> Vec<String> {
    let mut routes = Vec::new();

    // Parse the HTML into a document
    let html = Html::parse_document(document);

    // Create a CSS selector to find all <a> tags with an href.
    // The selector is a constant and known to be valid, so unwrap() is
    // safe here (a failure would be a programmer error)
    let selector = Selector::parse("a[href]").unwrap();

    for element in html.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if !is_route_href(href) {
            continue;
        }

        // Strip the leading slash to get the route
        let route = href[1..].to_string();

        // Dedup at the source, preserving first-seen order
        if !routes.contains(&route) {
            routes.push(route);
        }
    }

    // Fallback: no discoverable links means "just the root"
    if routes.is_empty() {
        routes.push(String::new());
    }

    routes
}

// Checks whether a href value is a same-origin, path-only route link.
//
// Accepted:  "/", "/about", "/blog/post-1", "/docs/api_v2"
// Rejected:  "about" (relative), "https://other.com" (external),
//            "/search?q=x" (query), "/docs#intro" (fragment)
fn is_route_href(href: &str) -> bool {
    let Some(rest) = href.strip_prefix('/') else {
        return false;
    };

    rest.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '/' || c == '-' || c == '_')
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why parse HTML instead of regex-matching href= in the raw text?
//    - href attributes appear on <link>, <area>, <base>... not just <a>
//    - scraper gives us a real DOM, so "a[href]" means exactly what it says
//    - The browser already normalized the markup before we see it
//
// 2. Why strip the leading slash?
//    - Routes are stored relative to the site root ("" = the root)
//    - That makes the file mapping trivial: route + ".html"
//
// 3. What is let-else?
//    - `let Some(x) = expr else { continue; }` binds on the happy path
//      and diverges otherwise - a flatter alternative to if-let nesting
//
// 4. Why return [""] instead of an empty Vec?
//    - An empty result would read as "this page links nowhere", which is
//      true - but callers treat the list as "places worth visiting", and
//      the root is always worth having visited at least once
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_routes() {
        let html = r#"<a href="/about">About</a> <a href="/blog/post-1">Post</a>"#;
        assert_eq!(parse_for_routes(html), vec!["about", "blog/post-1"]);
    }

    #[test]
    fn test_root_href_maps_to_empty_route() {
        let html = r#"<a href="/">Home</a>"#;
        assert_eq!(parse_for_routes(html), vec![""]);
    }

    #[test]
    fn test_no_links_falls_back_to_root() {
        let html = "<html><body><p>Nothing to see here</p></body></html>";
        assert_eq!(parse_for_routes(html), vec![""]);
    }

    #[test]
    fn test_skips_external_and_relative_links() {
        let html = r#"
            <a href="https://example.com/about">External</a>
            <a href="about">Relative</a>
            <a href="mailto:hi@example.com">Email</a>
            <a href="/contact">Contact</a>
        "#;
        assert_eq!(parse_for_routes(html), vec!["contact"]);
    }

    #[test]
    fn test_skips_fragments_and_queries() {
        let html = r#"
            <a href="/docs#intro">Fragment</a>
            <a href="/search?q=rust">Query</a>
            <a href="/docs">Docs</a>
        "#;
        assert_eq!(parse_for_routes(html), vec!["docs"]);
    }

    #[test]
    fn test_underscores_and_dashes_are_path_safe() {
        let html = r#"<a href="/docs/api_v2">API</a> <a href="/blog-archive">Archive</a>"#;
        assert_eq!(parse_for_routes(html), vec!["docs/api_v2", "blog-archive"]);
    }

    #[test]
    fn test_dedups_at_source_preserving_order() {
        let html = r#"
            <a href="/b">B</a>
            <a href="/a">A</a>
            <a href="/b">B again</a>
        "#;
        assert_eq!(parse_for_routes(html), vec!["b", "a"]);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let html = r#"<a href="/x">X</a> <a href="/y">Y</a> <a href="/x">X</a>"#;
        assert_eq!(parse_for_routes(html), parse_for_routes(html));
    }

    #[test]
    fn test_ignores_href_on_non_anchor_elements() {
        // Only <a> tags count; a <link href="/manifest"> is not a route
        let html = r#"<link href="/manifest"><a href="/home">Home</a>"#;
        assert_eq!(parse_for_routes(html), vec!["home"]);
    }
}
