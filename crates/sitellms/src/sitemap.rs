//! Sitemap discovery and traversal
//!
//! Discovery reads robots.txt `Sitemap:` directives with a conventional
//! `/sitemap.xml` fallback. Traversal expands sitemap indexes with an
//! explicit worklist and a visited set, so cyclic or duplicated
//! `<sitemap>` references terminate and adversarial index graphs cannot
//! blow the stack.

use crate::gateway::Gateway;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// A parsed sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapDoc {
    /// Sitemap index: entries point to other sitemap documents
    Index(Vec<String>),
    /// URL sitemap: entries are page URLs directly
    Pages(Vec<String>),
}

/// Discover candidate sitemap URLs for a site origin
///
/// Scans `{origin}/robots.txt` for `Sitemap:` directives (case-insensitive,
/// deduplicated, first-seen order). If the file is missing, unreachable, or
/// carries no directives, falls back to `{origin}/sitemap.xml`.
pub async fn discover_sitemaps(gateway: &Gateway, origin: &str) -> Vec<String> {
    let origin = origin.trim_end_matches('/');
    let robots_url = format!("{}/robots.txt", origin);

    let candidates = match gateway.fetch_text(&robots_url).await {
        Some(body) => sitemaps_from_robots(&body),
        None => Vec::new(),
    };

    if candidates.is_empty() {
        let fallback = format!("{}/sitemap.xml", origin);
        info!(sitemap = %fallback, "No robots.txt sitemap directives, using conventional path");
        vec![fallback]
    } else {
        info!(count = candidates.len(), "Found sitemap directives in robots.txt");
        candidates
    }
}

/// Extract `Sitemap:` directive values from robots.txt text
///
/// Everything after the first colon of a matching line is the value, so
/// scheme separators in the URL survive intact. Values are trimmed and
/// deduplicated preserving first-seen order.
pub fn sitemaps_from_robots(robots: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for line in robots.lines() {
        let line = line.trim();
        let Some((directive, value)) = line.split_once(':') else {
            continue;
        };
        if !directive.trim().eq_ignore_ascii_case("sitemap") {
            continue;
        }
        let value = value.trim();
        if !value.is_empty() && seen.insert(value.to_string()) {
            candidates.push(value.to_string());
        }
    }

    candidates
}

/// Recursively expand a sitemap into a deduplicated list of page URLs
///
/// Depth-first over sitemap indexes via an explicit worklist; a per-call
/// visited set guards against cycles and duplicate references. A fetch or
/// parse failure on any node yields zero URLs from that node without
/// aborting its siblings.
pub async fn extract_urls_from_sitemap(gateway: &Gateway, sitemap_url: &str) -> Vec<String> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut worklist = vec![sitemap_url.to_string()];
    let mut seen_pages: HashSet<String> = HashSet::new();
    let mut pages = Vec::new();

    while let Some(url) = worklist.pop() {
        if !visited.insert(url.clone()) {
            debug!(url = %url, "Sitemap already visited, skipping");
            continue;
        }

        let Some(xml) = gateway.fetch_text(&url).await else {
            warn!(url = %url, "Sitemap fetch failed, skipping node");
            continue;
        };

        match parse_sitemap(&xml) {
            Ok(SitemapDoc::Index(children)) => {
                debug!(url = %url, children = children.len(), "Expanding sitemap index");
                // Reverse push keeps the LIFO worklist in document order.
                for child in children.into_iter().rev() {
                    worklist.push(child);
                }
            }
            Ok(SitemapDoc::Pages(urls)) => {
                debug!(url = %url, pages = urls.len(), "Collected URL sitemap");
                for page in urls {
                    if seen_pages.insert(page.clone()) {
                        pages.push(page);
                    }
                }
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Sitemap parse failed, skipping node");
            }
        }
    }

    pages
}

/// Parse a sitemap XML document into an index or a URL set
///
/// A document whose root is `<sitemapindex>` yields the child
/// `<sitemap><loc>` values; anything else is treated as a URL set and
/// yields the `<url><loc>` values. Namespace prefixes are ignored.
pub fn parse_sitemap(xml: &str) -> Result<SitemapDoc, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut is_index = false;
    let mut in_entry = false;
    let mut in_loc = false;
    let mut locs = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"sitemapindex" => is_index = true,
                b"url" | b"sitemap" => in_entry = true,
                b"loc" if in_entry => in_loc = true,
                _ => {}
            },
            Ok(Event::Text(e)) if in_loc => {
                let loc = e.unescape()?.trim().to_string();
                if !loc.is_empty() {
                    locs.push(loc);
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"loc" => in_loc = false,
                b"url" | b"sitemap" => in_entry = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e),
            _ => {}
        }
        buf.clear();
    }

    if is_index {
        Ok(SitemapDoc::Index(locs))
    } else {
        Ok(SitemapDoc::Pages(locs))
    }
}
