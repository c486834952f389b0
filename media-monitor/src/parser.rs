use crate::types::{FeedEntry, MonitorError, PageText, ParsedFeed, Result};
use crate::utils::text::normalize_whitespace;
use feed_rs::parser;
use scraper::{Html, Selector};
use tracing::{debug, info};

const HIDDEN_ELEMENTS: [&str; 5] = ["script", "style", "noscript", "head", "title"];

pub struct FeedParser;

impl FeedParser {
    /// Parse RSS/Atom bytes into typed entries, in feed order.
    pub fn parse_feed(content: &[u8]) -> Result<ParsedFeed> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content)
            .map_err(|e| MonitorError::Parse(format!("Failed to parse feed: {}", e)))?;

        let title = feed.title.map(|t| t.content);
        let entries: Vec<FeedEntry> = feed.entries.into_iter().filter_map(Self::parse_entry).collect();

        info!("Parsed feed with {} entries", entries.len());

        Ok(ParsedFeed { title, entries })
    }

    fn parse_entry(entry: feed_rs::model::Entry) -> Option<FeedEntry> {
        let link = entry.links.first()?.href.clone();

        let title = entry.title.map(|t| t.content).unwrap_or_default();
        let summary = entry.summary.map(|s| s.content).filter(|s| !s.is_empty());

        // Fall back to the update date; the collector uses "now" when both are missing
        let published_at = entry.published.or(entry.updated);

        Some(FeedEntry {
            title,
            link,
            summary,
            published_at,
        })
    }

    /// Title (first `<h1>`, else `<title>`) and visible text of an HTML page.
    pub fn parse_page(html: &str) -> Result<PageText> {
        let document = Html::parse_document(html);

        let h1 = selector("h1")?;
        let title_tag = selector("title")?;

        let title = document
            .select(&h1)
            .next()
            .or_else(|| document.select(&title_tag).next())
            .map(|element| normalize_whitespace(&element.text().collect::<Vec<_>>().join(" ")))
            .unwrap_or_default();

        let mut parts = Vec::new();
        for node in document.root_element().descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };

            let hidden = node
                .parent()
                .and_then(|parent| parent.value().as_element().map(|e| e.name().to_string()))
                .map(|name| HIDDEN_ELEMENTS.contains(&name.as_str()))
                .unwrap_or(false);

            if !hidden && !text.trim().is_empty() {
                parts.push(text.trim().to_string());
            }
        }

        Ok(PageText {
            title,
            text: normalize_whitespace(&parts.join(" ")),
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| MonitorError::Parse(format!("Invalid selector {}: {}", css, e)))
}
