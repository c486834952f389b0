use crate::fetcher::ContentFetcher;
use crate::parser::FeedParser;
use crate::types::{
    Article, ArticleRef, FeedEntry, MediaSource, PotentialGuest, ScanReport, SignalExtractor,
    TopicCount,
};
use crate::utils::{
    text::truncate_chars,
    time::hours_ago,
    url::{is_fetchable, resolve_link},
};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const MAX_REPORT_ARTICLES: usize = 50;
pub const MAX_REPORT_TOPICS: usize = 10;
pub const MAX_REPORT_GUESTS: usize = 10;
/// A guest must be quoted at least this often within one scan.
pub const MIN_GUEST_MENTIONS: usize = 2;
const GUEST_SAMPLES: usize = 3;

/// Pulls every configured feed and turns AI-related entries into articles.
pub struct ArticleCollector {
    sources: Vec<MediaSource>,
    fetcher: Arc<ContentFetcher>,
    extractor: Arc<dyn SignalExtractor>,
}

impl ArticleCollector {
    pub fn new(
        sources: Vec<MediaSource>,
        fetcher: Arc<ContentFetcher>,
        extractor: Arc<dyn SignalExtractor>,
    ) -> Self {
        Self {
            sources,
            fetcher,
            extractor,
        }
    }

    /// Scan all sources and summarize the result.
    pub async fn scan(&self, hours_back: u32) -> ScanReport {
        let articles = self.collect(hours_back).await;
        summarize(articles, hours_back)
    }

    /// All AI-related articles published within the last `hours_back` hours,
    /// deduplicated by URL. Sources are visited one at a time.
    pub async fn collect(&self, hours_back: u32) -> Vec<Article> {
        let since = hours_ago(hours_back);
        let delay = Duration::from_millis(self.fetcher.config().source_delay_ms);

        let mut seen_urls = HashSet::new();
        let mut articles = Vec::new();

        let feed_sources: Vec<&MediaSource> = self.sources.iter().filter(|s| s.rss_url.is_some()).collect();
        info!("Scanning {} media sources ({}h window)", feed_sources.len(), hours_back);

        for (index, source) in feed_sources.into_iter().enumerate() {
            if index > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            for article in self.collect_source(source, since).await {
                if seen_urls.insert(article.url.clone()) {
                    articles.push(article);
                } else {
                    debug!("Skipping duplicate article {}", article.url);
                }
            }
        }

        info!("Collected {} AI articles", articles.len());
        articles
    }

    async fn collect_source(&self, source: &MediaSource, since: DateTime<Utc>) -> Vec<Article> {
        let Some(feed_url) = source.rss_url.as_deref() else {
            return Vec::new();
        };

        let config = self.fetcher.config();
        let Some(raw_feed) = self.fetcher.fetch_with_retry(feed_url, config.max_retries).await else {
            warn!("No feed content for {} ({})", source.name, feed_url);
            return Vec::new();
        };

        let feed = match FeedParser::parse_feed(raw_feed.as_bytes()) {
            Ok(feed) => feed,
            Err(e) => {
                warn!("Skipping malformed feed of {}: {}", source.name, e);
                return Vec::new();
            }
        };

        let mut articles = Vec::new();
        for entry in feed.entries.into_iter().take(config.max_entries_per_source) {
            if let Some(article) = self.parse_article(entry, source, since).await {
                articles.push(article);
            }
        }

        info!("{}: {} AI articles in window", source.name, articles.len());
        articles
    }

    /// Build an article from a feed entry, or `None` when the entry is not
    /// about AI or falls outside the window. Relative links are resolved
    /// against the source's site; a link that still cannot be fetched leaves
    /// the content empty.
    pub(crate) async fn parse_article(
        &self,
        entry: FeedEntry,
        source: &MediaSource,
        since: DateTime<Utc>,
    ) -> Option<Article> {
        let headline = match entry.summary.as_deref() {
            Some(summary) => format!("{} {}", entry.title, summary),
            None => entry.title.clone(),
        };

        if !self.extractor.is_ai_related(&headline) {
            debug!("Not AI related: {}", entry.title);
            return None;
        }

        let published_at = entry.published_at.unwrap_or_else(Utc::now);
        if published_at < since {
            debug!("Outside scan window: {} ({})", entry.title, published_at);
            return None;
        }

        let link = resolve_link(&source.url, &entry.link);
        let content = if is_fetchable(&link) {
            self.fetcher.fetch_article_content(&link).await
        } else {
            warn!("Not fetching unusable link {:?} of {}", entry.link, source.name);
            None
        };

        let full_text = format!(
            "{} {}",
            entry.title,
            content.as_deref().or(entry.summary.as_deref()).unwrap_or("")
        );
        let ai_topics = self.extractor.extract_topics(&full_text);
        let quoted_experts = content
            .as_deref()
            .map(|body| self.extractor.extract_quotes(body))
            .unwrap_or_default();

        let max_chars = self.fetcher.config().max_content_chars;

        Some(Article {
            title: entry.title,
            url: link,
            source: source.name.clone(),
            published_at,
            content: content.map(|body| truncate_chars(&body, max_chars)),
            summary: entry.summary,
            mentions_ai: true,
            ai_topics,
            quoted_experts,
        })
    }
}

/// Topic and guest counters over the full article set; the article list itself is capped.
pub fn summarize(articles: Vec<Article>, hours_back: u32) -> ScanReport {
    let trending_topics = count_topics(&articles);
    let potential_guests = count_guests(&articles);
    let total_articles = articles.len();

    let mut articles = articles;
    articles.truncate(MAX_REPORT_ARTICLES);

    ScanReport {
        scan_date: Utc::now(),
        hours_scanned: hours_back,
        total_articles,
        articles,
        trending_topics,
        potential_guests,
    }
}

fn count_topics(articles: &[Article]) -> Vec<TopicCount> {
    let mut counts: Vec<TopicCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for topic in articles.iter().flat_map(|a| a.ai_topics.iter()) {
        match index.get(topic.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(topic, counts.len());
                counts.push(TopicCount {
                    topic: topic.clone(),
                    count: 1,
                });
            }
        }
    }

    // Stable: equal counts keep first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(MAX_REPORT_TOPICS);
    counts
}

fn count_guests(articles: &[Article]) -> Vec<PotentialGuest> {
    let mut guests: Vec<PotentialGuest> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for article in articles {
        for expert in &article.quoted_experts {
            let i = *index.entry(expert.name.as_str()).or_insert_with(|| {
                guests.push(PotentialGuest {
                    name: expert.name.clone(),
                    mentions: 0,
                    recent_quotes: Vec::new(),
                    articles: Vec::new(),
                });
                guests.len() - 1
            });

            let guest = &mut guests[i];
            guest.mentions += 1;
            if guest.recent_quotes.len() < GUEST_SAMPLES {
                guest.recent_quotes.push(expert.quote.clone());
            }
            if guest.articles.len() < GUEST_SAMPLES {
                guest.articles.push(ArticleRef::from(article));
            }
        }
    }

    guests.sort_by(|a, b| b.mentions.cmp(&a.mentions));
    guests.truncate(MAX_REPORT_GUESTS);
    guests.retain(|g| g.mentions >= MIN_GUEST_MENTIONS);
    guests
}
