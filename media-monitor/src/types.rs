use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
// Shared data model lives in the interfaces crate
pub use interfaces::defs::{
    Article, Expert, MediaSource, PaywallService, QuotedExpert, Sentiment, SignalExtractor,
    TopicSuggestion, TrendingTopic,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
    pub max_redirects: usize,
    /// Pause between two media sources during a scan.
    pub source_delay_ms: u64,
    pub max_entries_per_source: usize,
    pub max_content_chars: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; AI-Media-Monitor/1.0)".to_string(),
            timeout_seconds: 30,
            max_retries: 3,
            retry_delay_seconds: 1,
            max_redirects: 5,
            source_delay_ms: 500,
            max_entries_per_source: 20,
            max_content_chars: 5000,
        }
    }
}

/// One entry of a parsed RSS/Atom feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub summary: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub entries: Vec<FeedEntry>,
}

/// Title and visible text of an HTML page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageText {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicCount {
    pub topic: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRef {
    pub title: String,
    pub source: String,
    pub url: String,
}

impl From<&Article> for ArticleRef {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            source: article.source.clone(),
            url: article.url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PotentialGuest {
    pub name: String,
    pub mentions: usize,
    pub recent_quotes: Vec<String>,
    pub articles: Vec<ArticleRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub scan_date: DateTime<Utc>,
    pub hours_scanned: u32,
    pub total_articles: usize,
    pub articles: Vec<Article>,
    pub trending_topics: Vec<TopicCount>,
    pub potential_guests: Vec<PotentialGuest>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOutcome {
    pub inserted: usize,
    pub duplicates: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub earliest: Option<DateTime<Utc>>,
    pub latest: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreInfo {
    pub total_count: i64,
    pub date_range: DateRange,
    pub per_source_counts: HashMap<String, i64>,
}

/// Result of analysing a single article URL on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleAnalysis {
    pub url: String,
    pub fetch_successful: bool,
    pub title: Option<String>,
    pub content_preview: Option<String>,
    pub is_ai_related: bool,
    pub ai_topics: Vec<String>,
    pub quoted_experts: Vec<QuotedExpert>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportHighlights {
    pub top_trending_topic: Option<TrendingTopic>,
    pub most_quoted_expert: Option<Expert>,
    pub best_topic_suggestion: Option<TopicSuggestion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStatistics {
    pub trending_topics_count: usize,
    pub identified_experts_count: usize,
    pub topic_suggestions_count: usize,
}

/// Week overview for podcast planning: the best of each list plus the full lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub report_date: DateTime<Utc>,
    /// ISO week of `report_date`.
    pub week_number: u32,
    pub highlights: ReportHighlights,
    pub statistics: ReportStatistics,
    pub trends: Vec<TrendingTopic>,
    pub experts: Vec<Expert>,
    pub suggestions: Vec<TopicSuggestion>,
}

impl WeeklyReport {
    pub fn new(
        report_date: DateTime<Utc>,
        trends: Vec<TrendingTopic>,
        experts: Vec<Expert>,
        suggestions: Vec<TopicSuggestion>,
    ) -> Self {
        Self {
            report_date,
            week_number: report_date.iso_week().week(),
            highlights: ReportHighlights {
                top_trending_topic: trends.first().cloned(),
                most_quoted_expert: experts.first().cloned(),
                best_topic_suggestion: suggestions.first().cloned(),
            },
            statistics: ReportStatistics {
                trending_topics_count: trends.len(),
                identified_experts_count: experts.len(),
                topic_suggestions_count: suggestions.len(),
            },
            trends,
            experts,
            suggestions,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, MonitorError>;
