use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A quote attributed to a named person inside an article body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotedExpert {
    pub name: String,
    pub quote: String,
}

/// An AI-related news article. `url` is the identity key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub mentions_ai: bool,
    pub ai_topics: Vec<String>,
    pub quoted_experts: Vec<QuotedExpert>,
}

impl Article {
    /// Title and summary joined, the text used for relevance scoring.
    pub fn headline_text(&self) -> String {
        match self.summary.as_deref() {
            Some(summary) => format!("{} {}", self.title, summary),
            None => self.title.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSource {
    pub name: String,
    pub url: String,
    #[serde(default, alias = "rss")]
    pub rss_url: Option<String>,
    #[serde(default)]
    pub categories: BTreeSet<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaywallService {
    #[serde(alias = "url")]
    pub base_url: String,
    #[serde(default = "default_http_method", alias = "method")]
    pub http_method: String,
    /// Lower is tried first.
    #[serde(default = "default_priority")]
    pub priority: i32,
}

fn default_http_method() -> String {
    "GET".to_owned()
}

fn default_priority() -> i32 {
    1
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrendingTopic {
    pub topic: String,
    pub mentions: usize,
    pub sources: BTreeSet<String>,
    pub sentiment: Sentiment,
    /// Most recent first, at most five.
    pub key_articles: Vec<Article>,
    pub suggested_angle: Option<String>,
    /// Always unset: no historical baseline is kept.
    pub growth_percentage: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Expert {
    pub name: String,
    pub organization: Option<String>,
    pub expertise: BTreeSet<String>,
    pub recent_quotes: usize,
    pub articles: Vec<Article>,
    pub contact_hints: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TopicSuggestion {
    pub topic: String,
    pub relevance_score: f64,
    pub reason: String,
    pub potential_guests: Vec<Expert>,
    pub unique_angle: String,
    pub questions: Vec<String>,
}

// Object style note:
// Extractors are pure over their input text. Any keyword tables they need
// are compiled once at construction and never mutated afterwards, so one
// instance can be shared behind an `Arc` by every stage of a scan.

/// Heuristic text signals. Swapping this for a stronger model must not
/// require touching collection or aggregation code.
pub trait SignalExtractor: Send + Sync {
    fn is_ai_related(&self, text: &str) -> bool;
    fn extract_topics(&self, text: &str) -> Vec<String>;
    fn extract_quotes(&self, text: &str) -> Vec<QuotedExpert>;
}
