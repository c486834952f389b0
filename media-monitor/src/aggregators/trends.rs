use crate::config::{MonitorConfig, TopicPattern};
use crate::types::{Article, Sentiment, TrendingTopic};
use crate::utils::text::count_present;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

pub const MAX_KEY_ARTICLES: usize = 5;

const KEYWORD_POINTS: u32 = 2;
const TITLE_POINTS: u32 = 3;

const POSITIVE_WORDS: [&str; 5] = ["succes", "doorbraak", "innovatie", "verbetering", "kans"];
const NEGATIVE_WORDS: [&str; 5] = ["risico", "gevaar", "probleem", "zorgen", "kritiek"];

/// Groups articles into trending topics, each article counted under exactly one topic.
pub struct TrendAggregator {
    relevance_keywords: HashMap<String, Vec<String>>,
}

impl TrendAggregator {
    pub fn new(relevance_keywords: &[TopicPattern]) -> Self {
        let relevance_keywords = relevance_keywords
            .iter()
            .map(|topic| {
                (
                    topic.label.clone(),
                    topic.keywords.iter().map(|k| k.to_lowercase()).collect(),
                )
            })
            .collect();

        Self { relevance_keywords }
    }

    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::new(&config.relevance_keywords)
    }

    /// +2 per topic keyword in title and summary, +3 when the label itself is in the title.
    pub fn relevance_score(&self, article: &Article, topic: &str) -> u32 {
        let text = article.headline_text().to_lowercase();

        let keyword_hits = self
            .relevance_keywords
            .get(topic)
            .map(|keywords| keywords.iter().filter(|k| text.contains(k.as_str())).count())
            .unwrap_or(0) as u32;

        let mut score = keyword_hits * KEYWORD_POINTS;
        if article.title.to_lowercase().contains(&topic.to_lowercase()) {
            score += TITLE_POINTS;
        }
        score
    }

    /// Highest scoring candidate topic; ties and all-zero scores go to the
    /// earliest candidate in the article's topic list.
    pub fn best_topic<'a>(&self, article: &'a Article, categories: Option<&[String]>) -> Option<&'a str> {
        let mut candidates = article
            .ai_topics
            .iter()
            .map(String::as_str)
            .filter(|topic| categories.map_or(true, |c| c.iter().any(|wanted| wanted.as_str() == *topic)))
            .peekable();

        let first = *candidates.peek()?;

        let mut best: Option<(&str, u32)> = None;
        for topic in candidates {
            let score = self.relevance_score(article, topic);
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((topic, score));
            }
        }

        Some(best.map_or(first, |(topic, _)| topic))
    }

    /// Topics with at least `min_mentions` attributed articles, most mentioned first.
    pub fn trending_topics(
        &self,
        articles: &[Article],
        min_mentions: usize,
        categories: Option<&[String]>,
    ) -> Vec<TrendingTopic> {
        let mut buckets: Vec<(&str, Vec<&Article>)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for article in articles {
            let Some(topic) = self.best_topic(article, categories) else {
                continue;
            };

            match index.get(topic) {
                Some(&i) => buckets[i].1.push(article),
                None => {
                    index.insert(topic, buckets.len());
                    buckets.push((topic, vec![article]));
                }
            }
        }

        let mut trending: Vec<TrendingTopic> = buckets
            .into_iter()
            .filter(|(_, bucket)| bucket.len() >= min_mentions)
            .map(|(topic, mut bucket)| {
                bucket.sort_by(|a, b| b.published_at.cmp(&a.published_at));

                let sources: BTreeSet<String> = bucket.iter().map(|a| a.source.clone()).collect();
                let sentiment = sentiment_of(&bucket);

                debug!("Topic {}: {} articles, {:?}", topic, bucket.len(), sentiment);

                TrendingTopic {
                    topic: topic.to_string(),
                    mentions: bucket.len(),
                    sources,
                    sentiment,
                    key_articles: bucket.iter().take(MAX_KEY_ARTICLES).map(|a| (*a).clone()).collect(),
                    suggested_angle: Some(suggested_angle(topic)),
                    growth_percentage: None,
                }
            })
            .collect();

        trending.sort_by(|a, b| b.mentions.cmp(&a.mentions));
        trending
    }
}

/// Net count of positive minus negative words over titles and summaries.
pub fn sentiment_of(articles: &[&Article]) -> Sentiment {
    let net: i64 = articles
        .iter()
        .map(|article| {
            let text = article.headline_text().to_lowercase();
            count_present(&text, &POSITIVE_WORDS) as i64 - count_present(&text, &NEGATIVE_WORDS) as i64
        })
        .sum();

    match net {
        n if n > 0 => Sentiment::Positive,
        n if n < 0 => Sentiment::Negative,
        _ => Sentiment::Neutral,
    }
}

pub fn suggested_angle(topic: &str) -> String {
    let lower = topic.to_lowercase();
    if lower.contains("privacy") {
        "Praktische oplossingen voor privacy-uitdagingen".to_string()
    } else if lower.contains("zorg") {
        "Succesverhalen uit Nederlandse ziekenhuizen".to_string()
    } else if lower.contains("wetgeving") {
        "Wat betekent nieuwe regelgeving voor jouw organisatie?".to_string()
    } else {
        format!("De realiteit achter {} in Nederland", topic)
    }
}
