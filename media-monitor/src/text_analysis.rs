//! Regex and keyword heuristics for AI relevance, topics and quoted experts.
//!
//! None of this is language understanding. The AI filter is a list of
//! word-bounded patterns, topics are plain substring tables, and quote
//! attribution relies on a capitalised name next to a Dutch reporting verb.

use crate::config::{MonitorConfig, TopicPattern};
use crate::types::{QuotedExpert, Result, SignalExtractor};
use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Names with more words than this are rejected as sentence fragments.
const MAX_NAME_WORDS: usize = 5;

/// Dutch articles; a "name" containing one is almost always a phrase like "het rapport".
const FILLER_WORDS: [&str; 3] = ["het", "de", "een"];

// Each pattern captures the quote including its quotation marks, so the
// quote group can be told apart from the name group by its first character.
const QUOTE_PATTERNS: [&str; 3] = [
    r#"("[^"]+")[,\s]*(?:zegt|aldus|volgens)\s+([A-Z][a-zA-Z\s\.]+?)(?:\.|,)"#,
    r#"([A-Z][a-zA-Z\s\.]+?)(?:\s+zegt|\s+stelt|\s+vindt)[:\s]*("[^"]+")"#,
    r#"Volgens\s+([A-Z][a-zA-Z\s\.]+?)[,\s]+("[^"]+")"#,
];

struct CompiledTopic {
    label: String,
    keywords: Vec<String>,
}

pub struct KeywordExtractor {
    ai_patterns: Vec<Regex>,
    topics: Vec<CompiledTopic>,
    quote_patterns: Vec<Regex>,
}

impl KeywordExtractor {
    pub fn new(ai_keywords: &[String], topic_patterns: &[TopicPattern]) -> Result<Self> {
        let ai_patterns = ai_keywords
            .iter()
            .map(|pattern| RegexBuilder::new(pattern).case_insensitive(true).build())
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let topics = topic_patterns
            .iter()
            .map(|topic| CompiledTopic {
                label: topic.label.clone(),
                keywords: topic.keywords.iter().map(|k| k.to_lowercase()).collect(),
            })
            .collect();

        let quote_patterns = QUOTE_PATTERNS
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            ai_patterns,
            topics,
            quote_patterns,
        })
    }

    pub fn from_config(config: &MonitorConfig) -> Result<Self> {
        Self::new(&config.ai_keywords, &config.topic_patterns)
    }
}

impl SignalExtractor for KeywordExtractor {
    fn is_ai_related(&self, text: &str) -> bool {
        self.ai_patterns.iter().any(|pattern| pattern.is_match(text))
    }

    fn extract_topics(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.topics
            .iter()
            .filter(|topic| topic.keywords.iter().any(|k| lower.contains(k.as_str())))
            .map(|topic| topic.label.clone())
            .collect()
    }

    fn extract_quotes(&self, text: &str) -> Vec<QuotedExpert> {
        let mut experts = Vec::new();

        for pattern in &self.quote_patterns {
            for captures in pattern.captures_iter(text) {
                let (Some(first), Some(second)) = (captures.get(1), captures.get(2)) else {
                    continue;
                };

                let (quote, name) = if first.as_str().starts_with('"') {
                    (first.as_str(), second.as_str())
                } else {
                    (second.as_str(), first.as_str())
                };

                let name = clean_name(name);
                if !is_plausible_name(&name) {
                    debug!("Discarding quote attribution to {:?}", name);
                    continue;
                }

                experts.push(QuotedExpert {
                    name,
                    quote: quote.trim_matches('"').to_string(),
                });
            }
        }

        experts
    }
}

fn clean_name(raw: &str) -> String {
    raw.trim().trim_end_matches(['.', ',']).trim_end().to_string()
}

fn is_plausible_name(name: &str) -> bool {
    let words: Vec<&str> = name.split_whitespace().collect();
    !words.is_empty()
        && words.len() <= MAX_NAME_WORDS
        && !words
            .iter()
            .any(|word| FILLER_WORDS.contains(&word.to_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_punctuation_is_trimmed_from_names() {
        assert_eq!(clean_name(" Dr. Tom Peters., "), "Dr. Tom Peters");
    }

    #[test]
    fn filler_words_reject_names() {
        assert!(!is_plausible_name("het rapport"));
        assert!(!is_plausible_name("Een woordvoerder"));
        assert!(is_plausible_name("Frederik Dekker"));
        assert!(!is_plausible_name("Een twee drie vier vijf zes"));
        assert!(!is_plausible_name("Anna Maria Johanna van Bergen Smit"));
    }
}
