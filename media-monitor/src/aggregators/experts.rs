use crate::types::{Article, Expert};
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

pub const MAX_EXPERTS: usize = 20;
pub const MAX_EXPERT_ARTICLES: usize = 5;

const SEARCH_HINT: &str = "LinkedIn zoeken op naam + AI";

struct ExpertBucket<'a> {
    name: &'a str,
    quotes: usize,
    articles: Vec<&'a Article>,
    topics: BTreeSet<String>,
    organization: Option<String>,
}

pub struct ExpertAggregator;

impl ExpertAggregator {
    /// Experts quoted at least `min_quotes` times, most quoted first.
    ///
    /// With a `topic`, only articles tagged with that exact topic are considered.
    pub fn experts(articles: &[Article], topic: Option<&str>, min_quotes: usize) -> Vec<Expert> {
        let mut buckets: Vec<ExpertBucket> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut affiliations: HashMap<&str, Option<Regex>> = HashMap::new();

        let selected = articles
            .iter()
            .filter(|a| topic.map_or(true, |t| a.ai_topics.iter().any(|at| at == t)));

        for article in selected {
            for quoted in &article.quoted_experts {
                let name = quoted.name.as_str();
                let i = *index.entry(name).or_insert_with(|| {
                    buckets.push(ExpertBucket {
                        name,
                        quotes: 0,
                        articles: Vec::new(),
                        topics: BTreeSet::new(),
                        organization: None,
                    });
                    buckets.len() - 1
                });

                let bucket = &mut buckets[i];
                bucket.quotes += 1;
                bucket.articles.push(article);
                bucket.topics.extend(article.ai_topics.iter().cloned());

                if bucket.organization.is_none() {
                    let pattern = affiliations.entry(name).or_insert_with(|| affiliation_pattern(name));
                    if let Some(pattern) = pattern {
                        bucket.organization = find_organization(pattern, article);
                    }
                }
            }
        }

        let mut experts: Vec<Expert> = buckets
            .into_iter()
            .filter(|b| b.quotes >= min_quotes)
            .map(|b| {
                let mut contact_hints = Vec::new();
                if let Some(org) = &b.organization {
                    contact_hints.push(format!("Via {}", org));
                }
                contact_hints.push(SEARCH_HINT.to_string());

                Expert {
                    name: b.name.to_string(),
                    organization: b.organization,
                    expertise: b.topics,
                    recent_quotes: b.quotes,
                    articles: b.articles.into_iter().take(MAX_EXPERT_ARTICLES).cloned().collect(),
                    contact_hints,
                }
            })
            .collect();

        experts.sort_by(|a, b| b.recent_quotes.cmp(&a.recent_quotes));
        experts.truncate(MAX_EXPERTS);

        debug!("Identified {} experts", experts.len());
        experts
    }
}

/// `<name>, bij Organisatie` and similar role cues, capturing the capitalized words that follow.
fn affiliation_pattern(name: &str) -> Option<Regex> {
    let pattern = format!(
        r"{}[,\s]+(?:van|bij|CEO|CTO|directeur|professor|hoogleraar)\s+([A-Z][a-zA-Z]*(?:[ \t]+[A-Z][a-zA-Z]*)*)",
        regex::escape(name)
    );

    match Regex::new(&pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!("No affiliation pattern for {:?}: {}", name, e);
            None
        }
    }
}

fn find_organization(pattern: &Regex, article: &Article) -> Option<String> {
    let text = article
        .content
        .as_deref()
        .filter(|c| !c.is_empty())
        .or(article.summary.as_deref())?;

    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|org| !org.is_empty())
}
