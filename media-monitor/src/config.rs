use crate::types::{FetchConfig, MediaSource, MonitorError, PaywallService, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/articles.db";

/// A topic label with the keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicPattern {
    pub label: String,
    pub keywords: Vec<String>,
}

impl TopicPattern {
    pub fn new(label: &str, keywords: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Everything the monitor needs, passed explicitly to each component.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub media_sources: Vec<MediaSource>,
    pub paywall_services: Vec<PaywallService>,
    pub fetch: FetchConfig,
    pub ai_keywords: Vec<String>,
    pub topic_patterns: Vec<TopicPattern>,
    pub relevance_keywords: Vec<TopicPattern>,
    pub database_url: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            media_sources: default_media_sources(),
            paywall_services: default_paywall_services(),
            fetch: FetchConfig::default(),
            ai_keywords: default_ai_keywords(),
            topic_patterns: default_topic_patterns(),
            relevance_keywords: default_relevance_keywords(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

impl MonitorConfig {
    /// Load from a JSON file. A missing or unreadable file yields the defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_from_json_file(path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Using default configuration, could not load {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn try_from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| MonitorError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Sources that publish a feed.
    pub fn feed_sources(&self) -> impl Iterator<Item = &MediaSource> {
        self.media_sources.iter().filter(|s| s.rss_url.is_some())
    }
}

fn source(name: &str, url: &str, rss: Option<&str>, category: &str) -> MediaSource {
    MediaSource {
        name: name.to_string(),
        url: url.to_string(),
        rss_url: rss.map(|r| r.to_string()),
        categories: [category.to_string()].into_iter().collect(),
    }
}

pub fn default_media_sources() -> Vec<MediaSource> {
    vec![
        source("NRC", "https://www.nrc.nl", Some("https://www.nrc.nl/rss/"), "newspapers"),
        source(
            "Volkskrant",
            "https://www.volkskrant.nl",
            Some("https://www.volkskrant.nl/voorpagina/rss.xml"),
            "newspapers",
        ),
        source("FD", "https://fd.nl", Some("https://fd.nl/rss"), "newspapers"),
        source("Telegraaf", "https://www.telegraaf.nl", Some("https://www.telegraaf.nl/rss"), "newspapers"),
        source("AD", "https://www.ad.nl", Some("https://www.ad.nl/tech/rss.xml"), "newspapers"),
        source("Trouw", "https://www.trouw.nl", Some("https://www.trouw.nl/cs-b7d0a82a.xml"), "newspapers"),
        source(
            "Computable",
            "https://www.computable.nl",
            Some("https://www.computable.nl/rss/nieuws.xml"),
            "trade_publications",
        ),
        source("AG Connect", "https://www.agconnect.nl", None, "trade_publications"),
        source("MT/Sprout", "https://www.mt.nl", Some("https://www.mt.nl/feed"), "trade_publications"),
        source("Emerce", "https://www.emerce.nl", Some("https://www.emerce.nl/feed"), "trade_publications"),
        source("Tweakers", "https://tweakers.net", Some("https://feeds.feedburner.com/tweakers/mixed"), "tech_media"),
        source("Bright", "https://www.bright.nl", Some("https://www.bright.nl/rss"), "tech_media"),
        source("Dutch IT Channel", "https://dutchitchannel.nl", Some("https://dutchitchannel.nl/feed"), "tech_media"),
        source("NU.nl", "https://www.nu.nl", Some("https://www.nu.nl/rss/Tech"), "news_sites"),
        source("RTL Nieuws", "https://www.rtlnieuws.nl", Some("https://www.rtlnieuws.nl/rss.xml"), "news_sites"),
        source("NOS", "https://nos.nl", Some("https://feeds.nos.nl/nosnieuwstech"), "news_sites"),
    ]
}

pub fn default_paywall_services() -> Vec<PaywallService> {
    [
        ("https://archive.ph", "POST", 1),
        ("https://1ft.io", "GET", 2),
        ("https://12ft.io", "GET", 3),
        ("https://web.archive.org/save", "GET", 4),
    ]
    .into_iter()
    .map(|(base_url, method, priority)| PaywallService {
        base_url: base_url.to_string(),
        http_method: method.to_string(),
        priority,
    })
    .collect()
}

pub fn default_ai_keywords() -> Vec<String> {
    [
        r"\bAI\b",
        r"\bartifici[eë]le intelligentie\b",
        r"\bartificial intelligence\b",
        r"\bkunstmatige intelligentie\b",
        r"\bmachine learning\b",
        r"\bdeep learning\b",
        r"\balgoritm(e|es|en)\b",
        r"\balgorithms?\b",
        r"\bChatGPT\b",
        r"\bGPT\b",
        r"\bLLM\b",
        r"\blarge language models?\b",
        r"\bneurale? net\w*\b",
        r"\bdata scien\w*\b",
        r"\bautomatis\w*\b",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}

pub fn default_topic_patterns() -> Vec<TopicPattern> {
    vec![
        TopicPattern::new("AI in de zorg", &["zorg", "gezondheid", "ziekenhuis", "patient", "diagnos"]),
        TopicPattern::new("AI en privacy", &["privacy", "AVG", "GDPR", "persoonsgegevens", "data protection"]),
        TopicPattern::new("AI in het onderwijs", &["onderwijs", "school", "student", "leren", "educatie"]),
        TopicPattern::new("AI en werkgelegenheid", &["banen", "werkgelegenheid", "arbeidsmarkt", "werknemers"]),
        TopicPattern::new("AI-wetgeving", &["wetgeving", "regulering", "AI Act", "toezicht", "compliance"]),
        TopicPattern::new("AI in de rechtspraak", &["rechtspraak", "rechtbank", "juridisch", "advocat"]),
        TopicPattern::new("Generative AI", &["generat", "ChatGPT", "GPT", "LLM", "chatbot"]),
        TopicPattern::new("AI-ethiek", &["ethiek", "ethisch", "discriminatie", "bias", "verantwoord"]),
        TopicPattern::new("AI in retail", &["retail", "winkel", "e-commerce", "klant", "verkoop"]),
        TopicPattern::new("AI in finance", &["bank", "financi", "verzekering", "fintech", "betaal"]),
    ]
}

pub fn default_relevance_keywords() -> Vec<TopicPattern> {
    vec![
        TopicPattern::new("AI in de zorg", &["zorg", "patient", "diagnose", "medisch", "ziekenhuis"]),
        TopicPattern::new("AI en privacy", &["privacy", "gegevens", "persoonlijk", "gdpr", "vertrouwelijk"]),
        TopicPattern::new("AI in het onderwijs", &["onderwijs", "school", "leerling", "student", "docent"]),
        TopicPattern::new("AI en werkgelegenheid", &["banen", "werk", "arbeidsmarkt", "werknemer", "ontslag"]),
        TopicPattern::new("AI-wetgeving", &["wet", "regel", "europa", "ai act", "compliance"]),
        TopicPattern::new("AI in de rechtspraak", &["rechter", "rechtbank", "juridisch", "advocaat", "vonnis"]),
        TopicPattern::new("Generative AI", &["genereren", "creëren", "tekst", "afbeelding", "chatbot", "gpt"]),
        TopicPattern::new("AI-ethiek", &["ethiek", "ethisch", "discriminatie", "bias", "verantwoord"]),
        TopicPattern::new("AI in retail", &["winkel", "verkoop", "klant", "e-commerce", "retail"]),
        TopicPattern::new("AI in finance", &["bank", "financieel", "betalen", "krediet", "investering"]),
    ]
}
