use crate::aggregators::{topic_suggestions, ExpertAggregator, TrendAggregator};
use crate::collector::{summarize, ArticleCollector};
use crate::config::MonitorConfig;
use crate::fetcher::{ContentFetcher, ReqwestTransport};
use crate::parser::FeedParser;
use crate::store::ArticleStore;
use crate::text_analysis::KeywordExtractor;
use crate::traits::HttpTransport;
use crate::types::{
    Article, ArticleAnalysis, Expert, Result, ScanReport, SignalExtractor, StoreInfo, TopicSuggestion,
    TrendingTopic, WeeklyReport,
};
use crate::utils::text::truncate_chars;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Windows at least this long are answered from the article store instead of a live scan.
pub const STORE_WINDOW_HOURS: u32 = 48;
pub const PREVIEW_CHARS: usize = 2000;

const SUGGESTION_MIN_MENTIONS: usize = 2;
const SUGGESTION_MIN_QUOTES: usize = 1;
const REPORT_MIN_MENTIONS: usize = 3;
const REPORT_MIN_QUOTES: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Period {
    Day,
    Week,
    Month,
    Quarter,
}

impl Period {
    pub fn hours(self) -> u32 {
        match self {
            Period::Day => 24,
            Period::Week => 168,
            Period::Month => 720,
            Period::Quarter => 2160,
        }
    }
}

/// Entry point tying collection, storage and aggregation together.
pub struct MediaMonitor {
    collector: ArticleCollector,
    fetcher: Arc<ContentFetcher>,
    extractor: Arc<KeywordExtractor>,
    trends: TrendAggregator,
    store: ArticleStore,
}

impl MediaMonitor {
    /// Production wiring: reqwest for the network, SQLite at `config.database_url`.
    pub async fn new(config: &MonitorConfig) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config.fetch)?);
        let store = ArticleStore::new(&config.database_url).await?;
        Self::with_parts(config, transport, store)
    }

    pub fn with_parts(
        config: &MonitorConfig,
        transport: Arc<dyn HttpTransport>,
        store: ArticleStore,
    ) -> Result<Self> {
        let fetcher = Arc::new(ContentFetcher::new(
            transport,
            config.fetch.clone(),
            config.paywall_services.clone(),
        ));
        let extractor = Arc::new(KeywordExtractor::from_config(config)?);
        let collector = ArticleCollector::new(
            config.feed_sources().cloned().collect(),
            fetcher.clone(),
            extractor.clone(),
        );

        Ok(Self {
            collector,
            fetcher,
            extractor,
            trends: TrendAggregator::from_config(config),
            store,
        })
    }

    pub fn store(&self) -> &ArticleStore {
        &self.store
    }

    /// Live scan of every source. Found articles are persisted before the report is built.
    pub async fn scan(&self, hours_back: u32) -> ScanReport {
        let articles = self.collector.collect(hours_back).await;
        self.store.store_many(&articles).await;
        summarize(articles, hours_back)
    }

    pub async fn articles_for_window(&self, hours: u32) -> Result<Vec<Article>> {
        if hours >= STORE_WINDOW_HOURS {
            info!("Reading {}h window from the article store", hours);
            self.store.get_since(hours, None).await
        } else {
            info!("Scanning live for {}h window", hours);
            Ok(self.collector.collect(hours).await)
        }
    }

    pub async fn trending_topics(
        &self,
        period: Period,
        min_mentions: usize,
        categories: Option<&[String]>,
    ) -> Result<Vec<TrendingTopic>> {
        let articles = self.articles_for_window(period.hours()).await?;
        Ok(self.trends.trending_topics(&articles, min_mentions, categories))
    }

    pub async fn identify_experts(
        &self,
        topic: Option<&str>,
        period: Period,
        min_quotes: usize,
    ) -> Result<Vec<Expert>> {
        let articles = self.articles_for_window(period.hours()).await?;
        Ok(ExpertAggregator::experts(&articles, topic, min_quotes))
    }

    /// Suggestions from this week's trends and this month's experts.
    pub async fn topic_suggestions(&self, focus_areas: Option<&[String]>) -> Result<Vec<TopicSuggestion>> {
        let trends = self
            .trending_topics(Period::Week, SUGGESTION_MIN_MENTIONS, None)
            .await?;
        let experts = self
            .identify_experts(None, Period::Month, SUGGESTION_MIN_QUOTES)
            .await?;

        Ok(topic_suggestions(&trends, &experts, focus_areas))
    }

    /// This week's trends, experts and suggestions with their highlights.
    pub async fn weekly_report(&self) -> Result<WeeklyReport> {
        let trends = self
            .trending_topics(Period::Week, REPORT_MIN_MENTIONS, None)
            .await?;
        let experts = self
            .identify_experts(None, Period::Week, REPORT_MIN_QUOTES)
            .await?;
        let suggestions = self.topic_suggestions(None).await?;

        info!(
            "Weekly report: {} topics, {} experts, {} suggestions",
            trends.len(),
            experts.len(),
            suggestions.len()
        );

        Ok(WeeklyReport::new(Utc::now(), trends, experts, suggestions))
    }

    /// Fetch one article (bypassing a paywall if needed) and run the text signals over it.
    pub async fn fetch_article(&self, url: &str) -> ArticleAnalysis {
        let Some(html) = self.fetcher.fetch_article_content(url).await else {
            warn!("Could not fetch article content for {}", url);
            return failed_analysis(url, "Could not fetch article content".to_string());
        };

        let page = match FeedParser::parse_page(&html) {
            Ok(page) => page,
            Err(e) => return failed_analysis(url, e.to_string()),
        };

        let is_ai_related = self.extractor.is_ai_related(&page.text);
        let (ai_topics, quoted_experts) = if is_ai_related {
            (
                self.extractor.extract_topics(&page.text),
                self.extractor.extract_quotes(&page.text),
            )
        } else {
            (Vec::new(), Vec::new())
        };

        ArticleAnalysis {
            url: url.to_string(),
            fetch_successful: true,
            title: Some(page.title),
            content_preview: Some(truncate_chars(&page.text, PREVIEW_CHARS)),
            is_ai_related,
            ai_topics,
            quoted_experts,
            error: None,
        }
    }

    pub async fn store_info(&self) -> Result<StoreInfo> {
        self.store.info().await
    }

    /// Delete stored articles published more than `days` days ago.
    pub async fn cleanup(&self, days: u32) -> Result<u64> {
        self.store.delete_older_than(days).await
    }
}

fn failed_analysis(url: &str, error: String) -> ArticleAnalysis {
    ArticleAnalysis {
        url: url.to_string(),
        fetch_successful: false,
        title: None,
        content_preview: None,
        is_ai_related: false,
        ai_topics: Vec::new(),
        quoted_experts: Vec::new(),
        error: Some(error),
    }
}
