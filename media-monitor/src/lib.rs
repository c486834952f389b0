pub mod types;
pub mod config;
pub mod traits;
pub mod utils;
pub mod paywall;
pub mod fetcher;
pub mod parser;
pub mod text_analysis;
pub mod collector;
pub mod store;
pub mod aggregators;
pub mod monitor;

pub use types::*;
pub use config::{MonitorConfig, TopicPattern};
pub use traits::{HttpResponse, HttpTransport};
pub use fetcher::{ContentFetcher, ReqwestTransport};
pub use parser::FeedParser;
pub use text_analysis::KeywordExtractor;
pub use collector::ArticleCollector;
pub use store::ArticleStore;
pub use aggregators::{ExpertAggregator, TrendAggregator};
pub use monitor::{MediaMonitor, Period};
