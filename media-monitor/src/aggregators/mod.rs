pub mod experts;
pub mod suggestions;
pub mod trends;

pub use experts::ExpertAggregator;
pub use suggestions::topic_suggestions;
pub use trends::TrendAggregator;
