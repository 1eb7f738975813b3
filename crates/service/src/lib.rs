//! bridgerank Service
//!
//! Aggregation, estimation and ranking services for the bridgerank route
//! aggregator.

pub mod aggregator;
pub mod normalizer;
pub mod ranker;
pub mod reliability;
pub mod slippage;

pub use aggregator::{
	AggregationStats, RouteAggregation, RouteAggregatorService, DEFAULT_GLOBAL_TIMEOUT_MS,
	DEFAULT_PROVIDER_TIMEOUT_MS,
};
pub use normalizer::normalize_quote;
pub use ranker::RouteRanker;
pub use reliability::{ReliabilityScorer, ReliabilityWeights, DEFAULT_SCORE};
pub use slippage::SlippageEstimator;
