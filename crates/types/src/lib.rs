//! bridgerank Types
//!
//! Shared models and traits for the bridgerank route aggregator.
//! Domain models are organized by business entity.

pub mod adapters;
pub mod providers;
pub mod quotes;
pub mod ranking;
pub mod reliability;
pub mod slippage;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

pub use adapters::{AdapterError, AdapterResult, BridgeAdapter};

pub use providers::{Provider, ProviderEndpointConfig, RegistryError, RegistryResult};

pub use quotes::{
	AggregationError, AggregationResult, FeeBreakdown, NormalizedQuote, RawProviderQuote,
	RouteRequest, RouteStatus, RouteStep, StepKind,
};

pub use ranking::{RankingStrategy, RankingWeights};

pub use reliability::{InMemoryMetricsSource, MetricsSource, ReliabilityMetrics};

pub use slippage::{SlippageConfidence, SlippageEstimate};
