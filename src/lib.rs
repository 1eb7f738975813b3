//! bridgerank
//!
//! A cross-chain route aggregator: fans a transfer request out to
//! independent bridge providers, normalizes their quotes into one
//! comparable model, and ranks them under a caller-selected strategy.

use std::sync::Arc;
use tracing::info;

// Core domain types - the most commonly used types
pub use bridgerank_types::{
	chrono,
	// External dependencies for convenience
	serde_json,
	AdapterError,
	AdapterResult,
	AggregationError,
	AggregationResult,
	// Adapter contract
	BridgeAdapter,
	FeeBreakdown,
	InMemoryMetricsSource,
	MetricsSource,
	NormalizedQuote,
	// Primary domain entities
	Provider,
	ProviderEndpointConfig,
	RankingStrategy,
	RankingWeights,
	RawProviderQuote,
	// Error types
	RegistryError,
	ReliabilityMetrics,
	RouteRequest,
	RouteStatus,
	RouteStep,
	SlippageConfidence,
	SlippageEstimate,
	StepKind,
};

// Service layer
pub use bridgerank_service::{
	ReliabilityScorer, RouteAggregation, RouteAggregatorService, RouteRanker, SlippageEstimator,
};

// Adapters
pub use bridgerank_adapters::{
	create_adapter, registry_with_defaults, ClientCache, HopAdapter, ProviderRegistry,
	RelayAdapter, StargateAdapter,
};

// Config
pub use bridgerank_config::{load_config, LogFormat, LoggingSettings, Settings};

// Module aliases for direct access to each layer
pub mod types {
	pub use bridgerank_types::*;
}

pub mod adapters {
	pub use bridgerank_adapters::*;
}

pub mod service {
	pub use bridgerank_service::*;
}

pub mod config {
	pub use bridgerank_config::*;
}

pub mod mocks;

/// Builder pattern for composing the aggregator
///
/// Adapters, metrics and settings are wired through ordinary composition
/// at startup; nothing is discovered at runtime.
pub struct AggregatorBuilder {
	settings: Option<Settings>,
	registry: ProviderRegistry,
	metrics_source: Arc<dyn MetricsSource>,
	slippage: SlippageEstimator,
}

impl AggregatorBuilder {
	/// Create a builder with an empty registry and no recorded metrics
	pub fn new() -> Self {
		Self {
			settings: None,
			registry: ProviderRegistry::new(),
			metrics_source: Arc::new(InMemoryMetricsSource::new()),
			slippage: SlippageEstimator::new(),
		}
	}

	/// Use a pre-built registry (e.g. [`registry_with_defaults`])
	pub fn with_registry(mut self, registry: ProviderRegistry) -> Self {
		self.registry = registry;
		self
	}

	/// Register a custom adapter (uses the adapter's own id)
	///
	/// Panics if registration fails; duplicate adapters at startup are a
	/// fatal configuration error.
	pub fn with_adapter(self, adapter: Arc<dyn BridgeAdapter>) -> Self {
		self.registry.register(adapter).expect(
			"Failed to register adapter during startup - this is a fatal configuration error",
		);
		self
	}

	/// Use a custom reliability metrics source
	pub fn with_metrics_source(mut self, source: Arc<dyn MetricsSource>) -> Self {
		self.metrics_source = source;
		self
	}

	/// Add a liquidity reference for slippage estimation
	pub fn with_liquidity(mut self, chain: &str, token: &str, depth: f64) -> Self {
		self.slippage = self.slippage.with_liquidity(chain, token, depth);
		self
	}

	/// Set custom settings
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Register built-in adapters for every enabled provider in settings
	pub fn with_configured_adapters(self) -> AdapterResult<Self> {
		let settings = self.settings.clone().unwrap_or_default();
		for provider_settings in settings.enabled_providers().values() {
			let endpoint_config = ProviderEndpointConfig::from(provider_settings);
			let adapter = create_adapter(&provider_settings.provider_id, endpoint_config)?;
			self.registry
				.register(adapter)
				.map_err(|e| AdapterError::ConfigError {
					reason: e.to_string(),
				})?;
		}
		Ok(self)
	}

	/// Build the aggregator service
	pub fn build(self) -> RouteAggregatorService {
		let settings = self.settings.unwrap_or_default();
		let registry = Arc::new(self.registry);

		info!(
			providers = registry.len(),
			"Building route aggregator service"
		);

		RouteAggregatorService::new(
			registry,
			self.slippage,
			ReliabilityScorer::new(self.metrics_source),
		)
		.with_timeouts(settings.timeouts.per_provider_ms, settings.timeouts.global_ms)
	}
}

impl Default for AggregatorBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Initialize tracing with configuration-based settings
pub fn init_tracing(settings: &LoggingSettings) {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(settings.level.clone()));

	match settings.format {
		LogFormat::Json => {
			let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);
			if settings.structured {
				subscriber.with_target(true).with_thread_ids(true).init();
			} else {
				subscriber.init();
			}
		},
		LogFormat::Pretty => {
			let subscriber = tracing_subscriber::fmt()
				.pretty()
				.with_env_filter(env_filter);
			if settings.structured {
				subscriber.with_target(true).with_thread_ids(true).init();
			} else {
				subscriber.init();
			}
		},
		LogFormat::Compact => {
			let subscriber = tracing_subscriber::fmt()
				.compact()
				.with_env_filter(env_filter);
			if settings.structured {
				subscriber.with_target(true).with_thread_ids(true).init();
			} else {
				subscriber.init();
			}
		},
	}
}
