//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use bridgerank::mocks::MockBridgeAdapter;
use bridgerank::{
	AggregatorBuilder, InMemoryMetricsSource, RankingStrategy, ReliabilityMetrics, RouteRequest,
	Settings,
};

/// A metrics source with snapshots for the standard test providers
pub fn create_metrics_source() -> Arc<InMemoryMetricsSource> {
	Arc::new(InMemoryMetricsSource::with_metrics(vec![
		(
			"steady".to_string(),
			ReliabilityMetrics::new(99.9, 99.0, 2.0, 0),
		),
		(
			"wobbly".to_string(),
			ReliabilityMetrics::new(95.0, 90.0, 25.0, 4),
		),
	]))
}

/// A USDC transfer request from ethereum to arbitrum
pub fn create_request(strategy: RankingStrategy) -> RouteRequest {
	RouteRequest::new(
		"ethereum".to_string(),
		"arbitrum".to_string(),
		"USDC".to_string(),
		"1000.0".to_string(),
	)
	.with_strategy(strategy)
}

/// A builder pre-wired with the test metrics source and fast timeouts
pub fn create_builder(adapters: Vec<MockBridgeAdapter>) -> AggregatorBuilder {
	let mut settings = Settings::default();
	settings.timeouts.per_provider_ms = 300;
	settings.timeouts.global_ms = 800;

	let mut builder = AggregatorBuilder::new()
		.with_settings(settings)
		.with_metrics_source(create_metrics_source());
	for adapter in adapters {
		builder = builder.with_adapter(Arc::new(adapter));
	}
	builder
}
