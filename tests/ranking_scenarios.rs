//! Strategy-level ranking scenarios through the full pipeline

mod mocks;

use bridgerank::mocks::MockBridgeAdapter;
use bridgerank::RankingStrategy;

use mocks::{create_builder, create_request};

fn scenario_adapters() -> Vec<MockBridgeAdapter> {
	vec![
		// Cheap but slow, backed by strong metrics ("steady").
		MockBridgeAdapter::success("steady").with_quote_profile(1.0, 120),
		// Expensive but fast, with weaker metrics ("wobbly").
		MockBridgeAdapter::success("wobbly").with_quote_profile(3.0, 60),
	]
}

#[tokio::test]
async fn test_lowest_cost_prefers_cheap_route() {
	let service = create_builder(scenario_adapters()).build();

	let result = service
		.fetch_routes(create_request(RankingStrategy::LowestCost))
		.await
		.unwrap();

	let best = result.best_route.unwrap();
	assert_eq!(best.provider_id, "steady");
	assert_eq!(best.ranking_position, 1);
}

#[tokio::test]
async fn test_fastest_prefers_quick_route() {
	let service = create_builder(scenario_adapters()).build();

	let result = service
		.fetch_routes(create_request(RankingStrategy::Fastest))
		.await
		.unwrap();

	let best = result.best_route.unwrap();
	assert_eq!(best.provider_id, "wobbly");
	assert_eq!(best.ranking_position, 1);
}

#[tokio::test]
async fn test_ordering_is_deterministic_across_runs() {
	let service = create_builder(scenario_adapters()).build();

	let first: Vec<String> = service
		.fetch_routes(create_request(RankingStrategy::Balanced))
		.await
		.unwrap()
		.quotes
		.into_iter()
		.map(|q| q.provider_id)
		.collect();

	for _ in 0..3 {
		let next: Vec<String> = service
			.fetch_routes(create_request(RankingStrategy::Balanced))
			.await
			.unwrap()
			.quotes
			.into_iter()
			.map(|q| q.provider_id)
			.collect();
		assert_eq!(first, next);
	}
}

#[tokio::test]
async fn test_every_strategy_scores_within_bounds() {
	for strategy in [
		RankingStrategy::Balanced,
		RankingStrategy::LowestCost,
		RankingStrategy::Fastest,
	] {
		let service = create_builder(scenario_adapters()).build();
		let result = service.fetch_routes(create_request(strategy)).await.unwrap();

		for quote in &result.quotes {
			assert!(
				(0.0..=100.0).contains(&quote.composite_score),
				"composite score {} out of bounds under {}",
				quote.composite_score,
				strategy
			);
			assert!((0.0..=100.0).contains(&quote.reliability_score));
		}
	}
}
