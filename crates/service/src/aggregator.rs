//! Core route aggregation service
//!
//! Fans a route request out to every registered adapter that supports the
//! pair, bounds each fetch with a per-provider timeout, tolerates partial
//! failure, and hands the surviving quotes through estimation,
//! normalization and ranking.

use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

use bridgerank_adapters::ProviderRegistry;
use bridgerank_types::{
	AggregationError, AggregationResult, BridgeAdapter, NormalizedQuote, Provider,
	RankingStrategy, RawProviderQuote, RouteRequest,
};

use crate::normalizer::normalize_quote;
use crate::ranker::RouteRanker;
use crate::reliability::ReliabilityScorer;
use crate::slippage::SlippageEstimator;

/// Default per-provider fetch budget in milliseconds
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 2000;

/// Default budget for the whole aggregation pass in milliseconds
pub const DEFAULT_GLOBAL_TIMEOUT_MS: u64 = 4000;

/// Service for aggregating and ranking route quotes across providers
pub struct RouteAggregatorService {
	registry: Arc<ProviderRegistry>,
	slippage: SlippageEstimator,
	reliability: ReliabilityScorer,
	ranker: RouteRanker,
	provider_timeout_ms: u64,
	global_timeout_ms: u64,
}

/// The ranked outcome of one aggregation pass
#[derive(Debug, Clone)]
pub struct RouteAggregation {
	/// Id of the request this answers
	pub request_id: String,

	/// Echoed request parameters
	pub source_chain: String,
	pub destination_chain: String,
	pub source_token: String,
	pub destination_token: String,
	pub amount: String,
	pub strategy: RankingStrategy,

	/// Candidate routes in rank order
	pub quotes: Vec<NormalizedQuote>,

	/// The rank-1 route
	pub best_route: Option<NormalizedQuote>,

	/// How many providers matched the pair
	pub total_providers: usize,

	/// How many of the matched providers returned a quote
	pub successful_providers: usize,

	/// Wall-clock duration of the fetch fan-out plus ranking
	pub duration_ms: u64,
}

/// Aggregation service statistics
#[derive(Debug, Clone)]
pub struct AggregationStats {
	pub registered_providers: usize,
	pub provider_timeout_ms: u64,
	pub global_timeout_ms: u64,
}

impl RouteAggregatorService {
	/// Create an aggregator with default timeouts
	pub fn new(
		registry: Arc<ProviderRegistry>,
		slippage: SlippageEstimator,
		reliability: ReliabilityScorer,
	) -> Self {
		Self {
			registry,
			slippage,
			reliability,
			ranker: RouteRanker::new(),
			provider_timeout_ms: DEFAULT_PROVIDER_TIMEOUT_MS,
			global_timeout_ms: DEFAULT_GLOBAL_TIMEOUT_MS,
		}
	}

	/// Override the per-provider and global timeout budgets
	pub fn with_timeouts(mut self, provider_timeout_ms: u64, global_timeout_ms: u64) -> Self {
		self.provider_timeout_ms = provider_timeout_ms;
		self.global_timeout_ms = global_timeout_ms;
		self
	}

	/// Fetch, normalize and rank candidate routes for a request
	///
	/// Fails with [`AggregationError::RouteNotSupported`] when no
	/// registered adapter supports the pair (nothing is fetched), and
	/// with [`AggregationError::AllProvidersFailed`] when every matched
	/// adapter errored or timed out. Individual failures are absorbed
	/// into the counts.
	pub async fn fetch_routes(
		&self,
		request: RouteRequest,
	) -> AggregationResult<RouteAggregation> {
		let started = Instant::now();

		let matched = self.matching_adapters(&request);
		if matched.is_empty() {
			return Err(AggregationError::RouteNotSupported {
				source_chain: request.source_chain.clone(),
				destination_chain: request.destination_chain.clone(),
				token: request.source_token.clone(),
			});
		}

		let total_providers = matched.len();
		info!(
			request_id = %request.request_id,
			providers = total_providers,
			"Fetching routes from matched providers"
		);

		let raw_quotes = self.fan_out(&request, matched).await;
		let successful_providers = raw_quotes.len();

		if raw_quotes.is_empty() {
			return Err(AggregationError::AllProvidersFailed {
				attempted: total_providers,
			});
		}

		let quotes = self.normalize_and_rank(&request, raw_quotes);
		let best_route = quotes.first().cloned();
		let duration_ms = started.elapsed().as_millis() as u64;

		info!(
			request_id = %request.request_id,
			quotes = quotes.len(),
			successful = successful_providers,
			total = total_providers,
			duration_ms,
			"Route aggregation completed"
		);

		Ok(RouteAggregation {
			request_id: request.request_id.clone(),
			source_chain: request.source_chain.clone(),
			destination_chain: request.destination_chain.clone(),
			source_token: request.source_token.clone(),
			destination_token: request.destination_token().to_string(),
			amount: request.amount.clone(),
			strategy: request.strategy,
			quotes,
			best_route,
			total_providers,
			successful_providers,
			duration_ms,
		})
	}

	/// Provider identities for every registered adapter, for directory
	/// listings independent of any request
	pub fn get_all_providers(&self) -> Vec<Provider> {
		self.registry.providers()
	}

	/// Aggregation statistics
	pub fn stats(&self) -> AggregationStats {
		AggregationStats {
			registered_providers: self.registry.len(),
			provider_timeout_ms: self.provider_timeout_ms,
			global_timeout_ms: self.global_timeout_ms,
		}
	}

	/// Adapters whose support predicate accepts the request's pair
	fn matching_adapters(&self, request: &RouteRequest) -> Vec<Arc<dyn BridgeAdapter>> {
		self.registry
			.adapters()
			.into_iter()
			.filter(|adapter| {
				adapter.supports_route(
					&request.source_chain,
					&request.destination_chain,
					&request.source_token,
				)
			})
			.collect()
	}

	/// Run one bounded fetch task per adapter and collect the successes
	///
	/// Arrival order of successes is arbitrary and carries no meaning;
	/// ordering is established later by the ranker. Stragglers past the
	/// global budget are abandoned, not awaited.
	async fn fan_out(
		&self,
		request: &RouteRequest,
		adapters: Vec<Arc<dyn BridgeAdapter>>,
	) -> Vec<RawProviderQuote> {
		let provider_timeout = Duration::from_millis(self.provider_timeout_ms);

		let tasks = adapters.into_iter().map(|adapter| {
			let request = request.clone();
			tokio::spawn(async move {
				let provider_id = adapter.id().to_string();
				debug!(provider_id = %provider_id, "Starting quote fetch");

				match timeout(provider_timeout, adapter.fetch_quote(&request)).await {
					Ok(Ok(quote)) => Some(quote),
					Ok(Err(error)) => {
						warn!(provider_id = %provider_id, "Provider returned error: {}", error);
						None
					},
					Err(_) => {
						warn!(
							provider_id = %provider_id,
							timeout_ms = provider_timeout.as_millis() as u64,
							"Provider timed out"
						);
						None
					},
				}
			})
		});

		let results = match timeout(
			Duration::from_millis(self.global_timeout_ms),
			join_all(tasks),
		)
		.await
		{
			Ok(results) => results,
			Err(_) => {
				warn!(
					timeout_ms = self.global_timeout_ms,
					"Global aggregation timeout reached, abandoning outstanding fetches"
				);
				Vec::new()
			},
		};

		results
			.into_iter()
			.filter_map(|joined| joined.ok().flatten())
			.collect()
	}

	/// Estimate, normalize and rank the collected raw quotes
	fn normalize_and_rank(
		&self,
		request: &RouteRequest,
		raw_quotes: Vec<RawProviderQuote>,
	) -> Vec<NormalizedQuote> {
		let amount = request.amount_value().unwrap_or(0.0);
		let slippage_estimates = self.slippage.batch_estimate(
			&raw_quotes,
			&request.source_token,
			&request.source_chain,
			amount,
		);
		let provider_ids: Vec<String> =
			raw_quotes.iter().map(|q| q.provider_id.clone()).collect();
		let reliability_scores = self.reliability.batch_scores(&provider_ids);

		let normalized: Vec<NormalizedQuote> = raw_quotes
			.iter()
			.map(|raw| {
				let slippage = slippage_estimates
					.get(&raw.provider_id)
					.copied()
					.unwrap_or_else(|| {
						self.slippage.estimate_for_quote(
							raw,
							&request.source_token,
							&request.source_chain,
							amount,
						)
					});
				let reliability = reliability_scores
					.get(&raw.provider_id)
					.copied()
					.unwrap_or_else(|| self.reliability.score(&raw.provider_id));
				normalize_quote(request, raw, &slippage, reliability)
			})
			.collect();

		self.ranker.rank(normalized, request.strategy)
	}
}

impl std::fmt::Debug for RouteAggregatorService {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteAggregatorService")
			.field("registered_providers", &self.registry.len())
			.field("provider_timeout_ms", &self.provider_timeout_ms)
			.field("global_timeout_ms", &self.global_timeout_ms)
			.finish()
	}
}
