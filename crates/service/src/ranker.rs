//! Multi-criteria route ranking
//!
//! Assigns each normalized quote a composite score under the selected
//! strategy and produces a deterministic total order. Cost, speed and
//! slippage sub-scores normalize against the batch's own maxima and are
//! inverted so that higher is uniformly better; reliability is already
//! bounded to 0-100 and is used as-is.

use tracing::debug;

use bridgerank_types::{NormalizedQuote, RankingStrategy, RankingWeights};

/// Ranks normalized quotes under a selected strategy
#[derive(Debug, Clone, Default)]
pub struct RouteRanker;

impl RouteRanker {
	pub fn new() -> Self {
		Self
	}

	/// Score and order quotes; returns a permutation of the input
	///
	/// Empty input returns an empty list. Ties in composite score keep
	/// the relative order of the input sequence (the sort is stable), so
	/// identical inputs always produce identical output orderings.
	pub fn rank(
		&self,
		quotes: Vec<NormalizedQuote>,
		strategy: RankingStrategy,
	) -> Vec<NormalizedQuote> {
		if quotes.is_empty() {
			return quotes;
		}

		let weights = RankingWeights::for_strategy(strategy);

		let max_fee = quotes
			.iter()
			.map(|q| q.total_fee_usd)
			.fold(0.0_f64, f64::max);
		let max_time = quotes
			.iter()
			.map(|q| q.estimated_time_secs as f64)
			.fold(0.0_f64, f64::max);
		let max_slippage = quotes
			.iter()
			.map(|q| q.slippage_percent)
			.fold(0.0_f64, f64::max);

		let mut scored: Vec<NormalizedQuote> = quotes
			.into_iter()
			.map(|mut quote| {
				quote.composite_score = Self::composite_score(
					&quote,
					&weights,
					max_fee,
					max_time,
					max_slippage,
				);
				quote
			})
			.collect();

		// sort_by is stable: equal composite scores keep input order.
		scored.sort_by(|a, b| {
			b.composite_score
				.partial_cmp(&a.composite_score)
				.unwrap_or(std::cmp::Ordering::Equal)
		});

		for (index, quote) in scored.iter_mut().enumerate() {
			quote.ranking_position = index + 1;
		}

		debug!(
			strategy = %strategy,
			candidates = scored.len(),
			"Ranked candidate routes"
		);

		scored
	}

	/// The top-ranked quote under a strategy, if any candidates exist
	pub fn best(
		&self,
		quotes: Vec<NormalizedQuote>,
		strategy: RankingStrategy,
	) -> Option<NormalizedQuote> {
		self.rank(quotes, strategy).into_iter().next()
	}

	fn composite_score(
		quote: &NormalizedQuote,
		weights: &RankingWeights,
		max_fee: f64,
		max_time: f64,
		max_slippage: f64,
	) -> f64 {
		let cost_score = Self::inverted_sub_score(quote.total_fee_usd, max_fee);
		let speed_score = Self::inverted_sub_score(quote.estimated_time_secs as f64, max_time);
		let slippage_score = Self::inverted_sub_score(quote.slippage_percent, max_slippage);
		let reliability_score = quote.reliability_score.clamp(0.0, 100.0);

		let composite = cost_score * weights.cost
			+ speed_score * weights.speed
			+ reliability_score * weights.reliability
			+ slippage_score * weights.slippage;

		(composite * 100.0).round() / 100.0
	}

	/// Sub-score in [0, 100] where a lower raw value is better
	///
	/// When the batch maximum is 0 there is nothing to compare against
	/// and every candidate scores 100.
	fn inverted_sub_score(value: f64, max: f64) -> f64 {
		if max > 0.0 {
			((1.0 - value / max) * 100.0).clamp(0.0, 100.0)
		} else {
			100.0
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bridgerank_types::{RouteStatus, SlippageConfidence};
	use chrono::Utc;

	fn create_test_quote(
		provider_id: &str,
		fee: f64,
		time_secs: u64,
		reliability: f64,
	) -> NormalizedQuote {
		NormalizedQuote {
			provider_id: provider_id.to_string(),
			provider_name: format!("{} Provider", provider_id),
			source_chain: "ethereum".to_string(),
			destination_chain: "arbitrum".to_string(),
			source_token: "USDC".to_string(),
			destination_token: "USDC".to_string(),
			amount_in: "1000.0".to_string(),
			amount_out: "995.0".to_string(),
			total_fee_usd: fee,
			estimated_time_secs: time_secs,
			slippage_percent: 0.1,
			slippage_confidence: SlippageConfidence::High,
			reliability_score: reliability,
			composite_score: 0.0,
			ranking_position: 0,
			status: RouteStatus::Active,
			steps: Vec::new(),
			fetched_at: Utc::now(),
		}
	}

	#[test]
	fn test_empty_input_returns_empty() {
		let ranker = RouteRanker::new();
		assert!(ranker.rank(Vec::new(), RankingStrategy::Balanced).is_empty());
		assert!(ranker.best(Vec::new(), RankingStrategy::Fastest).is_none());
	}

	#[test]
	fn test_rank_is_a_scored_permutation() {
		let ranker = RouteRanker::new();
		let quotes = vec![
			create_test_quote("a", 1.0, 120, 90.0),
			create_test_quote("b", 3.0, 60, 70.0),
			create_test_quote("c", 2.0, 90, 80.0),
		];

		let ranked = ranker.rank(quotes, RankingStrategy::Balanced);

		assert_eq!(ranked.len(), 3);
		for (index, quote) in ranked.iter().enumerate() {
			assert_eq!(quote.ranking_position, index + 1);
			if index > 0 {
				assert!(ranked[index - 1].composite_score >= quote.composite_score);
			}
		}

		let mut ids: Vec<&str> = ranked.iter().map(|q| q.provider_id.as_str()).collect();
		ids.sort();
		assert_eq!(ids, vec!["a", "b", "c"]);
	}

	#[test]
	fn test_strategy_scenario_cost_vs_speed() {
		let ranker = RouteRanker::new();
		let quotes = || {
			vec![
				create_test_quote("a", 1.0, 120, 90.0),
				create_test_quote("b", 3.0, 60, 70.0),
			]
		};

		let cheapest = ranker.best(quotes(), RankingStrategy::LowestCost).unwrap();
		assert_eq!(cheapest.provider_id, "a");
		assert_eq!(cheapest.ranking_position, 1);

		let fastest = ranker.best(quotes(), RankingStrategy::Fastest).unwrap();
		assert_eq!(fastest.provider_id, "b");
		assert_eq!(fastest.ranking_position, 1);
	}

	#[test]
	fn test_zero_maxima_score_100() {
		let ranker = RouteRanker::new();
		let mut quote = create_test_quote("a", 0.0, 0, 100.0);
		quote.slippage_percent = 0.0;

		let ranked = ranker.rank(vec![quote], RankingStrategy::Balanced);

		// All sub-scores are 100 when every max is 0, so the composite is
		// the full weight sum.
		assert_eq!(ranked[0].composite_score, 100.0);
	}

	#[test]
	fn test_ties_preserve_input_order() {
		let ranker = RouteRanker::new();
		let quotes = vec![
			create_test_quote("first", 2.0, 100, 80.0),
			create_test_quote("second", 2.0, 100, 80.0),
			create_test_quote("third", 2.0, 100, 80.0),
		];

		let ranked = ranker.rank(quotes, RankingStrategy::Balanced);

		assert_eq!(ranked[0].provider_id, "first");
		assert_eq!(ranked[1].provider_id, "second");
		assert_eq!(ranked[2].provider_id, "third");
	}

	#[test]
	fn test_deterministic_across_runs() {
		let ranker = RouteRanker::new();
		let quotes = || {
			vec![
				create_test_quote("a", 1.2, 75, 88.0),
				create_test_quote("b", 0.9, 140, 95.0),
				create_test_quote("c", 2.1, 45, 72.0),
			]
		};

		let first: Vec<String> = ranker
			.rank(quotes(), RankingStrategy::Balanced)
			.into_iter()
			.map(|q| q.provider_id)
			.collect();
		let second: Vec<String> = ranker
			.rank(quotes(), RankingStrategy::Balanced)
			.into_iter()
			.map(|q| q.provider_id)
			.collect();

		assert_eq!(first, second);
	}

	#[test]
	fn test_reliability_used_without_batch_normalization() {
		let ranker = RouteRanker::new();
		// Identical cost/speed/slippage; only reliability differs. The
		// spread between 50 and 60 must reflect raw values, not a
		// batch-relative rescale.
		let quotes = vec![
			create_test_quote("low", 1.0, 60, 50.0),
			create_test_quote("high", 1.0, 60, 60.0),
		];

		let ranked = ranker.rank(quotes, RankingStrategy::Balanced);

		assert_eq!(ranked[0].provider_id, "high");
		let spread = ranked[0].composite_score - ranked[1].composite_score;
		// 10 reliability points at weight 0.25.
		assert!((spread - 2.5).abs() < 1e-9);
	}
}
