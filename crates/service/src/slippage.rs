//! Slippage estimation
//!
//! Estimates expected price impact for a requested amount against a
//! reference liquidity table. Estimates are recomputed per request and
//! never cached across differing amounts.

use std::collections::HashMap;
use tracing::debug;

use bridgerank_types::{RawProviderQuote, SlippageConfidence, SlippageEstimate};

/// Baseline slippage applied to every known pair, in percent
const BASE_SLIPPAGE_PERCENT: f64 = 0.05;

/// How fast slippage grows with the amount-to-liquidity ratio
const IMPACT_COEFFICIENT: f64 = 10.0;

/// Ceiling on the expected slippage estimate, in percent
const MAX_EXPECTED_PERCENT: f64 = 12.5;

/// Expected slippage reported when the pair's liquidity is unknown
///
/// Deliberately non-zero: absence of data must never present as absence
/// of risk.
const UNKNOWN_PAIR_PERCENT: f64 = 0.75;

/// Amount/liquidity ratio below which the estimate is high confidence
const HIGH_CONFIDENCE_RATIO: f64 = 0.001;

/// Amount/liquidity ratio below which the estimate is medium confidence
const MEDIUM_CONFIDENCE_RATIO: f64 = 0.05;

/// Headroom multiplier from expected to maximum slippage
const MAX_HEADROOM_FACTOR: f64 = 1.6;
const MAX_HEADROOM_OFFSET: f64 = 0.05;

/// Estimates execution slippage from a reference liquidity table
///
/// The table maps lowercase `(chain, token)` pairs to a reference
/// liquidity depth in token units.
#[derive(Debug, Clone)]
pub struct SlippageEstimator {
	liquidity: HashMap<(String, String), f64>,
}

impl SlippageEstimator {
	/// Create an estimator with the built-in liquidity references
	pub fn new() -> Self {
		let mut liquidity = HashMap::new();

		// Reference depths for the majors; extend via with_liquidity.
		for (chain, token, depth) in [
			("ethereum", "usdc", 50_000_000.0),
			("ethereum", "usdt", 40_000_000.0),
			("ethereum", "dai", 20_000_000.0),
			("ethereum", "eth", 30_000.0),
			("ethereum", "weth", 25_000.0),
			("arbitrum", "usdc", 15_000_000.0),
			("arbitrum", "usdt", 8_000_000.0),
			("arbitrum", "eth", 9_000.0),
			("optimism", "usdc", 10_000_000.0),
			("optimism", "eth", 6_000.0),
			("polygon", "usdc", 12_000_000.0),
			("polygon", "usdt", 9_000_000.0),
			("base", "usdc", 8_000_000.0),
			("base", "eth", 5_000.0),
			("avalanche", "usdc", 6_000_000.0),
			("bsc", "usdt", 10_000_000.0),
		] {
			liquidity.insert((chain.to_string(), token.to_string()), depth);
		}

		Self { liquidity }
	}

	/// Create an estimator with no built-in references
	pub fn empty() -> Self {
		Self {
			liquidity: HashMap::new(),
		}
	}

	/// Add or replace a liquidity reference
	pub fn with_liquidity(mut self, chain: &str, token: &str, depth: f64) -> Self {
		self.liquidity.insert(
			(chain.to_ascii_lowercase(), token.to_ascii_lowercase()),
			depth,
		);
		self
	}

	/// Estimate slippage for an amount of a token on a chain
	///
	/// Expected slippage is monotonically non-decreasing in the amount for
	/// a fixed pair; the maximum is always strictly greater than the
	/// expected value.
	pub fn estimate(&self, token: &str, chain: &str, amount: f64) -> SlippageEstimate {
		let key = (chain.to_ascii_lowercase(), token.to_ascii_lowercase());

		let (expected, confidence) = match self.liquidity.get(&key) {
			Some(depth) if *depth > 0.0 && amount.is_finite() && amount >= 0.0 => {
				let ratio = amount / depth;
				let expected =
					(BASE_SLIPPAGE_PERCENT + ratio * IMPACT_COEFFICIENT).min(MAX_EXPECTED_PERCENT);
				let confidence = if ratio <= HIGH_CONFIDENCE_RATIO {
					SlippageConfidence::High
				} else if ratio <= MEDIUM_CONFIDENCE_RATIO {
					SlippageConfidence::Medium
				} else {
					SlippageConfidence::Low
				};
				(expected, confidence)
			},
			_ => {
				debug!(
					chain = %chain,
					token = %token,
					"No liquidity reference for pair, using conservative estimate"
				);
				(UNKNOWN_PAIR_PERCENT, SlippageConfidence::Low)
			},
		};

		SlippageEstimate::new(
			expected,
			expected * MAX_HEADROOM_FACTOR + MAX_HEADROOM_OFFSET,
			confidence,
		)
	}

	/// Estimate slippage for a quote's route
	///
	/// The quote parameter keeps per-provider estimation possible (e.g.
	/// weighting by route steps); the current policy depends only on the
	/// pair and amount.
	pub fn estimate_for_quote(
		&self,
		_quote: &RawProviderQuote,
		token: &str,
		chain: &str,
		amount: f64,
	) -> SlippageEstimate {
		self.estimate(token, chain, amount)
	}

	/// Estimate slippage for a batch of quotes, keyed by provider id
	pub fn batch_estimate(
		&self,
		quotes: &[RawProviderQuote],
		token: &str,
		chain: &str,
		amount: f64,
	) -> HashMap<String, SlippageEstimate> {
		quotes
			.iter()
			.map(|quote| {
				(
					quote.provider_id.clone(),
					self.estimate_for_quote(quote, token, chain, amount),
				)
			})
			.collect()
	}
}

impl Default for SlippageEstimator {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bridgerank_types::FeeBreakdown;

	fn create_test_quote(provider_id: &str) -> RawProviderQuote {
		RawProviderQuote::new(
			provider_id.to_string(),
			format!("{} Provider", provider_id),
			"1000.0".to_string(),
			FeeBreakdown::new(1.0, 0.5),
			120,
		)
	}

	#[test]
	fn test_monotonic_in_amount() {
		let estimator = SlippageEstimator::new();

		let mut previous = 0.0;
		for amount in [100.0, 10_000.0, 500_000.0, 5_000_000.0, 100_000_000.0] {
			let estimate = estimator.estimate("USDC", "ethereum", amount);
			assert!(
				estimate.expected_percent >= previous,
				"expected slippage must not decrease with amount"
			);
			previous = estimate.expected_percent;
		}
	}

	#[test]
	fn test_max_strictly_greater_than_expected() {
		let estimator = SlippageEstimator::new();

		for amount in [0.0, 1.0, 1_000.0, 1_000_000.0, 1e12] {
			let estimate = estimator.estimate("USDC", "ethereum", amount);
			assert!(estimate.max_percent > estimate.expected_percent);
		}

		let unknown = estimator.estimate("XYZ", "nowhere", 42.0);
		assert!(unknown.max_percent > unknown.expected_percent);
	}

	#[test]
	fn test_confidence_tiers() {
		let estimator = SlippageEstimator::new();

		// 50M USDC reference on ethereum.
		let small = estimator.estimate("USDC", "ethereum", 10_000.0);
		assert_eq!(small.confidence, SlippageConfidence::High);

		let moderate = estimator.estimate("USDC", "ethereum", 1_000_000.0);
		assert_eq!(moderate.confidence, SlippageConfidence::Medium);

		let large = estimator.estimate("USDC", "ethereum", 10_000_000.0);
		assert_eq!(large.confidence, SlippageConfidence::Low);
	}

	#[test]
	fn test_unknown_pair_is_conservative_not_zero() {
		let estimator = SlippageEstimator::new();
		let estimate = estimator.estimate("OBSCURE", "ethereum", 1_000.0);

		assert!(estimate.expected_percent > 0.0);
		assert_eq!(estimate.confidence, SlippageConfidence::Low);
	}

	#[test]
	fn test_expected_is_capped() {
		let estimator = SlippageEstimator::new();
		let estimate = estimator.estimate("USDC", "ethereum", 1e15);

		assert!(estimate.expected_percent <= MAX_EXPECTED_PERCENT);
	}

	#[test]
	fn test_batch_estimate_keys_by_provider() {
		let estimator = SlippageEstimator::new();
		let quotes = vec![create_test_quote("hop-v1"), create_test_quote("relay-v1")];

		let estimates = estimator.batch_estimate(&quotes, "USDC", "ethereum", 1_000.0);

		assert_eq!(estimates.len(), 2);
		assert!(estimates.contains_key("hop-v1"));
		assert!(estimates.contains_key("relay-v1"));
	}

	#[test]
	fn test_with_liquidity_extension() {
		let estimator = SlippageEstimator::empty().with_liquidity("scroll", "usdc", 1_000_000.0);

		let estimate = estimator.estimate("USDC", "scroll", 100.0);
		assert_eq!(estimate.confidence, SlippageConfidence::High);
	}
}
