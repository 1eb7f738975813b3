//! Slippage estimate model

use serde::{Deserialize, Serialize};

/// Expected execution slippage for a quote at a given amount
///
/// Derived per request and never cached across differing amounts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlippageEstimate {
	/// Expected slippage percentage
	pub expected_percent: f64,

	/// Maximum slippage percentage; always strictly greater than expected
	/// to leave headroom for the caller's own tolerance check
	pub max_percent: f64,

	/// Confidence tier of the estimate
	pub confidence: SlippageConfidence,
}

/// How much liquidity data backs the estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlippageConfidence {
	/// Amount is small relative to known liquidity
	High,
	/// Amount is moderate relative to known liquidity
	Medium,
	/// Amount is large relative to liquidity, or liquidity is unknown
	Low,
}

impl SlippageEstimate {
	pub fn new(expected_percent: f64, max_percent: f64, confidence: SlippageConfidence) -> Self {
		Self {
			expected_percent,
			max_percent,
			confidence,
		}
	}
}
