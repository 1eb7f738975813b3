//! Route request model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ranking::RankingStrategy;

/// A caller's request for a cross-chain transfer route
///
/// Constructed once per request and never mutated. The transport layer is
/// expected to have validated the raw input (positive amount, known
/// strategy, non-empty identifiers) before this is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
	/// Unique identifier for this request
	pub request_id: String,

	/// Source chain identifier (e.g. "ethereum")
	pub source_chain: String,

	/// Destination chain identifier (e.g. "arbitrum")
	pub destination_chain: String,

	/// Token to transfer from the source chain
	pub source_token: String,

	/// Token to receive on the destination chain; defaults to the source token
	pub destination_token: Option<String>,

	/// Amount to transfer (decimal string to preserve precision)
	pub amount: String,

	/// Caller's slippage tolerance as a percentage, if any
	///
	/// Carried through and echoed back; routes exceeding it are ranked
	/// lower via the slippage sub-score, never filtered out here.
	pub slippage_tolerance: Option<f64>,

	/// Ranking strategy selecting how candidate routes are ordered
	pub strategy: RankingStrategy,
}

impl RouteRequest {
	/// Create a new route request with a generated request id
	pub fn new(
		source_chain: String,
		destination_chain: String,
		source_token: String,
		amount: String,
	) -> Self {
		Self {
			request_id: Uuid::new_v4().to_string(),
			source_chain,
			destination_chain,
			source_token,
			destination_token: None,
			amount,
			slippage_tolerance: None,
			strategy: RankingStrategy::default(),
		}
	}

	/// Token the caller will receive; falls back to the source token
	pub fn destination_token(&self) -> &str {
		self.destination_token
			.as_deref()
			.unwrap_or(&self.source_token)
	}

	/// Parse the requested amount as a float for estimation math
	pub fn amount_value(&self) -> Option<f64> {
		self.amount.parse::<f64>().ok().filter(|a| *a >= 0.0)
	}

	pub fn with_destination_token(mut self, token: String) -> Self {
		self.destination_token = Some(token);
		self
	}

	pub fn with_slippage_tolerance(mut self, tolerance: f64) -> Self {
		self.slippage_tolerance = Some(tolerance);
		self
	}

	pub fn with_strategy(mut self, strategy: RankingStrategy) -> Self {
		self.strategy = strategy;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn create_test_request() -> RouteRequest {
		RouteRequest::new(
			"ethereum".to_string(),
			"arbitrum".to_string(),
			"USDC".to_string(),
			"2500.0".to_string(),
		)
	}

	#[test]
	fn test_request_creation() {
		let request = create_test_request();

		assert_eq!(request.source_chain, "ethereum");
		assert_eq!(request.destination_chain, "arbitrum");
		assert_eq!(request.strategy, RankingStrategy::Balanced);
		assert!(!request.request_id.is_empty());
	}

	#[test]
	fn test_destination_token_defaults_to_source() {
		let request = create_test_request();
		assert_eq!(request.destination_token(), "USDC");

		let request = request.with_destination_token("USDT".to_string());
		assert_eq!(request.destination_token(), "USDT");
	}

	#[test]
	fn test_amount_parsing() {
		let request = create_test_request();
		assert_eq!(request.amount_value(), Some(2500.0));

		let mut bad = create_test_request();
		bad.amount = "not-a-number".to_string();
		assert_eq!(bad.amount_value(), None);

		let mut negative = create_test_request();
		negative.amount = "-5".to_string();
		assert_eq!(negative.amount_value(), None);
	}
}
