//! Quote domain models
//!
//! A `RawProviderQuote` is one provider's answer for one request, in that
//! provider's own terms. It is ephemeral: produced per request, normalized
//! into a [`NormalizedQuote`] for comparison, never persisted.

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod normalized;
pub mod request;

pub use errors::{AggregationError, AggregationResult};
pub use normalized::{NormalizedQuote, RouteStatus};
pub use request::RouteRequest;

/// A single provider's quote for a requested route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProviderQuote {
	/// Identifier of the provider that produced this quote
	pub provider_id: String,

	/// Display name of the provider
	pub provider_name: String,

	/// Expected output amount (decimal string to preserve precision)
	pub output_amount: String,

	/// Fee components for the route
	pub fees: FeeBreakdown,

	/// Estimated time to finality in seconds
	pub estimated_time_secs: u64,

	/// Ordered execution steps making up the route
	pub steps: Vec<RouteStep>,
}

/// Fee components of a quote, in USD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
	/// Protocol / bridge fee
	pub protocol_fee_usd: f64,

	/// Gas or network cost
	pub gas_cost_usd: f64,
}

impl FeeBreakdown {
	pub fn new(protocol_fee_usd: f64, gas_cost_usd: f64) -> Self {
		Self {
			protocol_fee_usd,
			gas_cost_usd,
		}
	}

	/// Combined fee across all components
	pub fn total_usd(&self) -> f64 {
		self.protocol_fee_usd + self.gas_cost_usd
	}
}

/// One execution step within a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
	/// What this step does
	pub kind: StepKind,

	/// Token entering the step
	pub input_token: String,

	/// Token leaving the step
	pub output_token: String,

	/// Amount entering the step (decimal string)
	pub input_amount: String,

	/// Amount leaving the step (decimal string)
	pub output_amount: String,

	/// Fee charged by this step, in USD
	pub fee_usd: f64,
}

/// Step type within a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
	/// Same-chain token swap
	Swap,
	/// Cross-chain bridge transfer
	Bridge,
	/// Wrap or unwrap of a native asset
	Wrap,
}

impl RawProviderQuote {
	pub fn new(
		provider_id: String,
		provider_name: String,
		output_amount: String,
		fees: FeeBreakdown,
		estimated_time_secs: u64,
	) -> Self {
		Self {
			provider_id,
			provider_name,
			output_amount,
			fees,
			estimated_time_secs,
			steps: Vec::new(),
		}
	}

	pub fn with_steps(mut self, steps: Vec<RouteStep>) -> Self {
		self.steps = steps;
		self
	}

	/// Parse the output amount as a float
	pub fn output_value(&self) -> Option<f64> {
		self.output_amount.parse::<f64>().ok()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn create_test_quote() -> RawProviderQuote {
		RawProviderQuote::new(
			"hop-v1".to_string(),
			"Hop Protocol".to_string(),
			"2487.50".to_string(),
			FeeBreakdown::new(2.50, 1.25),
			180,
		)
		.with_steps(vec![RouteStep {
			kind: StepKind::Bridge,
			input_token: "USDC".to_string(),
			output_token: "USDC".to_string(),
			input_amount: "2500.0".to_string(),
			output_amount: "2487.50".to_string(),
			fee_usd: 2.50,
		}])
	}

	#[test]
	fn test_quote_creation() {
		let quote = create_test_quote();

		assert_eq!(quote.provider_id, "hop-v1");
		assert_eq!(quote.estimated_time_secs, 180);
		assert_eq!(quote.steps.len(), 1);
		assert_eq!(quote.steps[0].kind, StepKind::Bridge);
	}

	#[test]
	fn test_fee_total() {
		let fees = FeeBreakdown::new(2.50, 1.25);
		assert!((fees.total_usd() - 3.75).abs() < f64::EPSILON);
	}

	#[test]
	fn test_output_value_parsing() {
		let quote = create_test_quote();
		assert_eq!(quote.output_value(), Some(2487.50));

		let mut bad = create_test_quote();
		bad.output_amount = "n/a".to_string();
		assert_eq!(bad.output_value(), None);
	}
}
