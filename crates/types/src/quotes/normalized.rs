//! Normalized quote model
//!
//! The canonical comparable unit produced by the normalizer and finalized
//! by the ranker. After a ranking pass the composite score and position
//! are write-once; a quote handed back to the caller is never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RouteStep;
use crate::slippage::SlippageConfidence;

/// Provider-agnostic representation of one candidate route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedQuote {
	/// Identifier of the provider that produced the underlying quote
	pub provider_id: String,

	/// Display name of the provider
	pub provider_name: String,

	/// Source chain identifier
	pub source_chain: String,

	/// Destination chain identifier
	pub destination_chain: String,

	/// Token sent on the source chain
	pub source_token: String,

	/// Token received on the destination chain
	pub destination_token: String,

	/// Input amount (decimal string)
	pub amount_in: String,

	/// Output amount (decimal string)
	pub amount_out: String,

	/// Total fee in USD (protocol fee + gas cost, fixed precision)
	pub total_fee_usd: f64,

	/// Estimated time to finality in seconds
	pub estimated_time_secs: u64,

	/// Expected slippage percentage for the requested amount
	pub slippage_percent: f64,

	/// Confidence tier of the slippage estimate
	pub slippage_confidence: SlippageConfidence,

	/// Reliability score of the provider, 0-100
	pub reliability_score: f64,

	/// Composite ranking score, 0-100; 0.0 until ranked
	pub composite_score: f64,

	/// Position in the ranked ordering, 1-based; 0 until ranked
	pub ranking_position: usize,

	/// Operational status of the route
	pub status: RouteStatus,

	/// Execution steps carried over from the provider quote
	pub steps: Vec<RouteStep>,

	/// When the underlying quote was fetched
	pub fetched_at: DateTime<Utc>,
}

/// Operational status of a candidate route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStatus {
	/// Route is usable
	Active,
	/// Route is usable but the provider is showing elevated failures
	Degraded,
	/// Route's provider is currently unreachable
	Offline,
}

impl NormalizedQuote {
	/// Whether this quote has been through a ranking pass
	pub fn is_ranked(&self) -> bool {
		self.ranking_position > 0
	}
}
