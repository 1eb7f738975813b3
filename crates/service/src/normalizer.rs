//! Quote normalization
//!
//! Merges one raw provider quote with its slippage estimate and
//! reliability score into the canonical comparable record. Composite
//! score and ranking position stay zeroed here; writing them is the
//! ranker's exclusive responsibility.

use chrono::Utc;

use bridgerank_types::{
	NormalizedQuote, RawProviderQuote, RouteRequest, RouteStatus, SlippageEstimate,
};

/// Scale factor fixing the combined fee at six decimal places
const FEE_PRECISION: f64 = 1e6;

/// Combine a raw quote, its slippage estimate and its reliability score
/// into a [`NormalizedQuote`]
pub fn normalize_quote(
	request: &RouteRequest,
	raw: &RawProviderQuote,
	slippage: &SlippageEstimate,
	reliability_score: f64,
) -> NormalizedQuote {
	let total_fee_usd = (raw.fees.total_usd() * FEE_PRECISION).round() / FEE_PRECISION;

	NormalizedQuote {
		provider_id: raw.provider_id.clone(),
		provider_name: raw.provider_name.clone(),
		source_chain: request.source_chain.clone(),
		destination_chain: request.destination_chain.clone(),
		source_token: request.source_token.clone(),
		destination_token: request.destination_token().to_string(),
		amount_in: request.amount.clone(),
		amount_out: raw.output_amount.clone(),
		total_fee_usd,
		estimated_time_secs: raw.estimated_time_secs,
		slippage_percent: slippage.expected_percent,
		slippage_confidence: slippage.confidence,
		reliability_score,
		composite_score: 0.0,
		ranking_position: 0,
		status: RouteStatus::Active,
		steps: raw.steps.clone(),
		fetched_at: Utc::now(),
	}
}
