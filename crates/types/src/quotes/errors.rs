//! Error types for route aggregation

use thiserror::Error;

use crate::providers::RegistryError;

/// Result type for aggregation operations
pub type AggregationResult<T> = Result<T, AggregationError>;

/// Errors surfaced by the quote aggregator
///
/// Individual provider failures never appear here; they are absorbed into
/// the failed-provider count. The caller either gets a non-empty ranked
/// list or exactly one of these kinds.
#[derive(Error, Debug)]
pub enum AggregationError {
	/// No registered provider supports the requested pair; detected before
	/// any fetch is attempted.
	#[error("No provider supports route {source_chain} -> {destination_chain} for token {token}")]
	RouteNotSupported {
		source_chain: String,
		destination_chain: String,
		token: String,
	},

	/// At least one provider supported the pair, but every fetch attempt
	/// failed or timed out.
	#[error("All {attempted} matched providers failed to return a quote")]
	AllProvidersFailed { attempted: usize },

	#[error("Registry error: {0}")]
	Registry(#[from] RegistryError),
}
