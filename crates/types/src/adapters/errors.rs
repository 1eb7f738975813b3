//! Error types for adapter operations

use thiserror::Error;

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Errors raised by provider adapters
///
/// These never cross the aggregator boundary; the aggregator converts
/// them into the failed-provider count.
#[derive(Error, Debug)]
pub enum AdapterError {
	#[error("HTTP request failed: {0}")]
	HttpError(#[from] reqwest::Error),

	#[error("Timeout occurred after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },

	#[error("HTTP {status_code}: {reason}")]
	HttpStatusError { status_code: u16, reason: String },

	#[error("Route not supported by {provider_id}: {source_chain} -> {destination_chain} ({token})")]
	UnsupportedRoute {
		provider_id: String,
		source_chain: String,
		destination_chain: String,
		token: String,
	},

	#[error("Rate limit exceeded for provider {provider_id}")]
	RateLimitExceeded { provider_id: String },

	#[error("Configuration error: {reason}")]
	ConfigError { reason: String },

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

impl AdapterError {
	/// Extract the HTTP status code from the error if available
	pub fn status_code(&self) -> Option<u16> {
		match self {
			AdapterError::HttpStatusError { status_code, .. } => Some(*status_code),
			AdapterError::HttpError(err) => err.status().map(|status| status.as_u16()),
			_ => None,
		}
	}

	/// Create an HTTP failure error from a response status
	pub fn from_http_status(status_code: u16) -> Self {
		let reason = match status_code {
			400 => "Bad Request".to_string(),
			401 => "Unauthorized".to_string(),
			404 => "Not Found".to_string(),
			408 => "Request Timeout".to_string(),
			429 => "Too Many Requests".to_string(),
			500 => "Internal Server Error".to_string(),
			502 => "Bad Gateway".to_string(),
			503 => "Service Unavailable".to_string(),
			504 => "Gateway Timeout".to_string(),
			_ => format!("HTTP Error {}", status_code),
		};

		Self::HttpStatusError {
			status_code,
			reason,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_status_code_extraction() {
		let error = AdapterError::from_http_status(503);
		assert_eq!(error.status_code(), Some(503));
		assert!(error.to_string().contains("Service Unavailable"));

		let error = AdapterError::Timeout { timeout_ms: 2000 };
		assert_eq!(error.status_code(), None);
	}
}
