//! Core Provider domain model
//!
//! A `Provider` describes one registered bridge/liquidity source: its
//! identity, the capabilities it declares, and optional endpoint
//! configuration used by its adapter.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod errors;

pub use errors::{RegistryError, RegistryResult};

/// Identity and declared capabilities of a bridge provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
	/// Unique identifier for the provider
	pub provider_id: String,

	/// Human-readable name
	pub name: String,

	/// Description of the provider
	pub description: Option<String>,

	/// Version of the provider integration
	pub version: String,

	/// Capabilities this provider declares (e.g. "bridge", "swap", "wrap")
	pub capabilities: Vec<String>,

	/// Provider-specific configuration values
	pub configuration: HashMap<String, serde_json::Value>,
}

impl Provider {
	/// Create a new provider identity
	pub fn new(provider_id: String, name: String, version: String) -> Self {
		Self {
			provider_id,
			name,
			description: None,
			version,
			capabilities: Vec::new(),
			configuration: HashMap::new(),
		}
	}

	/// Check whether this provider declares a capability
	///
	/// Comparison is case-insensitive so that config-sourced capability
	/// names match regardless of casing.
	pub fn has_capability(&self, capability: &str) -> bool {
		self.capabilities
			.iter()
			.any(|c| c.eq_ignore_ascii_case(capability))
	}

	pub fn with_description(mut self, description: String) -> Self {
		self.description = Some(description);
		self
	}

	pub fn with_capabilities(mut self, capabilities: Vec<String>) -> Self {
		self.capabilities = capabilities;
		self
	}

	pub fn with_config(mut self, key: String, value: serde_json::Value) -> Self {
		self.configuration.insert(key, value);
		self
	}
}

/// Optional runtime endpoint configuration for a provider adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderEndpointConfig {
	/// Base endpoint for the provider API
	pub endpoint: String,

	/// Request timeout in milliseconds
	pub timeout_ms: u64,

	/// Maximum retry attempts for failed requests
	pub max_retries: u32,

	/// Rate limit budget, requests per minute
	pub rate_limit_per_min: Option<u32>,

	/// Custom HTTP headers (auth tokens, API keys)
	pub headers: Option<HashMap<String, String>>,
}

impl ProviderEndpointConfig {
	pub fn new(endpoint: String, timeout_ms: u64) -> Self {
		Self {
			endpoint,
			timeout_ms,
			max_retries: 2,
			rate_limit_per_min: None,
			headers: None,
		}
	}

	pub fn with_max_retries(mut self, retries: u32) -> Self {
		self.max_retries = retries;
		self
	}

	pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
		self.headers = Some(headers);
		self
	}
}
