//! bridgerank Adapters
//!
//! Provider registry and per-provider adapters for the bridgerank
//! aggregator.

pub mod client_cache;
pub mod hop_adapter;
pub mod registry;
pub mod relay_adapter;
pub mod stargate_adapter;

pub use client_cache::{ClientCache, ClientConfig};
pub use hop_adapter::HopAdapter;
pub use registry::{ProviderRegistry, RegistryEntry};
pub use relay_adapter::RelayAdapter;
pub use stargate_adapter::StargateAdapter;
pub use bridgerank_types::{AdapterError, AdapterResult, BridgeAdapter};

use std::sync::Arc;

use bridgerank_types::ProviderEndpointConfig;

/// Create a built-in adapter by provider id with an explicit endpoint
/// configuration
///
/// Adapters are constructed through ordinary composition; there is no
/// runtime discovery.
pub fn create_adapter(
	provider_id: &str,
	config: ProviderEndpointConfig,
) -> AdapterResult<Arc<dyn BridgeAdapter>> {
	match provider_id {
		"hop-v1" => Ok(Arc::new(HopAdapter::new(config)?)),
		"stargate-v1" => Ok(Arc::new(StargateAdapter::new(config)?)),
		"relay-v1" => Ok(Arc::new(RelayAdapter::new(config)?)),
		other => Err(AdapterError::ConfigError {
			reason: format!("Unknown provider adapter: {}", other),
		}),
	}
}

/// Build a registry pre-populated with the built-in provider adapters
///
/// Adapters are constructed against their public endpoints and registered
/// through ordinary composition; swap in custom configurations by
/// registering adapters individually instead.
pub fn registry_with_defaults() -> AdapterResult<ProviderRegistry> {
	let registry = ProviderRegistry::new();

	registry
		.register(Arc::new(HopAdapter::with_default_config()?))
		.map_err(|e| AdapterError::ConfigError {
			reason: e.to_string(),
		})?;
	registry
		.register(Arc::new(StargateAdapter::with_default_config()?))
		.map_err(|e| AdapterError::ConfigError {
			reason: e.to_string(),
		})?;
	registry
		.register(Arc::new(RelayAdapter::with_default_config()?))
		.map_err(|e| AdapterError::ConfigError {
			reason: e.to_string(),
		})?;

	Ok(registry)
}
