//! Core adapter trait for provider implementations

use async_trait::async_trait;
use std::fmt::Debug;

use super::AdapterResult;
use crate::providers::Provider;
use crate::quotes::{RawProviderQuote, RouteRequest};

/// Contract every bridge provider adapter implements
///
/// An adapter is owned by the registry for its registered lifetime and is
/// otherwise stateless; any internal cache (e.g. a short-TTL gas price
/// cache) is private to the adapter and needs no cross-adapter
/// coordination.
#[async_trait]
pub trait BridgeAdapter: Send + Sync + Debug {
	/// Provider identity and declared capabilities
	///
	/// This is the only required accessor; `id` and `name` derive from it.
	fn provider_info(&self) -> &Provider;

	/// Provider identifier (used as the registry key)
	fn id(&self) -> &str {
		&self.provider_info().provider_id
	}

	/// Human-readable provider name
	fn name(&self) -> &str {
		&self.provider_info().name
	}

	/// Whether this provider can route the given pair
	///
	/// Must be cheap and local: it is called for every registered adapter
	/// on every request to select the fan-out set.
	fn supports_route(&self, source_chain: &str, destination_chain: &str, token: &str) -> bool;

	/// Fetch a quote for the requested route
	///
	/// May fail on network or business errors and may take arbitrarily
	/// long; the aggregator bounds each call with its own timeout. Retry
	/// against the provider's endpoint, if any, happens inside the
	/// adapter with a small fixed attempt cap.
	async fn fetch_quote(&self, request: &RouteRequest) -> AdapterResult<RawProviderQuote>;

	/// Probe the provider's endpoint
	async fn health_check(&self) -> AdapterResult<bool> {
		Ok(true)
	}
}
