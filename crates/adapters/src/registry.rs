//! Provider registry
//!
//! Holds the set of registered adapters keyed by provider identifier.
//! Reads happen concurrently during quote fan-out; registration and
//! removal serialize behind the write lock. Listing preserves insertion
//! order.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

use bridgerank_types::{BridgeAdapter, Provider, RegistryError, RegistryResult};

/// A registered adapter plus its registration metadata
#[derive(Clone)]
pub struct RegistryEntry {
	/// The adapter itself
	pub adapter: Arc<dyn BridgeAdapter>,

	/// When the adapter was registered; immutable once set
	pub registered_at: DateTime<Utc>,
}

#[derive(Default)]
struct RegistryInner {
	entries: HashMap<String, RegistryEntry>,
	order: Vec<String>,
}

/// Thread-safe registry of provider adapters
///
/// Overwrite behavior is fixed at construction so registration semantics
/// stay predictable under concurrent startup.
#[derive(Clone)]
pub struct ProviderRegistry {
	inner: Arc<RwLock<RegistryInner>>,
	allow_overwrite: bool,
}

impl ProviderRegistry {
	/// Create a registry that rejects duplicate registrations
	pub fn new() -> Self {
		Self {
			inner: Arc::new(RwLock::new(RegistryInner::default())),
			allow_overwrite: false,
		}
	}

	/// Create a registry that replaces existing registrations with a warning
	pub fn with_overwrite() -> Self {
		Self {
			inner: Arc::new(RwLock::new(RegistryInner::default())),
			allow_overwrite: true,
		}
	}

	/// Register an adapter under its own provider id
	///
	/// Fails with [`RegistryError::DuplicateProvider`] when the id is
	/// already present and overwrite is disabled.
	pub fn register(&self, adapter: Arc<dyn BridgeAdapter>) -> RegistryResult<()> {
		let provider_id = adapter.id().to_string();
		let mut inner = self
			.inner
			.write()
			.unwrap_or_else(PoisonError::into_inner);

		if inner.entries.contains_key(&provider_id) {
			if !self.allow_overwrite {
				return Err(RegistryError::DuplicateProvider { provider_id });
			}
			warn!(
				provider_id = %provider_id,
				"Overwriting existing provider registration"
			);
		} else {
			inner.order.push(provider_id.clone());
		}

		debug!(provider_id = %provider_id, "Registering provider adapter");
		inner.entries.insert(
			provider_id,
			RegistryEntry {
				adapter,
				registered_at: Utc::now(),
			},
		);

		Ok(())
	}

	/// Get an adapter, failing when it is not registered
	pub fn get(&self, provider_id: &str) -> RegistryResult<Arc<dyn BridgeAdapter>> {
		self.try_get(provider_id)
			.ok_or_else(|| RegistryError::ProviderNotFound {
				provider_id: provider_id.to_string(),
			})
	}

	/// Get an adapter, or `None` when it is not registered
	pub fn try_get(&self, provider_id: &str) -> Option<Arc<dyn BridgeAdapter>> {
		let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
		inner
			.entries
			.get(provider_id)
			.map(|entry| Arc::clone(&entry.adapter))
	}

	/// All adapters declaring the given capability
	///
	/// Fails with [`RegistryError::CapabilityNotFound`] when no registered
	/// adapter declares it.
	pub fn get_by_capability(
		&self,
		capability: &str,
	) -> RegistryResult<Vec<Arc<dyn BridgeAdapter>>> {
		let matched: Vec<Arc<dyn BridgeAdapter>> = self
			.adapters()
			.into_iter()
			.filter(|adapter| adapter.provider_info().has_capability(capability))
			.collect();

		if matched.is_empty() {
			return Err(RegistryError::CapabilityNotFound {
				capability: capability.to_string(),
			});
		}

		Ok(matched)
	}

	/// Registered provider ids in insertion order
	pub fn list(&self) -> Vec<String> {
		let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
		inner.order.clone()
	}

	/// Registered entries (id, entry) in insertion order
	pub fn list_entries(&self) -> Vec<(String, RegistryEntry)> {
		let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
		inner
			.order
			.iter()
			.filter_map(|id| {
				inner
					.entries
					.get(id)
					.map(|entry| (id.clone(), entry.clone()))
			})
			.collect()
	}

	/// All registered adapters in insertion order
	pub fn adapters(&self) -> Vec<Arc<dyn BridgeAdapter>> {
		let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
		inner
			.order
			.iter()
			.filter_map(|id| inner.entries.get(id).map(|e| Arc::clone(&e.adapter)))
			.collect()
	}

	/// Provider identities for every registered adapter
	pub fn providers(&self) -> Vec<Provider> {
		self.adapters()
			.iter()
			.map(|adapter| adapter.provider_info().clone())
			.collect()
	}

	/// Remove an adapter; returns whether it was present. Idempotent.
	pub fn unregister(&self, provider_id: &str) -> bool {
		let mut inner = self
			.inner
			.write()
			.unwrap_or_else(PoisonError::into_inner);
		let removed = inner.entries.remove(provider_id).is_some();
		if removed {
			inner.order.retain(|id| id != provider_id);
			debug!(provider_id = %provider_id, "Unregistered provider adapter");
		}
		removed
	}

	/// Remove every registration. Idempotent.
	pub fn clear(&self) {
		let mut inner = self
			.inner
			.write()
			.unwrap_or_else(PoisonError::into_inner);
		inner.entries.clear();
		inner.order.clear();
	}

	pub fn len(&self) -> usize {
		let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
		inner.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl Default for ProviderRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for ProviderRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ProviderRegistry")
			.field("providers", &self.list())
			.field("allow_overwrite", &self.allow_overwrite)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use bridgerank_types::{AdapterResult, RawProviderQuote, RouteRequest};

	#[derive(Debug)]
	struct StubAdapter {
		provider: Provider,
	}

	impl StubAdapter {
		fn new(id: &str, capabilities: Vec<&str>) -> Arc<Self> {
			Arc::new(Self {
				provider: Provider::new(
					id.to_string(),
					format!("{} Provider", id),
					"1.0.0".to_string(),
				)
				.with_capabilities(capabilities.into_iter().map(String::from).collect()),
			})
		}
	}

	#[async_trait]
	impl BridgeAdapter for StubAdapter {
		fn provider_info(&self) -> &Provider {
			&self.provider
		}

		fn supports_route(&self, _source: &str, _destination: &str, _token: &str) -> bool {
			true
		}

		async fn fetch_quote(&self, _request: &RouteRequest) -> AdapterResult<RawProviderQuote> {
			unimplemented!("stub adapter never fetches")
		}
	}

	#[test]
	fn test_register_and_get() {
		let registry = ProviderRegistry::new();
		registry
			.register(StubAdapter::new("hop-v1", vec!["bridge"]))
			.unwrap();

		assert_eq!(registry.len(), 1);
		assert!(registry.get("hop-v1").is_ok());
		assert!(registry.try_get("hop-v1").is_some());
		assert!(registry.try_get("missing").is_none());
		assert!(matches!(
			registry.get("missing"),
			Err(RegistryError::ProviderNotFound { .. })
		));
	}

	#[test]
	fn test_duplicate_registration_rejected() {
		let registry = ProviderRegistry::new();
		registry
			.register(StubAdapter::new("hop-v1", vec!["bridge"]))
			.unwrap();

		let result = registry.register(StubAdapter::new("hop-v1", vec!["bridge"]));
		assert!(matches!(
			result,
			Err(RegistryError::DuplicateProvider { .. })
		));
		assert_eq!(registry.len(), 1);
	}

	#[test]
	fn test_overwrite_mode_replaces() {
		let registry = ProviderRegistry::with_overwrite();
		registry
			.register(StubAdapter::new("hop-v1", vec!["bridge"]))
			.unwrap();
		registry
			.register(StubAdapter::new("hop-v1", vec!["bridge", "swap"]))
			.unwrap();

		assert_eq!(registry.len(), 1);
		let adapter = registry.get("hop-v1").unwrap();
		assert!(adapter.provider_info().has_capability("swap"));
	}

	#[test]
	fn test_capability_lookup() {
		let registry = ProviderRegistry::new();
		registry
			.register(StubAdapter::new("hop-v1", vec!["bridge", "swap"]))
			.unwrap();
		registry
			.register(StubAdapter::new("stargate-v1", vec!["bridge"]))
			.unwrap();

		let bridges = registry.get_by_capability("bridge").unwrap();
		assert_eq!(bridges.len(), 2);

		let swappers = registry.get_by_capability("swap").unwrap();
		assert_eq!(swappers.len(), 1);
		assert_eq!(swappers[0].id(), "hop-v1");

		assert!(matches!(
			registry.get_by_capability("lend"),
			Err(RegistryError::CapabilityNotFound { .. })
		));
	}

	#[test]
	fn test_listing_preserves_insertion_order() {
		let registry = ProviderRegistry::new();
		for id in ["stargate-v1", "hop-v1", "relay-v1"] {
			registry.register(StubAdapter::new(id, vec!["bridge"])).unwrap();
		}

		assert_eq!(registry.list(), vec!["stargate-v1", "hop-v1", "relay-v1"]);

		let entries = registry.list_entries();
		assert_eq!(entries.len(), 3);
		assert_eq!(entries[1].0, "hop-v1");
	}

	#[test]
	fn test_unregister_and_clear_are_idempotent() {
		let registry = ProviderRegistry::new();
		registry
			.register(StubAdapter::new("hop-v1", vec!["bridge"]))
			.unwrap();

		assert!(registry.unregister("hop-v1"));
		assert!(!registry.unregister("hop-v1"));
		assert!(registry.is_empty());

		registry.clear();
		registry.clear();
		assert_eq!(registry.len(), 0);
	}
}
