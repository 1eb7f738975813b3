//! HTTP client cache for provider adapters
//!
//! Provides per-provider client instances with connection pooling and
//! keep-alive, expiring cached clients on a TTL.

use dashmap::DashMap;
use reqwest::{Client, ClientBuilder};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use bridgerank_types::{AdapterError, AdapterResult, ProviderEndpointConfig};

/// Configuration for creating pooled HTTP clients
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientConfig {
	/// Base endpoint of the provider
	pub base_url: String,
	/// Provider identifier for cache differentiation
	pub provider_id: String,
	/// Maximum number of idle connections per host
	pub max_idle_per_host: usize,
	/// Connection keep-alive timeout
	pub keep_alive_timeout_ms: u64,
	/// Additional headers (auth, API keys)
	pub headers: Vec<(String, String)>,
}

impl ClientConfig {
	/// Build a client configuration for one provider's endpoint config
	pub fn for_provider(provider_id: &str, config: &ProviderEndpointConfig) -> Self {
		let mut headers = vec![
			("User-Agent".to_string(), "bridgerank/0.1".to_string()),
			("Accept".to_string(), "application/json".to_string()),
		];

		if let Some(provider_headers) = &config.headers {
			for (key, value) in provider_headers {
				headers.push((key.clone(), value.clone()));
			}
		}
		// Hash/Eq require a stable ordering for the cache key.
		headers.sort();

		Self {
			base_url: config.endpoint.clone(),
			provider_id: provider_id.to_string(),
			max_idle_per_host: 10,
			keep_alive_timeout_ms: 90_000,
			headers,
		}
	}
}

/// Cached client with its creation timestamp for TTL management
#[derive(Debug, Clone)]
struct CachedClient {
	client: Arc<Client>,
	created_at: Instant,
}

impl CachedClient {
	fn new(client: Client) -> Self {
		Self {
			client: Arc::new(client),
			created_at: Instant::now(),
		}
	}

	fn is_expired(&self, ttl: Duration) -> bool {
		self.created_at.elapsed() > ttl
	}
}

/// Thread-safe, TTL-bounded cache of pooled HTTP clients
#[derive(Clone, Debug)]
pub struct ClientCache {
	clients: Arc<DashMap<ClientConfig, CachedClient>>,
	ttl: Duration,
}

impl ClientCache {
	/// Create a cache with the default 30-minute TTL
	pub fn new() -> Self {
		Self::with_ttl(Duration::from_secs(30 * 60))
	}

	/// Create a cache with a custom TTL
	pub fn with_ttl(ttl: Duration) -> Self {
		Self {
			clients: Arc::new(DashMap::new()),
			ttl,
		}
	}

	/// Get or create a pooled client for the given configuration
	pub fn get_client(&self, config: &ClientConfig) -> AdapterResult<Arc<Client>> {
		// Atomically drop an expired entry before the read below.
		self.clients.remove_if(config, |_, cached| {
			let expired = cached.is_expired(self.ttl);
			if expired {
				warn!(
					provider_id = %config.provider_id,
					age = ?cached.created_at.elapsed(),
					"Cached HTTP client expired, creating a new one"
				);
			}
			expired
		});

		if let Some(cached) = self.clients.get(config) {
			debug!(
				provider_id = %config.provider_id,
				age = ?cached.created_at.elapsed(),
				"Reusing cached HTTP client"
			);
			return Ok(cached.client.clone());
		}

		let client = self.build_client(config)?;
		let cached = CachedClient::new(client);
		let client_arc = cached.client.clone();

		use dashmap::mapref::entry::Entry;
		match self.clients.entry(config.clone()) {
			Entry::Occupied(entry) => {
				// Another task created the client first; use theirs.
				Ok(entry.get().client.clone())
			},
			Entry::Vacant(entry) => {
				entry.insert(cached);
				debug!(provider_id = %config.provider_id, "Cached new HTTP client");
				Ok(client_arc)
			},
		}
	}

	fn build_client(&self, config: &ClientConfig) -> AdapterResult<Client> {
		let mut builder = ClientBuilder::new()
			.pool_max_idle_per_host(config.max_idle_per_host)
			.pool_idle_timeout(Duration::from_millis(config.keep_alive_timeout_ms))
			.tcp_keepalive(Duration::from_secs(60));

		let mut header_map = reqwest::header::HeaderMap::new();
		for (key, value) in &config.headers {
			if let (Ok(header_name), Ok(header_value)) = (
				reqwest::header::HeaderName::from_bytes(key.as_bytes()),
				reqwest::header::HeaderValue::from_str(value),
			) {
				header_map.insert(header_name, header_value);
			}
		}
		builder = builder.default_headers(header_map);

		builder.build().map_err(AdapterError::HttpError)
	}

	/// Drop all expired clients; returns how many were removed
	pub fn cleanup_expired(&self) -> usize {
		let mut removed = 0;
		self.clients.retain(|config, cached| {
			let expired = cached.is_expired(self.ttl);
			if expired {
				removed += 1;
				debug!(provider_id = %config.provider_id, "Removed expired HTTP client");
			}
			!expired
		});
		removed
	}

	/// Drop every cached client
	pub fn clear(&self) {
		self.clients.clear();
	}

	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	/// Shared process-wide cache for adapter implementations
	pub fn for_adapter() -> Self {
		GLOBAL_CLIENT_CACHE.clone()
	}
}

impl Default for ClientCache {
	fn default() -> Self {
		Self::new()
	}
}

lazy_static::lazy_static! {
	static ref GLOBAL_CLIENT_CACHE: ClientCache = ClientCache::new();
}

#[cfg(test)]
mod tests {
	use super::*;

	fn create_test_config(url: &str) -> ClientConfig {
		ClientConfig {
			base_url: url.to_string(),
			provider_id: "test-provider".to_string(),
			max_idle_per_host: 5,
			keep_alive_timeout_ms: 60_000,
			headers: vec![],
		}
	}

	#[test]
	fn test_client_config_for_provider() {
		let endpoint_config =
			ProviderEndpointConfig::new("https://api.example.com".to_string(), 2000);
		let config = ClientConfig::for_provider("hop-v1", &endpoint_config);

		assert_eq!(config.base_url, "https://api.example.com");
		assert_eq!(config.provider_id, "hop-v1");
		assert_eq!(config.max_idle_per_host, 10);
	}

	#[tokio::test]
	async fn test_client_reuse() {
		let cache = ClientCache::new();
		let config = create_test_config("https://reuse.example.com");

		let client1 = cache.get_client(&config).unwrap();
		let client2 = cache.get_client(&config).unwrap();

		assert!(Arc::ptr_eq(&client1, &client2));
	}

	#[tokio::test]
	async fn test_ttl_expiration() {
		let cache = ClientCache::with_ttl(Duration::from_millis(50));
		let config = create_test_config("https://ttl.example.com");

		let client1 = cache.get_client(&config).unwrap();
		tokio::time::sleep(Duration::from_millis(100)).await;
		let client2 = cache.get_client(&config).unwrap();

		assert!(!Arc::ptr_eq(&client1, &client2));
	}

	#[tokio::test]
	async fn test_cleanup_expired() {
		let cache = ClientCache::with_ttl(Duration::from_millis(10));
		let config = create_test_config("https://cleanup.example.com");

		cache.get_client(&config).unwrap();
		tokio::time::sleep(Duration::from_millis(50)).await;

		assert_eq!(cache.cleanup_expired(), 1);
	}

	#[test]
	fn test_shared_cache_clones() {
		let cache1 = ClientCache::new();
		let cache2 = cache1.clone();
		let config = create_test_config("https://clone.example.com");

		let client1 = cache1.get_client(&config).unwrap();
		let client2 = cache2.get_client(&config).unwrap();

		assert!(Arc::ptr_eq(&client1, &client2));
	}
}
