//! Relay adapter implementation
//!
//! Quotes fast-fill transfers through the Relay API. The adapter owns a
//! short-TTL gas price cache used to fill in gas cost when the quote
//! endpoint omits it; the cache is private to this adapter.

use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::{
	header::{HeaderMap, HeaderValue},
	Client,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use bridgerank_types::{
	AdapterError, AdapterResult, BridgeAdapter, FeeBreakdown, Provider, ProviderEndpointConfig,
	RawProviderQuote, RouteRequest, RouteStep, StepKind,
};

use crate::client_cache::{ClientCache, ClientConfig};

const SUPPORTED_CHAINS: &[&str] = &["ethereum", "base", "arbitrum", "zksync", "linea"];
const SUPPORTED_TOKENS: &[&str] = &["ETH", "WETH", "USDC"];

/// Gas price entries expire quickly; stale prices are worse than a refetch
const GAS_CACHE_TTL: Duration = Duration::from_secs(15);

/// Fallback gas cost when neither the quote nor the gas endpoint provides one
const DEFAULT_GAS_COST_USD: f64 = 2.0;

/// Cached gas cost for one chain
#[derive(Debug, Clone, Copy)]
struct GasPriceEntry {
	cost_usd: f64,
	fetched_at: Instant,
}

/// Short-TTL cache of per-chain gas costs, private to the Relay adapter
#[derive(Debug, Default)]
struct GasPriceCache {
	entries: DashMap<String, GasPriceEntry>,
}

impl GasPriceCache {
	fn new() -> Self {
		Self {
			entries: DashMap::new(),
		}
	}

	/// Read a cached value; expiry is checked on read
	fn get(&self, chain: &str) -> Option<f64> {
		let key = chain.to_ascii_lowercase();
		let expired = match self.entries.get(&key) {
			Some(entry) => {
				if entry.fetched_at.elapsed() <= GAS_CACHE_TTL {
					return Some(entry.cost_usd);
				}
				true
			},
			None => false,
		};
		// The read guard is released before touching the map again.
		if expired {
			self.entries.remove(&key);
		}
		None
	}

	fn insert(&self, chain: &str, cost_usd: f64) {
		self.entries.insert(
			chain.to_ascii_lowercase(),
			GasPriceEntry {
				cost_usd,
				fetched_at: Instant::now(),
			},
		);
	}
}

/// Client strategy for the Relay adapter
#[derive(Debug)]
enum ClientStrategy {
	Cached(ClientCache),
	OnDemand,
}

/// Relay adapter for fast-fill bridge quotes
#[derive(Debug)]
pub struct RelayAdapter {
	provider: Provider,
	config: ProviderEndpointConfig,
	client_strategy: ClientStrategy,
	gas_cache: GasPriceCache,
}

/// Quote response from the Relay API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayQuoteResponse {
	/// Amount delivered on the destination chain
	pub amount_out: String,
	/// Relayer fee in USD
	pub relayer_fee_usd: f64,
	/// Gas cost in USD; absent when the relayer did not estimate it
	pub gas_cost_usd: Option<f64>,
	/// Estimated fill time in seconds
	pub fill_time_sec: u64,
	/// Whether the transfer needs a wrap step on the destination
	#[serde(default)]
	pub requires_wrap: bool,
}

/// Gas endpoint response from the Relay API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelayGasResponse {
	cost_usd: f64,
}

impl RelayAdapter {
	/// Create a new Relay adapter with pooled client caching
	pub fn new(config: ProviderEndpointConfig) -> AdapterResult<Self> {
		Self::with_cache(config, ClientCache::for_adapter())
	}

	/// Create a Relay adapter with a custom client cache
	pub fn with_cache(config: ProviderEndpointConfig, cache: ClientCache) -> AdapterResult<Self> {
		Ok(Self {
			provider: Self::provider_identity(),
			config,
			client_strategy: ClientStrategy::Cached(cache),
			gas_cache: GasPriceCache::new(),
		})
	}

	/// Create a Relay adapter that builds a client per request
	pub fn without_cache(config: ProviderEndpointConfig) -> AdapterResult<Self> {
		Ok(Self {
			provider: Self::provider_identity(),
			config,
			client_strategy: ClientStrategy::OnDemand,
			gas_cache: GasPriceCache::new(),
		})
	}

	/// Create a Relay adapter against the public endpoint
	pub fn with_default_config() -> AdapterResult<Self> {
		Self::new(ProviderEndpointConfig::new(
			"https://api.relay.link/v1".to_string(),
			3000,
		))
	}

	fn provider_identity() -> Provider {
		Provider::new(
			"relay-v1".to_string(),
			"Relay".to_string(),
			"1.0.0".to_string(),
		)
		.with_description("Fast-fill relayer bridge".to_string())
		.with_capabilities(vec![
			"bridge".to_string(),
			"wrap".to_string(),
			"gas-estimates".to_string(),
		])
	}

	fn create_client(config: &ProviderEndpointConfig) -> AdapterResult<Arc<Client>> {
		let mut headers = HeaderMap::new();
		headers.insert("Accept", HeaderValue::from_static("application/json"));
		headers.insert("User-Agent", HeaderValue::from_static("bridgerank/0.1"));

		if let Some(custom) = &config.headers {
			for (key, value) in custom {
				if let (Ok(name), Ok(value)) = (
					reqwest::header::HeaderName::from_str(key),
					HeaderValue::from_str(value),
				) {
					headers.insert(name, value);
				}
			}
		}

		let client = Client::builder()
			.default_headers(headers)
			.build()
			.map_err(AdapterError::HttpError)?;

		Ok(Arc::new(client))
	}

	fn get_client(&self) -> AdapterResult<Arc<Client>> {
		match &self.client_strategy {
			ClientStrategy::Cached(cache) => {
				let client_config = ClientConfig::for_provider(&self.provider.provider_id, &self.config);
				cache.get_client(&client_config)
			},
			ClientStrategy::OnDemand => Self::create_client(&self.config),
		}
	}

	/// Gas cost for a chain, served from the private cache when fresh
	async fn gas_cost_usd(&self, chain: &str) -> f64 {
		if let Some(cached) = self.gas_cache.get(chain) {
			debug!(chain = %chain, "Using cached gas cost");
			return cached;
		}

		match self.fetch_gas_cost(chain).await {
			Ok(cost) => {
				self.gas_cache.insert(chain, cost);
				cost
			},
			Err(error) => {
				debug!(chain = %chain, "Gas endpoint unavailable, using default: {}", error);
				DEFAULT_GAS_COST_USD
			},
		}
	}

	async fn fetch_gas_cost(&self, chain: &str) -> AdapterResult<f64> {
		let client = self.get_client()?;
		let url = format!("{}/gas/{}", self.config.endpoint, chain);
		let response = client.get(&url).send().await?;

		let status = response.status();
		if !status.is_success() {
			return Err(AdapterError::from_http_status(status.as_u16()));
		}

		let gas: RelayGasResponse =
			response
				.json()
				.await
				.map_err(|e| AdapterError::InvalidResponse {
					reason: format!("Failed to decode Relay gas response: {}", e),
				})?;

		Ok(gas.cost_usd)
	}

	/// Map a Relay quote response into the provider-agnostic quote shape
	fn map_quote(
		&self,
		response: RelayQuoteResponse,
		request: &RouteRequest,
		gas_cost_usd: f64,
	) -> RawProviderQuote {
		let mut steps = vec![RouteStep {
			kind: StepKind::Bridge,
			input_token: request.source_token.clone(),
			output_token: request.destination_token().to_string(),
			input_amount: request.amount.clone(),
			output_amount: response.amount_out.clone(),
			fee_usd: response.relayer_fee_usd,
		}];

		if response.requires_wrap {
			steps.push(RouteStep {
				kind: StepKind::Wrap,
				input_token: request.destination_token().to_string(),
				output_token: request.destination_token().to_string(),
				input_amount: response.amount_out.clone(),
				output_amount: response.amount_out.clone(),
				fee_usd: 0.0,
			});
		}

		RawProviderQuote::new(
			self.provider.provider_id.clone(),
			self.provider.name.clone(),
			response.amount_out,
			FeeBreakdown::new(response.relayer_fee_usd, gas_cost_usd),
			response.fill_time_sec,
		)
		.with_steps(steps)
	}
}

#[async_trait]
impl BridgeAdapter for RelayAdapter {
	fn provider_info(&self) -> &Provider {
		&self.provider
	}

	fn supports_route(&self, source_chain: &str, destination_chain: &str, token: &str) -> bool {
		source_chain != destination_chain
			&& SUPPORTED_CHAINS
				.iter()
				.any(|c| c.eq_ignore_ascii_case(source_chain))
			&& SUPPORTED_CHAINS
				.iter()
				.any(|c| c.eq_ignore_ascii_case(destination_chain))
			&& SUPPORTED_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(token))
	}

	async fn fetch_quote(&self, request: &RouteRequest) -> AdapterResult<RawProviderQuote> {
		debug!(
			provider_id = %self.provider.provider_id,
			source = %request.source_chain,
			destination = %request.destination_chain,
			"Fetching Relay quote"
		);

		let client = self.get_client()?;
		let url = format!("{}/quote", self.config.endpoint);

		let response = client
			.get(&url)
			.query(&[
				("fromChain", request.source_chain.as_str()),
				("toChain", request.destination_chain.as_str()),
				("token", request.source_token.as_str()),
				("amount", request.amount.as_str()),
			])
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(AdapterError::from_http_status(status.as_u16()));
		}

		let quote: RelayQuoteResponse =
			response
				.json()
				.await
				.map_err(|e| AdapterError::InvalidResponse {
					reason: format!("Failed to decode Relay quote: {}", e),
				})?;

		let gas_cost_usd = match quote.gas_cost_usd {
			Some(cost) => cost,
			None => self.gas_cost_usd(&request.destination_chain).await,
		};

		Ok(self.map_quote(quote, request, gas_cost_usd))
	}

	async fn health_check(&self) -> AdapterResult<bool> {
		let client = self.get_client()?;
		let url = format!("{}/health", self.config.endpoint);
		let response = client.get(&url).send().await?;
		Ok(response.status().is_success())
	}
}
