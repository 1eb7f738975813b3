//! Hop adapter implementation
//!
//! Quotes rollup-to-rollup transfers through the Hop bridge REST API.

use async_trait::async_trait;
use reqwest::{
	header::{HeaderMap, HeaderValue},
	Client,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use bridgerank_types::{
	AdapterError, AdapterResult, BridgeAdapter, FeeBreakdown, Provider, ProviderEndpointConfig,
	RawProviderQuote, RouteRequest, RouteStep, StepKind,
};

use crate::client_cache::{ClientCache, ClientConfig};

const SUPPORTED_CHAINS: &[&str] = &[
	"ethereum", "arbitrum", "optimism", "polygon", "base", "gnosis",
];
const SUPPORTED_TOKENS: &[&str] = &["USDC", "USDT", "DAI", "ETH", "WETH"];

/// Client strategy for the Hop adapter
#[derive(Debug)]
enum ClientStrategy {
	/// Use the pooled client cache
	Cached(ClientCache),
	/// Create clients on-demand with no caching
	OnDemand,
}

/// Hop adapter for rollup bridge quotes
#[derive(Debug)]
pub struct HopAdapter {
	provider: Provider,
	config: ProviderEndpointConfig,
	client_strategy: ClientStrategy,
}

/// Quote response from the Hop API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HopQuoteResponse {
	/// Amount expected on the destination chain
	pub estimated_received: String,
	/// Bonder fee in USD
	pub bonder_fee_usd: f64,
	/// Destination transaction cost in USD
	pub destination_tx_cost_usd: f64,
	/// Estimated transfer time in seconds
	pub estimated_time_sec: u64,
}

impl HopAdapter {
	/// Create a new Hop adapter with pooled client caching
	pub fn new(config: ProviderEndpointConfig) -> AdapterResult<Self> {
		Self::with_cache(config, ClientCache::for_adapter())
	}

	/// Create a Hop adapter with a custom client cache
	pub fn with_cache(config: ProviderEndpointConfig, cache: ClientCache) -> AdapterResult<Self> {
		Ok(Self {
			provider: Self::provider_identity(),
			config,
			client_strategy: ClientStrategy::Cached(cache),
		})
	}

	/// Create a Hop adapter that builds a client per request
	pub fn without_cache(config: ProviderEndpointConfig) -> AdapterResult<Self> {
		Ok(Self {
			provider: Self::provider_identity(),
			config,
			client_strategy: ClientStrategy::OnDemand,
		})
	}

	/// Create a Hop adapter against the public endpoint
	pub fn with_default_config() -> AdapterResult<Self> {
		Self::new(ProviderEndpointConfig::new(
			"https://api.hop.exchange/v1".to_string(),
			3000,
		))
	}

	fn provider_identity() -> Provider {
		Provider::new(
			"hop-v1".to_string(),
			"Hop Protocol".to_string(),
			"1.0.0".to_string(),
		)
		.with_description("Rollup-to-rollup token bridge".to_string())
		.with_capabilities(vec!["bridge".to_string(), "swap".to_string()])
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

	/// Map a Hop quote response into the provider-agnostic quote shape
	fn map_quote(&self, response: HopQuoteResponse, request: &RouteRequest) -> RawProviderQuote {
		let mut steps = vec![RouteStep {
			kind: StepKind::Bridge,
			input_token: request.source_token.clone(),
			output_token: request.source_token.clone(),
			input_amount: request.amount.clone(),
			output_amount: response.estimated_received.clone(),
			fee_usd: response.bonder_fee_usd,
		}];

		// Hop settles in the source token; a differing destination token
		// means an AMM swap on the destination chain.
		if request.destination_token() != request.source_token {
			steps.push(RouteStep {
				kind: StepKind::Swap,
				input_token: request.source_token.clone(),
				output_token: request.destination_token().to_string(),
				input_amount: response.estimated_received.clone(),
				output_amount: response.estimated_received.clone(),
				fee_usd: 0.0,
			});
		}

		RawProviderQuote::new(
			self.provider.provider_id.clone(),
			self.provider.name.clone(),
			response.estimated_received,
			FeeBreakdown::new(response.bonder_fee_usd, response.destination_tx_cost_usd),
			response.estimated_time_sec,
		)
		.with_steps(steps)
	}
}

#[async_trait]
impl BridgeAdapter for HopAdapter {
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
			"Fetching Hop quote"
		);

		let client = self.get_client()?;
		let url = format!("{}/quote", self.config.endpoint);

		let response = client
			.get(&url)
			.query(&[
				("amount", request.amount.as_str()),
				("token", request.source_token.as_str()),
				("fromChain", request.source_chain.as_str()),
				("toChain", request.destination_chain.as_str()),
			])
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(AdapterError::from_http_status(status.as_u16()));
		}

		let quote: HopQuoteResponse =
			response
				.json()
				.await
				.map_err(|e| AdapterError::InvalidResponse {
					reason: format!("Failed to decode Hop quote: {}", e),
				})?;

		Ok(self.map_quote(quote, request))
	}

	async fn health_check(&self) -> AdapterResult<bool> {
		let client = self.get_client()?;
		let url = format!("{}/health", self.config.endpoint);
		let response = client.get(&url).send().await?;
		Ok(response.status().is_success())
	}
}
