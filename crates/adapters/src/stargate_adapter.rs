//! Stargate adapter implementation
//!
//! Quotes pooled-liquidity transfers through the Stargate quote API.
//! Transient endpoint failures are retried inside the adapter with a
//! small fixed attempt cap; the aggregator itself never retries.

use async_trait::async_trait;
use reqwest::{
	header::{HeaderMap, HeaderValue},
	Client,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use bridgerank_types::{
	AdapterError, AdapterResult, BridgeAdapter, FeeBreakdown, Provider, ProviderEndpointConfig,
	RawProviderQuote, RouteRequest, RouteStep, StepKind,
};

use crate::client_cache::{ClientCache, ClientConfig};

const SUPPORTED_CHAINS: &[&str] = &[
	"ethereum",
	"arbitrum",
	"optimism",
	"polygon",
	"avalanche",
	"bsc",
];
const SUPPORTED_TOKENS: &[&str] = &["USDC", "USDT", "ETH"];

/// Upper bound on fetch attempts against the Stargate endpoint
const MAX_ATTEMPTS: u32 = 3;

/// Initial backoff between attempts; doubles per retry
const RETRY_BASE_DELAY_MS: u64 = 100;

/// Client strategy for the Stargate adapter
#[derive(Debug)]
enum ClientStrategy {
	Cached(ClientCache),
	OnDemand,
}

/// Stargate adapter for pooled-liquidity bridge quotes
#[derive(Debug)]
pub struct StargateAdapter {
	provider: Provider,
	config: ProviderEndpointConfig,
	client_strategy: ClientStrategy,
}

/// Quote request body for the Stargate API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct StargateQuoteBody<'a> {
	src_chain: &'a str,
	dst_chain: &'a str,
	token: &'a str,
	amount: &'a str,
}

/// Quote response from the Stargate API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StargateQuoteResponse {
	/// Amount delivered on the destination chain
	pub dst_amount: String,
	/// Equilibrium fee in USD
	pub eq_fee_usd: f64,
	/// Liquidity provider fee in USD
	pub lp_fee_usd: f64,
	/// Gas cost on both chains, in USD
	pub gas_cost_usd: f64,
	/// Estimated delivery time in seconds
	pub duration_sec: u64,
}

impl StargateAdapter {
	/// Create a new Stargate adapter with pooled client caching
	pub fn new(config: ProviderEndpointConfig) -> AdapterResult<Self> {
		Self::with_cache(config, ClientCache::for_adapter())
	}

	/// Create a Stargate adapter with a custom client cache
	pub fn with_cache(config: ProviderEndpointConfig, cache: ClientCache) -> AdapterResult<Self> {
		Ok(Self {
			provider: Self::provider_identity(),
			config,
			client_strategy: ClientStrategy::Cached(cache),
		})
	}

	/// Create a Stargate adapter that builds a client per request
	pub fn without_cache(config: ProviderEndpointConfig) -> AdapterResult<Self> {
		Ok(Self {
			provider: Self::provider_identity(),
			config,
			client_strategy: ClientStrategy::OnDemand,
		})
	}

	/// Create a Stargate adapter against the public endpoint
	pub fn with_default_config() -> AdapterResult<Self> {
		Self::new(ProviderEndpointConfig::new(
			"https://api.stargate.finance/v1".to_string(),
			3000,
		))
	}

	fn provider_identity() -> Provider {
		Provider::new(
			"stargate-v1".to_string(),
			"Stargate".to_string(),
			"1.0.0".to_string(),
		)
		.with_description("Pooled-liquidity cross-chain transfers".to_string())
		.with_capabilities(vec!["bridge".to_string()])
	}

	fn create_client(config: &ProviderEndpointConfig) -> AdapterResult<Arc<Client>> {
		let mut headers = HeaderMap::new();
		headers.insert("Content-Type", HeaderValue::from_static("application/json"));
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

	/// Whether a failed attempt is worth retrying
	///
	/// Client-side errors (4xx) are final; connection failures and 5xx
	/// responses may be transient.
	fn is_retryable(error: &AdapterError) -> bool {
		match error {
			AdapterError::HttpError(e) => e.is_connect() || e.is_timeout(),
			AdapterError::HttpStatusError { status_code, .. } => *status_code >= 500,
			_ => false,
		}
	}

	async fn fetch_quote_once(&self, request: &RouteRequest) -> AdapterResult<StargateQuoteResponse> {
		let client = self.get_client()?;
		let url = format!("{}/quote", self.config.endpoint);

		let body = StargateQuoteBody {
			src_chain: &request.source_chain,
			dst_chain: &request.destination_chain,
			token: &request.source_token,
			amount: &request.amount,
		};

		let response = client.post(&url).json(&body).send().await?;

		let status = response.status();
		if !status.is_success() {
			return Err(AdapterError::from_http_status(status.as_u16()));
		}

		response
			.json()
			.await
			.map_err(|e| AdapterError::InvalidResponse {
				reason: format!("Failed to decode Stargate quote: {}", e),
			})
	}

	/// Map a Stargate quote response into the provider-agnostic quote shape
	fn map_quote(
		&self,
		response: StargateQuoteResponse,
		request: &RouteRequest,
	) -> RawProviderQuote {
		let protocol_fee = response.eq_fee_usd + response.lp_fee_usd;
		let steps = vec![RouteStep {
			kind: StepKind::Bridge,
			input_token: request.source_token.clone(),
			output_token: request.destination_token().to_string(),
			input_amount: request.amount.clone(),
			output_amount: response.dst_amount.clone(),
			fee_usd: protocol_fee,
		}];

		RawProviderQuote::new(
			self.provider.provider_id.clone(),
			self.provider.name.clone(),
			response.dst_amount,
			FeeBreakdown::new(protocol_fee, response.gas_cost_usd),
			response.duration_sec,
		)
		.with_steps(steps)
	}
}

#[async_trait]
impl BridgeAdapter for StargateAdapter {
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
			"Fetching Stargate quote"
		);

		let attempts = MAX_ATTEMPTS.min(self.config.max_retries + 1).max(1);
		let mut delay_ms = RETRY_BASE_DELAY_MS;
		let mut last_error = None;

		for attempt in 1..=attempts {
			match self.fetch_quote_once(request).await {
				Ok(response) => return Ok(self.map_quote(response, request)),
				Err(error) => {
					let retryable = Self::is_retryable(&error) && attempt < attempts;
					warn!(
						provider_id = %self.provider.provider_id,
						attempt,
						retryable,
						"Stargate quote attempt failed: {}",
						error
					);
					last_error = Some(error);
					if !retryable {
						break;
					}
					tokio::time::sleep(Duration::from_millis(delay_ms)).await;
					delay_ms *= 2;
				},
			}
		}

		Err(last_error.unwrap_or(AdapterError::InvalidResponse {
			reason: "No quote attempt was made".to_string(),
		}))
	}

	async fn health_check(&self) -> AdapterResult<bool> {
		let client = self.get_client()?;
		let url = format!("{}/health", self.config.endpoint);
		let response = client.get(&url).send().await?;
		Ok(response.status().is_success())
	}
}
