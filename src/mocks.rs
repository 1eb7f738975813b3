//! Mock adapters for examples and testing
//!
//! Simple, working mock adapters usable in tests and demos without any
//! network dependency.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use bridgerank_types::{
	AdapterError, AdapterResult, BridgeAdapter, FeeBreakdown, Provider, RawProviderQuote,
	RouteRequest, RouteStep, StepKind,
};

/// Configurable mock bridge adapter
///
/// Provides call tracking, response delays for timeout testing, failure
/// simulation, and a configurable route support predicate.
#[derive(Debug, Clone)]
pub struct MockBridgeAdapter {
	pub provider: Provider,
	call_tracker: Arc<AtomicUsize>,
	pub should_fail: bool,
	pub response_delay_ms: u64,
	/// Chains this mock claims to support; empty means every chain
	pub supported_chains: Vec<String>,
	pub fee_usd: f64,
	pub estimated_time_secs: u64,
}

impl MockBridgeAdapter {
	/// Create a mock adapter with default settings
	pub fn new(id: &str) -> Self {
		Self::with_config(id, false, 0)
	}

	/// Create a mock adapter with custom failure/delay configuration
	pub fn with_config(id: &str, should_fail: bool, response_delay_ms: u64) -> Self {
		Self {
			provider: Provider::new(
				id.to_string(),
				format!("{} Mock", id),
				"1.0.0".to_string(),
			)
			.with_description(format!("Mock bridge adapter: {}", id))
			.with_capabilities(vec!["bridge".to_string()]),
			call_tracker: Arc::new(AtomicUsize::new(0)),
			should_fail,
			response_delay_ms,
			supported_chains: Vec::new(),
			fee_usd: 1.0,
			estimated_time_secs: 120,
		}
	}

	/// Create a success adapter (no delay, no failure)
	pub fn success(id: &str) -> Self {
		Self::with_config(id, false, 0)
	}

	/// Create a failing adapter
	pub fn failing(id: &str) -> Self {
		Self::with_config(id, true, 0)
	}

	/// Create a slow-responding adapter (1500ms delay)
	pub fn slow(id: &str) -> Self {
		Self::with_config(id, false, 1500)
	}

	/// Create a timeout adapter (5000ms delay)
	pub fn timeout(id: &str) -> Self {
		Self::with_config(id, false, 5000)
	}

	/// Restrict the mock to specific chains
	pub fn with_chains(mut self, chains: Vec<&str>) -> Self {
		self.supported_chains = chains.into_iter().map(String::from).collect();
		self
	}

	/// Set the quoted fee and time
	pub fn with_quote_profile(mut self, fee_usd: f64, estimated_time_secs: u64) -> Self {
		self.fee_usd = fee_usd;
		self.estimated_time_secs = estimated_time_secs;
		self
	}

	/// Number of times fetch_quote has been called
	pub fn call_count(&self) -> usize {
		self.call_tracker.load(Ordering::Relaxed)
	}

	/// Reset the call counter
	pub fn reset_calls(&self) {
		self.call_tracker.store(0, Ordering::Relaxed);
	}
}

#[async_trait]
impl BridgeAdapter for MockBridgeAdapter {
	fn provider_info(&self) -> &Provider {
		&self.provider
	}

	fn supports_route(&self, source_chain: &str, destination_chain: &str, _token: &str) -> bool {
		if source_chain == destination_chain {
			return false;
		}
		if self.supported_chains.is_empty() {
			return true;
		}
		self.supported_chains
			.iter()
			.any(|c| c.eq_ignore_ascii_case(source_chain))
			&& self
				.supported_chains
				.iter()
				.any(|c| c.eq_ignore_ascii_case(destination_chain))
	}

	async fn fetch_quote(&self, request: &RouteRequest) -> AdapterResult<RawProviderQuote> {
		self.call_tracker.fetch_add(1, Ordering::Relaxed);

		if self.response_delay_ms > 0 {
			tokio::time::sleep(Duration::from_millis(self.response_delay_ms)).await;
		}

		if self.should_fail {
			return Err(AdapterError::InvalidResponse {
				reason: format!(
					"Adapter {} configured to fail",
					self.provider.provider_id
				),
			});
		}

		// Quote slightly under the requested amount, as a bridge would.
		let amount_in = request.amount_value().unwrap_or(0.0);
		let output_amount = format!("{:.6}", amount_in * 0.998);

		Ok(RawProviderQuote::new(
			self.provider.provider_id.clone(),
			self.provider.name.clone(),
			output_amount.clone(),
			FeeBreakdown::new(self.fee_usd, 0.5),
			self.estimated_time_secs,
		)
		.with_steps(vec![RouteStep {
			kind: StepKind::Bridge,
			input_token: request.source_token.clone(),
			output_token: request.destination_token().to_string(),
			input_amount: request.amount.clone(),
			output_amount,
			fee_usd: self.fee_usd,
		}]))
	}
}
