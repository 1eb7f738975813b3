//! Configuration settings structures

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use bridgerank_types::{ProviderEndpointConfig, RankingStrategy};

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
	pub providers: HashMap<String, ProviderSettings>,
	pub timeouts: TimeoutSettings,
	pub ranking: RankingSettings,
	pub logging: LoggingSettings,
}

/// Individual provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderSettings {
	pub provider_id: String,
	pub endpoint: String,
	pub timeout_ms: u64,
	pub enabled: bool,
	pub max_retries: u32,
	pub headers: Option<HashMap<String, String>>,
	// Optional descriptive metadata
	pub name: Option<String>,
	pub description: Option<String>,
	// Capabilities declared for capability-based lookup
	pub capabilities: Option<Vec<String>>,
}

/// Convert provider settings into the runtime endpoint configuration
impl From<&ProviderSettings> for ProviderEndpointConfig {
	fn from(settings: &ProviderSettings) -> Self {
		let mut config =
			ProviderEndpointConfig::new(settings.endpoint.clone(), settings.timeout_ms)
				.with_max_retries(settings.max_retries);
		if let Some(headers) = &settings.headers {
			config = config.with_headers(headers.clone());
		}
		config
	}
}

/// Timeout configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimeoutSettings {
	/// Per-provider timeout in milliseconds (1000-3000ms recommended)
	pub per_provider_ms: u64,
	/// Global aggregation timeout in milliseconds (3000-5000ms recommended)
	pub global_ms: u64,
	/// Request timeout for HTTP clients
	pub request_ms: u64,
}

/// Ranking configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RankingSettings {
	/// Strategy applied when the request does not select one
	pub default_strategy: RankingStrategy,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			providers: HashMap::new(),
			timeouts: TimeoutSettings {
				per_provider_ms: 2000,
				global_ms: 4000,
				request_ms: 5000,
			},
			ranking: RankingSettings {
				default_strategy: RankingStrategy::Balanced,
			},
			logging: LoggingSettings {
				level: "info".to_string(),
				format: LogFormat::Pretty,
				structured: false,
			},
		}
	}
}

impl Settings {
	/// Get enabled providers only
	pub fn enabled_providers(&self) -> HashMap<String, ProviderSettings> {
		self.providers
			.iter()
			.filter(|(_, config)| config.enabled)
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn create_test_provider_settings(id: &str, enabled: bool) -> ProviderSettings {
		ProviderSettings {
			provider_id: id.to_string(),
			endpoint: format!("https://{}.test/v1", id),
			timeout_ms: 2500,
			enabled,
			max_retries: 3,
			headers: None,
			name: None,
			description: None,
			capabilities: Some(vec!["bridge".to_string()]),
		}
	}

	#[test]
	fn test_default_settings() {
		let settings = Settings::default();

		assert_eq!(settings.timeouts.per_provider_ms, 2000);
		assert_eq!(settings.timeouts.global_ms, 4000);
		assert_eq!(settings.ranking.default_strategy, RankingStrategy::Balanced);
		assert!(settings.providers.is_empty());
	}

	#[test]
	fn test_enabled_providers_filter() {
		let mut settings = Settings::default();
		settings.providers.insert(
			"hop-v1".to_string(),
			create_test_provider_settings("hop-v1", true),
		);
		settings.providers.insert(
			"stargate-v1".to_string(),
			create_test_provider_settings("stargate-v1", false),
		);

		let enabled = settings.enabled_providers();
		assert_eq!(enabled.len(), 1);
		assert!(enabled.contains_key("hop-v1"));
	}

	#[test]
	fn test_endpoint_config_conversion() {
		let provider = create_test_provider_settings("hop-v1", true);
		let config = ProviderEndpointConfig::from(&provider);

		assert_eq!(config.endpoint, "https://hop-v1.test/v1");
		assert_eq!(config.timeout_ms, 2500);
		assert_eq!(config.max_retries, 3);
	}
}
