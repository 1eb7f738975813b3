//! bridgerank Config
//!
//! Configuration structures and loading for the bridgerank aggregator.

pub mod loader;
pub mod settings;

pub use loader::load_config;
pub use settings::{
	LogFormat, LoggingSettings, ProviderSettings, RankingSettings, Settings, TimeoutSettings,
};
