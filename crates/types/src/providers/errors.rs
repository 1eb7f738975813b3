//! Error types for provider registry operations

use thiserror::Error;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors raised by the provider registry
///
/// These propagate to the caller as distinct kinds and are never coerced
/// into a generic failure.
#[derive(Error, Debug)]
pub enum RegistryError {
	#[error("Provider already registered: {provider_id}")]
	DuplicateProvider { provider_id: String },

	#[error("Provider not found: {provider_id}")]
	ProviderNotFound { provider_id: String },

	#[error("No provider declares capability: {capability}")]
	CapabilityNotFound { capability: String },
}
