//! Historical reliability metrics and their read-only source
//!
//! Metrics are collected and aggregated outside this system; the core
//! consumes them as per-provider snapshots and never writes back.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Pre-aggregated reliability metrics for one provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityMetrics {
	/// Uptime percentage over the last 24 hours
	pub uptime_percent: f64,

	/// Success rate percentage over the recent window
	pub success_rate_percent: f64,

	/// Average delay relative to the quoted time, as a percentage
	pub avg_delay_percent: f64,

	/// Incidents recorded in the recent window
	pub incident_count: u32,

	/// Derived composite trust score, 0-100
	pub composite_score: f64,
}

impl ReliabilityMetrics {
	pub fn new(
		uptime_percent: f64,
		success_rate_percent: f64,
		avg_delay_percent: f64,
		incident_count: u32,
	) -> Self {
		Self {
			uptime_percent,
			success_rate_percent,
			avg_delay_percent,
			incident_count,
			composite_score: 0.0,
		}
	}
}

/// Read-only source of reliability metrics keyed by provider identifier
///
/// Lookups are case-insensitive on the identifier. Implementations refresh
/// on their own schedule; callers treat each result as a snapshot.
pub trait MetricsSource: Send + Sync {
	fn metrics_for(&self, provider_id: &str) -> Option<ReliabilityMetrics>;
}

/// In-memory metrics source
///
/// Suitable for tests and for deployments where an external collector
/// pushes snapshots into the process.
#[derive(Debug, Default)]
pub struct InMemoryMetricsSource {
	metrics: DashMap<String, ReliabilityMetrics>,
}

impl InMemoryMetricsSource {
	pub fn new() -> Self {
		Self {
			metrics: DashMap::new(),
		}
	}

	/// Build a source pre-populated with snapshots
	pub fn with_metrics(entries: Vec<(String, ReliabilityMetrics)>) -> Self {
		let source = Self::new();
		for (provider_id, metrics) in entries {
			source.insert(provider_id, metrics);
		}
		source
	}

	/// Insert or replace the snapshot for a provider
	pub fn insert(&self, provider_id: String, metrics: ReliabilityMetrics) {
		self.metrics
			.insert(provider_id.to_ascii_lowercase(), metrics);
	}

	pub fn len(&self) -> usize {
		self.metrics.len()
	}

	pub fn is_empty(&self) -> bool {
		self.metrics.is_empty()
	}
}

impl MetricsSource for InMemoryMetricsSource {
	fn metrics_for(&self, provider_id: &str) -> Option<ReliabilityMetrics> {
		self.metrics
			.get(&provider_id.to_ascii_lowercase())
			.map(|entry| entry.value().clone())
	}
}
