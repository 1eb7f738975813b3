//! Reliability scoring
//!
//! Folds historical uptime, success rate, delay and incident metrics into
//! a single 0-100 trust score. Metrics come from an external read-only
//! source; a provider with no metrics gets a fixed conservative default
//! so that ranking stays computable for newly registered providers.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use bridgerank_types::{MetricsSource, ReliabilityMetrics};

/// Score assigned to providers with no recorded metrics
///
/// Neither zero (which would bury new providers) nor perfect (which would
/// reward being unmonitored).
pub const DEFAULT_SCORE: f64 = 50.0;

/// Weights applied to the four reliability components
#[derive(Debug, Clone, Copy)]
pub struct ReliabilityWeights {
	pub uptime: f64,
	pub success_rate: f64,
	pub delay: f64,
	pub incidents: f64,
}

impl Default for ReliabilityWeights {
	fn default() -> Self {
		Self {
			uptime: 0.35,
			success_rate: 0.40,
			delay: 0.15,
			incidents: 0.10,
		}
	}
}

/// Computes provider trust scores from historical metrics
#[derive(Clone)]
pub struct ReliabilityScorer {
	source: Arc<dyn MetricsSource>,
	weights: ReliabilityWeights,
}

impl ReliabilityScorer {
	pub fn new(source: Arc<dyn MetricsSource>) -> Self {
		Self {
			source,
			weights: ReliabilityWeights::default(),
		}
	}

	pub fn with_weights(mut self, weights: ReliabilityWeights) -> Self {
		self.weights = weights;
		self
	}

	/// Composite trust score for a provider, clamped to [0, 100]
	///
	/// Lookup is case-insensitive on the provider identifier. Unknown
	/// providers return [`DEFAULT_SCORE`] rather than an error.
	pub fn score(&self, provider_id: &str) -> f64 {
		match self.source.metrics_for(provider_id) {
			Some(metrics) => self.composite(&metrics),
			None => {
				debug!(
					provider_id = %provider_id,
					"No reliability metrics recorded, using default score"
				);
				DEFAULT_SCORE
			},
		}
	}

	/// Metrics snapshot with the composite score filled in
	///
	/// Unknown providers get a neutral snapshot carrying the default
	/// score.
	pub fn metrics(&self, provider_id: &str) -> ReliabilityMetrics {
		match self.source.metrics_for(provider_id) {
			Some(mut metrics) => {
				metrics.composite_score = self.composite(&metrics);
				metrics
			},
			None => {
				let mut metrics = ReliabilityMetrics::new(0.0, 0.0, 0.0, 0);
				metrics.composite_score = DEFAULT_SCORE;
				metrics
			},
		}
	}

	/// Scores for a batch of providers, keyed by the ids as given
	pub fn batch_scores(&self, provider_ids: &[String]) -> HashMap<String, f64> {
		provider_ids
			.iter()
			.map(|id| (id.clone(), self.score(id)))
			.collect()
	}

	fn composite(&self, metrics: &ReliabilityMetrics) -> f64 {
		let uptime_score = metrics.uptime_percent.clamp(0.0, 100.0);
		let success_score = metrics.success_rate_percent.clamp(0.0, 100.0);

		// Delays and incidents convert to penalty scores on the same
		// 0-100 scale, floored at zero.
		let delay_score = (100.0 - (metrics.avg_delay_percent * 2.0).min(100.0)).max(0.0);
		let incident_score = (100.0 - (metrics.incident_count as f64 * 5.0).min(100.0)).max(0.0);

		let composite = uptime_score * self.weights.uptime
			+ success_score * self.weights.success_rate
			+ delay_score * self.weights.delay
			+ incident_score * self.weights.incidents;

		(composite.clamp(0.0, 100.0) * 100.0).round() / 100.0
	}
}

impl std::fmt::Debug for ReliabilityScorer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ReliabilityScorer")
			.field("weights", &self.weights)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bridgerank_types::InMemoryMetricsSource;

	fn create_test_scorer(entries: Vec<(&str, ReliabilityMetrics)>) -> ReliabilityScorer {
		let source = InMemoryMetricsSource::with_metrics(
			entries
				.into_iter()
				.map(|(id, m)| (id.to_string(), m))
				.collect(),
		);
		ReliabilityScorer::new(Arc::new(source))
	}

	#[test]
	fn test_perfect_metrics_score_100() {
		let scorer = create_test_scorer(vec![(
			"hop-v1",
			ReliabilityMetrics::new(100.0, 100.0, 0.0, 0),
		)]);

		assert_eq!(scorer.score("hop-v1"), 100.0);
	}

	#[test]
	fn test_composite_weighting() {
		// uptime 99 * 0.35 + success 98 * 0.40 + delay (100 - 20) * 0.15
		// + incidents (100 - 10) * 0.10 = 34.65 + 39.2 + 12.0 + 9.0
		let scorer = create_test_scorer(vec![(
			"hop-v1",
			ReliabilityMetrics::new(99.0, 98.0, 10.0, 2),
		)]);

		assert_eq!(scorer.score("hop-v1"), 94.85);
	}

	#[test]
	fn test_score_always_in_bounds() {
		let scorer = create_test_scorer(vec![
			("worst", ReliabilityMetrics::new(0.0, 0.0, 500.0, 100)),
			("odd", ReliabilityMetrics::new(150.0, -20.0, -5.0, 0)),
		]);

		for id in ["worst", "odd", "unknown"] {
			let score = scorer.score(id);
			assert!((0.0..=100.0).contains(&score), "score {} out of bounds", score);
		}
	}

	#[test]
	fn test_unknown_provider_gets_default() {
		let scorer = create_test_scorer(vec![]);

		assert_eq!(scorer.score("never-seen"), DEFAULT_SCORE);

		let metrics = scorer.metrics("never-seen");
		assert_eq!(metrics.composite_score, DEFAULT_SCORE);
		assert_eq!(metrics.incident_count, 0);
	}

	#[test]
	fn test_lookup_is_case_insensitive() {
		let scorer = create_test_scorer(vec![(
			"Hop-V1",
			ReliabilityMetrics::new(100.0, 100.0, 0.0, 0),
		)]);

		assert_eq!(scorer.score("hop-v1"), 100.0);
		assert_eq!(scorer.score("HOP-V1"), 100.0);
	}

	#[test]
	fn test_incident_penalty_floors_at_zero() {
		// 30 incidents would be a -50 incident score without the floor.
		let scorer = create_test_scorer(vec![(
			"shaky",
			ReliabilityMetrics::new(100.0, 100.0, 0.0, 30),
		)]);

		// 35 + 40 + 15 + 0
		assert_eq!(scorer.score("shaky"), 90.0);
	}

	#[test]
	fn test_batch_scores() {
		let scorer = create_test_scorer(vec![(
			"hop-v1",
			ReliabilityMetrics::new(100.0, 100.0, 0.0, 0),
		)]);

		let scores = scorer.batch_scores(&["hop-v1".to_string(), "unknown".to_string()]);

		assert_eq!(scores["hop-v1"], 100.0);
		assert_eq!(scores["unknown"], DEFAULT_SCORE);
	}
}
