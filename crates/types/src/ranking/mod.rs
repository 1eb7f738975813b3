//! Ranking strategy and weight vectors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named strategy selecting how sub-scores combine into a composite score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankingStrategy {
	/// Even-handed trade-off across cost, speed, reliability and slippage
	#[default]
	Balanced,
	/// Heavily favors the cheapest route
	LowestCost,
	/// Heavily favors the quickest route
	Fastest,
}

impl fmt::Display for RankingStrategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			RankingStrategy::Balanced => "balanced",
			RankingStrategy::LowestCost => "lowest-cost",
			RankingStrategy::Fastest => "fastest",
		};
		write!(f, "{}", name)
	}
}

impl FromStr for RankingStrategy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"balanced" => Ok(RankingStrategy::Balanced),
			"lowest-cost" | "lowest_cost" | "cheapest" => Ok(RankingStrategy::LowestCost),
			"fastest" => Ok(RankingStrategy::Fastest),
			other => Err(format!("Unknown ranking strategy: {}", other)),
		}
	}
}

/// Weight vector applied to the four ranking sub-scores
///
/// Weights are non-negative and sum to 1.0 for every strategy in the
/// fixed lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingWeights {
	pub cost: f64,
	pub speed: f64,
	pub reliability: f64,
	pub slippage: f64,
}

impl RankingWeights {
	/// Fixed strategy -> weights lookup table
	pub fn for_strategy(strategy: RankingStrategy) -> Self {
		match strategy {
			RankingStrategy::Balanced => Self {
				cost: 0.30,
				speed: 0.25,
				reliability: 0.25,
				slippage: 0.20,
			},
			RankingStrategy::LowestCost => Self {
				cost: 0.60,
				speed: 0.10,
				reliability: 0.20,
				slippage: 0.10,
			},
			RankingStrategy::Fastest => Self {
				cost: 0.10,
				speed: 0.60,
				reliability: 0.20,
				slippage: 0.10,
			},
		}
	}

	/// Sum of all weights; 1.0 for every table entry
	pub fn total(&self) -> f64 {
		self.cost + self.speed + self.reliability + self.slippage
	}
}
