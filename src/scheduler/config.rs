//! Generator configuration and scheduling preferences.
//!
//! Every field has a default, so partial configs deserialize cleanly:
//!
//! ```
//! use u_timetable::scheduler::GeneratorConfig;
//!
//! let config = GeneratorConfig::default()
//!     .with_seed(7)
//!     .with_exhaustive_threshold(200_000);
//! assert_eq!(config.preferences.result_limit, 100);
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default cross-product size up to which enumeration is exhaustive.
pub const DEFAULT_EXHAUST_THRESHOLD: u64 = 500_000;

/// Engine tuning for one generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Largest cardinality enumerated exhaustively.
    pub exhaustive_threshold: u64,
    /// Unique combinations drawn when sampling.
    pub sample_size: usize,
    /// Fixed sampling seed. `None` = OS entropy.
    pub seed: Option<u64>,
    /// Wall-clock budget for the satisfiability oracle (ms).
    pub solver_budget_ms: u64,
    /// Ranking preferences.
    pub preferences: Preferences,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            exhaustive_threshold: DEFAULT_EXHAUST_THRESHOLD,
            sample_size: DEFAULT_EXHAUST_THRESHOLD as usize,
            seed: None,
            solver_budget_ms: 10_000,
            preferences: Preferences::default(),
        }
    }
}

impl GeneratorConfig {
    /// Sets the exhaustive/sampling threshold.
    pub fn with_exhaustive_threshold(mut self, threshold: u64) -> Self {
        self.exhaustive_threshold = threshold;
        self
    }

    /// Sets the number of sampled combinations.
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Fixes the sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the solver budget.
    pub fn with_solver_budget(mut self, budget: Duration) -> Self {
        self.solver_budget_ms = u64::try_from(budget.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the ranking preferences.
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Solver budget as a `Duration`.
    pub fn solver_budget(&self) -> Duration {
        Duration::from_millis(self.solver_budget_ms)
    }
}

/// Student preferences driving the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Ideal continuous class-block length (minutes).
    pub ideal_block_minutes: f64,
    /// Ideal first-class start (minute of day).
    pub ideal_start_minute: i32,
    /// Assumed commute per attended day, both ways (minutes).
    pub round_trip_commute_minutes: f64,
    /// Maximum schedules returned.
    pub result_limit: usize,
    /// Metric weights for the combined rank.
    pub weights: MetricWeights,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            ideal_block_minutes: 3.5 * 60.0,
            ideal_start_minute: 9 * 60,
            round_trip_commute_minutes: 2.0 * 40.0,
            result_limit: 100,
            weights: MetricWeights::default(),
        }
    }
}

impl Preferences {
    /// Sets the ideal block length.
    pub fn with_ideal_block_minutes(mut self, minutes: f64) -> Self {
        self.ideal_block_minutes = minutes;
        self
    }

    /// Sets the ideal day start.
    pub fn with_ideal_start_minute(mut self, minute: i32) -> Self {
        self.ideal_start_minute = minute;
        self
    }

    /// Sets the round-trip commute.
    pub fn with_commute_minutes(mut self, minutes: f64) -> Self {
        self.round_trip_commute_minutes = minutes;
        self
    }

    /// Sets the result limit.
    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.result_limit = limit;
        self
    }

    /// Sets the metric weights.
    pub fn with_weights(mut self, weights: MetricWeights) -> Self {
        self.weights = weights;
        self
    }
}

/// Weights applied to per-metric ranks.
///
/// Default favours gap error; [`MetricWeights::equal`] weighs all four alike.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricWeights {
    pub gap_error: f64,
    pub start_error: f64,
    pub time_variance: f64,
    pub time_wasted: f64,
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            gap_error: 1.5,
            start_error: 1.0,
            time_variance: 1.0,
            time_wasted: 1.0,
        }
    }
}

impl MetricWeights {
    /// All metrics weighted 1.
    pub fn equal() -> Self {
        Self {
            gap_error: 1.0,
            start_error: 1.0,
            time_variance: 1.0,
            time_wasted: 1.0,
        }
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.gap_error + self.start_error + self.time_variance + self.time_wasted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.exhaustive_threshold, 500_000);
        assert_eq!(config.seed, None);
        assert_eq!(config.solver_budget(), Duration::from_secs(10));
        assert!((config.preferences.ideal_block_minutes - 210.0).abs() < 1e-10);
        assert!((config.preferences.round_trip_commute_minutes - 80.0).abs() < 1e-10);
        assert!((config.preferences.weights.total() - 4.5).abs() < 1e-10);
    }

    #[test]
    fn test_builders() {
        let config = GeneratorConfig::default()
            .with_seed(3)
            .with_sample_size(1000)
            .with_solver_budget(Duration::from_millis(1500))
            .with_preferences(
                Preferences::default()
                    .with_result_limit(5)
                    .with_ideal_start_minute(600)
                    .with_weights(MetricWeights::equal()),
            );
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.sample_size, 1000);
        assert_eq!(config.solver_budget_ms, 1500);
        assert_eq!(config.preferences.result_limit, 5);
        assert_eq!(config.preferences.ideal_start_minute, 600);
        assert!((config.preferences.weights.total() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_huge_solver_budget_saturates() {
        let config = GeneratorConfig::default().with_solver_budget(Duration::MAX);
        assert_eq!(config.solver_budget_ms, u64::MAX);
    }

    #[test]
    fn test_partial_deserialize() {
        let json = r#"{ "seed": 9, "preferences": { "result_limit": 10, "weights": { "gap_error": 2.0 } } }"#;
        let config: GeneratorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.exhaustive_threshold, DEFAULT_EXHAUST_THRESHOLD);
        assert_eq!(config.preferences.result_limit, 10);
        assert!((config.preferences.weights.gap_error - 2.0).abs() < 1e-10);
        assert!((config.preferences.weights.time_wasted - 1.0).abs() < 1e-10);
    }
}
