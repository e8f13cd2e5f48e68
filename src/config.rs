//! Configuration for puzzle generation and play.
//!
//! Settings come from, lowest to highest priority: built-in defaults, an
//! optional JSON file, the `HAND_FAMILY_WEIGHTS` environment variable, and
//! finally whatever the caller sets through the builder methods. Call
//! [`GeneratorConfig::validate`] once everything is merged.

use crate::equity::{EquityCalculator, EquityMethod};
use crate::error::ConfigError;
use crate::puzzle::families::FamilyWeights;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable holding a JSON object of family weight overrides.
pub const WEIGHTS_ENV: &str = "HAND_FAMILY_WEIGHTS";

/// Added to the configured seed to get the equity sampler's seed.
pub const EQUITY_SEED_OFFSET: u64 = 0x9E37_79B9_7F4A_7C15;

/// Inclusive equity range every hand of an accepted puzzle must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FairnessBounds {
    /// Lowest acceptable win percentage.
    pub min: f64,
    /// Highest acceptable win percentage.
    pub max: f64,
}

impl Default for FairnessBounds {
    fn default() -> Self {
        Self { min: 5.0, max: 50.0 }
    }
}

impl FairnessBounds {
    /// Whether one percentage is in range.
    #[inline]
    pub fn contains(&self, percent: f64) -> bool {
        percent >= self.min && percent <= self.max
    }

    /// Whether every percentage is in range.
    pub fn admits(&self, percents: &[f64]) -> bool {
        percents.iter().all(|&p| self.contains(p))
    }
}

/// Configuration for the puzzle generator.
///
/// # Example
/// ```
/// use holdemle::config::GeneratorConfig;
/// use holdemle::equity::EquityMethod;
///
/// let config = GeneratorConfig::default()
///     .with_equity(EquityMethod::MonteCarlo { iterations: 50_000 })
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_puzzle_attempts, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Relative sampling weight of each hand family.
    ///
    /// Keys missing from a config file keep their defaults.
    pub family_weights: FamilyWeights,

    /// Attempts at drawing four disjoint hands before giving up on one
    /// puzzle attempt.
    pub max_hand_attempts: u32,

    /// Attempts at finding a hand set that passes the fairness bounds.
    pub max_puzzle_attempts: u32,

    /// Equity range every hand must land in.
    pub fairness: FairnessBounds,

    /// Which equity strategy to run.
    pub equity: EquityMethod,

    /// Random seed for reproducibility.
    ///
    /// Seeds both hand sampling and Monte Carlo boards. If `None`, entropy
    /// is used.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            family_weights: FamilyWeights::default(),
            max_hand_attempts: 100,
            max_puzzle_attempts: 50,
            fairness: FairnessBounds::default(),
            equity: EquityMethod::Exhaustive,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sampled equity for quick local runs and tests.
    pub fn fast() -> Self {
        Self {
            equity: EquityMethod::MonteCarlo { iterations: 20_000 },
            ..Default::default()
        }
    }

    /// Load from a JSON file. Fields absent from the file keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Merge `HAND_FAMILY_WEIGHTS` from the process environment, if set.
    pub fn apply_env(self) -> Self {
        match std::env::var(WEIGHTS_ENV) {
            Ok(json) => self.with_weight_overrides(&json),
            Err(_) => self,
        }
    }

    /// Merge a JSON object of weight overrides.
    ///
    /// Malformed JSON is logged and the current weights are kept.
    pub fn with_weight_overrides(mut self, json: &str) -> Self {
        match self.family_weights.merge_json(json) {
            Ok(weights) => self.family_weights = weights,
            Err(e) => log::warn!("ignoring malformed {}: {}", WEIGHTS_ENV, e),
        }
        self
    }

    /// Builder method: replace all family weights.
    pub fn with_weights(mut self, weights: FamilyWeights) -> Self {
        self.family_weights = weights;
        self
    }

    /// Builder method: set the equity strategy.
    pub fn with_equity(mut self, method: EquityMethod) -> Self {
        self.equity = method;
        self
    }

    /// Builder method: set the fairness bounds.
    pub fn with_fairness(mut self, min: f64, max: f64) -> Self {
        self.fairness = FairnessBounds { min, max };
        self
    }

    /// Builder method: set the puzzle attempt budget.
    pub fn with_max_puzzle_attempts(mut self, attempts: u32) -> Self {
        self.max_puzzle_attempts = attempts;
        self
    }

    /// Builder method: set the hand assembly attempt budget.
    pub fn with_max_hand_attempts(mut self, attempts: u32) -> Self {
        self.max_hand_attempts = attempts;
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seed for the equity sampler, derived from [`seed`](Self::seed).
    ///
    /// Hand sampling uses `seed` itself, so the board sampler gets its own
    /// stream instead of replaying the same one.
    pub fn equity_seed(&self) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(EQUITY_SEED_OFFSET))
    }

    /// Build the configured equity calculator.
    pub fn equity_calculator(&self) -> Box<dyn EquityCalculator + Send> {
        self.equity.build(self.equity_seed())
    }

    /// Validate the configuration and return the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.family_weights.validate()?;

        if self.max_hand_attempts == 0 {
            return Err(ConfigError::ZeroAttempts("max_hand_attempts"));
        }
        if self.max_puzzle_attempts == 0 {
            return Err(ConfigError::ZeroAttempts("max_puzzle_attempts"));
        }

        let FairnessBounds { min, max } = self.fairness;
        if !(0.0..=100.0).contains(&min) || !(0.0..=100.0).contains(&max) || min > max {
            return Err(ConfigError::InvalidFairness { min, max });
        }

        if let EquityMethod::MonteCarlo { iterations: 0 } = self.equity {
            return Err(ConfigError::ZeroIterations);
        }

        Ok(())
    }
}

/// Rules of play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    /// Guess sets allowed per puzzle.
    pub max_attempts: u8,
}

impl Default for GameRules {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

impl GameRules {
    /// Builder method: set the attempt budget.
    pub fn with_max_attempts(mut self, max_attempts: u8) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Validate the rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts("max_attempts"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::families::HandFamily;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.max_hand_attempts, 100);
        assert_eq!(config.max_puzzle_attempts, 50);
        assert_eq!(config.fairness, FairnessBounds { min: 5.0, max: 50.0 });
        assert_eq!(config.equity, EquityMethod::Exhaustive);
        assert!(config.validate().is_ok());
        assert_eq!(GameRules::default().max_attempts, 3);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{
            "family_weights": {"pocket_pairs": 30},
            "equity": {"method": "monte_carlo", "iterations": 5000},
            "seed": 9
        }"#;
        let config: GeneratorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.family_weights.get(HandFamily::PocketPairs), 30.0);
        assert_eq!(config.family_weights.get(HandFamily::AllAx), 15.0);
        assert_eq!(config.equity, EquityMethod::MonteCarlo { iterations: 5000 });
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.max_puzzle_attempts, 50);
    }

    #[test]
    fn test_from_json_file() {
        let path = std::env::temp_dir().join(format!("holdemle-config-{}.json", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{"max_puzzle_attempts": 7, "fairness": {{"min": 10}}}}"#).unwrap();
        drop(file);

        let config = GeneratorConfig::from_json_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.max_puzzle_attempts, 7);
        assert_eq!(config.fairness, FairnessBounds { min: 10.0, max: 50.0 });

        let missing = GeneratorConfig::from_json_file(path.with_extension("missing"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_weight_overrides() {
        let config = GeneratorConfig::default().with_weight_overrides(r#"{"random": 0, "connectors": 40}"#);
        assert_eq!(config.family_weights.get(HandFamily::Random), 0.0);
        assert_eq!(config.family_weights.get(HandFamily::Connectors), 40.0);

        let kept = config.clone().with_weight_overrides("{not json");
        assert_eq!(kept.family_weights, config.family_weights);
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let bad = GeneratorConfig::default().with_max_puzzle_attempts(0);
        assert!(matches!(bad.validate(), Err(ConfigError::ZeroAttempts("max_puzzle_attempts"))));

        let bad = GeneratorConfig::default().with_fairness(60.0, 40.0);
        assert!(matches!(bad.validate(), Err(ConfigError::InvalidFairness { .. })));

        let bad = GeneratorConfig::default().with_equity(EquityMethod::MonteCarlo { iterations: 0 });
        assert!(matches!(bad.validate(), Err(ConfigError::ZeroIterations)));

        let bad = GeneratorConfig::default().with_weights(FamilyWeights::default().with(HandFamily::AllAx, f64::NAN));
        assert!(matches!(bad.validate(), Err(ConfigError::InvalidWeight { family: "all_ax", .. })));

        assert!(GameRules::default().with_max_attempts(0).validate().is_err());
    }

    #[test]
    fn test_equity_seed_is_distinct_stream() {
        assert_eq!(GeneratorConfig::default().equity_seed(), None);

        let config = GeneratorConfig::default().with_seed(7);
        let equity_seed = config.equity_seed().unwrap();
        assert_ne!(equity_seed, 7);
        assert_eq!(config.equity_seed(), Some(equity_seed));
        assert_eq!(GeneratorConfig::default().with_seed(u64::MAX).equity_seed(), Some(EQUITY_SEED_OFFSET - 1));

        let mut hand_rng = StdRng::seed_from_u64(7);
        let mut board_rng = StdRng::seed_from_u64(equity_seed);
        let hand_draws: Vec<u64> = (0..4).map(|_| hand_rng.gen()).collect();
        let board_draws: Vec<u64> = (0..4).map(|_| board_rng.gen()).collect();
        assert_ne!(hand_draws, board_draws);
    }

    #[test]
    fn test_fairness_bounds_inclusive() {
        let bounds = FairnessBounds::default();
        assert!(bounds.contains(5.0));
        assert!(bounds.contains(50.0));
        assert!(!bounds.contains(4.99));
        assert!(!bounds.contains(50.01));
        assert!(bounds.admits(&[29.9, 37.9, 16.9, 15.3]));
        assert!(!bounds.admits(&[60.0, 20.0, 15.0, 5.0]));
    }
}
