//! Error types for puzzle generation, storage and configuration.

use crate::cards::Card;
use std::path::PathBuf;
use thiserror::Error;
use time::Date;

/// Errors from the equity engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquityError {
    /// Two hands share a card.
    #[error("card {0} appears in more than one hand")]
    DuplicateCard(Card),
    /// The live deck cannot fill a board.
    #[error("not enough live cards to deal a board")]
    DeckExhausted,
    /// A sampling strategy was asked for zero boards.
    #[error("monte carlo equity needs at least one iteration")]
    NoSamples,
}

/// Errors from `round_to_sum_100`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// Input did not have exactly four values.
    #[error("expected exactly 4 percentages, got {0}")]
    WrongLength(usize),
}

/// Why a puzzle could not be generated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    /// No attempt ever assembled four disjoint hands.
    #[error("failed to generate 4 non-overlapping hands after {attempts} attempts")]
    HandsExhausted {
        /// Hand-assembly attempts made.
        attempts: u32,
    },
    /// Hands were found, but none passed the fairness bounds.
    #[error("no hand set within {min}%-{max}% equity after {attempts} attempts")]
    FairnessGate {
        /// Puzzle attempts made.
        attempts: u32,
        /// Lower equity bound.
        min: f64,
        /// Upper equity bound.
        max: f64,
    },
    /// The equity engine rejected a hand set.
    #[error("equity calculation failed: {0}")]
    Equity(#[from] EquityError),
    /// Rounding was handed a malformed input.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Errors from a puzzle store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("store I/O error on {}: {source}", .path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The backing file is not valid puzzle JSON.
    #[error("store data is malformed: {0}")]
    Serde(#[from] serde_json::Error),
    /// A puzzle for this date is already stored.
    #[error("a puzzle already exists for {0}")]
    DuplicateDate(Date),
}

/// Failure of the generate-and-persist driver. Store failures stay distinct
/// from generation failures.
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// Generation logic failed.
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
    /// The store could not be read or written.
    #[error("puzzle store failure: {0}")]
    Store(#[from] StoreError),
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The config file or override is not valid JSON for this schema.
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// A family weight is negative or not finite.
    #[error("weight for {family} must be a non-negative number, got {weight}")]
    InvalidWeight {
        /// Family name.
        family: &'static str,
        /// Offending weight.
        weight: f64,
    },
    /// Every family has zero weight.
    #[error("at least one hand family needs a positive weight")]
    ZeroWeights,
    /// An attempt budget is zero.
    #[error("{0} must be at least 1")]
    ZeroAttempts(&'static str),
    /// Fairness bounds are inverted or outside 0-100.
    #[error("fairness bounds {min}-{max} must satisfy 0 <= min <= max <= 100")]
    InvalidFairness {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// Monte Carlo configured with zero iterations.
    #[error("monte carlo iterations must be at least 1")]
    ZeroIterations,
}
