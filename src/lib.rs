//! # Hold'emle
//!
//! Generator and scorer for a daily Texas Hold'em guessing game: four
//! starting hands are dealt face up and players guess each hand's preflop
//! win percentage, with the four guesses totalling exactly 100.
//!
//! ## Features
//!
//! - **Hand Families**: All 1326 starting hands partitioned into eight
//!   weighted families for curated variety
//! - **Exact Equity**: Parallel enumeration of all 1,086,008 boards
//! - **Sampled Equity**: Seeded Monte Carlo with the same pot-splitting rules
//! - **Fair Rounding**: Integer percentages that always sum to 100
//! - **Fairness Gate**: No hand below 5% or above 50%
//! - **Scoring**: Feedback, validation, scores and share text
//!
//! ## Quick Start
//!
//! ```no_run
//! use holdemle::config::GeneratorConfig;
//! use holdemle::puzzle::{generate_for_date, MemoryStore, PuzzleGenerator};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use time::macros::date;
//!
//! let mut generator = PuzzleGenerator::new(GeneratorConfig::default());
//! let mut store = MemoryStore::new();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let outcome = generate_for_date(&mut store, &mut generator, date!(2025 - 01 - 15), &mut rng)?;
//! println!("{:?}", outcome);
//! # Ok::<(), holdemle::error::PuzzleError>(())
//! ```
//!
//! ## Modules
//!
//! - [`cards`]: Cards, canonical hands, decks and 7-card evaluation
//! - [`equity`]: Exhaustive and Monte Carlo four-way equity
//! - [`puzzle`]: Families, hand generation, rounding, assembly and storage
//! - [`scoring`]: Guess validation, feedback, scores and share text
//! - [`config`]: Generator settings and game rules
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  generate_for_date (idempotent)                 │
//! │  - Skip dates already stored     - Persist accepted puzzle      │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        PuzzleGenerator                          │
//! │  - Bounded retries               - Fairness gate [5, 50]        │
//! │  - Rounding to 100               - Difficulty from spread       │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!         ┌─────────────────────┼─────────────────────┐
//!         │                     │                     │
//!         ▼                     ▼                     ▼
//!    ┌─────────┐         ┌────────────┐        ┌────────────┐
//!    │  Hand   │         │ Exhaustive │        │   Monte    │
//!    │Families │         │   Equity   │        │   Carlo    │
//!    └─────────┘         └────────────┘        └────────────┘
//!                               │                     │
//!                               └──────────┬──────────┘
//!                                          ▼
//!                                 ┌─────────────────┐
//!                                 │  HandEvaluator  │
//!                                 └─────────────────┘
//! ```

#![warn(missing_docs)]

/// Card primitives and hand evaluation.
pub mod cards;

/// Generator and game configuration.
pub mod config;

/// Four-way preflop equity engines.
pub mod equity;

/// Error types shared across modules.
pub mod error;

/// Puzzle generation and storage.
///
/// Everything that runs ahead of play.
pub mod puzzle;

/// Guess handling at play time.
pub mod scoring;

// Re-export commonly used types at crate root for convenience
pub use cards::{Card, Hand, HandEvaluator};
pub use config::{GameRules, GeneratorConfig};
pub use equity::{EquityCalculator, EquityMethod, ExhaustiveEquity, MonteCarloEquity};
pub use puzzle::{Difficulty, HandFamily, Puzzle, PuzzleGenerator};
pub use scoring::{grade_submission, Feedback, Guess, GuessError};
