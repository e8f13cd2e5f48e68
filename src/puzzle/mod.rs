//! Daily puzzle generation.
//!
//! ```text
//! PuzzleGenerator::generate
//!   ├─ generate_four_hands ── sample_family / FamilyTable::pick_hand
//!   ├─ EquityCalculator::calculate
//!   ├─ fairness check (raw)
//!   ├─ round_to_sum_100
//!   ├─ fairness check (rounded)
//!   └─ Difficulty::from_percentages
//! ```
//!
//! [`generate_for_date`] wraps the generator with a [`PuzzleStore`] so that
//! running it twice for one date stores one puzzle.

pub mod assembler;
pub mod families;
pub mod generator;
pub mod normalize;
pub mod store;
pub mod types;

pub use assembler::PuzzleGenerator;
pub use families::{sample_family, FamilyTable, FamilyWeights, HandFamily};
pub use generator::generate_four_hands;
pub use normalize::round_to_sum_100;
pub use store::{generate_for_date, GenerationOutcome, JsonFileStore, MemoryStore, PuzzleStore};
pub use types::{Difficulty, PublicHand, PublicPuzzle, Puzzle, PuzzleHand};
