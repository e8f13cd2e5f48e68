//! Turning random hand draws into an accepted puzzle.
//!
//! Each attempt draws four hands, computes their equity and checks the
//! fairness bounds on both the raw and the rounded percentages. The first
//! attempt that passes becomes the puzzle; exhausting the budget is an error
//! and nothing is produced.

use super::families::FamilyTable;
use super::generator::generate_four_hands;
use super::normalize::round_to_sum_100;
use super::types::Puzzle;
use crate::config::GeneratorConfig;
use crate::equity::{EquityCalculator, NUM_HANDS};
use crate::error::GenerationError;
use rand::Rng;
use time::Date;

/// Builds puzzles under a fixed configuration and equity strategy.
pub struct PuzzleGenerator {
    config: GeneratorConfig,
    table: &'static FamilyTable,
    equity: Box<dyn EquityCalculator + Send>,
}

impl PuzzleGenerator {
    /// Use the equity strategy named in `config`.
    pub fn new(config: GeneratorConfig) -> Self {
        let equity = config.equity_calculator();
        Self::with_calculator(config, equity)
    }

    /// Use a caller-supplied equity strategy.
    pub fn with_calculator(config: GeneratorConfig, equity: Box<dyn EquityCalculator + Send>) -> Self {
        Self {
            config,
            table: FamilyTable::global(),
            equity,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the puzzle for `date`.
    pub fn generate<R: Rng + ?Sized>(&mut self, date: Date, rng: &mut R) -> Result<Puzzle, GenerationError> {
        let bounds = self.config.fairness;
        let attempts = self.config.max_puzzle_attempts;
        let mut drew_hands = false;

        for attempt in 1..=attempts {
            let hands = match generate_four_hands(
                self.table,
                &self.config.family_weights,
                self.config.max_hand_attempts,
                rng,
            ) {
                Ok(hands) => hands,
                Err(e) => {
                    log::debug!("{}: attempt {}: {}", date, attempt, e);
                    continue;
                }
            };
            drew_hands = true;

            let equities = self.equity.calculate(&hands)?;
            if !bounds.admits(&equities) {
                log::debug!(
                    "{}: attempt {}: {:?} rejected, equity {:.2?} outside {}-{}",
                    date, attempt, hands, equities, bounds.min, bounds.max
                );
                continue;
            }

            let rounded = round_to_sum_100(&equities)?;
            let percents = match to_percents(rounded) {
                Some(p) if bounds.admits(&p.map(f64::from)) => p,
                _ => {
                    log::debug!("{}: attempt {}: rounding {:?} left the bounds", date, attempt, rounded);
                    continue;
                }
            };

            let puzzle = Puzzle::new(date, hands, percents);
            log::info!(
                "{}: accepted {:?} -> {:?} ({}) after {} attempt(s) using {} equity",
                date,
                hands,
                percents,
                puzzle.difficulty,
                attempt,
                self.equity.name()
            );
            return Ok(puzzle);
        }

        if drew_hands {
            Err(GenerationError::FairnessGate { attempts, min: bounds.min, max: bounds.max })
        } else {
            Err(GenerationError::HandsExhausted { attempts })
        }
    }
}

fn to_percents(rounded: [i32; NUM_HANDS]) -> Option<[u8; NUM_HANDS]> {
    let mut out = [0u8; NUM_HANDS];
    for (slot, value) in out.iter_mut().zip(rounded) {
        *slot = u8::try_from(value).ok().filter(|&p| p <= 100)?;
    }
    Some(out)
}
