//! Four-way preflop equity.
//!
//! Two interchangeable strategies implement [`EquityCalculator`]:
//!
//! - [`ExhaustiveEquity`]: walks all C(44,5) = 1,086,008 boards. Exact.
//! - [`MonteCarloEquity`]: samples shuffled boards. Error shrinks as O(1/sqrt(N)).
//!
//! Both score every board the same way: the best hand(s) split one unit of
//! pot. Shares are counted in twelfths so two-, three- and four-way splits stay
//! exact integers, which keeps the exhaustive result independent of how the
//! work is partitioned across threads.

pub mod exhaustive;
pub mod monte_carlo;

pub use exhaustive::ExhaustiveEquity;
pub use monte_carlo::MonteCarloEquity;

use crate::cards::{Card, CardSet, Hand, HandEvaluator};
use crate::error::EquityError;
use serde::{Deserialize, Serialize};

/// Number of hands in every puzzle.
pub const NUM_HANDS: usize = 4;

/// One board's pot in share units; divisible by every possible winner count.
const POT_UNITS: u64 = 12;

/// Real-valued win percentages, one per hand, summing to ~100.
pub type Equities = [f64; NUM_HANDS];

/// Anything that can turn four disjoint hands into win percentages.
pub trait EquityCalculator {
    /// Compute each hand's win share over community boards, as percentages.
    fn calculate(&mut self, hands: &[Hand; NUM_HANDS]) -> Result<Equities, EquityError>;

    /// Short strategy name for logs.
    fn name(&self) -> &'static str;
}

/// Which equity strategy to run, as chosen by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "method")]
pub enum EquityMethod {
    /// Enumerate every board.
    Exhaustive,
    /// Sample `iterations` random boards.
    MonteCarlo {
        /// Number of sampled boards.
        #[serde(default = "default_iterations")]
        iterations: u64,
    },
}

fn default_iterations() -> u64 {
    1_000_000
}

impl Default for EquityMethod {
    fn default() -> Self {
        EquityMethod::Exhaustive
    }
}

impl EquityMethod {
    /// Monte Carlo with the default sample count.
    pub fn monte_carlo() -> Self {
        EquityMethod::MonteCarlo { iterations: default_iterations() }
    }

    /// Build the calculator. `seed` only affects sampling strategies.
    pub fn build(&self, seed: Option<u64>) -> Box<dyn EquityCalculator + Send> {
        match *self {
            EquityMethod::Exhaustive => Box::new(ExhaustiveEquity::new()),
            EquityMethod::MonteCarlo { iterations } => Box::new(MonteCarloEquity::new(iterations, seed)),
        }
    }
}

/// Reject hand sets that share a card.
pub fn dead_cards(hands: &[Hand; NUM_HANDS]) -> Result<CardSet, EquityError> {
    let mut dead = CardSet::empty();
    for hand in hands {
        for card in hand.cards() {
            if !dead.insert(card) {
                return Err(EquityError::DuplicateCard(card));
            }
        }
    }
    Ok(dead)
}

/// Running pot-share totals across evaluated boards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShowdownTally {
    /// Pot units won per hand.
    pub shares: [u64; NUM_HANDS],
    /// Boards evaluated.
    pub boards: u64,
}

impl ShowdownTally {
    /// Score one complete board, splitting the pot among tied winners.
    #[inline]
    pub fn record(&mut self, evaluator: &HandEvaluator, hands: &[Hand; NUM_HANDS], board: &[Card; 5]) {
        let ranks = hands.map(|h| evaluator.evaluate(&h, board));
        let best = ranks.iter().copied().max().unwrap_or(ranks[0]);
        let winners = ranks.iter().filter(|&&r| r == best).count() as u64;
        let share = POT_UNITS / winners;
        for (slot, rank) in self.shares.iter_mut().zip(ranks.iter()) {
            if *rank == best {
                *slot += share;
            }
        }
        self.boards += 1;
    }

    /// Combine two partial tallies.
    pub fn merge(mut self, other: Self) -> Self {
        for (a, b) in self.shares.iter_mut().zip(other.shares) {
            *a += b;
        }
        self.boards += other.boards;
        self
    }

    /// Convert to percentages of all boards.
    pub fn percentages(&self) -> Equities {
        if self.boards == 0 {
            return [0.0; NUM_HANDS];
        }
        let total = (self.boards * POT_UNITS) as f64;
        self.shares.map(|s| s as f64 / total * 100.0)
    }
}
