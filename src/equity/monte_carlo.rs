//! Approximate equity from randomly sampled boards.

use super::{dead_cards, EquityCalculator, Equities, ShowdownTally, NUM_HANDS};
use crate::cards::{Card, Deck, Hand, HandEvaluator};
use crate::error::EquityError;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Samples `iterations` boards by shuffling the live deck and dealing five.
#[derive(Debug, Clone)]
pub struct MonteCarloEquity {
    evaluator: HandEvaluator,
    iterations: u64,
    rng: StdRng,
}

impl MonteCarloEquity {
    /// Create a sampler. A fixed `seed` makes results reproducible.
    pub fn new(iterations: u64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            evaluator: HandEvaluator::new(),
            iterations,
            rng,
        }
    }

    /// Number of boards drawn per calculation.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Raw pot-share tallies over the sampled boards.
    pub fn tally(&mut self, hands: &[Hand; NUM_HANDS]) -> Result<ShowdownTally, EquityError> {
        let mut deck = Deck::without(dead_cards(hands)?);
        let mut tally = ShowdownTally::default();

        for _ in 0..self.iterations {
            deck.reset();
            deck.shuffle(&mut self.rng);
            let board: [Card; 5] = deck.deal_array().ok_or(EquityError::DeckExhausted)?;
            tally.record(&self.evaluator, hands, &board);
        }

        Ok(tally)
    }
}

impl EquityCalculator for MonteCarloEquity {
    fn calculate(&mut self, hands: &[Hand; NUM_HANDS]) -> Result<Equities, EquityError> {
        if self.iterations == 0 {
            return Err(EquityError::NoSamples);
        }
        let tally = self.tally(hands)?;
        log::debug!("monte carlo equity over {} boards for {:?}", tally.boards, hands);
        Ok(tally.percentages())
    }

    fn name(&self) -> &'static str {
        "monte_carlo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hands(codes: [&str; 4]) -> [Hand; 4] {
        codes.map(|c| c.parse().unwrap())
    }

    #[test]
    fn test_converges_to_exact() {
        // Exact: 29.90 / 37.86 / 16.94 / 15.30
        let hs = hands(["AsKh", "QdQc", "JhJs", "9c9d"]);
        let mut calc = MonteCarloEquity::new(100_000, Some(42));
        let pct = calc.calculate(&hs).unwrap();
        let exact = [29.9018, 37.8587, 16.9383, 15.3012];
        for (got, want) in pct.iter().zip(exact) {
            assert!((got - want).abs() < 1.0, "got {} want {}", got, want);
        }
        assert!((pct.iter().sum::<f64>() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let hs = hands(["AsKh", "QdQc", "JhJs", "9c9d"]);
        let a = MonteCarloEquity::new(2_000, Some(9)).calculate(&hs).unwrap();
        let b = MonteCarloEquity::new(2_000, Some(9)).calculate(&hs).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let hs = hands(["AsKh", "QdQc", "JhJs", "9c9d"]);
        assert_eq!(MonteCarloEquity::new(0, Some(1)).calculate(&hs), Err(EquityError::NoSamples));
    }
}
