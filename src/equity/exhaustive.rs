//! Exact equity by enumerating every community board.

use super::{dead_cards, EquityCalculator, Equities, ShowdownTally, NUM_HANDS};
use crate::cards::{deck_without, Card, Hand, HandEvaluator};
use crate::error::EquityError;
use rayon::prelude::*;

/// Enumerates all C(n,5) boards from the live deck.
///
/// Boards are partitioned by their lowest-indexed card and tallied in parallel.
/// Each board is visited exactly once.
#[derive(Debug, Clone, Default)]
pub struct ExhaustiveEquity {
    evaluator: HandEvaluator,
}

impl ExhaustiveEquity {
    /// Create a new exhaustive calculator.
    pub fn new() -> Self {
        Self { evaluator: HandEvaluator::new() }
    }

    /// Raw pot-share tallies over every board.
    pub fn tally(&self, hands: &[Hand; NUM_HANDS]) -> Result<ShowdownTally, EquityError> {
        let live = deck_without(dead_cards(hands)?);
        let n = live.len();
        let evaluator = &self.evaluator;

        let tally = (0..n.saturating_sub(4))
            .into_par_iter()
            .map(|a| {
                let mut tally = ShowdownTally::default();
                for b in (a + 1)..n {
                    for c in (b + 1)..n {
                        for d in (c + 1)..n {
                            for e in (d + 1)..n {
                                let board: [Card; 5] = [live[a], live[b], live[c], live[d], live[e]];
                                tally.record(evaluator, hands, &board);
                            }
                        }
                    }
                }
                tally
            })
            .reduce(ShowdownTally::default, ShowdownTally::merge);

        Ok(tally)
    }
}

impl EquityCalculator for ExhaustiveEquity {
    fn calculate(&mut self, hands: &[Hand; NUM_HANDS]) -> Result<Equities, EquityError> {
        let tally = self.tally(hands)?;
        log::debug!("exhaustive equity over {} boards for {:?}", tally.boards, hands);
        Ok(tally.percentages())
    }

    fn name(&self) -> &'static str {
        "exhaustive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::normalize::round_to_sum_100;

    fn hands(codes: [&str; 4]) -> [Hand; 4] {
        codes.map(|c| c.parse().unwrap())
    }

    #[test]
    fn test_golden_ak_qq_jj_99() {
        let hs = hands(["AsKh", "QdQc", "JhJs", "9c9d"]);
        let tally = ExhaustiveEquity::new().tally(&hs).unwrap();

        assert_eq!(tally.boards, 1_086_008);
        assert_eq!(tally.shares, [3_896_829, 4_933_785, 2_207_421, 1_994_061]);
        assert_eq!(tally.shares.iter().sum::<u64>(), 12 * 1_086_008);

        let pct = tally.percentages();
        assert!((pct[0] - 29.9018).abs() < 1e-3);
        assert!((pct[1] - 37.8587).abs() < 1e-3);
        assert_eq!(round_to_sum_100(&pct).unwrap(), [30, 38, 17, 15]);
    }

    #[test]
    fn test_rejects_shared_cards() {
        let hs = hands(["AsKh", "AsQc", "JhJs", "9c9d"]);
        assert!(ExhaustiveEquity::new().calculate(&hs).is_err());
    }

    #[test]
    fn test_position_symmetry() {
        let hs = hands(["AsKh", "QdQc", "JhJs", "9c9d"]);
        let rotated = [hs[2], hs[3], hs[0], hs[1]];
        let mut calc = ExhaustiveEquity::new();
        let a = calc.calculate(&hs).unwrap();
        let b = calc.calculate(&rotated).unwrap();
        assert_eq!([a[2], a[3], a[0], a[1]], b);
    }
}
