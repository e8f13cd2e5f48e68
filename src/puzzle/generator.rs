//! Assembling four disjoint starting hands.

use super::families::{sample_family, FamilyTable, FamilyWeights};
use crate::cards::{CardSet, Hand};
use crate::equity::NUM_HANDS;
use crate::error::GenerationError;
use rand::Rng;

/// Draw four card-disjoint hands, each from a weighted-random family.
///
/// Each attempt starts from an empty used-card set. When a sampled family has
/// no hand left that avoids the used cards, the whole attempt is abandoned and
/// the next one starts from scratch; there is no per-hand backtracking.
pub fn generate_four_hands<R: Rng + ?Sized>(
    table: &FamilyTable,
    weights: &FamilyWeights,
    max_attempts: u32,
    rng: &mut R,
) -> Result<[Hand; NUM_HANDS], GenerationError> {
    'attempt: for attempt in 1..=max_attempts {
        let mut used = CardSet::empty();
        let mut hands = Vec::with_capacity(NUM_HANDS);

        for _ in 0..NUM_HANDS {
            let family = sample_family(weights, rng);
            match table.pick_hand(family, used, rng) {
                Some(hand) => {
                    used.insert_hand(&hand);
                    hands.push(hand);
                }
                None => {
                    log::debug!("attempt {}: family {} exhausted, restarting", attempt, family);
                    continue 'attempt;
                }
            }
        }

        if let Ok(hands) = <[Hand; NUM_HANDS]>::try_from(hands) {
            return Ok(hands);
        }
    }

    Err(GenerationError::HandsExhausted { attempts: max_attempts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::families::HandFamily;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn only(family: HandFamily) -> FamilyWeights {
        let mut weights = FamilyWeights::default();
        for f in HandFamily::ALL {
            weights.set(f, if f == family { 1.0 } else { 0.0 });
        }
        weights
    }

    #[test]
    fn test_hands_are_disjoint() {
        let table = FamilyTable::global();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let hands = generate_four_hands(table, &FamilyWeights::default(), 100, &mut rng).unwrap();
            let mut seen = CardSet::empty();
            for hand in &hands {
                for card in hand.cards() {
                    assert!(seen.insert(card), "{:?} reuses {}", hands, card);
                }
            }
            assert_eq!(seen.len(), 8);
        }
    }

    #[test]
    fn test_hands_come_from_weighted_family() {
        let table = FamilyTable::global();
        let mut rng = StdRng::seed_from_u64(7);
        let hands = generate_four_hands(table, &only(HandFamily::PocketPairs), 10, &mut rng).unwrap();
        assert!(hands.iter().all(|h| h.is_pair()));
    }

    #[test]
    fn test_seeded_generation_repeats() {
        let table = FamilyTable::global();
        let a = generate_four_hands(table, &FamilyWeights::default(), 100, &mut StdRng::seed_from_u64(3));
        let b = generate_four_hands(table, &FamilyWeights::default(), 100, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_exhaustion_is_reported() {
        let table = FamilyTable::global();
        let mut rng = StdRng::seed_from_u64(1);
        let result = generate_four_hands(table, &FamilyWeights::default(), 0, &mut rng);
        assert_eq!(result, Err(GenerationError::HandsExhausted { attempts: 0 }));
    }
}
