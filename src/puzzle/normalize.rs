//! Rounding four equities to whole percentages that sum to exactly 100.

use crate::equity::NUM_HANDS;
use crate::error::NormalizeError;

/// Round four percentages to integers summing to 100.
///
/// Every value is floored, then the values with the largest fractional
/// remainders are bumped up by one until the total reaches 100. For inputs
/// that already sum to 100 this ceils exactly the values whose remainders
/// outweigh the rest, so each result is within 1 of its input. When the
/// inputs do not sum to 100 (sampling noise, float drift) whatever residual
/// is left goes to the largest rounded value.
///
/// Ties between equal remainders go to the earlier position.
pub fn round_to_sum_100(values: &[f64]) -> Result<[i32; NUM_HANDS], NormalizeError> {
    if values.len() != NUM_HANDS {
        return Err(NormalizeError::WrongLength(values.len()));
    }

    let mut rounded = [0i32; NUM_HANDS];
    let mut remainders = [0f64; NUM_HANDS];
    for (i, &v) in values.iter().enumerate() {
        let floor = v.floor();
        rounded[i] = floor as i32;
        remainders[i] = v - floor;
    }

    let mut order: [usize; NUM_HANDS] = [0, 1, 2, 3];
    order.sort_by(|&a, &b| remainders[b].total_cmp(&remainders[a]).then(a.cmp(&b)));

    let shortfall = (100 - rounded.iter().sum::<i32>()).clamp(0, NUM_HANDS as i32) as usize;
    for &i in &order[..shortfall] {
        rounded[i] += 1;
    }

    let residual = 100 - rounded.iter().sum::<i32>();
    if residual != 0 {
        let largest = largest_index(&rounded);
        log::debug!("rounding residual {} applied to position {}", residual, largest + 1);
        rounded[largest] += residual;
    }

    Ok(rounded)
}

fn largest_index(values: &[i32; NUM_HANDS]) -> usize {
    let mut best = 0;
    for i in 1..NUM_HANDS {
        if values[i] > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_golden_distribution() {
        let pct = [29.9018, 37.8587, 16.9383, 15.3012];
        assert_eq!(round_to_sum_100(&pct).unwrap(), [30, 38, 17, 15]);
    }

    #[test]
    fn test_whole_numbers_unchanged() {
        assert_eq!(round_to_sum_100(&[25.0, 25.0, 25.0, 25.0]).unwrap(), [25, 25, 25, 25]);
        assert_eq!(round_to_sum_100(&[50.0, 30.0, 15.0, 5.0]).unwrap(), [50, 30, 15, 5]);
    }

    #[test]
    fn test_largest_remainder_wins() {
        assert_eq!(round_to_sum_100(&[10.1, 20.2, 30.3, 39.4]).unwrap(), [10, 20, 30, 40]);
        assert_eq!(round_to_sum_100(&[33.3, 33.3, 33.4, 0.0]).unwrap(), [33, 33, 34, 0]);
    }

    #[test]
    fn test_odd_remainder_totals() {
        // Remainders summing to 1: only the single largest is bumped.
        assert_eq!(round_to_sum_100(&[10.5, 20.3, 30.1, 39.1]).unwrap(), [11, 20, 30, 39]);
        // Remainders summing to 3: all but the smallest are bumped.
        assert_eq!(round_to_sum_100(&[10.9, 20.8, 30.7, 37.6]).unwrap(), [11, 21, 31, 37]);
    }

    #[test]
    fn test_random_inputs_sum_to_100_within_one() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10_000 {
            let w: [f64; 4] = [rng.gen(), rng.gen(), rng.gen(), rng.gen()];
            let total: f64 = w.iter().sum();
            let pct = w.map(|x| x / total * 100.0);
            let rounded = round_to_sum_100(&pct).unwrap();
            assert_eq!(rounded.iter().sum::<i32>(), 100, "{:?}", pct);
            for (r, p) in rounded.iter().zip(pct) {
                assert!((*r as f64 - p).abs() < 1.0, "{:?} -> {:?}", pct, rounded);
            }
        }
    }

    #[test]
    fn test_residual_goes_to_largest() {
        // Inputs summing to 40: all four bump, then +56 lands on the first maximum.
        let rounded = round_to_sum_100(&[10.0, 10.0, 10.0, 10.0]).unwrap();
        assert_eq!(rounded.iter().sum::<i32>(), 100);
        assert_eq!(rounded, [67, 11, 11, 11]);
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert_eq!(round_to_sum_100(&[50.0, 50.0]), Err(NormalizeError::WrongLength(2)));
        assert_eq!(round_to_sum_100(&[20.0; 5]), Err(NormalizeError::WrongLength(5)));
        assert_eq!(round_to_sum_100(&[]), Err(NormalizeError::WrongLength(0)));
    }
}
