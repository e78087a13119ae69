//! Dice constants and sum-indexing functions.
//!
//! - faces per die = [`FACES`] = 6
//! - sums range over [`MIN_SUM`]..=[`MAX_SUM`] = 2..=12, i.e. [`NUM_SUMS`] = 11 buckets
//! - SUM_INDEX(s) = [`sum_index`]`(s)` = s − 2

/// Faces on one die.
pub const FACES: u8 = 6;

/// Smallest possible sum of two dice.
pub const MIN_SUM: u8 = 2;

/// Largest possible sum of two dice.
pub const MAX_SUM: u8 = 12;

/// Number of distinct sums (2..=12).
pub const NUM_SUMS: usize = (MAX_SUM - MIN_SUM + 1) as usize;

/// Ordered pairs (d1, d2) for two dice: 6 * 6.
pub const NUM_PAIRS: u32 = (FACES as u32) * (FACES as u32);

/// Trial count used when none is configured.
pub const DEFAULT_TRIALS: u64 = 100_000;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Trials per rayon work item in parallel runs. Fixed so results depend only on the seed.
pub const PARALLEL_CHUNK_TRIALS: u64 = 1 << 16;

/// Ordered pairs producing each sum, indexed by [`sum_index`].
pub const PAIRS_PER_SUM: [u32; NUM_SUMS] = [1, 2, 3, 4, 5, 6, 5, 4, 3, 2, 1];

/// Degrees of freedom of the chi-square test over all sums.
pub const CHI_SQUARE_DOF: usize = NUM_SUMS - 1;

/// Map a sum in 2..=12 to its table index, or `None` outside that range.
#[inline(always)]
pub fn sum_index(sum: u8) -> Option<usize> {
    if (MIN_SUM..=MAX_SUM).contains(&sum) {
        Some((sum - MIN_SUM) as usize)
    } else {
        None
    }
}

/// Inverse of [`sum_index`].
#[inline(always)]
pub fn index_sum(index: usize) -> u8 {
    MIN_SUM + index as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_index_bounds() {
        assert_eq!(sum_index(2), Some(0));
        assert_eq!(sum_index(12), Some(10));
        assert_eq!(sum_index(1), None);
        assert_eq!(sum_index(13), None);
        for i in 0..NUM_SUMS {
            assert_eq!(sum_index(index_sum(i)), Some(i));
        }
    }

    #[test]
    fn test_pairs_cover_all_outcomes() {
        let total: u32 = PAIRS_PER_SUM.iter().sum();
        assert_eq!(total, NUM_PAIRS);
    }
}
