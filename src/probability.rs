//! Empirical and analytical probability tables and their comparison.
//!
//! Everything here is a pure function of its inputs. The analytical table is
//! the constant P(sum = k) = pairs(k) / 36 with pairs(k) = 6 − |k − 7|.

use crate::constants::{NUM_PAIRS, NUM_SUMS, PAIRS_PER_SUM};
use crate::types::{DifferenceTable, FrequencyTable, ProbabilityTable, TrialCount};

/// probability[k] = freq[k] / n for every sum k.
pub fn to_probabilities(freq: &FrequencyTable, n: TrialCount) -> ProbabilityTable {
    let n = n.get() as f64;
    freq.map(|_, count| count as f64 / n)
}

/// Exact distribution of the sum of two fair dice.
pub fn analytical_probabilities() -> ProbabilityTable {
    let mut values = [0.0f64; NUM_SUMS];
    for (p, &pairs) in values.iter_mut().zip(PAIRS_PER_SUM.iter()) {
        *p = pairs as f64 / NUM_PAIRS as f64;
    }
    ProbabilityTable::from_values(values)
}

/// |empirical[k] − analytical[k]| for every sum k.
pub fn compare(empirical: &ProbabilityTable, analytical: &ProbabilityTable) -> DifferenceTable {
    empirical.map(|sum, p| (p - analytical.get(sum)).abs())
}

/// Pearson chi-square statistic of observed counts against the analytical table.
///
/// Compare with a chi-square distribution with
/// [`CHI_SQUARE_DOF`](crate::constants::CHI_SQUARE_DOF) degrees of freedom.
pub fn chi_square(freq: &FrequencyTable, n: TrialCount) -> f64 {
    let n = n.get() as f64;
    analytical_probabilities()
        .iter()
        .map(|(sum, p)| {
            let expected = p * n;
            let diff = freq.get(sum) as f64 - expected;
            diff * diff / expected
        })
        .sum()
}
