//! Core value types: validated trial counts and per-sum tables.
//!
//! All per-sum tables share one fixed-size layout, [`SumTable<T>`], indexed
//! by [`sum_index`]. A table is a plain `Copy` value: each run creates its own
//! and nothing is reset or shared between runs.

use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::constants::{index_sum, sum_index, DEFAULT_TRIALS, NUM_SUMS};
use crate::error::{Error, Result};

// ── Trial count ─────────────────────────────────────────────────────

/// Number of trials in a run. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrialCount(u64);

impl TrialCount {
    pub const DEFAULT: TrialCount = TrialCount(DEFAULT_TRIALS);

    /// Validate a signed count. Zero and negative values are rejected.
    pub fn new(n: i64) -> Result<Self> {
        if n <= 0 {
            return Err(Error::InvalidArgument(format!(
                "trial count must be positive, got {n}"
            )));
        }
        Ok(Self(n as u64))
    }

    #[inline(always)]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl Default for TrialCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u64> for TrialCount {
    type Error = Error;

    fn try_from(n: u64) -> Result<Self> {
        if n == 0 {
            return Err(Error::InvalidArgument(
                "trial count must be positive, got 0".to_string(),
            ));
        }
        Ok(Self(n))
    }
}

impl FromStr for TrialCount {
    type Err = Error;

    /// Parse a decimal integer. `"1e5"`, `"2.5"` and `"abc"` are rejected.
    fn from_str(s: &str) -> Result<Self> {
        let n: i128 = s.trim().parse().map_err(|_| {
            Error::InvalidArgument(format!("trial count must be an integer, got '{s}'"))
        })?;
        if n <= 0 {
            return Err(Error::InvalidArgument(format!(
                "trial count must be positive, got {n}"
            )));
        }
        u64::try_from(n)
            .map(Self)
            .map_err(|_| Error::InvalidArgument(format!("trial count too large: {n}")))
    }
}

impl fmt::Display for TrialCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for TrialCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

// ── Per-sum tables ──────────────────────────────────────────────────

/// One value per sum 2..=12.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SumTable<T> {
    values: [T; NUM_SUMS],
}

/// Trials per sum. Invariant after a run: counts add up to the trial count.
pub type FrequencyTable = SumTable<u64>;

/// Probability per sum, each in [0, 1].
pub type ProbabilityTable = SumTable<f64>;

/// Absolute empirical-vs-analytical difference per sum.
pub type DifferenceTable = SumTable<f64>;

impl<T: Copy + Default> SumTable<T> {
    pub fn from_values(values: [T; NUM_SUMS]) -> Self {
        Self { values }
    }

    /// Value for `sum`, or the zero value if `sum` is outside 2..=12.
    #[inline(always)]
    pub fn get(&self, sum: u8) -> T {
        sum_index(sum).map(|i| self.values[i]).unwrap_or_default()
    }

    pub fn values(&self) -> &[T; NUM_SUMS] {
        &self.values
    }

    /// `(sum, value)` pairs in ascending sum order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, T)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| (index_sum(i), v))
    }

    pub fn map<U, F>(&self, mut f: F) -> SumTable<U>
    where
        U: Copy + Default,
        F: FnMut(u8, T) -> U,
    {
        let mut values = [U::default(); NUM_SUMS];
        for (i, out) in values.iter_mut().enumerate() {
            *out = f(index_sum(i), self.values[i]);
        }
        SumTable { values }
    }
}

impl SumTable<u64> {
    /// Count one trial with the given sum.
    pub fn record(&mut self, sum: u8) -> Result<()> {
        let i = sum_index(sum).ok_or_else(|| {
            Error::InvalidArgument(format!("sum {sum} outside 2..=12"))
        })?;
        self.values[i] += 1;
        Ok(())
    }

    /// Total trials recorded.
    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }

    /// Element-wise addition of another run's counts.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (a, b) in self.values.iter_mut().zip(other.values.iter()) {
            *a += b;
        }
    }

    /// Number of sums that occurred at least once.
    pub fn occupied_buckets(&self) -> usize {
        self.values.iter().filter(|&&c| c > 0).count()
    }
}

impl SumTable<f64> {
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Sum with the largest value (lowest sum on ties) and that value.
    pub fn peak(&self) -> (u8, f64) {
        let mut best = 0;
        for i in 1..NUM_SUMS {
            if self.values[i] > self.values[best] {
                best = i;
            }
        }
        (index_sum(best), self.values[best])
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    pub fn mean_value(&self) -> f64 {
        self.total() / NUM_SUMS as f64
    }
}

/// Serializes as a map keyed by sum: `{"2": .., "3": .., .., "12": ..}`.
impl<T: Copy + Default + Serialize> Serialize for SumTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(NUM_SUMS))?;
        for (sum, value) in self.iter() {
            map.serialize_entry(&sum.to_string(), &value)?;
        }
        map.end()
    }
}
