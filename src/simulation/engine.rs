//! Dice-sum simulation engine — rolls N trials and tallies sums.
//!
//! [`run`] is the sequential core: a plain loop over N trials, two draws per
//! trial. [`run_parallel`] splits the trials into fixed-size chunks, rolls each
//! chunk with its own seeded `SmallRng`, and merges the private tables
//! element-wise. Chunk `c` is seeded with `seed.wrapping_add(c)`, so the result
//! depends only on `(n, seed)`, not on the size of the rayon pool.

use rayon::prelude::*;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::constants::{DEFAULT_SEED, PARALLEL_CHUNK_TRIALS};
use crate::dice_mechanics::{roll_pair, DieSource, UniformDie};
use crate::error::Result;
use crate::probability::{analytical_probabilities, compare, to_probabilities};
use crate::types::{DifferenceTable, FrequencyTable, ProbabilityTable, TrialCount};

/// Roll `n` trials from `source` and count each sum.
///
/// Consumes exactly `2 * n` draws on success. On the first source failure the
/// error is returned and the partial counts are dropped.
pub fn run<S: DieSource + ?Sized>(n: TrialCount, source: &mut S) -> Result<FrequencyTable> {
    let mut freq = FrequencyTable::default();
    for _ in 0..n.get() {
        let (d1, d2) = roll_pair(source)?;
        freq.record(d1 + d2)?;
    }
    Ok(freq)
}

/// Roll `n` trials across the rayon pool. Reproducible for a given seed.
pub fn run_parallel(n: TrialCount, seed: u64) -> Result<FrequencyTable> {
    let total = n.get();
    let num_chunks = total.div_ceil(PARALLEL_CHUNK_TRIALS);
    (0..num_chunks)
        .into_par_iter()
        .map(|chunk| {
            let start = chunk * PARALLEL_CHUNK_TRIALS;
            let len = PARALLEL_CHUNK_TRIALS.min(total - start);
            let mut die = UniformDie::seeded(seed.wrapping_add(chunk));
            run(TrialCount::try_from(len)?, &mut die)
        })
        .try_reduce(FrequencyTable::default, |mut a: FrequencyTable, b: FrequencyTable| {
            a.merge(&b);
            Ok(a)
        })
}

/// Everything one experiment produces.
#[derive(Debug, Clone)]
pub struct ExperimentOutcome {
    pub trials: TrialCount,
    pub frequencies: FrequencyTable,
    pub empirical: ProbabilityTable,
    pub analytical: ProbabilityTable,
    pub differences: DifferenceTable,
    pub elapsed: Duration,
}

impl ExperimentOutcome {
    pub fn from_frequencies(trials: TrialCount, frequencies: FrequencyTable, elapsed: Duration) -> Self {
        let empirical = to_probabilities(&frequencies, trials);
        let analytical = analytical_probabilities();
        let differences = compare(&empirical, &analytical);
        Self {
            trials,
            frequencies,
            empirical,
            analytical,
            differences,
            elapsed,
        }
    }
}

/// Trial count and seed for one comparison of simulated vs. exact sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceSumExperiment {
    pub trials: TrialCount,
    pub seed: u64,
}

impl Default for DiceSumExperiment {
    fn default() -> Self {
        Self::new(TrialCount::DEFAULT)
    }
}

impl DiceSumExperiment {
    pub fn new(trials: TrialCount) -> Self {
        Self {
            trials,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    /// Sequential run with `SmallRng` seeded from `self.seed`.
    pub fn execute(&self) -> Result<ExperimentOutcome> {
        let mut die = UniformDie::seeded(self.seed);
        self.execute_with(&mut die)
    }

    /// Sequential run drawing from a caller-supplied source. `self.seed` is unused.
    pub fn execute_with<S: DieSource + ?Sized>(&self, source: &mut S) -> Result<ExperimentOutcome> {
        debug!(trials = %self.trials, "rolling sequentially");
        let start = Instant::now();
        let freq = run(self.trials, source)?;
        Ok(self.finish(freq, start.elapsed()))
    }

    /// Chunked run across the rayon pool. Differs from [`execute`](Self::execute)
    /// for the same seed, but is itself reproducible.
    pub fn execute_parallel(&self) -> Result<ExperimentOutcome> {
        debug!(trials = %self.trials, seed = self.seed, threads = rayon::current_num_threads(), "rolling in parallel");
        let start = Instant::now();
        let freq = run_parallel(self.trials, self.seed)?;
        Ok(self.finish(freq, start.elapsed()))
    }

    fn finish(&self, freq: FrequencyTable, elapsed: Duration) -> ExperimentOutcome {
        let outcome = ExperimentOutcome::from_frequencies(self.trials, freq, elapsed);
        info!(
            trials = %self.trials,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            max_abs_difference = outcome.differences.max_value(),
            "experiment complete"
        );
        outcome
    }
}
