//! Convergence sweep: how fast empirical sums approach the exact distribution.
//!
//! For each trial count, `repeats` independent runs are rolled in parallel
//! (repeat `r` seeded with `seed.wrapping_add(r)`) and their per-sum absolute
//! differences are averaged. A single run says little about a statistical
//! bound; the mean over many seeds shrinks roughly like 1/sqrt(N).

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::constants::NUM_SUMS;
use crate::dice_mechanics::UniformDie;
use crate::error::{Error, Result};
use crate::probability::{analytical_probabilities, compare, to_probabilities};
use crate::simulation::engine::run;
use crate::types::TrialCount;

/// Aggregate error at one trial count.
#[derive(Debug, Clone, Serialize)]
pub struct ConvergencePoint {
    pub trials: TrialCount,
    pub repeats: usize,
    /// Mean of |empirical − analytical| over all sums and repeats.
    pub mean_abs_difference: f64,
    /// Largest single |empirical − analytical| seen.
    pub max_abs_difference: f64,
}

/// Default sweep sizes: 100 → 10,000 → 1,000,000.
pub const DEFAULT_SWEEP_SIZES: [u64; 3] = [100, 10_000, 1_000_000];

/// Run the sweep. Points are returned in the order of `sizes`.
pub fn convergence_sweep(sizes: &[u64], repeats: usize, seed: u64) -> Result<Vec<ConvergencePoint>> {
    if sizes.is_empty() {
        return Err(Error::InvalidArgument("sweep needs at least one trial count".to_string()));
    }
    if repeats == 0 {
        return Err(Error::InvalidArgument("sweep needs at least one repeat".to_string()));
    }
    let analytical = analytical_probabilities();

    sizes
        .iter()
        .map(|&size| {
            let trials = TrialCount::try_from(size)?;
            let diffs = (0..repeats)
                .into_par_iter()
                .map(|r| {
                    let mut die = UniformDie::seeded(seed.wrapping_add(r as u64));
                    let freq = run(trials, &mut die)?;
                    Ok(compare(&to_probabilities(&freq, trials), &analytical))
                })
                .collect::<Result<Vec<_>>>()?;

            let total: f64 = diffs.iter().map(|d| d.total()).sum();
            let mean_abs_difference = total / (repeats * NUM_SUMS) as f64;
            let max_abs_difference = diffs.iter().map(|d| d.max_value()).fold(0.0, f64::max);
            debug!(trials = size, repeats, mean_abs_difference, max_abs_difference, "sweep point");

            Ok(ConvergencePoint {
                trials,
                repeats,
                mean_abs_difference,
                max_abs_difference,
            })
        })
        .collect()
}
