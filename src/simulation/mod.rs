//! Dice-sum simulation.
//!
//! - [`engine`]: Core simulation (roll N trials, sequential or parallel)
//! - [`convergence`]: Error vs. trial count across repeated seeds
//! - [`fast_prng`]: SplitMix64 generator

pub mod convergence;
pub mod engine;
pub mod fast_prng;

// Re-export commonly used items
pub use convergence::{convergence_sweep, ConvergencePoint, DEFAULT_SWEEP_SIZES};
pub use engine::{run, run_parallel, DiceSumExperiment, ExperimentOutcome};
pub use fast_prng::SplitMix64;
