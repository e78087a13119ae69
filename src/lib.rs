//! # Dice Sums — Monte Carlo vs. analytical distribution of two-dice sums
//!
//! Rolls two fair six-sided dice N times, tallies how often each sum 2..12
//! occurs, and compares the empirical probabilities with the exact ones.
//!
//! ## Pipeline
//!
//! | Step | Function | Module | Description |
//! |------|----------|--------|-------------|
//! | 1 | `run` / `run_parallel` | [`simulation::engine`] | Roll N trials into a [`types::FrequencyTable`] |
//! | 2 | `to_probabilities` | [`probability`] | count / N per sum |
//! | 3 | `analytical_probabilities` | [`probability`] | favorable pairs / 36 per sum |
//! | 4 | `compare` | [`probability`] | \|empirical − analytical\| per sum |
//! | 5 | `Report::new` | [`report`] | Table, histogram and JSON output |
//!
//! [`simulation::engine::DiceSumExperiment`] bundles steps 1–4 for a given
//! trial count and seed.
//!
//! ## Randomness
//!
//! Trials draw from a [`dice_mechanics::DieSource`]. Any `rand` generator
//! works through [`dice_mechanics::UniformDie`]; fallible generators such as
//! `OsRng` go through [`dice_mechanics::FallibleDie`]; and
//! [`dice_mechanics::PairEnumeration`] cycles deterministically through all 36
//! ordered pairs, which reproduces the analytical table exactly.

pub mod constants;
pub mod dice_mechanics;
pub mod env_config;
pub mod error;
pub mod probability;
pub mod report;
pub mod simulation;
pub mod types;

pub use error::{Error, Result};
