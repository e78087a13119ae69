//! Shared environment configuration for the dice binaries.
//!
//! Consolidates `DICE_TRIALS`, `DICE_SEED`, `RAYON_NUM_THREADS` and `RUST_LOG` reads.
//! Command-line flags override the values read here.

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::constants::DEFAULT_SEED;
use crate::error::{Error, Result};
use crate::types::TrialCount;

/// Install the stderr `tracing` subscriber. `RUST_LOG` filters (default `info`).
/// Safe to call twice; the second call is a no-op.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Read `RAYON_NUM_THREADS` (fallback `OMP_NUM_THREADS`, default 8) and build the
/// global pool. Tolerates an already-initialized pool. Returns thread count.
pub fn init_rayon_threads() -> usize {
    let num_threads = std::env::var("RAYON_NUM_THREADS")
        .or_else(|_| std::env::var("OMP_NUM_THREADS"))
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .ok(); // May fail if already initialized
    info!(threads = num_threads, "rayon pool configured");
    num_threads
}

/// Read `DICE_TRIALS` (default 100,000). A set but invalid value is an error.
pub fn trials() -> Result<TrialCount> {
    match std::env::var("DICE_TRIALS") {
        Ok(s) => s.parse(),
        Err(_) => Ok(TrialCount::DEFAULT),
    }
}

/// Read `DICE_SEED` (default 42). A set but invalid value is an error.
pub fn seed() -> Result<u64> {
    match std::env::var("DICE_SEED") {
        Ok(s) => parse_seed(&s),
        Err(_) => Ok(DEFAULT_SEED),
    }
}

pub fn parse_seed(s: &str) -> Result<u64> {
    s.trim()
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("seed must be an unsigned integer, got '{s}'")))
}
