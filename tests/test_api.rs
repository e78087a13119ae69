//! End-to-end tests of the public experiment API.
//!
//! The exact-enumeration scenario rolls 36 million trials, so this binary is
//! slower than the unit tests in debug builds.

use std::fmt;

use rand::TryRngCore;

use dice_sums::dice_mechanics::{FallibleDie, PairEnumeration, UniformDie};
use dice_sums::probability::{analytical_probabilities, to_probabilities};
use dice_sums::report::{render_table, Report};
use dice_sums::simulation::{convergence_sweep, run, DiceSumExperiment, SplitMix64};
use dice_sums::types::TrialCount;
use dice_sums::Error;

fn trials(n: i64) -> TrialCount {
    TrialCount::new(n).unwrap()
}

// ── Exact enumeration ────────────────────────────────────────────────

#[test]
fn enumeration_of_36_million_matches_analytical_exactly() {
    let n = trials(36_000_000);
    let freq = run(n, &mut PairEnumeration::new()).unwrap();
    assert_eq!(freq.total(), 36_000_000);
    assert_eq!(freq.get(7), 6_000_000);
    assert_eq!(freq.get(2), 1_000_000);

    let empirical = to_probabilities(&freq, n);
    let analytical = analytical_probabilities();
    assert_eq!(empirical, analytical);
    assert_eq!(empirical.get(7), 1.0 / 6.0);
}

// ── Edge cases ───────────────────────────────────────────────────────

#[test]
fn single_trial_has_one_bucket() {
    let outcome = DiceSumExperiment::new(trials(1)).with_seed(123).execute().unwrap();
    let nonzero: Vec<(u8, u64)> = outcome.frequencies.iter().filter(|&(_, c)| c > 0).collect();
    assert_eq!(nonzero.len(), 1);
    assert_eq!(nonzero[0].1, 1);

    let ones = outcome.empirical.iter().filter(|&(_, p)| p == 1.0).count();
    assert_eq!(ones, 1);
    assert_eq!(outcome.empirical.get(nonzero[0].0), 1.0);
}

#[test]
fn zero_and_negative_trials_rejected() {
    for n in [0, -5] {
        match TrialCount::new(n) {
            Err(Error::InvalidArgument(msg)) => assert!(msg.contains("positive"), "{msg}"),
            other => panic!("expected InvalidArgument for {n}, got {other:?}"),
        }
    }
    assert!(matches!("12.5".parse::<TrialCount>(), Err(Error::InvalidArgument(_))));
}

// ── Randomness source failure ────────────────────────────────────────

#[derive(Debug)]
struct Unplugged;

impl fmt::Display for Unplugged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hardware RNG unplugged")
    }
}

/// Produces `budget` words from an inner generator, then fails forever.
struct BudgetRng {
    inner: SplitMix64,
    budget: usize,
}

impl TryRngCore for BudgetRng {
    type Error = Unplugged;

    fn try_next_u32(&mut self) -> Result<u32, Unplugged> {
        if self.budget == 0 {
            return Err(Unplugged);
        }
        self.budget -= 1;
        Ok(rand::RngCore::next_u32(&mut self.inner))
    }

    fn try_next_u64(&mut self) -> Result<u64, Unplugged> {
        Ok((u64::from(self.try_next_u32()?) << 32) | u64::from(self.try_next_u32()?))
    }

    fn try_fill_bytes(&mut self, dst: &mut [u8]) -> Result<(), Unplugged> {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.try_next_u32()?.to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
        Ok(())
    }
}

#[test]
fn failing_source_yields_no_table() {
    let mut die = FallibleDie::new(BudgetRng {
        inner: SplitMix64::new(1),
        budget: 50,
    });
    let result = DiceSumExperiment::new(trials(1_000)).execute_with(&mut die);
    match result {
        Err(Error::RandomnessSourceFailure(msg)) => assert!(msg.contains("unplugged")),
        Err(other) => panic!("expected RandomnessSourceFailure, got {other}"),
        Ok(_) => panic!("expected failure after 50 words"),
    }
}

#[test]
fn fallible_source_with_enough_budget_succeeds() {
    let mut die = FallibleDie::new(BudgetRng {
        inner: SplitMix64::new(1),
        budget: 10_000,
    });
    let freq = run(trials(1_000), &mut die).unwrap();
    assert_eq!(freq.total(), 1_000);
}

// ── Statistical behavior ─────────────────────────────────────────────

#[test]
fn default_run_is_close_to_analytical() {
    let outcome = DiceSumExperiment::default().execute().unwrap();
    assert_eq!(outcome.frequencies.total(), 100_000);
    // Standard error for p = 1/6 at N = 100k is ~0.12%; 1% is far outside it.
    assert!(outcome.differences.max_value() < 0.01);
    assert_eq!(outcome.empirical.peak().0, 7);
}

#[test]
fn parallel_run_is_close_to_analytical() {
    let outcome = DiceSumExperiment::new(trials(500_000))
        .with_seed(77)
        .execute_parallel()
        .unwrap();
    assert_eq!(outcome.frequencies.total(), 500_000);
    assert!(outcome.differences.max_value() < 0.005);
}

#[test]
fn splitmix_source_converges() {
    let mut die = UniformDie::new(SplitMix64::new(2024));
    let outcome = DiceSumExperiment::new(trials(200_000)).execute_with(&mut die).unwrap();
    assert!(outcome.differences.max_value() < 0.005);
}

#[test]
fn convergence_trend_across_seeds() {
    let points = convergence_sweep(&[100, 10_000, 100_000], 10, 1).unwrap();
    assert!(points[0].mean_abs_difference > points[1].mean_abs_difference);
    assert!(points[1].mean_abs_difference > points[2].mean_abs_difference);
}

// ── Report ───────────────────────────────────────────────────────────

#[test]
fn report_from_seeded_run() {
    let outcome = DiceSumExperiment::new(trials(10_000)).with_seed(5).execute().unwrap();
    let report = Report::new(&outcome, Some(5));
    assert_eq!(report.rows.len(), 11);
    let counted: u64 = report.rows.iter().map(|r| r.count).sum();
    assert_eq!(counted, 10_000);
    for row in &report.rows {
        assert!((row.abs_difference - row.difference.abs()).abs() < 1e-15);
    }

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["seed"], 5);
    assert_eq!(json["chi_square_dof"], 10);

    let text = render_table(&report);
    assert_eq!(text.lines().count(), 14);
}
