//! Comparison report: per-sum rows, text rendering and JSON output.

use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

use crate::constants::CHI_SQUARE_DOF;
use crate::error::Result;
use crate::probability::chi_square;
use crate::simulation::engine::ExperimentOutcome;
use crate::types::TrialCount;

/// Width of the longest histogram bar, in characters.
const HISTOGRAM_WIDTH: usize = 50;

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub sum: u8,
    pub count: u64,
    pub empirical: f64,
    pub analytical: f64,
    /// empirical − analytical
    pub difference: f64,
    pub abs_difference: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub trials: TrialCount,
    /// `None` when the source was not a seeded generator.
    pub seed: Option<u64>,
    pub elapsed_ms: f64,
    pub rows: Vec<ComparisonRow>,
    pub max_abs_difference: f64,
    pub mean_abs_difference: f64,
    pub chi_square: f64,
    pub chi_square_dof: usize,
}

impl Report {
    pub fn new(outcome: &ExperimentOutcome, seed: Option<u64>) -> Self {
        let rows = outcome
            .empirical
            .iter()
            .map(|(sum, empirical)| {
                let analytical = outcome.analytical.get(sum);
                ComparisonRow {
                    sum,
                    count: outcome.frequencies.get(sum),
                    empirical,
                    analytical,
                    difference: empirical - analytical,
                    abs_difference: outcome.differences.get(sum),
                }
            })
            .collect();

        Self {
            trials: outcome.trials,
            seed,
            elapsed_ms: outcome.elapsed.as_secs_f64() * 1000.0,
            rows,
            max_abs_difference: outcome.differences.max_value(),
            mean_abs_difference: outcome.differences.mean_value(),
            chi_square: chi_square(&outcome.frequencies, outcome.trials),
            chi_square_dof: CHI_SQUARE_DOF,
        }
    }
}

/// Table of empirical vs. analytical percentages, one line per sum.
pub fn render_table(report: &Report) -> String {
    let header = "Sum | Empirical | Analytical | Abs. Difference";
    let mut out = String::new();
    let _ = writeln!(out, "{header}");
    let _ = writeln!(out, "{}", "-".repeat(header.len()));
    for row in &report.rows {
        let _ = writeln!(
            out,
            "{:>3} | {:>8.2}% | {:>9.2}% | {:>14.3}%",
            row.sum,
            row.empirical * 100.0,
            row.analytical * 100.0,
            row.abs_difference * 100.0
        );
    }
    let _ = writeln!(
        out,
        "max |diff| = {:.3}%  mean |diff| = {:.3}%  chi2 = {:.2} (dof {})",
        report.max_abs_difference * 100.0,
        report.mean_abs_difference * 100.0,
        report.chi_square,
        report.chi_square_dof
    );
    out
}

/// Horizontal bar chart of the empirical distribution.
pub fn render_histogram(report: &Report) -> String {
    let peak = report
        .rows
        .iter()
        .map(|r| r.empirical)
        .fold(0.0, f64::max);
    let mut out = String::new();
    for row in &report.rows {
        let len = if peak > 0.0 {
            (row.empirical / peak * HISTOGRAM_WIDTH as f64).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "{:>2} | {:<width$} {:>6.2}%",
            row.sum,
            "#".repeat(len),
            row.empirical * 100.0,
            width = HISTOGRAM_WIDTH
        );
    }
    out
}

/// Write the report as pretty JSON, creating parent directories.
pub fn save_report(report: &Report, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}
