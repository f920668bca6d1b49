//! Convergence command implementation
//!
//! Prices the same contract repeatedly at several path counts, each run on
//! its own seeded stream, and reports how the run-to-run spread shrinks.

use std::io::Write;

use pricer_mc::analytical::terminal_up_in_call;
use pricer_mc::mc::{MonteCarloConfig, MonteCarloPricer, UpAndInCallParams};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{CliConfig, OutputFormat};
use crate::{CliError, Result};

/// Statistics for one path count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvergenceRow {
    pub n_paths: usize,
    pub runs: usize,
    /// Mean of the run prices
    pub mean_price: f64,
    /// Sample standard deviation of the run prices
    pub std_dev: f64,
    /// Mean of the per-run standard errors
    pub mean_std_error: f64,
    pub min_price: f64,
    pub max_price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConvergenceReport {
    pub contract: UpAndInCallParams,
    pub base_seed: u64,
    pub analytical_price: f64,
    pub rows: Vec<ConvergenceRow>,
}

/// Run the convergence command
pub fn run(config: &CliConfig, path_counts: &[usize], runs: usize) -> Result<()> {
    let report = study(config, path_counts, runs)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render(&report, config.format, &mut out)?;

    info!("Convergence study complete");
    Ok(())
}

/// Run `runs` pricings per path count
///
/// Run `i` uses seed `base + i`, where `base` is the configured seed or 0.
pub fn study(config: &CliConfig, path_counts: &[usize], runs: usize) -> Result<ConvergenceReport> {
    if runs < 2 {
        return Err(CliError::invalid_argument(format!(
            "runs must be at least 2, got {}",
            runs
        )));
    }
    if path_counts.is_empty() {
        return Err(CliError::invalid_argument("at least one path count is required"));
    }
    if path_counts.contains(&0) {
        return Err(CliError::invalid_argument("path counts must be at least 1"));
    }

    let contract = config.contract;
    contract.validate()?;
    let base_seed = config.seed.unwrap_or(0);

    let rows = path_counts
        .iter()
        .map(|&n_paths| {
            info!(n_paths, runs, "Running convergence step");
            study_path_count(&contract, n_paths, runs, base_seed)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ConvergenceReport {
        contract,
        base_seed,
        analytical_price: terminal_up_in_call(
            contract.spot,
            contract.strike,
            contract.barrier,
            contract.rate,
            contract.volatility,
            contract.expiry,
        ),
        rows,
    })
}

fn study_path_count(
    contract: &UpAndInCallParams,
    n_paths: usize,
    runs: usize,
    base_seed: u64,
) -> Result<ConvergenceRow> {
    let config = MonteCarloConfig::builder().n_paths(n_paths).build()?;
    let mut pricer = MonteCarloPricer::with_seed(config, base_seed)?;

    let mut prices = Vec::with_capacity(runs);
    let mut std_error_sum = 0.0;
    for run in 0..runs {
        pricer.reset_with_seed(base_seed.wrapping_add(run as u64));
        let result = pricer.price_up_and_in_call(contract)?;
        debug!(n_paths, run, price = result.price, "Run finished");
        std_error_sum += result.std_error;
        prices.push(result.price);
    }

    let n = runs as f64;
    let mean_price = prices.iter().sum::<f64>() / n;
    let variance = prices.iter().map(|p| (p - mean_price).powi(2)).sum::<f64>() / (n - 1.0);

    Ok(ConvergenceRow {
        n_paths,
        runs,
        mean_price,
        std_dev: variance.sqrt(),
        mean_std_error: std_error_sum / n,
        min_price: prices.iter().copied().fold(f64::INFINITY, f64::min),
        max_price: prices.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    })
}

/// Write the report in the requested format
pub fn render<W: Write>(
    report: &ConvergenceReport,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            writeln!(
                out,
                "Closed form {:.6}, base seed {}",
                report.analytical_price, report.base_seed
            )?;
            writeln!(
                out,
                "{:>12} {:>6} {:>12} {:>12} {:>12} {:>12} {:>12}",
                "paths", "runs", "mean", "std dev", "mean s.e.", "min", "max"
            )?;
            for row in &report.rows {
                writeln!(
                    out,
                    "{:>12} {:>6} {:>12.6} {:>12.6} {:>12.6} {:>12.6} {:>12.6}",
                    row.n_paths,
                    row.runs,
                    row.mean_price,
                    row.std_dev,
                    row.mean_std_error,
                    row.min_price,
                    row.max_price
                )?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: Option<u64>) -> CliConfig {
        CliConfig {
            seed,
            ..Default::default()
        }
    }

    #[test]
    fn test_spread_shrinks() {
        let report = study(&config(Some(3)), &[1_000, 100_000], 10).unwrap();

        assert_eq!(report.rows.len(), 2);
        let (small, large) = (&report.rows[0], &report.rows[1]);
        assert_eq!(small.n_paths, 1_000);
        assert_eq!(large.runs, 10);
        assert!(large.std_dev < small.std_dev);
        assert!(large.mean_std_error < small.mean_std_error);
        assert!(small.min_price <= small.mean_price && small.mean_price <= small.max_price);
        assert!((large.mean_price - report.analytical_price).abs() < 0.1);
    }

    #[test]
    fn test_study_is_reproducible() {
        let a = study(&config(Some(9)), &[500], 3).unwrap();
        let b = study(&config(Some(9)), &[500], 3).unwrap();
        assert_eq!(a.rows, b.rows);
        assert_eq!(a.base_seed, 9);
    }

    #[test]
    fn test_missing_seed_defaults_to_zero() {
        let report = study(&config(None), &[100], 2).unwrap();
        assert_eq!(report.base_seed, 0);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(matches!(
            study(&config(None), &[100], 1),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(matches!(
            study(&config(None), &[], 5),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(matches!(
            study(&config(None), &[100, 0], 5),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_render_table_and_json() {
        let report = study(&config(Some(1)), &[200, 400], 2).unwrap();

        let mut table = Vec::new();
        render(&report, OutputFormat::Table, &mut table).unwrap();
        let text = String::from_utf8(table).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("mean s.e."));

        let mut json = Vec::new();
        render(&report, OutputFormat::Json, &mut json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["rows"].as_array().map(|r| r.len()), Some(2));
        assert_eq!(value["rows"][1]["n_paths"], 400);
    }
}
