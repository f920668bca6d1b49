//! Price command implementation
//!
//! Prices one up-and-in call with the Monte Carlo engine and sets the
//! estimate against the closed-form terminal-barrier value.

use std::io::Write;

use pricer_mc::analytical::terminal_up_in_call_with_details;
use pricer_mc::mc::{MonteCarloConfig, MonteCarloPricer, PricingResult, UpAndInCallParams};
use serde::Serialize;
use tracing::info;

use crate::config::{CliConfig, OutputFormat};
use crate::Result;

/// Outcome of a single pricing run
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    pub contract: UpAndInCallParams,
    /// Seed of the random stream, absent when entropy-seeded
    pub seed: Option<u64>,
    pub result: PricingResult,
    pub confidence_95: f64,
    pub knock_in_ratio: f64,
    pub analytical_price: f64,
    pub knock_in_probability: f64,
}

impl PriceReport {
    /// Monte Carlo estimate minus closed form
    pub fn difference(&self) -> f64 {
        self.result.price - self.analytical_price
    }
}

/// Run the price command
pub fn run(config: &CliConfig) -> Result<()> {
    let report = price(config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render(&report, config.format, &mut out)?;

    info!("Pricing complete");
    Ok(())
}

/// Price the configured contract
pub fn price(config: &CliConfig) -> Result<PriceReport> {
    let contract = config.contract;
    info!(
        paths = config.paths,
        seed = ?config.seed,
        "Pricing up-and-in call: S={} K={} B={} T={} sigma={} r={}",
        contract.spot,
        contract.strike,
        contract.barrier,
        contract.expiry,
        contract.volatility,
        contract.rate
    );

    let mc_config = MonteCarloConfig::builder()
        .n_paths(config.paths)
        .maybe_seed(config.seed)
        .build()?;
    let mut pricer = MonteCarloPricer::new(mc_config)?;
    let result = pricer.price_up_and_in_call(&contract)?;

    let reference = terminal_up_in_call_with_details(
        contract.spot,
        contract.strike,
        contract.barrier,
        contract.rate,
        contract.volatility,
        contract.expiry,
    );

    Ok(PriceReport {
        contract,
        seed: pricer.seed(),
        confidence_95: result.confidence_95(),
        knock_in_ratio: result.knock_in_ratio(),
        analytical_price: reference.price,
        knock_in_probability: reference.knock_in_probability,
        result,
    })
}

/// Write the report in the requested format
pub fn render<W: Write>(report: &PriceReport, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            let c = &report.contract;
            let seed = report
                .seed
                .map_or_else(|| "entropy".to_string(), |s| s.to_string());

            writeln!(out, "Up-and-in call (barrier observed at expiry)")?;
            writeln!(out, "  Spot            {:>14.4}", c.spot)?;
            writeln!(out, "  Strike          {:>14.4}", c.strike)?;
            writeln!(out, "  Barrier         {:>14.4}", c.barrier)?;
            writeln!(out, "  Expiry (years)  {:>14.4}", c.expiry)?;
            writeln!(out, "  Volatility      {:>14.4}", c.volatility)?;
            writeln!(out, "  Rate            {:>14.4}", c.rate)?;
            writeln!(out)?;
            writeln!(out, "  Paths           {:>14}", report.result.n_paths)?;
            writeln!(out, "  Seed            {:>14}", seed)?;
            writeln!(out, "  Price           {:>14.6}", report.result.price)?;
            writeln!(out, "  Std error       {:>14.6}", report.result.std_error)?;
            writeln!(out, "  95% CI +/-      {:>14.6}", report.confidence_95)?;
            writeln!(out, "  Knock-in ratio  {:>14.4}", report.knock_in_ratio)?;
            writeln!(out)?;
            writeln!(out, "  Closed form     {:>14.6}", report.analytical_price)?;
            writeln!(out, "  P(S_T >= B)     {:>14.4}", report.knock_in_probability)?;
            writeln!(out, "  Difference      {:>14.6}", report.difference())?;
        }
    }
    Ok(())
}
