//! upin - Command line pricing of up-and-in barrier calls
//!
//! Operational entry point for the `pricer_mc` Monte Carlo engine.
//!
//! # Commands
//!
//! - `upin price` - Price one contract and compare with the closed form
//! - `upin convergence` - Study run-to-run spread against path count
//!
//! Settings are resolved from flags, then `UPIN_*` environment variables,
//! then `upin.toml`, then built-in defaults. Logs go to stderr so that
//! JSON output on stdout stays machine readable.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use config::{build_config, CliOverrides, ContractOverrides, LogLevel};
pub use error::{CliError, Result};

/// Up-and-in barrier call Monte Carlo pricer
#[derive(Parser)]
#[command(name = "upin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./upin.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Number of Monte Carlo paths
    #[arg(short = 'n', long, global = true)]
    paths: Option<usize>,

    /// Seed for reproducible runs
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Output format (table, json)
    #[arg(short, long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Contract and market inputs shared by all commands
#[derive(Args, Debug, Clone, Copy, Default)]
struct ContractArgs {
    /// Time to expiry in years
    #[arg(long)]
    expiry: Option<f64>,

    /// Strike price
    #[arg(long)]
    strike: Option<f64>,

    /// Spot price
    #[arg(long)]
    spot: Option<f64>,

    /// Annualised volatility
    #[arg(long = "vol")]
    volatility: Option<f64>,

    /// Continuously compounded risk-free rate
    #[arg(long, allow_negative_numbers = true)]
    rate: Option<f64>,

    /// Barrier level observed at expiry
    #[arg(long, allow_negative_numbers = true)]
    barrier: Option<f64>,
}

impl From<ContractArgs> for ContractOverrides {
    fn from(args: ContractArgs) -> Self {
        Self {
            expiry: args.expiry,
            strike: args.strike,
            spot: args.spot,
            volatility: args.volatility,
            rate: args.rate,
            barrier: args.barrier,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Price an up-and-in call
    Price {
        #[command(flatten)]
        contract: ContractArgs,
    },

    /// Repeat pricing at several path counts and report the spread
    Convergence {
        #[command(flatten)]
        contract: ContractArgs,

        /// Comma separated path counts
        #[arg(
            long,
            value_delimiter = ',',
            default_value = "1000,100000,10000000"
        )]
        path_counts: Vec<usize>,

        /// Independent runs per path count
        #[arg(short, long, default_value_t = 10)]
        runs: usize,
    },
}

impl Commands {
    fn contract(&self) -> ContractArgs {
        match self {
            Commands::Price { contract } => *contract,
            Commands::Convergence { contract, .. } => *contract,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        config_file: cli.config.clone(),
        verbose: cli.verbose,
        log_level: cli.log_level.clone(),
        format: cli.format.clone(),
        paths: cli.paths,
        seed: cli.seed,
        contract: cli.command.contract().into(),
    };
    let config = build_config(&overrides)?;

    init_tracing(config.log_level);
    info!("upin v{}", env!("CARGO_PKG_VERSION"));
    debug!(?config, "Resolved configuration");

    match cli.command {
        Commands::Price { .. } => commands::price::run(&config),
        Commands::Convergence {
            path_counts, runs, ..
        } => commands::convergence::run(&config, &path_counts, runs),
    }
}

/// Initialise tracing subscriber
///
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
