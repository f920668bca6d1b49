//! Monte Carlo pricing of terminal-monitored up-and-in barrier calls.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloPricer
//! ├── MonteCarloConfig      (path count, optional seed)
//! ├── PolarGaussian         (Box–Muller polar sampler)
//! │   └── UniformSource     (PricerRng by default)
//! └── price_up_and_in_call()
//!     ├── UpAndInCallParams::validate()
//!     ├── TerminalDistribution (moved spot, root variance)
//!     └── up-and-in payoff, running sums, discounting
//! ```
//!
//! # Barrier Monitoring
//!
//! The barrier is compared against the terminal spot only, inclusively
//! (`S_T >= B`). There is no intermediate monitoring.
//!
//! # Examples
//!
//! ```rust
//! use pricer_mc::mc::{MonteCarloConfig, MonteCarloPricer, UpAndInCallParams};
//!
//! let config = MonteCarloConfig::builder()
//!     .n_paths(50_000)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let mut pricer = MonteCarloPricer::new(config).unwrap();
//! let params = UpAndInCallParams {
//!     expiry: 1.0,
//!     strike: 100.0,
//!     spot: 100.0,
//!     volatility: 0.25,
//!     rate: 0.03,
//!     barrier: 115.0,
//! };
//!
//! let result = pricer.price_up_and_in_call(&params).unwrap();
//! println!("Price: {:.4} +/- {:.4}", result.price, result.std_error);
//! ```

pub mod config;
pub mod error;
pub mod params;
pub mod payoff;
pub mod pricer;
pub mod terminal;

// Re-exports for convenient access
pub use config::{MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_PATHS};
pub use error::PricingError;
pub use params::UpAndInCallParams;
pub use payoff::{is_knocked_in, up_and_in_call_payoff};
pub use pricer::{price, price_with_seed, MonteCarloPricer, PricingResult};
pub use terminal::TerminalDistribution;
