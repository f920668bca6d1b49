//! # Up-and-In Barrier Call Pricer
//!
//! Monte Carlo valuation of a European call that only pays out when the
//! underlying finishes at or above a barrier level at expiry.
//!
//! ## Components
//!
//! - [`rng`]: uniform sources on (-1, 1) and the Box–Muller polar sampler
//! - [`mc`]: configuration, parameters, errors and the pricing engine
//! - [`analytical`]: closed-form reference price used for verification
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_mc::mc::{MonteCarloConfig, MonteCarloPricer, UpAndInCallParams};
//!
//! let config = MonteCarloConfig::builder()
//!     .n_paths(10_000)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let mut pricer = MonteCarloPricer::new(config).unwrap();
//! let result = pricer
//!     .price_up_and_in_call(&UpAndInCallParams::default())
//!     .unwrap();
//!
//! println!("Price: {:.4} +/- {:.4}", result.price, result.confidence_95());
//! ```
//!
//! The seven-scalar entry point is also available:
//!
//! ```rust
//! let price = pricer_mc::price(0.5, 100.0, 120.0, 0.2, 0.06, 110.0, 10_000).unwrap();
//! assert!(price > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod analytical;
pub mod mc;
pub mod rng;

// Re-export commonly used items for convenience
pub use mc::{
    price, price_with_seed, MonteCarloConfig, MonteCarloPricer, PricingError, PricingResult,
    UpAndInCallParams,
};
pub use rng::{PolarGaussian, PricerRng, UniformSource};
