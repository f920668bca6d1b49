//! # Random Number Generation
//!
//! Random number facilities for the barrier pricer: a uniform source on the
//! symmetric interval (-1, 1) and the Box–Muller polar sampler built on it.
//!
//! ## Design
//!
//! - **Explicit ownership**: every generator is constructed by its caller and
//!   owned by the sampler that consumes it. There is no process-wide state,
//!   so two pricers never share a stream.
//! - **Reproducibility**: [`PricerRng::from_seed`] gives deterministic
//!   sequences; [`PricerRng::from_entropy`] seeds from the operating system.
//! - **Injectable**: [`PolarGaussian`] is generic over [`UniformSource`], so
//!   tests can drive it with scripted values.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_mc::rng::{PolarGaussian, PricerRng};
//!
//! let mut sampler = PolarGaussian::new(PricerRng::from_seed(12345));
//! let z = sampler.sample();
//! assert!(z.is_finite());
//! ```

mod polar;
mod uniform;

pub use polar::{PolarGaussian, REJECTION_WARN_THRESHOLD};
pub use uniform::{PricerRng, UniformSource};
