//! Analytical (closed-form) solutions used to verify Monte Carlo prices.
//!
//! # Available Solutions
//!
//! - **Terminal-barrier up-and-in call**: barrier checked at expiry only,
//!   which reduces to a Black–Scholes call with a shifted exercise region
//! - **Black–Scholes European call**: the limit when the barrier is at or
//!   below the strike
//!
//! # Usage
//!
//! ```rust
//! use pricer_mc::analytical::{european_call, terminal_up_in_call};
//!
//! let barrier_price = terminal_up_in_call(
//!     120.0, // spot
//!     100.0, // strike
//!     110.0, // barrier
//!     0.06,  // rate
//!     0.2,   // volatility
//!     0.5,   // expiry
//! );
//! let vanilla = european_call(120.0, 100.0, 0.06, 0.2, 0.5);
//!
//! assert!(barrier_price < vanilla);
//! ```

pub mod terminal_barrier;

pub use terminal_barrier::{
    european_call, norm_cdf, terminal_up_in_call, terminal_up_in_call_with_details,
    TerminalBarrierResult,
};
