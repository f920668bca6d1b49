//! Error types for the Monte Carlo pricing engine.
//!
//! Inputs are validated at the pricer's entry boundary; results that are not
//! finite are reported instead of being propagated silently.

use thiserror::Error;

/// Pricing error for the Monte Carlo engine.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum PricingError {
    /// Path count of zero.
    #[error("Invalid path count {0}: must be at least 1")]
    InvalidPathCount(usize),

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },

    /// The simulation produced a non-finite value.
    #[error("Numeric fault: {0}")]
    NumericFault(String),
}

impl PricingError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value: value.into(),
        }
    }
}
