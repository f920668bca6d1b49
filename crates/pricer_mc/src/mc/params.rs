//! Contract and market parameters for the up-and-in barrier call.

use super::error::PricingError;

/// Parameters of an up-and-in barrier call under Black–Scholes dynamics.
///
/// The barrier is observed at expiry only: the call is live when the
/// terminal spot is at or above `barrier`.
///
/// [`Default`] reproduces the standard desk example: six months to expiry,
/// strike 100, spot 120, 20% volatility, 6% rate, barrier 110.
///
/// # Examples
///
/// ```rust
/// use pricer_mc::mc::UpAndInCallParams;
///
/// let params = UpAndInCallParams::default().with_spot(125.0);
/// assert_eq!(params.spot, 125.0);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UpAndInCallParams {
    /// Time to expiry in years.
    pub expiry: f64,
    /// Strike price.
    pub strike: f64,
    /// Spot price of the underlying.
    pub spot: f64,
    /// Annualised volatility.
    pub volatility: f64,
    /// Continuously compounded risk-free rate.
    pub rate: f64,
    /// Barrier level compared against the terminal spot.
    pub barrier: f64,
}

impl Default for UpAndInCallParams {
    fn default() -> Self {
        Self {
            expiry: 0.5,
            strike: 100.0,
            spot: 120.0,
            volatility: 0.2,
            rate: 0.06,
            barrier: 110.0,
        }
    }
}

impl UpAndInCallParams {
    /// Creates parameters from the six contract and market scalars.
    #[inline]
    pub fn new(
        expiry: f64,
        strike: f64,
        spot: f64,
        volatility: f64,
        rate: f64,
        barrier: f64,
    ) -> Self {
        Self {
            expiry,
            strike,
            spot,
            volatility,
            rate,
            barrier,
        }
    }

    /// Returns a copy with a different spot.
    #[inline]
    pub fn with_spot(self, spot: f64) -> Self {
        Self { spot, ..self }
    }

    /// Returns a copy with a different strike.
    #[inline]
    pub fn with_strike(self, strike: f64) -> Self {
        Self { strike, ..self }
    }

    /// Returns a copy with a different volatility.
    #[inline]
    pub fn with_volatility(self, volatility: f64) -> Self {
        Self { volatility, ..self }
    }

    /// Returns a copy with a different barrier.
    #[inline]
    pub fn with_barrier(self, barrier: f64) -> Self {
        Self { barrier, ..self }
    }

    /// Discount factor `exp(-rate * expiry)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.expiry).exp()
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidParameter`] if:
    /// - `expiry`, `strike` or `spot` is not strictly positive and finite
    /// - `volatility` is negative or not finite
    /// - `rate` or `barrier` is not finite
    pub fn validate(&self) -> Result<(), PricingError> {
        positive("expiry", self.expiry)?;
        positive("strike", self.strike)?;
        positive("spot", self.spot)?;

        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(PricingError::invalid_parameter(
                "volatility",
                format!("must be non-negative and finite, got {}", self.volatility),
            ));
        }

        finite("rate", self.rate)?;
        finite("barrier", self.barrier)?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::invalid_parameter(
            name,
            format!("must be positive and finite, got {}", value),
        ))
    }
}

fn finite(name: &'static str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid_parameter(
            name,
            format!("must be finite, got {}", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_params() {
        let params = UpAndInCallParams::default();
        assert_eq!(params.expiry, 0.5);
        assert_eq!(params.strike, 100.0);
        assert_eq!(params.spot, 120.0);
        assert_eq!(params.volatility, 0.2);
        assert_eq!(params.rate, 0.06);
        assert_eq!(params.barrier, 110.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_discount_factor() {
        let params = UpAndInCallParams::default();
        assert_relative_eq!(params.discount_factor(), (-0.03_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_zero_volatility_is_valid() {
        assert!(UpAndInCallParams::default()
            .with_volatility(0.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_negative_rate_and_barrier_are_valid() {
        let params = UpAndInCallParams {
            rate: -0.01,
            barrier: -5.0,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_negative_volatility_rejected() {
        let result = UpAndInCallParams::default()
            .with_volatility(-0.2)
            .validate();

        assert!(matches!(
            result,
            Err(PricingError::InvalidParameter {
                name: "volatility",
                ..
            })
        ));
    }

    #[test]
    fn test_non_positive_inputs_rejected() {
        let cases = [
            ("expiry", UpAndInCallParams { expiry: 0.0, ..Default::default() }),
            ("strike", UpAndInCallParams::default().with_strike(-1.0)),
            ("spot", UpAndInCallParams::default().with_spot(0.0)),
        ];

        for (expected, params) in cases {
            match params.validate() {
                Err(PricingError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("expected {} to be rejected, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        assert!(UpAndInCallParams::default().with_spot(f64::NAN).validate().is_err());
        assert!(UpAndInCallParams::default()
            .with_barrier(f64::INFINITY)
            .validate()
            .is_err());
        assert!(UpAndInCallParams {
            rate: f64::NEG_INFINITY,
            ..Default::default()
        }
        .validate()
        .is_err());
        assert!(UpAndInCallParams::default()
            .with_volatility(f64::NAN)
            .validate()
            .is_err());
    }
}
