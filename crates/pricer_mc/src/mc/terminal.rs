//! Risk-neutral terminal price distribution under GBM.
//!
//! Under the risk-neutral measure the terminal spot is lognormal:
//!
//! ```text
//! S_T = S_0 · exp((r − σ²/2)·T + σ·√T·Z),   Z ~ N(0, 1)
//! ```
//!
//! Everything except `Z` is fixed per pricing call, so the drift-adjusted
//! starting point ("moved spot") and the root variance are computed once and
//! shared by every path.

use super::params::UpAndInCallParams;

/// Constants of the terminal price distribution, derived once per pricing call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerminalDistribution {
    /// Total variance `σ²·T`.
    pub variance: f64,
    /// Standard deviation of log terminal spot, `√(σ²·T)`.
    pub root_variance: f64,
    /// Itô drift correction `−½·σ²·T`.
    pub ito_correction: f64,
    /// Drift-adjusted spot `S_0·exp(r·T − ½·σ²·T)`.
    pub moved_spot: f64,
}

impl TerminalDistribution {
    /// Derives the distribution constants from contract parameters.
    pub fn new(spot: f64, volatility: f64, rate: f64, expiry: f64) -> Self {
        let variance = volatility * volatility * expiry;
        let root_variance = variance.sqrt();
        let ito_correction = -0.5 * variance;
        let moved_spot = spot * (rate * expiry + ito_correction).exp();

        Self {
            variance,
            root_variance,
            ito_correction,
            moved_spot,
        }
    }

    /// Terminal spot for a standard normal draw.
    #[inline]
    pub fn terminal_spot(&self, gaussian: f64) -> f64 {
        self.moved_spot * (self.root_variance * gaussian).exp()
    }
}

impl From<&UpAndInCallParams> for TerminalDistribution {
    fn from(params: &UpAndInCallParams) -> Self {
        Self::new(params.spot, params.volatility, params.rate, params.expiry)
    }
}
