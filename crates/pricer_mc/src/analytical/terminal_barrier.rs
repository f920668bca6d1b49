//! Closed-form price of an up-and-in call with the barrier observed at expiry.
//!
//! # Mathematical Formula
//!
//! The payoff `(S_T − K)·1{S_T ≥ B}` pays exactly when `S_T ≥ K* = max(K, B)`,
//! so with lognormal `S_T`:
//!
//! ```text
//! d1 = [ln(S / K*) + (r + σ²/2)·T] / (σ·√T)
//! d2 = d1 − σ·√T
//!
//! C = S·N(d1) − K·exp(−rT)·N(d2)
//! ```
//!
//! When `B ≤ K` this is the vanilla Black–Scholes call. When `σ·√T = 0` the
//! terminal spot is the forward `F = S·exp(rT)` and the price is
//! `max(F − K, 0)·1{F ≥ B}·exp(−rT)`.

/// Detailed result of the closed-form computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerminalBarrierResult {
    /// Option price.
    pub price: f64,
    /// Effective strike `max(strike, barrier)` bounding the exercise region.
    pub effective_strike: f64,
    /// Risk-neutral probability that the terminal spot meets the barrier.
    pub knock_in_probability: f64,
    /// d1 parameter (infinite in the zero-variance limit)
    pub d1: f64,
    /// d2 parameter (infinite in the zero-variance limit)
    pub d2: f64,
}

/// Standard normal CDF approximation.
///
/// Uses the Abramowitz and Stegun approximation (7.1.26) of the error
/// function. Maximum absolute error: 7.5e-8.
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    if x < -8.0 {
        return 0.0;
    }
    if x > 8.0 {
        return 1.0;
    }

    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let z = x.abs() / std::f64::consts::SQRT_2;

    let t = 1.0 / (1.0 + P * z);
    let y = 1.0 - (((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t) * (-z * z).exp();

    0.5 * (1.0 + sign * y)
}

/// Price of an up-and-in call whose barrier is checked at expiry only.
pub fn terminal_up_in_call(
    spot: f64,
    strike: f64,
    barrier: f64,
    rate: f64,
    volatility: f64,
    expiry: f64,
) -> f64 {
    terminal_up_in_call_with_details(spot, strike, barrier, rate, volatility, expiry).price
}

/// Price of an up-and-in terminal-barrier call, with intermediate quantities.
pub fn terminal_up_in_call_with_details(
    spot: f64,
    strike: f64,
    barrier: f64,
    rate: f64,
    volatility: f64,
    expiry: f64,
) -> TerminalBarrierResult {
    let effective_strike = strike.max(barrier);
    let discount = (-rate * expiry).exp();
    let vol_sqrt_t = volatility * expiry.sqrt();

    if vol_sqrt_t <= 0.0 {
        let forward = spot * (rate * expiry).exp();
        let knocked_in = forward >= barrier;
        let (d1, d2) = if forward >= effective_strike {
            (f64::INFINITY, f64::INFINITY)
        } else {
            (f64::NEG_INFINITY, f64::NEG_INFINITY)
        };
        let price = if knocked_in {
            (forward - strike).max(0.0) * discount
        } else {
            0.0
        };

        return TerminalBarrierResult {
            price,
            effective_strike,
            knock_in_probability: if knocked_in { 1.0 } else { 0.0 },
            d1,
            d2,
        };
    }

    let drift = (rate + 0.5 * volatility * volatility) * expiry;
    let d1 = ((spot / effective_strike).ln() + drift) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;

    let price = spot * norm_cdf(d1) - strike * discount * norm_cdf(d2);

    let knock_in_probability = if barrier <= 0.0 {
        1.0
    } else {
        norm_cdf(((spot / barrier).ln() + drift) / vol_sqrt_t - vol_sqrt_t)
    };

    TerminalBarrierResult {
        price: price.max(0.0),
        effective_strike,
        knock_in_probability,
        d1,
        d2,
    }
}

/// Black–Scholes price of a European call on a non-dividend-paying asset.
pub fn european_call(spot: f64, strike: f64, rate: f64, volatility: f64, expiry: f64) -> f64 {
    terminal_up_in_call(spot, strike, f64::NEG_INFINITY, rate, volatility, expiry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(0.0), 0.5, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(1.0), 0.8413447461, epsilon = 1e-6);
        assert_relative_eq!(norm_cdf(-1.96), 0.0249978952, epsilon = 1e-6);
        assert_eq!(norm_cdf(-9.0), 0.0);
        assert_eq!(norm_cdf(9.0), 1.0);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        for &x in &[0.1, 0.5, 1.3, 2.7, 4.0] {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_european_call_reference_value() {
        // Hull, Options Futures and Other Derivatives: S=42, K=40, r=10%, σ=20%, T=0.5
        let price = european_call(42.0, 40.0, 0.1, 0.2, 0.5);
        assert_relative_eq!(price, 4.76, epsilon = 5e-3);
    }

    #[test]
    fn test_literal_scenario_value() {
        let price = terminal_up_in_call(120.0, 100.0, 110.0, 0.06, 0.2, 0.5);
        assert_relative_eq!(price, 22.605794556612977, epsilon = 1e-4);
    }

    #[test]
    fn test_barrier_below_strike_is_vanilla() {
        let vanilla = european_call(100.0, 105.0, 0.03, 0.25, 1.0);
        let barrier = terminal_up_in_call(100.0, 105.0, 95.0, 0.03, 0.25, 1.0);
        assert_relative_eq!(barrier, vanilla, epsilon = 1e-12);

        let at_strike = terminal_up_in_call(100.0, 105.0, 105.0, 0.03, 0.25, 1.0);
        assert_relative_eq!(at_strike, vanilla, epsilon = 1e-12);
    }

    #[test]
    fn test_barrier_above_strike_is_cheaper() {
        let vanilla = european_call(100.0, 100.0, 0.05, 0.2, 1.0);
        let low = terminal_up_in_call(100.0, 100.0, 110.0, 0.05, 0.2, 1.0);
        let high = terminal_up_in_call(100.0, 100.0, 130.0, 0.05, 0.2, 1.0);

        assert!(low < vanilla);
        assert!(high < low);
        assert!(high > 0.0);
    }

    #[test]
    fn test_unreachable_barrier_is_worthless() {
        let price = terminal_up_in_call(120.0, 100.0, 120_000.0, 0.06, 0.2, 0.5);
        assert!(price < 1e-10);
    }

    #[test]
    fn test_zero_volatility_limit() {
        let result = terminal_up_in_call_with_details(120.0, 100.0, 110.0, 0.06, 0.0, 0.5);
        let forward = 120.0 * 0.03_f64.exp();
        let expected = (forward - 100.0) * (-0.03_f64).exp();

        assert_relative_eq!(result.price, expected, epsilon = 1e-12);
        assert_eq!(result.knock_in_probability, 1.0);
        assert_eq!(result.effective_strike, 110.0);

        let missed = terminal_up_in_call_with_details(100.0, 90.0, 150.0, 0.06, 0.0, 0.5);
        assert_eq!(missed.price, 0.0);
        assert_eq!(missed.knock_in_probability, 0.0);
    }

    #[test]
    fn test_knock_in_probability() {
        let result = terminal_up_in_call_with_details(100.0, 90.0, 100.0, 0.0, 0.2, 1.0);
        // ln(S/B) = 0, d2 = -σ√T/2 = -0.1
        assert_relative_eq!(result.knock_in_probability, norm_cdf(-0.1), epsilon = 1e-12);

        let always = terminal_up_in_call_with_details(100.0, 90.0, -1.0, 0.0, 0.2, 1.0);
        assert_eq!(always.knock_in_probability, 1.0);
    }
}
