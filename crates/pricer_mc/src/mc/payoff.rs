//! Terminal payoff of the up-and-in call.

/// Returns true when the terminal spot activates the option.
///
/// The comparison is inclusive: a terminal spot exactly at the barrier
/// knocks the option in.
#[inline]
pub fn is_knocked_in(terminal_spot: f64, barrier: f64) -> bool {
    terminal_spot >= barrier
}

/// Undiscounted payoff of an up-and-in call observed at expiry.
///
/// `max(S_T − K, 0)` when `S_T >= barrier`, otherwise zero.
///
/// # Examples
///
/// ```rust
/// use pricer_mc::mc::up_and_in_call_payoff;
///
/// assert_eq!(up_and_in_call_payoff(115.0, 100.0, 110.0), 15.0);
/// assert_eq!(up_and_in_call_payoff(105.0, 100.0, 110.0), 0.0);
/// ```
#[inline]
pub fn up_and_in_call_payoff(terminal_spot: f64, strike: f64, barrier: f64) -> f64 {
    if is_knocked_in(terminal_spot, barrier) {
        (terminal_spot - strike).max(0.0)
    } else {
        0.0
    }
}
