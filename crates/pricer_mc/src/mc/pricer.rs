//! Monte Carlo pricing engine.
//!
//! The [`MonteCarloPricer`] coordinates:
//! 1. Parameter validation at the entry boundary
//! 2. Derivation of the terminal distribution (once per call)
//! 3. One Gaussian draw per path via [`PolarGaussian`]
//! 4. Barrier test, payoff and running aggregation
//! 5. Discounting of the mean and its standard error
//!
//! Paths are never stored; only running sums survive an iteration.

use tracing::debug;

use super::config::MonteCarloConfig;
use super::error::PricingError;
use super::params::UpAndInCallParams;
use super::payoff::is_knocked_in;
use super::terminal::TerminalDistribution;
use crate::rng::{PolarGaussian, PricerRng, UniformSource};

/// Monte Carlo pricing result.
///
/// # Examples
///
/// ```rust
/// use pricer_mc::mc::PricingResult;
///
/// let result = PricingResult {
///     price: 22.6,
///     std_error: 0.05,
///     n_paths: 100_000,
///     knocked_in: 74_000,
/// };
///
/// println!("Price: {} +/- {}", result.price, result.confidence_95());
/// assert_eq!(result.knock_in_ratio(), 0.74);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Present value of the option.
    pub price: f64,
    /// Standard error of the price estimate (zero for a single path).
    pub std_error: f64,
    /// Number of simulated paths.
    pub n_paths: usize,
    /// Number of paths whose terminal spot met the barrier.
    pub knocked_in: usize,
}

impl PricingResult {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }

    /// Fraction of paths that knocked in.
    #[inline]
    pub fn knock_in_ratio(&self) -> f64 {
        if self.n_paths == 0 {
            0.0
        } else {
            self.knocked_in as f64 / self.n_paths as f64
        }
    }
}

/// Monte Carlo engine for up-and-in barrier calls observed at expiry.
///
/// The pricer owns its Gaussian sampler and therefore its random stream.
/// Consecutive pricing calls continue the stream; use
/// [`reset`](MonteCarloPricer::reset) to replay it for paired runs.
///
/// # Examples
///
/// ```rust
/// use pricer_mc::mc::{MonteCarloConfig, MonteCarloPricer, UpAndInCallParams};
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(20_000)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let mut pricer = MonteCarloPricer::new(config).unwrap();
/// let params = UpAndInCallParams::default();
///
/// let base = pricer.price_up_and_in_call(&params).unwrap();
///
/// // Common random numbers: replay the same draws with a bumped spot
/// pricer.reset();
/// let bumped = pricer.price_up_and_in_call(&params.with_spot(121.0)).unwrap();
///
/// assert!(bumped.price >= base.price);
/// ```
pub struct MonteCarloPricer<U = PricerRng> {
    config: MonteCarloConfig,
    sampler: PolarGaussian<U>,
}

impl MonteCarloPricer<PricerRng> {
    /// Creates a new pricer with the given configuration.
    ///
    /// The generator is seeded from `config.seed()` when present, otherwise
    /// from the operating system's entropy source.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError`] if the configuration is invalid.
    pub fn new(config: MonteCarloConfig) -> Result<Self, PricingError> {
        let rng = match config.seed() {
            Some(seed) => PricerRng::from_seed(seed),
            None => PricerRng::from_entropy(),
        };
        Self::with_source(config, rng)
    }

    /// Creates a new pricer with a specific seed, overriding the config seed.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError`] if the configuration is invalid.
    pub fn with_seed(config: MonteCarloConfig, seed: u64) -> Result<Self, PricingError> {
        Self::with_source(config, PricerRng::from_seed(seed))
    }

    /// Restarts the random stream.
    ///
    /// A seeded stream replays from its beginning; an entropy-seeded one is
    /// replaced by a fresh entropy-seeded stream.
    pub fn reset(&mut self) {
        let rng = match self.seed() {
            Some(seed) => PricerRng::from_seed(seed),
            None => PricerRng::from_entropy(),
        };
        self.sampler = PolarGaussian::new(rng);
    }

    /// Restarts the random stream with a new seed.
    pub fn reset_with_seed(&mut self, seed: u64) {
        self.sampler = PolarGaussian::new(PricerRng::from_seed(seed));
    }
}

impl<U: UniformSource> MonteCarloPricer<U> {
    /// Creates a new pricer drawing from the given uniform source.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError`] if the configuration is invalid.
    pub fn with_source(config: MonteCarloConfig, source: U) -> Result<Self, PricingError> {
        config.validate()?;

        Ok(Self {
            config,
            sampler: PolarGaussian::new(source),
        })
    }

    /// Returns a reference to the configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Returns the seed of the active stream.
    ///
    /// Follows [`with_seed`](MonteCarloPricer::with_seed) and
    /// [`reset_with_seed`](MonteCarloPricer::reset_with_seed) rather than the
    /// configured seed. `None` for entropy-seeded or injected sources.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.sampler.source().seed()
    }

    /// Returns a mutable reference to the Gaussian sampler.
    #[inline]
    pub fn sampler_mut(&mut self) -> &mut PolarGaussian<U> {
        &mut self.sampler
    }

    /// Prices an up-and-in call whose barrier is checked at expiry only.
    ///
    /// # Algorithm
    ///
    /// ```text
    /// for each path:
    ///     S_T = moved_spot · exp(root_variance · Z)
    ///     payoff = max(S_T − K, 0) if S_T >= B else 0
    /// price = mean(payoff) · exp(−r·T)
    /// ```
    ///
    /// # Errors
    ///
    /// - [`PricingError::InvalidParameter`] if `params` fails validation
    /// - [`PricingError::NumericFault`] if a terminal spot or the result is
    ///   not finite
    pub fn price_up_and_in_call(
        &mut self,
        params: &UpAndInCallParams,
    ) -> Result<PricingResult, PricingError> {
        params.validate()?;

        let n_paths = self.config.n_paths();
        let dist = TerminalDistribution::from(params);

        debug!(
            n_paths,
            seed = ?self.seed(),
            moved_spot = dist.moved_spot,
            root_variance = dist.root_variance,
            "Starting up-and-in call simulation"
        );

        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        let mut knocked_in = 0usize;

        for path in 0..n_paths {
            let gaussian = self.sampler.sample();
            let terminal = dist.terminal_spot(gaussian);

            if !terminal.is_finite() {
                return Err(PricingError::NumericFault(format!(
                    "terminal spot {} on path {} (draw {})",
                    terminal, path, gaussian
                )));
            }

            if is_knocked_in(terminal, params.barrier) {
                knocked_in += 1;
                let payoff = (terminal - params.strike).max(0.0);
                sum += payoff;
                sum_sq += payoff * payoff;
            }
        }

        let n = n_paths as f64;
        let mean = sum / n;
        let std_error = if n_paths > 1 {
            let variance = ((sum_sq - n * mean * mean) / (n - 1.0)).max(0.0);
            (variance / n).sqrt()
        } else {
            0.0
        };

        let discount_factor = params.discount_factor();
        let result = PricingResult {
            price: mean * discount_factor,
            std_error: std_error * discount_factor,
            n_paths,
            knocked_in,
        };

        if !result.price.is_finite() || !result.std_error.is_finite() {
            return Err(PricingError::NumericFault(format!(
                "non-finite estimate: price {}, std error {}",
                result.price, result.std_error
            )));
        }

        debug!(
            price = result.price,
            std_error = result.std_error,
            knocked_in,
            "Finished up-and-in call simulation"
        );

        Ok(result)
    }
}

/// Prices an up-and-in call from seven scalars with an entropy-seeded stream.
///
/// # Errors
///
/// Returns [`PricingError`] on invalid inputs or a non-finite result.
pub fn price(
    expiry: f64,
    strike: f64,
    spot: f64,
    volatility: f64,
    rate: f64,
    barrier: f64,
    n_paths: usize,
) -> Result<f64, PricingError> {
    let config = MonteCarloConfig::builder().n_paths(n_paths).build()?;
    let params = UpAndInCallParams::new(expiry, strike, spot, volatility, rate, barrier);
    Ok(MonteCarloPricer::new(config)?
        .price_up_and_in_call(&params)?
        .price)
}

/// Seeded variant of [`price`]; identical inputs and seed give identical output.
///
/// # Errors
///
/// Returns [`PricingError`] on invalid inputs or a non-finite result.
#[allow(clippy::too_many_arguments)]
pub fn price_with_seed(
    expiry: f64,
    strike: f64,
    spot: f64,
    volatility: f64,
    rate: f64,
    barrier: f64,
    n_paths: usize,
    seed: u64,
) -> Result<f64, PricingError> {
    let config = MonteCarloConfig::builder()
        .n_paths(n_paths)
        .seed(seed)
        .build()?;
    let params = UpAndInCallParams::new(expiry, strike, spot, volatility, rate, barrier);
    Ok(MonteCarloPricer::new(config)?
        .price_up_and_in_call(&params)?
        .price)
}
