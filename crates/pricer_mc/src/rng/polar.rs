//! Box–Muller polar (Marsaglia) standard normal sampler.

use super::uniform::{PricerRng, UniformSource};

/// Rejection count after which a single draw is reported as suspicious.
///
/// Only checked in debug builds. With a healthy source the acceptance
/// probability is π/4 per attempt, so reaching this count is effectively
/// impossible unless the source is broken.
pub const REJECTION_WARN_THRESHOLD: usize = 1000;

/// Standard normal sampler using the polar form of the Box–Muller transform.
///
/// Each call to [`sample`](Self::sample) draws pairs `(x, y)` from the owned
/// uniform source until `s = x² + y²` falls strictly inside the unit disc,
/// then returns `x·√(−2·ln(s)/s)`. The second variate of the pair is
/// discarded so each call consumes a fresh point.
///
/// The loop has no iteration cap; it terminates almost surely with an
/// expected 4/π ≈ 1.27 attempts.
///
/// `s = 0` has probability zero with a continuous source. Should it occur the
/// transform produces a non-finite value, which the pricer reports as a
/// numeric fault rather than being guarded on every draw.
///
/// # Examples
///
/// ```rust
/// use pricer_mc::rng::{PolarGaussian, PricerRng};
///
/// let mut sampler = PolarGaussian::new(PricerRng::from_seed(7));
/// let draws: Vec<f64> = (0..4).map(|_| sampler.sample()).collect();
/// assert!(draws.iter().all(|z| z.is_finite()));
/// ```
#[derive(Clone, Debug)]
pub struct PolarGaussian<U = PricerRng> {
    source: U,
}

impl<U: UniformSource> PolarGaussian<U> {
    /// Creates a sampler that owns the given uniform source.
    #[inline]
    pub fn new(source: U) -> Self {
        Self { source }
    }

    /// Draws one standard normal variate.
    pub fn sample(&mut self) -> f64 {
        let mut rejections = 0usize;
        loop {
            let x = self.source.next_uniform();
            let y = self.source.next_uniform();
            let size_squared = x * x + y * y;

            if size_squared < 1.0 {
                return x * (-2.0 * size_squared.ln() / size_squared).sqrt();
            }

            rejections += 1;
            if cfg!(debug_assertions) && rejections == REJECTION_WARN_THRESHOLD {
                tracing::warn!(
                    rejections,
                    "polar sampler rejected {} consecutive points; uniform source may be faulty",
                    REJECTION_WARN_THRESHOLD
                );
            }
        }
    }

    /// Returns a reference to the underlying uniform source.
    #[inline]
    pub fn source(&self) -> &U {
        &self.source
    }

    /// Returns a mutable reference to the underlying uniform source.
    #[inline]
    pub fn source_mut(&mut self) -> &mut U {
        &mut self.source
    }

    /// Consumes the sampler, returning the uniform source.
    #[inline]
    pub fn into_inner(self) -> U {
        self.source
    }
}
