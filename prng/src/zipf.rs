//! Zipf-distributed draws over a virtual set `{0, ..., n-1}`, using the
//! YCSB construction (cached zeta sums, closed-form inverse-CDF sampling).

use crate::stream::StreamRng;

/// Cached parameters for repeated Zipf draws over the same `(n, theta)`.
///
/// Recomputing `zeta(n, theta)` is an O(n) sum; callers that draw many times
/// from the same distribution should build one `ZipfParams` and reuse it,
/// mirroring the caching the original generator performs across calls.
#[derive(Clone, Copy, Debug)]
pub struct ZipfParams {
    n: u64,
    theta: f64,
    zeta_n: f64,
    zeta_2: f64,
    eta: f64,
    alpha: f64,
}

fn zeta(n: u64, theta: f64) -> f64 {
    (0..n).map(|i| 1.0 / (i as f64 + 1.0).powf(theta)).sum()
}

impl ZipfParams {
    /// Build the cached parameters for a Zipf distribution over `n` items
    /// with skew `theta` (`0 < theta < 1`).
    pub fn new(n: u64, theta: f64) -> Self {
        let zeta_n = zeta(n, theta);
        let zeta_2 = zeta(2.min(n).max(1), theta);
        let eta = (1.0 - (2.0 / n as f64).powf(1.0 - theta)) / (1.0 - zeta_2 / zeta_n);
        let alpha = 1.0 / (1.0 - theta);
        ZipfParams {
            n,
            theta,
            zeta_n,
            zeta_2,
            eta,
            alpha,
        }
    }

    /// Rebuild only if `(n, theta)` differ from the cached parameters,
    /// otherwise return `self` unchanged (the cache-reuse behavior this type
    /// exists for).
    pub fn refresh(self, n: u64, theta: f64) -> Self {
        if self.n == n && self.theta == theta {
            self
        } else {
            Self::new(n, theta)
        }
    }

    /// Draw one Zipf-distributed index in `[0, n)` using `rng`.
    pub fn draw(&self, rng: &mut StreamRng) -> u64 {
        let u = rng.generate_double();
        if u * self.zeta_n < 1.0 {
            return 0;
        }
        if u * self.zeta_n < 1.0 + 2f64.powf(-self.theta) {
            return 1;
        }
        let idx = (self.n as f64) * (self.eta * u - self.eta + 1.0).powf(self.alpha);
        (idx as u64).min(self.n.saturating_sub(1))
    }
}
