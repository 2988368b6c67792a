//! Hypergeometric point probabilities via log-gamma combinatorics.

use special::Gamma;

#[inline]
fn ln_gamma(x: f64) -> f64 {
    // Fully qualified to sidestep the unstable inherent f64::ln_gamma.
    Gamma::ln_gamma(x).0
}

/// Natural log of the binomial coefficient `C(n, k)`.
///
/// Computed as `lgamma(n+1) - lgamma(k+1) - lgamma(n-k+1)` so that values
/// stay finite for populations in the tens of thousands. The caller
/// guarantees `k <= n`.
pub fn ln_choose(n: u64, k: u64) -> f64 {
    debug_assert!(k <= n, "ln_choose: k={k} > n={n}");
    ln_gamma(n as f64 + 1.0) - ln_gamma(k as f64 + 1.0) - ln_gamma((n - k) as f64 + 1.0)
}

/// Probability of drawing exactly `i` successes in a sample of `n` taken
/// without replacement from a population of `n_total` items containing
/// `b_total` successes.
///
/// Combinations outside the distribution's support have probability zero and
/// return `0.0` rather than feeding an invalid `k` into [`ln_choose`]. This
/// covers `i < 0`, `i > n`, `i > b_total`, `n > n_total`,
/// `b_total > n_total` and `n - i > n_total - b_total`.
pub fn hypergeometric_pmf(i: i64, n: i64, b_total: i64, n_total: i64) -> f64 {
    if i < 0 || n < 0 || b_total < 0 || n_total < 0 {
        return 0.0;
    }
    if i > n || i > b_total || n > n_total || b_total > n_total {
        return 0.0;
    }
    if n - i > n_total - b_total {
        return 0.0;
    }
    (ln_choose(b_total as u64, i as u64)
        + ln_choose((n_total - b_total) as u64, (n - i) as u64)
        - ln_choose(n_total as u64, n as u64))
    .exp()
}
