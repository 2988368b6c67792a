//! Fisher's exact test for 2x2 contingency tables.
//!
//! Given `b` observed successes in a sample of `n` items drawn without
//! replacement from a population of `n_total` items containing `b_total`
//! successes, [`fisher_exact_test`] sums the hypergeometric PMF over the
//! support of the distribution and reports the left, right and two-tailed
//! p-values.

use serde::{Deserialize, Serialize};

use crate::error::{MhgError, Result};
use crate::hypergeom::hypergeometric_pmf;

/// The three tail p-values of a Fisher exact test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FisherTails {
    /// P(X <= b): probability of at most the observed success count.
    pub left: f64,
    /// P(X >= b): probability of at least the observed success count.
    pub right: f64,
    /// Sum of all outcomes no more probable than the observed one.
    pub two_tailed: f64,
}

/// Fisher's exact test on the table implied by `(b, n, b_total, n_total)`.
///
/// When the support of the distribution is a single point every tail is 1.
///
/// # Errors
///
/// [`MhgError::InvalidInput`] if the table is malformed, i.e. unless
/// `b <= n <= n_total`, `b_total <= n_total` and `b <= b_total`.
pub fn fisher_exact_test(b: u64, n: u64, b_total: u64, n_total: u64) -> Result<FisherTails> {
    if !(b <= n && n <= n_total && b_total <= n_total && b <= b_total) {
        return Err(MhgError::InvalidInput(format!(
            "malformed contingency table: b={b} n={n} B={b_total} N={n_total}"
        )));
    }

    let um = n.min(b_total) as i64;
    let lm = (n as i64 + b_total as i64 - n_total as i64).max(0);
    if um == lm {
        return Ok(FisherTails {
            left: 1.0,
            right: 1.0,
            two_tailed: 1.0,
        });
    }

    let b = b as i64;
    let cutoff = hypergeometric_pmf(b, n as i64, b_total as i64, n_total as i64);

    let mut left = 0.0;
    let mut right = 0.0;
    let mut two_tailed = 0.0;
    for i in lm..=um {
        let p = hypergeometric_pmf(i, n as i64, b_total as i64, n_total as i64);
        if i <= b {
            left += p;
        }
        if i >= b {
            right += p;
        }
        if p <= cutoff {
            two_tailed += p;
        }
    }

    Ok(FisherTails {
        left: left.min(1.0),
        right: right.min(1.0),
        two_tailed: two_tailed.min(1.0),
    })
}
