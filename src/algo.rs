//! Exact p-value for the minimum hypergeometric (mHG) statistic.
//!
//! Given a population of `N` items containing `B` successes and an observed
//! minimum hypergeometric tail probability `min_hgt`, the engine computes
//! the probability that a uniformly random ordering of the population
//! produces a prefix (of length at most `max_size`) whose tail probability
//! is at least as extreme. The algorithm is the dynamic program of Eden et
//! al. (GOrilla, PMID 19192299): it tracks, per prefix length `n` and
//! success count `b`, the mass of orderings that have *not yet* crossed the
//! threshold, and returns the complement of the surviving mass.

use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use crate::dd::DoubleDouble;
use crate::error::{MhgError, Result};

/// Ceiling on `(B_+1) * (N_+1)` DP cells (a cell is 16 bytes). Keeps a
/// single call from allocating more than about a gigabyte.
pub const MAX_TABLE_CELLS: usize = 1 << 26;

/// Exact p-value for an observed mHG statistic.
///
/// `b_total` is the number of successes in the population, `n_total` the
/// population size, `max_size` the largest prefix length considered and
/// `min_hgt` the minimum hypergeometric tail probability observed by the
/// caller over those prefixes.
///
/// The result is computed and returned in extended precision; callers that
/// need a plain `f64` use [`DoubleDouble::to_f64`].
///
/// Threshold ties are inclusive: a prefix whose tail probability exactly
/// equals `min_hgt` counts as extreme, and the comparison is carried out
/// in extended precision. Since callers typically pass a `min_hgt` that is
/// itself an achieved tail value, such ties are the normal case, and this
/// policy decides deterministically which column they dominate.
///
/// # Errors
///
/// [`MhgError::InvalidInput`] unless `1 <= B <= N`, `max_size >= 1` and
/// `min_hgt` lies in `(0, 1]`; [`MhgError::TableTooLarge`] when the
/// truncated table would exceed [`MAX_TABLE_CELLS`].
pub fn mhg_pvalue(
    b_total: usize,
    n_total: usize,
    max_size: usize,
    min_hgt: f64,
) -> Result<DoubleDouble> {
    pvalue_inner(b_total, n_total, max_size, min_hgt, None)
}

/// Same as [`mhg_pvalue`], checking `cancel` at every column boundary.
///
/// The per-column loop is the only point where the table is in a
/// self-consistent state, so that is the sole preemption point. A raised
/// token surfaces as [`MhgError::Cancelled`].
pub fn mhg_pvalue_cancellable(
    b_total: usize,
    n_total: usize,
    max_size: usize,
    min_hgt: f64,
    cancel: &AtomicBool,
) -> Result<DoubleDouble> {
    pvalue_inner(b_total, n_total, max_size, min_hgt, Some(cancel))
}

fn pvalue_inner(
    b_total: usize,
    n_total: usize,
    max_size: usize,
    min_hgt: f64,
    cancel: Option<&AtomicBool>,
) -> Result<DoubleDouble> {
    if b_total == 0 || b_total > n_total {
        return Err(MhgError::InvalidInput(format!(
            "success count must satisfy 1 <= B <= N, got B={b_total} N={n_total}"
        )));
    }
    if max_size == 0 {
        return Err(MhgError::InvalidInput(
            "max_size must be at least 1".into(),
        ));
    }
    if !(min_hgt > 0.0 && min_hgt <= 1.0) {
        return Err(MhgError::InvalidInput(format!(
            "min_hgt must lie in (0, 1], got {min_hgt}"
        )));
    }

    let big_b = b_total as i64;
    let big_n = n_total as i64;
    let b_cap = big_b.min(max_size as i64);
    let n_cap = big_n.min(max_size as i64);

    let cells = (b_cap as usize + 1) * (n_cap as usize + 1);
    if cells > MAX_TABLE_CELLS {
        return Err(MhgError::TableTooLarge {
            cells,
            limit: MAX_TABLE_CELLS,
        });
    }

    debug!("mhg dp: B_={b_cap} N_={n_cap} min_hgt={min_hgt:e}");

    // m[b][n]: mass of length-n prefixes with b successes whose own minimum
    // tail probability still exceeds min_hgt. Row per success count, column
    // per prefix length, as in GOrilla.
    let mut m = vec![vec![DoubleDouble::ZERO; n_cap as usize + 1]; b_cap as usize + 1];
    m[0][0] = DoubleDouble::ONE;

    // Point probability at the all-successes boundary b = min(n, B),
    // maintained by ratio updates instead of log-gamma per step.
    let mut base_hg = DoubleDouble::ONE;

    for n in 1..=n_cap {
        if let Some(token) = cancel {
            if token.load(Ordering::Relaxed) {
                return Err(MhgError::Cancelled);
            }
        }

        let min_nb = if big_b >= n {
            base_hg = base_hg * (big_b - n + 1) as f64 / (big_n - n + 1) as f64;
            n
        } else {
            base_hg = base_hg * n as f64 / (n - big_b) as f64;
            big_b
        };

        let mut tail_hg = base_hg;
        let mut curr_hg = base_hg;
        let mut b = min_nb;

        // Truncation pass: walk b downward while the tail probability at
        // (b, n) is at or below the threshold. Those states are dominated;
        // any ordering reaching them has crossed the threshold already, so
        // their surviving mass is forced to zero.
        while tail_hg <= min_hgt && b > 0 {
            m[b as usize][n as usize] = DoubleDouble::ZERO;

            curr_hg = curr_hg * (b * (big_n - big_b - n + b)) as f64
                / ((n - b + 1) * (big_b - b + 1)) as f64;
            tail_hg = tail_hg + curr_hg;
            b -= 1;
        }

        // Recurrence pass: b is now the largest success count whose tail
        // still exceeds min_hgt. Each surviving cell receives mass from the
        // two length-(n-1) states that can step into it. Cells spuriously
        // above 1 are treated as contaminated and excluded.
        while b > 0 {
            let mut cell = DoubleDouble::ZERO;

            let stay = m[b as usize][n as usize - 1];
            if stay <= 1.0 {
                cell = cell + stay * (big_n - big_b - n + b + 1) as f64 / (big_n - n + 1) as f64;
            }

            let step = m[b as usize - 1][n as usize - 1];
            if step <= 1.0 {
                cell = cell + step * (big_b - b + 1) as f64 / (big_n - n + 1) as f64;
            }

            m[b as usize][n as usize] = cell;
            b -= 1;
        }

        // Boundary cleanup, matching GOrilla: re-zero the final b reached,
        // then extend the all-non-success path, which is never subject to
        // truncation.
        m[b as usize][n as usize] = DoubleDouble::ZERO;
        let row0 = m[0][n as usize - 1] * (big_n - big_b - n + 1) as f64 / (big_n - n + 1) as f64;
        m[0][n as usize] = m[0][n as usize] + row0;
    }

    let mut surviving = DoubleDouble::ZERO;
    for row in &m {
        surviving = surviving + row[n_cap as usize];
    }

    Ok(DoubleDouble::ONE - surviving)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiny_population_exact() {
        // B=1, N=2: of the two orderings, only (success, failure) reaches a
        // prefix tail probability of 1/2, so the p-value at min_hgt = 0.5
        // is exactly 1/2.
        let p = mhg_pvalue(1, 2, 2, 0.5).unwrap();
        assert!((p.to_f64() - 0.5).abs() < 1e-15, "p = {p}");
    }

    #[test]
    fn tiny_population_unreachable_threshold() {
        // The most extreme achievable tail is 1/2, so a stricter threshold
        // never triggers.
        let p = mhg_pvalue(1, 2, 2, 0.4).unwrap();
        assert!(p.to_f64().abs() < 1e-15, "p = {p}");
    }

    #[test]
    fn tie_threshold_truncates_inclusively() {
        // B=1, N=2: the length-1 success prefix has tail probability
        // exactly 1/2, representable in both f64 and the DP arithmetic.
        // At min_hgt = 0.5 the comparison ties and the state is dominated;
        // one ulp below, it survives and no ordering can trigger.
        let at_tie = mhg_pvalue(1, 2, 2, 0.5).unwrap().to_f64();
        assert_eq!(at_tie, 0.5);

        let below_tie = mhg_pvalue(1, 2, 2, 0.49999999999999994).unwrap().to_f64();
        assert_eq!(below_tie, 0.0);
    }

    #[test]
    fn rejects_invalid_arguments() {
        assert!(matches!(
            mhg_pvalue(0, 10, 10, 0.5),
            Err(MhgError::InvalidInput(_))
        ));
        assert!(matches!(
            mhg_pvalue(11, 10, 10, 0.5),
            Err(MhgError::InvalidInput(_))
        ));
        assert!(matches!(
            mhg_pvalue(5, 10, 0, 0.5),
            Err(MhgError::InvalidInput(_))
        ));
        assert!(matches!(
            mhg_pvalue(5, 10, 10, 0.0),
            Err(MhgError::InvalidInput(_))
        ));
        assert!(matches!(
            mhg_pvalue(5, 10, 10, 1.5),
            Err(MhgError::InvalidInput(_))
        ));
        assert!(matches!(
            mhg_pvalue(5, 10, 10, f64::NAN),
            Err(MhgError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_oversized_table() {
        assert!(matches!(
            mhg_pvalue(100_000, 200_000, 100_000, 1e-8),
            Err(MhgError::TableTooLarge { .. })
        ));
    }

    #[test]
    fn cancellation_at_column_boundary() {
        let cancel = AtomicBool::new(true);
        assert!(matches!(
            mhg_pvalue_cancellable(50, 184, 1000, 2.47088282429e-7, &cancel),
            Err(MhgError::Cancelled)
        ));

        let cancel = AtomicBool::new(false);
        assert!(mhg_pvalue_cancellable(50, 184, 1000, 2.47088282429e-7, &cancel).is_ok());
    }

    #[test]
    fn loosest_threshold_all_successes_is_certain() {
        // With B = N every prefix is all-success with tail probability 1,
        // so min_hgt = 1 is triggered by every ordering.
        let p = mhg_pvalue(3, 3, 3, 1.0).unwrap().to_f64();
        assert_eq!(p, 1.0);
    }

    #[test]
    fn loosest_threshold_stays_in_range() {
        // min_hgt = 1 dominates essentially every state; the p-value must
        // sit at the top of the unit interval.
        let p = mhg_pvalue(3, 10, 10, 1.0).unwrap().to_f64();
        assert!(p > 0.95 && p <= 1.0 + 1e-12, "p = {p}");
    }
}
