//! Multiple-testing correction for families of p-values.
//!
//! Counterparts of R's `p.adjust`: Bonferroni and Holm control the
//! family-wise error rate, Benjamini-Hochberg controls the false discovery
//! rate. Each routine returns adjusted values in the input order.

use crate::error::{MhgError, Result};

/// Bonferroni correction: `p_adj = min(p * n, 1)`.
pub fn bonferroni(p_values: &[f64]) -> Result<Vec<f64>> {
    validate_p_values(p_values)?;
    let n = p_values.len() as f64;
    Ok(p_values.iter().map(|&p| (p * n).min(1.0)).collect())
}

/// Holm step-down correction.
///
/// Sorted ascending, the k-th smallest p-value is scaled by `n - k`
/// remaining hypotheses, with a running maximum keeping the adjusted
/// sequence monotone.
pub fn holm(p_values: &[f64]) -> Result<Vec<f64>> {
    validate_p_values(p_values)?;
    let n = p_values.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| p_values[a].total_cmp(&p_values[b]));

    let mut adjusted = vec![0.0; n];
    let mut running_max = 0.0f64;
    for (rank, &idx) in order.iter().enumerate() {
        let adj = (p_values[idx] * (n - rank) as f64).min(1.0);
        running_max = running_max.max(adj);
        adjusted[idx] = running_max;
    }
    Ok(adjusted)
}

/// Benjamini-Hochberg step-up correction (false discovery rate).
///
/// Sorted ascending, the k-th smallest p-value is scaled by `n / (k + 1)`,
/// with a running minimum applied from the largest rank downward.
pub fn benjamini_hochberg(p_values: &[f64]) -> Result<Vec<f64>> {
    validate_p_values(p_values)?;
    let n = p_values.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| p_values[a].total_cmp(&p_values[b]));

    let mut adjusted = vec![0.0; n];
    let mut running_min = 1.0f64;
    for rank in (0..n).rev() {
        let idx = order[rank];
        let adj = (p_values[idx] * n as f64 / (rank + 1) as f64).min(1.0);
        running_min = running_min.min(adj);
        adjusted[idx] = running_min;
    }
    Ok(adjusted)
}

fn validate_p_values(p_values: &[f64]) -> Result<()> {
    for (i, &p) in p_values.iter().enumerate() {
        if !(0.0..=1.0).contains(&p) {
            return Err(MhgError::InvalidInput(format!(
                "p-value at index {i} is outside [0, 1]: {p}"
            )));
        }
    }
    Ok(())
}
