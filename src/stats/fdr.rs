//! False discovery rate correction
//!
//! All pathways of one request are tested independently. The more pathways
//! are tested, the more likely it is that some of them appear significant
//! by chance alone. The Benjamini-Hochberg step-up procedure adjusts the
//! p-values to q-values that control the false discovery rate.

use crate::stats::f64_from_usize;

/// Adjusts p-values with the Benjamini-Hochberg step-up procedure
///
/// The returned q-values are in the same order as `pvalues`.
///
/// 1. The p-values are ranked in ascending order (ties keep their original order)
/// 2. For rank `r` of `m`, the raw q-value is `p * m / r`
/// 3. Walking from the smallest to the largest p-value, every q-value is
///    at least as large as the previous one and at most `1.0`
///
/// # Examples
///
/// ```
/// use pathway::stats::benjamini_hochberg;
///
/// let qvalues = benjamini_hochberg(&[0.001, 0.02]);
/// assert!((qvalues[0] - 0.002).abs() < 1e-12);
/// assert!((qvalues[1] - 0.02).abs() < 1e-12);
///
/// assert!(benjamini_hochberg(&[]).is_empty());
/// ```
pub fn benjamini_hochberg(pvalues: &[f64]) -> Vec<f64> {
    let mut qvalues = vec![0.0; pvalues.len()];
    if pvalues.is_empty() {
        return qvalues;
    }

    let m = f64_from_usize(pvalues.len());

    let mut ranked: Vec<usize> = (0..pvalues.len()).collect();
    // `sort_by` is stable, so ties keep the original index order
    ranked.sort_by(|a, b| pvalues[*a].total_cmp(&pvalues[*b]));

    let mut previous = 0.0f64;
    for (rank, idx) in ranked.into_iter().enumerate() {
        let raw = pvalues[idx] * m / f64_from_usize(rank + 1);
        let adjusted = raw.max(previous).min(1.0);
        qvalues[idx] = adjusted;
        previous = adjusted;
    }
    qvalues
}
