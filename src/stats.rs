//! Statistical tests for pathway enrichment
//!
//! This module contains the one-sided hypergeometric test that is used
//! to calculate the significance of the overlap between a gene list and a
//! pathway, and the Benjamini-Hochberg correction that is applied to all
//! p-values of one request.
//!
//! At the moment, `pathway` provides only the hypergeometric over-representation
//! test using the survival function. It does not provide two-sided or
//! permutation based tests.

pub mod fdr;
pub mod hypergeom;

pub use fdr::benjamini_hochberg;
pub use hypergeom::upper_tail;

/// Converts counts to `f64` for ratios and FDR ranks
///
/// Gene counts never come close to 2^52, so the conversion is lossless
#[allow(clippy::cast_precision_loss)]
pub(crate) fn f64_from_usize(n: usize) -> f64 {
    n as f64
}
