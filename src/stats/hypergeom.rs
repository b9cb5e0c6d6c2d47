//! One-sided hypergeometric test
//!
//! The probability to observe at least `k` successes when drawing `n`
//! items without replacement from a population of size `N` that contains
//! `K` successes.
//!
//! The survival function of [`statrs`] sums the probability mass function
//! in log-space, so it does not overflow for populations of tens of thousands
//! of genes.
use statrs::distribution::{DiscreteCDF, Hypergeometric};
use tracing::trace;

use crate::{PathwayError, PathwayResult};

/// Calculates the p-value of observing `observed` or more successes
///
/// - `population`: Size of the gene universe (`N`)
/// - `successes`: Number of genes in the pathway (`K`)
/// - `draws`: Number of valid genes in the query (`n`)
/// - `observed`: Number of query genes in the pathway (`k`)
///
/// If nothing was observed or nothing was drawn, the p-value is exactly
/// `1.0` and the distribution is not evaluated.
///
/// # Errors
///
/// [`PathwayError::NumericDegenerate`] if `successes` or `draws` are larger
/// than `population` or if `observed` is larger than `successes` or `draws`.
///
/// # Examples
///
/// ```
/// use pathway::stats::upper_tail;
///
/// // 8 or more successes when drawing 13 from 50 with 25 successes
/// let pvalue = upper_tail(50, 25, 13, 8).unwrap();
/// assert!((pvalue - 0.26009737477738104).abs() < 1e-12);
///
/// assert_eq!(upper_tail(50, 25, 13, 0).unwrap(), 1.0);
/// assert!(upper_tail(50, 51, 13, 1).is_err());
/// ```
pub fn upper_tail(population: u64, successes: u64, draws: u64, observed: u64) -> PathwayResult<f64> {
    let degenerate = || PathwayError::NumericDegenerate {
        population,
        successes,
        draws,
        observed,
    };

    if successes > population || draws > population {
        return Err(degenerate());
    }
    if observed > successes.min(draws) {
        return Err(degenerate());
    }
    if observed == 0 || draws == 0 {
        return Ok(1.0);
    }

    let hyper = Hypergeometric::new(
        // Total number of genes in the universe
        // ==> population
        population,
        // Number of genes in the pathway
        // ==> successes
        successes,
        // Number of valid genes in the query
        // ==> draws
        draws,
    )
    .map_err(|_| degenerate())?;

    // subtracting 1, because we want to test including `observed`
    // e.g. "7 or more", but sf by default calculates "more than 7"
    let pvalue = hyper.sf(observed - 1);
    trace!(
        "Population: {}, Successes: {}, Draws: {}, Observed: {}, p: {}",
        population,
        successes,
        draws,
        observed,
        pvalue
    );

    if pvalue.is_nan() {
        return Err(degenerate());
    }
    Ok(pvalue.clamp(0.0, 1.0))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_values() {
        // Reference values calculated with exact rational arithmetic
        // 2 or more
        assert!((upper_tail(50, 25, 13, 2).unwrap() - 0.9996189832542278).abs() < 1e-12);
        // 4 or more
        assert!((upper_tail(50, 25, 13, 4).unwrap() - 0.9746644799047532).abs() < 1e-12);
        // 8 or more
        assert!((upper_tail(50, 25, 13, 8).unwrap() - 0.26009737477738104).abs() < 1e-12);
        // 13 or more
        assert!((upper_tail(50, 25, 13, 13).unwrap() - 1.4654490222006906e-05).abs() < 1e-12);
    }

    #[test]
    fn more_reference_values() {
        assert!((upper_tail(100, 10, 10, 1).unwrap() - 0.6695237889132748).abs() < 1e-12);
        assert!((upper_tail(100, 10, 10, 2).unwrap() - 0.26152846658398454).abs() < 1e-12);
        assert!((upper_tail(100, 10, 10, 3).unwrap() - 0.06001858177500578).abs() < 1e-12);
        assert!((upper_tail(20, 5, 4, 2).unwrap() - 0.24871001031991744).abs() < 1e-12);
    }

    #[test]
    fn large_universe() {
        // N = 42577, K = 200, n = 50, k = 10
        let expected = 3.637_118_285_847_417e-14;
        let pvalue = upper_tail(42577, 200, 50, 10).unwrap();
        assert!((pvalue - expected).abs() < 1e-9);
        assert!(((pvalue - expected) / expected).abs() < 1e-6);

        assert!((upper_tail(42577, 200, 50, 1).unwrap() - 0.2098700477821434).abs() < 1e-9);
        assert!((upper_tail(42577, 200, 50, 2).unwrap() - 0.0232016599022869).abs() < 1e-9);
    }

    #[test]
    fn nothing_observed() {
        assert!((upper_tail(42577, 200, 50, 0).unwrap() - 1.0).abs() < f64::EPSILON);
        assert_eq!(upper_tail(42577, 200, 50, 0).unwrap(), 1.0);
        assert_eq!(upper_tail(42577, 200, 0, 0).unwrap(), 1.0);
        assert_eq!(upper_tail(42577, 0, 50, 0).unwrap(), 1.0);
    }

    #[test]
    fn non_increasing_in_observed() {
        for (population, successes, draws) in [(42577, 200, 50), (100, 10, 10), (50, 25, 13)] {
            let mut previous = 1.0;
            for observed in 0..=successes.min(draws) {
                let pvalue = upper_tail(population, successes, draws, observed).unwrap();
                assert!(pvalue <= previous, "{observed}: {pvalue} > {previous}");
                assert!((0.0..=1.0).contains(&pvalue));
                previous = pvalue;
            }
        }
    }

    #[test]
    fn all_successes_drawn() {
        // drawing the whole population always observes all successes
        let pvalue = upper_tail(20, 5, 20, 5).unwrap();
        assert!((pvalue - 1.0).abs() < 1e-12);
    }

    #[test]
    fn invalid_parameters() {
        assert!(matches!(
            upper_tail(10, 11, 5, 1),
            Err(PathwayError::NumericDegenerate { .. })
        ));
        assert!(matches!(
            upper_tail(10, 5, 11, 1),
            Err(PathwayError::NumericDegenerate { .. })
        ));
        assert!(matches!(
            upper_tail(10, 3, 5, 4),
            Err(PathwayError::NumericDegenerate { .. })
        ));
    }
}
