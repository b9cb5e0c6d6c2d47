use tracing::debug;

use crate::collection::PathwayCollection;
use crate::geneset::GeneSet;
use crate::results::{OverlapResult, ResultSet};
use crate::stats::{benjamini_hochberg, f64_from_usize, upper_tail};
use crate::universe::GeneUniverse;
use crate::{PathwayError, PathwayResult};

/// Tests the enrichment of the `query` genes in every pathway of `collections`
///
/// Query genes that are not part of the `universe` are dropped. The remaining,
/// valid, genes are tested against each pathway with the one-sided
/// hypergeometric test. The p-values of all pathways are then adjusted
/// together with the Benjamini-Hochberg procedure.
///
/// The tests of the returned [`ResultSet`] are ordered by dataset (in the order of
/// `collections`) and then by the order of the pathways in each dataset.
///
/// This method does not modify any of its inputs and can be called concurrently.
///
/// # Errors
///
/// [`PathwayError::NumericDegenerate`] if the query or any pathway contains
/// more genes than the universe.
///
/// # Examples
///
/// ```
/// use pathway::{overlap, GeneSet, GeneUniverse, PathwayCollection};
///
/// let universe = GeneUniverse::new(20_000).unwrap();
///
/// let mut collection = PathwayCollection::new("MSigDB", "hallmark");
/// collection.insert(GeneSet::from_genes("APOPTOSIS", ["CASP3", "CASP8", "BAX"]));
/// collection.insert(GeneSet::from_genes("HYPOXIA", ["HIF1A", "VEGFA"]));
///
/// let query = GeneSet::from_genes("query", ["BAX", "TP53"]);
/// let results = overlap(&universe, &query, &[collection]).unwrap();
///
/// assert_eq!(results.len(), 2);
/// assert_eq!(results.tests()[0].overlap_gene_list(), "BAX");
/// assert_eq!(results.tests()[1].pvalue(), 1.0);
/// ```
pub fn overlap(
    universe: &GeneUniverse,
    query: &GeneSet,
    collections: &[PathwayCollection],
) -> PathwayResult<ResultSet> {
    let population = universe.size();
    let valid_genes = universe.filter(query);
    let draws = u64_from_usize(valid_genes.len());

    if draws > population {
        return Err(PathwayError::NumericDegenerate {
            population,
            successes: 0,
            draws,
            observed: 0,
        });
    }

    let n_tests = collections.iter().map(PathwayCollection::len).sum();
    let mut tests = Vec::with_capacity(n_tests);

    for (dataset_index, collection) in collections.iter().enumerate() {
        for pathway in collection {
            tests.push(test_pathway(
                population,
                &valid_genes,
                dataset_index,
                collection.name(),
                pathway,
            )?);
        }
    }

    let pvalues: Vec<f64> = tests.iter().map(OverlapResult::pvalue).collect();
    for (test, qvalue) in tests.iter_mut().zip(benjamini_hochberg(&pvalues)) {
        test.set_qvalue(qvalue);
    }

    debug!(
        "Tested {} genes ({} valid) against {} pathways in {} datasets",
        query.len(),
        valid_genes.len(),
        tests.len(),
        collections.len()
    );

    Ok(ResultSet::new(
        query.name(),
        valid_genes.to_sorted_list(),
        population,
        collections
            .iter()
            .map(|collection| collection.name().to_string())
            .collect(),
        tests,
    ))
}

/// Calculates the overlap statistics of a single pathway
fn test_pathway(
    population: u64,
    valid_genes: &GeneSet,
    dataset_index: usize,
    dataset: &str,
    pathway: &GeneSet,
) -> PathwayResult<OverlapResult> {
    let successes = u64_from_usize(pathway.len());
    if successes > population {
        return Err(PathwayError::NumericDegenerate {
            population,
            successes,
            draws: u64_from_usize(valid_genes.len()),
            observed: 0,
        });
    }

    let overlapping = valid_genes.intersect(pathway);

    let (ratio, pvalue) = if valid_genes.is_empty() {
        (0.0, 1.0)
    } else {
        (
            f64_from_usize(overlapping.len()) / f64_from_usize(valid_genes.len()),
            upper_tail(
                population,
                successes,
                u64_from_usize(valid_genes.len()),
                u64_from_usize(overlapping.len()),
            )?,
        )
    };

    Ok(OverlapResult::new(
        dataset_index,
        dataset,
        pathway.name(),
        pathway.len(),
        overlapping.to_sorted_list(),
        ratio,
        pvalue,
    ))
}

/// `usize` always fits into `u64` on all supported platforms
fn u64_from_usize(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}
