//! Pathway over-representation analysis of gene lists
//!
//! `pathway` answers the question: which reference pathways (named gene sets)
//! are over-represented in a list of genes, and which of those findings survive
//! a correction for testing many pathways at once?
//!
//! Every pathway is tested with the one-sided hypergeometric test and all
//! p-values of one request are corrected jointly with the Benjamini-Hochberg
//! step-up procedure.
//!
//! # Examples
//!
//! ```
//! use pathway::{Config, EnrichmentContext, GeneSet, MemoryStore};
//!
//! let mut store = MemoryStore::new();
//! store.add_pathway("MSigDB", "hallmark", GeneSet::from_genes("APOPTOSIS", ["CASP3", "CASP8", "BAX"])).unwrap();
//! store.add_pathway("MSigDB", "hallmark", GeneSet::from_genes("HYPOXIA", ["HIF1A", "VEGFA"])).unwrap();
//!
//! let context = EnrichmentContext::new(&Config::new(20_000), store).unwrap();
//!
//! let query = GeneSet::from_genes("my genes", ["BAX", "CASP3", "TP53"]);
//! let results = context.overlap(&query, &["hallmark"]).unwrap();
//!
//! assert_eq!(results.len(), 2);
//! let apoptosis = &results.tests()[0];
//! assert_eq!(apoptosis.pathway(), "APOPTOSIS");
//! assert_eq!(apoptosis.overlap_count(), 2);
//! assert_eq!(apoptosis.overlap_gene_list(), "BAX,CASP3");
//! assert!(apoptosis.qvalue() < 0.01);
//! ```
use core::fmt::Debug;
use std::num::ParseIntError;
use thiserror::Error;

pub mod config;
pub mod context;
pub mod geneset;
pub mod parser;
pub mod results;
pub mod stats;
pub mod store;
pub mod universe;

mod collection;
mod overlap;

pub use collection::{DatasetInfo, OrganizationInfo, PathwayCollection};
pub use config::Config;
pub use context::{ContextCell, EnrichmentContext};
pub use geneset::GeneSet;
pub use overlap::overlap;
pub use results::{OverlapResult, ResultSet};
pub use store::{MemoryStore, PathwayStore};
pub use universe::GeneUniverse;

const DEFAULT_NUM_PATHWAYS: usize = 100;
const DEFAULT_NUM_DATASETS: usize = 5;

/// Name of the optional universe membership file inside a data folder
const GENES_FILENAME: &str = "genes.txt";
/// File extension of pathway datasets inside a data folder
const GMT_EXTENSION: &str = "gmt";

/// Separator used for all gene lists rendered as strings
pub const GENE_SEPARATOR: &str = ",";

/// Error type of the `pathway` crate
#[derive(Error, Debug)]
pub enum PathwayError {
    /// The store cannot resolve one or more requested datasets
    #[error("dataset does not exist: {0}")]
    DataUnavailable(String),
    /// A test would be evaluated outside the hypergeometric domain
    #[error("invalid hypergeometric parameters: population {population}, successes {successes}, draws {draws}, observed {observed}")]
    NumericDegenerate {
        population: u64,
        successes: u64,
        draws: u64,
        observed: u64,
    },
    #[error("unable to open file {0}")]
    CannotOpenFile(String),
    #[error("invalid input data: {0}")]
    InvalidInput(String),
    #[error("unable to parse Integer")]
    ParseIntError,
}

impl From<ParseIntError> for PathwayError {
    fn from(_: ParseIntError) -> Self {
        PathwayError::ParseIntError
    }
}

/// Shortcut for `Result<T, PathwayError>`
pub type PathwayResult<T> = Result<T, PathwayError>;
