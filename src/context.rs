//! The shared application context of all enrichment requests
use std::sync::{Mutex, OnceLock, PoisonError};

use tracing::{debug, info};

use crate::collection::{OrganizationInfo, PathwayCollection};
use crate::config::Config;
use crate::geneset::{GeneSet, Genes};
use crate::overlap::overlap;
use crate::results::ResultSet;
use crate::store::{MemoryStore, PathwayStore};
use crate::universe::GeneUniverse;
use crate::{PathwayError, PathwayResult};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// `EnrichmentContext` is the main interface of the `pathway` crate
///
/// It owns the [`GeneUniverse`] and the [`PathwayStore`] that provides
/// the pathway datasets. The context is built once, when the application
/// starts, and is then passed by reference to every request. It is never
/// modified after construction, so any number of requests can use it
/// concurrently.
///
/// # Request flow
///
/// ```mermaid
/// flowchart LR
///     Q[Query genes] --> F{GeneUniverse filter}
///     D[Dataset ids] --> L[PathwayStore::load]
///     F --> E[Hypergeometric test per pathway]
///     L --> E
///     E --> C[Benjamini-Hochberg]
///     C --> R[ResultSet]
/// ```
///
/// # Examples
///
/// ```
/// use pathway::{Config, EnrichmentContext, GeneSet, MemoryStore};
///
/// let config = Config::new(45_956);
/// let context = EnrichmentContext::new(&config, MemoryStore::from_folder("tests/data").unwrap()).unwrap();
///
/// let query = GeneSet::from_genes("query", ["BAX", "CASP3", "CASP8", "NOT_A_GENE"]);
/// let results = context.overlap(&query, &["hallmark"]).unwrap();
///
/// // the unknown gene is not tested
/// assert_eq!(results.valid_genes().len(), 3);
/// let best = results.sorted_by_pvalue()[0];
/// assert_eq!(best.pathway(), "HALLMARK_APOPTOSIS");
/// ```
#[derive(Debug)]
pub struct EnrichmentContext<S> {
    universe: GeneUniverse,
    store: S,
}

impl<S: PathwayStore> EnrichmentContext<S> {
    /// Builds the context from the configured universe size and the
    /// universe members provided by `store`
    ///
    /// # Errors
    ///
    /// - [`PathwayError::InvalidInput`]: The universe size is `0`
    /// - [`PathwayError::NumericDegenerate`]: The store knows more universe
    ///   members than the configured universe size
    /// - Any error of [`PathwayStore::universe_members`]
    pub fn new(config: &Config, store: S) -> PathwayResult<Self> {
        let members = store.universe_members()?;
        let universe = GeneUniverse::build(config.universe_size(), members)?;
        info!("Initialized enrichment context, universe size {}", universe.size());
        Ok(Self { universe, store })
    }

    /// Tests the enrichment of `query` in all pathways of the requested datasets
    ///
    /// The datasets are tested in the order of `dataset_ids`. An empty list
    /// of datasets returns an empty [`ResultSet`].
    ///
    /// # Errors
    ///
    /// - [`PathwayError::DataUnavailable`]: One of the datasets does not exist
    /// - [`PathwayError::NumericDegenerate`]: A pathway or the query has more
    ///   genes than the universe
    pub fn overlap(&self, query: &GeneSet, dataset_ids: &[&str]) -> PathwayResult<ResultSet> {
        debug!(
            "Overlap of {} with {} genes against {:?}",
            query.name(),
            query.len(),
            dataset_ids
        );
        let collections = self.store.load(dataset_ids)?;
        overlap(&self.universe, query, &collections)
    }

    /// The gene universe
    pub fn universe(&self) -> &GeneUniverse {
        &self.universe
    }

    /// The backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// All members of the gene universe, in lexicographical order
    ///
    /// Returns `None` if the members are not known
    pub fn genes(&self) -> Option<Genes<'_>> {
        self.universe.genes()
    }

    /// All datasets, grouped by organization
    ///
    /// # Errors
    ///
    /// Any error of [`PathwayStore::organizations`]
    pub fn organizations(&self) -> PathwayResult<Vec<OrganizationInfo>> {
        self.store.organizations()
    }

    /// A single dataset with all its pathways
    ///
    /// # Errors
    ///
    /// [`PathwayError::DataUnavailable`]: The dataset does not exist
    pub fn dataset(&self, organization: &str, name: &str) -> PathwayResult<PathwayCollection> {
        self.store.dataset(organization, name)
    }
}

impl EnrichmentContext<MemoryStore> {
    /// Builds the context from the data folder of `config`
    ///
    /// # Errors
    ///
    /// - [`PathwayError::InvalidInput`]: The config does not specify a data folder
    /// - Any error of [`MemoryStore::from_folder`] or [`EnrichmentContext::new`]
    pub fn from_config(config: &Config) -> PathwayResult<Self> {
        let Some(folder) = config.data_dir() else {
            return Err(PathwayError::InvalidInput(
                "no data folder configured".to_string(),
            ));
        };
        Self::new(config, MemoryStore::from_folder(folder)?)
    }
}

/// A slot for an [`EnrichmentContext`] that is initialized exactly once
///
/// Hosts that need a single, process-wide context can keep a `ContextCell`
/// in a `static` and initialize it lazily. Concurrent first callers block
/// until the winning initialization is complete and then all share the
/// same instance. Once a context is present, all further initializers
/// are ignored.
///
/// # Examples
///
/// ```
/// use pathway::{Config, ContextCell, EnrichmentContext, MemoryStore};
///
/// static CONTEXT: ContextCell<MemoryStore> = ContextCell::new();
///
/// let context = CONTEXT
///     .get_or_try_init(|| EnrichmentContext::new(&Config::new(100), MemoryStore::new()))
///     .unwrap();
/// assert_eq!(context.universe().size(), 100);
///
/// // the second initializer is never called
/// let context = CONTEXT
///     .get_or_try_init(|| EnrichmentContext::new(&Config::new(5), MemoryStore::new()))
///     .unwrap();
/// assert_eq!(context.universe().size(), 100);
/// ```
#[derive(Debug)]
pub struct ContextCell<S> {
    context: OnceLock<EnrichmentContext<S>>,
    init: Mutex<()>,
}

impl<S> Default for ContextCell<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ContextCell<S> {
    /// Constructs a new, empty [`ContextCell`]
    pub const fn new() -> Self {
        Self {
            context: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// Returns the context, if it is initialized
    pub fn get(&self) -> Option<&EnrichmentContext<S>> {
        self.context.get()
    }

    /// Returns the context, initializing it with `init` if necessary
    ///
    /// Only one initializer runs at a time. If `init` fails, the cell
    /// stays empty and the next caller runs its own initializer.
    ///
    /// # Errors
    ///
    /// The error returned by `init`
    pub fn get_or_try_init<F>(&self, init: F) -> PathwayResult<&EnrichmentContext<S>>
    where
        F: FnOnce() -> PathwayResult<EnrichmentContext<S>>,
    {
        if let Some(context) = self.context.get() {
            return Ok(context);
        }

        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(context) = self.context.get() {
            return Ok(context);
        }
        let context = init()?;
        Ok(self.context.get_or_init(|| context))
    }
}
