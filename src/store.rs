//! Access to the pathway datasets and the gene universe
//!
//! The enrichment itself never reads from disk or a database. All data
//! is provided by a [`PathwayStore`]. The crate ships with the in-memory
//! [`MemoryStore`] that can be filled manually or from a folder of
//! GMT files.
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::collection::{DatasetInfo, OrganizationInfo, PathwayCollection};
use crate::geneset::GeneSet;
use crate::parser;
use crate::{PathwayError, PathwayResult, DEFAULT_NUM_DATASETS, GENES_FILENAME, GMT_EXTENSION};

/// Provides pathway datasets and the members of the gene universe
///
/// Implementors must be safe to share between threads, since a single
/// store serves all concurrent requests of an [`crate::EnrichmentContext`].
pub trait PathwayStore: Send + Sync {
    /// Summary information of all available datasets
    ///
    /// # Errors
    ///
    /// Implementation specific, if the store cannot be read
    fn datasets(&self) -> PathwayResult<Vec<DatasetInfo>>;

    /// Returns one [`PathwayCollection`] for every requested dataset
    ///
    /// The collections are returned in the order of `ids` and the pathways
    /// of every collection are ordered by name.
    ///
    /// # Errors
    ///
    /// [`PathwayError::DataUnavailable`] if any of the `ids` is unknown.
    /// No partial result is returned.
    fn load(&self, ids: &[&str]) -> PathwayResult<Vec<PathwayCollection>>;

    /// Returns a single dataset of an organization
    ///
    /// # Errors
    ///
    /// [`PathwayError::DataUnavailable`] if the dataset does not exist
    fn dataset(&self, organization: &str, name: &str) -> PathwayResult<PathwayCollection>;

    /// The explicit members of the gene universe, if known
    ///
    /// # Errors
    ///
    /// Implementation specific, if the store cannot be read
    fn universe_members(&self) -> PathwayResult<Option<GeneSet>>;

    /// All datasets grouped by organization
    ///
    /// # Errors
    ///
    /// Same as [`PathwayStore::datasets`]
    fn organizations(&self) -> PathwayResult<Vec<OrganizationInfo>> {
        Ok(OrganizationInfo::group(self.datasets()?))
    }
}

/// A [`PathwayStore`] that holds all data in memory
///
/// Dataset names are unique in the store, each dataset belongs to
/// exactly one organization.
///
/// # Examples
///
/// ```
/// use pathway::{GeneSet, MemoryStore, PathwayStore};
///
/// let mut store = MemoryStore::new();
/// store.add_pathway("MSigDB", "hallmark", GeneSet::from_genes("HYPOXIA", ["HIF1A", "VEGFA"])).unwrap();
/// store.add_pathway("MSigDB", "kegg", GeneSet::from_genes("GLYCOLYSIS", ["HK1", "PKM"])).unwrap();
///
/// let collections = store.load(&["kegg"]).unwrap();
/// assert_eq!(collections[0].name(), "kegg");
/// assert_eq!(collections[0].len(), 1);
///
/// assert!(store.load(&["kegg", "reactome"]).is_err());
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    collections: Vec<PathwayCollection>,
    index: HashMap<String, usize>,
    members: Option<GeneSet>,
}

impl MemoryStore {
    /// Constructs a new, empty [`MemoryStore`]
    pub fn new() -> Self {
        Self {
            collections: Vec::with_capacity(DEFAULT_NUM_DATASETS),
            index: HashMap::new(),
            members: None,
        }
    }

    /// Loads all datasets and the universe from a data folder
    ///
    /// The folder must have the following layout:
    ///
    /// ```text
    /// <folder>/
    ///     genes.txt                       (optional: universe members)
    ///     <organization>/<dataset>.gmt    (any number of datasets)
    /// ```
    ///
    /// The dataset is named after the GMT file, without any `.Hs` release
    /// suffix, e.g. `c2.cp.kegg.Hs.symbols.gmt` is loaded as `c2.cp.kegg`.
    ///
    /// # Errors
    ///
    /// - [`PathwayError::CannotOpenFile`]: The folder or a file cannot be read
    /// - [`PathwayError::InvalidInput`]: A GMT file contains invalid lines
    ///   or a dataset name is used by two organizations
    ///
    /// # Examples
    ///
    /// ```
    /// use pathway::{MemoryStore, PathwayStore};
    ///
    /// let store = MemoryStore::from_folder("tests/data").unwrap();
    ///
    /// let organizations = store.organizations().unwrap();
    /// assert_eq!(organizations.len(), 2);
    /// assert_eq!(organizations[0].name(), "MSigDB");
    ///
    /// assert!(store.universe_members().unwrap().is_some());
    /// ```
    pub fn from_folder<P: AsRef<Path>>(folder: P) -> PathwayResult<Self> {
        let folder = folder.as_ref();
        let mut store = MemoryStore::new();

        let genes = folder.join(GENES_FILENAME);
        if genes.is_file() {
            store.set_universe_members(parser::genes::parse(&genes)?);
        }

        for organization in sorted_entries(folder)? {
            if !organization.is_dir() {
                continue;
            }
            let Some(org_name) = organization.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            for file in sorted_entries(&organization)? {
                if file.extension().and_then(|ext| ext.to_str()) != Some(GMT_EXTENSION) {
                    continue;
                }
                let Some(dataset) = file
                    .file_name()
                    .and_then(|name| name.to_str())
                    .map(parser::gmt::dataset_name)
                else {
                    continue;
                };
                debug!("Loading dataset {} of {}", dataset, org_name);
                parser::gmt::parse(&file, org_name, &dataset, &mut store)?;
            }
        }

        info!(
            "Loaded {} datasets from {}",
            store.collections.len(),
            folder.display()
        );
        Ok(store)
    }

    /// Adds a pathway to a dataset
    ///
    /// The dataset is created if it does not yet exist. If the dataset already
    /// contains a pathway with the same name, the genes are merged.
    ///
    /// # Errors
    ///
    /// [`PathwayError::InvalidInput`] if the dataset exists for a different organization
    pub fn add_pathway(
        &mut self,
        organization: &str,
        dataset: &str,
        pathway: GeneSet,
    ) -> PathwayResult<()> {
        let idx = match self.index.get(dataset) {
            Some(idx) => *idx,
            None => {
                self.collections
                    .push(PathwayCollection::new(organization, dataset));
                self.index
                    .insert(dataset.to_string(), self.collections.len() - 1);
                self.collections.len() - 1
            }
        };

        let collection = &mut self.collections[idx];
        if collection.organization() != organization {
            return Err(PathwayError::InvalidInput(format!(
                "dataset {} belongs to {}, not {}",
                dataset,
                collection.organization(),
                organization
            )));
        }
        collection.insert(pathway);
        Ok(())
    }

    /// Sets the explicit members of the gene universe
    pub fn set_universe_members(&mut self, members: GeneSet) {
        self.members = Some(members);
    }

    fn get(&self, dataset: &str) -> Option<&PathwayCollection> {
        self.index.get(dataset).map(|idx| &self.collections[*idx])
    }
}

impl PathwayStore for MemoryStore {
    fn datasets(&self) -> PathwayResult<Vec<DatasetInfo>> {
        let mut datasets: Vec<DatasetInfo> =
            self.collections.iter().map(PathwayCollection::info).collect();
        datasets.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(datasets)
    }

    fn load(&self, ids: &[&str]) -> PathwayResult<Vec<PathwayCollection>> {
        ids.iter()
            .map(|id| {
                self.get(id)
                    .cloned()
                    .ok_or_else(|| PathwayError::DataUnavailable((*id).to_string()))
            })
            .collect()
    }

    fn dataset(&self, organization: &str, name: &str) -> PathwayResult<PathwayCollection> {
        match self.get(name) {
            Some(collection) if collection.organization() == organization => {
                Ok(collection.clone())
            }
            _ => Err(PathwayError::DataUnavailable(format!(
                "{organization}:{name}"
            ))),
        }
    }

    fn universe_members(&self) -> PathwayResult<Option<GeneSet>> {
        Ok(self.members.clone())
    }
}

/// Lists all entries of a folder, ordered by path
fn sorted_entries(folder: &Path) -> PathwayResult<Vec<std::path::PathBuf>> {
    let entries = fs::read_dir(folder)
        .map_err(|_| PathwayError::CannotOpenFile(folder.display().to_string()))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|_| PathwayError::CannotOpenFile(folder.display().to_string()))?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}
