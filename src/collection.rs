//! Pathways grouped into datasets and organizations
use tracing::warn;

use crate::geneset::GeneSet;
use crate::DEFAULT_NUM_PATHWAYS;

/// All pathways of one dataset
///
/// A dataset belongs to an organization (e.g. `MSigDB`) and contains
/// any number of pathways. Each pathway is a [`GeneSet`] that is named
/// after the pathway. The pathways are kept ordered by name and each
/// name appears only once per dataset.
///
/// # Examples
///
/// ```
/// use pathway::{GeneSet, PathwayCollection};
///
/// let mut collection = PathwayCollection::new("MSigDB", "hallmark");
/// collection.insert(GeneSet::from_genes("HYPOXIA", ["HIF1A", "VEGFA"]));
/// collection.insert(GeneSet::from_genes("APOPTOSIS", ["CASP3", "BAX"]));
///
/// assert_eq!(collection.len(), 2);
/// let names: Vec<&str> = collection.iter().map(|pathway| pathway.name()).collect();
/// assert_eq!(names, vec!["APOPTOSIS", "HYPOXIA"]);
/// ```
#[derive(Debug, Clone)]
pub struct PathwayCollection {
    organization: String,
    name: String,
    pathways: Vec<GeneSet>,
}

impl PathwayCollection {
    /// Constructs a new, empty dataset
    pub fn new(organization: &str, name: &str) -> Self {
        Self {
            organization: organization.to_string(),
            name: name.to_string(),
            pathways: Vec::with_capacity(DEFAULT_NUM_PATHWAYS),
        }
    }

    /// The organization that curates the dataset
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// The name of the dataset
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of pathways in the dataset
    pub fn len(&self) -> usize {
        self.pathways.len()
    }

    /// Returns `true` if the dataset does not contain any pathways
    pub fn is_empty(&self) -> bool {
        self.pathways.is_empty()
    }

    /// Adds a pathway to the dataset
    ///
    /// If a pathway with the same name is already present, the genes
    /// of both are merged.
    ///
    /// Returns `true` if the pathway was newly added
    pub fn insert(&mut self, pathway: GeneSet) -> bool {
        match self
            .pathways
            .binary_search_by(|probe| probe.name().cmp(pathway.name()))
        {
            Ok(idx) => {
                warn!(
                    "Pathway {} is present multiple times in {}, merging genes",
                    pathway.name(),
                    self.name
                );
                self.pathways[idx].update(&pathway);
                false
            }
            Err(idx) => {
                self.pathways.insert(idx, pathway);
                true
            }
        }
    }

    /// Returns the pathway with the given name
    pub fn get(&self, name: &str) -> Option<&GeneSet> {
        self.pathways
            .binary_search_by(|probe| probe.name().cmp(name))
            .ok()
            .map(|idx| &self.pathways[idx])
    }

    /// Iterates all pathways in name-sorted order
    pub fn iter(&self) -> std::slice::Iter<'_, GeneSet> {
        self.pathways.iter()
    }

    /// Summary information about the dataset
    pub fn info(&self) -> DatasetInfo {
        DatasetInfo {
            organization: self.organization.clone(),
            name: self.name.clone(),
            pathways: self.len(),
        }
    }
}

impl<'a> IntoIterator for &'a PathwayCollection {
    type Item = &'a GeneSet;
    type IntoIter = std::slice::Iter<'a, GeneSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.pathways.iter()
    }
}

/// Summary information of a dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetInfo {
    organization: String,
    name: String,
    pathways: usize,
}

impl DatasetInfo {
    /// The organization that curates the dataset
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// The name of the dataset
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of pathways in the dataset
    pub fn pathways(&self) -> usize {
        self.pathways
    }
}

/// All datasets of one organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationInfo {
    name: String,
    datasets: Vec<DatasetInfo>,
}

impl OrganizationInfo {
    /// The name of the organization
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The datasets of the organization, ordered by name
    pub fn datasets(&self) -> &[DatasetInfo] {
        &self.datasets
    }

    /// Groups datasets by their organization
    ///
    /// Organizations and the datasets within each organization are
    /// ordered by name.
    pub fn group<I: IntoIterator<Item = DatasetInfo>>(datasets: I) -> Vec<OrganizationInfo> {
        let mut datasets: Vec<DatasetInfo> = datasets.into_iter().collect();
        datasets.sort_by(|a, b| {
            a.organization
                .cmp(&b.organization)
                .then_with(|| a.name.cmp(&b.name))
        });

        let mut res: Vec<OrganizationInfo> = Vec::new();
        for dataset in datasets {
            if let Some(org) = res.last_mut() {
                if org.name == dataset.organization {
                    org.datasets.push(dataset);
                    continue;
                }
            }
            res.push(OrganizationInfo {
                name: dataset.organization.clone(),
                datasets: vec![dataset],
            });
        }
        res
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pathways_are_sorted_by_name() {
        let mut collection = PathwayCollection::new("org", "ds");
        assert!(collection.insert(GeneSet::from_genes("C", ["1"])));
        assert!(collection.insert(GeneSet::from_genes("A", ["2"])));
        assert!(collection.insert(GeneSet::from_genes("B", ["3"])));

        let names: Vec<&str> = collection.iter().map(GeneSet::name).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn duplicate_pathways_are_merged() {
        let mut collection = PathwayCollection::new("org", "ds");
        assert!(collection.insert(GeneSet::from_genes("A", ["1", "2"])));
        assert!(!collection.insert(GeneSet::from_genes("A", ["2", "3"])));

        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get("A").unwrap().join(","), "1,2,3");
        assert!(collection.get("B").is_none());
    }

    #[test]
    fn dataset_info() {
        let mut collection = PathwayCollection::new("org", "ds");
        collection.insert(GeneSet::from_genes("A", ["1"]));
        let info = collection.info();
        assert_eq!(info.organization(), "org");
        assert_eq!(info.name(), "ds");
        assert_eq!(info.pathways(), 1);
    }

    #[test]
    fn group_by_organization() {
        let datasets = vec![
            PathwayCollection::new("Reactome", "reactome").info(),
            PathwayCollection::new("MSigDB", "kegg").info(),
            PathwayCollection::new("MSigDB", "hallmark").info(),
        ];
        let orgs = OrganizationInfo::group(datasets);
        assert_eq!(orgs.len(), 2);
        assert_eq!(orgs[0].name(), "MSigDB");
        assert_eq!(orgs[0].datasets().len(), 2);
        assert_eq!(orgs[0].datasets()[0].name(), "hallmark");
        assert_eq!(orgs[0].datasets()[1].name(), "kegg");
        assert_eq!(orgs[1].name(), "Reactome");
    }

    #[test]
    fn group_nothing() {
        assert!(OrganizationInfo::group(Vec::new()).is_empty());
    }
}
