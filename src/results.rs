//! Results of an enrichment request
use crate::GENE_SEPARATOR;

/// The overlap statistics of one tested pathway
///
/// [`OverlapResult`]s are returned as part of a [`ResultSet`] from
/// [`crate::overlap`] and [`crate::EnrichmentContext::overlap`].
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapResult {
    dataset_index: usize,
    dataset: String,
    pathway: String,
    pathway_genes: usize,
    overlap_genes: Vec<String>,
    ratio: f64,
    pvalue: f64,
    qvalue: f64,
}

impl OverlapResult {
    pub(crate) fn new(
        dataset_index: usize,
        dataset: &str,
        pathway: &str,
        pathway_genes: usize,
        overlap_genes: Vec<String>,
        ratio: f64,
        pvalue: f64,
    ) -> Self {
        Self {
            dataset_index,
            dataset: dataset.to_string(),
            pathway: pathway.to_string(),
            pathway_genes,
            overlap_genes,
            ratio,
            pvalue,
            qvalue: 1.0,
        }
    }

    pub(crate) fn set_qvalue(&mut self, qvalue: f64) {
        self.qvalue = qvalue;
    }

    /// Index of the dataset in the order the datasets were requested
    pub fn dataset_index(&self) -> usize {
        self.dataset_index
    }

    /// Name of the dataset of the pathway
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Name of the pathway
    pub fn pathway(&self) -> &str {
        &self.pathway
    }

    /// Number of genes in the pathway (`K`)
    pub fn pathway_genes(&self) -> usize {
        self.pathway_genes
    }

    /// Number of valid query genes that are part of the pathway (`k`)
    pub fn overlap_count(&self) -> usize {
        self.overlap_genes.len()
    }

    /// The overlapping genes in lexicographical order
    pub fn overlap_genes(&self) -> &[String] {
        &self.overlap_genes
    }

    /// The overlapping genes in lexicographical order, separated by comma
    pub fn overlap_gene_list(&self) -> String {
        self.overlap_genes.join(GENE_SEPARATOR)
    }

    /// The fraction of valid query genes that are part of the pathway (`k / n`)
    ///
    /// `0.0` if the query does not contain any valid genes
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// The p-value of the one-sided hypergeometric test
    pub fn pvalue(&self) -> f64 {
        self.pvalue
    }

    /// The FDR adjusted p-value
    pub fn qvalue(&self) -> f64 {
        self.qvalue
    }

    /// `-log10` of the q-value
    ///
    /// Returns `f64::INFINITY` if the q-value is `0.0`
    pub fn log10_qvalue(&self) -> f64 {
        -self.qvalue.log10()
    }
}

/// All test results of one enrichment request
///
/// The tests are ordered by dataset (in the order they were requested)
/// and then by pathway name. They are not sorted by significance, use
/// [`ResultSet::sorted_by_pvalue`] for this.
#[derive(Debug, Clone)]
pub struct ResultSet {
    query: String,
    valid_genes: Vec<String>,
    universe_size: u64,
    datasets: Vec<String>,
    tests: Vec<OverlapResult>,
}

impl ResultSet {
    pub(crate) fn new(
        query: &str,
        valid_genes: Vec<String>,
        universe_size: u64,
        datasets: Vec<String>,
        tests: Vec<OverlapResult>,
    ) -> Self {
        Self {
            query: query.to_string(),
            valid_genes,
            universe_size,
            datasets,
            tests,
        }
    }

    /// Name of the query gene set
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The valid query genes that were tested, in lexicographical order
    pub fn valid_genes(&self) -> &[String] {
        &self.valid_genes
    }

    /// The effective sample size (`n`), the number of valid query genes
    pub fn sample_size(&self) -> usize {
        self.valid_genes.len()
    }

    /// The size of the gene universe (`N`)
    pub fn universe_size(&self) -> u64 {
        self.universe_size
    }

    /// Names of all tested datasets, in the requested order
    pub fn datasets(&self) -> &[String] {
        &self.datasets
    }

    /// Name of the dataset at `index`
    pub fn dataset(&self, index: usize) -> Option<&str> {
        self.datasets.get(index).map(String::as_str)
    }

    /// All tests
    pub fn tests(&self) -> &[OverlapResult] {
        &self.tests
    }

    /// Number of tested pathways
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// Returns `true` if no pathway was tested
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Iterates all tests
    pub fn iter(&self) -> std::slice::Iter<'_, OverlapResult> {
        self.tests.iter()
    }

    /// Iterates all tests with a q-value of at most `threshold`
    pub fn significant(&self, threshold: f64) -> impl Iterator<Item = &OverlapResult> {
        self.tests
            .iter()
            .filter(move |test| test.qvalue() <= threshold)
    }

    /// Returns all tests ordered by ascending p-value
    ///
    /// Tests with equal p-values keep their original order
    pub fn sorted_by_pvalue(&self) -> Vec<&OverlapResult> {
        let mut sorted: Vec<&OverlapResult> = self.tests.iter().collect();
        sorted.sort_by(|a, b| a.pvalue().total_cmp(&b.pvalue()));
        sorted
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a OverlapResult;
    type IntoIter = std::slice::Iter<'a, OverlapResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.tests.iter()
    }
}
