//! A [`GeneSet`] represents a labelled group of unique genes
//!
//! Both the genes submitted by a user and every pathway of a dataset
//! are represented as a [`GeneSet`].
use std::ops::{BitAnd, BitOr};

use crate::GENE_SEPARATOR;

/// A named set of unique gene identifiers
///
/// Gene identifiers are case-sensitive strings. Each identifier
/// can occur only once in the set. Internally the genes are kept
/// in lexicographical order, so iterating the set or rendering it
/// as a string always produces the same output, independent of the
/// order in which the genes were added.
///
/// # Examples
///
/// ```
/// use pathway::GeneSet;
///
/// let mut set = GeneSet::new("my genes");
/// assert!(set.insert("TP53"));
/// assert!(set.insert("BRCA1"));
/// assert!(!set.insert("TP53"));
///
/// assert_eq!(set.len(), 2);
/// assert!(set.contains("BRCA1"));
/// assert!(!set.contains("brca1"));
/// assert_eq!(set.join(","), "BRCA1,TP53");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GeneSet {
    name: String,
    genes: Vec<String>,
}

impl GeneSet {
    /// Constructs a new, empty [`GeneSet`]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            genes: Vec::new(),
        }
    }

    /// Constructs a new, empty [`GeneSet`] with the given capacity
    pub fn with_capacity(name: &str, capacity: usize) -> Self {
        Self {
            name: name.to_string(),
            genes: Vec::with_capacity(capacity),
        }
    }

    /// Constructs a [`GeneSet`] from an iterator of gene identifiers
    ///
    /// Duplicate identifiers are added only once.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathway::GeneSet;
    ///
    /// let set = GeneSet::from_genes("pathway", ["KRAS", "EGFR", "KRAS"]);
    /// assert_eq!(set.name(), "pathway");
    /// assert_eq!(set.to_sorted_list(), vec!["EGFR", "KRAS"]);
    /// ```
    pub fn from_genes<I, G>(name: &str, genes: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<String>,
    {
        let mut set = Self::new(name);
        set.extend(genes);
        set
    }

    /// The name (label) of the set
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if the set contains no genes
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Returns the number of genes in the set
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Adds a gene to the set
    ///
    /// Returns whether the gene was newly inserted. That is:
    ///
    /// - If the set did not previously contain this gene, true is returned.
    /// - If the set already contained this gene, false is returned.
    pub fn insert<G: Into<String>>(&mut self, gene: G) -> bool {
        let gene = gene.into();
        match self.genes.binary_search(&gene) {
            Ok(_) => false,
            Err(idx) => {
                self.genes.insert(idx, gene);
                true
            }
        }
    }

    /// Appends a gene to the end of the set
    ///
    /// # Note
    ///
    /// This method does not check the ordering or uniqueness. It must
    /// only be used when building a set from already sorted unique genes.
    fn insert_unchecked(&mut self, gene: &str) {
        self.genes.push(gene.to_string());
    }

    /// Returns `true` if the set contains the gene
    pub fn contains(&self, gene: &str) -> bool {
        self.genes
            .binary_search_by(|probe| probe.as_str().cmp(gene))
            .is_ok()
    }

    /// Returns an iterator of the genes, in lexicographical order
    pub fn iter(&self) -> Genes<'_> {
        Genes::new(self.genes.iter())
    }

    /// Returns a new [`GeneSet`] with all genes present in both sets
    ///
    /// Neither `self` nor `other` are modified. The new set
    /// is named after `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathway::GeneSet;
    ///
    /// let a = GeneSet::from_genes("a", ["A", "B", "C"]);
    /// let b = GeneSet::from_genes("b", ["C", "D", "A"]);
    ///
    /// let overlap = a.intersect(&b);
    /// assert_eq!(overlap.name(), "a");
    /// assert_eq!(overlap.join(","), "A,C");
    /// assert_eq!(a.len(), 3);
    /// assert_eq!(b.len(), 3);
    /// ```
    pub fn intersect(&self, other: &GeneSet) -> GeneSet {
        let mut res = GeneSet::with_capacity(&self.name, self.len().min(other.len()));
        let mut lhs = self.genes.iter().peekable();
        let mut rhs = other.genes.iter().peekable();
        while let (Some(a), Some(b)) = (lhs.peek(), rhs.peek()) {
            match a.cmp(b) {
                std::cmp::Ordering::Less => {
                    lhs.next();
                }
                std::cmp::Ordering::Greater => {
                    rhs.next();
                }
                std::cmp::Ordering::Equal => {
                    res.insert_unchecked(a);
                    lhs.next();
                    rhs.next();
                }
            }
        }
        res
    }

    /// Adds all genes of `other` to `self`
    ///
    /// Only `self` is modified.
    pub fn update(&mut self, other: &GeneSet) {
        if other.is_empty() {
            return;
        }
        let mut merged = Vec::with_capacity(self.len() + other.len());
        let mut lhs = std::mem::take(&mut self.genes).into_iter().peekable();
        let mut rhs = other.genes.iter().peekable();
        loop {
            match (lhs.peek(), rhs.peek()) {
                (Some(a), Some(b)) => match a.as_str().cmp(b.as_str()) {
                    std::cmp::Ordering::Less => merged.extend(lhs.next()),
                    std::cmp::Ordering::Greater => merged.extend(rhs.next().cloned()),
                    std::cmp::Ordering::Equal => {
                        merged.extend(lhs.next());
                        rhs.next();
                    }
                },
                (Some(_), None) => merged.extend(lhs.next()),
                (None, Some(_)) => merged.extend(rhs.next().cloned()),
                (None, None) => break,
            }
        }
        self.genes = merged;
    }

    /// Returns all genes in lexicographical order
    pub fn to_sorted_list(&self) -> Vec<String> {
        self.genes.clone()
    }

    /// Renders all genes in lexicographical order, joined by `separator`
    pub fn join(&self, separator: &str) -> String {
        self.genes.join(separator)
    }
}

impl std::fmt::Display for GeneSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.join(GENE_SEPARATOR))
    }
}

impl<G: Into<String>> Extend<G> for GeneSet {
    fn extend<I: IntoIterator<Item = G>>(&mut self, iter: I) {
        for gene in iter {
            self.insert(gene);
        }
    }
}

impl<'a> IntoIterator for &'a GeneSet {
    type Item = &'a str;
    type IntoIter = Genes<'a>;

    fn into_iter(self) -> Genes<'a> {
        Genes::new(self.genes.iter())
    }
}

/// An iterator over the genes of a [`GeneSet`]
pub struct Genes<'a> {
    inner: std::slice::Iter<'a, String>,
}

impl<'a> Genes<'a> {
    fn new(inner: std::slice::Iter<'a, String>) -> Self {
        Self { inner }
    }
}

impl<'a> Iterator for Genes<'a> {
    type Item = &'a str;
    fn next(&mut self) -> Option<&'a str> {
        self.inner.next().map(String::as_str)
    }
}

impl BitAnd for &GeneSet {
    type Output = GeneSet;

    fn bitand(self, rhs: &GeneSet) -> GeneSet {
        self.intersect(rhs)
    }
}

impl BitOr for &GeneSet {
    type Output = GeneSet;

    fn bitor(self, rhs: &GeneSet) -> GeneSet {
        let mut set = self.clone();
        set.update(rhs);
        set
    }
}
