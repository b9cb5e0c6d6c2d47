//! The [`GeneUniverse`] is the reference population of every enrichment test
use tracing::debug;

use crate::geneset::{GeneSet, Genes};
use crate::{PathwayError, PathwayResult};

/// The reference population against which enrichment is measured
///
/// The universe has a total size `N`, which is used as the population of
/// every hypergeometric test. Optionally, it also knows its explicit
/// members. If the members are known, query genes that are not part of
/// the universe are dropped before testing.
///
/// A [`GeneUniverse`] is built once and is read-only afterwards. It can be
/// shared between any number of concurrent requests.
///
/// # Examples
///
/// ```
/// use pathway::{GeneSet, GeneUniverse};
///
/// let members = GeneSet::from_genes("universe", ["A", "B", "C", "D"]);
/// let universe = GeneUniverse::with_members(100, members).unwrap();
///
/// let query = GeneSet::from_genes("query", ["A", "C", "X"]);
/// let valid = universe.filter(&query);
/// assert_eq!(valid.join(","), "A,C");
///
/// // Without known members, the query is used unchanged
/// let universe = GeneUniverse::new(100).unwrap();
/// assert_eq!(universe.filter(&query).len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct GeneUniverse {
    size: u64,
    members: Option<GeneSet>,
}

impl GeneUniverse {
    /// Constructs a [`GeneUniverse`] of the given size without known members
    ///
    /// # Errors
    ///
    /// [`PathwayError::InvalidInput`] if `size` is `0`
    pub fn new(size: u64) -> PathwayResult<Self> {
        Self::build(size, None)
    }

    /// Constructs a [`GeneUniverse`] of the given size with explicit members
    ///
    /// # Errors
    ///
    /// - [`PathwayError::InvalidInput`] if `size` is `0`
    /// - [`PathwayError::NumericDegenerate`] if there are more members than `size`
    pub fn with_members(size: u64, members: GeneSet) -> PathwayResult<Self> {
        Self::build(size, Some(members))
    }

    pub(crate) fn build(size: u64, members: Option<GeneSet>) -> PathwayResult<Self> {
        if size == 0 {
            return Err(PathwayError::InvalidInput(
                "the universe size must be positive".to_string(),
            ));
        }
        if let Some(members) = &members {
            let count = u64::try_from(members.len()).map_err(|_| {
                PathwayError::InvalidInput("too many universe members".to_string())
            })?;
            if count > size {
                return Err(PathwayError::NumericDegenerate {
                    population: size,
                    successes: count,
                    draws: 0,
                    observed: 0,
                });
            }
            debug!("Universe of {} genes with {} known members", size, count);
        } else {
            debug!("Universe of {} genes without known members", size);
        }
        Ok(Self { size, members })
    }

    /// The total size `N` of the reference population
    pub fn size(&self) -> u64 {
        self.size
    }

    /// The explicit members of the universe, if known
    pub fn members(&self) -> Option<&GeneSet> {
        self.members.as_ref()
    }

    /// Iterates the known members in lexicographical order
    ///
    /// Returns `None` if the members are not known
    pub fn genes(&self) -> Option<Genes<'_>> {
        self.members.as_ref().map(GeneSet::iter)
    }

    /// Returns `true` if the gene is a valid member of the universe
    ///
    /// If the members are not known, every gene is valid.
    pub fn contains(&self, gene: &str) -> bool {
        self.members
            .as_ref()
            .map_or(true, |members| members.contains(gene))
    }

    /// Returns the genes of `query` that are valid members of the universe
    ///
    /// Unknown genes are dropped silently. If the members of the universe
    /// are not known, the query is returned unchanged. The returned set
    /// keeps the name of `query`.
    pub fn filter(&self, query: &GeneSet) -> GeneSet {
        match &self.members {
            Some(members) => {
                let valid = query.intersect(members);
                if valid.len() < query.len() {
                    debug!(
                        "Dropped {} of {} genes not present in the universe",
                        query.len() - valid.len(),
                        query.len()
                    );
                }
                valid
            }
            None => query.clone(),
        }
    }
}
