//! Parsing pathway datasets and gene lists from files

/// Module to parse pathway datasets from GMT files
///
/// Each line of a GMT file describes one pathway. The first column is the
/// name of the pathway, the second column its source or description and all
/// following columns are the genes of the pathway:
///
/// ```text
/// HALLMARK_HYPOXIA    http://www.gsea-msigdb.org/HALLMARK_HYPOXIA    ACE    ADM    ADORA2B
/// HALLMARK_APOPTOSIS  http://www.gsea-msigdb.org/HALLMARK_APOPTOSIS  ADD1   AIFM3  ANKH
/// ```
pub mod gmt {
    use std::fs::File;
    use std::io::BufRead;
    use std::io::BufReader;
    use std::path::Path;

    use tracing::trace;

    use crate::geneset::GeneSet;
    use crate::store::MemoryStore;
    use crate::{PathwayError, PathwayResult};

    /// Suffix that marks the species and release part of a GMT filename
    const RELEASE_SUFFIX: &str = ".Hs";

    /// Parses a single line of a GMT file
    ///
    /// Returns `None` for blank lines
    fn parse_line(line: &str) -> PathwayResult<Option<GeneSet>> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Ok(None);
        }
        let mut cols = line.split('\t');

        // Column 1 is the name of the pathway
        let name = match cols.next() {
            Some(name) if !name.trim().is_empty() => name.trim(),
            _ => return Err(PathwayError::InvalidInput(line.to_string())),
        };

        // Column 2 is the source or description of the pathway
        if cols.next().is_none() {
            return Err(PathwayError::InvalidInput(line.to_string()));
        }

        let genes = cols.map(str::trim).filter(|gene| !gene.is_empty());
        Ok(Some(GeneSet::from_genes(name, genes)))
    }

    /// Returns the dataset name of a GMT file
    ///
    /// Removes the `.gmt` extension and the `.Hs...` release suffix
    ///
    /// ```
    /// use pathway::parser::gmt::dataset_name;
    ///
    /// assert_eq!(dataset_name("c2.cp.kegg.Hs.symbols.gmt"), "c2.cp.kegg");
    /// assert_eq!(dataset_name("hallmark.gmt"), "hallmark");
    /// ```
    pub fn dataset_name(filename: &str) -> String {
        let name = filename.strip_suffix(".gmt").unwrap_or(filename);
        match name.find(RELEASE_SUFFIX) {
            Some(idx) if idx > 0 => name[..idx].to_string(),
            _ => name.to_string(),
        }
    }

    /// Parses all pathways of a GMT file into a dataset of `store`
    ///
    /// # Errors
    ///
    /// - [`PathwayError::CannotOpenFile`]: Source file not present or can't be read
    /// - [`PathwayError::InvalidInput`]: A line does not have a name and a source column
    ///   or the dataset belongs to another organization
    pub fn parse<P: AsRef<Path>>(
        file: P,
        organization: &str,
        dataset: &str,
        store: &mut MemoryStore,
    ) -> PathwayResult<()> {
        let filename = file.as_ref().display().to_string();
        let file = File::open(file).map_err(|_| PathwayError::CannotOpenFile(filename.clone()))?;
        parse_reader(BufReader::new(file), organization, dataset, store)
            .map_err(|err| match err {
                PathwayError::InvalidInput(line) => {
                    PathwayError::InvalidInput(format!("{filename}: {line}"))
                }
                err => err,
            })
    }

    /// Parses all pathways from a reader into a dataset of `store`
    ///
    /// # Errors
    ///
    /// Same as [`parse`]
    pub fn parse_reader<R: BufRead>(
        reader: R,
        organization: &str,
        dataset: &str,
        store: &mut MemoryStore,
    ) -> PathwayResult<()> {
        for line in reader.lines() {
            let line = line.map_err(|_| {
                PathwayError::InvalidInput(format!("Invalid data in dataset {dataset}"))
            })?;
            if let Some(pathway) = parse_line(&line)? {
                trace!("Adding {} genes to {}", pathway.len(), pathway.name());
                store.add_pathway(organization, dataset, pathway)?;
            }
        }
        Ok(())
    }

}

/// Module to parse lists of genes
///
/// The file contains one gene identifier per line. Blank lines,
/// comments (starting with `#`) and a `gene_symbol` header are ignored.
///
/// ```text
/// gene_symbol
/// A1BG
/// A1CF
/// A2M
/// ```
pub mod genes {
    use std::fs::File;
    use std::io::BufRead;
    use std::io::BufReader;
    use std::path::Path;

    use crate::geneset::GeneSet;
    use crate::{PathwayError, PathwayResult};

    const HEADER: &str = "gene_symbol";

    /// Parses a single line of a gene list
    ///
    /// Returns `None` if the line does not contain a gene
    fn parse_line(line: &str) -> Option<&str> {
        let gene = line.trim();
        if gene.is_empty() || gene.starts_with('#') || gene == HEADER {
            None
        } else {
            Some(gene)
        }
    }

    /// Parses a gene list file into a [`GeneSet`]
    ///
    /// The [`GeneSet`] is named after the file
    ///
    /// # Errors
    ///
    /// - [`PathwayError::CannotOpenFile`]: Source file not present or can't be read
    /// - [`PathwayError::InvalidInput`]: The file contains invalid UTF-8 data
    ///
    /// # Examples
    ///
    /// ```
    /// use pathway::parser::genes;
    ///
    /// let genes = genes::parse("tests/data/genes.txt").unwrap();
    /// assert!(genes.contains("TP53"));
    /// assert!(!genes.contains("gene_symbol"));
    /// ```
    pub fn parse<P: AsRef<Path>>(file: P) -> PathwayResult<GeneSet> {
        let filename = file.as_ref().display().to_string();
        let file = File::open(file).map_err(|_| PathwayError::CannotOpenFile(filename.clone()))?;
        parse_reader(BufReader::new(file), &filename)
    }

    /// Parses a gene list from a reader into a [`GeneSet`] called `name`
    ///
    /// # Errors
    ///
    /// [`PathwayError::InvalidInput`]: The data contains invalid UTF-8
    pub fn parse_reader<R: BufRead>(reader: R, name: &str) -> PathwayResult<GeneSet> {
        let mut genes = GeneSet::new(name);
        for line in reader.lines() {
            let line = line
                .map_err(|_| PathwayError::InvalidInput(format!("Invalid data in {name}")))?;
            if let Some(gene) = parse_line(&line) {
                genes.insert(gene);
            }
        }
        Ok(genes)
    }

    #[cfg(test)]
    mod test_gene_parsing {
        use super::*;

        #[test]
        fn test_skip_header_and_comments() {
            assert!(parse_line("gene_symbol").is_none());
            assert!(parse_line("# comment").is_none());
            assert!(parse_line("   ").is_none());
            assert_eq!(parse_line(" TP53 \r"), Some("TP53"));
        }

        #[test]
        fn test_parse_reader() {
            let data = "gene_symbol\nTP53\n\nBRCA1\nTP53\n#MYC\n".as_bytes();
            let genes = parse_reader(BufReader::new(data), "genes").unwrap();
            assert_eq!(genes.name(), "genes");
            assert_eq!(genes.to_sorted_list(), vec!["BRCA1", "TP53"]);
        }

        #[test]
        fn test_missing_file() {
            assert!(matches!(
                parse("tests/data/missing.txt"),
                Err(PathwayError::CannotOpenFile(_))
            ));
        }
    }
}
