use rayon::prelude::*;

use pathway::stats::{benjamini_hochberg, upper_tail};
use pathway::{
    Config, ContextCell, EnrichmentContext, GeneSet, MemoryStore, OverlapResult, PathwayError,
    PathwayStore,
};

const DATA_DIR: &str = "tests/data";

fn context() -> EnrichmentContext<MemoryStore> {
    let config = Config::new(45_956).with_data_dir(DATA_DIR);
    EnrichmentContext::from_config(&config).unwrap()
}

fn genes(prefix: &str, range: std::ops::Range<usize>) -> Vec<String> {
    range.map(|i| format!("{prefix}{i}")).collect()
}

#[test]
fn load_data_folder() {
    let context = context();

    let organizations = context.organizations().unwrap();
    let names: Vec<&str> = organizations.iter().map(|org| org.name()).collect();
    assert_eq!(names, vec!["MSigDB", "Reactome"]);

    let msigdb: Vec<(&str, usize)> = organizations[0]
        .datasets()
        .iter()
        .map(|ds| (ds.name(), ds.pathways()))
        .collect();
    assert_eq!(msigdb, vec![("c2.cp.kegg", 2), ("hallmark", 3)]);

    assert_eq!(context.genes().unwrap().count(), 46);
    assert_eq!(context.dataset("Reactome", "reactome").unwrap().len(), 3);
}

#[test]
fn enrichment_across_datasets() {
    let context = context();
    let query = GeneSet::from_genes("apoptosis", ["BAX", "CASP3", "CASP8", "TP53", "NOT_A_GENE"]);

    let results = context
        .overlap(&query, &["hallmark", "c2.cp.kegg", "reactome"])
        .unwrap();

    assert_eq!(results.sample_size(), 4);
    assert_eq!(results.universe_size(), 45_956);
    assert_eq!(results.len(), 8);

    let order: Vec<(usize, &str)> = results
        .iter()
        .map(|test| (test.dataset_index(), test.pathway()))
        .collect();
    assert_eq!(
        order,
        vec![
            (0, "HALLMARK_APOPTOSIS"),
            (0, "HALLMARK_HYPOXIA"),
            (0, "HALLMARK_P53_PATHWAY"),
            (1, "KEGG_APOPTOSIS"),
            (1, "KEGG_GLYCOLYSIS_GLUCONEOGENESIS"),
            (2, "R-HSA-109581"),
            (2, "R-HSA-5358508"),
            (2, "R-HSA-5693532"),
        ]
    );

    let kegg = &results.tests()[3];
    assert_eq!(kegg.dataset(), "c2.cp.kegg");
    assert_eq!(kegg.pathway_genes(), 11);
    assert_eq!(kegg.overlap_gene_list(), "BAX,CASP3,CASP8,TP53");
    assert!((kegg.ratio() - 1.0).abs() < f64::EPSILON);

    let hypoxia = &results.tests()[1];
    assert_eq!(hypoxia.overlap_count(), 0);
    assert_eq!(hypoxia.pvalue(), 1.0);
    assert_eq!(hypoxia.qvalue(), 1.0);

    let pvalues: Vec<f64> = results.iter().map(OverlapResult::pvalue).collect();
    for (test, qvalue) in results.iter().zip(benjamini_hochberg(&pvalues)) {
        assert_eq!(test.qvalue(), qvalue);
        assert!((0.0..=1.0).contains(&test.qvalue()));
    }

    let significant: Vec<&str> = results
        .significant(0.05)
        .map(OverlapResult::pathway)
        .collect();
    assert!(significant.contains(&"KEGG_APOPTOSIS"));
    assert!(!significant.contains(&"HALLMARK_HYPOXIA"));
}

#[test]
fn unknown_dataset_fails_the_request() {
    let context = context();
    let query = GeneSet::from_genes("q", ["BAX"]);
    match context.overlap(&query, &["hallmark", "c5.go.bp"]) {
        Err(PathwayError::DataUnavailable(id)) => assert_eq!(id, "c5.go.bp"),
        _ => panic!("unknown datasets must fail"),
    }
}

#[test]
fn single_strongly_enriched_pathway() {
    let mut query_genes = genes("HIT", 0..10);
    query_genes.extend(genes("QUERY", 0..40));

    let mut pathway_genes = genes("HIT", 0..10);
    pathway_genes.extend(genes("PATHWAY", 0..190));

    let mut store = MemoryStore::new();
    store
        .add_pathway("org", "ds", GeneSet::from_genes("pw", pathway_genes))
        .unwrap();
    let context = EnrichmentContext::new(&Config::new(42_577), store).unwrap();

    let results = context
        .overlap(&GeneSet::from_genes("query", query_genes), &["ds"])
        .unwrap();
    assert_eq!(results.len(), 1);

    let test = &results.tests()[0];
    assert_eq!(test.pathway_genes(), 200);
    assert_eq!(test.overlap_count(), 10);
    assert!((test.ratio() - 0.2).abs() < f64::EPSILON);

    let expected = 3.637118285847417e-14;
    assert!(((test.pvalue() - expected) / expected).abs() < 1e-6);
    assert_eq!(test.qvalue(), test.pvalue());
}

#[test]
fn two_pathway_correction() {
    let qvalues = benjamini_hochberg(&[0.001, 0.02]);
    assert!((qvalues[0] - 0.002).abs() < 1e-15);
    assert!((qvalues[1] - 0.02).abs() < 1e-15);

    assert!(benjamini_hochberg(&[]).is_empty());
    assert_eq!(benjamini_hochberg(&[0.37]), vec![0.37]);
}

#[test]
fn hypergeometric_reference() {
    let p = upper_tail(20, 5, 4, 2).unwrap();
    assert!((p - 0.24871001031991744).abs() < 1e-12);
    assert_eq!(upper_tail(20, 5, 4, 0).unwrap(), 1.0);
    assert!(upper_tail(20, 5, 4, 5).is_err());
}

#[test]
fn concurrent_requests() {
    let context = context();
    let datasets = ["hallmark", "c2.cp.kegg", "reactome"];
    let all_genes: Vec<&str> = context.genes().unwrap().collect();

    let queries: Vec<GeneSet> = (0..64)
        .map(|i| {
            GeneSet::from_genes(
                &format!("query {i}"),
                all_genes.iter().skip(i % 7).step_by(1 + i % 5).copied(),
            )
        })
        .collect();

    let sequential: Vec<Vec<OverlapResult>> = queries
        .iter()
        .map(|query| context.overlap(query, &datasets).unwrap().tests().to_vec())
        .collect();

    let parallel: Vec<Vec<OverlapResult>> = queries
        .par_iter()
        .map(|query| context.overlap(query, &datasets).unwrap().tests().to_vec())
        .collect();

    assert_eq!(sequential, parallel);
}

#[test]
fn shared_context_cell() {
    static CONTEXT: ContextCell<MemoryStore> = ContextCell::new();

    let sizes: Vec<u64> = (0..32)
        .into_par_iter()
        .map(|i| {
            CONTEXT
                .get_or_try_init(|| {
                    let config = Config::new(45_956 + i).with_data_dir(DATA_DIR);
                    EnrichmentContext::from_config(&config)
                })
                .unwrap()
                .universe()
                .size()
        })
        .collect();

    let size = CONTEXT.get().unwrap().universe().size();
    assert!(sizes.iter().all(|s| *s == size));
    assert_eq!(CONTEXT.get().unwrap().store().datasets().unwrap().len(), 3);
}
