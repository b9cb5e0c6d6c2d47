use std::process;

use pathway::{Config, EnrichmentContext, GeneSet};

const DEFAULT_OUTPUT_LEN: usize = 10;

/// Prints the most significant pathways of the enrichment
fn print_results(results: &pathway::ResultSet, output_len: usize) {
    println!(
        "Query: {} ({} of {} genes in the universe)",
        results.query(),
        results.sample_size(),
        results.universe_size()
    );
    println!("dataset\tpathway\tk/K\tratio\tp\tq\t-log10(q)\tgenes");
    for test in results.sorted_by_pvalue().iter().take(output_len) {
        println!(
            "{}\t{}\t{}/{}\t{:.3}\t{:e}\t{:e}\t{:.2}\t{}",
            test.dataset(),
            test.pathway(),
            test.overlap_count(),
            test.pathway_genes(),
            test.ratio(),
            test.pvalue(),
            test.qvalue(),
            test.log10_qvalue(),
            test.overlap_gene_list()
        );
    }
}

fn main() {
    simple_logger::init_with_env().unwrap();

    let mut args = std::env::args();
    if args.len() < 3 {
        println!("Show enriched pathways of a list of genes\n\n");
        println!("Usage\nenrichment <GENES> <DATASETS> <N RESULTS>");
        println!("\nenrichment BAX,CASP3,CASP8,TP53 hallmark,c2.cp.kegg 10\n");
        println!("Requires PATHWAY_UNIVERSE_SIZE and PATHWAY_DATA_DIR to be set");
        process::exit(1)
    }

    let config = Config::from_env().expect("Invalid configuration");
    let context = EnrichmentContext::from_config(&config).expect("Unable to load pathway data");

    let genes = args.nth(1).unwrap();
    let query = GeneSet::from_genes("query", genes.split(','));

    let datasets = args.next().unwrap();
    let dataset_ids: Vec<&str> = datasets.split(',').collect();

    let output_len = args
        .next()
        .map(|arg| arg.parse::<usize>().unwrap_or(DEFAULT_OUTPUT_LEN))
        .unwrap_or(DEFAULT_OUTPUT_LEN);

    match context.overlap(&query, &dataset_ids) {
        Ok(results) => print_results(&results, output_len),
        Err(err) => {
            println!("{err}");
            process::exit(1)
        }
    }
}
