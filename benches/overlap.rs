use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rayon::prelude::*;

use pathway::{Config, EnrichmentContext, GeneSet, MemoryStore};

const UNIVERSE_SIZE: usize = 20_000;
const PATHWAY_SIZE: usize = 150;

/// Builds a dataset of `n_pathways` pathways with overlapping genes
fn context(n_pathways: usize) -> EnrichmentContext<MemoryStore> {
    let mut store = MemoryStore::new();
    for i in 0..n_pathways {
        let genes = (0..PATHWAY_SIZE).map(|j| format!("GENE{}", (i * 37 + j * 13) % UNIVERSE_SIZE));
        store
            .add_pathway("bench", "bench", GeneSet::from_genes(&format!("PATHWAY_{i}"), genes))
            .unwrap();
    }
    store.set_universe_members(GeneSet::from_genes(
        "universe",
        (0..UNIVERSE_SIZE).map(|i| format!("GENE{i}")),
    ));
    EnrichmentContext::new(&Config::new(UNIVERSE_SIZE as u64), store).unwrap()
}

fn query(i: usize, len: usize) -> GeneSet {
    GeneSet::from_genes(
        &format!("query {i}"),
        (0..len).map(|j| format!("GENE{}", (i * 101 + j * 7) % UNIVERSE_SIZE)),
    )
}

fn sequential(context: &EnrichmentContext<MemoryStore>, queries: &[GeneSet]) -> usize {
    queries
        .iter()
        .map(|query| context.overlap(query, &["bench"]).unwrap().significant(0.05).count())
        .sum()
}

fn parallel(context: &EnrichmentContext<MemoryStore>, queries: &[GeneSet]) -> usize {
    queries
        .par_iter()
        .map(|query| context.overlap(query, &["bench"]).unwrap().significant(0.05).count())
        .sum()
}

fn overlap_benchmark(c: &mut Criterion) {
    let datasets: &[&str] = &["bench"];
    let mut group = c.benchmark_group("overlap");
    for n_pathways in [100, 1_000, 5_000] {
        let context = context(n_pathways);
        let query = query(1, 300);
        group.bench_with_input(
            BenchmarkId::from_parameter(n_pathways),
            &n_pathways,
            |b, _| b.iter(|| context.overlap(black_box(&query), black_box(datasets))),
        );
    }
    group.finish();

    let context = context(1_000);
    let queries: Vec<GeneSet> = (0..100).map(|i| query(i, 300)).collect();

    c.bench_function("overlap 100 queries", |b| {
        b.iter(|| sequential(black_box(&context), black_box(&queries)))
    });

    c.bench_function("overlap-parallel 100 queries", |b| {
        b.iter(|| parallel(black_box(&context), black_box(&queries)))
    });
}

criterion_group!(overlap, overlap_benchmark);
criterion_main!(overlap);
