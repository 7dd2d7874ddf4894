use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use phirbo::bio::{RankedCollection, RankedList};
use phirbo::core::config::ScoringParams;
use phirbo::core::predictor::HostPredictor;
use phirbo::rbo;
use std::hint::black_box;

/// Ranked list of `ranks` tie-sets of two ids, offset so neighbouring seeds overlap.
fn generate_list(ranks: usize, seed: usize) -> RankedList {
    let groups = (0..ranks)
        .map(|r| {
            let base = (r * 2 + seed * 3) % (ranks * 4);
            vec![format!("g{}", base), format!("g{}", base + ranks * 4)]
        })
        .collect();
    RankedList::new(groups).expect("generated list is valid")
}

fn generate_collection(prefix: &str, count: usize, ranks: usize) -> RankedCollection {
    (0..count)
        .map(|i| (format!("{}{:04}", prefix, i), generate_list(ranks, i)))
        .collect()
}

fn bench_rbo_pair(c: &mut Criterion) {
    let mut group = c.benchmark_group("rbo/pair");

    for ranks in [10, 30, 100, 300].iter() {
        let a = generate_list(*ranks, 1);
        let b = generate_list(*ranks / 2, 2);

        group.bench_with_input(BenchmarkId::from_parameter(ranks), ranks, |bench, _| {
            bench.iter(|| rbo(black_box(&a), black_box(&b), 0.75));
        });
    }

    group.finish();
}

fn bench_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("rbo/predict");
    group.sample_size(10);

    let hosts = generate_collection("host", 200, 30);
    let viruses = generate_collection("phage", 100, 30);

    for threads in [1, 4].iter() {
        let predictor = HostPredictor::new(ScoringParams::new(0.75, 30, *threads).expect("valid params"));
        group.bench_with_input(BenchmarkId::new("threads", threads), threads, |bench, _| {
            bench.iter(|| predictor.predict(black_box(&viruses), black_box(&hosts)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rbo_pair, bench_predict);
criterion_main!(benches);
