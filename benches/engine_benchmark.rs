//! Access-loop benchmarks for the paging engine.
//!
//! Measures reference throughput per replacement policy on a seeded
//! uniform stream that saturates the frame pool.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pagesim::{references_from_pages, PagingEngine, PolicyKind, Reference, SimConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

const PAGE_BYTES: usize = 256;
const FRAMES: usize = 16;
const VIRTUAL_PAGES: usize = 64;
const STREAM_LEN: usize = 10_000;

fn uniform_stream() -> Vec<Reference> {
    let mut rng = StdRng::seed_from_u64(42);
    let pages: Vec<usize> = (0..STREAM_LEN)
        .map(|_| rng.gen_range(0..VIRTUAL_PAGES))
        .collect();
    references_from_pages(&pages)
}

fn bench_policies(c: &mut Criterion) {
    let refs = uniform_stream();
    let mut group = c.benchmark_group("uniform_stream");

    for kind in PolicyKind::ALL {
        let temp_dir = TempDir::new().unwrap();
        let config = SimConfig::new(FRAMES * PAGE_BYTES, PAGE_BYTES, VIRTUAL_PAGES).unwrap();
        let mut engine =
            PagingEngine::new(config, kind, &temp_dir.path().join("swap.bin")).unwrap();

        group.bench_function(BenchmarkId::from_parameter(kind.name()), |b| {
            b.iter(|| {
                engine.reset().unwrap();
                engine.run(black_box(&refs)).unwrap();
                engine.stats().faults
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_policies);
criterion_main!(benches);
