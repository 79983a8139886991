//! Bench split planning and rendering for wide and narrow split counts.

#![forbid(unsafe_code)]

use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use qsplit_plan::compute_boundaries;
use qsplit_sql::{QuerySplitter, SplitRequest};
use qsplit_test_utils::sample_catalog;
use qsplit_types::{MinMaxResult, ScalarType, TypeFamily};

const RANGES: usize = 1_000;

fn make_ranges(n: usize) -> Vec<MinMaxResult> {
    let mut rng = SmallRng::seed_from_u64(0xC0FF_EE00_DADA_BEEF);
    (0..n)
        .map(|_| {
            let min = rng.random_range(i64::MIN / 2..0);
            let max = rng.random_range(0..i64::MAX / 2);
            MinMaxResult::single(min, max)
        })
        .collect()
}

fn bench_boundaries(c: &mut Criterion) {
    let ranges = make_ranges(RANGES);

    c.bench_function("boundaries/signed_x64", |b| {
        b.iter(|| {
            for mm in &ranges {
                black_box(compute_boundaries(TypeFamily::Signed, Some(mm), 64).ok());
            }
        });
    });

    c.bench_function("boundaries/binary_x1024", |b| {
        b.iter(|| black_box(compute_boundaries(TypeFamily::Binary, None, 1024).ok()));
    });
}

fn bench_split(c: &mut Criterion) {
    let catalog = sample_catalog();
    let ranges = make_ranges(64);

    for count in [4i64, 256] {
        let request = SplitRequest::new(
            "SELECT id, name, score FROM t WHERE user_id = :uid AND score > 10",
            count,
        )
        .with_bind_variable("uid", 7);

        c.bench_function(&format!("split/validate_and_render_x{count}"), |b| {
            b.iter_batched(
                || request.clone(),
                |request| {
                    let splitter = QuerySplitter::new(request, &catalog).ok();
                    black_box(splitter.map(|s| s.split(ScalarType::Int64, ranges.first())))
                },
                BatchSize::SmallInput,
            );
        });

        let splitter = match QuerySplitter::new(request.clone(), &catalog) {
            Ok(splitter) => splitter,
            Err(err) => panic!("bench request rejected: {err}"),
        };
        c.bench_function(&format!("split/render_only_x{count}"), |b| {
            b.iter(|| {
                for mm in &ranges {
                    black_box(splitter.split(ScalarType::Int64, Some(mm)).ok());
                }
            });
        });
    }
}

criterion_group!(benches, bench_boundaries, bench_split);
criterion_main!(benches);
