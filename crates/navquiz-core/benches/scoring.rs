use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use navquiz_core::model::ProfileCategory::{self, *};
use navquiz_core::parser::builtin_catalog;
use navquiz_core::scoring::{tally, verdict, winners};
use navquiz_core::QuizAttempt;

fn votes(n: usize) -> Vec<ProfileCategory> {
    (0..n).map(|i| ProfileCategory::ALL[i % 4]).collect()
}

fn bench_tally(c: &mut Criterion) {
    let mut group = c.benchmark_group("tally");

    let unique = vec![Resiliente, Intuitivo, Resiliente, Resolutivo, Resiliente];
    group.bench_function("5 votes, unique winner", |b| {
        b.iter(|| tally(black_box(&unique), black_box(5)))
    });

    let large = votes(1000);
    group.bench_function("1000 votes", |b| {
        b.iter(|| tally(black_box(&large), black_box(1000)))
    });

    group.finish();
}

fn bench_winners(c: &mut Criterion) {
    let mut group = c.benchmark_group("winners");

    let tied = tally(&[Resiliente, Resolutivo, Resiliente, Resolutivo, Reflexivo], 5).unwrap();
    group.bench_function("two-way tie", |b| b.iter(|| winners(black_box(&tied))));
    group.bench_function("verdict", |b| b.iter(|| verdict(black_box(&tied))));

    group.finish();
}

fn bench_traversal(c: &mut Criterion) {
    let catalog = Arc::new(builtin_catalog().unwrap());

    c.bench_function("full traversal", |b| {
        b.iter(|| {
            let mut attempt = QuizAttempt::new(Arc::clone(&catalog));
            for id in ["A", "B", "C", "D", "A"] {
                attempt.select(black_box(id)).unwrap();
                attempt.confirm().unwrap();
            }
            attempt.tally()
        })
    });
}

criterion_group!(benches, bench_tally, bench_winners, bench_traversal);
criterion_main!(benches);
