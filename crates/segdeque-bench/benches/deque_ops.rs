//! Criterion micro-benchmarks for end, indexed and middle operations.
//!
//! Each benchmark also runs against `std::collections::VecDeque` as a
//! baseline.

use std::collections::VecDeque;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use segdeque::{Deque, DequeConfig};
use segdeque_bench::BLOCK_SIZES;

const N: usize = 10_000;

fn bench_push_back_10k(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back_10k");
    for block in BLOCK_SIZES {
        group.bench_with_input(BenchmarkId::new("segdeque", block), &block, |b, &block| {
            b.iter(|| {
                let mut d = Deque::with_config(DequeConfig::with_block_capacity(block));
                for i in 0..N {
                    d.push_back(black_box(i));
                }
                d
            });
        });
    }
    group.bench_function("vecdeque", |b| {
        b.iter(|| {
            let mut d = VecDeque::new();
            for i in 0..N {
                d.push_back(black_box(i));
            }
            d
        });
    });
    group.finish();
}

fn bench_push_front_10k(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_front_10k");
    for block in BLOCK_SIZES {
        group.bench_with_input(BenchmarkId::new("segdeque", block), &block, |b, &block| {
            b.iter(|| {
                let mut d = Deque::with_config(DequeConfig::with_block_capacity(block));
                for i in 0..N {
                    d.push_front(black_box(i));
                }
                d
            });
        });
    }
    group.bench_function("vecdeque", |b| {
        b.iter(|| {
            let mut d = VecDeque::new();
            for i in 0..N {
                d.push_front(black_box(i));
            }
            d
        });
    });
    group.finish();
}

fn bench_index_sum_10k(c: &mut Criterion) {
    let d: Deque<u64> = (0..N as u64).collect();
    let v: VecDeque<u64> = (0..N as u64).collect();
    let mut group = c.benchmark_group("index_sum_10k");
    group.bench_function("segdeque", |b| {
        b.iter(|| (0..N).map(|i| d[black_box(i)]).sum::<u64>());
    });
    group.bench_function("segdeque_iter", |b| {
        b.iter(|| d.iter().sum::<u64>());
    });
    group.bench_function("vecdeque", |b| {
        b.iter(|| (0..N).map(|i| v[black_box(i)]).sum::<u64>());
    });
    group.finish();
}

fn bench_middle_insert_1k(c: &mut Criterion) {
    let mut group = c.benchmark_group("middle_insert_1k");
    group.bench_function("segdeque", |b| {
        b.iter(|| {
            let mut d = Deque::new();
            for i in 0..1_000usize {
                d.insert(d.len() / 2, black_box(i));
            }
            d
        });
    });
    group.bench_function("vecdeque", |b| {
        b.iter(|| {
            let mut d = VecDeque::new();
            for i in 0..1_000usize {
                d.insert(d.len() / 2, black_box(i));
            }
            d
        });
    });
    group.finish();
}

fn bench_clone_10k(c: &mut Criterion) {
    let d: Deque<u64> = (0..N as u64).collect();
    c.bench_function("clone_10k", |b| b.iter(|| black_box(&d).clone()));
}

criterion_group!(
    benches,
    bench_push_back_10k,
    bench_push_front_10k,
    bench_index_sum_10k,
    bench_middle_insert_1k,
    bench_clone_10k
);
criterion_main!(benches);
