//! Search benchmarks over in-memory collections.

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use notecore::storage::MemoryStore;
use notecore::NoteStore;
use std::hint::black_box;

fn store_with_notes(count: usize) -> NoteStore {
    let mut store = NoteStore::new(Box::new(MemoryStore::new()));
    for i in 0..count {
        let title = format!("Note {i}");
        let content = format!("body text for note number {i} with some filler words");
        store.create(&title, &content).unwrap();
    }
    store
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [100, 1_000] {
        let store = store_with_notes(size);

        group.bench_with_input(BenchmarkId::new("hit_many", size), &store, |b, store| {
            b.iter(|| black_box(store.search(black_box("note")).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("hit_one", size), &store, |b, store| {
            b.iter(|| black_box(store.search(black_box("number 42 ")).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("miss", size), &store, |b, store| {
            b.iter(|| black_box(store.search(black_box("zzz-absent")).unwrap()));
        });
    }

    group.finish();
}

fn bench_list(c: &mut Criterion) {
    let store = store_with_notes(1_000);
    c.bench_function("list_1000", |b| {
        b.iter(|| black_box(store.list().unwrap()));
    });
}

criterion_group!(benches, bench_search, bench_list);
criterion_main!(benches);
