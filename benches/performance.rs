//! Performance benchmarks for the record store.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use orgstore::{BloodDonationDraft, DonationDraft, MemberDraft, RecordStore};
use tempfile::TempDir;

fn populated_store(dir: &TempDir, records: u64) -> RecordStore {
    let store = RecordStore::open_at(dir.path().join("data.json"));
    for i in 0..records {
        store
            .add_donation(DonationDraft::new(
                format!("Donor {i}"),
                format!("{}.25", i % 500),
                "2024-06-01",
            ))
            .unwrap();
    }
    store
}

/// Benchmark free-text search over growing donation sets
fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [100, 1_000, 5_000] {
        group.bench_with_input(BenchmarkId::new("donations", size), &size, |b, &size| {
            let dir = TempDir::new().unwrap();
            let store = populated_store(&dir, size);

            b.iter(|| {
                black_box(store.search_donations("donor 7"));
            });
        });
    }

    group.finish();
}

/// Benchmark the full-set aggregate
fn bench_donation_total(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let store = populated_store(&dir, 5_000);

    c.bench_function("donation_total_5000", |b| {
        b.iter(|| black_box(store.donation_total()));
    });
}

/// Benchmark a mutating operation, which includes the wholesale flush
fn bench_add_member(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::open_at(dir.path().join("data.json"));
    let mut n = 0u64;

    c.bench_function("add_member_with_flush", |b| {
        b.iter(|| {
            n += 1;
            store
                .add_member(MemberDraft::new(
                    format!("Member {n}"),
                    format!("member{n}@example.org"),
                    "555-0100",
                    "1 Main St",
                    "pw",
                ))
                .unwrap();
        });
    });
}

/// Benchmark reopening a store with a large backing file
fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for size in [1_000u64, 10_000] {
        group.bench_with_input(BenchmarkId::new("records", size), &size, |b, &size| {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("data.json");
            {
                let store = RecordStore::open_at(&path);
                for i in 0..size {
                    store
                        .add_blood_donation(BloodDonationDraft::new(
                            format!("Donor {i}"),
                            "O+",
                            "2024-06-01",
                        ))
                        .unwrap();
                }
            }

            b.iter(|| {
                let store = RecordStore::open_at(&path);
                black_box(store.blood_donation_count());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_search,
    bench_donation_total,
    bench_add_member,
    bench_load
);
criterion_main!(benches);
