use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use rollcall::core::store::{RosterStore, StoreConfig};

fn big_config() -> StoreConfig {
    StoreConfig {
        capacity: 100_000,
        ..StoreConfig::default()
    }
}

fn filled_store(n: u32) -> RosterStore {
    let mut store = RosterStore::with_config(big_config());
    for roll in 1..=n {
        store.add_record(roll, "Asha").expect("add");
        for day in 1..=u8::try_from(roll % 31).unwrap() {
            store.mark_attendance(roll, day, true).expect("mark");
        }
    }
    store
}

fn bench_adds(c: &mut Criterion) {
    c.bench_function("store_add_50k", |b| {
        b.iter(|| {
            let mut store = RosterStore::with_config(big_config());
            for roll in 1..=50_000u32 {
                store.add_record(roll, "Asha").expect("add");
            }
        });
    });
}

fn bench_marks(c: &mut Criterion) {
    c.bench_function("store_mark_10k", |b| {
        b.iter(|| {
            let mut store = filled_store(10_000);
            for roll in 1..=10_000u32 {
                store.mark_attendance(roll, 15, true).expect("mark");
            }
        });
    });
}

fn bench_day_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("day_report");
    for n in [100u32, 1_000, 10_000] {
        let store = filled_store(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let _ = store.attendance_for_day(15).expect("report");
                let _ = store.average_attendance().expect("average");
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_adds, bench_marks, bench_day_report);
criterion_main!(benches);
