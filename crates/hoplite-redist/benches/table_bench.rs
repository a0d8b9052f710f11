use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use hoplite_core::{IfIndex, Metric, RouteKey, RouteOrigin};
use hoplite_redist::ExportTable;
use std::net::Ipv6Addr;

fn make_key(i: u32) -> RouteKey {
    let hi = (i >> 16) as u16;
    let lo = i as u16;
    RouteKey::v6(Ipv6Addr::new(0x2001, 0xdb8, hi, lo, 0, 0, 0, 0), 64).unwrap()
}

fn populate(table: &mut ExportTable, count: u32) {
    for i in 0..count {
        table
            .upsert(make_key(i), Metric::new(10), IfIndex(1), RouteOrigin::Kernel)
            .unwrap();
    }
}

fn bench_export_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("export_table");

    for (label, count) in [("100", 100u32), ("1K", 1_000), ("10K", 10_000)] {
        let mut table = ExportTable::new();
        populate(&mut table, count);

        let hit = make_key(count / 2);
        let miss = make_key(0xFFFF_FFFF);

        group.bench_with_input(BenchmarkId::new("lookup_hit", label), &table, |b, t| {
            b.iter(|| t.lookup(&hit).is_some());
        });

        group.bench_with_input(BenchmarkId::new("lookup_miss", label), &table, |b, t| {
            b.iter(|| t.lookup(&miss).is_some());
        });
    }

    // upsert of fresh keys from empty, growth included
    group.bench_function("insert", |b| {
        b.iter_custom(|iters| {
            let mut table = ExportTable::new();
            let start = std::time::Instant::now();
            for i in 0..iters {
                table
                    .upsert(
                        make_key(i as u32),
                        Metric::new(10),
                        IfIndex(1),
                        RouteOrigin::Kernel,
                    )
                    .unwrap();
            }
            start.elapsed()
        });
    });

    // the steady-state path: a kernel re-announce that improves nothing
    group.bench_function("upsert_unchanged_1K", |b| {
        let mut table = ExportTable::new();
        populate(&mut table, 1_000);
        let key = make_key(500);
        b.iter(|| {
            table
                .upsert(key, Metric::new(10), IfIndex(1), RouteOrigin::Kernel)
                .unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_export_table);
criterion_main!(benches);
