//! Benchmarks the detector orchestrator over synthetic graphs of
//! increasing size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use muling_ring_detector::config::DetectionConfig;
use muling_ring_detector::graph::build_graph;
use muling_ring_detector::orchestrator::run_detectors;
use muling_ring_detector::record::NormalizedRecord;
use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

fn synthetic_records(chain_count: usize) -> Vec<NormalizedRecord> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut records = Vec::with_capacity(chain_count * 3);
    for i in 0..chain_count {
        records.push(NormalizedRecord {
            transaction_id: format!("cycle-{i}-1"),
            sender: format!("A{i}"),
            receiver: format!("B{i}"),
            amount: 100.0,
            timestamp: base + Duration::hours(i as i64),
        });
        records.push(NormalizedRecord {
            transaction_id: format!("cycle-{i}-2"),
            sender: format!("B{i}"),
            receiver: format!("C{i}"),
            amount: 100.0,
            timestamp: base + Duration::hours(i as i64 + 1),
        });
        records.push(NormalizedRecord {
            transaction_id: format!("cycle-{i}-3"),
            sender: format!("C{i}"),
            receiver: format!("A{i}"),
            amount: 100.0,
            timestamp: base + Duration::hours(i as i64 + 2),
        });
    }
    records
}

fn bench_orchestrator(c: &mut Criterion) {
    let config = DetectionConfig::default();
    let mut group = c.benchmark_group("run_detectors");

    for &chain_count in &[50usize, 200, 500] {
        let records = synthetic_records(chain_count);
        let graph = Arc::new(build_graph(&records));

        group.bench_function(format!("chains_{chain_count}"), |b| {
            b.iter(|| {
                let result = run_detectors(Arc::clone(&graph), &config);
                black_box(result.rings.len());
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_orchestrator);
criterion_main!(benches);
