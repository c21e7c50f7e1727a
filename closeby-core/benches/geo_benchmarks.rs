// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Performance Benchmarks for Distance and Sync Operations
//!
//! Run with: cargo bench -p closeby-core

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use closeby_core::engine::{EngineConfig, EventDispatcher, SyncEngine, SyncResponse};
use closeby_core::geo::{distance_meters, nearest_distance, nearest_excluding, Coordinate};
use closeby_core::registry::protocol::parse_all_users;
use closeby_core::MockNotificationSink;

/// Deterministic grid of users around a city center, about 11 m apart.
fn crowd(n: usize) -> Vec<Coordinate> {
    let side = (n as f64).sqrt().ceil() as usize;
    (0..n)
        .map(|i| {
            Coordinate::new(
                43.1 + (i / side) as f64 * 0.0001,
                131.9 + (i % side) as f64 * 0.0001,
            )
        })
        .collect()
}

// =============================================================================
// DISTANCE BENCHMARKS
// =============================================================================

fn bench_distance(c: &mut Criterion) {
    let a = Coordinate::new(43.1, 131.9);
    let b = Coordinate::new(43.10045, 131.9);

    c.bench_function("haversine_single", |bench| {
        bench.iter(|| distance_meters(black_box(a), black_box(b)))
    });
}

// =============================================================================
// NEAREST NEIGHBOR BENCHMARKS
// =============================================================================

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_neighbor");
    let origin = Coordinate::new(43.1, 131.9);

    for n in [10usize, 100, 1000] {
        let points = crowd(n);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("nearest_distance_{}", n), |b| {
            b.iter(|| nearest_distance(black_box(origin), black_box(&points)))
        });

        // Per-peer markers do this for every entry.
        group.bench_function(format!("all_peers_{}", n), |b| {
            b.iter(|| {
                (0..points.len())
                    .map(|i| nearest_excluding(black_box(&points), i))
                    .fold(f64::INFINITY, f64::min)
            })
        });
    }

    group.finish();
}

// =============================================================================
// SYNC CYCLE BENCHMARKS
// =============================================================================

fn bench_sync_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync_cycle");

    let points = crowd(200);
    let body = serde_json::to_string(
        &points
            .iter()
            .map(|p| [p.latitude, p.longitude])
            .collect::<Vec<_>>(),
    )
    .unwrap();

    group.bench_function("parse_all_users_200", |b| {
        b.iter(|| parse_all_users(black_box(&body)))
    });

    group.bench_function("apply_all_users_200", |b| {
        b.iter_batched(
            || {
                let mut engine = SyncEngine::with_user_id(
                    "bench",
                    EngineConfig::default(),
                    Arc::new(MockNotificationSink::new()),
                    Arc::new(EventDispatcher::new()),
                );
                engine.update_location(points[0]);
                engine
            },
            |mut engine| {
                let request = engine.begin_sync().unwrap();
                engine
                    .complete_sync(request, SyncResponse::AllUsers(Ok(points.clone())))
                    .unwrap()
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

// =============================================================================
// MAIN
// =============================================================================

criterion_group!(benches, bench_distance, bench_nearest, bench_sync_cycle);

criterion_main!(benches);
