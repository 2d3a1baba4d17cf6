//! # Store Benchmarks
//!
//! Lookup and resolution cost as collections grow.
//!
//! Run with: `cargo bench -p eventgate-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use eventgate_core::{
    DanglingPolicy, EntityStore, Event, EventField, Gateway, GatewayMode, Participant, SeedData,
    User,
};
use std::hint::black_box;

/// Seed store with `size` extra users, events and participants.
fn create_store(size: usize) -> EntityStore {
    let mut store = EntityStore::from_seed(SeedData::builtin());

    for i in 0..size {
        store.users.append(User {
            id: format!("bench-u{i}"),
            username: format!("user{i}"),
            email: format!("user{i}@example.com"),
        });
        store.events.append(Event {
            id: format!("bench-e{i}"),
            title: format!("Event {i}"),
            desc: "generated".to_string(),
            date: None,
            from: None,
            to: None,
            location_id: "l1".to_string(),
            user_id: format!("bench-u{i}"),
        });
        store.participants.append(Participant {
            id: format!("bench-p{i}"),
            user_id: format!("bench-u{i}"),
            event_id: format!("bench-e{}", i % 10),
        });
    }

    store
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_find_by_id(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_by_id_last");

    for size in [100, 1000, 10000].iter() {
        let store = create_store(*size);
        let last = format!("bench-u{}", size - 1);
        group.bench_with_input(BenchmarkId::from_parameter(size), &last, |b, id| {
            b.iter(|| black_box(store.users.find_by_id(id)));
        });
    }

    group.finish();
}

fn bench_get_events_resolved(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_events_all_fields");

    for size in [100, 1000].iter() {
        let gateway = Gateway::new(
            create_store(*size),
            GatewayMode::ReadOnly,
            DanglingPolicy::Strict,
        );
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(gateway.get_events(&EventField::ALL)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_find_by_id, bench_get_events_resolved);
criterion_main!(benches);
