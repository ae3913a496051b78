//! Dispatch Engine Benchmarks
//!
//! Run with: cargo bench --bench filter

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::path::Path;
use std::sync::Arc;

use plugset::plugtest::{Availability, IoPlugin, Simple, StringPlugin};
use plugset::{by_type, Io, PluginRef, Plugins};

fn mixed_plugins(n: usize) -> Plugins {
    (0..n)
        .map(|i| {
            if i % 2 == 0 {
                Arc::new(Simple(i)) as PluginRef
            } else {
                Arc::new(IoPlugin::default()) as PluginRef
            }
        })
        .collect()
}

fn benchmark_by_type(c: &mut Criterion) {
    let mut group = c.benchmark_group("by_type");

    for n in [100, 1000].iter() {
        let plugs = mixed_plugins(*n);
        group.throughput(Throughput::Elements(*n as u64));
        group.bench_with_input(format!("{}_plugins", n), &plugs, |b, plugs| {
            b.iter(|| {
                let receivers = by_type(black_box(plugs), |p| p.as_io_receiver());
                black_box(receivers.len())
            });
        });
    }

    group.finish();
}

fn benchmark_collection_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection");

    let named: Plugins = (0..100)
        .map(|i| Arc::new(StringPlugin::new(format!("plugin-{i}"))) as PluginRef)
        .collect();

    group.bench_function("validate_100", |b| {
        b.iter(|| black_box(&named).validate().is_ok());
    });

    group.bench_function("names_100", |b| {
        b.iter(|| black_box(&named).names().len());
    });

    let checked: Plugins = (0..100)
        .map(|i| {
            if i % 3 == 0 {
                Arc::new(Availability(i % 2 == 0)) as PluginRef
            } else {
                Arc::new(Simple(i)) as PluginRef
            }
        })
        .collect();

    group.bench_function("available_100", |b| {
        b.iter(|| black_box(&checked).available(Path::new("/some/path")).len());
    });

    group.finish();
}

fn benchmark_broadcast(c: &mut Criterion) {
    let mut group = c.benchmark_group("broadcast");
    group.throughput(Throughput::Elements(100));

    let receivers: Plugins = (0..100)
        .map(|_| Arc::new(IoPlugin::default()) as PluginRef)
        .collect();

    group.bench_function("set_stdio_100", |b| {
        b.iter(|| {
            receivers.set_stdio(Io::discard()).expect("set stdio");
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_by_type,
    benchmark_collection_ops,
    benchmark_broadcast
);
criterion_main!(benches);
