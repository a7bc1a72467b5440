//! Benchmark tests for filament assembly and kernel aggregation.
//!
//! The kernel map must scale to filament tables in the hundreds to
//! thousands of rows without dominating the outer optimization loop.
//!
//! Run with: `cargo bench`

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use kitewake::config::{Architecture, Convection, Quantity, Tip, VortexConfig};
use kitewake::filament::{FilamentListAssembler, Observation};
use kitewake::induction::induced_velocity;
use kitewake::vector::Vec3;
use kitewake::wake::{PointKey, StrengthKey, WakeVariables};

const D: usize = 4;

/// Lay a chronological sample sequence out in the optimization-state stream
/// order.
fn storage_stream(ordered: &[f64], n_k: usize, d: usize) -> Vec<f64> {
    let n = n_k * d;
    let mut stream = vec![0.0; n + 1];
    stream[0] = ordered[n];
    for (k, &value) in ordered.iter().take(n).enumerate() {
        let m = n - 1 - k;
        stream[1 + (m % d) * n_k + m / d] = value;
    }
    stream
}

/// Single-kite synthetic wake sized by the shooting-interval count.
fn build_wake(n_k: usize) -> (VortexConfig, Architecture, WakeVariables) {
    let config = VortexConfig::custom(1.0e-2, n_k, D, 1, 1000.0).unwrap();
    let architecture = Architecture::from_pairs(&[(2, 1)]);
    let mut variables = WakeVariables::new(&config);

    let n = n_k * D;
    let xs: Vec<f64> = (0..=n).map(|i| i as f64 * 0.5).collect();
    let ys: Vec<f64> = (0..=n).map(|i| (i as f64 * 0.3).sin() * 40.0).collect();
    let zs: Vec<f64> = (0..=n).map(|i| 120.0 + (i as f64 * 0.3).cos() * 40.0).collect();
    let spans: Vec<f64> = ys.iter().map(|y| y + 5.0).collect();

    let x = storage_stream(&xs, n_k, D);
    let y = storage_stream(&ys, n_k, D);
    let z = storage_stream(&zs, n_k, D);
    let y_ext = storage_stream(&spans, n_k, D);

    variables
        .insert_points(
            Quantity::Position,
            PointKey { kite: 2, tip: Tip::Interior, period: 0 },
            &x,
            &y,
            &z,
        )
        .unwrap();
    variables
        .insert_points(
            Quantity::Position,
            PointKey { kite: 2, tip: Tip::Exterior, period: 0 },
            &x,
            &y_ext,
            &z,
        )
        .unwrap();

    let gammas: Vec<f64> = (0..=n).map(|i| 4.0 + (i as f64 * 0.2).sin()).collect();
    variables
        .insert_strengths(StrengthKey { kite: 2, period: 0 }, &storage_stream(&gammas, n_k, D))
        .unwrap();

    (config, architecture, variables)
}

fn bench_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("filament_assembly");
    for n_k in [8, 32, 128] {
        let (config, architecture, variables) = build_wake(n_k);
        let convection = Convection::along_wind(10.0);
        let assembler =
            FilamentListAssembler::new(&config, convection, &architecture, &variables).unwrap();
        let rows = 3 * (config.n_rings() - 1);

        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &assembler, |b, assembler| {
            b.iter(|| {
                let observation = Observation::at(Vec3::new(0.0, 0.0, 120.0));
                black_box(assembler.segment_table(&observation).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_kernel_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernel_map");
    for n_k in [8, 32, 128] {
        let (config, architecture, variables) = build_wake(n_k);
        let convection = Convection::along_wind(10.0);
        let assembler =
            FilamentListAssembler::new(&config, convection, &architecture, &variables).unwrap();
        let list = assembler
            .segment_table(&Observation::at(Vec3::new(0.0, 0.0, 120.0)))
            .unwrap();

        group.throughput(Throughput::Elements(list.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(list.len()), &list, |b, list| {
            b.iter(|| black_box(induced_velocity(black_box(list))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_assembly, bench_kernel_map);
criterion_main!(benches);
