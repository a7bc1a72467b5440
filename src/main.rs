//! Example program demonstrating the vortex induction pipeline.
//!
//! Builds a synthetic two-kite wake from generated sample streams, assembles
//! the filament table and evaluates the induced velocity at each kite.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::time::Instant;

use kitewake::config::{Architecture, Convection, OutputMode, Quantity, Tip, VortexConfig};
use kitewake::filament::{FilamentListAssembler, Observation};
use kitewake::induction::{self, InducedQuantity};
use kitewake::vector::Vec3;
use kitewake::wake::{PointKey, StrengthKey, WakeVariables};
use kitewake::{Result, biot_savart};

/// Lay a chronological sample sequence out in the optimization-state stream
/// order: the period-start sample first, then the regular grid column-major.
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

/// Synthetic circular-loop trajectory for one kite, trailing downwind.
fn insert_kite_wake(
    variables: &mut WakeVariables,
    config: &VortexConfig,
    kite: usize,
    center_y: f64,
    wind_speed: f64,
) -> Result<()> {
    let n = config.n_k * config.d;
    let radius = 40.0;
    let span = 5.0;
    let loop_time = 8.0;

    let mut streams: HashMap<(Tip, char), Vec<f64>> = HashMap::new();
    for sample in 0..=n {
        let t = sample as f64 / n as f64 * loop_time;
        let angle = 2.0 * PI * t / loop_time;
        let drift = wind_speed * t;

        for (tip, offset) in [(Tip::Interior, 0.0), (Tip::Exterior, span)] {
            let y = center_y + (radius + offset) * angle.cos();
            let z = 120.0 + (radius + offset) * angle.sin();
            streams.entry((tip, 'x')).or_default().push(drift);
            streams.entry((tip, 'y')).or_default().push(y);
            streams.entry((tip, 'z')).or_default().push(z);
        }
    }

    for tip in [Tip::Interior, Tip::Exterior] {
        let x = storage_stream(&streams[&(tip, 'x')], config.n_k, config.d);
        let y = storage_stream(&streams[&(tip, 'y')], config.n_k, config.d);
        let z = storage_stream(&streams[&(tip, 'z')], config.n_k, config.d);
        let key = PointKey { kite, tip, period: 0 };
        variables.insert_points(Quantity::Position, key, &x, &y, &z)?;
    }

    let gammas: Vec<f64> = (0..=n)
        .map(|sample| 4.0 + (2.0 * PI * sample as f64 / n as f64).sin())
        .collect();
    variables.insert_strengths(
        StrengthKey { kite, period: 0 },
        &storage_stream(&gammas, config.n_k, config.d),
    )?;
    Ok(())
}

fn run() -> Result<()> {
    println!("===================================================");
    println!("Free-Wake Vortex Induction Demo");
    println!("===================================================");
    println!();

    let config = VortexConfig::custom(1.0e-2, 8, 3, 1, 1000.0)?;
    let wind_speed = 10.0;
    println!("Configuration:");
    println!("  epsilon           = {:.0e}", config.epsilon);
    println!("  n_k x d           = {} x {}", config.n_k, config.d);
    println!("  periods tracked   = {}", config.periods_tracked);
    println!("  far-wake distance = {:.0} m", config.far_wake_distance);
    println!("  rings per kite    = {}", config.n_rings());
    println!();

    let architecture = Architecture::from_pairs(&[(2, 1), (3, 1)]);
    let mut variables = WakeVariables::new(&config);
    insert_kite_wake(&mut variables, &config, 2, -60.0, wind_speed)?;
    insert_kite_wake(&mut variables, &config, 3, 60.0, wind_speed)?;

    let convection = Convection::along_wind(wind_speed);
    let assembler = FilamentListAssembler::new(&config, convection, &architecture, &variables)?;

    let filaments = assembler.all_filaments()?;
    println!("Filament table:");
    println!("  kites              = {}", architecture.kites().len());
    println!("  filaments per kite = {}", filaments.len() / architecture.kites().len());
    println!("  filaments total    = {}", filaments.len());
    println!();

    let residual = biot_savart::self_test();
    println!("Kernel self-test (infinite filament):");
    println!("  squared residual = {residual:.3e}");
    println!();

    let mut observations = HashMap::new();
    observations.insert(2usize, Observation::at(Vec3::new(0.0, -60.0, 160.0)));
    observations.insert(3usize, Observation::at(Vec3::new(0.0, 60.0, 160.0)));

    let results = induction::induction_at_kites(&assembler, &observations, OutputMode::Velocity)?;
    println!("Induced velocities:");
    for (kite, quantity) in &results {
        if let InducedQuantity::Velocity(velocity) = quantity {
            println!(
                "  kite {}: ({:+.5}, {:+.5}, {:+.5}) m/s  |u| = {:.5} m/s",
                kite, velocity.x, velocity.y, velocity.z,
                velocity.magnitude()
            );
        }
    }
    println!();

    let evaluations = 100;
    let start = Instant::now();
    for _ in 0..evaluations {
        let _ = induction::induction_at_kites(&assembler, &observations, OutputMode::Velocity)?;
    }
    let elapsed = start.elapsed();
    println!("Performance:");
    println!(
        "  {} full evaluations in {:.2?} ({:.3} ms each)",
        evaluations,
        elapsed,
        elapsed.as_secs_f64() * 1000.0 / evaluations as f64
    );

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
