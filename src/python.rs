//! Python bindings for the vortex induction library.
//!
//! Thin PyO3 wrappers so a Python optimization toolbox can feed its state
//! streams to the fast core. Requires the `python-bindings` feature:
//! `cargo build --features python-bindings --release`
//!
//! Usage in Python:
//! ```python
//! import kitewake as kw
//! config = kw.PyVortexConfig(1e-2, 8, 3, 1, 1000.0)
//! variables = kw.PyWakeVariables(config)
//! variables.insert_positions(2, "int", 0, x, y, z)
//! [...]
//! ```

use std::collections::HashMap;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::{Architecture, Convection, OutputMode, Quantity, Tip, VortexConfig};
use crate::error::WakeError;
use crate::filament::{FilamentListAssembler, Observation};
use crate::induction::{self, InducedQuantity};
use crate::vector::Vec3;
use crate::wake::{PointKey, StrengthKey, WakeVariables};
use crate::{VERSION, biot_savart};

fn wake_err(error: WakeError) -> PyErr {
    PyValueError::new_err(error.to_string())
}

/// Evaluation configuration.
#[pyclass(name = "PyVortexConfig")]
#[derive(Debug, Clone)]
pub struct PyVortexConfig {
    config: VortexConfig,
}

#[pymethods]
impl PyVortexConfig {
    #[new]
    fn new(
        epsilon: f64,
        n_k: usize,
        d: usize,
        periods_tracked: usize,
        far_wake_distance: f64,
    ) -> PyResult<Self> {
        let config = VortexConfig::custom(epsilon, n_k, d, periods_tracked, far_wake_distance)
            .map_err(wake_err)?;
        Ok(Self { config })
    }

    #[getter]
    fn epsilon(&self) -> f64 {
        self.config.epsilon
    }

    #[getter]
    fn n_rings(&self) -> usize {
        self.config.n_rings()
    }

    #[getter]
    fn stream_len(&self) -> usize {
        self.config.stream_len()
    }

    fn __repr__(&self) -> String {
        format!(
            "PyVortexConfig(epsilon={:e}, n_k={}, d={}, periods_tracked={})",
            self.config.epsilon, self.config.n_k, self.config.d, self.config.periods_tracked
        )
    }
}

/// Kite attachment architecture.
#[pyclass(name = "PyArchitecture")]
#[derive(Debug, Clone, Default)]
pub struct PyArchitecture {
    architecture: Architecture,
}

#[pymethods]
impl PyArchitecture {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    fn add_kite(&mut self, kite: usize, parent: usize) {
        self.architecture.add_kite(kite, parent);
    }

    fn kites(&self) -> Vec<usize> {
        self.architecture.kites().to_vec()
    }
}

/// Store of raw wake sample streams.
#[pyclass(name = "PyWakeVariables")]
#[derive(Debug, Clone)]
pub struct PyWakeVariables {
    variables: WakeVariables,
}

#[pymethods]
impl PyWakeVariables {
    #[new]
    fn new(config: &PyVortexConfig) -> Self {
        Self { variables: WakeVariables::new(&config.config) }
    }

    /// Store position component streams for (kite, tip, period).
    fn insert_positions(
        &mut self,
        kite: usize,
        tip: &str,
        period: usize,
        x: Vec<f64>,
        y: Vec<f64>,
        z: Vec<f64>,
    ) -> PyResult<()> {
        let tip: Tip = tip.parse().map_err(wake_err)?;
        let key = PointKey { kite, tip, period };
        self.variables
            .insert_points(Quantity::Position, key, &x, &y, &z)
            .map_err(wake_err)
    }

    /// Store a circulation-strength stream for (kite, period).
    fn insert_strengths(&mut self, kite: usize, period: usize, gamma: Vec<f64>) -> PyResult<()> {
        self.variables
            .insert_strengths(StrengthKey { kite, period }, &gamma)
            .map_err(wake_err)
    }
}

/// Induced velocity per kite over the full architecture.
///
/// `observations` maps each kite to its (x, y, z) observation point;
/// returns `{kite: (ux, uy, uz)}`.
#[pyfunction]
fn induced_velocities(
    config: &PyVortexConfig,
    architecture: &PyArchitecture,
    variables: &PyWakeVariables,
    wind_speed: f64,
    observations: HashMap<usize, (f64, f64, f64)>,
) -> PyResult<HashMap<usize, (f64, f64, f64)>> {
    let assembler = FilamentListAssembler::new(
        &config.config,
        Convection::along_wind(wind_speed),
        &architecture.architecture,
        &variables.variables,
    )
    .map_err(wake_err)?;

    let observations: HashMap<usize, Observation> = observations
        .into_iter()
        .map(|(kite, (x, y, z))| (kite, Observation::at(Vec3::new(x, y, z))))
        .collect();

    let results = induction::induction_at_kites(&assembler, &observations, OutputMode::Velocity)
        .map_err(wake_err)?;

    Ok(results
        .into_iter()
        .map(|(kite, quantity)| match quantity {
            InducedQuantity::Velocity(u) => (kite, (u.x, u.y, u.z)),
            InducedQuantity::NormalProjection(value) => (kite, (value, 0.0, 0.0)),
        })
        .collect())
}

/// Squared residual of the kernel against the analytic infinite-filament
/// limit.
#[pyfunction]
fn self_test() -> f64 {
    biot_savart::self_test()
}

/// Python module definition.
#[pymodule]
fn kitewake(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyVortexConfig>()?;
    m.add_class::<PyArchitecture>()?;
    m.add_class::<PyWakeVariables>()?;
    m.add_function(wrap_pyfunction!(induced_velocities, m)?)?;
    m.add_function(wrap_pyfunction!(self_test, m)?)?;
    m.add("__version__", VERSION)?;
    Ok(())
}
