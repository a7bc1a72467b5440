//! Free-wake vortex-lattice induction model for multi-kite airborne wind
//! energy trajectories.
//!
//! This library turns raw optimization-state sample streams into induced
//! velocities at the kites:
//! - Time ordering of wake geometry and circulation history
//! - Vortex-ring filament assembly with semi-infinite wake extensions
//! - A desingularized, differentiable-safe Biot-Savart kernel
//! - Data-parallel aggregation over the full filament table
//!
//! # Features
//!
//! - **Deterministic**: summation order is fixed, results are bit-identical
//!   across repeated evaluations and thread counts
//! - **Explicit configuration**: no process-wide options object; every entry
//!   point takes its parameters
//! - **Python bindings**: optional PyO3 bindings for use inside a Python
//!   optimization toolbox

#![warn(missing_docs)]
#![warn(clippy::doc_markdown)]

// Re-export core modules
pub mod biot_savart;
pub mod config;
pub mod error;
pub mod filament;
pub mod induction;
pub mod ring;
pub mod vector;
pub mod wake;

// Optional Python bindings
#[cfg(feature = "python-bindings")]
pub mod python;

// Re-export key types and functions for easy use
pub use config::{Architecture, Convection, OutputMode, Quantity, Tip, VortexConfig};
pub use error::{Result, WakeError};
pub use filament::{FilamentList, FilamentListAssembler, Observation, ObservedSegment};
pub use induction::{InducedQuantity, induced_velocity, induction_at_kites};
pub use ring::{Filament, RingFilamentBuilder};
pub use vector::Vec3;
pub use wake::{Sample, WakeVariables};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
