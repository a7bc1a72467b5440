//! Evaluation configuration for the vortex wake model.
//!
//! Everything here is read-only for the duration of one induction
//! evaluation: the discretization counts, the regularization radius, the
//! far-wake convection reference and the kite/parent architecture. There is
//! no process-wide options object; entry points take these values
//! explicitly.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WakeError};
use crate::vector::Vec3;

/// Identifier of a kite node in the tether tree.
pub type KiteId = usize;

/// Identifier of the node a kite is attached to.
pub type NodeId = usize;

/// Discretization and regularization parameters for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VortexConfig {
    /// Biot-Savart regularization radius. Strictly positive.
    pub epsilon: f64,

    /// Number of shooting intervals per period.
    pub n_k: usize,

    /// Collocation order (sub-steps per shooting interval).
    pub d: usize,

    /// Number of wake periods retained in the optimization state.
    pub periods_tracked: usize,

    /// Pseudo-infinite projection distance for the semi-infinite wake
    /// extensions. A finite stand-in for true infinity; its truncation error
    /// is checked against the analytic infinite-filament limit.
    pub far_wake_distance: f64,
}

impl VortexConfig {
    /// Default configuration: a single tracked period at moderate
    /// discretization.
    pub const fn new() -> Self {
        Self {
            epsilon: 1.0e-2,
            n_k: 10,
            d: 4,
            periods_tracked: 1,
            far_wake_distance: 1000.0,
        }
    }

    /// Fully specified configuration, validated.
    pub fn custom(
        epsilon: f64,
        n_k: usize,
        d: usize,
        periods_tracked: usize,
        far_wake_distance: f64,
    ) -> Result<Self> {
        let config = Self { epsilon, n_k, d, periods_tracked, far_wake_distance };
        config.validate()?;
        Ok(config)
    }

    /// Check the positivity requirements on every parameter.
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon > 0.0) {
            return Err(WakeError::NonPositiveParameter { name: "epsilon", value: self.epsilon });
        }
        if !(self.far_wake_distance > 0.0) {
            return Err(WakeError::NonPositiveParameter {
                name: "far_wake_distance",
                value: self.far_wake_distance,
            });
        }
        if self.n_k == 0 {
            return Err(WakeError::ZeroParameter { name: "n_k" });
        }
        if self.d == 0 {
            return Err(WakeError::ZeroParameter { name: "d" });
        }
        if self.periods_tracked == 0 {
            return Err(WakeError::ZeroParameter { name: "periods_tracked" });
        }
        Ok(())
    }

    /// Expected length of every per-period sample stream: `n_k * d + 1`
    /// (the regular grid plus the dedicated period-start sample).
    #[inline(always)]
    pub fn stream_len(&self) -> usize {
        self.n_k * self.d + 1
    }

    /// Number of vortex rings tracked per kite, counting the leading and
    /// trailing semi-infinite extension rings.
    #[inline(always)]
    pub fn n_rings(&self) -> usize {
        self.periods_tracked * self.n_k * self.d + 2
    }
}

impl Default for VortexConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Reference convection vector used to place the semi-infinite wake
/// extension points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Convection {
    u_ref: Vec3,
}

impl Convection {
    /// Convection along the reference wind direction (x̂) at the given speed.
    pub fn along_wind(speed: f64) -> Self {
        Self { u_ref: Vec3::xhat().mul(speed) }
    }

    /// Convection along an arbitrary direction at the given speed. The
    /// direction must have nonzero magnitude.
    pub fn new(direction: Vec3, speed: f64) -> Result<Self> {
        let unit = direction.normalized().ok_or(WakeError::DegenerateConvection)?;
        Ok(Self { u_ref: unit.mul(speed) })
    }

    /// The reference convection vector (direction times speed).
    #[inline(always)]
    pub fn vector(&self) -> Vec3 {
        self.u_ref
    }
}

/// Kite attachment map: which node each kite hangs from, and the enumeration
/// of all kites in sweep order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Architecture {
    kites: Vec<KiteId>,
    parent_map: HashMap<KiteId, NodeId>,
}

impl Architecture {
    /// Empty architecture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (kite, parent) attachment pairs, preserving order.
    pub fn from_pairs(pairs: &[(KiteId, NodeId)]) -> Self {
        let mut arch = Self::new();
        for &(kite, parent) in pairs {
            arch.add_kite(kite, parent);
        }
        arch
    }

    /// Register a kite and its attachment node.
    pub fn add_kite(&mut self, kite: KiteId, parent: NodeId) {
        if !self.parent_map.contains_key(&kite) {
            self.kites.push(kite);
        }
        self.parent_map.insert(kite, parent);
    }

    /// All kites, in registration order.
    pub fn kites(&self) -> &[KiteId] {
        &self.kites
    }

    /// Attachment node of a kite.
    pub fn parent_of(&self, kite: KiteId) -> Result<NodeId> {
        self.parent_map.get(&kite).copied().ok_or(WakeError::UnknownKite(kite))
    }
}

/// Spanwise wing-tip edge shedding a trailing filament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tip {
    /// Tip closer to the tether attachment.
    Interior,
    /// Tip further from the tether attachment.
    Exterior,
}

impl FromStr for Tip {
    type Err = WakeError;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "int" => Ok(Self::Interior),
            "ext" => Ok(Self::Exterior),
            other => Err(WakeError::UnknownTip(other.to_string())),
        }
    }
}

impl fmt::Display for Tip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interior => write!(f, "int"),
            Self::Exterior => write!(f, "ext"),
        }
    }
}

/// Kind of wake-node stream stored per (kite, tip, period).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    /// Wake-node positions.
    Position,
    /// Wake-node velocities.
    Velocity,
}

impl FromStr for Quantity {
    type Err = WakeError;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "pos" => Ok(Self::Position),
            "vel" => Ok(Self::Velocity),
            other => Err(WakeError::UnknownQuantity(other.to_string())),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position => write!(f, "pos"),
            Self::Velocity => write!(f, "vel"),
        }
    }
}

/// Shape of the induction result per observation point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputMode {
    /// Full induced-velocity vector.
    Velocity,
    /// Scalar projection onto the observation surface normal.
    NormalProjection,
}

impl FromStr for OutputMode {
    type Err = WakeError;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "velocity" => Ok(Self::Velocity),
            "normal" => Ok(Self::NormalProjection),
            other => Err(WakeError::UnknownOutputMode(other.to_string())),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Velocity => write!(f, "velocity"),
            Self::NormalProjection => write!(f, "normal"),
        }
    }
}
