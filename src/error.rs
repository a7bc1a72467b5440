//! Error types for the vortex induction model.

use thiserror::Error;

/// Errors raised while configuring or assembling the wake model.
///
/// All variants are fatal at the point of detection; nothing in this crate
/// retries. A ring index outside `[1, n_rings)` is a programmer error and
/// panics instead of returning a variant.
#[derive(Debug, Error)]
pub enum WakeError {
    /// Unknown wing-tip selector token.
    #[error("unknown wing tip {0:?}, expected \"int\" or \"ext\"")]
    UnknownTip(String),

    /// Unknown wake-quantity selector token.
    #[error("unknown wake quantity {0:?}, expected \"pos\" or \"vel\"")]
    UnknownQuantity(String),

    /// Unknown induction output-mode token.
    #[error("unknown induction output mode {0:?}, expected \"velocity\" or \"normal\"")]
    UnknownOutputMode(String),

    /// A wake variable required for assembly was never stored.
    #[error("no wake variable stored for {0}")]
    MissingVariable(String),

    /// A configuration value violates its positivity requirement.
    #[error("configuration parameter {name} must be strictly positive, got {value}")]
    NonPositiveParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A discretization count must be at least one.
    #[error("configuration parameter {name} must be at least 1")]
    ZeroParameter {
        /// Parameter name.
        name: &'static str,
    },

    /// A sample stream does not have the expected number of entries.
    #[error("stream length mismatch: expected {expected} samples, got {found}")]
    StreamLength {
        /// Expected sample count (`n_k * d + 1`).
        expected: usize,
        /// Actual sample count.
        found: usize,
    },

    /// A shooting-interval / collocation index pair is out of range.
    #[error("sample index out of range: ndx {ndx} (n_k {n_k}), ddx {ddx} (d {d})")]
    SampleIndex {
        /// Shooting-interval index.
        ndx: usize,
        /// Collocation sub-step index.
        ddx: usize,
        /// Shooting-interval count.
        n_k: usize,
        /// Collocation order.
        d: usize,
    },

    /// A kite node is not part of the architecture.
    #[error("kite {0} is not part of the architecture")]
    UnknownKite(usize),

    /// Padded point and strength sequences imply different ring counts.
    #[error("padded geometry mismatch: {points} points for {rings} rings (need rings + 1)")]
    RingGeometry {
        /// Padded point rows per tip.
        points: usize,
        /// Padded strength entries (one per ring).
        rings: usize,
    },

    /// A convection direction with zero magnitude cannot be normalized.
    #[error("convection direction has zero magnitude")]
    DegenerateConvection,

    /// No observation point was supplied for a kite the sweep must cover.
    #[error("no observation supplied for kite {0}")]
    MissingObservation(usize),

    /// Normal-projected output was requested on rows without a normal.
    #[error("observation normal required for normal-projection output")]
    MissingNormal,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, WakeError>;
