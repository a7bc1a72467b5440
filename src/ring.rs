//! Vortex-ring filament construction.
//!
//! A wake is a chronological sequence of vortex rings per (kite, parent)
//! pair, bounded by two semi-infinite extension rings that model the
//! fully-convected part of the trail. Each ring emits exactly three straight
//! filaments; its fourth edge is shared with the adjacent ring and never
//! re-emitted, which is what keeps circulation conserved around every
//! closed cell.

use crate::config::Convection;
use crate::error::{Result, WakeError};
use crate::vector::Vec3;

/// One straight vortex filament with uniform circulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Filament {
    /// Segment start point.
    pub start: Vec3,
    /// Segment end point.
    pub end: Vec3,
    /// Circulation strength Γ.
    pub gamma: f64,
}

/// Pad a chronological wake-node sequence with the two pseudo-infinite
/// extension points, projected along the reference convection vector by
/// `far_wake_distance` on each side.
///
/// Panics on an empty sequence; the indexer never produces one.
pub fn pad_points(ordered: &[Vec3], convection: &Convection, far_wake_distance: f64) -> Vec<Vec3> {
    let leading = *ordered.first().expect("time-ordered point sequence is never empty");
    let trailing = *ordered.last().expect("time-ordered point sequence is never empty");
    let offset = convection.vector().mul(far_wake_distance);

    let mut padded = Vec::with_capacity(ordered.len() + 2);
    padded.push(leading.sub(&offset));
    padded.extend_from_slice(ordered);
    padded.push(trailing.add(&offset));
    padded
}

/// Pad a chronological circulation sequence for the extension rings: zero
/// strength on the most time-distant side, the terminal strength repeated on
/// the other. The padded length equals the ring count.
///
/// Panics on an empty sequence; the indexer never produces one.
pub fn pad_strengths(ordered: &[f64]) -> Vec<f64> {
    let trailing = *ordered.last().expect("time-ordered strength sequence is never empty");

    let mut padded = Vec::with_capacity(ordered.len() + 2);
    padded.push(0.0);
    padded.extend_from_slice(ordered);
    padded.push(trailing);
    padded
}

/// Emits the three explicit filaments of each vortex ring from the padded
/// per-tip point sequences and the padded strength sequence.
#[derive(Debug, Clone, Copy)]
pub struct RingFilamentBuilder<'a> {
    points_int: &'a [Vec3],
    points_ext: &'a [Vec3],
    strengths: &'a [f64],
}

impl<'a> RingFilamentBuilder<'a> {
    /// Build over padded sequences. Both tips must carry one point row more
    /// than there are strength entries (rings).
    pub fn new(
        points_int: &'a [Vec3],
        points_ext: &'a [Vec3],
        strengths: &'a [f64],
    ) -> Result<Self> {
        let rings = strengths.len();
        if points_int.len() != rings + 1 || points_ext.len() != rings + 1 {
            return Err(WakeError::RingGeometry {
                points: points_int.len().min(points_ext.len()),
                rings,
            });
        }
        Ok(Self { points_int, points_ext, strengths })
    }

    /// Number of rings, counting both extension rings.
    #[inline(always)]
    pub fn n_rings(&self) -> usize {
        self.strengths.len()
    }

    /// The three filaments of ring `rdx`.
    ///
    /// Panics if `rdx` lies outside `[1, n_rings)`: that is an integration
    /// bug in the caller, not a recoverable condition.
    pub fn ring_filaments(&self, rdx: usize) -> [Filament; 3] {
        assert!(
            rdx >= 1 && rdx < self.n_rings(),
            "ring index {rdx} outside [1, {})",
            self.n_rings()
        );

        let int_leading = self.points_int[rdx];
        let int_trailing = self.points_int[rdx + 1];
        let ext_leading = self.points_ext[rdx];
        let ext_trailing = self.points_ext[rdx + 1];

        let strength_leading = self.strengths[rdx];
        let strength_trailing = self.strengths[rdx - 1];

        [
            // interior trailing point -> interior leading point
            Filament { start: int_trailing, end: int_leading, gamma: strength_leading },
            // interior leading point -> exterior leading point; the shed
            // segment carries the difference to the neighboring ring
            Filament {
                start: int_leading,
                end: ext_leading,
                gamma: strength_leading - strength_trailing,
            },
            // exterior leading point -> exterior trailing point
            Filament { start: ext_leading, end: ext_trailing, gamma: strength_leading },
        ]
    }
}
