//! Assembly of the flat filament table.
//!
//! The assembler sweeps every kite, tracked period and ring index, emits the
//! ring filaments and concatenates them into one order-independent table.
//! Observation context (the evaluation point, the regularization radius and
//! an optional surface normal) is attached per row, so each row can be fed
//! to the Biot-Savart kernel independently of all others. No physics is
//! solved here; the row count is fully determined by the configuration and
//! the architecture.

use ndarray::Array2;

use crate::config::{Architecture, Convection, KiteId, Quantity, Tip, VortexConfig};
use crate::error::Result;
use crate::ring::{Filament, RingFilamentBuilder, pad_points, pad_strengths};
use crate::vector::Vec3;
use crate::wake::WakeVariables;

/// Observation context for one induction query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Evaluation point, typically the kite reference position.
    pub point: Vec3,
    /// Optional unit surface normal for directional queries.
    pub normal: Option<Vec3>,
}

impl Observation {
    /// Observation at a point, without directional information.
    pub fn at(point: Vec3) -> Self {
        Self { point, normal: None }
    }

    /// Observation at a point with a surface normal attached.
    pub fn with_normal(point: Vec3, normal: Vec3) -> Self {
        Self { point, normal: Some(normal) }
    }
}

/// One row of the flat segment table: a filament joined with its
/// observation context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservedSegment {
    /// Observation point.
    pub observer: Vec3,
    /// Filament start point.
    pub start: Vec3,
    /// Filament end point.
    pub end: Vec3,
    /// Circulation strength Γ.
    pub gamma: f64,
    /// Regularization radius ε, uniform across one evaluation.
    pub epsilon: f64,
    /// Optional observation surface normal.
    pub normal: Option<Vec3>,
}

/// Flat, order-independent table of observed filament segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilamentList {
    segments: Vec<ObservedSegment>,
}

impl FilamentList {
    /// Table from pre-built rows, for diagnostics and tests.
    pub fn from_segments(segments: Vec<ObservedSegment>) -> Self {
        Self { segments }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Table rows.
    pub fn segments(&self) -> &[ObservedSegment] {
        &self.segments
    }

    /// Export the table as a dense matrix for diagnostics and reuse.
    ///
    /// Row layout: observer (3), start (3), end (3), Γ, ε, with the normal
    /// (3) appended when every row carries one.
    pub fn to_array(&self) -> Array2<f64> {
        let with_normal = !self.segments.is_empty() && self.segments.iter().all(|s| s.normal.is_some());
        let ncols = if with_normal { 14 } else { 11 };

        let mut table: Array2<f64> = Array2::zeros((self.segments.len(), ncols));
        for (i, segment) in self.segments.iter().enumerate() {
            let mut row = table.row_mut(i);
            row[0] = segment.observer.x;
            row[1] = segment.observer.y;
            row[2] = segment.observer.z;
            row[3] = segment.start.x;
            row[4] = segment.start.y;
            row[5] = segment.start.z;
            row[6] = segment.end.x;
            row[7] = segment.end.y;
            row[8] = segment.end.z;
            row[9] = segment.gamma;
            row[10] = segment.epsilon;
            if with_normal {
                if let Some(normal) = segment.normal {
                    row[11] = normal.x;
                    row[12] = normal.y;
                    row[13] = normal.z;
                }
            }
        }
        table
    }
}

/// Builds the flat filament table for one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct FilamentListAssembler<'a> {
    config: &'a VortexConfig,
    convection: Convection,
    architecture: &'a Architecture,
    variables: &'a WakeVariables,
}

impl<'a> FilamentListAssembler<'a> {
    /// New assembler over read-only evaluation state. The configuration is
    /// validated once here.
    pub fn new(
        config: &'a VortexConfig,
        convection: Convection,
        architecture: &'a Architecture,
        variables: &'a WakeVariables,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, convection, architecture, variables })
    }

    /// The architecture this assembler sweeps.
    pub fn architecture(&self) -> &Architecture {
        self.architecture
    }

    fn padded_strengths(&self, kite: KiteId) -> Result<Vec<f64>> {
        let ordered =
            self.variables.time_ordered_strengths(kite, self.config.periods_tracked)?;
        Ok(pad_strengths(&ordered))
    }

    fn padded_points(&self, kite: KiteId, tip: Tip) -> Result<Vec<Vec3>> {
        let ordered = self.variables.time_ordered_points(
            Quantity::Position,
            kite,
            tip,
            self.config.periods_tracked,
        )?;
        Ok(pad_points(&ordered, &self.convection, self.config.far_wake_distance))
    }

    /// All filaments shed by one kite, across every tracked ring.
    pub fn filaments_for_kite(&self, kite: KiteId) -> Result<Vec<Filament>> {
        self.architecture.parent_of(kite)?;

        let strengths = self.padded_strengths(kite)?;
        let points_int = self.padded_points(kite, Tip::Interior)?;
        let points_ext = self.padded_points(kite, Tip::Exterior)?;
        let builder = RingFilamentBuilder::new(&points_int, &points_ext, &strengths)?;

        let mut filaments = Vec::with_capacity(3 * (builder.n_rings() - 1));
        for rdx in 1..builder.n_rings() {
            filaments.extend(builder.ring_filaments(rdx));
        }
        Ok(filaments)
    }

    /// The three filaments of a single ring of one kite, for diagnostics.
    pub fn filaments_for_ring(&self, kite: KiteId, rdx: usize) -> Result<[Filament; 3]> {
        self.architecture.parent_of(kite)?;

        let strengths = self.padded_strengths(kite)?;
        let points_int = self.padded_points(kite, Tip::Interior)?;
        let points_ext = self.padded_points(kite, Tip::Exterior)?;
        let builder = RingFilamentBuilder::new(&points_int, &points_ext, &strengths)?;
        Ok(builder.ring_filaments(rdx))
    }

    /// Bare filament list over every kite in the architecture, in sweep
    /// order. Exposed for reuse by external diagnostics.
    pub fn all_filaments(&self) -> Result<Vec<Filament>> {
        let mut filaments = Vec::new();
        for &kite in self.architecture.kites() {
            filaments.extend(self.filaments_for_kite(kite)?);
        }
        Ok(filaments)
    }

    /// Join a filament list with one observation context.
    pub fn observed(&self, filaments: &[Filament], observation: &Observation) -> FilamentList {
        let segments = filaments
            .iter()
            .map(|filament| ObservedSegment {
                observer: observation.point,
                start: filament.start,
                end: filament.end,
                gamma: filament.gamma,
                epsilon: self.config.epsilon,
                normal: observation.normal,
            })
            .collect();
        FilamentList { segments }
    }

    /// The full observed segment table for one observation point: every
    /// filament of every kite, joined with the observation context.
    pub fn segment_table(&self, observation: &Observation) -> Result<FilamentList> {
        let filaments = self.all_filaments()?;
        Ok(self.observed(&filaments, observation))
    }
}
