//! Induction aggregation over the segment table.
//!
//! The kernel is mapped over the table rows in parallel (rows are
//! independent, the kernel is pure), but per-row velocities are collected in
//! table order and reduced by a sequential sum. Summation order is therefore
//! fixed: repeated evaluations with identical inputs produce bit-identical
//! results regardless of thread count.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::biot_savart;
use crate::config::{KiteId, OutputMode};
use crate::error::{Result, WakeError};
use crate::filament::{FilamentList, FilamentListAssembler, Observation};
use crate::vector::Vec3;

/// Induction result for one observation point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InducedQuantity {
    /// Full induced-velocity vector.
    Velocity(Vec3),
    /// Scalar projection onto the observation surface normal.
    NormalProjection(f64),
}

/// Total induced velocity at the table's observation point: kernel mapped
/// over every row, summed in row order.
pub fn induced_velocity(list: &FilamentList) -> Vec3 {
    let per_row: Vec<Vec3> =
        list.segments().par_iter().map(biot_savart::filament_induction).collect();
    per_row.iter().fold(Vec3::zero(), |total, row| total.add(row))
}

/// Induced velocity projected onto the per-row observation normal and
/// summed in row order. Every row must carry a normal.
pub fn induced_normal_velocity(list: &FilamentList) -> Result<f64> {
    let per_row: Result<Vec<f64>> = list
        .segments()
        .par_iter()
        .map(|segment| {
            segment
                .normal
                .map(|normal| biot_savart::filament_induction(segment).dot(&normal))
                .ok_or(WakeError::MissingNormal)
        })
        .collect();
    Ok(per_row?.iter().sum())
}

/// Induction in the requested output shape.
pub fn induced(list: &FilamentList, mode: OutputMode) -> Result<InducedQuantity> {
    match mode {
        OutputMode::Velocity => Ok(InducedQuantity::Velocity(induced_velocity(list))),
        OutputMode::NormalProjection => {
            Ok(InducedQuantity::NormalProjection(induced_normal_velocity(list)?))
        }
    }
}

/// Induction at every kite of the architecture: the full filament table is
/// assembled once, then joined per kite with that kite's observation
/// context and reduced. Results come back in architecture sweep order.
pub fn induction_at_kites(
    assembler: &FilamentListAssembler<'_>,
    observations: &HashMap<KiteId, Observation>,
    mode: OutputMode,
) -> Result<Vec<(KiteId, InducedQuantity)>> {
    let filaments = assembler.all_filaments()?;

    let mut results = Vec::with_capacity(assembler.architecture().kites().len());
    for &kite in assembler.architecture().kites() {
        let observation =
            observations.get(&kite).ok_or(WakeError::MissingObservation(kite))?;
        let list = assembler.observed(&filaments, observation);
        results.push((kite, induced(&list, mode)?));
    }
    Ok(results)
}
