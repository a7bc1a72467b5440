//! Time ordering of wake sample streams.
//!
//! The optimization state stores each wake quantity as a flat stream of
//! `n_k * d + 1` samples per period: one dedicated period-start sample
//! followed by the regular `n_k × d` grid, laid out column-major (every
//! shooting interval of the first collocation sub-step, then the next
//! sub-step, and so on). The functions here reorder those streams into
//! strict chronological sequences, with index 0 holding the most
//! time-distant sample, and concatenate them across tracked periods so that
//! older periods precede the current one.

use std::collections::HashMap;

use crate::config::{KiteId, Quantity, Tip, VortexConfig};
use crate::error::{Result, WakeError};
use crate::vector::Vec3;

/// Position of one sample inside a per-period stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// The dedicated period-start sample.
    Start,
    /// A regular grid sample at shooting interval `ndx`, sub-step `ddx`.
    Regular {
        /// Shooting-interval index, `0 <= ndx < n_k`.
        ndx: usize,
        /// Collocation sub-step index, `0 <= ddx < d`.
        ddx: usize,
    },
}

fn check_stream_len<T>(stream: &[T], n_k: usize, d: usize) -> Result<()> {
    let expected = n_k * d + 1;
    if stream.len() != expected {
        return Err(WakeError::StreamLength { expected, found: stream.len() });
    }
    Ok(())
}

/// Pick one sample out of a raw per-period stream.
pub fn sample_at<T: Clone>(stream: &[T], n_k: usize, d: usize, sample: Sample) -> Result<T> {
    check_stream_len(stream, n_k, d)?;
    match sample {
        Sample::Start => Ok(stream[0].clone()),
        Sample::Regular { ndx, ddx } => {
            if ndx >= n_k || ddx >= d {
                return Err(WakeError::SampleIndex { ndx, ddx, n_k, d });
            }
            Ok(stream[1 + ddx * n_k + ndx].clone())
        }
    }
}

/// Reorder the regular grid of a stream into strict chronological order and
/// reverse it, so that index 0 is the most time-distant sample. The
/// period-start sample is dropped.
pub fn time_ordered_without_start<T: Clone>(stream: &[T], n_k: usize, d: usize) -> Result<Vec<T>> {
    check_stream_len(stream, n_k, d)?;
    let n_regular = n_k * d;
    let regular = &stream[1..];

    let mut ordered = Vec::with_capacity(n_regular);
    for k in 0..n_regular {
        // walk the (ndx, ddx) grid in reverse chronological rank
        let m = n_regular - 1 - k;
        let ndx = m / d;
        let ddx = m % d;
        ordered.push(regular[ddx * n_k + ndx].clone());
    }
    Ok(ordered)
}

/// Reorder a stream as [`time_ordered_without_start`] and splice the
/// period-start sample at the chronologically correct (newest) end.
pub fn time_ordered_with_start<T: Clone>(stream: &[T], n_k: usize, d: usize) -> Result<Vec<T>> {
    let mut ordered = time_ordered_without_start(stream, n_k, d)?;
    ordered.push(stream[0].clone());
    Ok(ordered)
}

/// Typed key of a per-period wake-node stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointKey {
    /// Shedding kite.
    pub kite: KiteId,
    /// Shedding wing tip.
    pub tip: Tip,
    /// Tracked period index, `0` oldest.
    pub period: usize,
}

/// Typed key of a per-period circulation-strength stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrengthKey {
    /// Shedding kite.
    pub kite: KiteId,
    /// Tracked period index, `0` oldest.
    pub period: usize,
}

/// Store of raw wake sample streams for one evaluation.
///
/// Streams are validated to `n_k * d + 1` entries at insertion and are
/// read-only afterwards. Position components arrive as three scalar streams
/// and are zipped into [`Vec3`] samples here.
#[derive(Debug, Clone)]
pub struct WakeVariables {
    n_k: usize,
    d: usize,
    positions: HashMap<PointKey, Vec<Vec3>>,
    velocities: HashMap<PointKey, Vec<Vec3>>,
    strengths: HashMap<StrengthKey, Vec<f64>>,
}

impl WakeVariables {
    /// Empty store sized for the given configuration.
    pub fn new(config: &VortexConfig) -> Self {
        Self {
            n_k: config.n_k,
            d: config.d,
            positions: HashMap::new(),
            velocities: HashMap::new(),
            strengths: HashMap::new(),
        }
    }

    fn point_map(&self, quantity: Quantity) -> &HashMap<PointKey, Vec<Vec3>> {
        match quantity {
            Quantity::Position => &self.positions,
            Quantity::Velocity => &self.velocities,
        }
    }

    /// Store the three scalar component streams of a wake-node quantity.
    pub fn insert_points(
        &mut self,
        quantity: Quantity,
        key: PointKey,
        x: &[f64],
        y: &[f64],
        z: &[f64],
    ) -> Result<()> {
        check_stream_len(x, self.n_k, self.d)?;
        check_stream_len(y, self.n_k, self.d)?;
        check_stream_len(z, self.n_k, self.d)?;

        let zipped: Vec<Vec3> = x
            .iter()
            .zip(y.iter())
            .zip(z.iter())
            .map(|((&x, &y), &z)| Vec3::new(x, y, z))
            .collect();

        match quantity {
            Quantity::Position => self.positions.insert(key, zipped),
            Quantity::Velocity => self.velocities.insert(key, zipped),
        };
        Ok(())
    }

    /// Store a circulation-strength stream.
    pub fn insert_strengths(&mut self, key: StrengthKey, gamma: &[f64]) -> Result<()> {
        check_stream_len(gamma, self.n_k, self.d)?;
        self.strengths.insert(key, gamma.to_vec());
        Ok(())
    }

    /// Raw stream of a wake-node quantity.
    pub fn point_stream(&self, quantity: Quantity, key: PointKey) -> Result<&[Vec3]> {
        self.point_map(quantity).get(&key).map(Vec::as_slice).ok_or_else(|| {
            WakeError::MissingVariable(format!(
                "{} stream (kite {}, {} tip, period {})",
                quantity, key.kite, key.tip, key.period
            ))
        })
    }

    /// Raw circulation-strength stream.
    pub fn strength_stream(&self, key: StrengthKey) -> Result<&[f64]> {
        self.strengths.get(&key).map(Vec::as_slice).ok_or_else(|| {
            WakeError::MissingVariable(format!(
                "strength stream (kite {}, period {})",
                key.kite, key.period
            ))
        })
    }

    /// One wake-node vector sample, by stream position.
    pub fn vector_at(&self, quantity: Quantity, key: PointKey, sample: Sample) -> Result<Vec3> {
        let stream = self.point_stream(quantity, key)?;
        sample_at(stream, self.n_k, self.d, sample)
    }

    /// One circulation-strength sample, by stream position.
    pub fn strength_at(&self, key: StrengthKey, sample: Sample) -> Result<f64> {
        let stream = self.strength_stream(key)?;
        sample_at(stream, self.n_k, self.d, sample)
    }

    /// Chronological wake-node sequence for one kite and tip across all
    /// tracked periods: fully reordered blocks for every period but the most
    /// recent, then the start-spliced block of the most recent period.
    /// Yields `periods_tracked * n_k * d + 1` samples.
    pub fn time_ordered_points(
        &self,
        quantity: Quantity,
        kite: KiteId,
        tip: Tip,
        periods_tracked: usize,
    ) -> Result<Vec<Vec3>> {
        let mut all_ordered = Vec::with_capacity(periods_tracked * self.n_k * self.d + 1);
        for period in 0..periods_tracked {
            let stream = self.point_stream(quantity, PointKey { kite, tip, period })?;
            let ordered = if period + 1 < periods_tracked {
                time_ordered_without_start(stream, self.n_k, self.d)?
            } else {
                time_ordered_with_start(stream, self.n_k, self.d)?
            };
            all_ordered.extend(ordered);
        }
        Ok(all_ordered)
    }

    /// Chronological circulation sequence for one kite across all tracked
    /// periods. Strength streams carry no spliced start entry in ring
    /// assembly, so every period block is reordered without it; yields
    /// `periods_tracked * n_k * d` samples.
    pub fn time_ordered_strengths(&self, kite: KiteId, periods_tracked: usize) -> Result<Vec<f64>> {
        let mut all_ordered = Vec::with_capacity(periods_tracked * self.n_k * self.d);
        for period in 0..periods_tracked {
            let stream = self.strength_stream(StrengthKey { kite, period })?;
            all_ordered.extend(time_ordered_without_start(stream, self.n_k, self.d)?);
        }
        Ok(all_ordered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const N_K: usize = 3;
    const D: usize = 2;

    /// Stream whose regular grid holds each sample's chronological rank,
    /// stored in the column-major optimization-state layout, with 99.0 as
    /// the period-start sample.
    fn synthetic_stream() -> Vec<f64> {
        let mut stream = vec![0.0; N_K * D + 1];
        stream[0] = 99.0;
        for ndx in 0..N_K {
            for ddx in 0..D {
                stream[1 + ddx * N_K + ndx] = (ndx * D + ddx) as f64;
            }
        }
        stream
    }

    fn test_config() -> VortexConfig {
        VortexConfig::custom(1e-2, N_K, D, 2, 1000.0).unwrap()
    }

    #[test]
    fn test_reorder_round_trip() {
        let stream = synthetic_stream();
        let ordered = time_ordered_without_start(&stream, N_K, D).unwrap();

        // index 0 most time-distant; reversing reproduces chronological rank
        let mut reversed = ordered.clone();
        reversed.reverse();
        let expected: Vec<f64> = (0..N_K * D).map(|m| m as f64).collect();
        assert_eq!(reversed, expected);
    }

    #[test]
    fn test_start_sample_spliced_at_newest_end() {
        let stream = synthetic_stream();
        let ordered = time_ordered_with_start(&stream, N_K, D).unwrap();
        assert_eq!(ordered.len(), N_K * D + 1);
        assert_eq!(*ordered.last().unwrap(), 99.0);
        assert_eq!(ordered[..N_K * D], time_ordered_without_start(&stream, N_K, D).unwrap());
    }

    #[test]
    fn test_reorder_rejects_bad_length() {
        let err = time_ordered_without_start(&[0.0; 5], N_K, D).unwrap_err();
        assert!(matches!(err, WakeError::StreamLength { expected: 7, found: 5 }));
    }

    #[test]
    fn test_sample_accessor() {
        let stream = synthetic_stream();
        assert_eq!(sample_at(&stream, N_K, D, Sample::Start).unwrap(), 99.0);
        let v = sample_at(&stream, N_K, D, Sample::Regular { ndx: 1, ddx: 1 }).unwrap();
        assert_eq!(v, 3.0);
        assert!(matches!(
            sample_at(&stream, N_K, D, Sample::Regular { ndx: N_K, ddx: 0 }).unwrap_err(),
            WakeError::SampleIndex { .. }
        ));
    }

    #[test]
    fn test_store_round_trip_and_missing() {
        let config = test_config();
        let mut variables = WakeVariables::new(&config);
        let stream = synthetic_stream();
        let key = PointKey { kite: 2, tip: Tip::Interior, period: 0 };
        variables.insert_points(Quantity::Position, key, &stream, &stream, &stream).unwrap();

        let v = variables
            .vector_at(Quantity::Position, key, Sample::Regular { ndx: 0, ddx: 1 })
            .unwrap();
        assert_eq!(v, Vec3::new(1.0, 1.0, 1.0));

        let missing = PointKey { kite: 2, tip: Tip::Exterior, period: 0 };
        assert!(matches!(
            variables.point_stream(Quantity::Position, missing).unwrap_err(),
            WakeError::MissingVariable(_)
        ));
    }

    #[test]
    fn test_strength_accessor() {
        let config = test_config();
        let mut variables = WakeVariables::new(&config);
        let key = StrengthKey { kite: 2, period: 0 };
        variables.insert_strengths(key, &synthetic_stream()).unwrap();

        assert_eq!(variables.strength_at(key, Sample::Start).unwrap(), 99.0);
        let g = variables.strength_at(key, Sample::Regular { ndx: 2, ddx: 0 }).unwrap();
        assert_eq!(g, 4.0);
    }

    #[test]
    fn test_velocity_streams_are_kept_separately() {
        let config = test_config();
        let mut variables = WakeVariables::new(&config);
        let stream = synthetic_stream();
        let key = PointKey { kite: 2, tip: Tip::Interior, period: 0 };
        variables.insert_points(Quantity::Velocity, key, &stream, &stream, &stream).unwrap();

        let dw = variables.vector_at(Quantity::Velocity, key, Sample::Start).unwrap();
        assert_eq!(dw, Vec3::new(99.0, 99.0, 99.0));
        assert!(matches!(
            variables.point_stream(Quantity::Position, key).unwrap_err(),
            WakeError::MissingVariable(_)
        ));
    }

    #[test]
    fn test_store_rejects_bad_length() {
        let config = test_config();
        let mut variables = WakeVariables::new(&config);
        let short = vec![0.0; N_K * D];
        let key = StrengthKey { kite: 2, period: 0 };
        assert!(matches!(
            variables.insert_strengths(key, &short).unwrap_err(),
            WakeError::StreamLength { .. }
        ));
    }

    #[test]
    fn test_period_concatenation() {
        let config = test_config();
        let mut variables = WakeVariables::new(&config);
        let older: Vec<f64> = synthetic_stream();
        let newer: Vec<f64> = synthetic_stream().iter().map(|v| v + 100.0).collect();
        for (period, stream) in [(0, &older), (1, &newer)] {
            let key = PointKey { kite: 2, tip: Tip::Interior, period };
            variables.insert_points(Quantity::Position, key, stream, stream, stream).unwrap();
        }

        let points = variables
            .time_ordered_points(Quantity::Position, 2, Tip::Interior, 2)
            .unwrap();
        // older period first, no start splice; newest period last, spliced
        assert_eq!(points.len(), 2 * N_K * D + 1);
        assert_eq!(points[0].x, (N_K * D - 1) as f64);
        assert_eq!(points.last().unwrap().x, 199.0);

        let mut strength_vars = WakeVariables::new(&config);
        for (period, stream) in [(0, &older), (1, &newer)] {
            strength_vars.insert_strengths(StrengthKey { kite: 2, period }, stream).unwrap();
        }
        let strengths = strength_vars.time_ordered_strengths(2, 2).unwrap();
        assert_eq!(strengths.len(), 2 * N_K * D);
        assert_eq!(strengths[0], (N_K * D - 1) as f64);
        assert_eq!(*strengths.last().unwrap(), 100.0);
    }
}
