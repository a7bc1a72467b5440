//! 3D vector operations for wake geometry and induction calculations.

use serde::{Deserialize, Serialize};

/// Floor added under every smoothed norm, so that norms stay differentiable
/// at exactly zero separation.
pub const SMOOTH_NORM_FLOOR: f64 = 1e-8;

/// 3D vector with utility methods for vortex-wake computations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Creates a new vector.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Zero vector.
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0 }
    }

    /// Unit vector in X direction (reference wind direction).
    pub const fn xhat() -> Self {
        Self { x: 1.0, y: 0.0, z: 0.0 }
    }

    /// Unit vector in Y direction.
    pub const fn yhat() -> Self {
        Self { x: 0.0, y: 1.0, z: 0.0 }
    }

    /// Unit vector in Z direction (up).
    pub const fn zhat() -> Self {
        Self { x: 0.0, y: 0.0, z: 1.0 }
    }

    /// Magnitude (length) of the vector.
    #[inline(always)]
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Squared magnitude (avoids sqrt, cheaper for comparisons).
    #[inline(always)]
    pub fn magnitude_sq(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Smoothed magnitude: `sqrt(|v|² + floor²)`.
    ///
    /// Strictly positive everywhere, so expressions built on it keep a
    /// well-defined derivative even when the vector vanishes.
    #[inline(always)]
    pub fn smooth_norm(&self) -> f64 {
        (self.magnitude_sq() + SMOOTH_NORM_FLOOR * SMOOTH_NORM_FLOOR).sqrt()
    }

    /// Normalized vector (unit length).
    pub fn normalized(&self) -> Option<Self> {
        let mag = self.magnitude();
        if mag < 1e-12 {
            None
        } else {
            let inv = 1.0 / mag;
            Some(Self::new(self.x * inv, self.y * inv, self.z * inv))
        }
    }

    /// Dot product.
    #[inline(always)]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product: self × other
    #[inline(always)]
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Element-wise addition.
    #[inline(always)]
    pub fn add(&self, other: &Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    /// Element-wise subtraction.
    #[inline(always)]
    pub fn sub(&self, other: &Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Scalar multiplication.
    #[inline(always)]
    pub fn mul(&self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }

    /// Distance to another vector.
    pub fn distance(&self, other: &Self) -> f64 {
        self.sub(other).magnitude()
    }

    /// Convert to array.
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Convert from array.
    pub fn from_array(arr: &[f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}
