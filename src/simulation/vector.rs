//! Fixed-dimension vector value type used by the whole simulation
//!
//! `Vector<D>` wraps an `nalgebra` static vector and exposes named
//! operations only (`add`, `sub`, `scale`, `magnitude`, `normalize`).
//! The dimension is part of the type, so binary operations between
//! different dimensions do not compile; the one runtime check left is
//! building a vector from a slice (`from_slice`)

use std::fmt;
use std::ops::Index;

use nalgebra::SVector;

use crate::error::VectorError;

/// Immutable numeric vector of dimension `D`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const D: usize>(SVector<f64, D>);

/// Planar vector, the only dimension the simulation uses
pub type Vec2 = Vector<2>;

impl<const D: usize> Vector<D> {
    pub fn new(coords: [f64; D]) -> Self {
        Self(SVector::from(coords))
    }

    pub fn zeros() -> Self {
        Self(SVector::zeros())
    }

    /// Build from a slice; fails unless it has exactly `D` components
    pub fn from_slice(coords: &[f64]) -> Result<Self, VectorError> {
        if coords.len() != D {
            return Err(VectorError::DimensionMismatch {
                expected: D,
                found: coords.len(),
            });
        }
        Ok(Self(SVector::from_column_slice(coords)))
    }

    pub fn dimension(&self) -> usize {
        D
    }

    pub fn as_slice(&self) -> &[f64] {
        self.0.as_slice()
    }

    pub fn add(&self, other: &Self) -> Self {
        Self(self.0 + other.0)
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self(self.0 - other.0)
    }

    /// Multiply every component by `k`
    pub fn scale(&self, k: f64) -> Self {
        Self(self.0 * k)
    }

    /// Sum of squared components, no square root
    pub fn magnitude_squared(&self) -> f64 {
        self.0.norm_squared()
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Unit vector along `self`, i.e. `self` scaled by `1 / |self|`
    pub fn normalize(&self) -> Result<Self, VectorError> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Err(VectorError::ZeroVector);
        }
        Ok(self.scale(1.0 / magnitude))
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }
}

impl Vec2 {
    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }
}

impl<const D: usize> Default for Vector<D> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<const D: usize> From<[f64; D]> for Vector<D> {
    fn from(coords: [f64; D]) -> Self {
        Self::new(coords)
    }
}

impl<const D: usize> Index<usize> for Vector<D> {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

// printed as a tuple: (x, y)
impl<const D: usize> fmt::Display for Vector<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}
