#![warn(missing_docs)]

//! Math types for the pithos vessel analyzer.
//!
//! Thin wrappers around nalgebra providing the shared types for
//! axisymmetric vessel geometry: 3D points for revolution meshes,
//! 2D points for profile curves, and the tolerance constants used
//! during profile normalization.

use nalgebra::Vector3;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A point in the profile plane: `x` is height along the axis of
/// symmetry, `y` is radius.
pub type Point2 = nalgebra::Point2<f64>;

/// Tolerance constants for profile normalization and geometric
/// comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Heights closer than this to zero are treated as already anchored
    /// at the vessel base (cm).
    pub height: f64,
    /// Minimum radius a normalized profile sample may carry (cm).
    /// Radii at or below zero are clamped up to this floor.
    pub radius_floor: f64,
}

impl Tolerance {
    /// Default tolerances for digitized vessel drawings
    /// (0.01 cm base anchor, 0.001 cm radius floor).
    pub const DEFAULT: Self = Self {
        height: 0.01,
        radius_floor: 0.001,
    };

    /// Check if a height is effectively at the vessel base.
    pub fn at_base(&self, h: f64) -> bool {
        h.abs() <= self.height
    }

    /// Clamp a measured radius up to the positive floor.
    pub fn clamp_radius(&self, r: f64) -> f64 {
        r.max(self.radius_floor)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_radius() {
        let tol = Tolerance::DEFAULT;
        assert_eq!(tol.clamp_radius(-2.0), 0.001);
        assert_eq!(tol.clamp_radius(0.0), 0.001);
        assert_eq!(tol.clamp_radius(5.0), 5.0);
    }

    #[test]
    fn test_at_base() {
        let tol = Tolerance::DEFAULT;
        assert!(tol.at_base(0.0));
        assert!(tol.at_base(0.009));
        assert!(!tol.at_base(0.02));
    }
}
