#![warn(missing_docs)]

//! Multi-method volume integration for axisymmetric vessel profiles.
//!
//! This crate computes the enclosed volume of a vessel from its
//! normalized `(height, radius)` profile by five independent numerical
//! methods, and cross-validates them against the spline-integral
//! reference:
//!
//! - **Disks**: trapezoidal quadrature directly over the original
//!   samples; no smoothing.
//! - **Frustums**: exact conical frustum volume per sample segment.
//! - **Trapezoidal**: fine uniform resampling of the smooth
//!   interpolant, trapezoidal rule.
//! - **Simpson**: uniform resampling, Simpson's rule.
//! - **SplineIntegral**: dense resampling, Simpson's rule; the
//!   reference method.
//!
//! # Example
//!
//! ```
//! use pithos_profile::ProfileCurve;
//! use pithos_volume::{VolumeCalculator, VolumeMethod};
//!
//! let curve = ProfileCurve::from_samples(&[
//!     (0.0, 5.0), (3.0, 5.0), (7.0, 5.0), (10.0, 5.0),
//! ]).unwrap();
//! let calc = VolumeCalculator::new(curve).unwrap();
//! let full = calc.volume(VolumeMethod::SplineIntegral, None).unwrap();
//! assert!((full - std::f64::consts::PI * 25.0 * 10.0).abs() < 1.0);
//! ```

pub mod compare;
pub mod error;
pub mod quad;

mod calculator;

pub use calculator::VolumeCalculator;
pub use compare::{Agreement, MethodComparison, MethodDeviation, MethodVolume};
pub use error::{Result, VolumeError};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five volume-integration methods. A closed set: identifiers that
/// do not name one of these fail to parse instead of silently falling
/// back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeMethod {
    /// Disk stacking over the raw samples.
    Disks,
    /// Conical frustums over the raw samples.
    Frustums,
    /// Trapezoidal rule over a smooth resampling.
    Trapezoidal,
    /// Simpson's rule over a smooth resampling.
    Simpson,
    /// Dense Simpson integration of the smooth fit; the reference.
    SplineIntegral,
}

impl VolumeMethod {
    /// All methods in canonical order.
    pub const ALL: [VolumeMethod; 5] = [
        VolumeMethod::Disks,
        VolumeMethod::Frustums,
        VolumeMethod::Trapezoidal,
        VolumeMethod::Simpson,
        VolumeMethod::SplineIntegral,
    ];

    /// The method every other method is compared against.
    pub const REFERENCE: VolumeMethod = VolumeMethod::SplineIntegral;

    /// Canonical identifier, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Disks => "disks",
            Self::Frustums => "frustums",
            Self::Trapezoidal => "trapezoidal",
            Self::Simpson => "simpson",
            Self::SplineIntegral => "spline",
        }
    }

    /// Human-readable description for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Disks => "disk stacking (raw samples)",
            Self::Frustums => "conical frustums",
            Self::Trapezoidal => "trapezoidal rule (smooth resampling)",
            Self::Simpson => "Simpson's rule (smooth resampling)",
            Self::SplineIntegral => "spline integral (reference)",
        }
    }
}

impl fmt::Display for VolumeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VolumeMethod {
    type Err = VolumeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "disks" => Ok(Self::Disks),
            "frustums" => Ok(Self::Frustums),
            "trapezoidal" => Ok(Self::Trapezoidal),
            "simpson" => Ok(Self::Simpson),
            "spline" => Ok(Self::SplineIntegral),
            other => Err(VolumeError::UnknownMethod(other.to_string())),
        }
    }
}

/// Resampling point counts for the interpolant-based methods.
///
/// The defaults match the method definitions (2000 / 501 / 1001); all
/// three are caller-overridable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QuadratureSettings {
    /// Grid size for the trapezoidal method.
    pub trapezoidal_points: usize,
    /// Grid size for the Simpson method (bumped to odd when even).
    pub simpson_points: usize,
    /// Grid size for the spline-integral method (bumped to odd when
    /// even).
    pub spline_points: usize,
}

impl Default for QuadratureSettings {
    fn default() -> Self {
        Self {
            trapezoidal_points: 2000,
            simpson_points: 501,
            spline_points: 1001,
        }
    }
}

impl QuadratureSettings {
    /// Validate settings: every grid needs at least 3 points.
    pub fn validate(&self) -> Result<()> {
        for (name, n) in [
            ("trapezoidal_points", self.trapezoidal_points),
            ("simpson_points", self.simpson_points),
            ("spline_points", self.spline_points),
        ] {
            if n < 3 {
                return Err(VolumeError::InvalidSettings(format!(
                    "{name} must be at least 3, got {n}"
                )));
            }
        }
        Ok(())
    }
}
