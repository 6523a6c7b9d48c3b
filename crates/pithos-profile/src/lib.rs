#![warn(missing_docs)]

//! Profile normalization for the pithos vessel analyzer.
//!
//! A raw profile arrives from an extraction collaborator (e.g. a drawing
//! parser) as an unordered, possibly duplicate-containing set of
//! `(height, radius)` samples with measurement noise that can push radii
//! to or below zero. [`ProfileCurve::from_samples`] canonicalizes that
//! into the frozen curve every downstream computation operates on:
//!
//! - radii clamped up to a small positive floor,
//! - samples sorted by height, duplicate heights collapsed keeping the
//!   first radius per height,
//! - a synthetic base sample at height 0 prepended when the lowest known
//!   height is not already at the base,
//! - at least 2 distinct heights required, construction fails otherwise.
//!
//! The curve is immutable after construction; derived data (interpolants,
//! volumes, meshes) is always computed from copies or borrows.

use pithos_interp::{InterpError, Interpolant};
use pithos_math::Tolerance;
use thiserror::Error;

/// Errors that can occur while normalizing a profile.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// Fewer than 2 distinct heights remain after deduplication. This is
    /// fatal for the profile: no volume, mesh, or classification can be
    /// computed from it.
    #[error("too few distinct profile points: {actual} (at least 2 required)")]
    TooFewPoints {
        /// Distinct heights remaining after normalization.
        actual: usize,
    },

    /// A sample contained a NaN or infinite coordinate.
    #[error("non-finite sample at input index {0}")]
    NonFiniteSample(usize),

    /// Resampling was requested with fewer than 2 output points.
    #[error("resampling requires at least 2 points, got {0}")]
    InvalidResampleCount(usize),

    /// Interpolant construction failed during resampling.
    #[error("interpolation failed: {0}")]
    Interp(#[from] InterpError),
}

/// Result type for profile operations.
pub type Result<T> = std::result::Result<T, ProfileError>;

/// A normalized, immutable vessel profile: heights strictly increasing,
/// first height anchored at the vessel base, radii at or above the
/// positive floor.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileCurve {
    heights: Vec<f64>,
    radii: Vec<f64>,
}

impl ProfileCurve {
    /// Normalize raw `(height, radius)` samples into a profile curve.
    pub fn from_samples(samples: &[(f64, f64)]) -> Result<Self> {
        Self::from_samples_with_tolerance(samples, Tolerance::DEFAULT)
    }

    /// Normalize with explicit tolerances.
    pub fn from_samples_with_tolerance(samples: &[(f64, f64)], tol: Tolerance) -> Result<Self> {
        for (i, (h, r)) in samples.iter().enumerate() {
            if !h.is_finite() || !r.is_finite() {
                return Err(ProfileError::NonFiniteSample(i));
            }
        }

        // Clamp radii before sorting: the floor applies to every sample,
        // including ones later dropped as duplicates.
        let mut points: Vec<(f64, f64)> = samples
            .iter()
            .map(|&(h, r)| (h, tol.clamp_radius(r)))
            .collect();

        // Stable sort keeps the first-seen radius in front among equal
        // heights, so dedup below preserves it.
        points.sort_by(|a, b| a.0.partial_cmp(&b.0).expect("finite heights"));
        points.dedup_by(|next, prev| next.0 == prev.0);

        if points.len() < 2 {
            return Err(ProfileError::TooFewPoints {
                actual: points.len(),
            });
        }

        // Anchor the profile at the vessel base, reusing the lowest known
        // radius for the synthetic sample.
        if points[0].0 > tol.height {
            points.insert(0, (0.0, points[0].1));
        }

        let (heights, radii) = points.into_iter().unzip();
        Ok(Self { heights, radii })
    }

    /// Number of samples in the curve.
    pub fn sample_count(&self) -> usize {
        self.heights.len()
    }

    /// Heights, strictly increasing, first at the base.
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Radii, all at or above the positive floor.
    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    /// Iterate `(height, radius)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.heights.iter().copied().zip(self.radii.iter().copied())
    }

    /// Height of the first (base) sample.
    pub fn base_height(&self) -> f64 {
        self.heights[0]
    }

    /// Height of the last (rim) sample.
    pub fn max_height(&self) -> f64 {
        *self.heights.last().expect("at least 2 samples")
    }

    /// Largest radius in the profile.
    pub fn max_radius(&self) -> f64 {
        self.radii.iter().copied().fold(f64::MIN, f64::max)
    }

    /// Resample the curve at `n` uniformly spaced heights from the base
    /// to the rim, through the smooth interpolant. Negative interpolated
    /// radii are clamped to zero before renormalization.
    ///
    /// Extraction collaborators use this to canonicalize densely
    /// digitized profiles to a fixed sample count.
    pub fn resample(&self, n: usize) -> Result<Self> {
        if n < 2 {
            return Err(ProfileError::InvalidResampleCount(n));
        }
        let interp = Interpolant::fit(&self.heights, &self.radii)?;
        let (lo, hi) = (self.base_height(), self.max_height());
        let step = (hi - lo) / (n - 1) as f64;
        let samples: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                let h = lo + step * i as f64;
                (h, interp.eval(h).max(0.0))
            })
            .collect();
        log::debug!(
            "resampled profile: {} -> {} points",
            self.sample_count(),
            n
        );
        Self::from_samples(&samples)
    }
}
