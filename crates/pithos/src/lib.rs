#![warn(missing_docs)]

//! High-level facade for the pithos vessel analysis toolkit.
//!
//! Re-exports the component crates and provides the end-to-end entry
//! points an extraction collaborator drives: analyze one profile's raw
//! samples into a volume and classification, process batches of
//! profiles sequentially with per-item error isolation, and bridge a
//! normalized curve through RDP simplification ahead of mesh
//! generation.
//!
//! # Example
//!
//! ```
//! use pithos::analyze_samples;
//!
//! // A cylinder, radius 5 cm and height 10 cm: ~785.4 cm³.
//! let analysis = analyze_samples(
//!     "cylinder",
//!     &[(0.0, 5.0), (3.0, 5.0), (7.0, 5.0), (10.0, 5.0)],
//! )
//! .unwrap();
//! assert_eq!(analysis.classification.entry.group, "VI");
//! ```

pub use pithos_classify::{
    classify, classify_liters, Classification, ClassificationEntry, MobilityClass, RangePosition,
    TSETLIN_SCALE,
};
pub use pithos_interp::{InterpError, Interpolant, InterpolantKind, LinearInterp};
pub use pithos_math::{Point2, Point3, Tolerance, Vec3};
pub use pithos_mesh::{stl, MeshError, RevolutionMesh, TriangleMesh};
pub use pithos_profile::{ProfileCurve, ProfileError};
pub use pithos_simplify::{perpendicular_distance, simplify, simplify_indices};
pub use pithos_volume::{
    Agreement, MethodComparison, MethodDeviation, MethodVolume, QuadratureSettings,
    VolumeCalculator, VolumeError, VolumeMethod,
};

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Method used for the initial volume estimate right after extraction.
///
/// Deliberately the cheap smoothing-free Disks method regardless of any
/// configured default: the first number shown for a freshly extracted
/// profile reflects the raw digitized points. Recomputations at a
/// chosen method or fill level go through [`VolumeCalculator::volume`].
pub const INITIAL_VOLUME_METHOD: VolumeMethod = VolumeMethod::Disks;

/// Errors from end-to-end profile analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Profile normalization failed.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// Volume computation failed.
    #[error(transparent)]
    Volume(#[from] VolumeError),
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Summary of one analyzed vessel profile.
#[derive(Debug, Clone, Serialize)]
pub struct VesselAnalysis {
    /// Identifier of the source profile (typically the file stem).
    pub name: String,
    /// Samples in the normalized curve.
    pub sample_count: usize,
    /// Vessel height, cm.
    pub height: f64,
    /// Largest diameter, cm.
    pub max_diameter: f64,
    /// Initial volume estimate, cm³ (see [`INITIAL_VOLUME_METHOD`]).
    pub volume_cm3: f64,
    /// Assignment on the Tsetlin scale.
    pub classification: Classification,
}

/// Normalize raw samples and analyze the resulting curve.
pub fn analyze_samples(name: &str, samples: &[(f64, f64)]) -> Result<VesselAnalysis> {
    let curve = ProfileCurve::from_samples(samples)?;
    analyze_curve(name, curve)
}

/// Analyze an already-normalized curve: initial volume estimate plus
/// classification.
pub fn analyze_curve(name: &str, curve: ProfileCurve) -> Result<VesselAnalysis> {
    let sample_count = curve.sample_count();
    let height = curve.max_height();
    let max_diameter = curve.max_radius() * 2.0;

    let calc = VolumeCalculator::new(curve)?;
    let volume_cm3 = calc.volume(INITIAL_VOLUME_METHOD, None)?;
    let classification = classify(volume_cm3);

    Ok(VesselAnalysis {
        name: name.to_string(),
        sample_count,
        height,
        max_diameter,
        volume_cm3,
        classification,
    })
}

/// Analyze profiles strictly in submission order. Each item fails
/// independently: one malformed profile never aborts the rest.
pub fn analyze_batch<I, S>(items: I) -> Vec<Result<VesselAnalysis>>
where
    I: IntoIterator<Item = (S, Vec<(f64, f64)>)>,
    S: AsRef<str>,
{
    analyze_batch_with_cancel(items, &AtomicBool::new(false))
}

/// Like [`analyze_batch`], checking a cooperative cancel flag between
/// profiles. The profile in flight always completes (a partial volume
/// has no meaning); results computed so far are returned in order.
pub fn analyze_batch_with_cancel<I, S>(
    items: I,
    cancel: &AtomicBool,
) -> Vec<Result<VesselAnalysis>>
where
    I: IntoIterator<Item = (S, Vec<(f64, f64)>)>,
    S: AsRef<str>,
{
    let mut results = Vec::new();
    for (name, samples) in items {
        if cancel.load(Ordering::Relaxed) {
            log::info!("batch cancelled after {} profiles", results.len());
            break;
        }
        let result = analyze_samples(name.as_ref(), &samples);
        if let Err(err) = &result {
            log::warn!("profile '{}' failed: {err}", name.as_ref());
        }
        results.push(result);
    }
    results
}

/// Aggregate statistics over a group of analyzed vessels.
#[derive(Debug, Clone, Serialize)]
pub struct GroupStats {
    /// Number of vessels in the group.
    pub count: usize,
    /// Mean volume, cm³.
    pub mean_volume_cm3: f64,
    /// Mean vessel height, cm.
    pub mean_height: f64,
    /// Total volume, cm³.
    pub total_volume_cm3: f64,
}

impl GroupStats {
    /// Compute statistics over a slice of analyses (all zero when
    /// empty).
    pub fn from_analyses(analyses: &[VesselAnalysis]) -> Self {
        let count = analyses.len();
        if count == 0 {
            return Self {
                count: 0,
                mean_volume_cm3: 0.0,
                mean_height: 0.0,
                total_volume_cm3: 0.0,
            };
        }
        let total_volume_cm3: f64 = analyses.iter().map(|a| a.volume_cm3).sum();
        let mean_height = analyses.iter().map(|a| a.height).sum::<f64>() / count as f64;
        Self {
            count,
            mean_volume_cm3: total_volume_cm3 / count as f64,
            mean_height,
            total_volume_cm3,
        }
    }
}

/// Simplify a normalized curve with the given RDP tolerance ahead of
/// mesh generation. Volume quadrature must keep using the original
/// full-resolution curve.
pub fn simplify_profile(curve: &ProfileCurve, epsilon: f64) -> Result<ProfileCurve> {
    let points: Vec<Point2> = curve.points().map(|(h, r)| Point2::new(h, r)).collect();
    let kept = simplify(&points, epsilon);
    log::debug!(
        "profile simplified: {} -> {} points (epsilon {epsilon})",
        points.len(),
        kept.len()
    );
    let samples: Vec<(f64, f64)> = kept.iter().map(|p| (p.x, p.y)).collect();
    Ok(ProfileCurve::from_samples(&samples)?)
}
