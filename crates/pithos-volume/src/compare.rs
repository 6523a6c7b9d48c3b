//! Cross-method comparison report.
//!
//! Every comparison computes all five methods and reports, per
//! non-reference method, its deviation from the spline-integral
//! reference bucketed into agreement levels. A method that fails is
//! reported unavailable instead of aborting the rest.

use crate::VolumeMethod;
use serde::Serialize;

/// How closely a method agrees with the reference, bucketed on the
/// absolute percent deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Agreement {
    /// Below 0.1% absolute deviation.
    VeryClose,
    /// Below 1% absolute deviation.
    Close,
    /// Below 5% absolute deviation.
    Acceptable,
    /// 5% or more absolute deviation.
    Notable,
}

impl Agreement {
    /// Bucket an absolute percent deviation.
    pub fn from_abs_percent(abs_percent: f64) -> Self {
        if abs_percent < 0.1 {
            Self::VeryClose
        } else if abs_percent < 1.0 {
            Self::Close
        } else if abs_percent < 5.0 {
            Self::Acceptable
        } else {
            Self::Notable
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryClose => "very close",
            Self::Close => "close",
            Self::Acceptable => "acceptable",
            Self::Notable => "notable difference",
        }
    }
}

/// One method's computed volume, or `None` when the method failed
/// (logged, never fatal to the comparison).
#[derive(Debug, Clone, Serialize)]
pub struct MethodVolume {
    /// The method.
    pub method: VolumeMethod,
    /// Volume in cubic length units, if the method succeeded.
    pub volume: Option<f64>,
}

/// Deviation of one non-reference method from the reference volume.
#[derive(Debug, Clone, Serialize)]
pub struct MethodDeviation {
    /// The compared method.
    pub method: VolumeMethod,
    /// Signed percent deviation from the reference.
    pub signed_percent: f64,
    /// Agreement bucket for the absolute deviation.
    pub agreement: Agreement,
}

/// Result of computing all five methods at one upper height.
#[derive(Debug, Clone, Serialize)]
pub struct MethodComparison {
    /// Upper integration bound used (already clamped to the profile).
    pub upper: f64,
    /// All five volumes in [`VolumeMethod::ALL`] order.
    pub volumes: Vec<MethodVolume>,
    /// Deviations of the four non-reference methods; empty when the
    /// reference itself was unavailable or zero.
    pub deviations: Vec<MethodDeviation>,
}

impl MethodComparison {
    /// Volume computed by `method`, if it succeeded.
    pub fn volume_of(&self, method: VolumeMethod) -> Option<f64> {
        self.volumes
            .iter()
            .find(|mv| mv.method == method)
            .and_then(|mv| mv.volume)
    }

    /// The reference (spline-integral) volume, if available.
    pub fn reference_volume(&self) -> Option<f64> {
        self.volume_of(VolumeMethod::REFERENCE)
    }

    /// Deviation entry for `method`, if one was computed.
    pub fn deviation_of(&self, method: VolumeMethod) -> Option<&MethodDeviation> {
        self.deviations.iter().find(|d| d.method == method)
    }
}
