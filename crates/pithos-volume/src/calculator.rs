//! The volume calculator: five independent quadrature methods over one
//! frozen profile curve.

use std::f64::consts::PI;

use pithos_interp::{Interpolant, InterpolantKind, LinearInterp};
use pithos_profile::ProfileCurve;

use crate::compare::{Agreement, MethodComparison, MethodDeviation, MethodVolume};
use crate::error::{Result, VolumeError};
use crate::{quad, QuadratureSettings, VolumeMethod};

/// Iterations of the fill-level binary search.
const FILL_SEARCH_ITERATIONS: usize = 30;

/// Early-exit tolerance of the fill-level search, in cubic length units.
const FILL_SEARCH_TOLERANCE: f64 = 0.1;

/// Computes the enclosed volume of a vessel profile up to an arbitrary
/// height by five independent numerical methods.
///
/// The solid is treated as a stack of circular cross-sections of radius
/// `r(h)` revolved a full turn around the height axis; "volume up to
/// `upper`" always means the integral of `π·r(h)²` from the base to
/// `upper`. The calculator owns a frozen copy of the curve plus its two
/// interpolants and is a pure function of them: no caches, no interior
/// mutability, safe to share across threads.
#[derive(Debug, Clone)]
pub struct VolumeCalculator {
    curve: ProfileCurve,
    smooth: Interpolant,
    linear: LinearInterp,
    settings: QuadratureSettings,
}

impl VolumeCalculator {
    /// Build a calculator with default quadrature settings.
    pub fn new(curve: ProfileCurve) -> Result<Self> {
        Self::with_settings(curve, QuadratureSettings::default())
    }

    /// Build a calculator with explicit quadrature settings.
    pub fn with_settings(curve: ProfileCurve, settings: QuadratureSettings) -> Result<Self> {
        settings.validate()?;
        let smooth = Interpolant::fit(curve.heights(), curve.radii())?;
        let linear = LinearInterp::new(curve.heights(), curve.radii())?;
        Ok(Self {
            curve,
            smooth,
            linear,
            settings,
        })
    }

    /// The profile this calculator integrates.
    pub fn curve(&self) -> &ProfileCurve {
        &self.curve
    }

    /// Which interpolant tier the smooth fit landed on.
    pub fn interpolant_kind(&self) -> InterpolantKind {
        self.smooth.kind()
    }

    /// Compute the volume up to `upper` with the given method. `None`
    /// means the full profile height; bounds above the rim are clamped
    /// to it and bounds at or below the base integrate to 0.
    pub fn volume(&self, method: VolumeMethod, upper: Option<f64>) -> Result<f64> {
        match method {
            VolumeMethod::Disks => self.disks(upper),
            VolumeMethod::Frustums => self.frustums(upper),
            VolumeMethod::Trapezoidal => self.trapezoidal(upper),
            VolumeMethod::Simpson => self.simpson(upper),
            VolumeMethod::SplineIntegral => self.spline_integral(upper),
        }
    }

    /// Full-profile volume with the given method.
    pub fn full_volume(&self, method: VolumeMethod) -> Result<f64> {
        self.volume(method, None)
    }

    /// Disk stacking: trapezoidal quadrature of `π·r²` over the original
    /// discrete samples, no smoothing. Reflects the raw digitized
    /// profile.
    pub fn disks(&self, upper: Option<f64>) -> Result<f64> {
        let upper = self.clamp_upper(upper);
        let (ys, rs) = self.truncated_samples(upper);
        if ys.len() < 2 {
            return Ok(0.0);
        }
        let areas: Vec<f64> = rs.iter().map(|r| PI * r * r).collect();
        self.check_finite(quad::trapezoid(&ys, &areas), VolumeMethod::Disks)
    }

    /// Conical frustums: each consecutive sample pair contributes
    /// `(π/3)·h·(r1² + r1·r2 + r2²)`; zero-height segments are skipped.
    pub fn frustums(&self, upper: Option<f64>) -> Result<f64> {
        let upper = self.clamp_upper(upper);
        let (ys, rs) = self.truncated_samples(upper);
        if ys.len() < 2 {
            return Ok(0.0);
        }
        let mut volume = 0.0;
        for i in 0..ys.len() - 1 {
            let h = ys[i + 1] - ys[i];
            if h <= 0.0 {
                continue;
            }
            let (r1, r2) = (rs[i], rs[i + 1]);
            volume += (PI / 3.0) * h * (r1 * r1 + r1 * r2 + r2 * r2);
        }
        self.check_finite(volume, VolumeMethod::Frustums)
    }

    /// Trapezoidal rule over a fine uniform resampling of the smooth
    /// interpolant (2000 points by default).
    pub fn trapezoidal(&self, upper: Option<f64>) -> Result<f64> {
        let upper = self.clamp_upper(upper);
        if upper <= self.curve.base_height() {
            return Ok(0.0);
        }
        let n = self.settings.trapezoidal_points;
        let (areas, step) = self.smooth_areas(upper, n);
        let xs: Vec<f64> = (0..n).map(|i| step * i as f64).collect();
        self.check_finite(quad::trapezoid(&xs, &areas), VolumeMethod::Trapezoidal)
    }

    /// Simpson's rule over a uniform resampling of the smooth
    /// interpolant (501 points by default; even counts are bumped to the
    /// next odd).
    pub fn simpson(&self, upper: Option<f64>) -> Result<f64> {
        let upper = self.clamp_upper(upper);
        if upper <= self.curve.base_height() {
            return Ok(0.0);
        }
        let n = force_odd(self.settings.simpson_points);
        let (areas, step) = self.smooth_areas(upper, n);
        self.check_finite(quad::simpson_uniform(&areas, step), VolumeMethod::Simpson)
    }

    /// The reference method: Simpson's rule over a dense resampling of
    /// the smooth interpolant (1001 points by default). Other methods
    /// are compared against this one.
    pub fn spline_integral(&self, upper: Option<f64>) -> Result<f64> {
        let upper = self.clamp_upper(upper);
        if upper <= self.curve.base_height() {
            return Ok(0.0);
        }
        let n = force_odd(self.settings.spline_points);
        let (areas, step) = self.smooth_areas(upper, n);
        self.check_finite(
            quad::simpson_uniform(&areas, step),
            VolumeMethod::SplineIntegral,
        )
    }

    /// Compute all five methods at `upper` and bucket each
    /// non-reference method's deviation from the spline integral.
    ///
    /// A failing method is logged and reported unavailable; the others
    /// proceed. Deviations are omitted entirely when the reference is
    /// unavailable or zero.
    pub fn compare_all(&self, upper: Option<f64>) -> MethodComparison {
        let upper = self.clamp_upper(upper);
        let volumes: Vec<MethodVolume> = VolumeMethod::ALL
            .iter()
            .map(|&method| MethodVolume {
                method,
                volume: match self.volume(method, Some(upper)) {
                    Ok(v) => Some(v),
                    Err(err) => {
                        log::warn!("{method} method unavailable: {err}");
                        None
                    }
                },
            })
            .collect();

        let reference = volumes
            .iter()
            .find(|mv| mv.method == VolumeMethod::REFERENCE)
            .and_then(|mv| mv.volume)
            .filter(|&r| r > 0.0);

        let deviations = match reference {
            Some(reference) => volumes
                .iter()
                .filter(|mv| mv.method != VolumeMethod::REFERENCE)
                .filter_map(|mv| {
                    let volume = mv.volume?;
                    let signed_percent = (volume - reference) / reference * 100.0;
                    Some(MethodDeviation {
                        method: mv.method,
                        signed_percent,
                        agreement: Agreement::from_abs_percent(signed_percent.abs()),
                    })
                })
                .collect(),
            None => Vec::new(),
        };

        MethodComparison {
            upper,
            volumes,
            deviations,
        }
    }

    /// Percentage of the full volume held below `level`. A vessel whose
    /// full volume is zero is defined to be 0% filled, never an error.
    pub fn percent_filled(&self, method: VolumeMethod, level: f64) -> Result<f64> {
        let full = self.full_volume(method)?;
        if full <= 0.0 {
            return Ok(0.0);
        }
        let at_level = self.volume(method, Some(level))?;
        Ok(at_level / full * 100.0)
    }

    /// Find the fill height whose enclosed volume is `percent` of the
    /// full volume, by bisection over the profile height.
    pub fn fill_level(&self, method: VolumeMethod, percent: f64) -> Result<f64> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(VolumeError::InvalidPercent(percent));
        }
        let full = self.full_volume(method)?;
        let target = full * percent / 100.0;

        let mut low = self.curve.base_height();
        let mut high = self.curve.max_height();
        let mut mid = 0.5 * (low + high);
        for _ in 0..FILL_SEARCH_ITERATIONS {
            mid = 0.5 * (low + high);
            let at_mid = self.volume(method, Some(mid))?;
            if (at_mid - target).abs() < FILL_SEARCH_TOLERANCE {
                break;
            }
            if at_mid < target {
                low = mid;
            } else {
                high = mid;
            }
        }
        Ok(mid)
    }

    fn clamp_upper(&self, upper: Option<f64>) -> f64 {
        let max = self.curve.max_height();
        match upper {
            None => max,
            Some(u) => u.min(max),
        }
    }

    /// Original samples truncated at `upper`, with one linearly
    /// interpolated closing sample exactly at `upper` when it falls
    /// strictly between two samples.
    fn truncated_samples(&self, upper: f64) -> (Vec<f64>, Vec<f64>) {
        let heights = self.curve.heights();
        let radii = self.curve.radii();
        let count = heights.partition_point(|&h| h <= upper);
        let mut ys = heights[..count].to_vec();
        let mut rs = radii[..count].to_vec();
        if let Some(&last) = ys.last() {
            if upper > last && upper < self.curve.max_height() {
                ys.push(upper);
                rs.push(self.linear.eval(upper));
            }
        }
        (ys, rs)
    }

    /// Cross-section areas `π·r(h)²` of the smooth interpolant on a
    /// uniform grid from the base to `upper`; negative interpolated
    /// radii are clamped to zero.
    fn smooth_areas(&self, upper: f64, n: usize) -> (Vec<f64>, f64) {
        let base = self.curve.base_height();
        let step = (upper - base) / (n - 1) as f64;
        let areas = (0..n)
            .map(|i| {
                let r = self.smooth.eval(base + step * i as f64).max(0.0);
                PI * r * r
            })
            .collect();
        (areas, step)
    }

    fn check_finite(&self, volume: f64, method: VolumeMethod) -> Result<f64> {
        if volume.is_finite() {
            Ok(volume)
        } else {
            Err(VolumeError::NonFinite { method })
        }
    }
}

fn force_odd(n: usize) -> usize {
    if n % 2 == 0 {
        n + 1
    } else {
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cylinder() -> VolumeCalculator {
        // Radius 5, height 10 — true volume π·25·10 ≈ 785.398.
        let curve = ProfileCurve::from_samples(&[
            (0.0, 5.0),
            (3.0, 5.0),
            (7.0, 5.0),
            (10.0, 5.0),
        ])
        .unwrap();
        VolumeCalculator::new(curve).unwrap()
    }

    fn vase() -> VolumeCalculator {
        let curve = ProfileCurve::from_samples(&[
            (0.0, 2.0),
            (2.0, 4.0),
            (4.0, 5.5),
            (6.0, 5.0),
            (8.0, 3.5),
            (10.0, 4.0),
        ])
        .unwrap();
        VolumeCalculator::new(curve).unwrap()
    }

    const CYLINDER_VOLUME: f64 = PI * 25.0 * 10.0;

    #[test]
    fn test_cylinder_disks_and_frustums_exact() {
        let calc = cylinder();
        assert!((calc.disks(None).unwrap() - CYLINDER_VOLUME).abs() < 1e-9);
        assert!((calc.frustums(None).unwrap() - CYLINDER_VOLUME).abs() < 1e-9);
    }

    #[test]
    fn test_cylinder_all_methods_agree() {
        let calc = cylinder();
        let reference = calc.spline_integral(None).unwrap();
        assert!((reference - CYLINDER_VOLUME).abs() / CYLINDER_VOLUME < 0.001);
        for method in VolumeMethod::ALL {
            let v = calc.volume(method, None).unwrap();
            let dev = (v - reference).abs() / reference * 100.0;
            assert!(dev < 1.0, "{method}: {dev}%");
        }
    }

    #[test]
    fn test_frustums_cone_exact() {
        // Truncated cone r = 1 → 3 over h = 6:
        // V = π/3·6·(1 + 3 + 9) = 26π.
        let curve = ProfileCurve::from_samples(&[(0.0, 1.0), (6.0, 3.0)]).unwrap();
        let calc = VolumeCalculator::new(curve).unwrap();
        let v = calc.frustums(None).unwrap();
        assert!((v - 26.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn test_monotonicity_all_methods() {
        let calc = vase();
        let max = calc.curve().max_height();
        for method in VolumeMethod::ALL {
            let mut prev = 0.0;
            for i in 0..=20 {
                let h = max * i as f64 / 20.0;
                let v = calc.volume(method, Some(h)).unwrap();
                assert!(
                    v >= prev - 1e-9,
                    "{method} not monotone at h = {h}: {v} < {prev}"
                );
                prev = v;
            }
        }
    }

    #[test]
    fn test_boundary_closure() {
        let calc = vase();
        for method in VolumeMethod::ALL {
            assert_eq!(calc.volume(method, Some(0.0)).unwrap(), 0.0, "{method}");
            let full = calc.volume(method, None).unwrap();
            let at_max = calc.volume(method, Some(calc.curve().max_height())).unwrap();
            assert!((full - at_max).abs() < 1e-12, "{method}");
        }
    }

    #[test]
    fn test_upper_clamped_to_profile() {
        let calc = vase();
        for method in VolumeMethod::ALL {
            let full = calc.volume(method, None).unwrap();
            let beyond = calc.volume(method, Some(1000.0)).unwrap();
            assert!((full - beyond).abs() < 1e-12, "{method}");
        }
    }

    #[test]
    fn test_upper_below_base_is_zero() {
        let calc = vase();
        for method in VolumeMethod::ALL {
            assert_eq!(calc.volume(method, Some(-3.0)).unwrap(), 0.0, "{method}");
        }
    }

    #[test]
    fn test_disks_interpolates_cut_between_samples() {
        // Cylinder cut at h = 4.5, strictly between samples: the
        // interpolated closing sample makes the cut exact.
        let calc = cylinder();
        let v = calc.disks(Some(4.5)).unwrap();
        assert!((v - PI * 25.0 * 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_compare_all_cylinder() {
        let calc = cylinder();
        let cmp = calc.compare_all(None);
        assert_eq!(cmp.volumes.len(), 5);
        assert!(cmp.volumes.iter().all(|mv| mv.volume.is_some()));
        assert_eq!(cmp.deviations.len(), 4);
        for dev in &cmp.deviations {
            assert_eq!(dev.agreement, Agreement::VeryClose, "{}", dev.method);
        }
        let disks = cmp.deviation_of(VolumeMethod::Disks).unwrap();
        assert!(disks.signed_percent.abs() < 1e-6);
    }

    #[test]
    fn test_percent_filled_half_cylinder() {
        let calc = cylinder();
        let p = calc
            .percent_filled(VolumeMethod::SplineIntegral, 5.0)
            .unwrap();
        assert!((p - 50.0).abs() < 0.1);
    }

    #[test]
    fn test_fill_level_round_trip() {
        let calc = cylinder();
        let level = calc.fill_level(VolumeMethod::Disks, 50.0).unwrap();
        assert!((level - 5.0).abs() < 0.01, "level = {level}");

        let top = calc.fill_level(VolumeMethod::Disks, 100.0).unwrap();
        assert!((top - 10.0).abs() < 0.01, "top = {top}");
    }

    #[test]
    fn test_fill_level_rejects_bad_percent() {
        let calc = cylinder();
        assert!(matches!(
            calc.fill_level(VolumeMethod::Disks, 120.0),
            Err(VolumeError::InvalidPercent(_))
        ));
        assert!(calc.fill_level(VolumeMethod::Disks, -1.0).is_err());
    }

    #[test]
    fn test_settings_override() {
        let curve = cylinder().curve().clone();
        let settings = QuadratureSettings {
            trapezoidal_points: 4000,
            simpson_points: 500, // even: bumped to 501 internally
            spline_points: 2001,
        };
        let calc = VolumeCalculator::with_settings(curve, settings).unwrap();
        let v = calc.simpson(None).unwrap();
        assert!((v - CYLINDER_VOLUME).abs() / CYLINDER_VOLUME < 0.001);
    }
}
