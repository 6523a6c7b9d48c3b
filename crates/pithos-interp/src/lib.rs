#![warn(missing_docs)]

//! Continuous radius(height) interpolants for vessel profiles.
//!
//! A normalized profile is a discrete set of `(height, radius)` samples.
//! The volume methods that resample the profile on fine grids need a
//! continuous function through those samples. The preferred fit is a
//! natural cubic spline; profiles with too few points degrade through an
//! explicit fallback chain:
//!
//! 1. at least 4 points: [`NaturalCubicSpline`] (zero second derivative
//!    at both ends), extrapolating with the end cubics beyond the range.
//! 2. exactly 3 points: the unique quadratic through all three samples.
//! 3. 2 points, or any construction failure above: strict
//!    piecewise-linear interpolation with linear extrapolation.
//!
//! Each degradation step is logged at warning level; the selected tier is
//! observable via [`Interpolant::kind`]. A [`LinearInterp`] is also usable
//! on its own for lightweight radius lookups at arbitrary cut heights,
//! independent of whichever smooth fit was chosen.

use thiserror::Error;

/// Errors that can occur while constructing an interpolant.
#[derive(Error, Debug)]
pub enum InterpError {
    /// Not enough samples for the requested interpolant.
    #[error("at least {required} points required, got {actual}")]
    TooFewPoints {
        /// Minimum point count for the interpolant.
        required: usize,
        /// Points actually supplied.
        actual: usize,
    },

    /// Sample heights must be strictly increasing.
    #[error("sample heights must be strictly increasing (violation at index {0})")]
    NotIncreasing(usize),

    /// Height and radius arrays differ in length.
    #[error("sample arrays differ in length: {xs} heights vs {ys} radii")]
    LengthMismatch {
        /// Number of heights supplied.
        xs: usize,
        /// Number of radii supplied.
        ys: usize,
    },
}

/// Result type for interpolant construction.
pub type Result<T> = std::result::Result<T, InterpError>;

fn check_samples(xs: &[f64], ys: &[f64], required: usize) -> Result<()> {
    if xs.len() != ys.len() {
        return Err(InterpError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }
    if xs.len() < required {
        return Err(InterpError::TooFewPoints {
            required,
            actual: xs.len(),
        });
    }
    for i in 1..xs.len() {
        if xs[i] <= xs[i - 1] {
            return Err(InterpError::NotIncreasing(i));
        }
    }
    Ok(())
}

/// Locate the segment index `i` such that `xs[i] <= x < xs[i+1]`,
/// clamped to `[0, xs.len() - 2]` so out-of-range arguments evaluate
/// the nearest end segment (extrapolation).
fn segment_index(xs: &[f64], x: f64) -> usize {
    let n = xs.len();
    // partition_point returns the count of knots <= x
    let upper = xs.partition_point(|&k| k <= x);
    upper.saturating_sub(1).min(n - 2)
}

// =============================================================================
// Strict linear interpolant
// =============================================================================

/// Piecewise-linear interpolant with linear extrapolation beyond the
/// sample range.
#[derive(Debug, Clone)]
pub struct LinearInterp {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearInterp {
    /// Build from strictly increasing heights and matching radii.
    pub fn new(xs: &[f64], ys: &[f64]) -> Result<Self> {
        check_samples(xs, ys, 2)?;
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }

    /// Evaluate at `x`. Outside the sample range the nearest end segment
    /// is extended.
    pub fn eval(&self, x: f64) -> f64 {
        let i = segment_index(&self.xs, x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }
}

// =============================================================================
// Natural cubic spline
// =============================================================================

/// Natural cubic spline through `(x, y)` samples: C² inside the range,
/// zero second derivative at both ends.
///
/// Second derivatives at the knots are found by solving the standard
/// tridiagonal continuity system with the Thomas algorithm. Beyond the
/// sample range the first/last cubic segment is evaluated as-is, which
/// extrapolates the end polynomial.
#[derive(Debug, Clone)]
pub struct NaturalCubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivative of the spline at each knot.
    m: Vec<f64>,
}

impl NaturalCubicSpline {
    /// Fit a natural cubic spline. Requires at least 3 strictly
    /// increasing samples.
    pub fn new(xs: &[f64], ys: &[f64]) -> Result<Self> {
        check_samples(xs, ys, 3)?;
        let n = xs.len();

        // Interior unknowns m[1..n-1]; natural ends pin m[0] = m[n-1] = 0.
        let mut m = vec![0.0; n];
        let interior = n - 2;

        // Thomas algorithm over the tridiagonal continuity system:
        //   h[i-1]·m[i-1] + 2(h[i-1]+h[i])·m[i] + h[i]·m[i+1] = rhs[i]
        let mut diag = vec![0.0; interior];
        let mut upper = vec![0.0; interior];
        let mut rhs = vec![0.0; interior];
        for k in 0..interior {
            let i = k + 1;
            let h0 = xs[i] - xs[i - 1];
            let h1 = xs[i + 1] - xs[i];
            diag[k] = 2.0 * (h0 + h1);
            upper[k] = h1;
            rhs[k] = 6.0 * ((ys[i + 1] - ys[i]) / h1 - (ys[i] - ys[i - 1]) / h0);
        }

        // Forward elimination. The lower band entry for row k is
        // h[k] = xs[k+1] - xs[k].
        for k in 1..interior {
            let lower = xs[k + 1] - xs[k];
            let factor = lower / diag[k - 1];
            diag[k] -= factor * upper[k - 1];
            rhs[k] -= factor * rhs[k - 1];
        }

        // Back substitution.
        if interior > 0 {
            m[interior] = rhs[interior - 1] / diag[interior - 1];
            for k in (1..interior).rev() {
                m[k] = (rhs[k - 1] - upper[k - 1] * m[k + 1]) / diag[k - 1];
            }
        }

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            m,
        })
    }

    /// Evaluate the spline at `x`, extrapolating with the end cubic
    /// beyond the sample range.
    pub fn eval(&self, x: f64) -> f64 {
        let i = segment_index(&self.xs, x);
        let h = self.xs[i + 1] - self.xs[i];
        let a = (self.xs[i + 1] - x) / h;
        let b = (x - self.xs[i]) / h;
        a * self.ys[i]
            + b * self.ys[i + 1]
            + ((a * a * a - a) * self.m[i] + (b * b * b - b) * self.m[i + 1]) * h * h / 6.0
    }

    /// Second derivative at knot `i` (zero at both ends by construction).
    pub fn second_derivative(&self, i: usize) -> f64 {
        self.m[i]
    }
}

// =============================================================================
// Quadratic fallback
// =============================================================================

/// The unique quadratic through exactly three samples, evaluated via
/// Lagrange basis polynomials. Used when a profile is too sparse for a
/// spline but still has curvature information.
#[derive(Debug, Clone)]
pub struct QuadraticInterp {
    xs: [f64; 3],
    ys: [f64; 3],
}

impl QuadraticInterp {
    /// Build from exactly three strictly increasing samples.
    pub fn new(xs: &[f64], ys: &[f64]) -> Result<Self> {
        check_samples(xs, ys, 3)?;
        if xs.len() != 3 {
            return Err(InterpError::TooFewPoints {
                required: 3,
                actual: xs.len(),
            });
        }
        Ok(Self {
            xs: [xs[0], xs[1], xs[2]],
            ys: [ys[0], ys[1], ys[2]],
        })
    }

    /// Evaluate the quadratic at `x` (polynomial extrapolation outside
    /// the sample range).
    pub fn eval(&self, x: f64) -> f64 {
        let [x0, x1, x2] = self.xs;
        let [y0, y1, y2] = self.ys;
        y0 * (x - x1) * (x - x2) / ((x0 - x1) * (x0 - x2))
            + y1 * (x - x0) * (x - x2) / ((x1 - x0) * (x1 - x2))
            + y2 * (x - x0) * (x - x1) / ((x2 - x0) * (x2 - x1))
    }
}

// =============================================================================
// Fallback chain
// =============================================================================

/// Which tier of the fallback chain a smooth interpolant landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolantKind {
    /// Natural cubic spline through ≥ 4 points.
    NaturalCubic,
    /// Quadratic through exactly 3 points.
    Quadratic,
    /// Piecewise-linear (2 points, or a failed higher-order fit).
    Linear,
}

impl InterpolantKind {
    /// Human-readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NaturalCubic => "natural cubic spline",
            Self::Quadratic => "quadratic",
            Self::Linear => "linear",
        }
    }
}

/// A smooth radius(height) function chosen by the ordered fallback
/// policy described in the crate docs.
#[derive(Debug, Clone)]
pub enum Interpolant {
    /// Natural cubic spline tier.
    NaturalCubic(NaturalCubicSpline),
    /// Quadratic tier.
    Quadratic(QuadraticInterp),
    /// Linear tier.
    Linear(LinearInterp),
}

impl Interpolant {
    /// Fit the best available interpolant for the given samples.
    ///
    /// Only fails when fewer than 2 valid samples exist or the heights
    /// are not strictly increasing, a hard precondition the profile
    /// normalizer already enforces. Higher-tier construction failures
    /// degrade to the next tier with a warning instead of erroring.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() >= 4 {
            match NaturalCubicSpline::new(xs, ys) {
                Ok(s) => return Ok(Self::NaturalCubic(s)),
                Err(err) => {
                    log::warn!("cubic spline construction failed ({err}); using linear interpolation");
                }
            }
        } else if xs.len() == 3 {
            match QuadraticInterp::new(xs, ys) {
                Ok(q) => return Ok(Self::Quadratic(q)),
                Err(err) => {
                    log::warn!("quadratic fit failed ({err}); using linear interpolation");
                }
            }
        }
        LinearInterp::new(xs, ys).map(Self::Linear)
    }

    /// Evaluate the interpolant at height `x`.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Self::NaturalCubic(s) => s.eval(x),
            Self::Quadratic(q) => q.eval(x),
            Self::Linear(l) => l.eval(x),
        }
    }

    /// The tier this interpolant landed on.
    pub fn kind(&self) -> InterpolantKind {
        match self {
            Self::NaturalCubic(_) => InterpolantKind::NaturalCubic,
            Self::Quadratic(_) => InterpolantKind::Quadratic,
            Self::Linear(_) => InterpolantKind::Linear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_eval_and_extrapolation() {
        let li = LinearInterp::new(&[0.0, 1.0, 3.0], &[0.0, 2.0, 6.0]).unwrap();
        assert!((li.eval(0.5) - 1.0).abs() < 1e-12);
        assert!((li.eval(2.0) - 4.0).abs() < 1e-12);
        // Beyond both ends the nearest segment extends
        assert!((li.eval(-1.0) + 2.0).abs() < 1e-12);
        assert!((li.eval(4.0) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_linear_rejects_bad_input() {
        assert!(LinearInterp::new(&[0.0], &[1.0]).is_err());
        assert!(LinearInterp::new(&[0.0, 0.0], &[1.0, 2.0]).is_err());
        assert!(LinearInterp::new(&[0.0, 1.0], &[1.0]).is_err());
    }

    #[test]
    fn test_spline_interpolates_knots() {
        let xs = [0.0, 1.0, 2.5, 4.0, 5.0];
        let ys = [1.0, 3.0, 2.0, 4.0, 3.5];
        let s = NaturalCubicSpline::new(&xs, &ys).unwrap();
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert!((s.eval(*x) - y).abs() < 1e-10);
        }
    }

    #[test]
    fn test_spline_natural_ends() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [0.0, 1.0, 0.5, 1.5, 1.0];
        let s = NaturalCubicSpline::new(&xs, &ys).unwrap();
        assert_eq!(s.second_derivative(0), 0.0);
        assert_eq!(s.second_derivative(4), 0.0);
    }

    #[test]
    fn test_spline_reproduces_line() {
        // A spline through collinear points must be that line everywhere.
        let xs = [0.0, 1.0, 2.0, 3.0, 5.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
        let s = NaturalCubicSpline::new(&xs, &ys).unwrap();
        for x in [0.25, 1.5, 2.9, 4.2, 6.0, -0.5] {
            assert!((s.eval(x) - (2.0 * x + 1.0)).abs() < 1e-9, "x = {x}");
        }
    }

    #[test]
    fn test_quadratic_through_points() {
        // y = x^2 through (0,0), (1,1), (3,9)
        let q = QuadraticInterp::new(&[0.0, 1.0, 3.0], &[0.0, 1.0, 9.0]).unwrap();
        assert!((q.eval(2.0) - 4.0).abs() < 1e-12);
        assert!((q.eval(-1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fit_selects_tier_by_point_count() {
        let spline = Interpolant::fit(&[0.0, 1.0, 2.0, 3.0], &[1.0, 2.0, 2.0, 1.0]).unwrap();
        assert_eq!(spline.kind(), InterpolantKind::NaturalCubic);

        let quad = Interpolant::fit(&[0.0, 1.0, 2.0], &[1.0, 2.0, 1.0]).unwrap();
        assert_eq!(quad.kind(), InterpolantKind::Quadratic);

        let lin = Interpolant::fit(&[0.0, 1.0], &[1.0, 2.0]).unwrap();
        assert_eq!(lin.kind(), InterpolantKind::Linear);
    }

    #[test]
    fn test_fit_too_few_points_is_fatal() {
        assert!(Interpolant::fit(&[0.0], &[1.0]).is_err());
    }
}
