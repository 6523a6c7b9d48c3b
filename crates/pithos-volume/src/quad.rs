//! Quadrature rules shared by the volume methods.

/// Trapezoidal rule over a (possibly irregular) grid.
///
/// `xs` must be sorted ascending and the same length as `ys`. Fewer than
/// 2 points integrate to 0.
pub fn trapezoid(xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    let mut acc = 0.0;
    for i in 1..xs.len() {
        acc += 0.5 * (ys[i] + ys[i - 1]) * (xs[i] - xs[i - 1]);
    }
    acc
}

/// Composite Simpson's rule over a uniform grid with step `step`.
///
/// `ys` must hold an odd number of samples (an even number of
/// intervals); callers force this by incrementing even counts.
pub fn simpson_uniform(ys: &[f64], step: f64) -> f64 {
    let n = ys.len();
    debug_assert!(n >= 3 && n % 2 == 1, "Simpson needs an odd sample count");
    let mut acc = ys[0] + ys[n - 1];
    for (i, y) in ys.iter().enumerate().take(n - 1).skip(1) {
        acc += if i % 2 == 1 { 4.0 } else { 2.0 } * y;
    }
    acc * step / 3.0
}
