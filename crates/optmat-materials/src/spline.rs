//! Piecewise interpolation of real-valued tabulated series.
//!
//! Measured optical constants are given at discrete frequencies. A natural
//! cubic spline provides a smooth, continuous $n(\omega)$ and $k(\omega)$
//! between samples; piecewise-linear interpolation is available for data
//! too noisy to spline.

use crate::provider::MaterialError;

/// Interpolation scheme for tabulated series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InterpolationKind {
    Linear,
    #[default]
    Cubic,
}

impl InterpolationKind {
    /// Parse a configuration value (`"linear"` or `"cubic"`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(Self::Linear),
            "cubic" => Some(Self::Cubic),
            _ => None,
        }
    }
}

/// Validate knots shared by every interpolant: equal lengths, at least two
/// points, strictly increasing and finite x.
fn check_knots(xs: &[f64], ys: &[f64]) -> Result<(), MaterialError> {
    if xs.len() != ys.len() {
        return Err(MaterialError::DataError(format!(
            "xs and ys must have equal length ({} != {})",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < 2 {
        return Err(MaterialError::DataError(
            "Need at least 2 data points".into(),
        ));
    }
    if xs.iter().chain(ys).any(|v| !v.is_finite()) {
        return Err(MaterialError::DataError("Data contains non-finite values".into()));
    }
    for i in 1..xs.len() {
        if xs[i] <= xs[i - 1] {
            return Err(MaterialError::DataError(format!(
                "xs must be strictly increasing at index {}",
                i
            )));
        }
    }
    Ok(())
}

/// Index `lo` of the interval `[xs[lo], xs[lo + 1]]` enclosing `x`.
///
/// A query equal to a knot `xs[i]` lands in the interval starting at `i`
/// (or ending at the last knot), so knots are reproduced exactly.
fn bracket(xs: &[f64], x: f64) -> usize {
    let mut lo = 0;
    let mut hi = xs.len() - 1;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if xs[mid] > x {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    lo
}

/// A natural cubic spline interpolator for real-valued data.
///
/// Given $n$ data points $(x_i, y_i)$, constructs piecewise cubic polynomials
/// with continuous first and second derivatives and zero curvature at both
/// ends.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    /// Sorted x values (knots).
    xs: Vec<f64>,
    /// Corresponding y values.
    ys: Vec<f64>,
    /// Second derivatives at each knot (computed during construction).
    y2s: Vec<f64>,
}

impl CubicSpline {
    /// Construct a natural cubic spline from data points.
    ///
    /// # Arguments
    /// * `xs` - Strictly increasing x values.
    /// * `ys` - Corresponding y values (same length as `xs`).
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, MaterialError> {
        check_knots(&xs, &ys)?;

        let n = xs.len();
        let mut y2s = vec![0.0; n];
        let mut u = vec![0.0; n - 1];

        // Forward sweep (tridiagonal system for natural spline)
        for i in 1..n - 1 {
            let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
            let p = sig * y2s[i - 1] + 2.0;
            y2s[i] = (sig - 1.0) / p;
            u[i] = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i])
                - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
            u[i] = (6.0 * u[i] / (xs[i + 1] - xs[i - 1]) - sig * u[i - 1]) / p;
        }

        // Back substitution
        for k in (0..n - 2).rev() {
            y2s[k + 1] = y2s[k + 1] * y2s[k + 2] + u[k + 1];
        }

        Ok(Self { xs, ys, y2s })
    }

    /// Evaluate the spline at a given x value.
    ///
    /// Beyond the data range the boundary polynomial is extended; range
    /// policy is the caller's concern.
    pub fn evaluate(&self, x: f64) -> f64 {
        let lo = bracket(&self.xs, x);
        let hi = lo + 1;

        let h = self.xs[hi] - self.xs[lo];
        let a = (self.xs[hi] - x) / h;
        let b = (x - self.xs[lo]) / h;

        a * self.ys[lo]
            + b * self.ys[hi]
            + ((a * a * a - a) * self.y2s[lo] + (b * b * b - b) * self.y2s[hi]) * h * h / 6.0
    }
}

/// Piecewise-linear interpolation between knots.
#[derive(Debug, Clone)]
pub struct LinearInterpolant {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearInterpolant {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, MaterialError> {
        check_knots(&xs, &ys)?;
        Ok(Self { xs, ys })
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let lo = bracket(&self.xs, x);
        let hi = lo + 1;
        let h = self.xs[hi] - self.xs[lo];
        let a = (self.xs[hi] - x) / h;
        let b = (x - self.xs[lo]) / h;
        a * self.ys[lo] + b * self.ys[hi]
    }
}

/// Either interpolant, selected by [`InterpolationKind`].
#[derive(Debug, Clone)]
pub enum Interpolant {
    Linear(LinearInterpolant),
    Cubic(CubicSpline),
}

impl Interpolant {
    pub fn new(kind: InterpolationKind, xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, MaterialError> {
        Ok(match kind {
            InterpolationKind::Linear => Self::Linear(LinearInterpolant::new(xs, ys)?),
            InterpolationKind::Cubic => Self::Cubic(CubicSpline::new(xs, ys)?),
        })
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            Self::Linear(l) => l.evaluate(x),
            Self::Cubic(c) => c.evaluate(x),
        }
    }
}
