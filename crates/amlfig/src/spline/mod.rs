//! Cubic interpolating spline with not-a-knot end conditions.
//!
//! Purpose
//! - Produce the smooth k-NN boundary: a C² piecewise cubic that passes
//!   exactly through the control points. With not-a-knot ends the third
//!   derivative is continuous at the second and penultimate knots, so four
//!   control points yield the single cubic through them.
//!
//! Model
//! - Unknowns are the second derivatives `M_i` at the knots. Interior rows are
//!   the usual C² continuity equations, the first and last rows are the
//!   not-a-knot conditions. The system is small and dense-solved via LU.
//! - Outside `[x_0, x_{n-1}]` the end pieces are extended (extrapolation).

use std::fmt;

use nalgebra::{DMatrix, DVector};

use crate::geom::Polyline;


/// Minimum number of knots for a cubic (degree + 1).
pub const MIN_POINTS: usize = 4;

/// Errors surfaced when fitting a spline.
#[derive(Debug, Clone, PartialEq)]
pub enum SplineError {
    /// `xs` and `ys` differ in length.
    LengthMismatch { xs: usize, ys: usize },
    /// Fewer than `MIN_POINTS` knots.
    TooFewPoints { got: usize },
    /// A coordinate is NaN or infinite.
    NonFinite { index: usize },
    /// `xs[index] <= xs[index - 1]`.
    NotIncreasing { index: usize },
    /// The linear system had no unique solution.
    Singular,
}

impl fmt::Display for SplineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplineError::LengthMismatch { xs, ys } => {
                write!(f, "x and y lengths differ ({xs} vs {ys})")
            }
            SplineError::TooFewPoints { got } => write!(
                f,
                "cubic interpolation needs at least {MIN_POINTS} points, got {got}"
            ),
            SplineError::NonFinite { index } => {
                write!(f, "control point {index} is not finite")
            }
            SplineError::NotIncreasing { index } => write!(
                f,
                "x values must be strictly increasing (violated at index {index})"
            ),
            SplineError::Singular => write!(f, "spline system is singular"),
        }
    }
}

impl std::error::Error for SplineError {}

/// Piecewise cubic through `(xs[i], ys[i])` with knot second derivatives `m`.
#[derive(Clone, Debug)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    m: Vec<f64>,
}

impl CubicSpline {
    /// Fit with not-a-knot end conditions.
    pub fn not_a_knot(xs: &[f64], ys: &[f64]) -> Result<Self, SplineError> {
        validate(xs, ys)?;
        let n = xs.len();
        let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
        let mut a = DMatrix::<f64>::zeros(n, n);
        let mut rhs = DVector::<f64>::zeros(n);

        // M'''(x_1^-) = M'''(x_1^+)
        a[(0, 0)] = h[1];
        a[(0, 1)] = -(h[0] + h[1]);
        a[(0, 2)] = h[0];

        for i in 1..n - 1 {
            a[(i, i - 1)] = h[i - 1];
            a[(i, i)] = 2.0 * (h[i - 1] + h[i]);
            a[(i, i + 1)] = h[i];
            let right = (ys[i + 1] - ys[i]) / h[i];
            let left = (ys[i] - ys[i - 1]) / h[i - 1];
            rhs[i] = 6.0 * (right - left);
        }

        // M'''(x_{n-2}^-) = M'''(x_{n-2}^+)
        a[(n - 1, n - 3)] = h[n - 2];
        a[(n - 1, n - 2)] = -(h[n - 3] + h[n - 2]);
        a[(n - 1, n - 1)] = h[n - 3];

        let m = a.lu().solve(&rhs).ok_or(SplineError::Singular)?;
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            m: m.iter().copied().collect(),
        })
    }

    /// Knot x-range `(x_0, x_{n-1})`.
    #[inline]
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Index of the polynomial piece used for `x` (end pieces extend outward).
    fn segment(&self, x: f64) -> usize {
        let last = self.xs.len() - 2;
        // first knot strictly greater than x, minus one
        let k = self.xs.partition_point(|&k| k <= x);
        k.saturating_sub(1).min(last)
    }

    pub fn eval(&self, x: f64) -> f64 {
        let i = self.segment(x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        let (m0, m1) = (self.m[i], self.m[i + 1]);
        let h = x1 - x0;
        let a = x1 - x;
        let b = x - x0;
        m0 * a * a * a / (6.0 * h)
            + m1 * b * b * b / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b
    }

    /// Evaluate at every `x`, in order.
    pub fn sample(&self, xs: &[f64]) -> Polyline {
        Polyline::from_xy(xs, &xs.iter().map(|&x| self.eval(x)).collect::<Vec<_>>())
    }

    /// `n` evenly spaced samples across the knot range.
    pub fn resample(&self, n: usize) -> Polyline {
        let (lo, hi) = self.domain();
        self.sample(&linspace(lo, hi, n))
    }
}

fn validate(xs: &[f64], ys: &[f64]) -> Result<(), SplineError> {
    if xs.len() != ys.len() {
        return Err(SplineError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }
    if xs.len() < MIN_POINTS {
        return Err(SplineError::TooFewPoints { got: xs.len() });
    }
    if let Some(index) = xs
        .iter()
        .zip(ys)
        .position(|(x, y)| !x.is_finite() || !y.is_finite())
    {
        return Err(SplineError::NonFinite { index });
    }
    if let Some(k) = xs.windows(2).position(|w| w[1] <= w[0]) {
        return Err(SplineError::NotIncreasing { index: k + 1 });
    }
    Ok(())
}

/// `n` evenly spaced values from `start` to `stop` inclusive.
///
/// The first value is exactly `start` and the last exactly `stop`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = stop;
            out
        }
    }
}
