//! Plane geometry used by the scenes.
//!
//! - `Window`: axis-aligned display window; the scenes live in [0,10]².
//!   Geometry reaching past it is clipped before drawing.
//! - `Line`: affine function `y = slope·x + intercept`.
//! - `Polyline` / `Polygon`: ordered vertex lists (open / implicitly closed).

use nalgebra::Vector2;

/// Closed axis-aligned window `[x0,x1] × [y0,y1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Window {
    #[inline]
    pub fn new(x: (f64, f64), y: (f64, f64)) -> Self {
        Self { x, y }
    }
    /// The `[0,10] × [0,10]` window shared by both scenes.
    #[inline]
    pub fn unit_ten() -> Self {
        Self::new((0.0, 10.0), (0.0, 10.0))
    }

    /// Liang–Barsky clip of segment `a → b`; `None` when nothing is visible.
    pub fn clip_segment(
        &self,
        a: Vector2<f64>,
        b: Vector2<f64>,
    ) -> Option<(Vector2<f64>, Vector2<f64>)> {
        let d = b - a;
        let (mut t0, mut t1) = (0.0f64, 1.0f64);
        let checks = [
            (-d.x, a.x - self.x.0),
            (d.x, self.x.1 - a.x),
            (-d.y, a.y - self.y.0),
            (d.y, self.y.1 - a.y),
        ];
        for (p, q) in checks {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
            } else if p < 0.0 {
                t0 = t0.max(q / p);
            } else {
                t1 = t1.min(q / p);
            }
        }
        if t0 > t1 {
            return None;
        }
        Some((a + d * t0, a + d * t1))
    }

    /// Visible runs of an open polyline.
    pub fn clip_polyline(&self, points: &[Vector2<f64>]) -> Vec<Vec<Vector2<f64>>> {
        let mut runs: Vec<Vec<Vector2<f64>>> = Vec::new();
        let mut open = false;
        for w in points.windows(2) {
            match self.clip_segment(w[0], w[1]) {
                Some((a, b)) => {
                    let joined = open && runs.last().and_then(|r| r.last()) == Some(&a);
                    if joined {
                        if let Some(run) = runs.last_mut() {
                            run.push(b);
                        }
                    } else {
                        runs.push(vec![a, b]);
                    }
                    // the run continues only if the segment end was not cut
                    open = b == w[1];
                }
                None => open = false,
            }
        }
        runs
    }

    /// Sutherland–Hodgman clip of a closed polygon against the window.
    pub fn clip_polygon(&self, vertices: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
        let (x0, x1, y0, y1) = (self.x.0, self.x.1, self.y.0, self.y.1);
        let edges: [(fn(Vector2<f64>, f64) -> f64, f64); 4] = [
            (|p, c| p.x - c, x0),
            (|p, c| c - p.x, x1),
            (|p, c| p.y - c, y0),
            (|p, c| c - p.y, y1),
        ];
        let mut poly = vertices.to_vec();
        for (dist, c) in edges {
            if poly.is_empty() {
                break;
            }
            let input = std::mem::take(&mut poly);
            let mut prev = input[input.len() - 1];
            for &cur in &input {
                let (dp, dc) = (dist(prev, c), dist(cur, c));
                if dc >= 0.0 {
                    if dp < 0.0 {
                        poly.push(prev + (cur - prev) * (dp / (dp - dc)));
                    }
                    poly.push(cur);
                } else if dp >= 0.0 {
                    poly.push(prev + (cur - prev) * (dp / (dp - dc)));
                }
                prev = cur;
            }
        }
        poly
    }
}

/// Affine function `y = slope·x + intercept`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl Line {
    #[inline]
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
    /// Evaluate at each `x`, in order.
    pub fn sample(&self, xs: &[f64]) -> Polyline {
        Polyline::new(xs.iter().map(|&x| Vector2::new(x, self.eval(x))).collect())
    }
}

/// Ordered, open sequence of vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
    pub points: Vec<Vector2<f64>>,
}

impl Polyline {
    #[inline]
    pub fn new(points: Vec<Vector2<f64>>) -> Self {
        Self { points }
    }
    /// Pair up separate coordinate arrays; extra entries of the longer one are dropped.
    pub fn from_xy(xs: &[f64], ys: &[f64]) -> Self {
        Self::new(
            xs.iter()
                .zip(ys)
                .map(|(&x, &y)| Vector2::new(x, y))
                .collect(),
        )
    }
    /// Same vertices, back to front.
    pub fn reversed(&self) -> Self {
        Self::new(self.points.iter().rev().copied().collect())
    }
}

/// Closed polygon; the last vertex connects back to the first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vector2<f64>>,
}

impl Polygon {
    #[inline]
    pub fn new(vertices: Vec<Vector2<f64>>) -> Self {
        Self { vertices }
    }
    pub fn from_xy(xs: &[f64], ys: &[f64]) -> Self {
        Self::new(Polyline::from_xy(xs, ys).points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn close(a: Vector2<f64>, b: Vector2<f64>) -> bool {
        (a - b).norm() < 1e-9
    }

    #[test]
    fn line_endpoints() {
        let l = Line::new(-1.0, 10.6);
        let s = l.sample(&[0.0, 10.0]);
        assert_eq!(s.points.len(), 2);
        assert!((s.points[0].y - 10.6).abs() < 1e-12);
        assert!((s.points[1].y - 0.6).abs() < 1e-12);
    }

    #[test]
    fn bisector_is_cut_at_the_top_edge() {
        let w = Window::unit_ten();
        let (a, b) = w
            .clip_segment(vector![0.0, 10.6], vector![10.0, 0.6])
            .unwrap();
        assert!(close(a, vector![0.6, 10.0]));
        assert!(close(b, vector![10.0, 0.6]));
        assert!(w.clip_segment(vector![11.0, 0.0], vector![12.0, 5.0]).is_none());
    }

    #[test]
    fn polyline_splits_into_visible_runs() {
        let w = Window::unit_ten();
        let pts = [
            vector![1.0, 1.0],
            vector![2.0, 2.0],
            vector![2.0, 12.0],
            vector![3.0, 12.0],
            vector![3.0, 5.0],
            vector![4.0, 5.0],
        ];
        let runs = w.clip_polyline(&pts);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 3);
        assert!(close(runs[0][2], vector![2.0, 10.0]));
        assert!(close(runs[1][0], vector![3.0, 10.0]));
        assert!(close(*runs[1].last().unwrap(), vector![4.0, 5.0]));
    }

    #[test]
    fn inside_polyline_is_unchanged() {
        let pts = vec![vector![1.0, 1.0], vector![2.0, 3.0], vector![4.0, 2.0]];
        assert_eq!(Window::unit_ten().clip_polyline(&pts), vec![pts]);
    }

    #[test]
    fn region_polygon_loses_its_overshoot() {
        let region = Polygon::from_xy(&[0.0, 0.0, 10.0, 5.0], &[0.0, 10.6, 0.6, 5.6]);
        let clipped = Window::unit_ten().clip_polygon(&region.vertices);
        assert!(clipped.iter().all(|p| p.y <= 10.0 + 1e-12));
        assert!(clipped.iter().any(|p| close(*p, vector![0.0, 10.0])));
        assert!(clipped.iter().any(|p| close(*p, vector![0.6, 10.0])));
        assert_eq!(clipped.len(), 5);
    }

    #[test]
    fn outside_polygon_vanishes() {
        let sq = [
            vector![11.0, 11.0],
            vector![12.0, 11.0],
            vector![12.0, 12.0],
        ];
        assert!(Window::unit_ten().clip_polygon(&sq).is_empty());
    }
}
