//! Page content stream builder (PDF graphics operators).
//!
//! Operators are appended as text, one per line, with coordinates rounded to
//! 1/1000 pt so repeated renders are byte-identical.

use nalgebra::Vector2;

use crate::cfg::KAPPA;

use super::font::literal_string;

/// Line cap style (`J`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCap {
    Butt = 0,
    Round = 1,
    Projecting = 2,
}

/// Line join style (`j`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineJoin {
    Miter = 0,
    Round = 1,
    Bevel = 2,
}

/// Format a coordinate with at most three decimals and no trailing zeros.
pub(crate) fn num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn unit_rgb((r, g, b): (u8, u8, u8)) -> String {
    let c = |v: u8| num(f64::from(v) / 255.0);
    format!("{} {} {}", c(r), c(g), c(b))
}

#[derive(Clone, Debug, Default)]
pub struct ContentStream {
    buf: String,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    fn op(&mut self, line: &str) {
        self.buf.push_str(line);
        self.buf.push('\n');
    }

    pub fn save(&mut self) {
        self.op("q");
    }

    pub fn restore(&mut self) {
        self.op("Q");
    }

    pub fn fill_color(&mut self, rgb: (u8, u8, u8)) {
        self.op(&format!("{} rg", unit_rgb(rgb)));
    }

    pub fn stroke_color(&mut self, rgb: (u8, u8, u8)) {
        self.op(&format!("{} RG", unit_rgb(rgb)));
    }

    pub fn line_width(&mut self, w: f64) {
        self.op(&format!("{} w", num(w)));
    }

    pub fn line_cap(&mut self, cap: LineCap) {
        self.op(&format!("{} J", cap as u8));
    }

    pub fn line_join(&mut self, join: LineJoin) {
        self.op(&format!("{} j", join as u8));
    }

    /// Shift user space by `(dx, dy)` (`cm`).
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.op(&format!("1 0 0 1 {} {} cm", num(dx), num(dy)));
    }

    /// Select a named `ExtGState` resource.
    pub fn graphics_state(&mut self, name: &str) {
        self.op(&format!("/{name} gs"));
    }

    pub fn move_to(&mut self, p: Vector2<f64>) {
        self.op(&format!("{} {} m", num(p.x), num(p.y)));
    }

    pub fn line_to(&mut self, p: Vector2<f64>) {
        self.op(&format!("{} {} l", num(p.x), num(p.y)));
    }

    pub fn curve_to(&mut self, c1: Vector2<f64>, c2: Vector2<f64>, p: Vector2<f64>) {
        self.op(&format!(
            "{} {} {} {} {} {} c",
            num(c1.x),
            num(c1.y),
            num(c2.x),
            num(c2.y),
            num(p.x),
            num(p.y)
        ));
    }

    pub fn close_path(&mut self) {
        self.op("h");
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.op(&format!("{} {} {} {} re", num(x), num(y), num(w), num(h)));
    }

    pub fn fill(&mut self) {
        self.op("f");
    }

    pub fn stroke(&mut self) {
        self.op("S");
    }


    /// Open polyline path; no-op for an empty slice.
    pub fn polyline(&mut self, points: &[Vector2<f64>]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.move_to(*first);
        for p in rest {
            self.line_to(*p);
        }
    }

    /// Closed polygon path.
    pub fn polygon(&mut self, points: &[Vector2<f64>]) {
        if points.is_empty() {
            return;
        }
        self.polyline(points);
        self.close_path();
    }

    /// Axis-aligned ellipse from four cubic Bézier quarter arcs.
    pub fn ellipse(&mut self, c: Vector2<f64>, rx: f64, ry: f64) {
        let kx = KAPPA * rx;
        let ky = KAPPA * ry;
        let v = |x: f64, y: f64| Vector2::new(c.x + x, c.y + y);
        self.move_to(v(rx, 0.0));
        self.curve_to(v(rx, ky), v(kx, ry), v(0.0, ry));
        self.curve_to(v(-kx, ry), v(-rx, ky), v(-rx, 0.0));
        self.curve_to(v(-rx, -ky), v(-kx, -ry), v(0.0, -ry));
        self.curve_to(v(kx, -ry), v(rx, -ky), v(rx, 0.0));
        self.close_path();
    }

    /// Show WinAnsi-encoded `text` with font resource `font` at `size`,
    /// baseline origin `at`, rotated counterclockwise by `angle` radians.
    pub fn text(&mut self, font: &str, size: f64, at: Vector2<f64>, angle: f64, text: &[u8]) {
        let (s, c) = angle.sin_cos();
        self.op("BT");
        self.op(&format!("/{font} {} Tf", num(size)));
        self.op(&format!(
            "{} {} {} {} {} {} Tm",
            num(c),
            num(s),
            num(-s),
            num(c),
            num(at.x),
            num(at.y)
        ));
        self.op(&format!("{} Tj", literal_string(text)));
        self.op("ET");
    }

    /// Append every operator of `other`.
    pub fn append(&mut self, other: &ContentStream) {
        self.buf.push_str(&other.buf);
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
