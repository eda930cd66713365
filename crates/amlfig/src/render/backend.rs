//! Vector drawing backend for plotters.
//!
//! Plotters lays charts out on a pixel canvas with y growing downward. Every
//! primitive it hands over is emitted as PDF path or text operators in
//! points (y upward), so the result stays vector output. The canvas also
//! records the extent of everything visible, which becomes the tight page
//! box in `Canvas::into_page`.

use std::convert::Infallible;
use std::f64::consts::FRAC_PI_2;

use nalgebra::Vector2;
use plotters_backend::text_anchor::{HPos, VPos};
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend,
    DrawingErrorKind, FontTransform,
};

use crate::cfg::PT_PER_PX;
use crate::pdf::font::{encode_win_ansi, text_height, text_width, ASCENT};
use crate::pdf::{ContentStream, LineCap, LineJoin, Page, Resources, FONT_RESOURCE};

type DrawResult = Result<(), DrawingErrorKind<Infallible>>;

/// How a path is painted.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Paint {
    Fill,
    /// Stroke with a line width in points.
    Stroke(f64),
}

/// Page content collected from a chart, with the extent it covers.
#[derive(Debug)]
pub struct Canvas {
    size: (u32, u32),
    body: ContentStream,
    resources: Resources,
    bounds: Option<(Vector2<f64>, Vector2<f64>)>,
}

impl Canvas {
    /// Empty canvas of `size` pixels.
    pub fn new(size: (u32, u32)) -> Self {
        let mut body = ContentStream::new();
        body.line_cap(LineCap::Butt);
        body.line_join(LineJoin::Round);
        Self {
            size,
            body,
            resources: Resources::new(),
            bounds: None,
        }
    }

    /// Full canvas size in points.
    pub fn size_pt(&self) -> (f64, f64) {
        (
            f64::from(self.size.0) * PT_PER_PX,
            f64::from(self.size.1) * PT_PER_PX,
        )
    }

    /// Lower-left and upper-right corner of everything visible so far, in points.
    pub fn bounds(&self) -> Option<(Vector2<f64>, Vector2<f64>)> {
        self.bounds
    }

    /// Crop to the drawn extent plus `pad` points on every side.
    ///
    /// A canvas with nothing visible keeps its full size.
    pub fn into_page(self, pad: f64) -> Page {
        let Some((lo, hi)) = self.bounds else {
            let (width, height) = self.size_pt();
            return Page {
                width,
                height,
                content: self.body,
                resources: self.resources,
            };
        };
        let origin = lo - Vector2::new(pad, pad);
        let mut content = ContentStream::new();
        content.translate(-origin.x, -origin.y);
        content.append(&self.body);
        Page {
            width: hi.x - lo.x + 2.0 * pad,
            height: hi.y - lo.y + 2.0 * pad,
            content,
            resources: self.resources,
        }
    }

    /// Canvas pixel to page point.
    fn to_pt(&self, (x, y): (f64, f64)) -> Vector2<f64> {
        Vector2::new(x * PT_PER_PX, (f64::from(self.size.1) - y) * PT_PER_PX)
    }

    fn coord(&self, (x, y): BackendCoord) -> Vector2<f64> {
        self.to_pt((f64::from(x), f64::from(y)))
    }

    fn cover(&mut self, p: Vector2<f64>, reach: f64) {
        let r = Vector2::new(reach, reach);
        let (lo, hi) = (p - r, p + r);
        self.bounds = Some(match self.bounds {
            None => (lo, hi),
            Some((a, b)) => (a.inf(&lo), b.sup(&hi)),
        });
    }

    /// Emit one closed or open path in `color`, isolated in its own graphics state.
    fn path(&mut self, points: &[Vector2<f64>], closed: bool, color: BackendColor, paint: Paint) {
        if points.is_empty() || color.alpha <= 0.0 {
            return;
        }
        let reach = match paint {
            Paint::Fill => 0.0,
            Paint::Stroke(w) => w / 2.0,
        };
        for p in points {
            self.cover(*p, reach);
        }
        self.body.save();
        self.set_paint(color, paint);
        if closed {
            self.body.polygon(points);
        } else {
            self.body.polyline(points);
        }
        self.finish(paint);
        self.body.restore();
    }

    fn set_paint(&mut self, color: BackendColor, paint: Paint) {
        match paint {
            Paint::Fill => {
                if color.alpha < 1.0 {
                    let gs = self.resources.alpha_state(color.alpha, 1.0);
                    self.body.graphics_state(&gs);
                }
                self.body.fill_color(color.rgb);
            }
            Paint::Stroke(w) => {
                if color.alpha < 1.0 {
                    let gs = self.resources.alpha_state(1.0, color.alpha);
                    self.body.graphics_state(&gs);
                }
                self.body.stroke_color(color.rgb);
                self.body.line_width(w);
            }
        }
    }

    fn finish(&mut self, paint: Paint) {
        match paint {
            Paint::Fill => self.body.fill(),
            Paint::Stroke(_) => self.body.stroke(),
        }
    }
}

/// Stroke width of a plotters style, in points; `None` for zero-width strokes.
fn stroke_pt<S: BackendStyle>(style: &S) -> Option<f64> {
    match style.stroke_width() {
        0 => None,
        w => Some(f64::from(w) * PT_PER_PX),
    }
}

/// Plotters' quarter-turn text transforms, applied to a float offset.
fn rotate(t: &FontTransform, x: f64, y: f64) -> (f64, f64) {
    match t {
        FontTransform::None => (x, y),
        FontTransform::Rotate90 => (-y, x),
        FontTransform::Rotate180 => (-x, -y),
        FontTransform::Rotate270 => (y, -x),
    }
}

/// Counterclockwise baseline angle on the page for a canvas transform.
fn page_angle(t: &FontTransform) -> f64 {
    match t {
        FontTransform::None => 0.0,
        FontTransform::Rotate90 => -FRAC_PI_2,
        FontTransform::Rotate180 => 2.0 * FRAC_PI_2,
        FontTransform::Rotate270 => FRAC_PI_2,
    }
}

/// `DrawingBackend` that writes into a borrowed `Canvas`.
pub struct PdfBackend<'a> {
    canvas: &'a mut Canvas,
}

impl<'a> PdfBackend<'a> {
    pub fn new(canvas: &'a mut Canvas) -> Self {
        Self { canvas }
    }
}

impl DrawingBackend for PdfBackend<'_> {
    type ErrorType = Infallible;

    fn get_size(&self) -> (u32, u32) {
        self.canvas.size
    }

    fn ensure_prepared(&mut self) -> DrawResult {
        Ok(())
    }

    fn present(&mut self) -> DrawResult {
        Ok(())
    }

    fn draw_pixel(&mut self, (x, y): BackendCoord, color: BackendColor) -> DrawResult {
        let c = &*self.canvas;
        let quad = [
            c.coord((x, y)),
            c.coord((x + 1, y)),
            c.coord((x + 1, y + 1)),
            c.coord((x, y + 1)),
        ];
        self.canvas.path(&quad, true, color, Paint::Fill);
        Ok(())
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> DrawResult {
        self.draw_path([from, to], style)
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> DrawResult {
        let color = style.color();
        let paint = if fill {
            Paint::Fill
        } else {
            match stroke_pt(style) {
                Some(w) => Paint::Stroke(w),
                None => return Ok(()),
            }
        };
        if color.alpha <= 0.0 {
            return Ok(());
        }
        let canvas = &mut *self.canvas;
        let (l, t) = upper_left;
        let (r, b) = bottom_right;
        let lo = canvas.coord((l.min(r), t.max(b)));
        let hi = canvas.coord((l.max(r), t.min(b)));
        let reach = match paint {
            Paint::Fill => 0.0,
            Paint::Stroke(w) => w / 2.0,
        };
        canvas.cover(lo, reach);
        canvas.cover(hi, reach);
        canvas.body.save();
        canvas.set_paint(color, paint);
        canvas.body.rect(lo.x, lo.y, hi.x - lo.x, hi.y - lo.y);
        canvas.finish(paint);
        canvas.body.restore();
        Ok(())
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> DrawResult {
        let Some(w) = stroke_pt(style) else {
            return Ok(());
        };
        let points: Vec<Vector2<f64>> = path.into_iter().map(|p| self.canvas.coord(p)).collect();
        if points.len() >= 2 {
            self.canvas.path(&points, false, style.color(), Paint::Stroke(w));
        }
        Ok(())
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> DrawResult {
        let color = style.color();
        let paint = if fill {
            Paint::Fill
        } else {
            match stroke_pt(style) {
                Some(w) => Paint::Stroke(w),
                None => return Ok(()),
            }
        };
        if color.alpha <= 0.0 {
            return Ok(());
        }
        let c = self.canvas.coord(center);
        let r = f64::from(radius) * PT_PER_PX;
        let reach = match paint {
            Paint::Fill => r,
            Paint::Stroke(w) => r + w / 2.0,
        };
        let canvas = &mut *self.canvas;
        canvas.cover(c, reach);
        canvas.body.save();
        canvas.set_paint(color, paint);
        canvas.body.ellipse(c, r, r);
        canvas.finish(paint);
        canvas.body.restore();
        Ok(())
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> DrawResult {
        let points: Vec<Vector2<f64>> = vert.into_iter().map(|p| self.canvas.coord(p)).collect();
        if points.len() >= 3 {
            self.canvas.path(&points, true, style.color(), Paint::Fill);
        }
        Ok(())
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> DrawResult {
        let color = style.color();
        if text.is_empty() || color.alpha <= 0.0 {
            return Ok(());
        }
        let size = style.size();
        let (w, h) = (text_width(size, text), text_height(size));
        let anchor = style.anchor();
        let left = match anchor.h_pos {
            HPos::Left => 0.0,
            HPos::Center => -w / 2.0,
            HPos::Right => -w,
        };
        let top = match anchor.v_pos {
            VPos::Top => 0.0,
            VPos::Center => -h / 2.0,
            VPos::Bottom => -h,
        };
        let t = style.transform();
        let (px, py) = (f64::from(pos.0), f64::from(pos.1));
        let at = |dx: f64, dy: f64| {
            let (rx, ry) = rotate(&t, dx, dy);
            (px + rx, py + ry)
        };

        let canvas = &mut *self.canvas;
        for (dx, dy) in [(left, top), (left + w, top), (left, top + h), (left + w, top + h)] {
            let corner = canvas.to_pt(at(dx, dy));
            canvas.cover(corner, 0.0);
        }
        let origin = canvas.to_pt(at(left, top + ASCENT * size));
        canvas.body.save();
        if color.alpha < 1.0 {
            let gs = canvas.resources.alpha_state(color.alpha, 1.0);
            canvas.body.graphics_state(&gs);
        }
        canvas.body.fill_color(color.rgb);
        canvas.body.text(
            FONT_RESOURCE,
            size * PT_PER_PX,
            origin,
            page_angle(&t),
            &encode_win_ansi(text),
        );
        canvas.body.restore();
        Ok(())
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<Infallible>> {
        let size = style.size();
        Ok((
            text_width(size, text).ceil() as u32,
            text_height(size).ceil() as u32,
        ))
    }
}
