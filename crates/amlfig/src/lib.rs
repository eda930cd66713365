//! Static illustration figures for AML classification slides.
//!
//! Two scenes are provided: a k-Means partition with a linear bisector and a
//! k-NN decision boundary drawn as a cubic interpolating spline. Every value in
//! a scene is a literal constant; nothing here trains or evaluates a model.
//!
//! Pipeline
//! - `scenes` holds the literal geometry and draws it with plotters.
//! - `render` is the plotters backend that records PDF operators and crops
//!   the page to the drawing.
//! - `pdf` serializes the page into a deterministic PDF 1.4 file.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.

pub mod cfg;
pub mod geom;
pub mod pdf;
pub mod render;
pub mod scenes;
pub mod spline;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom::{Line, Polygon, Polyline, Window};
pub use nalgebra::Vector2 as Vec2;
pub use render::{render_page, render_pdf, RenderError};
pub use scenes::{all_scenes, kmeans_voronoi, knn_decision_boundary, Scene, SceneKind};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom::{Line, Polygon, Polyline, Window};
    pub use crate::render::{RenderError, PdfBackend};
    pub use crate::scenes::{DataSeries, Scene, SceneKind};
    pub use crate::spline::{linspace, CubicSpline, SplineError};
    pub use nalgebra::Vector2 as Vec2;
}

/// Shorthand for building a point.
#[inline]
pub fn pt(x: f64, y: f64) -> Vec2<f64> {
    Vec2::new(x, y)
}
