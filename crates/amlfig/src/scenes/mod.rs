//! The two slide figures, built from literal constants.
//!
//! - `kmeans_voronoi`: two clusters, their centroids, the perpendicular
//!   bisector `y = -x + 10.6` and hand-drawn regions on either side.
//! - `knn_decision_boundary`: two classes, a query point with its
//!   neighborhood circle, and a spline boundary through four control points.
//!
//! Coordinates are illustrative, not computed by any clustering or
//! classification algorithm.

pub mod chart;
pub mod kmeans;
pub mod knn;

pub use kmeans::kmeans_voronoi;
pub use knn::knn_decision_boundary;

use std::fmt;
use std::path::{Path, PathBuf};

use nalgebra::Vector2;
use plotters::coord::Shift;
use plotters::prelude::{DrawingArea, DrawingBackend};

use crate::render::{render_pdf, RenderError};
use crate::spline::SplineError;

use chart::DrawResult;

/// Which figure to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneKind {
    KMeans,
    Knn,
}

impl SceneKind {
    pub const ALL: [SceneKind; 2] = [SceneKind::KMeans, SceneKind::Knn];

    /// Display name used in the confirmation line.
    pub fn display_name(&self) -> &'static str {
        match self {
            SceneKind::KMeans => "k-Means",
            SceneKind::Knn => "k-NN",
        }
    }

    /// File stem of every artifact written for this scene.
    pub fn stem(&self) -> &'static str {
        match self {
            SceneKind::KMeans => "kmeans_voronoi",
            SceneKind::Knn => "knn_decision_boundary",
        }
    }

    /// Output PDF file name.
    pub fn file_name(&self) -> String {
        format!("{}.pdf", self.stem())
    }

    /// Document title recorded in the PDF info dictionary.
    pub fn title(&self) -> &'static str {
        match self {
            SceneKind::KMeans => "k-Means Voronoi Diagram Visualization for AML",
            SceneKind::Knn => "k-NN Decision Boundary Visualization for AML",
        }
    }

    pub fn build(&self) -> Result<Scene, SplineError> {
        match self {
            SceneKind::KMeans => Ok(kmeans_voronoi()),
            SceneKind::Knn => knn_decision_boundary(),
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Named point list exported alongside a figure.
#[derive(Clone, Debug, PartialEq)]
pub struct DataSeries {
    pub name: &'static str,
    pub points: Vec<Vector2<f64>>,
}

impl DataSeries {
    pub fn new(name: &'static str, points: Vec<Vector2<f64>>) -> Self {
        Self { name, points }
    }
}

/// One figure: its kind plus the named geometry it is drawn from.
#[derive(Clone, Debug)]
pub struct Scene {
    pub kind: SceneKind,
    pub series: Vec<DataSeries>,
}

impl Scene {
    pub fn file_name(&self) -> String {
        self.kind.file_name()
    }

    /// Output path of the PDF inside `dir`.
    pub fn output_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }

    /// `✓ <name> plot saved to <filename>`.
    pub fn confirmation(&self) -> String {
        format!(
            "✓ {} plot saved to {}",
            self.kind.display_name(),
            self.file_name()
        )
    }

    pub fn series(&self, name: &str) -> Option<&DataSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Points of series `name`; empty if the scene has no such series.
    pub fn points(&self, name: &str) -> &[Vector2<f64>] {
        self.series(name).map(|s| s.points.as_slice()).unwrap_or(&[])
    }

    /// Draw the chart onto `root`.
    pub fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
        match self.kind {
            SceneKind::KMeans => kmeans::draw(self, root),
            SceneKind::Knn => knn::draw(self, root),
        }
    }

    /// PDF bytes with the scene title in the document info.
    pub fn render_pdf(&self) -> Result<Vec<u8>, RenderError> {
        render_pdf(Some(self.kind.title()), |root| self.draw(root))
    }

    /// Write the PDF to `path`, replacing any existing file; returns the byte count.
    pub fn save_pdf<P: AsRef<Path>>(&self, path: P) -> Result<usize, RenderError> {
        let bytes = self.render_pdf()?;
        std::fs::write(path, &bytes)?;
        Ok(bytes.len())
    }
}

/// Both scenes in presentation order.
pub fn all_scenes() -> Result<Vec<Scene>, SplineError> {
    SceneKind::ALL.iter().map(SceneKind::build).collect()
}

#[cfg(test)]
mod tests;
