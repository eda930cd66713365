//! k-Means partition of two transaction clusters.

use nalgebra::Vector2;
use plotters::coord::Shift;
use plotters::prelude::{Color, DrawingArea, DrawingBackend, RGBColor, RED};

use crate::cfg::stroke_px;
use crate::geom::{Line, Polygon, Polyline};

use super::chart::{
    axes, clipped_line, cross, edged_circle, fill_region, frame, grid, handle_center, legend,
    line_handle, DrawResult,
};
use super::{DataSeries, Scene, SceneKind};

/// Low-risk transactions.
pub const CLUSTER1_X: [f64; 6] = [1.0, 2.5, 1.5, 3.0, 2.0, 2.8];
pub const CLUSTER1_Y: [f64; 6] = [1.0, 2.0, 2.5, 1.2, 0.8, 3.0];
/// High-risk transactions.
pub const CLUSTER2_X: [f64; 6] = [7.0, 8.5, 7.5, 6.5, 8.0, 9.0];
pub const CLUSTER2_Y: [f64; 6] = [7.0, 8.5, 6.0, 9.0, 7.8, 6.5];

pub const CENTROID1: (f64, f64) = (2.2, 1.6);
pub const CENTROID2: (f64, f64) = (7.7, 7.4);

/// Perpendicular bisector between the centroids, drawn over x ∈ [0, 10].
pub const BISECTOR: Line = Line {
    slope: -1.0,
    intercept: 10.6,
};
pub const BOUNDARY_X: [f64; 2] = [0.0, 10.0];

// Hand-drawn quadrilaterals on either side of the bisector.
pub const REGION1_X: [f64; 4] = [0.0, 0.0, 10.0, 5.0];
pub const REGION1_Y: [f64; 4] = [0.0, 10.6, 0.6, 5.6];
pub const REGION2_X: [f64; 4] = [0.0, 5.0, 10.0, 10.0];
pub const REGION2_Y: [f64; 4] = [10.6, 5.6, 0.6, 10.0];

pub const CLUSTER1_COLOR: RGBColor = RGBColor(0x00, 0xA0, 0x87);
pub const CLUSTER2_COLOR: RGBColor = RGBColor(0x3C, 0x54, 0x88);
pub const CENTROID_COLOR: RGBColor = RGBColor(0xE6, 0x4B, 0x35);

const REGION_ALPHA: f64 = 0.12;
const BOUNDARY_WIDTH: f64 = 2.5;
const POINT_AREA: f64 = 80.0;
const CENTROID_AREA: f64 = 250.0;
const CENTROID_WIDTH: f64 = 4.0;

pub fn kmeans_voronoi() -> Scene {
    let cluster1 = Polyline::from_xy(&CLUSTER1_X, &CLUSTER1_Y).points;
    let cluster2 = Polyline::from_xy(&CLUSTER2_X, &CLUSTER2_Y).points;
    let c1 = Vector2::new(CENTROID1.0, CENTROID1.1);
    let c2 = Vector2::new(CENTROID2.0, CENTROID2.1);

    Scene {
        kind: SceneKind::KMeans,
        series: vec![
            DataSeries::new("cluster1", cluster1),
            DataSeries::new("cluster2", cluster2),
            DataSeries::new("centroids", vec![c1, c2]),
            DataSeries::new("boundary", BISECTOR.sample(&BOUNDARY_X).points),
            DataSeries::new("region1", Polygon::from_xy(&REGION1_X, &REGION1_Y).vertices),
            DataSeries::new("region2", Polygon::from_xy(&REGION2_X, &REGION2_Y).vertices),
        ],
    }
}

/// Paint the scene; legend rows follow the order the series are drawn in.
pub(super) fn draw<DB: DrawingBackend>(
    scene: &Scene,
    root: &DrawingArea<DB, Shift>,
) -> DrawResult<DB> {
    let mut chart = axes(
        root,
        "Feature 1 (z.B. Betrag)",
        "Feature 2 (z.B. Land-Risiko-Score)",
    )?;

    fill_region(&mut chart, scene.points("region1"), CLUSTER1_COLOR, REGION_ALPHA)?;
    fill_region(&mut chart, scene.points("region2"), CLUSTER2_COLOR, REGION_ALPHA)?;
    grid(&mut chart)?;
    frame(&mut chart)?;

    let boundary = RED.stroke_width(stroke_px(BOUNDARY_WIDTH));
    chart
        .draw_series(clipped_line(scene.points("boundary"), boundary))?
        .label("Decision Boundary")
        .legend(move |at| line_handle(at, boundary));

    for (name, label, color) in [
        ("cluster1", "Cluster 1", CLUSTER1_COLOR),
        ("cluster2", "Cluster 2", CLUSTER2_COLOR),
    ] {
        chart
            .draw_series(
                scene
                    .points(name)
                    .iter()
                    .map(|p| edged_circle::<_, DB>((p.x, p.y), POINT_AREA, color, 1.0)),
            )?
            .label(label)
            .legend(move |at| {
                edged_circle::<_, DB>(handle_center(at), POINT_AREA, color, 1.0)
            });
    }

    // one legend row for both centroids
    let centroids = scene.points("centroids");
    let marker = |p: &Vector2<f64>| {
        cross((p.x, p.y), CENTROID_AREA, CENTROID_COLOR, CENTROID_WIDTH)
    };
    chart
        .draw_series(centroids.iter().take(1).map(marker))?
        .label("Zentroid")
        .legend(|at| {
            cross(
                handle_center(at),
                CENTROID_AREA,
                CENTROID_COLOR,
                CENTROID_WIDTH,
            )
        });
    chart.draw_series(centroids.iter().skip(1).map(marker))?;

    legend(&mut chart)
}
