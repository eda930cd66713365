//! k-NN decision boundary between normal and suspicious transactions.

use nalgebra::Vector2;
use plotters::coord::Shift;
use plotters::element::PathElement;
use plotters::prelude::{Color, DrawingArea, DrawingBackend, RGBColor, BLACK, RED};

use crate::cfg::stroke_px;
use crate::geom::{Polygon, Polyline};
use crate::spline::{CubicSpline, SplineError};

use super::chart::{
    axes, clipped_line, cross, dashed_handle, dashed_ring, edged_circle, edged_triangle,
    fill_region, frame, grid, handle_center, legend, line_handle, DrawResult,
};
use super::{DataSeries, Scene, SceneKind};

/// Class A, unremarkable transactions.
pub const CLASS_A_X: [f64; 6] = [1.2, 2.0, 3.5, 1.8, 0.8, 2.5];
pub const CLASS_A_Y: [f64; 6] = [1.5, 3.0, 2.5, 0.8, 3.5, 1.2];
/// Class B, suspicious transactions.
pub const CLASS_B_X: [f64; 6] = [6.5, 7.8, 8.5, 6.0, 7.2, 8.0];
pub const CLASS_B_Y: [f64; 6] = [6.0, 8.0, 7.0, 7.5, 5.5, 9.0];

/// Boundary control points, x strictly increasing.
pub const BOUNDARY_X: [f64; 4] = [3.8, 4.5, 4.9, 5.3];
pub const BOUNDARY_Y: [f64; 4] = [7.2, 3.0, 4.8, 0.0];
/// Samples of the smooth boundary.
pub const BOUNDARY_SAMPLES: usize = 300;

/// The new transaction to classify.
pub const QUERY: (f64, f64) = (5.2, 5.0);
/// Neighborhood radius drawn around the query (decorative).
pub const NEIGHBORHOOD_RADIUS: f64 = 1.45;

pub const CLASS_A_COLOR: RGBColor = RGBColor(0x4D, 0xBB, 0xD5);
pub const CLASS_B_COLOR: RGBColor = RGBColor(0xE6, 0x4B, 0x35);

const REGION_ALPHA: f64 = 0.15;
const BOUNDARY_WIDTH: f64 = 2.5;
const CLASS_A_AREA: f64 = 80.0;
const CLASS_B_AREA: f64 = 100.0;
const QUERY_AREA: f64 = 200.0;
const QUERY_WIDTH: f64 = 3.0;
const RING_WIDTH: f64 = 1.5;

fn pts(xs: &[f64], ys: &[f64]) -> Vec<Vector2<f64>> {
    Polyline::from_xy(xs, ys).points
}

/// Left region: window corners, down the curve, back along the bottom edge.
pub fn region_a(curve: &Polyline) -> Polygon {
    let mut v = pts(&[0.0, 0.0, 3.8], &[0.0, 10.0, 7.2]);
    v.extend_from_slice(&curve.points);
    v.extend(pts(&[5.3, 4.5, 0.0], &[0.0, 0.0, 0.0]));
    Polygon::new(v)
}

/// Right region: window corners, up the reversed curve, across the top edge.
pub fn region_b(curve: &Polyline) -> Polygon {
    let mut v = pts(&[10.0, 10.0, 10.0, 5.3], &[0.0, 10.0, 10.0, 0.0]);
    v.extend(curve.reversed().points);
    v.extend(pts(&[3.8, 0.0, 0.0], &[7.2, 10.0, 10.0]));
    Polygon::new(v)
}

/// The smooth boundary: cubic spline through the control points, resampled.
pub fn boundary_curve() -> Result<Polyline, SplineError> {
    let spline = CubicSpline::not_a_knot(&BOUNDARY_X, &BOUNDARY_Y)?;
    Ok(spline.resample(BOUNDARY_SAMPLES))
}

pub fn knn_decision_boundary() -> Result<Scene, SplineError> {
    let curve = boundary_curve()?;
    let area_a = region_a(&curve);
    let area_b = region_b(&curve);

    Ok(Scene {
        kind: SceneKind::Knn,
        series: vec![
            DataSeries::new("class_a", pts(&CLASS_A_X, &CLASS_A_Y)),
            DataSeries::new("class_b", pts(&CLASS_B_X, &CLASS_B_Y)),
            DataSeries::new("query", vec![Vector2::new(QUERY.0, QUERY.1)]),
            DataSeries::new("control_points", pts(&BOUNDARY_X, &BOUNDARY_Y)),
            DataSeries::new("boundary", curve.points),
            DataSeries::new("region_a", area_a.vertices),
            DataSeries::new("region_b", area_b.vertices),
        ],
    })
}

/// Paint the scene; legend rows follow the order the series are drawn in.
pub(super) fn draw<DB: DrawingBackend>(
    scene: &Scene,
    root: &DrawingArea<DB, Shift>,
) -> DrawResult<DB> {
    let mut chart = axes(
        root,
        "Feature 1 (z.B. Transaktionshöhe)",
        "Feature 2 (z.B. Häufigkeit)",
    )?;

    fill_region(&mut chart, scene.points("region_a"), CLASS_A_COLOR, REGION_ALPHA)?;
    fill_region(&mut chart, scene.points("region_b"), CLASS_B_COLOR, REGION_ALPHA)?;
    grid(&mut chart)?;
    if let Some(q) = scene.points("query").first() {
        chart.draw_series(dashed_ring(*q, NEIGHBORHOOD_RADIUS, RING_WIDTH))?;
    }
    frame(&mut chart)?;

    let boundary = RED.stroke_width(stroke_px(BOUNDARY_WIDTH));
    chart
        .draw_series(clipped_line(scene.points("boundary"), boundary))?
        .label("Decision Boundary")
        .legend(move |at| line_handle(at, boundary));

    chart
        .draw_series(
            scene
                .points("class_a")
                .iter()
                .map(|p| edged_circle::<_, DB>((p.x, p.y), CLASS_A_AREA, CLASS_A_COLOR, 1.0)),
        )?
        .label("Unauffällig")
        .legend(|at| edged_circle::<_, DB>(handle_center(at), CLASS_A_AREA, CLASS_A_COLOR, 1.0));

    chart
        .draw_series(
            scene
                .points("class_b")
                .iter()
                .map(|p| edged_triangle::<_, DB>((p.x, p.y), CLASS_B_AREA, CLASS_B_COLOR, 1.0)),
        )?
        .label("Auffällig")
        .legend(|at| {
            edged_triangle::<_, DB>(handle_center(at), CLASS_B_AREA, CLASS_B_COLOR, 1.0)
        });

    chart
        .draw_series(
            scene
                .points("query")
                .iter()
                .map(|p| cross((p.x, p.y), QUERY_AREA, BLACK, QUERY_WIDTH)),
        )?
        .label("Neue Tx")
        .legend(|at| cross(handle_center(at), QUERY_AREA, BLACK, QUERY_WIDTH));

    // legend-only row describing the dashed circle
    chart
        .draw_series(std::iter::empty::<PathElement<(f64, f64)>>())?
        .label("k-Umgebung")
        .legend(|at| dashed_handle(at, RING_WIDTH));

    legend(&mut chart)
}
