//! Axes, decorations and marker shapes shared by both scenes.
//!
//! Sizes are given in points (marker sizes as areas in pt², the usual
//! scatter convention) and converted to canvas pixels here.

use nalgebra::Vector2;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::element::{ComposedElement, DashedPathElement};
use plotters::prelude::*;
use plotters_backend::BackendCoord;

use crate::cfg::{
    px, stroke_px, DASHED_PATTERN, DOTTED_PATTERN, FILL_EDGE_WIDTH, FONT_SIZE, GRID_ALPHA,
    GRID_GRAY, GRID_WIDTH, LABEL_FONT_SIZE, LABEL_PAD, LAYOUT_PAD, LEGEND_BORDER_AXES_PAD,
    LEGEND_BORDER_PAD, LEGEND_EDGE_GRAY, LEGEND_FONT_SIZE, LEGEND_FRAME_ALPHA,
    LEGEND_HANDLE_LENGTH, LEGEND_HANDLE_TEXT_PAD, SPINE_WIDTH, TICK_LENGTH, TICK_PAD, TICK_STEP,
};
use crate::geom::Window;
use crate::pdf::font::{text_height, text_width};

/// Chart over the `[0,10]²` data window.
pub type Axes<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

pub type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Filled circle with a stroked edge.
pub type EdgedCircle<C, DB> =
    ComposedElement<C, DB, Circle<BackendCoord, i32>, Circle<BackendCoord, i32>>;
/// Filled upward triangle with a stroked edge.
pub type EdgedTriangle<C, DB> =
    ComposedElement<C, DB, Polygon<BackendCoord>, PathElement<BackendCoord>>;

/// Segments used for the neighborhood circle.
const RING_SEGMENTS: usize = 180;

fn tick_label(v: &f64) -> String {
    format!("{v:.0}")
}

/// Set up the axes: window, ticks every `TICK_STEP`, tick labels and axis labels.
///
/// The label areas hold tick, tick label and axis label; plotters keeps the
/// tick labels twice the tick length away from the axis.
pub fn axes<'a, DB: DrawingBackend>(
    root: &'a DrawingArea<DB, Shift>,
    xlabel: &str,
    ylabel: &str,
) -> Result<Axes<'a, DB>, DrawingAreaErrorKind<DB::ErrorType>> {
    let window = Window::unit_ten();
    let outer = TICK_LENGTH + TICK_PAD + LABEL_PAD + text_height(LABEL_FONT_SIZE);
    let mut chart = ChartBuilder::on(root)
        .margin(px(LAYOUT_PAD))
        .x_label_area_size(px(outer + text_height(FONT_SIZE)))
        .y_label_area_size(px(outer + text_width(FONT_SIZE, "10")))
        .build_cartesian_2d(window.x.0..window.x.1, window.y.0..window.y.1)?;

    let ticks = ((window.x.1 - window.x.0) / TICK_STEP).round() as usize + 1;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(ticks)
        .y_labels(ticks)
        .x_label_formatter(&tick_label)
        .y_label_formatter(&tick_label)
        .label_style(("sans-serif", px(FONT_SIZE)))
        .axis_desc_style(("sans-serif", px(LABEL_FONT_SIZE)))
        .axis_style(BLACK.stroke_width(stroke_px(SPINE_WIDTH)))
        .set_all_tick_mark_size(px(TICK_LENGTH))
        .x_desc(xlabel)
        .y_desc(ylabel)
        .draw()?;
    Ok(chart)
}

/// Dash and gap lengths in pixels for a pattern at line width `width` pt.
pub fn dash_px(pattern: [f64; 2], width: f64) -> (u32, u32) {
    (stroke_px(pattern[0] * width), stroke_px(pattern[1] * width))
}

/// Dotted grid at every tick, clipped to the window by construction.
pub fn grid<DB: DrawingBackend>(chart: &mut Axes<'_, DB>) -> DrawResult<DB> {
    let (dash, gap) = dash_px(DOTTED_PATTERN, GRID_WIDTH);
    let style = RGBColor(GRID_GRAY, GRID_GRAY, GRID_GRAY)
        .mix(GRID_ALPHA)
        .stroke_width(stroke_px(GRID_WIDTH));
    let w = Window::unit_ten();
    let n = ((w.x.1 - w.x.0) / TICK_STEP).round() as usize;
    for t in (0..=n).map(|i| w.x.0 + i as f64 * TICK_STEP) {
        chart.draw_series(DashedLineSeries::new(
            vec![(t, w.y.0), (t, w.y.1)],
            dash,
            gap,
            style,
        ))?;
        chart.draw_series(DashedLineSeries::new(
            vec![(w.x.0, t), (w.x.1, t)],
            dash,
            gap,
            style,
        ))?;
    }
    Ok(())
}

/// Closed frame around the window.
pub fn frame<DB: DrawingBackend>(chart: &mut Axes<'_, DB>) -> DrawResult<DB> {
    let w = Window::unit_ten();
    chart.draw_series(std::iter::once(Rectangle::new(
        [(w.x.0, w.y.0), (w.x.1, w.y.1)],
        BLACK.stroke_width(stroke_px(SPINE_WIDTH)),
    )))?;
    Ok(())
}

fn xy(points: &[Vector2<f64>]) -> Vec<(f64, f64)> {
    points.iter().map(|p| (p.x, p.y)).collect()
}

/// Translucent region with an outline of the same color and alpha.
///
/// The face is clipped as a polygon; the outline is the original closed
/// boundary clipped as a polyline, so no edge appears along the cut.
pub fn fill_region<DB: DrawingBackend>(
    chart: &mut Axes<'_, DB>,
    vertices: &[Vector2<f64>],
    color: RGBColor,
    alpha: f64,
) -> DrawResult<DB> {
    let w = Window::unit_ten();
    let face = w.clip_polygon(vertices);
    if face.is_empty() {
        return Ok(());
    }
    chart.draw_series(std::iter::once(Polygon::new(xy(&face), color.mix(alpha))))?;

    let mut ring = vertices.to_vec();
    ring.push(vertices[0]);
    let edge = color.mix(alpha).stroke_width(stroke_px(FILL_EDGE_WIDTH));
    chart.draw_series(
        w.clip_polyline(&ring)
            .into_iter()
            .map(|run| PathElement::new(xy(&run), edge)),
    )?;
    Ok(())
}

/// The visible runs of `points`, one path each.
pub fn clipped_line(
    points: &[Vector2<f64>],
    style: ShapeStyle,
) -> Vec<PathElement<(f64, f64)>> {
    Window::unit_ten()
        .clip_polyline(points)
        .into_iter()
        .map(|run| PathElement::new(xy(&run), style))
        .collect()
}

/// Dashed circle of `radius` data units around `center`.
///
/// Sampled in data space, so unequal axis scales draw it as an ellipse.
pub fn dashed_ring(
    center: Vector2<f64>,
    radius: f64,
    width: f64,
) -> DashedLineSeries<std::vec::IntoIter<(f64, f64)>, u32> {
    let points: Vec<(f64, f64)> = (0..=RING_SEGMENTS)
        .map(|i| {
            let a = std::f64::consts::TAU * i as f64 / RING_SEGMENTS as f64;
            (center.x + radius * a.cos(), center.y + radius * a.sin())
        })
        .collect();
    let (dash, gap) = dash_px(DASHED_PATTERN, width);
    DashedLineSeries::new(points, dash, gap, BLACK.stroke_width(stroke_px(width)))
}

/// Pixel half size of a marker with area `area` pt².
fn half_size(area: f64) -> i32 {
    px(area.sqrt() / 2.0).round() as i32
}

pub fn edged_circle<C, DB: DrawingBackend>(
    at: C,
    area: f64,
    face: RGBColor,
    edge_width: f64,
) -> EdgedCircle<C, DB> {
    let r = half_size(area);
    EmptyElement::at(at)
        + Circle::new((0, 0), r, face.filled())
        + Circle::new((0, 0), r, BLACK.stroke_width(stroke_px(edge_width)))
}

pub fn edged_triangle<C, DB: DrawingBackend>(
    at: C,
    area: f64,
    face: RGBColor,
    edge_width: f64,
) -> EdgedTriangle<C, DB> {
    let h = half_size(area);
    let corners = vec![(0, -h), (-h, h), (h, h)];
    let mut outline = corners.clone();
    outline.push(corners[0]);
    EmptyElement::at(at)
        + Polygon::new(corners, face.filled())
        + PathElement::new(outline, BLACK.stroke_width(stroke_px(edge_width)))
}

/// Diagonal cross marker, stroked in `color`.
pub fn cross<C>(at: C, area: f64, color: RGBColor, width: f64) -> Cross<C, i32> {
    Cross::new(at, half_size(area), color.stroke_width(stroke_px(width)))
}

/// Length of a legend handle in pixels.
pub fn handle_px() -> i32 {
    px(LEGEND_HANDLE_LENGTH * LEGEND_FONT_SIZE).round() as i32
}

/// Straight legend handle starting at `(x, y)`.
pub fn line_handle((x, y): BackendCoord, style: ShapeStyle) -> PathElement<BackendCoord> {
    PathElement::new(vec![(x, y), (x + handle_px(), y)], style)
}

/// Dashed legend handle starting at `(x, y)`.
pub fn dashed_handle(
    (x, y): BackendCoord,
    width: f64,
) -> DashedPathElement<std::vec::IntoIter<BackendCoord>, u32> {
    let (dash, gap) = dash_px(DASHED_PATTERN, width);
    DashedPathElement::new(
        vec![(x, y), (x + handle_px(), y)],
        dash,
        gap,
        BLACK.stroke_width(stroke_px(width)),
    )
}

/// Middle of a legend handle starting at `(x, y)`, where markers sit.
pub fn handle_center((x, y): BackendCoord) -> BackendCoord {
    (x + handle_px() / 2, y)
}

/// Upper-left legend with a translucent white frame; rows follow series order.
pub fn legend<'a, DB: DrawingBackend + 'a>(chart: &mut Axes<'a, DB>) -> DrawResult<DB> {
    let inset = px(LEGEND_BORDER_AXES_PAD * LEGEND_FONT_SIZE).round() as i32;
    let edge = LEGEND_EDGE_GRAY;
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::Coordinate(inset, inset))
        .margin(px(LEGEND_BORDER_PAD * LEGEND_FONT_SIZE))
        .legend_area_size(px(
            (LEGEND_HANDLE_LENGTH + LEGEND_HANDLE_TEXT_PAD) * LEGEND_FONT_SIZE
        ))
        .label_font(("sans-serif", px(LEGEND_FONT_SIZE)))
        .background_style(WHITE.mix(LEGEND_FRAME_ALPHA))
        .border_style(
            RGBColor(edge, edge, edge)
                .mix(LEGEND_FRAME_ALPHA)
                .stroke_width(stroke_px(SPINE_WIDTH)),
        )
        .draw()
}
