//! Rendering defaults (internal).
//!
//! Policy
//! - Values mirror the classic plotting-library rc defaults the slides were
//!   designed against. Lengths are PDF points (1/72 in) unless noted.
//! - Charts are laid out on a 300 dpi pixel canvas; `px`/`stroke_px` convert
//!   point lengths into canvas pixels and the PDF backend maps them back.

/// Points per inch.
pub const PT_PER_INCH: f64 = 72.0;
/// Resolution of the chart canvas.
pub const EXPORT_DPI: f64 = 300.0;
/// PDF points covered by one canvas pixel.
pub const PT_PER_PX: f64 = PT_PER_INCH / EXPORT_DPI;

/// Figure size in inches.
pub const FIGURE_WIDTH_IN: f64 = 10.0;
pub const FIGURE_HEIGHT_IN: f64 = 6.2;

/// Padding around the tight bounding box, in inches.
pub const TIGHT_PAD_INCHES: f64 = 0.1;
/// Layout padding between canvas edge and decorations.
pub const LAYOUT_PAD: f64 = 1.08 * FONT_SIZE;

/// Base font size (tick labels).
pub const FONT_SIZE: f64 = 10.0;
/// Axis label font size.
pub const LABEL_FONT_SIZE: f64 = 11.0;
/// Legend font size.
pub const LEGEND_FONT_SIZE: f64 = 9.0;

/// Axes frame (spine) and tick line width.
pub const SPINE_WIDTH: f64 = 0.8;
/// Major tick length (outward).
pub const TICK_LENGTH: f64 = 3.5;
/// Gap between tick and its label.
pub const TICK_PAD: f64 = 3.5;
/// Gap between tick labels and the axis label.
pub const LABEL_PAD: f64 = 4.0;
/// Tick spacing in data units on both axes.
pub const TICK_STEP: f64 = 2.0;

/// Grid line width, gray level and opacity.
pub const GRID_WIDTH: f64 = 0.8;
pub const GRID_GRAY: u8 = 0xb0;
pub const GRID_ALPHA: f64 = 0.3;

/// Outline width of filled regions; the edge shares the face color and alpha.
pub const FILL_EDGE_WIDTH: f64 = 1.0;

/// Legend frame edge gray level and frame opacity.
pub const LEGEND_EDGE_GRAY: u8 = 0xcc;
pub const LEGEND_FRAME_ALPHA: f64 = 0.9;
/// Legend handle length and distance to the axes, in legend font sizes.
pub const LEGEND_HANDLE_LENGTH: f64 = 2.0;
pub const LEGEND_BORDER_AXES_PAD: f64 = 0.5;
/// Gap between handle and label text, in legend font sizes.
pub const LEGEND_HANDLE_TEXT_PAD: f64 = 0.8;
/// Inner legend padding, in legend font sizes. Wide enough that labels set
/// in Helvetica stay inside the frame plotters sizes for them.
pub const LEGEND_BORDER_PAD: f64 = 1.0;

/// Dash pattern for `--`, as multiples of the line width.
pub const DASHED_PATTERN: [f64; 2] = [3.7, 1.6];
/// Dash pattern for `:`, as multiples of the line width.
pub const DOTTED_PATTERN: [f64; 2] = [1.0, 1.65];

/// Cubic Bézier handle factor for quarter circles.
pub const KAPPA: f64 = 0.552_284_749_830_793_4;

/// Point length in canvas pixels.
#[inline]
pub fn px(pt: f64) -> f64 {
    pt / PT_PER_PX
}

/// Point length in whole canvas pixels, at least one.
#[inline]
pub fn stroke_px(pt: f64) -> u32 {
    px(pt).round().max(1.0) as u32
}

/// Canvas size in pixels.
pub fn canvas_px() -> (u32, u32) {
    (
        (FIGURE_WIDTH_IN * EXPORT_DPI).round() as u32,
        (FIGURE_HEIGHT_IN * EXPORT_DPI).round() as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_matches_figure_size() {
        assert_eq!(canvas_px(), (3000, 1860));
        assert!((px(72.0) - 300.0).abs() < 1e-9);
        assert_eq!(stroke_px(2.5), 10);
        assert_eq!(stroke_px(0.01), 1);
    }
}
