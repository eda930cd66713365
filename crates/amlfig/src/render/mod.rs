//! Chart → PDF page.
//!
//! A chart is any closure that draws on a plotters `DrawingArea`. It runs
//! against `PdfBackend` on a canvas of the figure size at `EXPORT_DPI`; the
//! page is then cropped to what was drawn plus `TIGHT_PAD_INCHES`.

pub mod backend;

use std::convert::Infallible;
use std::fmt;
use std::io;

use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, DrawingAreaErrorKind, IntoDrawingArea};

use crate::cfg::{canvas_px, PT_PER_INCH, TIGHT_PAD_INCHES};
use crate::pdf::{write_document, DocInfo, Page};

pub use backend::{Canvas, PdfBackend};

/// Result of drawing one chart onto the PDF backend.
pub type ChartResult = Result<(), DrawingAreaErrorKind<Infallible>>;

/// Root area handed to chart closures.
pub type PdfArea<'a> = DrawingArea<PdfBackend<'a>, Shift>;

#[derive(Debug)]
pub enum RenderError {
    /// Plotters rejected the chart (layout or drawing).
    Chart(DrawingAreaErrorKind<Infallible>),
    Io(io::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Chart(e) => write!(f, "chart drawing failed: {e}"),
            RenderError::Io(e) => write!(f, "writing PDF failed: {e}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Chart(e) => Some(e),
            RenderError::Io(e) => Some(e),
        }
    }
}

impl From<DrawingAreaErrorKind<Infallible>> for RenderError {
    fn from(e: DrawingAreaErrorKind<Infallible>) -> Self {
        RenderError::Chart(e)
    }
}

impl From<io::Error> for RenderError {
    fn from(e: io::Error) -> Self {
        RenderError::Io(e)
    }
}

/// Run `draw` on a fresh canvas and crop the result into a page.
pub fn render_page<F>(draw: F) -> Result<Page, RenderError>
where
    F: for<'b> FnOnce(&PdfArea<'b>) -> ChartResult,
{
    let mut canvas = Canvas::new(canvas_px());
    {
        let root = PdfBackend::new(&mut canvas).into_drawing_area();
        draw(&root)?;
        root.present()?;
    }
    Ok(canvas.into_page(TIGHT_PAD_INCHES * PT_PER_INCH))
}

/// Render to PDF bytes, recording `title` in the document info when given.
/// Equal charts give equal bytes.
pub fn render_pdf<F>(title: Option<&str>, draw: F) -> Result<Vec<u8>, RenderError>
where
    F: for<'b> FnOnce(&PdfArea<'b>) -> ChartResult,
{
    let page = render_page(draw)?;
    let info = DocInfo {
        title: title.map(str::to_string),
        producer: format!("amlfig {}", crate::VERSION),
    };
    Ok(write_document(&page, &info))
}

#[cfg(test)]
mod tests;
