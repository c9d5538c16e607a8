//! The seam between layout and output.
//!
//! Layout code never looks inside a font or a page: it only measures through
//! [TextMeasure] and emits primitives through [Renderer]. [crate::PdfRenderer]
//! writes real PDF documents, [crate::recording::RecordingRenderer] just remembers
//! what it was asked to draw.

use crate::colour::Colour;
use crate::geometry::Point;
use crate::layout::FormattedRun;
use crate::pagesize::PageFormat;
use crate::units::Pt;
use crate::PDFError;
use std::fmt::Debug;
use std::io::Write;

/// Font metrics as seen by the layout engine
pub trait TextMeasure {
    /// Opaque font handle. Layout code copies and compares these but never
    /// interprets them.
    type Font: Clone + PartialEq + Debug;

    /// Horizontal advance of `text` when set in `font`
    fn text_width(&self, text: &str, font: &Self::Font) -> Result<Pt, PDFError>;

    /// How far to move down between two consecutive baselines set in `font`
    fn line_height(&self, font: &Self::Font) -> Result<Pt, PDFError>;

    /// Font used for blank lines when no run supplies one
    fn default_font(&self) -> Self::Font;
}

/// A drawing backend that lays primitives out on pages
pub trait Renderer: TextMeasure {
    /// Handle to a page created by [Renderer::new_page]
    type Page: Copy + Debug;

    /// Append a blank page to the document
    fn new_page(&mut self, format: PageFormat) -> Result<Self::Page, PDFError>;

    fn page_width(&self, page: Self::Page) -> Result<Pt, PDFError>;

    fn page_height(&self, page: Self::Page) -> Result<Pt, PDFError>;

    /// Stroke a straight line between two points
    fn draw_line(&mut self, page: Self::Page, from: Point, to: Point) -> Result<(), PDFError>;

    /// Fill an axis-aligned rectangle growing right and up from `origin`
    fn fill_rect(
        &mut self,
        page: Self::Page,
        origin: Point,
        width: Pt,
        height: Pt,
        colour: Colour,
    ) -> Result<(), PDFError>;

    /// Draw `runs` left to right on a shared baseline starting at `origin`. The
    /// renderer advances by each run's measured width.
    fn draw_text_run(
        &mut self,
        page: Self::Page,
        origin: Point,
        runs: &[FormattedRun<Self::Font>],
    ) -> Result<(), PDFError>;

    /// Serialize the whole document into `out`
    fn save(&mut self, out: &mut dyn Write) -> Result<(), PDFError>;

    /// Release anything held by the backend. Called exactly once, after [Renderer::save].
    fn close(&mut self) -> Result<(), PDFError> {
        Ok(())
    }
}
