use std::io::Write;

use id_arena::Id;

use crate::colour::Colour;
use crate::document::Document;
use crate::font::{Font, SpanFont};
use crate::geometry::{Point, Rect};
use crate::layout::{FormattedRun, BORDER_WIDTH};
use crate::page::{Page, SpanLayout};
use crate::pagesize::PageFormat;
use crate::renderer::{Renderer, TextMeasure};
use crate::units::Pt;
use crate::PDFError;

/// Renders laid out content into a [Document] and serializes it as a PDF.
///
/// Fonts must be added to the document before they can be used: every [SpanFont]
/// refers to one of the document's fonts by id.
///
/// ```no_run
/// use pdf_flow::layout::PageFlowBuilder;
/// use pdf_flow::{Document, Font, PdfRenderer, Pt, SpanFont};
///
/// let bytes = std::fs::read("DejaVuSans.ttf").expect("can read font");
/// let mut document = Document::default();
/// let regular = document.add_font(Font::load(bytes).expect("can load font"));
/// let body = SpanFont::new(regular, Pt(10.0));
///
/// let mut flow = PageFlowBuilder::new()
///     .with_footer("Confidential", body.with_size(Pt(8.0)))
///     .build(PdfRenderer::new(document, body))
///     .expect("can build flow");
/// flow.append_text_left("Hello, world!", body).expect("can append text");
/// flow.finish_to_path("hello.pdf").expect("can write pdf");
/// ```
#[derive(Debug)]
pub struct PdfRenderer {
    document: Document,
    default_font: SpanFont,
}

impl PdfRenderer {
    pub fn new(document: Document, default_font: SpanFont) -> PdfRenderer {
        PdfRenderer {
            document,
            default_font,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    fn font(&self, font: &SpanFont) -> Result<&Font, PDFError> {
        self.document.fonts.get(font.id).ok_or(PDFError::FontMissing)
    }

    fn page_ref(&self, page: Id<Page>) -> Result<&Page, PDFError> {
        self.document.pages.get(page).ok_or(PDFError::PageMissing)
    }

    fn page_mut(&mut self, page: Id<Page>) -> Result<&mut Page, PDFError> {
        self.document.pages.get_mut(page).ok_or(PDFError::PageMissing)
    }
}

impl TextMeasure for PdfRenderer {
    type Font = SpanFont;

    fn text_width(&self, text: &str, font: &SpanFont) -> Result<Pt, PDFError> {
        Ok(self.font(font)?.text_width(text, font.size))
    }

    fn line_height(&self, font: &SpanFont) -> Result<Pt, PDFError> {
        let height = self.font(font)?.line_height(font.size);
        if !(height > Pt(0.0)) {
            return Err(PDFError::Measurement {
                text: String::new(),
                reason: format!("font has line height {height} at size {}", font.size),
            });
        }
        Ok(height)
    }

    fn default_font(&self) -> SpanFont {
        self.default_font
    }
}

impl Renderer for PdfRenderer {
    type Page = Id<Page>;

    fn new_page(&mut self, format: PageFormat) -> Result<Id<Page>, PDFError> {
        Ok(self.document.add_page(Page::new(format)))
    }

    fn page_width(&self, page: Id<Page>) -> Result<Pt, PDFError> {
        Ok(self.page_ref(page)?.width())
    }

    fn page_height(&self, page: Id<Page>) -> Result<Pt, PDFError> {
        Ok(self.page_ref(page)?.height())
    }

    fn draw_line(&mut self, page: Id<Page>, from: Point, to: Point) -> Result<(), PDFError> {
        self.page_mut(page)?.add_line(from, to, BORDER_WIDTH);
        Ok(())
    }

    fn fill_rect(
        &mut self,
        page: Id<Page>,
        origin: Point,
        width: Pt,
        height: Pt,
        colour: Colour,
    ) -> Result<(), PDFError> {
        self.page_mut(page)?
            .add_fill(Rect::from_origin(origin, width, height), colour);
        Ok(())
    }

    fn draw_text_run(
        &mut self,
        page: Id<Page>,
        origin: Point,
        runs: &[FormattedRun<SpanFont>],
    ) -> Result<(), PDFError> {
        let mut spans: Vec<SpanLayout> = Vec::with_capacity(runs.len());
        let mut x = origin.x;
        for run in runs.iter() {
            spans.push(SpanLayout {
                text: run.text.clone(),
                font: run.font,
                origin: Point { x, y: origin.y },
            });
            x += self.text_width(&run.text, &run.font)?;
        }
        self.page_mut(page)?.add_spans(spans);
        Ok(())
    }

    fn save(&mut self, out: &mut dyn Write) -> Result<(), PDFError> {
        self.document.write(out)
    }
}
