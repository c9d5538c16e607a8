use crate::content::render_contents;
use crate::font::{Font, SpanFont};
use crate::geometry::{Point, Rect};
use crate::pagesize::PageFormat;
use crate::refs::{ObjectReferences, RefType};
use crate::{Colour, PDFError, Pt};
use id_arena::Arena;
use pdf_writer::{Filter, Finish, Name, Pdf};

/// A piece of text placed on a page, its baseline starting at `origin`
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub origin: Point,
}

/// Everything that can be drawn on a page
#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    /// Spans sharing a baseline, drawn left to right
    Text(Vec<SpanLayout>),
    /// A black stroked line
    Line { from: Point, to: Point, width: Pt },
    /// A filled rectangle without an outline
    FillRect { rect: Rect, colour: Colour },
}

/// A single page of a [Document](crate::Document)
#[derive(Debug)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Everything drawn on the page, in painting order
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(format: PageFormat) -> Page {
        Page {
            media_box: Rect::from_origin(Point::default(), format.width, format.height),
            contents: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    pub fn add_spans(&mut self, spans: Vec<SpanLayout>) {
        if !spans.is_empty() {
            self.contents.push(PageContents::Text(spans));
        }
    }

    pub fn add_line(&mut self, from: Point, to: Point, width: Pt) {
        self.contents.push(PageContents::Line { from, to, width });
    }

    pub fn add_fill(&mut self, rect: Rect, colour: Colour) {
        self.contents.push(PageContents::FillRect { rect, colour });
    }

    /// Write the page object and its compressed content stream. `page_index` is the
    /// page's position in the document, which must already have a [RefType::Page].
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs
            .get(RefType::Page(page_index))
            .ok_or(PDFError::PageMissing)?;
        let parent = refs.get(RefType::PageTree).ok_or(PDFError::PageMissing)?;
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut font_refs = Vec::with_capacity(fonts.len());
        for (font_id, _) in fonts.iter() {
            let font_ref = refs
                .get(RefType::Font(font_id.index()))
                .ok_or(PDFError::FontMissing)?;
            font_refs.push((font_id.index(), font_ref));
        }

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.parent(parent);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (index, font_ref) in font_refs.into_iter() {
            resource_fonts.pair(Name(format!("F{index}").as_bytes()), font_ref);
        }
        resource_fonts.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents, fonts)?;
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            rendered.as_slice(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(content_id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        Ok(())
    }
}
