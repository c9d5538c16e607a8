use crate::{
    font::Font,
    page::Page,
    refs::{ObjectReferences, RefType},
    PDFError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::io::Write;

#[derive(Default, Debug)]
/// A document stores all pages and fonts of the PDF, then renders them out with a
/// call to [Document::write]
pub struct Document {
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
}

impl Document {
    /// Add a page to the end of the document, returning its id
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Get the 0-based position of a page in the document given its id
    pub fn index_of_page(&self, page: Id<Page>) -> Option<usize> {
        self.page_order.iter().position(|&p| p == page)
    }

    /// Add a font to the document. Fonts are shared by every page. The returned id stays
    /// valid for the lifetime of the document.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Write the entire document to the writer. The whole document is rendered in
    /// memory first, so very large documents need a matching amount of memory.
    pub fn write<W: Write>(&self, mut w: W) -> Result<(), PDFError> {
        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();

        let page_refs: Vec<Ref> = (0..self.page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in self.fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }

        for (page_index, id) in self.page_order.iter().enumerate() {
            let page = self.pages.get(*id).ok_or(PDFError::PageMissing)?;
            page.write(&mut refs, page_index, &self.fonts, &mut writer)?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        tracing::debug!(
            pages = self.page_order.len(),
            fonts = self.fonts.len(),
            "writing document"
        );
        w.write_all(writer.finish().as_slice())?;
        Ok(())
    }
}
