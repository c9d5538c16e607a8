//! Flow text and tables onto fixed-size pages.
//!
//! Formatted text is word-wrapped to the usable width of a page, tables are laid
//! out into rows of wrapped cells, and a [PageFlow](layout::PageFlow) places both
//! below a write cursor, starting new pages (with repeating headers and footers)
//! whenever content would run past the bottom margin. Output goes through the
//! [Renderer](renderer::Renderer) trait: [PdfRenderer] produces PDF documents with
//! embedded TrueType fonts, [recording::RecordingRenderer] records draw calls.

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod geometry;
pub use geometry::*;

/// Word wrapping, tables and page flow
pub mod layout;

mod page;
pub use page::*;

pub mod pagesize;

mod pdf;
pub use pdf::*;

pub mod recording;

pub(crate) mod refs;

pub mod renderer;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
