//! Text and table layout, and the flow of both across pages.
//!
//! Layout happens in two steps. [wrap] and [Table::init] turn formatted text into
//! [Line]s and resolved table cells, measuring through a
//! [TextMeasure](crate::renderer::TextMeasure). [PageFlow] then places lines and
//! table rows below a cursor, breaking to a new page whenever the next line or row
//! would reach the bottom of the usable area.
//!
//! # Example
//!
//! ```
//! use pdf_flow::layout::{CellPosition, Margins, PageFlowBuilder, Table, TableCell};
//! use pdf_flow::recording::{MonoFont, RecordingRenderer};
//! use pdf_flow::Pt;
//!
//! let font = MonoFont::new(Pt(6.0), Pt(14.0));
//! let mut flow = PageFlowBuilder::new()
//!     .with_margins(Margins::all(Pt(36.0)))
//!     .with_footer("page footer", font)
//!     .build(RecordingRenderer::new(font))
//!     .expect("can build flow");
//!
//! flow.append_text_left("Orders", font).expect("can append text");
//!
//! let table = Table::with_equal_columns(font, Pt(300.0), 3)
//!     .cell(TableCell::new(CellPosition::new(1, 1), "Dog Leash"))
//!     .cell(TableCell::new(CellPosition::spanning(1, 2, 2), "Organic Bike"))
//!     .init(flow.renderer())
//!     .expect("table is valid");
//! flow.append_table(&table).expect("can append table");
//!
//! let mut out: Vec<u8> = Vec::new();
//! flow.finish(&mut out).expect("can finish");
//! ```

mod flow;
mod margins;
mod table;
mod text;

pub use flow::*;
pub use margins::*;
pub use table::*;
pub use text::*;
