use crate::layout::CellPosition;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred, either allocating a page or persisting the document
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error("cannot measure {text:?}: {reason}")]
    /// The renderer could not measure a piece of text or a font
    Measurement { text: String, reason: String },

    #[error("{operation}{}: {reason}", at_cell(.cell))]
    /// The requested layout is impossible: a malformed table, a non-positive width,
    /// or content taller than a page
    Layout {
        operation: &'static str,
        cell: Option<CellPosition>,
        reason: String,
    },

    #[error("{operation}: {reason}")]
    /// The API was used in a way that can never produce a document
    Usage {
        operation: &'static str,
        reason: String,
    },

    #[error("page is missing from the document")]
    /// A page handle did not resolve to a page in the document
    PageMissing,

    #[error("font is missing from the document")]
    /// A font handle did not resolve to a font in the document
    FontMissing,
}

fn at_cell(cell: &Option<CellPosition>) -> String {
    match cell {
        Some(cell) => format!(" (row {}, column {})", cell.row, cell.column),
        None => String::new(),
    }
}

impl PDFError {
    pub(crate) fn layout<S: ToString>(operation: &'static str, reason: S) -> PDFError {
        PDFError::Layout {
            operation,
            cell: None,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn cell_layout<S: ToString>(
        operation: &'static str,
        cell: CellPosition,
        reason: S,
    ) -> PDFError {
        PDFError::Layout {
            operation,
            cell: Some(cell),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn usage<S: ToString>(operation: &'static str, reason: S) -> PDFError {
        PDFError::Usage {
            operation,
            reason: reason.to_string(),
        }
    }
}
