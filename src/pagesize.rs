//! Pre-defined page formats for common paper sizes.
//!
//! All formats are provided in portrait orientation where width ≤ height.
//! Use [`PageFormat::landscape`] to rotate one.
//!
//! # Example
//!
//! ```
//! use pdf_flow::pagesize::PageFormat;
//!
//! let letter = PageFormat::default();
//! assert_eq!(letter, PageFormat::LETTER);
//!
//! let wide = PageFormat::A4.landscape();
//! assert!(wide.width > wide.height);
//! ```

use crate::units::*;

/// Page dimensions in points.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PageFormat {
    pub width: Pt,
    pub height: Pt,
}

impl PageFormat {
    pub const LETTER: PageFormat = PageFormat::new(Pt(8.5 * 72.0), Pt(11.0 * 72.0));
    pub const LEGAL: PageFormat = PageFormat::new(Pt(8.5 * 72.0), Pt(14.0 * 72.0));
    pub const A3: PageFormat = PageFormat::new(Pt(297.0 * 72.0 / 25.4), Pt(420.0 * 72.0 / 25.4));
    pub const A4: PageFormat = PageFormat::new(Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
    pub const A5: PageFormat = PageFormat::new(Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));

    pub const fn new(width: Pt, height: Pt) -> PageFormat {
        PageFormat { width, height }
    }

    /// Returns the format in portrait orientation (width ≤ height).
    pub fn portrait(self) -> PageFormat {
        if self.width <= self.height {
            self
        } else {
            PageFormat::new(self.height, self.width)
        }
    }

    /// Returns the format in landscape orientation (width ≥ height).
    pub fn landscape(self) -> PageFormat {
        if self.width >= self.height {
            self
        } else {
            PageFormat::new(self.height, self.width)
        }
    }
}

impl Default for PageFormat {
    fn default() -> Self {
        PageFormat::LETTER
    }
}
