use crate::units::Pt;

/// Margins used by [`PageFlow`](crate::layout::PageFlow) to derive the usable
/// content area of every page, and by table cells to inset their text. Header and
/// footer bands are reserved on top of the page margins.
///
/// The default matches a left-heavy letter layout: 42pt top, 70pt right,
/// 30pt bottom and 25pt left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Default for Margins {
    fn default() -> Self {
        Margins::trbl(Pt(42.0), Pt(70.0), Pt(30.0), Pt(25.0))
    }
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl<T, R, B, L>(top: T, right: R, bottom: B, left: L) -> Margins
    where
        T: Into<Pt>,
        R: Into<Pt>,
        B: Into<Pt>,
        L: Into<Pt>,
    {
        Margins {
            top: top.into(),
            right: right.into(),
            bottom: bottom.into(),
            left: left.into(),
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins::trbl(value, value, value, value)
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric<V: Into<Pt>, H: Into<Pt>>(vertical: V, horizontal: H) -> Margins {
        let vertical: Pt = vertical.into();
        let horizontal: Pt = horizontal.into();
        Margins::trbl(vertical, horizontal, vertical, horizontal)
    }

    /// Total horizontal space taken by the margins
    pub fn horizontal(&self) -> Pt {
        self.left + self.right
    }

    pub(crate) fn has_negative(&self) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .any(|m| *m < Pt(0.0))
    }
}
