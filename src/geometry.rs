use crate::units::*;

/// A position in page space. The origin is the bottom-left corner of the page
/// and y increases upward.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: Pt,
    pub y: Pt,
}

impl Point {
    pub fn new<X: Into<Pt>, Y: Into<Pt>>(x: X, y: Y) -> Point {
        Point {
            x: x.into(),
            y: y.into(),
        }
    }
}

/// A rectangle, specified by two opposite corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the lower-left corner.
    pub x1: Pt,
    /// The y-coordinate of the lower-left corner.
    pub y1: Pt,
    /// The x-coordinate of the upper-right corner.
    pub x2: Pt,
    /// The y-coordinate of the upper-right corner.
    pub y2: Pt,
}

impl Rect {
    /// A rectangle growing right and up from `origin`
    pub fn from_origin(origin: Point, width: Pt, height: Pt) -> Rect {
        Rect {
            x1: origin.x,
            y1: origin.y,
            x2: origin.x + width,
            y2: origin.y + height,
        }
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect::new(r.x1.into(), r.y1.into(), r.x2.into(), r.y2.into())
    }
}
