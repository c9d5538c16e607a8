/// A colour, expressed in RGB, CMYK, or grey colour spaces. Colours are handed to the
/// renderer untouched; no conversion between spaces ever happens.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the CMYK space. c, m, y, and k range from 0 to 255
    pub fn cmyk_bytes(c: u8, m: u8, y: u8, k: u8) -> Colour {
        Colour::CMYK {
            c: c as f32 / 255.0,
            m: m as f32 / 255.0,
            y: y as f32 / 255.0,
            k: k as f32 / 255.0,
        }
    }

    /// Create a new grey colour, g ranges from 0 (black) to 255 (white)
    pub fn grey_bytes(g: u8) -> Colour {
        Colour::Grey {
            g: g as f32 / 255.0,
        }
    }

    /// The operands of this colour in its own colour space
    pub(crate) fn components(&self) -> Vec<f32> {
        match *self {
            Colour::RGB { r, g, b } => vec![r, g, b],
            Colour::CMYK { c, m, y, k } => vec![c, m, y, k],
            Colour::Grey { g } => vec![g],
        }
    }
}

impl Default for Colour {
    fn default() -> Self {
        colours::BLACK
    }
}

impl From<(u8, u8, u8)> for Colour {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Colour::rgb_bytes(r, g, b)
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    pub const LIGHT_GREY: Colour = Colour::Grey { g: 0.85 };
    pub const RED: Colour = Colour::RGB {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };
    pub const GREEN: Colour = Colour::RGB {
        r: 0.0,
        g: 1.0,
        b: 0.0,
    };
    pub const BLUE: Colour = Colour::RGB {
        r: 0.0,
        g: 0.0,
        b: 1.0,
    };
    pub const YELLOW: Colour = Colour::CMYK {
        c: 0.0,
        m: 0.0,
        y: 1.0,
        k: 0.0,
    };
}
