//! Page contents to PDF content stream operators.

use crate::colour::Colour;
use crate::font::{Font, SpanFont};
use crate::page::{PageContents, SpanLayout};
use crate::PDFError;
use id_arena::Arena;
use std::io::Write;

/// Renders page contents to an uncompressed PDF content stream
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, PDFError> {
    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => {
                render_text_spans(&mut content, spans, fonts)?;
            }
            PageContents::Line { from, to, width } => {
                write!(&mut content, "q\n")?;
                write!(&mut content, "{} w\n", width.0)?;
                write!(&mut content, "0 G\n")?;
                write!(&mut content, "{} {} m\n", from.x.0, from.y.0)?;
                write!(&mut content, "{} {} l\n", to.x.0, to.y.0)?;
                write!(&mut content, "S\n")?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::FillRect { rect, colour } => {
                write!(&mut content, "q\n")?;
                write_colour(&mut content, *colour)?;
                write!(
                    &mut content,
                    "{} {} {} {} re\n",
                    rect.x1.0,
                    rect.y1.0,
                    rect.width().0,
                    rect.height().0
                )?;
                write!(&mut content, "f\n")?;
                write!(&mut content, "Q\n")?;
            }
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<(), PDFError> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    write_font(content, current_font)?;
    write_colour(content, current_font.colour)?;

    for span in spans.iter() {
        if span.font.id != current_font.id || span.font.size != current_font.size {
            write_font(content, span.font)?;
        }
        if span.font.colour != current_font.colour {
            write_colour(content, span.font.colour)?;
        }
        current_font = span.font;

        let font = fonts.get(current_font.id).ok_or(PDFError::FontMissing)?;

        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", span.origin.x.0, span.origin.y.0)?;
        write!(content, "<")?;
        for ch in span.text.chars() {
            write!(content, "{:04x}", font.glyph_id_or_fallback(ch))?;
        }
        write!(content, "> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn write_font(content: &mut Vec<u8>, font: SpanFont) -> Result<(), std::io::Error> {
    write!(content, "/F{} {} Tf\n", font.id.index(), font.size.0)
}

/// Set the fill colour in the colour's own space
fn write_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    let operator = match colour {
        Colour::RGB { .. } => "rg",
        Colour::CMYK { .. } => "k",
        Colour::Grey { .. } => "g",
    };
    for component in colour.components() {
        write!(content, "{component} ")?;
    }
    writeln!(content, "{operator}")
}
