//! A [Renderer] that draws nothing and remembers everything.
//!
//! Every primitive is stored per page as a [DrawCommand], which makes the layout
//! engine observable without producing a PDF. Fonts are [MonoFont]s: every glyph
//! has the same advance, so widths are easy to reason about.

use std::io::Write;

use crate::colour::Colour;
use crate::geometry::Point;
use crate::layout::FormattedRun;
use crate::pagesize::PageFormat;
use crate::renderer::{Renderer, TextMeasure};
use crate::units::Pt;
use crate::PDFError;

/// A monospaced font: `char_width` per character, `line_height` per line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonoFont {
    pub char_width: Pt,
    pub line_height: Pt,
}

impl MonoFont {
    pub const fn new(char_width: Pt, line_height: Pt) -> MonoFont {
        MonoFont {
            char_width,
            line_height,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Point,
        to: Point,
    },
    FillRect {
        origin: Point,
        width: Pt,
        height: Pt,
        colour: Colour,
    },
    Text {
        origin: Point,
        runs: Vec<FormattedRun<MonoFont>>,
    },
}

impl DrawCommand {
    /// The concatenated text of a [DrawCommand::Text]
    pub fn text(&self) -> Option<String> {
        match self {
            DrawCommand::Text { runs, .. } => {
                Some(runs.iter().map(|run| run.text.as_str()).collect())
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPage {
    pub format: PageFormat,
    pub commands: Vec<DrawCommand>,
}

impl RecordedPage {
    /// The text drawn on this page, in drawing order
    pub fn texts(&self) -> Vec<String> {
        self.commands.iter().filter_map(DrawCommand::text).collect()
    }

    /// Baseline origins of the text drawn on this page, in drawing order
    pub fn text_origins(&self) -> Vec<Point> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { origin, .. } => Some(*origin),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self) -> Vec<(Point, Point)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Line { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    default_font: MonoFont,
    pages: Vec<RecordedPage>,
    page_limit: Option<usize>,
    closed: bool,
}

impl RecordingRenderer {
    pub fn new(default_font: MonoFont) -> RecordingRenderer {
        RecordingRenderer {
            default_font,
            pages: Vec::new(),
            page_limit: None,
            closed: false,
        }
    }

    /// Fail with an I/O error when asked for more than `limit` pages
    pub fn with_page_limit(mut self, limit: usize) -> Self {
        self.page_limit = Some(limit);
        self
    }

    pub fn pages(&self) -> &[RecordedPage] {
        &self.pages
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn page_mut(&mut self, page: usize) -> Result<&mut RecordedPage, PDFError> {
        self.pages.get_mut(page).ok_or(PDFError::PageMissing)
    }
}

impl TextMeasure for RecordingRenderer {
    type Font = MonoFont;

    fn text_width(&self, text: &str, font: &MonoFont) -> Result<Pt, PDFError> {
        if !(font.char_width >= Pt(0.0)) {
            return Err(PDFError::Measurement {
                text: text.to_string(),
                reason: format!("glyph advance {} is not a width", font.char_width),
            });
        }
        Ok(font.char_width * text.chars().count() as f32)
    }

    fn line_height(&self, font: &MonoFont) -> Result<Pt, PDFError> {
        if !(font.line_height > Pt(0.0)) {
            return Err(PDFError::Measurement {
                text: String::new(),
                reason: format!("line height {} is not positive", font.line_height),
            });
        }
        Ok(font.line_height)
    }

    fn default_font(&self) -> MonoFont {
        self.default_font
    }
}

impl Renderer for RecordingRenderer {
    type Page = usize;

    fn new_page(&mut self, format: PageFormat) -> Result<usize, PDFError> {
        if let Some(limit) = self.page_limit {
            if self.pages.len() >= limit {
                return Err(PDFError::Io(std::io::Error::other(format!(
                    "page limit of {limit} reached"
                ))));
            }
        }
        self.pages.push(RecordedPage {
            format,
            commands: Vec::new(),
        });
        Ok(self.pages.len() - 1)
    }

    fn page_width(&self, page: usize) -> Result<Pt, PDFError> {
        self.pages
            .get(page)
            .map(|p| p.format.width)
            .ok_or(PDFError::PageMissing)
    }

    fn page_height(&self, page: usize) -> Result<Pt, PDFError> {
        self.pages
            .get(page)
            .map(|p| p.format.height)
            .ok_or(PDFError::PageMissing)
    }

    fn draw_line(&mut self, page: usize, from: Point, to: Point) -> Result<(), PDFError> {
        self.page_mut(page)?
            .commands
            .push(DrawCommand::Line { from, to });
        Ok(())
    }

    fn fill_rect(
        &mut self,
        page: usize,
        origin: Point,
        width: Pt,
        height: Pt,
        colour: Colour,
    ) -> Result<(), PDFError> {
        self.page_mut(page)?.commands.push(DrawCommand::FillRect {
            origin,
            width,
            height,
            colour,
        });
        Ok(())
    }

    fn draw_text_run(
        &mut self,
        page: usize,
        origin: Point,
        runs: &[FormattedRun<MonoFont>],
    ) -> Result<(), PDFError> {
        self.page_mut(page)?.commands.push(DrawCommand::Text {
            origin,
            runs: runs.to_vec(),
        });
        Ok(())
    }

    fn save(&mut self, out: &mut dyn Write) -> Result<(), PDFError> {
        for (i, page) in self.pages.iter().enumerate() {
            writeln!(out, "page {} ({} x {})", i + 1, page.format.width, page.format.height)?;
            for command in page.commands.iter() {
                match command {
                    DrawCommand::Line { from, to } => {
                        writeln!(out, "  line {} {} -> {} {}", from.x, from.y, to.x, to.y)?
                    }
                    DrawCommand::FillRect {
                        origin,
                        width,
                        height,
                        ..
                    } => writeln!(out, "  rect {} {} {} x {}", origin.x, origin.y, width, height)?,
                    DrawCommand::Text { origin, .. } => writeln!(
                        out,
                        "  text {} {} {:?}",
                        origin.x,
                        origin.y,
                        command.text().unwrap_or_default()
                    )?,
                }
            }
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), PDFError> {
        self.closed = true;
        Ok(())
    }
}
