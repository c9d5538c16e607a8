use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::geometry::Point;
use crate::layout::{wrap, FormattedRun, LaidOutTable, Line, Margins, BORDER_WIDTH, CELL_MARGINS};
use crate::pagesize::PageFormat;
use crate::renderer::Renderer;
use crate::units::Pt;
use crate::PDFError;

/// Space between the last header line and the rule below it
pub const HEADER_RULE_GAP: Pt = Pt(4.0);
/// Space between the header rule and the first line of content
pub const HEADER_GAP: Pt = Pt(10.0);
/// Space between the top of the footer text and the rule above it
pub const FOOTER_RULE_GAP: Pt = Pt(4.0);
/// Space between the footer rule and the lowest baseline content may use
pub const FOOTER_GAP: Pt = Pt(6.0);

/// Horizontal placement of a line within the usable width of the page
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    /// Centered on the summed width of all runs in the line
    Centered,
}

/// The vertical write position on the active page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageCursor {
    pub current_y: Pt,
}

/// Whether a write may trigger a page break. Headers and footers never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overflow {
    Break,
    Ignore,
}

/// Configuration for a [PageFlow]. Everything has a default: US Letter pages, the
/// default [Margins], and no header or footer.
#[derive(Debug, Clone)]
pub struct PageFlowBuilder<F> {
    header: Option<FormattedRun<F>>,
    footer: Option<FormattedRun<F>>,
    margins: Margins,
    format: PageFormat,
}

impl<F> Default for PageFlowBuilder<F> {
    fn default() -> Self {
        PageFlowBuilder {
            header: None,
            footer: None,
            margins: Margins::default(),
            format: PageFormat::default(),
        }
    }
}

impl<F: Clone + PartialEq + std::fmt::Debug> PageFlowBuilder<F> {
    pub fn new() -> PageFlowBuilder<F> {
        PageFlowBuilder::default()
    }

    /// Repeat `text` at the top of every page, above a horizontal rule. Empty text
    /// means no header.
    pub fn with_header<S: Into<String>>(mut self, text: S, font: F) -> Self {
        let text = text.into();
        self.header = (!text.is_empty()).then(|| FormattedRun::new(text, font));
        self
    }

    /// Repeat `text` at the bottom of every page, below a horizontal rule. The
    /// footer's height is reserved above the bottom margin. Empty text means no footer.
    pub fn with_footer<S: Into<String>>(mut self, text: S, font: F) -> Self {
        let text = text.into();
        self.footer = (!text.is_empty()).then(|| FormattedRun::new(text, font));
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_format(mut self, format: PageFormat) -> Self {
        self.format = format;
        self
    }

    /// Create the flow and its first page.
    ///
    /// Fails with [PDFError::Usage] if a margin is negative, or if the margins, header
    /// and footer leave no vertical or horizontal room for content.
    pub fn build<R: Renderer<Font = F>>(self, mut renderer: R) -> Result<PageFlow<R>, PDFError> {
        if self.margins.has_negative() {
            return Err(PDFError::usage(
                "build page flow",
                format!("margins must not be negative: {:?}", self.margins),
            ));
        }

        let page = renderer.new_page(self.format)?;
        let mut flow = PageFlow {
            renderer,
            header: self.header,
            footer: self.footer,
            margins: self.margins,
            format: self.format,
            page,
            page_count: 1,
            cursor: PageCursor {
                current_y: Pt(0.0),
            },
            content_width: Pt(0.0),
            page_top: Pt(0.0),
            page_bottom: Pt(0.0),
        };
        flow.prepare_page()?;
        Ok(flow)
    }
}

/// Flows text and tables down a sequence of pages.
///
/// The flow owns the renderer and a single write cursor. Every write moves the cursor
/// down; whenever the next line or table row would end at or below the bottom of the
/// usable area a new page is started, the header and footer are drawn on it, and
/// writing continues from its top. Consuming the flow with [PageFlow::finish] saves
/// and closes the document.
///
/// ```
/// use pdf_flow::layout::{Align, FormattedRun, PageFlowBuilder};
/// use pdf_flow::recording::{MonoFont, RecordingRenderer};
/// use pdf_flow::Pt;
///
/// let font = MonoFont::new(Pt(6.0), Pt(14.0));
/// let mut flow = PageFlowBuilder::new()
///     .with_header("Quarterly report", font)
///     .build(RecordingRenderer::new(font))
///     .expect("can build flow");
///
/// flow.append_text(&[FormattedRun::new("Hello, world!", font)], Align::Centered)
///     .expect("can append text");
/// flow.new_line(font).expect("can append a blank line");
///
/// let pages = flow.renderer().pages();
/// assert_eq!(pages.len(), 1);
/// assert_eq!(pages[0].texts(), vec!["Quarterly report", "Hello, world!"]);
/// ```
#[derive(Debug)]
pub struct PageFlow<R: Renderer> {
    renderer: R,
    header: Option<FormattedRun<R::Font>>,
    footer: Option<FormattedRun<R::Font>>,
    margins: Margins,
    format: PageFormat,
    page: R::Page,
    page_count: usize,
    cursor: PageCursor,
    content_width: Pt,
    page_top: Pt,
    page_bottom: Pt,
}

impl<R: Renderer> PageFlow<R> {
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    /// Number of pages created so far, including the active one
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// The y where content starts on a fresh page, below any header
    pub fn page_top(&self) -> Pt {
        self.page_top
    }

    /// Baselines must stay strictly above this y, which sits above any footer
    pub fn page_bottom(&self) -> Pt {
        self.page_bottom
    }

    /// Width between the left and right margins of the active page
    pub fn content_width(&self) -> Pt {
        self.content_width
    }

    /// Wrap `runs` to the usable width and write them below the cursor, breaking
    /// pages as needed. A single line taller than the usable page height is a
    /// [PDFError::Layout].
    pub fn append_text(
        &mut self,
        runs: &[FormattedRun<R::Font>],
        align: Align,
    ) -> Result<(), PDFError> {
        let lines = wrap(&self.renderer, runs, self.content_width)?;
        self.cursor.current_y =
            self.emit_lines(&lines, align, self.cursor.current_y, Overflow::Break)?;
        Ok(())
    }

    pub fn append_text_left<S: Into<String>>(
        &mut self,
        text: S,
        font: R::Font,
    ) -> Result<(), PDFError> {
        self.append_text(&[FormattedRun::new(text, font)], Align::Left)
    }

    pub fn append_text_centered<S: Into<String>>(
        &mut self,
        text: S,
        font: R::Font,
    ) -> Result<(), PDFError> {
        self.append_text(&[FormattedRun::new(text, font)], Align::Centered)
    }

    /// Move the cursor down by one blank line of `font`
    pub fn new_line(&mut self, font: R::Font) -> Result<(), PDFError> {
        self.append_text(&[FormattedRun::new("", font)], Align::Left)
    }

    /// Start a new page regardless of how much room is left on the current one
    pub fn new_page(&mut self) -> Result<(), PDFError> {
        self.break_page()
    }

    /// Stroke a free-standing line on the active page. The cursor does not move.
    pub fn draw_line(&mut self, from: Point, to: Point) -> Result<(), PDFError> {
        self.renderer.draw_line(self.page, from, to)
    }

    /// Draw a laid-out table below the cursor, leaving one line of the table's font
    /// as a gap above it.
    ///
    /// Rows are atomic: a row that does not fit above the page bottom moves to a new
    /// page as a whole. Cells are top-aligned within their row. Every row is checked
    /// against the usable page height before anything is drawn, so a row that could
    /// never fit fails with [PDFError::Layout] and leaves the document untouched.
    pub fn append_table(&mut self, table: &LaidOutTable<R::Font>) -> Result<(), PDFError> {
        const OPERATION: &str = "append table";

        let usable = self.page_top - self.page_bottom;
        for row in 1..=table.number_of_rows() {
            let row_height = table.row_height(row);
            if row_height >= usable {
                return Err(PDFError::layout(
                    OPERATION,
                    format!("row {row} is {row_height} tall but a page only holds {usable}"),
                ));
            }
        }

        self.cursor.current_y -= self.renderer.line_height(table.font())?;

        let left = self.margins.left;
        let right = left + table.table_width();
        let inset = BORDER_WIDTH / 2.0;

        for row in 1..=table.number_of_rows() {
            let cells = table.cells_ordered(row);
            if cells.is_empty() {
                continue;
            }

            let row_height = table.row_height(row);
            if self.cursor.current_y - row_height <= self.page_bottom {
                self.break_page()?;
            }

            let top = self.cursor.current_y;
            let bottom = top - row_height;

            let mut offsets: Vec<Pt> = Vec::with_capacity(cells.len());
            for cell in cells.iter() {
                let x = table.x_offset_of(cell, left).ok_or_else(|| {
                    PDFError::cell_layout(OPERATION, cell.position(), "cell is not part of its row")
                })?;
                offsets.push(x);
            }

            // grid
            self.renderer
                .draw_line(self.page, Point { x: left, y: top }, Point { x: right, y: top })?;
            self.renderer.draw_line(
                self.page,
                Point { x: left, y: bottom },
                Point { x: right, y: bottom },
            )?;
            self.renderer
                .draw_line(self.page, Point { x: left, y: top }, Point { x: left, y: bottom })?;
            self.renderer.draw_line(
                self.page,
                Point { x: right, y: top },
                Point { x: right, y: bottom },
            )?;
            for &x in offsets.iter().skip(1) {
                self.renderer
                    .draw_line(self.page, Point { x, y: top }, Point { x, y: bottom })?;
            }

            for (cell, &x) in cells.iter().zip(offsets.iter()) {
                if let Some(colour) = cell.background() {
                    self.renderer.fill_rect(
                        self.page,
                        Point {
                            x: x + inset,
                            y: bottom + inset,
                        },
                        cell.width() - inset * 2.0,
                        row_height - inset * 2.0,
                        colour,
                    )?;
                }
            }

            for (cell, &x) in cells.iter().zip(offsets.iter()) {
                let x = x + CELL_MARGINS.left;
                let mut y = top - CELL_MARGINS.top;
                for line in cell.lines() {
                    y -= line.height(&self.renderer)?;
                    if !line.is_blank() {
                        self.renderer
                            .draw_text_run(self.page, Point { x, y }, &line.runs())?;
                    }
                }
            }

            tracing::trace!(row, %row_height, page = self.page_count, "placed table row");
            self.cursor.current_y = bottom;
        }

        Ok(())
    }

    /// Save the document to `out` and close the renderer
    pub fn finish(mut self, out: &mut dyn Write) -> Result<(), PDFError> {
        tracing::debug!(pages = self.page_count, "finishing document");
        self.renderer.save(out)?;
        self.renderer.close()
    }

    /// Save the document to a file at `path` and close the renderer
    pub fn finish_to_path<P: AsRef<Path>>(self, path: P) -> Result<(), PDFError> {
        let mut out = BufWriter::new(File::create(path)?);
        self.finish(&mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Give up on the flow without saving, returning the renderer as it stands
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn break_page(&mut self) -> Result<(), PDFError> {
        tracing::debug!(from = self.page_count, "page break");
        self.page = self.renderer.new_page(self.format)?;
        self.page_count += 1;
        self.prepare_page()
    }

    /// Reset the cursor for the freshly created active page and decorate it with the
    /// header and footer.
    fn prepare_page(&mut self) -> Result<(), PDFError> {
        let width = self.renderer.page_width(self.page)?;
        let height = self.renderer.page_height(self.page)?;

        self.content_width = width - self.margins.horizontal();
        if !(self.content_width > Pt(0.0)) {
            return Err(PDFError::usage(
                "start page",
                format!("margins leave no room on a page {width} wide"),
            ));
        }

        let footer: Option<Vec<Line<R::Font>>> = match self.footer.clone() {
            Some(footer) => Some(wrap(&self.renderer, &[footer], self.content_width)?),
            None => None,
        };
        let mut footer_height = Pt(0.0);
        if let Some(lines) = footer.as_ref() {
            for line in lines.iter() {
                footer_height += line.height(&self.renderer)?;
            }
        }

        self.page_bottom = match footer {
            Some(_) => self.margins.bottom + footer_height + FOOTER_RULE_GAP + FOOTER_GAP,
            None => self.margins.bottom,
        };

        let top = height - self.margins.top;
        self.page_top = match self.header.clone() {
            Some(header) => {
                let lines = wrap(&self.renderer, &[header], self.content_width)?;
                let y = self.emit_lines(&lines, Align::Left, top, Overflow::Ignore)?;
                let rule = y - HEADER_RULE_GAP;
                self.rule(rule)?;
                rule - HEADER_GAP
            }
            None => top,
        };

        if let Some(lines) = footer {
            let start = self.margins.bottom + footer_height;
            self.emit_lines(&lines, Align::Left, start, Overflow::Ignore)?;
            self.rule(start + FOOTER_RULE_GAP)?;
        }

        if self.page_top <= self.page_bottom {
            return Err(PDFError::usage(
                "start page",
                format!(
                    "page top {} must lie above page bottom {}",
                    self.page_top, self.page_bottom
                ),
            ));
        }

        self.cursor.current_y = self.page_top;
        tracing::debug!(
            page = self.page_count,
            page_top = %self.page_top,
            page_bottom = %self.page_bottom,
            "started page"
        );
        Ok(())
    }

    fn rule(&mut self, y: Pt) -> Result<(), PDFError> {
        let from = Point {
            x: self.margins.left,
            y,
        };
        let to = Point {
            x: self.margins.left + self.content_width,
            y,
        };
        self.renderer.draw_line(self.page, from, to)
    }

    /// Draw `lines` downward from `y`, returning the baseline of the last one. With
    /// [Overflow::Break] a line that would sit at or below the page bottom moves to a
    /// new page, with its baseline on the page top.
    fn emit_lines(
        &mut self,
        lines: &[Line<R::Font>],
        align: Align,
        mut y: Pt,
        overflow: Overflow,
    ) -> Result<Pt, PDFError> {
        for line in lines.iter() {
            let height = line.height(&self.renderer)?;
            y -= height;

            if overflow == Overflow::Break && y <= self.page_bottom {
                if self.page_top - height <= self.page_bottom {
                    return Err(PDFError::layout(
                        "append text",
                        format!(
                            "a line {height} tall cannot fit between {} and {}",
                            self.page_top, self.page_bottom
                        ),
                    ));
                }
                // the line that overflowed sits on the new page top
                self.break_page()?;
                y = self.page_top;
            }

            if line.is_blank() {
                continue;
            }

            let x = match align {
                Align::Left => self.margins.left,
                Align::Centered => {
                    (self.content_width - line.width(&self.renderer)?) / 2.0 + self.margins.left
                }
            };
            self.renderer
                .draw_text_run(self.page, Point { x, y }, &line.runs())?;
        }

        tracing::trace!(lines = lines.len(), %y, "emitted lines");
        Ok(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::layout::{CellPosition, Table, TableCell};
    use crate::recording::{DrawCommand, MonoFont, RecordingRenderer};

    const FONT: MonoFont = MonoFont::new(Pt(10.0), Pt(16.0));
    const SMALL: MonoFont = MonoFont::new(Pt(5.0), Pt(10.0));

    /// Letter pages with page_top = 730 and page_bottom = 50
    fn flow() -> PageFlow<RecordingRenderer> {
        PageFlowBuilder::new()
            .with_margins(Margins::trbl(Pt(62.0), Pt(70.0), Pt(50.0), Pt(25.0)))
            .build(RecordingRenderer::new(FONT))
            .expect("can build flow")
    }

    /// Words wide enough that each one fills a line of its own
    fn one_word_per_line(count: usize) -> String {
        (0..count)
            .map(|i| format!("{i:0>30}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn initial_page_geometry() {
        let flow = flow();
        assert_eq!(flow.page_count(), 1);
        assert_eq!(flow.page_top(), Pt(730.0));
        assert_eq!(flow.page_bottom(), Pt(50.0));
        assert_eq!(flow.content_width(), Pt(517.0));
        assert_eq!(flow.cursor().current_y, Pt(730.0));
    }

    #[test]
    fn text_overflow_breaks_exactly_once() {
        let mut flow = flow();
        flow.append_text_left(one_word_per_line(50), FONT)
            .expect("can append text");

        let pages = flow.renderer().pages();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].texts().len(), 42);
        assert_eq!(pages[1].texts().len(), 8);
        assert_eq!(pages[0].text_origins().last().map(|p| p.y), Some(Pt(58.0)));
        assert_eq!(pages[1].text_origins()[0], Point::new(Pt(25.0), Pt(730.0)));
        assert_eq!(pages[1].text_origins()[1], Point::new(Pt(25.0), Pt(714.0)));
        assert_eq!(pages[1].texts()[0], format!("{:0>30}", 42));
        assert_eq!(flow.cursor().current_y, Pt(730.0 - 7.0 * 16.0));
    }

    #[test]
    fn centered_text_uses_line_width() {
        let mut flow = flow();
        flow.append_text_centered("abcdefghij", FONT)
            .expect("can append text");
        let origins = flow.renderer().pages()[0].text_origins();
        assert_eq!(origins, vec![Point::new(Pt(233.5), Pt(714.0))]);
    }

    #[test]
    fn centered_mixed_fonts_use_summed_width() {
        let mut flow = flow();
        flow.append_text(
            &[FormattedRun::new("big", FONT), FormattedRun::new("small", SMALL)],
            Align::Centered,
        )
        .expect("can append text");

        // "big " is 40pt in the large font, "small" 25pt: (517 - 65) / 2 + 25
        let origins = flow.renderer().pages()[0].text_origins();
        assert_eq!(origins, vec![Point::new(Pt(251.0), Pt(714.0))]);
    }

    #[test]
    fn mixed_fonts_share_one_baseline() {
        let mut flow = flow();
        flow.append_text(
            &[FormattedRun::new("big", FONT), FormattedRun::new("small", SMALL)],
            Align::Left,
        )
        .expect("can append text");

        let page = &flow.renderer().pages()[0];
        assert_eq!(
            page.commands,
            vec![DrawCommand::Text {
                origin: Point::new(Pt(25.0), Pt(714.0)),
                runs: vec![FormattedRun::new("big ", FONT), FormattedRun::new("small", SMALL)],
            }]
        );
    }

    #[test]
    fn new_line_advances_without_drawing() {
        let mut flow = flow();
        flow.new_line(SMALL).expect("can append blank line");
        flow.new_line(FONT).expect("can append blank line");
        assert_eq!(flow.cursor().current_y, Pt(704.0));
        assert!(flow.renderer().pages()[0].commands.is_empty());
    }

    #[test]
    fn header_and_footer_repeat_on_every_page() {
        let mut flow = PageFlowBuilder::new()
            .with_header("header", SMALL)
            .with_footer("footer", SMALL)
            .build(RecordingRenderer::new(FONT))
            .expect("can build flow");

        // 750 top margin line, header baseline at 740, rule at 736, content from 726
        assert_eq!(flow.page_top(), Pt(726.0));
        // 30 bottom margin + 10 footer + 4 + 6
        assert_eq!(flow.page_bottom(), Pt(50.0));

        flow.append_text_left(one_word_per_line(60), FONT)
            .expect("can append text");

        let pages = flow.renderer().pages();
        assert_eq!(pages.len(), 2);
        for page in pages {
            let texts = page.texts();
            assert_eq!(texts[0], "header");
            assert_eq!(texts[1], "footer");
            assert_eq!(
                page.lines(),
                vec![
                    (Point::new(Pt(25.0), Pt(736.0)), Point::new(Pt(542.0), Pt(736.0))),
                    (Point::new(Pt(25.0), Pt(44.0)), Point::new(Pt(542.0), Pt(44.0))),
                ]
            );
            assert_eq!(page.text_origins()[1], Point::new(Pt(25.0), Pt(30.0)));
        }
        assert_eq!(pages[1].text_origins()[2].y, Pt(726.0));
    }

    #[test]
    fn explicit_new_page_resets_cursor() {
        let mut flow = flow();
        flow.append_text_left("some text", FONT).expect("can append text");
        flow.new_page().expect("can break page");
        assert_eq!(flow.page_count(), 2);
        assert_eq!(flow.cursor().current_y, flow.page_top());
    }

    #[test]
    fn rejects_margins_that_leave_no_room() {
        let err = PageFlowBuilder::new()
            .with_margins(Margins::trbl(Pt(400.0), Pt(10.0), Pt(400.0), Pt(10.0)))
            .build(RecordingRenderer::new(FONT))
            .expect_err("no vertical room");
        assert!(matches!(err, PDFError::Usage { .. }));

        let err = PageFlowBuilder::new()
            .with_margins(Margins::trbl(Pt(-1.0), Pt(10.0), Pt(10.0), Pt(10.0)))
            .build(RecordingRenderer::new(FONT))
            .expect_err("negative margin");
        assert!(matches!(err, PDFError::Usage { .. }));
    }

    #[test]
    fn rejects_header_and_footer_that_leave_no_room() {
        // 44 header lines end at 46, so content would start at 32, under the footer band at 50
        let err = PageFlowBuilder::new()
            .with_header(one_word_per_line(44), FONT)
            .with_footer("footer", SMALL)
            .build(RecordingRenderer::new(FONT))
            .expect_err("header and footer fill the page");
        assert!(matches!(err, PDFError::Usage { operation: "start page", .. }));

        let flow = PageFlowBuilder::new()
            .with_header(one_word_per_line(40), FONT)
            .with_footer("footer", SMALL)
            .build(RecordingRenderer::new(FONT))
            .expect("a shorter header leaves room");
        assert_eq!(flow.page_top(), Pt(750.0 - 640.0 - 4.0 - 10.0));
        assert_eq!(flow.page_bottom(), Pt(50.0));
    }

    #[test]
    fn page_allocation_failure_propagates() {
        let mut flow = PageFlowBuilder::new()
            .build(RecordingRenderer::new(FONT).with_page_limit(1))
            .expect("can build flow");
        let err = flow
            .append_text_left(one_word_per_line(60), FONT)
            .expect_err("second page cannot be allocated");
        assert!(matches!(err, PDFError::Io(_)));
    }

    #[test]
    fn measurement_failure_propagates() {
        let mut flow = flow();
        let broken = MonoFont::new(Pt(10.0), Pt(0.0));
        let err = flow
            .append_text_left("text", broken)
            .expect_err("font has no line height");
        assert!(matches!(err, PDFError::Measurement { .. }));
    }

    #[test]
    fn table_rows_are_drawn_top_aligned() {
        let mut flow = flow();
        let table = Table::new(FONT, [Pt(100.0), Pt(200.0)])
            .cell(TableCell::new(CellPosition::new(1, 1), "alpha bravo charlie"))
            .cell(
                TableCell::new(CellPosition::new(1, 2), "short")
                    .with_background(colours::LIGHT_GREY),
            )
            .init(flow.renderer())
            .expect("table is valid");
        // every word needs a line of its own inside the 94pt content box
        assert_eq!(table.row_height(1), Pt(3.0 * 16.0 + 6.0));

        flow.append_table(&table).expect("can append table");

        let page = &flow.renderer().pages()[0];
        let top = 730.0 - 16.0;
        let bottom = top - 54.0;
        assert_eq!(
            page.lines(),
            vec![
                (Point::new(Pt(25.0), Pt(top)), Point::new(Pt(325.0), Pt(top))),
                (Point::new(Pt(25.0), Pt(bottom)), Point::new(Pt(325.0), Pt(bottom))),
                (Point::new(Pt(25.0), Pt(top)), Point::new(Pt(25.0), Pt(bottom))),
                (Point::new(Pt(325.0), Pt(top)), Point::new(Pt(325.0), Pt(bottom))),
                (Point::new(Pt(125.0), Pt(top)), Point::new(Pt(125.0), Pt(bottom))),
            ]
        );
        assert!(page.commands.contains(&DrawCommand::FillRect {
            origin: Point::new(Pt(125.5), Pt(bottom + 0.5)),
            width: Pt(199.0),
            height: Pt(53.0),
            colour: colours::LIGHT_GREY,
        }));
        assert_eq!(page.texts(), vec!["alpha", "bravo", "charlie", "short"]);
        let origins = page.text_origins();
        let first_line = top - 3.0 - 16.0;
        assert_eq!(origins[0], Point::new(Pt(28.0), Pt(first_line)));
        assert_eq!(origins[3], Point::new(Pt(128.0), Pt(first_line)));
        assert_eq!(flow.cursor().current_y, Pt(bottom));
    }

    #[test]
    fn table_row_that_does_not_fit_moves_to_next_page() {
        let mut flow = flow();
        flow.append_text_left(one_word_per_line(40), FONT)
            .expect("can append text");
        assert_eq!(flow.cursor().current_y, Pt(90.0));

        let table = Table::new(FONT, [Pt(200.0)])
            .cell(TableCell::new(CellPosition::new(1, 1), "first"))
            .cell(TableCell::new(CellPosition::new(3, 1), "third"))
            .init(flow.renderer())
            .expect("table is valid");
        flow.append_table(&table).expect("can append table");

        let pages = flow.renderer().pages();
        assert_eq!(pages.len(), 2);
        // the gap line leaves 74; a 22pt row would end at 52, above the bottom
        assert_eq!(pages[0].texts().last().map(String::as_str), Some("first"));
        // the next row would end at 30, so it opens the next page
        assert_eq!(pages[1].texts(), vec!["third"]);
        assert_eq!(pages[1].lines()[0].0.y, Pt(730.0));
        assert_eq!(flow.cursor().current_y, Pt(708.0));
    }

    #[test]
    fn row_taller_than_page_is_rejected_before_drawing() {
        let mut flow = flow();
        let content = one_word_per_line(50);
        let table = Table::new(FONT, [Pt(400.0)])
            .cell(TableCell::new(CellPosition::new(1, 1), "fits"))
            .cell(TableCell::new(CellPosition::new(2, 1), content))
            .init(flow.renderer())
            .expect("table is valid");

        let err = flow.append_table(&table).expect_err("row cannot fit");
        assert!(matches!(err, PDFError::Layout { operation: "append table", .. }));
        assert_eq!(flow.page_count(), 1);
        assert!(flow.renderer().pages()[0].commands.is_empty());
    }

    #[test]
    fn finish_saves_and_closes() {
        let mut flow = flow();
        flow.append_text_left("hello", FONT).expect("can append text");

        let mut out: Vec<u8> = Vec::new();
        flow.finish(&mut out).expect("can finish");
        let dump = String::from_utf8(out).expect("dump is utf-8");
        assert!(dump.starts_with("page 1 (612pt x 792pt)"));
        assert!(dump.contains("text 25pt 714pt \"hello\""));
    }
}
