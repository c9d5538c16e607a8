use std::collections::HashSet;

use crate::colour::Colour;
use crate::layout::{wrap, FormattedRun, Line, Margins};
use crate::renderer::TextMeasure;
use crate::units::Pt;
use crate::PDFError;

/// Space between a cell's border and its text, on all four sides
pub const CELL_MARGINS: Margins = Margins {
    top: Pt(3.0),
    right: Pt(3.0),
    bottom: Pt(3.0),
    left: Pt(3.0),
};

/// Stroke width of the table grid; cell backgrounds are inset by half of it
pub const BORDER_WIDTH: Pt = Pt(1.0);

/// Where a cell sits in its table. Rows and columns count from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPosition {
    pub row: usize,
    pub column: usize,
    /// Number of consecutive columns the cell occupies
    pub colspan: usize,
}

impl CellPosition {
    /// A cell occupying a single column
    pub fn new(row: usize, column: usize) -> CellPosition {
        CellPosition::spanning(row, column, 1)
    }

    pub fn spanning(row: usize, column: usize, colspan: usize) -> CellPosition {
        CellPosition {
            row,
            column,
            colspan,
        }
    }
}

/// A table cell as configured by the caller, before any geometry is known
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell<F> {
    pub position: CellPosition,
    pub content: String,
    /// Overrides the table's font for this cell
    pub font: Option<F>,
    pub background: Option<Colour>,
}

impl<F> TableCell<F> {
    pub fn new<S: Into<String>>(position: CellPosition, content: S) -> TableCell<F> {
        TableCell {
            position,
            content: content.into(),
            font: None,
            background: None,
        }
    }

    pub fn with_font(mut self, font: F) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_background<C: Into<Colour>>(mut self, colour: C) -> Self {
        self.background = Some(colour.into());
        self
    }
}

/// A fully configured table waiting to be laid out with [Table::init].
///
/// ```
/// use pdf_flow::layout::{CellPosition, Table, TableCell};
/// use pdf_flow::recording::{MonoFont, RecordingRenderer};
/// use pdf_flow::Pt;
///
/// let font = MonoFont::new(Pt(6.0), Pt(12.0));
/// let renderer = RecordingRenderer::new(font);
///
/// let table = Table::new(font, [Pt(100.0), Pt(150.0), Pt(70.0), Pt(100.0)])
///     .cell(TableCell::new(CellPosition::new(1, 1), "Dog Leash"))
///     .cell(TableCell::new(CellPosition::spanning(2, 2, 2), "Organic Bike"))
///     .init(&renderer)
///     .expect("table is valid");
///
/// assert_eq!(table.number_of_rows(), 2);
/// assert_eq!(table.cells()[1].width(), Pt(220.0));
/// ```
#[derive(Debug, Clone)]
pub struct Table<F> {
    column_widths: Vec<Pt>,
    cells: Vec<TableCell<F>>,
    font: F,
}

impl<F: Clone + PartialEq> Table<F> {
    /// Create a table with explicit column widths; the table is as wide as their sum
    pub fn new<I: IntoIterator<Item = Pt>>(font: F, column_widths: I) -> Table<F> {
        Table {
            column_widths: column_widths.into_iter().collect(),
            cells: Vec::new(),
            font,
        }
    }

    /// Create a table of `columns` equally wide columns spanning `table_width`
    pub fn with_equal_columns<W: Into<Pt>>(font: F, table_width: W, columns: usize) -> Table<F> {
        let width = table_width.into() / columns.max(1) as f32;
        Table::new(font, std::iter::repeat(width).take(columns))
    }

    pub fn add_cell(&mut self, cell: TableCell<F>) {
        self.cells.push(cell);
    }

    /// Builder-style variant of [Table::add_cell]
    pub fn cell(mut self, cell: TableCell<F>) -> Self {
        self.add_cell(cell);
        self
    }

    pub fn number_of_columns(&self) -> usize {
        self.column_widths.len()
    }

    pub fn table_width(&self) -> Pt {
        self.column_widths.iter().copied().sum()
    }

    /// Resolve every cell's font, width, wrapped lines and height. The table is
    /// consumed; the returned layout is immutable.
    ///
    /// Fails with [PDFError::Layout] if a column is not wider than zero, a position is
    /// zero, a colspan runs past the last column, a cell is too narrow to hold any
    /// text, or two cells cover the same column of the same row.
    pub fn init<M>(self, measure: &M) -> Result<LaidOutTable<F>, PDFError>
    where
        M: TextMeasure<Font = F> + ?Sized,
    {
        const OPERATION: &str = "table init";

        let Table {
            column_widths,
            cells,
            font,
        } = self;

        if let Some(i) = column_widths.iter().position(|w| !(*w > Pt(0.0))) {
            return Err(PDFError::layout(
                OPERATION,
                format!("column {} has non-positive width {}", i + 1, column_widths[i]),
            ));
        }

        let mut occupied: HashSet<(usize, usize)> = HashSet::new();
        let mut laid_out: Vec<LaidOutCell<F>> = Vec::with_capacity(cells.len());

        for cell in cells.into_iter() {
            let position = cell.position;
            if position.row == 0 || position.column == 0 || position.colspan == 0 {
                return Err(PDFError::cell_layout(
                    OPERATION,
                    position,
                    "row, column and colspan count from 1",
                ));
            }

            let last_column = position.column - 1 + position.colspan;
            if last_column > column_widths.len() {
                return Err(PDFError::cell_layout(
                    OPERATION,
                    position,
                    format!(
                        "colspan {} runs past the last of {} columns",
                        position.colspan,
                        column_widths.len()
                    ),
                ));
            }

            for column in position.column..=last_column {
                if !occupied.insert((position.row, column)) {
                    return Err(PDFError::cell_layout(
                        OPERATION,
                        position,
                        format!("column {column} is already covered by another cell"),
                    ));
                }
            }

            let width: Pt = column_widths[position.column - 1..last_column]
                .iter()
                .copied()
                .sum();
            let content_width = width - CELL_MARGINS.horizontal();
            if !(content_width > Pt(0.0)) {
                return Err(PDFError::cell_layout(
                    OPERATION,
                    position,
                    format!("cell width {width} leaves no room inside the cell margins"),
                ));
            }

            let cell_font = cell.font.unwrap_or_else(|| font.clone());
            let lines = wrap(
                measure,
                &[FormattedRun::new(cell.content.clone(), cell_font.clone())],
                content_width,
            )?;

            let mut height = CELL_MARGINS.top + CELL_MARGINS.bottom;
            for line in lines.iter() {
                height += line.height(measure)?;
            }

            tracing::trace!(
                row = position.row,
                column = position.column,
                %width,
                %height,
                "laid out table cell"
            );

            laid_out.push(LaidOutCell {
                position,
                content: cell.content,
                font: cell_font,
                background: cell.background,
                width,
                content_width,
                height,
                lines,
            });
        }

        let number_of_rows = laid_out
            .iter()
            .map(|cell| cell.position.row)
            .max()
            .unwrap_or_default();

        Ok(LaidOutTable {
            column_widths,
            cells: laid_out,
            font,
            number_of_rows,
        })
    }
}

/// A cell whose geometry has been resolved by [Table::init]
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutCell<F> {
    position: CellPosition,
    content: String,
    font: F,
    background: Option<Colour>,
    width: Pt,
    content_width: Pt,
    height: Pt,
    lines: Vec<Line<F>>,
}

impl<F> LaidOutCell<F> {
    pub fn position(&self) -> CellPosition {
        self.position
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// The cell's own font, or the table's font if it had none
    pub fn font(&self) -> &F {
        &self.font
    }

    pub fn background(&self) -> Option<Colour> {
        self.background
    }

    /// Sum of the widths of the spanned columns
    pub fn width(&self) -> Pt {
        self.width
    }

    /// Width left for text between the left and right cell margins
    pub fn content_width(&self) -> Pt {
        self.content_width
    }

    /// Height of the wrapped text plus the top and bottom cell margins
    pub fn height(&self) -> Pt {
        self.height
    }

    pub fn lines(&self) -> &[Line<F>] {
        &self.lines
    }
}

/// A table with all geometry resolved, ready for
/// [`PageFlow::append_table`](crate::layout::PageFlow::append_table)
#[derive(Debug, Clone)]
pub struct LaidOutTable<F> {
    column_widths: Vec<Pt>,
    cells: Vec<LaidOutCell<F>>,
    font: F,
    number_of_rows: usize,
}

impl<F> LaidOutTable<F> {
    /// The highest row index used by any cell
    pub fn number_of_rows(&self) -> usize {
        self.number_of_rows
    }

    /// The table's default font
    pub fn font(&self) -> &F {
        &self.font
    }

    pub fn column_widths(&self) -> &[Pt] {
        &self.column_widths
    }

    pub fn table_width(&self) -> Pt {
        self.column_widths.iter().copied().sum()
    }

    /// All cells, in the order they were added
    pub fn cells(&self) -> &[LaidOutCell<F>] {
        &self.cells
    }

    /// The height of the tallest cell in `row`, or zero if the row is empty
    pub fn row_height(&self, row: usize) -> Pt {
        self.cells
            .iter()
            .filter(|cell| cell.position.row == row)
            .fold(Pt(0.0), |height, cell| height.max(cell.height))
    }

    /// The cells of `row` sorted by column. Cells sharing a column keep the order in
    /// which they were added.
    pub fn cells_ordered(&self, row: usize) -> Vec<&LaidOutCell<F>> {
        let mut cells: Vec<&LaidOutCell<F>> = self
            .cells
            .iter()
            .filter(|cell| cell.position.row == row)
            .collect();
        cells.sort_by_key(|cell| cell.position.column);
        cells
    }

    /// Horizontal offset of `cell` from the table's left edge plus `extra`: the summed
    /// widths of the cells placed before it in its row. Returns [None] if `cell` is not
    /// one of this table's cells.
    pub fn x_offset_of(&self, cell: &LaidOutCell<F>, extra: Pt) -> Option<Pt> {
        let mut x = Pt(0.0);
        for candidate in self.cells_ordered(cell.position.row) {
            if std::ptr::eq(candidate, cell) {
                return Some(x + extra);
            }
            x += candidate.width;
        }
        None
    }
}
