//! Render a small order report with a repeating header and footer.
//!
//! ```sh
//! cargo run --example report -- /path/to/font.ttf report.pdf
//! ```

use pdf_flow::colours;
use pdf_flow::layout::{Align, CellPosition, FormattedRun, PageFlowBuilder, Table, TableCell};
use pdf_flow::pagesize::PageFormat;
use pdf_flow::{Document, Font, PdfRenderer, Pt, SpanFont};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(font_path), Some(out_path)) = (args.next(), args.next()) else {
        eprintln!("usage: report <font.ttf> <out.pdf>");
        std::process::exit(2);
    };

    let mut document = Document::default();
    let regular = document.add_font(Font::load(std::fs::read(font_path)?)?);

    let body = SpanFont::new(regular, Pt(10.0));
    let title = body.with_size(Pt(18.0));
    let emphasis = body.with_colour(colours::BLUE);
    let small = body.with_size(Pt(8.0)).with_colour(colours::LIGHT_GREY);

    let mut flow = PageFlowBuilder::new()
        .with_format(PageFormat::LETTER)
        .with_header("Acme Outdoor Supply: quarterly orders", small)
        .with_footer("Internal use only", small)
        .build(PdfRenderer::new(document, body))?;

    flow.append_text_centered("Quarterly Orders", title)?;
    flow.new_line(body)?;
    flow.append_text(
        &[
            FormattedRun::new("Summary:", emphasis),
            FormattedRun::new(lipsum::lipsum(120), body),
        ],
        Align::Left,
    )?;

    let products = [
        "Dog Leash",
        "Organic Bike",
        "Yesterday Smack",
        "Tires for All",
        "Computer That Rock",
        "Sneaky Rocker",
    ];
    let mut table = Table::new(body, [Pt(100.0), Pt(150.0), Pt(70.0), Pt(100.0)]);
    for (i, product) in products.iter().cycle().take(60).enumerate() {
        let row = i / 2 + 1;
        let column = if i % 2 == 0 { 1 } else { 3 };
        let cell = TableCell::new(CellPosition::spanning(row, column, 2), *product);
        let cell = if row % 2 == 0 {
            cell.with_background(colours::LIGHT_GREY)
        } else {
            cell
        };
        table.add_cell(cell);
    }
    let table = table.init(flow.renderer())?;
    flow.append_table(&table)?;

    flow.new_page()?;
    flow.append_text_left(lipsum::lipsum(400), body)?;

    flow.finish_to_path(&out_path)?;
    println!("wrote {out_path}");
    Ok(())
}
