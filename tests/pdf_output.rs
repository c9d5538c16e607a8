use std::path::PathBuf;

use pdf_flow::colours;
use pdf_flow::layout::{Align, CellPosition, FormattedRun, PageFlowBuilder, Table, TableCell};
use pdf_flow::renderer::TextMeasure;
use pdf_flow::{Document, Font, PDFError, PdfRenderer, Pt, SpanFont};

/// A TrueType font to embed: `PDF_FLOW_TEST_FONT` if set, else DejaVu Sans where
/// common Linux distributions install it
fn test_font() -> Vec<u8> {
    let path = std::env::var_os("PDF_FLOW_TEST_FONT")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"));
    std::fs::read(&path).unwrap_or_else(|err| {
        panic!(
            "cannot read test font {}: {err}; set PDF_FLOW_TEST_FONT to a .ttf file",
            path.display()
        )
    })
}

#[test]
#[ignore = "needs a TrueType font; run with --ignored, optionally setting PDF_FLOW_TEST_FONT"]
fn writes_a_multi_page_pdf() {
    let bytes = test_font();

    let mut document = Document::default();
    let regular = document.add_font(Font::load(bytes).expect("can load font"));
    let body = SpanFont::new(regular, Pt(10.0));
    let bold = body.with_size(Pt(14.0)).with_colour(colours::BLUE);

    let mut flow = PageFlowBuilder::new()
        .with_header("Monthly report", body)
        .with_footer("Generated for testing", body.with_size(Pt(8.0)))
        .build(PdfRenderer::new(document, body))
        .expect("can build flow");

    let height = flow.renderer().line_height(&body).expect("can measure");
    assert!(height > Pt(10.0));
    assert_eq!(
        flow.renderer().text_width("", &body).expect("can measure"),
        Pt(0.0)
    );

    flow.append_text(
        &[
            FormattedRun::new("Summary", bold),
            FormattedRun::new(lipsum::lipsum(1500), body),
        ],
        Align::Left,
    )
    .expect("can append text");

    let mut table = Table::new(body, [Pt(120.0), Pt(200.0), Pt(120.0)]);
    for row in 1..=30 {
        table.add_cell(TableCell::new(CellPosition::new(row, 1), format!("Item {row}")));
        table.add_cell(
            TableCell::new(CellPosition::spanning(row, 2, 2), lipsum::lipsum_words(12))
                .with_background(colours::LIGHT_GREY),
        );
    }
    let table = table.init(flow.renderer()).expect("table is valid");
    flow.append_table(&table).expect("can append table");

    let pages = flow.page_count();
    assert!(pages > 1);
    assert_eq!(flow.renderer().document().page_order.len(), pages);

    let mut out: Vec<u8> = Vec::new();
    flow.finish(&mut out).expect("can write pdf");
    assert!(out.starts_with(b"%PDF-"));
    let trailer = String::from_utf8_lossy(&out[out.len().saturating_sub(64)..]).to_string();
    assert!(trailer.contains("%%EOF"));
}

#[test]
#[ignore = "needs a TrueType font; run with --ignored, optionally setting PDF_FLOW_TEST_FONT"]
fn fonts_from_another_document_are_missing() {
    let bytes = test_font();

    let mut other = Document::default();
    let foreign = SpanFont::new(other.add_font(Font::load(bytes).expect("can load font")), Pt(10.0));

    let renderer = PdfRenderer::new(Document::default(), foreign);
    let err = renderer
        .text_width("hello", &foreign)
        .expect_err("font is not in this document");
    assert!(matches!(err, PDFError::FontMissing));
}
