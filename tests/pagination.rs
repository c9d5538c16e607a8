use pdf_flow::layout::{CellPosition, PageFlowBuilder, Table, TableCell};
use pdf_flow::recording::{MonoFont, RecordingRenderer};
use pdf_flow::Pt;

const BODY: MonoFont = MonoFont::new(Pt(6.0), Pt(12.0));

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn long_text_fills_pages_in_order() {
    init_tracing();

    let text = lipsum::lipsum(2000);
    let mut flow = PageFlowBuilder::new()
        .build(RecordingRenderer::new(BODY))
        .expect("can build flow");
    let (top, bottom) = (flow.page_top(), flow.page_bottom());
    assert_eq!((top, bottom), (Pt(750.0), Pt(30.0)));

    flow.append_text_left(text.clone(), BODY)
        .expect("can append text");

    let pages = flow.renderer().pages();
    assert!(pages.len() > 1);

    // 750 - 12 * 59 = 42 is the last baseline above 30; continuation pages start on
    // the page top itself and hold one line more
    assert_eq!(pages[0].texts().len(), 59);
    assert_eq!(pages[0].text_origins()[0].y, top - Pt(12.0));
    for page in pages[1..pages.len() - 1].iter() {
        assert_eq!(page.texts().len(), 60);
    }
    for page in pages[1..].iter() {
        assert_eq!(page.text_origins()[0].y, top);
    }

    for page in pages.iter() {
        for origin in page.text_origins() {
            assert!(origin.y > bottom);
            assert!(origin.y <= top);
            assert_eq!(origin.x, Pt(25.0));
        }
    }

    let drawn: Vec<String> = pages
        .iter()
        .flat_map(|page| page.texts())
        .flat_map(|line| {
            line.split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect();
    let source: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    assert_eq!(drawn, source);
}

#[test]
fn table_rows_never_split_across_pages() {
    init_tracing();

    let mut flow = PageFlowBuilder::new()
        .with_header("Inventory", BODY)
        .with_footer("continued", BODY)
        .build(RecordingRenderer::new(BODY))
        .expect("can build flow");

    let mut table = Table::with_equal_columns(BODY, Pt(510.0), 3);
    for row in 1..=100 {
        for column in 1..=3 {
            table.add_cell(TableCell::new(
                CellPosition::new(row, column),
                format!("r{row}c{column}"),
            ));
        }
    }
    let table = table.init(flow.renderer()).expect("table is valid");
    flow.append_table(&table).expect("can append table");

    let pages = flow.renderer().pages();
    assert!(pages.len() > 2);
    assert_eq!(pages.len(), flow.page_count());

    for row in 1..=100 {
        let holding: Vec<usize> = pages
            .iter()
            .enumerate()
            .filter(|(_, page)| {
                page.texts()
                    .iter()
                    .any(|text| text.starts_with(&format!("r{row}c")))
            })
            .map(|(i, _)| i)
            .collect();
        assert_eq!(holding.len(), 1, "row {row} is on pages {holding:?}");

        let page = &pages[holding[0]];
        let cells = page
            .texts()
            .into_iter()
            .filter(|text| text.starts_with(&format!("r{row}c")))
            .count();
        assert_eq!(cells, 3);
    }

    for page in pages.iter() {
        let texts = page.texts();
        assert_eq!(texts[0], "Inventory");
        assert_eq!(texts[1], "continued");
        for origin in page.text_origins().into_iter().skip(2) {
            assert!(origin.y > flow.page_bottom());
            assert!(origin.y < flow.page_top());
        }
    }
}

#[test]
fn blank_lines_and_text_share_the_cursor() {
    let mut flow = PageFlowBuilder::new()
        .build(RecordingRenderer::new(BODY))
        .expect("can build flow");

    flow.append_text_left("first", BODY).expect("can append text");
    flow.new_line(BODY).expect("can append blank line");
    flow.append_text_centered("third", BODY)
        .expect("can append text");

    let origins = flow.renderer().pages()[0].text_origins();
    assert_eq!(origins.len(), 2);
    assert_eq!(origins[0].y, Pt(738.0));
    assert_eq!(origins[1].y, Pt(714.0));
    // (517 - 30) / 2 + 25
    assert_eq!(origins[1].x, Pt(268.5));
    assert_eq!(flow.cursor().current_y, Pt(714.0));
}
