//! PDF bill generation.

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use tracing::info;

use crate::config::{format_sqft, layout, BillConfig};
use crate::error::{BillError, Result};
use crate::model::{BillLine, BillSummary};

/// Resource name of the regular body font.
const FONT_REGULAR: &str = "F1";
/// Resource name of the bold title font.
const FONT_BOLD: &str = "F2";

/// Y of the header row on continuation pages.
const CONTINUATION_HEADER_Y: f32 = layout::TITLE_Y;

/// Collects text drawing operations, one list per page.
struct PageWriter {
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
}

impl PageWriter {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
        }
    }

    /// Draw a string with its baseline starting at (x, y).
    ///
    /// Text is written as raw bytes under the standard Type1 fonts, so only
    /// WinAnsi (Latin) characters print correctly; anything else comes out
    /// garbled but still renders.
    fn text(&mut self, font: &str, size: f32, x: f32, y: f32, text: &str) {
        self.current.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.into(), size.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ]);
    }

    /// Draw one row of cells at the column positions.
    fn cells(&mut self, y: f32, cells: &[&str]) {
        for (x, cell) in layout::COLUMNS_X.iter().zip(cells) {
            self.text(FONT_REGULAR, layout::BODY_FONT_SIZE, *x, y, cell);
        }
    }

    fn header_row(&mut self, y: f32) {
        self.cells(y, &layout::HEADERS);
    }

    fn new_page(&mut self) {
        let finished = std::mem::take(&mut self.current);
        self.pages.push(finished);
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        self.new_page();
        self.pages
    }
}

/// Lay out the bill onto pages of drawing operations.
fn layout_bill(summary: &BillSummary, config: &BillConfig) -> Vec<Vec<Operation>> {
    let mut writer = PageWriter::new();
    let row_offset = layout::HEADER_Y - layout::FIRST_ROW_Y;

    writer.text(
        FONT_BOLD,
        layout::TITLE_FONT_SIZE,
        layout::TITLE_X,
        layout::TITLE_Y,
        layout::TITLE,
    );
    writer.text(
        FONT_REGULAR,
        layout::BODY_FONT_SIZE,
        layout::MARGIN_X,
        layout::GLASS_NAME_Y,
        &format!("Glass Name: {}", summary.glass_name),
    );
    writer.header_row(layout::HEADER_Y);

    // Baseline of the next row to draw.
    let mut y = layout::FIRST_ROW_Y;
    for line in &summary.lines {
        if y < layout::BOTTOM_MARGIN {
            writer.new_page();
            writer.header_row(CONTINUATION_HEADER_Y);
            y = CONTINUATION_HEADER_Y - row_offset;
        }
        draw_line(&mut writer, y, line, config);
        y -= layout::ROW_STEP;
    }

    let mut total_y = y + layout::ROW_STEP - layout::TOTAL_GAP;
    if total_y < layout::BOTTOM_MARGIN {
        writer.new_page();
        total_y = CONTINUATION_HEADER_Y;
    }
    writer.text(
        FONT_REGULAR,
        layout::BODY_FONT_SIZE,
        layout::MARGIN_X,
        total_y,
        &format!("Total Price: {}", config.format_price(summary.total_price)),
    );

    writer.finish()
}

fn draw_line(writer: &mut PageWriter, y: f32, line: &BillLine, config: &BillConfig) {
    let serial = line.serial.to_string();
    let sqft = format_sqft(line.pricing.billed_area_sqft);
    let price = config.format_price(line.pricing.line_price);
    writer.cells(
        y,
        &[
            serial.as_str(),
            line.length.as_str(),
            line.width.as_str(),
            line.quantity.as_str(),
            sqft.as_str(),
            price.as_str(),
        ],
    );
}

fn render_error(e: impl std::fmt::Display) -> BillError {
    BillError::PdfRender {
        message: e.to_string(),
    }
}

/// Render a bill into PDF bytes.
pub fn render_pdf(summary: &BillSummary, config: &BillConfig) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_REGULAR => regular_id,
            FONT_BOLD => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for operations in layout_bill(summary, config) {
        let content = Content { operations };
        let encoded = content.encode().map_err(render_error)?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let media_box: Vec<Object> = vec![
        0.into(),
        0.into(),
        layout::PAGE_WIDTH.into(),
        layout::PAGE_HEIGHT.into(),
    ];
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => media_box,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(render_error)?;
    Ok(bytes)
}

/// Render a bill and write it to `path`.
pub fn write_pdf(summary: &BillSummary, config: &BillConfig, path: &Path) -> Result<()> {
    let bytes = render_pdf(summary, config)?;
    std::fs::write(path, &bytes).map_err(|source| BillError::PdfWrite {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        rows = summary.lines.len(),
        "Wrote bill to {}",
        path.display()
    );
    Ok(())
}

/// Write a bill as `<glass_name>.pdf` in the configured output directory.
pub fn export_pdf(summary: &BillSummary, config: &BillConfig) -> Result<PathBuf> {
    let path = config.output_path(&summary.glass_name);
    write_pdf(summary, config, &path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bill, Row};
    use pretty_assertions::assert_eq;

    /// Decode every string drawn with `Tj`, page by page.
    fn drawn_text(bytes: &[u8]) -> Vec<Vec<String>> {
        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .values()
            .map(|&page_id| {
                let data = doc.get_page_content(page_id).unwrap();
                let content = Content::decode(&data).unwrap();
                content
                    .operations
                    .iter()
                    .filter(|op| op.operator == "Tj")
                    .filter_map(|op| match op.operands.first() {
                        Some(Object::String(bytes, _)) => {
                            Some(String::from_utf8_lossy(bytes).into_owned())
                        }
                        _ => None,
                    })
                    .collect()
            })
            .collect()
    }

    fn sample_summary() -> BillSummary {
        Bill::from_rows(
            "Clear 5mm",
            "50",
            vec![
                Row::new("10", "10", "2"),
                Row::new("", "7", "1"),
                Row::new("24", "36", "1"),
            ],
        )
        .summary()
        .unwrap()
    }

    #[test]
    fn test_single_page_bill() {
        let bytes = render_pdf(&sample_summary(), &BillConfig::default()).unwrap();
        let pages = drawn_text(&bytes);
        assert_eq!(pages.len(), 1);

        let text = &pages[0];
        assert_eq!(text[0], "BILL");
        assert_eq!(text[1], "Glass Name: Clear 5mm");
        assert_eq!(
            &text[2..8],
            &["S.NO", "Length (Inc)", "Width (Inc)", "Quantity", "Sq ft", "Price"]
        );
        assert_eq!(
            &text[8..14],
            &["1", "10", "10", "2", "1.000 sq ft", "Rs. 100.00"]
        );
        assert_eq!(
            &text[14..20],
            &["2", "24", "36", "1", "6.000 sq ft", "Rs. 300.00"]
        );
        assert_eq!(text[20], "Total Price: Rs. 400.00");
        assert_eq!(text.len(), 21);
    }

    #[test]
    fn test_long_bill_spills_onto_more_pages() {
        let rows = (0..60).map(|i| Row::new((10 + i).to_string(), "10", "1"));
        let summary = Bill::from_rows("Bulk", "1", rows).summary().unwrap();
        let pages = drawn_text(&render_pdf(&summary, &BillConfig::default()).unwrap());

        assert!(pages.len() > 1);
        // Continuation pages repeat the header.
        assert_eq!(pages[1][0], "S.NO");

        // Serial numbers carry on across the page break.
        assert!(pages[1].contains(&"32".to_string()));

        let last_page = pages.last().unwrap();
        assert!(last_page.last().unwrap().starts_with("Total Price: Rs."));

        let row_cells: usize = pages.iter().map(|p| p.len()).sum();
        // title + name + one header per page + 6 cells per row + total
        assert_eq!(row_cells, 2 + 6 * pages.len() + 6 * 60 + 1);
    }

    #[test]
    fn test_empty_bill_still_renders() {
        let summary = Bill::new().summary().unwrap();
        let pages = drawn_text(&render_pdf(&summary, &BillConfig::default()).unwrap());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].last().unwrap(), "Total Price: Rs. 0.00");
    }

    #[test]
    fn test_non_latin_glass_name_still_renders() {
        let summary = Bill::from_rows("काँच", "50", vec![Row::new("10", "10", "2")])
            .summary()
            .unwrap();
        let bytes = render_pdf(&summary, &BillConfig::default()).unwrap();
        let pages = drawn_text(&bytes);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0][1], "Glass Name: काँच");
    }

    #[test]
    fn test_export_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = BillConfig::with_output_dir(dir.path());
        let path = export_pdf(&sample_summary(), &config).unwrap();

        assert_eq!(path, dir.path().join("Clear 5mm.pdf"));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("bill.pdf");
        let err = write_pdf(&sample_summary(), &BillConfig::default(), &path).unwrap_err();
        assert!(matches!(err, BillError::PdfWrite { path: ref p, .. } if *p == path));
    }
}
