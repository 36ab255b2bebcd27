//! Integration tests for the billing pipeline.
//!
//! These follow a bill from typed or recognized measurements through the
//! summary to the exported PDF, checking what a clerk would see on paper
//! rather than exact PDF bytes.

use glass_core::{
    adjust_measurement, export_bill, extract_measurements, render_preview, Bill, BillConfig,
    BillError, PositionalParser, Row, RowField,
};
use lopdf::content::Content;
use lopdf::{Document, Object};
use pretty_assertions::assert_eq;
use std::path::Path;

// ==================== Helpers ====================

/// Every string drawn on every page, in drawing order.
fn pdf_strings(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("exported PDF should load");
    let mut strings = Vec::new();
    for (_, page_id) in doc.get_pages() {
        let data = doc.get_page_content(page_id).unwrap();
        let content = Content::decode(&data).unwrap();
        for op in content.operations.iter().filter(|op| op.operator == "Tj") {
            if let Some(Object::String(bytes, _)) = op.operands.first() {
                strings.push(String::from_utf8_lossy(bytes).into_owned());
            }
        }
    }
    strings
}

/// Type a full row into the bill the way the form does, field by field.
fn type_row(bill: &mut Bill, index: usize, length: &str, width: &str, quantity: &str) {
    bill.edit_row(index, RowField::Length, length).unwrap();
    bill.edit_row(index, RowField::Width, width).unwrap();
    bill.edit_row(index, RowField::Quantity, quantity).unwrap();
}

// ==================== Rounding boundaries ====================

#[test]
fn test_documented_boundaries() {
    let cases = [
        (3.0, 3.0),
        (3.01, 6.0),
        (12.0, 12.0),
        (15.0, 15.0),
        (120.0, 120.0),
        (121.0, 121.0),
        (0.5, 0.5),
    ];
    for (input, expected) in cases {
        assert_eq!(adjust_measurement(input), expected, "input {}", input);
    }
}

// ==================== Typing a bill ====================

#[test]
fn test_typed_bill_grows_and_totals() {
    let mut bill = Bill::new();
    bill.set_price("50");
    bill.set_glass_name("Clear 5mm");

    type_row(&mut bill, 0, "10", "10", "2");
    assert_eq!(bill.len(), 2);
    type_row(&mut bill, 1, "24", "36", "1");
    assert_eq!(bill.len(), 3);

    let summary = bill.summary().unwrap();
    assert!((summary.total_price - 400.0).abs() < 1e-9);
    assert!((summary.rows[0].unwrap().original_area_sqft - 0.694).abs() < 0.001);
    assert!(summary.rows[2].is_none());
}

#[test]
fn test_price_change_reprices_every_row() {
    let mut bill = Bill::new();
    type_row(&mut bill, 0, "10", "10", "2");
    assert_eq!(bill.summary().unwrap().total_price, 0.0);

    bill.set_price("25");
    assert!((bill.summary().unwrap().total_price - 50.0).abs() < 1e-9);

    bill.set_price("");
    assert!(matches!(
        bill.summary(),
        Err(BillError::InvalidNumber { .. })
    ));
}

// ==================== Export ====================

#[test]
fn test_export_skips_incomplete_rows_and_renumbers() {
    let dir = tempfile::tempdir().unwrap();
    let config = BillConfig::with_output_dir(dir.path());

    let bill = Bill::from_rows(
        "Tinted",
        "50",
        vec![
            Row::new("10", "10", "2"),
            Row::new("", "", "3"),
            Row::new("10", "ten", "1"),
            Row::new("24", "36", "1"),
        ],
    );

    let (validation, path) = export_bill(&bill, &config).unwrap();
    assert!(validation.passed);
    assert_eq!(validation.warnings.len(), 2);

    let path = path.expect("bill should be written");
    assert_eq!(path, dir.path().join("Tinted.pdf"));

    let strings = pdf_strings(&path);
    assert_eq!(strings[0], "BILL");
    assert_eq!(strings[1], "Glass Name: Tinted");
    assert_eq!(
        &strings[8..],
        &[
            "1",
            "10",
            "10",
            "2",
            "1.000 sq ft",
            "Rs. 100.00",
            "2",
            "24",
            "36",
            "1",
            "6.000 sq ft",
            "Rs. 300.00",
            "Total Price: Rs. 400.00",
        ]
    );
}

#[test]
fn test_export_refused_on_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = BillConfig::with_output_dir(dir.path());
    let bill = Bill::from_rows("Broken", "50", vec![Row::new("-10", "10", "1")]);

    let (validation, path) = export_bill(&bill, &config).unwrap();
    assert!(!validation.passed);
    assert!(path.is_none());
    assert!(!dir.path().join("Broken.pdf").exists());
}

#[test]
fn test_export_into_missing_directory_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = BillConfig::with_output_dir(dir.path().join("not-there"));
    let bill = Bill::from_rows("Clear", "50", vec![Row::new("10", "10", "1")]);

    let err = export_bill(&bill, &config).unwrap_err();
    match err {
        BillError::PdfWrite { path, .. } => {
            assert_eq!(path, dir.path().join("not-there").join("Clear.pdf"))
        }
        other => panic!("unexpected error: {}", other),
    }
}

// ==================== Recognized sheets ====================

#[test]
fn test_recognized_sheet_prefills_bill() {
    let text = "ADITYA GLASS\n\
                Length 10 Width 10 Quantity 2\n\
                Length 24 Width 36 Quantity 1\n\
                Thank you";
    let extraction = extract_measurements(text, &PositionalParser);
    assert_eq!(extraction.rows.len(), 2);

    let mut bill = Bill::new();
    bill.set_price("50");
    bill.set_glass_name("Clear");
    let added = bill.prefill(extraction.into_rows());
    assert_eq!(added, 2);

    let summary = bill.summary().unwrap();
    let preview = render_preview(&summary, &BillConfig::default());
    assert!(preview.contains("1\t10\t10\t2\t1.000 sq ft\tRs. 100.00"));
    assert!(preview.contains("2\t24\t36\t1\t6.000 sq ft\tRs. 300.00"));
    assert!(preview.ends_with("Total Price: Rs. 400.00"));
}

#[test]
fn test_unreadable_sheet_finds_no_data() {
    let extraction = extract_measurements("smudged photo\nno numbers", &PositionalParser);
    assert!(extraction.is_empty());
    assert!(extraction.rejected.is_empty());
}

// ==================== JSON summary ====================

#[test]
fn test_summary_serializes_for_json_output() {
    let bill = Bill::from_rows(
        "Clear",
        "50",
        vec![Row::new("10", "10", "2"), Row::new("24", "36", "1")],
    );
    let summary = bill.summary().unwrap();
    let value = serde_json::to_value(&summary).unwrap();

    assert_eq!(value["glass_name"], "Clear");
    assert_eq!(value["total_price"], 400.0);
    assert_eq!(value["lines"].as_array().unwrap().len(), 2);
    assert_eq!(value["lines"][1]["serial"], 2);
    assert_eq!(value["lines"][1]["pricing"]["billed_area_sqft"], 6.0);
    // The trailing blank row is priced as nothing.
    assert!(value["rows"][2].is_null());
}
