//! glass-core - Pricing, OCR pre-fill and PDF bills for a glass shop counter.
//!
//! Panes are billed by square footage after rounding each side up to the
//! next standard cutting size. This library holds the rounding table, the
//! per-row pricing, the editable [`Bill`] model, text extraction from photos
//! of measurement sheets, and the PDF and text renderings of a bill.
//!
//! # Example
//!
//! ```no_run
//! use glass_core::{export_pdf, Bill, BillConfig, RowField};
//!
//! let mut bill = Bill::new();
//! bill.set_glass_name("Clear 5mm");
//! bill.set_price("50");
//! bill.edit_row(0, RowField::Length, "10").unwrap();
//! bill.edit_row(0, RowField::Width, "10").unwrap();
//! bill.edit_row(0, RowField::Quantity, "2").unwrap();
//!
//! let summary = bill.summary().unwrap();
//! assert_eq!(summary.total_price, 100.0);
//! export_pdf(&summary, &BillConfig::default()).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod ocr;
pub mod pricing;
pub mod validation;

// Re-exports for convenience
pub use config::{format_price, format_sqft, output_file_name, BillConfig};
pub use error::{BillError, ErrorCode, Result};
pub use generator::{export_pdf, render_pdf, render_preview, write_pdf};
pub use model::{Bill, BillLine, BillSummary, Row, RowField, RowInput, RowState};
pub use ocr::{
    extract_from_image, extract_measurements, Extraction, MeasurementParser, OcrEngine,
    PositionalParser, TesseractEngine,
};
pub use pricing::{adjust_measurement, price_row, RowPricing, ROUNDING_TABLE};
pub use validation::{validate_bill, ValidationResult};

/// Validate a bill and, if it passes, export it as a PDF.
///
/// This is the full export pipeline used by both front ends:
/// 1. Parse the price and check every row
/// 2. Log warnings
/// 3. Compute the summary
/// 4. Write `<glass_name>.pdf`
///
/// Returns the validation result alongside the written path (`None` when
/// validation failed and nothing was written).
pub fn export_bill(
    bill: &Bill,
    config: &BillConfig,
) -> Result<(ValidationResult, Option<std::path::PathBuf>)> {
    let validation = validate_bill(bill)?;
    for warning in &validation.warnings {
        tracing::warn!("{}", warning);
    }
    if !validation.passed {
        for err in &validation.errors {
            tracing::error!("{}", err);
        }
        return Ok((validation, None));
    }

    let summary = bill.summary()?;
    let path = export_pdf(&summary, config)?;
    Ok((validation, Some(path)))
}
