//! Pre-export checks on a bill.

use crate::error::Result;
use crate::model::{Bill, Row, RowField, RowState};
use crate::pricing::is_in_table;

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Validate a bill before export.
///
/// Returns `Err` when the price per square foot is not a number.
pub fn validate_bill(bill: &Bill) -> Result<ValidationResult> {
    let mut result = ValidationResult::ok();

    let price = bill.price_per_sqft()?;
    if price < 0.0 {
        result.add_error(format!("Price per sq ft is negative ({})", price));
    }

    if bill.glass_name().trim().is_empty() {
        result.add_warning("Glass name is blank");
    }

    let mut complete = 0;
    for (idx, row) in bill.rows().iter().enumerate() {
        if row.is_complete() {
            complete += 1;
        }
        result.merge(validate_row(row, idx + 1));
    }

    if complete == 0 {
        result.add_warning("No complete rows to bill");
    }

    Ok(result)
}

/// Validate a single row (`row_num` is 1-based).
pub fn validate_row(row: &Row, row_num: usize) -> ValidationResult {
    let mut result = ValidationResult::ok();

    match row.state() {
        RowState::Empty => {}
        RowState::Partial => {
            result.add_warning(format!("Row {}: Incomplete, will be skipped", row_num));
        }
        RowState::Invalid(field) => {
            result.add_warning(format!(
                "Row {}: {} '{}' is not a number, row will be skipped",
                row_num,
                field,
                row.field(field).trim()
            ));
        }
        RowState::Complete(input) => {
            let values = [input.length, input.width, input.quantity];
            for (field, value) in RowField::ALL.iter().zip(values) {
                if value <= 0.0 {
                    result.add_error(format!(
                        "Row {}: {} must be positive (got {})",
                        row_num, field, value
                    ));
                }
            }

            for (field, value) in [
                (RowField::Length, input.length),
                (RowField::Width, input.width),
            ] {
                if value > 0.0 && !is_in_table(value) {
                    result.add_warning(format!(
                        "Row {}: {} {} is outside the rounding table, billed as measured",
                        row_num, field, value
                    ));
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BillError;

    #[test]
    fn test_clean_bill_passes() {
        let bill = Bill::from_rows("Clear", "40", vec![Row::new("10", "20", "1")]);
        let result = validate_bill(&bill).unwrap();
        assert!(result.passed);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_bad_price_is_an_error() {
        let bill = Bill::from_rows("Clear", "forty", vec![Row::new("10", "20", "1")]);
        assert!(matches!(
            validate_bill(&bill),
            Err(BillError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_negative_price_fails() {
        let bill = Bill::from_rows("Clear", "-5", vec![Row::new("10", "20", "1")]);
        let result = validate_bill(&bill).unwrap();
        assert!(!result.passed);
    }

    #[test]
    fn test_non_positive_measurement_fails() {
        let bill = Bill::from_rows("Clear", "40", vec![Row::new("0", "20", "-1")]);
        let result = validate_bill(&bill).unwrap();
        assert!(!result.passed);
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors[0].contains("length must be positive"));
    }

    #[test]
    fn test_skipped_rows_warn() {
        let bill = Bill::from_rows(
            "",
            "40",
            vec![Row::new("10", "", "1"), Row::new("10", "wide", "1")],
        );
        let result = validate_bill(&bill).unwrap();
        assert!(result.passed);
        assert_eq!(
            result.warnings,
            vec![
                "Glass name is blank".to_string(),
                "Row 1: Incomplete, will be skipped".to_string(),
                "Row 2: width 'wide' is not a number, row will be skipped".to_string(),
                "No complete rows to bill".to_string(),
            ]
        );
    }

    #[test]
    fn test_oversize_measurement_warns() {
        let bill = Bill::from_rows("Clear", "40", vec![Row::new("130", "0.5", "1")]);
        let result = validate_bill(&bill).unwrap();
        assert!(result.passed);
        assert_eq!(result.warnings.len(), 2);
        assert!(result.warnings[0].contains("length 130"));
    }
}
