//! Error types for bill computation, OCR pre-fill and PDF export.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for bill processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Non-numeric input in a numeric field (2)
    InvalidInput = 2,
    /// Row index outside the bill (3)
    RowOutOfRange = 3,
    /// Image file not found (10)
    ImageNotFound = 10,
    /// Image format not accepted by the OCR engine (11)
    UnsupportedImage = 11,
    /// OCR engine failed (12)
    OcrFailed = 12,
    /// PDF document could not be built (20)
    PdfRender = 20,
    /// PDF could not be written to disk (21)
    PdfWrite = 21,
    /// Other I/O failure (30)
    Io = 30,
}

/// Main error type for the billing core.
#[derive(Debug, Error)]
pub enum BillError {
    #[error("Invalid value for '{field}': expected a number, got '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("Row {index} does not exist (bill has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("Image not found: {path}")]
    ImageNotFound { path: PathBuf },

    #[error("Unsupported image format: {path} (expected .png, .jpg or .jpeg)")]
    UnsupportedImage { path: PathBuf },

    #[error("Text recognition failed: {message}")]
    Ocr { message: String },

    #[error("Failed to build PDF: {message}")]
    PdfRender { message: String },

    #[error("Failed to write PDF to {path}: {source}")]
    PdfWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BillError {
    /// Shorthand for a field that failed to parse as a number.
    pub fn invalid_number(field: impl Into<String>, value: impl Into<String>) -> Self {
        BillError::InvalidNumber {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            BillError::InvalidNumber { .. } => ErrorCode::InvalidInput,
            BillError::RowOutOfRange { .. } => ErrorCode::RowOutOfRange,
            BillError::ImageNotFound { .. } => ErrorCode::ImageNotFound,
            BillError::UnsupportedImage { .. } => ErrorCode::UnsupportedImage,
            BillError::Ocr { .. } => ErrorCode::OcrFailed,
            BillError::PdfRender { .. } => ErrorCode::PdfRender,
            BillError::PdfWrite { .. } => ErrorCode::PdfWrite,
            BillError::Io(_) => ErrorCode::Io,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }

    /// True for errors caused by what the clerk typed, as opposed to the environment.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            BillError::InvalidNumber { .. } | BillError::RowOutOfRange { .. }
        )
    }
}

/// Result type alias for billing operations.
pub type Result<T> = std::result::Result<T, BillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_number_message() {
        let err = BillError::invalid_number("price per sq ft", "abc");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'price per sq ft': expected a number, got 'abc'"
        );
        assert_eq!(err.code(), ErrorCode::InvalidInput);
        assert_eq!(err.code_value(), 2);
        assert!(err.is_user_input());
    }

    #[test]
    fn test_pdf_write_keeps_path() {
        let err = BillError::PdfWrite {
            path: PathBuf::from("/nowhere/bill.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing dir"),
        };
        assert!(err.to_string().contains("/nowhere/bill.pdf"));
        assert_eq!(err.code_value(), 21);
        assert!(!err.is_user_input());
    }
}
