//! Configuration constants and settings for billing and export.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Floating-point comparison epsilon.
pub const EPS: f64 = 0.0001;

/// Square inches in one square foot.
pub const SQ_INCHES_PER_SQ_FT: f64 = 144.0;

/// Default currency label printed before prices.
pub const DEFAULT_CURRENCY: &str = "Rs.";

/// Default measurement rule label shown under the form.
pub const DEFAULT_RULE_LABEL: &str = "Measurement Rule : Aditya Aluminium & Glass Company";

/// File name used when the glass name is blank.
pub const FALLBACK_FILE_STEM: &str = "bill";

/// PDF page geometry and text placement, in points (US Letter).
pub mod layout {
    pub const PAGE_WIDTH: f32 = 612.0;
    pub const PAGE_HEIGHT: f32 = 792.0;

    pub const TITLE: &str = "BILL";
    pub const TITLE_X: f32 = 250.0;
    pub const TITLE_Y: f32 = 750.0;
    pub const TITLE_FONT_SIZE: f32 = 16.0;

    pub const BODY_FONT_SIZE: f32 = 12.0;
    pub const MARGIN_X: f32 = 50.0;
    pub const GLASS_NAME_Y: f32 = 730.0;
    pub const HEADER_Y: f32 = 700.0;
    pub const FIRST_ROW_Y: f32 = 660.0;
    pub const ROW_STEP: f32 = 20.0;
    pub const TOTAL_GAP: f32 = 40.0;
    pub const BOTTOM_MARGIN: f32 = 60.0;

    /// Column x positions: S.NO, Length, Width, Quantity, Sq ft, Price.
    pub const COLUMNS_X: [f32; 6] = [50.0, 100.0, 200.0, 300.0, 400.0, 500.0];

    pub const HEADERS: [&str; 6] = [
        "S.NO",
        "Length (Inc)",
        "Width (Inc)",
        "Quantity",
        "Sq ft",
        "Price",
    ];
}

/// Settings shared by the CLI and the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillConfig {
    /// Currency label printed before prices.
    pub currency: String,
    /// Measurement rule label.
    pub rule_label: String,
    /// Directory for exported PDFs (executable directory when unset).
    pub output_dir: Option<PathBuf>,
}

impl Default for BillConfig {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            rule_label: DEFAULT_RULE_LABEL.to_string(),
            output_dir: None,
        }
    }
}

impl BillConfig {
    /// Create a configuration that exports into `dir`.
    pub fn with_output_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: Some(dir.into()),
            ..Default::default()
        }
    }

    /// Directory exported bills are written to.
    ///
    /// Uses the configured directory, else the directory holding the running
    /// executable, else the current directory.
    pub fn resolve_output_dir(&self) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Full path of the PDF for a bill named `glass_name`.
    pub fn output_path(&self, glass_name: &str) -> PathBuf {
        self.resolve_output_dir().join(output_file_name(glass_name))
    }

    /// Format a price with the configured currency label.
    pub fn format_price(&self, value: f64) -> String {
        format_price(&self.currency, value)
    }
}

/// `<glass_name>.pdf`, with characters that are not legal in file names replaced.
pub fn output_file_name(glass_name: &str) -> String {
    let stem: String = glass_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        format!("{}.pdf", FALLBACK_FILE_STEM)
    } else {
        format!("{}.pdf", stem)
    }
}

/// Format a square footage the way bills show it.
pub fn format_sqft(value: f64) -> String {
    format!("{:.3} sq ft", value)
}

/// Format a price the way bills show it.
pub fn format_price(currency: &str, value: f64) -> String {
    format!("{} {:.2}", currency, value)
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::EPS;

    /// Check if two floats are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }
}
