//! The bill: ordered rows plus the shared price and glass name.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::row::{parse_number, Row, RowField};
use crate::error::{BillError, Result};
use crate::pricing::{price_row, RowPricing};

/// Field name reported when the price does not parse.
pub const PRICE_FIELD: &str = "price per sq ft";

/// Price text a fresh bill starts with.
const DEFAULT_PRICE_TEXT: &str = "0";

/// An in-memory bill being edited by the clerk.
///
/// Rows are only changed through the edit operations below. The bill always
/// keeps at least one row, and once the last row is complete a fresh empty
/// row is appended so there is always somewhere to type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bill {
    glass_name: String,
    price_text: String,
    rows: Vec<Row>,
}

impl Default for Bill {
    fn default() -> Self {
        Self {
            glass_name: String::new(),
            price_text: DEFAULT_PRICE_TEXT.to_string(),
            rows: vec![Row::default()],
        }
    }
}

/// A complete row as it appears on the printed bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillLine {
    /// Serial number on the bill, contiguous from 1.
    pub serial: usize,
    /// Position of the row in the bill (0-based).
    pub row_index: usize,
    /// Length as typed.
    pub length: String,
    /// Width as typed.
    pub width: String,
    /// Quantity as typed.
    pub quantity: String,
    /// Computed figures.
    pub pricing: RowPricing,
}

/// Everything derived from a bill at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillSummary {
    /// Glass name label.
    pub glass_name: String,
    /// Parsed price per square foot.
    pub price_per_sqft: f64,
    /// Pricing per row, in row order; `None` for incomplete rows.
    pub rows: Vec<Option<RowPricing>>,
    /// Complete rows, renumbered from 1.
    pub lines: Vec<BillLine>,
    /// Sum of line prices over complete rows.
    pub total_price: f64,
}

impl BillSummary {
    /// Number of rows that made it onto the bill.
    pub fn complete_rows(&self) -> usize {
        self.lines.len()
    }

    /// Pricing of row `index`, provided the summary was taken from a bill
    /// with `row_count` rows. A summary taken before rows were added or
    /// removed gives nothing.
    pub fn row_pricing(&self, index: usize, row_count: usize) -> Option<RowPricing> {
        if self.rows.len() != row_count {
            return None;
        }
        self.rows.get(index).copied().flatten()
    }
}

impl Bill {
    /// Create an empty bill with one blank row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bill from already-known rows.
    pub fn from_rows(
        glass_name: impl Into<String>,
        price_text: impl Into<String>,
        rows: impl IntoIterator<Item = Row>,
    ) -> Self {
        let mut bill = Self {
            glass_name: glass_name.into(),
            price_text: price_text.into(),
            rows: Vec::new(),
        };
        bill.prefill(rows);
        bill
    }

    /// Glass name label.
    pub fn glass_name(&self) -> &str {
        &self.glass_name
    }

    /// Set the glass name label.
    pub fn set_glass_name(&mut self, name: impl Into<String>) {
        self.glass_name = name.into();
    }

    /// Price per square foot, as typed.
    pub fn price_text(&self) -> &str {
        &self.price_text
    }

    /// Replace the typed price per square foot.
    pub fn set_price(&mut self, text: impl Into<String>) {
        self.price_text = text.into();
    }

    /// Parse the price per square foot.
    pub fn price_per_sqft(&self) -> Result<f64> {
        parse_number(&self.price_text)
            .ok_or_else(|| BillError::invalid_number(PRICE_FIELD, self.price_text.trim()))
    }

    /// All rows in entry order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows, including incomplete ones.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if no row has anything typed in.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Row::is_empty)
    }

    /// Append a blank row and return its index.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(Row::default());
        self.rows.len() - 1
    }

    /// Change one field of one row.
    ///
    /// Returns `true` when the edit completed the last row and a new blank
    /// row was appended.
    pub fn edit_row(&mut self, index: usize, field: RowField, text: impl Into<String>) -> Result<bool> {
        let len = self.rows.len();
        let row = self
            .rows
            .get_mut(index)
            .ok_or(BillError::RowOutOfRange { index, len })?;
        row.set_field(field, text);

        Ok(self.ensure_trailing_row())
    }

    /// Remove a row. The bill keeps at least one blank row.
    pub fn remove_row(&mut self, index: usize) -> Result<Row> {
        let len = self.rows.len();
        if index >= len {
            return Err(BillError::RowOutOfRange { index, len });
        }
        let removed = self.rows.remove(index);
        if self.rows.is_empty() {
            self.rows.push(Row::default());
        }
        self.ensure_trailing_row();
        Ok(removed)
    }

    /// Drop every row, leaving one blank row. Price and name are kept.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.rows.push(Row::default());
    }

    /// Append rows after the last non-blank row, e.g. from text recognition.
    ///
    /// Trailing blank rows are replaced; a fresh blank row follows the new
    /// ones when the last of them is complete. Returns the number of rows added.
    pub fn prefill(&mut self, rows: impl IntoIterator<Item = Row>) -> usize {
        while self.rows.last().is_some_and(Row::is_empty) {
            self.rows.pop();
        }
        let before = self.rows.len();
        self.rows.extend(rows);
        let added = self.rows.len() - before;

        if self.rows.is_empty() {
            self.rows.push(Row::default());
        }
        self.ensure_trailing_row();
        added
    }

    /// Append a blank row when the last one is complete.
    fn ensure_trailing_row(&mut self) -> bool {
        if self.rows.last().is_some_and(Row::is_complete) {
            self.rows.push(Row::default());
            true
        } else {
            false
        }
    }

    /// Compute every derived figure from the current inputs.
    ///
    /// Fails only when the price does not parse. Nothing is cached, so two
    /// calls on an unchanged bill give identical results.
    pub fn summary(&self) -> Result<BillSummary> {
        let price = self.price_per_sqft()?;

        let mut rows = Vec::with_capacity(self.rows.len());
        let mut lines = Vec::new();
        let mut total_price = 0.0;

        for (row_index, row) in self.rows.iter().enumerate() {
            let pricing = row
                .input()
                .map(|input| price_row(input.length, input.width, input.quantity, price));

            if let Some(pricing) = pricing {
                total_price += pricing.line_price;
                lines.push(BillLine {
                    serial: lines.len() + 1,
                    row_index,
                    length: row.length.trim().to_string(),
                    width: row.width.trim().to_string(),
                    quantity: row.quantity.trim().to_string(),
                    pricing,
                });
            }
            rows.push(pricing);
        }

        debug!(
            rows = self.rows.len(),
            complete = lines.len(),
            total = total_price,
            "Recomputed bill"
        );

        Ok(BillSummary {
            glass_name: self.glass_name.clone(),
            price_per_sqft: price,
            rows,
            lines,
            total_price,
        })
    }
}
