//! A single pane line item as typed by the clerk.

use serde::{Deserialize, Serialize};

/// One of the three editable fields of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowField {
    Length,
    Width,
    Quantity,
}

impl RowField {
    /// All fields in display order.
    pub const ALL: [RowField; 3] = [RowField::Length, RowField::Width, RowField::Quantity];

    /// Human-readable field name.
    pub fn label(&self) -> &'static str {
        match self {
            RowField::Length => "length",
            RowField::Width => "width",
            RowField::Quantity => "quantity",
        }
    }
}

impl std::fmt::Display for RowField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Numeric values of a complete row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowInput {
    /// Raw length in inches.
    pub length: f64,
    /// Raw width in inches.
    pub width: f64,
    /// Number of panes (fractions allowed).
    pub quantity: f64,
}

/// Where a row stands in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowState {
    /// Nothing typed yet.
    Empty,
    /// Some fields blank.
    Partial,
    /// All fields filled but at least one is not a number.
    Invalid(RowField),
    /// All fields filled and numeric.
    Complete(RowInput),
}

/// A pane line item. Holds the raw text of each field; derived figures are
/// always recomputed from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Length in inches, as typed.
    pub length: String,
    /// Width in inches, as typed.
    pub width: String,
    /// Quantity, as typed.
    pub quantity: String,
}

impl Row {
    /// Create a row from raw field text.
    pub fn new(
        length: impl Into<String>,
        width: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            length: length.into(),
            width: width.into(),
            quantity: quantity.into(),
        }
    }

    /// Get the raw text of a field.
    pub fn field(&self, field: RowField) -> &str {
        match field {
            RowField::Length => &self.length,
            RowField::Width => &self.width,
            RowField::Quantity => &self.quantity,
        }
    }

    /// Replace the raw text of a field.
    pub fn set_field(&mut self, field: RowField, text: impl Into<String>) {
        let text = text.into();
        match field {
            RowField::Length => self.length = text,
            RowField::Width => self.width = text,
            RowField::Quantity => self.quantity = text,
        }
    }

    /// Check if no field has been typed in.
    pub fn is_empty(&self) -> bool {
        RowField::ALL.iter().all(|&f| self.field(f).trim().is_empty())
    }

    /// Check if every field has something typed in, numeric or not.
    pub fn is_filled(&self) -> bool {
        RowField::ALL.iter().all(|&f| !self.field(f).trim().is_empty())
    }

    /// Classify the row.
    pub fn state(&self) -> RowState {
        if self.is_empty() {
            return RowState::Empty;
        }
        if !self.is_filled() {
            return RowState::Partial;
        }

        let mut values = [0.0; 3];
        for (slot, field) in values.iter_mut().zip(RowField::ALL) {
            match parse_number(self.field(field)) {
                Some(v) => *slot = v,
                None => return RowState::Invalid(field),
            }
        }

        RowState::Complete(RowInput {
            length: values[0],
            width: values[1],
            quantity: values[2],
        })
    }

    /// Numeric values, if the row is complete.
    pub fn input(&self) -> Option<RowInput> {
        match self.state() {
            RowState::Complete(input) => Some(input),
            _ => None,
        }
    }

    /// Check if all three fields are present and numeric.
    pub fn is_complete(&self) -> bool {
        self.input().is_some()
    }
}

/// Parse a typed number. Surrounding whitespace is ignored; NaN and
/// infinities are rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
