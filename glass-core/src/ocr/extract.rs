//! Turning recognized text into measurement rows.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::{parse_number, Row, RowField};

/// What a parser made of one line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line does not describe a pane.
    Skipped,
    /// The line holds a length, width and quantity.
    Parsed {
        length: String,
        width: String,
        quantity: String,
    },
    /// The line looks like a pane but could not be read.
    Rejected(String),
}

/// Reads measurement triples out of single lines of text.
pub trait MeasurementParser {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Parse one line.
    fn parse_line(&self, line: &str) -> LineOutcome;
}

/// Keyword-anchored parser for lines like `Length 24 Width 36 Quantity 2`.
///
/// A line qualifies when it mentions `length`, `width` and `quantity`
/// (any case). It is split on whitespace and the tokens at positions 1, 3
/// and 5 are taken as the values.
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionalParser;

impl PositionalParser {
    const KEYWORDS: [&'static str; 3] = ["length", "width", "quantity"];
    const OFFSETS: [usize; 3] = [1, 3, 5];
}

impl MeasurementParser for PositionalParser {
    fn name(&self) -> &'static str {
        "positional"
    }

    fn parse_line(&self, line: &str) -> LineOutcome {
        let lower = line.to_lowercase();
        if !Self::KEYWORDS.iter().all(|k| lower.contains(k)) {
            return LineOutcome::Skipped;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let needed = Self::OFFSETS[2] + 1;
        if tokens.len() < needed {
            return LineOutcome::Rejected(format!(
                "expected at least {} tokens, found {}",
                needed,
                tokens.len()
            ));
        }

        let values = Self::OFFSETS.map(|i| tokens[i]);
        for (field, value) in RowField::ALL.iter().zip(values) {
            if parse_number(value).is_none() {
                return LineOutcome::Rejected(format!("{} '{}' is not a number", field, value));
            }
        }

        LineOutcome::Parsed {
            length: values[0].to_string(),
            width: values[1].to_string(),
            quantity: values[2].to_string(),
        }
    }
}

/// A measurement triple read from recognized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRow {
    /// Line number in the recognized text (1-based).
    pub line: usize,
    pub length: String,
    pub width: String,
    pub quantity: String,
}

impl From<ExtractedRow> for Row {
    fn from(extracted: ExtractedRow) -> Self {
        Row::new(extracted.length, extracted.width, extracted.quantity)
    }
}

/// A line that mentioned a pane but could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedLine {
    /// Line number in the recognized text (1-based).
    pub line: usize,
    pub text: String,
    pub reason: String,
}

/// Result of running a parser over a block of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub rows: Vec<ExtractedRow>,
    pub rejected: Vec<RejectedLine>,
}

impl Extraction {
    /// True when no usable row was found ("no data found").
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Convert the extracted triples into bill rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows.into_iter().map(Row::from).collect()
    }
}

/// Run `parser` over every line of `text`.
pub fn extract_measurements(text: &str, parser: &dyn MeasurementParser) -> Extraction {
    let mut extraction = Extraction::default();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        match parser.parse_line(line) {
            LineOutcome::Skipped => {}
            LineOutcome::Parsed {
                length,
                width,
                quantity,
            } => extraction.rows.push(ExtractedRow {
                line: line_no,
                length,
                width,
                quantity,
            }),
            LineOutcome::Rejected(reason) => {
                warn!("Line {}: {} ({})", line_no, reason, line.trim());
                extraction.rejected.push(RejectedLine {
                    line: line_no,
                    text: line.trim().to_string(),
                    reason,
                });
            }
        }
    }

    debug!(
        parser = parser.name(),
        rows = extraction.rows.len(),
        rejected = extraction.rejected.len(),
        "Extracted measurements"
    );

    extraction
}
