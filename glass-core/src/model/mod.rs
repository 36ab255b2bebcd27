//! Data model for bills and their rows.

mod bill;
mod row;

pub use bill::{Bill, BillLine, BillSummary, PRICE_FIELD};
pub use row::{parse_number, Row, RowField, RowInput, RowState};
