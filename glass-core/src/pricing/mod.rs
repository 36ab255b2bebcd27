//! Measurement rounding and per-row pricing.

mod rounding;
mod row;

pub use rounding::{adjust_measurement, find_breakpoint, is_in_table, Breakpoint, ROUNDING_TABLE};
pub use row::{price_row, RowPricing};
