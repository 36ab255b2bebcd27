//! Bill validation module.

mod validate;

pub use validate::{validate_bill, validate_row, ValidationResult};
