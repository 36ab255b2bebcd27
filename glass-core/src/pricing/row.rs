//! Pricing of a single pane line item.

use serde::{Deserialize, Serialize};

use super::rounding::adjust_measurement;
use crate::config::SQ_INCHES_PER_SQ_FT;

/// Computed figures for one complete row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowPricing {
    /// Length rounded up to the billed size (inches).
    pub adj_length: f64,
    /// Width rounded up to the billed size (inches).
    pub adj_width: f64,
    /// Area from the raw dimensions, for reference.
    pub original_area_sqft: f64,
    /// Area from the rounded dimensions, used for pricing.
    pub billed_area_sqft: f64,
    /// Billed area times quantity times price per square foot.
    pub line_price: f64,
}

/// Price one pane line item.
pub fn price_row(length: f64, width: f64, quantity: f64, price_per_sqft: f64) -> RowPricing {
    let adj_length = adjust_measurement(length);
    let adj_width = adjust_measurement(width);

    let original_area_sqft = (length * width) / SQ_INCHES_PER_SQ_FT;
    let billed_area_sqft = (adj_length * adj_width) / SQ_INCHES_PER_SQ_FT;

    RowPricing {
        adj_length,
        adj_width,
        original_area_sqft,
        billed_area_sqft,
        line_price: billed_area_sqft * quantity * price_per_sqft,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::float_cmp::approx_eq;

    #[test]
    fn test_ten_by_ten_pair() {
        let p = price_row(10.0, 10.0, 2.0, 50.0);
        assert_eq!(p.adj_length, 12.0);
        assert_eq!(p.adj_width, 12.0);
        assert!(approx_eq(p.billed_area_sqft, 1.0));
        assert!(approx_eq(p.line_price, 100.0));
        assert!((p.original_area_sqft - 0.694).abs() < 0.001);
    }

    #[test]
    fn test_fractional_quantity() {
        let p = price_row(24.0, 36.0, 0.5, 80.0);
        assert!(approx_eq(p.billed_area_sqft, 6.0));
        assert!(approx_eq(p.line_price, 240.0));
    }

    #[test]
    fn test_oversize_pane_is_billed_unrounded() {
        let p = price_row(130.0, 20.0, 1.0, 10.0);
        assert_eq!(p.adj_length, 130.0);
        assert_eq!(p.adj_width, 24.0);
        assert!(approx_eq(p.billed_area_sqft, 130.0 * 24.0 / 144.0));
    }

    #[test]
    fn test_zero_price_gives_zero_line() {
        let p = price_row(10.0, 10.0, 3.0, 0.0);
        assert_eq!(p.line_price, 0.0);
        assert!(approx_eq(p.billed_area_sqft, 1.0));
    }
}
