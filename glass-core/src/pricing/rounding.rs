//! Rounding of raw measurements up to standard glass-cutting sizes.

use serde::Serialize;

/// One entry of the rounding table.
///
/// The upper edge is always inclusive. The lower edge is exclusive except for
/// the 12 and 15 inch rows, which overlap their neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Breakpoint {
    /// Lower edge of the input range.
    pub lower: f64,
    /// Whether `lower` itself belongs to the range.
    pub lower_inclusive: bool,
    /// Upper edge of the input range (inclusive).
    pub upper: f64,
    /// Billed size for inputs in the range.
    pub billed: f64,
}

impl Breakpoint {
    const fn open(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            lower_inclusive: false,
            upper,
            billed: upper,
        }
    }

    const fn closed(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            lower_inclusive: true,
            upper,
            billed: upper,
        }
    }

    /// Check whether `value` falls in this range.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        let above_lower = if self.lower_inclusive {
            value >= self.lower
        } else {
            value > self.lower
        };
        above_lower && value <= self.upper
    }
}

impl std::fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let open = if self.lower_inclusive { '[' } else { '(' };
        write!(
            f,
            "{}{}, {}] -> {}",
            open, self.lower, self.upper, self.billed
        )
    }
}

/// The measurement rule, evaluated in order; the first matching range wins.
pub const ROUNDING_TABLE: &[Breakpoint] = &[
    Breakpoint::open(1.0, 3.0),
    Breakpoint::open(3.0, 6.0),
    Breakpoint::open(6.0, 9.0),
    Breakpoint::open(9.0, 12.0),
    Breakpoint::closed(12.0, 15.0),
    Breakpoint::closed(15.0, 18.0),
    Breakpoint::open(18.0, 24.0),
    Breakpoint::open(24.0, 30.0),
    Breakpoint::open(30.0, 36.0),
    Breakpoint::open(36.0, 42.0),
    Breakpoint::open(42.0, 46.0),
    Breakpoint::open(46.0, 52.0),
    Breakpoint::open(52.0, 56.0),
    Breakpoint::open(56.0, 60.0),
    Breakpoint::open(60.0, 72.0),
    Breakpoint::open(72.0, 84.0),
    Breakpoint::open(84.0, 96.0),
    Breakpoint::open(96.0, 108.0),
    Breakpoint::open(108.0, 120.0),
];

/// Find the table entry that bills `value`, if any.
pub fn find_breakpoint(value: f64) -> Option<&'static Breakpoint> {
    ROUNDING_TABLE.iter().find(|bp| bp.contains(value))
}

/// Round a raw measurement (inches) up to its billed size.
///
/// Values not covered by the table (at most 1, above 120, or NaN) are
/// returned unchanged.
pub fn adjust_measurement(value: f64) -> f64 {
    find_breakpoint(value).map_or(value, |bp| bp.billed)
}

/// Check whether `value` is covered by the rounding table.
pub fn is_in_table(value: f64) -> bool {
    find_breakpoint(value).is_some()
}
