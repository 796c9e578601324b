// ============================================================================
// Digit Counts
// Precision and accuracy results with explicit exact/NaN cases
// ============================================================================

use std::fmt;

/// A count of guaranteed decimal digits.
///
/// Ordering is `NaN < Finite(_) < Exact`, so sorting values by precision puts
/// undefined values first and exact ones last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DigitCount {
    /// The value is NaN; no digit is guaranteed
    NaN,
    /// A finite number of guaranteed digits (may be zero or negative)
    Finite(i32),
    /// The value is exact; every digit is guaranteed
    Exact,
}

impl DigitCount {
    /// The finite count, if any.
    #[inline]
    pub const fn finite(self) -> Option<i32> {
        match self {
            DigitCount::Finite(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_exact(self) -> bool {
        matches!(self, DigitCount::Exact)
    }
}

impl fmt::Display for DigitCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigitCount::NaN => write!(f, "NaN"),
            DigitCount::Finite(n) => write!(f, "{}", n),
            DigitCount::Exact => write!(f, "exact"),
        }
    }
}
