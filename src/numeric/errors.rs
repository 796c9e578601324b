// ============================================================================
// Numeric Errors
// Error types for bounded real construction, parsing and conversion
// ============================================================================

use std::fmt;

/// Errors raised by precondition violations and lossy conversions.
///
/// Mathematical undefinedness during arithmetic (exponent overflow, reciprocal
/// of an interval containing zero, square root of a negative interval) is not
/// an error: it yields [`BoundedReal::NAN`](super::BoundedReal::NAN).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Negative error bound, malformed text or out-of-range context setting
    InvalidArgument,
    /// No finite value exists (e.g. rounding NaN)
    DomainError,
    /// Result does not fit the requested fixed-width target
    Overflow,
    /// Conversion requires an exact value
    PrecisionLoss,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::InvalidArgument => write!(f, "invalid argument"),
            NumericError::DomainError => {
                write!(f, "domain error: value is not a number")
            },
            NumericError::Overflow => {
                write!(f, "overflow: value exceeds the target range")
            },
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: conversion requires an exact value"
            ),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
