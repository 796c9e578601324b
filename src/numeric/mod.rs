// ============================================================================
// Numeric Module
// Arbitrary-precision decimal intervals with guaranteed error bounds
// ============================================================================
//
// This module provides:
// - BoundedReal: significand × 10^exponent ± error, rounded outward
// - RealContext: error-digit budget and exactness, scoped per thread
// - DigitCount: precision/accuracy with explicit exact and NaN cases
// - NumericError: Error types for construction, parsing and conversion
// - LargeIntegerExt: decimal primitives over num_bigint::BigInt
//
// Design principles:
// - Values are immutable; every operation returns a new value
// - Arithmetic is total: undefined results are NaN, never errors
// - Only precondition violations (bad arguments, bad text) return Err
// - Bounds are always rounded away from the true value

mod bounded_real;
mod context;
mod digits;
mod errors;
mod format;
mod ops;

pub mod large_int;

pub use bounded_real::BoundedReal;
pub use context::{ContextGuard, RealContext};
pub use digits::DigitCount;
pub use errors::{NumericError, NumericResult};
pub use large_int::{LargeIntegerExt, Rounding};
