// ============================================================================
// Bounded Real Library
// Arbitrary-precision decimal interval arithmetic with guaranteed error bounds
// ============================================================================

//! # Bounded Real
//!
//! Decimal numbers that carry a rigorous uncertainty, for physical
//! measurements and any computation whose result must provably contain the
//! true value.
//!
//! ## Features
//!
//! - **Arbitrary precision** significands backed by `num-bigint`
//! - **Outward rounding**: every result interval contains the true result
//! - **Bounded error width**: errors are rescaled to a configurable number of digits
//! - **Total arithmetic**: undefined results propagate as NaN instead of failing
//! - **Scoped configuration** per thread, or passed explicitly per call
//!
//! ## Example
//!
//! ```rust
//! use bounded_real::prelude::*;
//!
//! // 12.35 ± 0.02 times exactly 2
//! let length: BoundedReal = "(12.35 ± 0.02)".parse().unwrap();
//! let doubled = length.times_int(2);
//! assert_eq!(doubled.to_string(), "(24.70 ± 0.04)");
//!
//! // Division that does not terminate loses exactness
//! let a = BoundedReal::from_i64(9000);
//! assert!(!a.divide_int(7).times_int(7).is_exact());
//! assert!(a.divide_int(3).times_int(3).is_exact());
//!
//! // Precision settings for a scope
//! let ctx = RealContext::default().with_exactness(30).unwrap();
//! let root = RealContext::scope(ctx, || BoundedReal::from_i64(2).sqrt()).unwrap();
//! assert!(root.precision() >= DigitCount::Finite(30));
//! ```

pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::numeric::{
        BoundedReal, ContextGuard, DigitCount, NumericError, NumericResult, RealContext,
    };
}
