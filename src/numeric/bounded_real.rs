// ============================================================================
// Bounded Real
// Arbitrary-precision decimal interval with a guaranteed error bound
// ============================================================================

use super::context::RealContext;
use super::digits::DigitCount;
use super::errors::{NumericError, NumericResult};
use super::large_int::{LargeIntegerExt, Rounding};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;

/// Significand reported for NaN.
static NAN_SIGNIFICAND: BigInt = BigInt::ZERO;

/// A decimal number with a rigorously tracked uncertainty.
///
/// Represents `significand × 10^exponent ± error × 10^exponent`. The true
/// value is always contained in that interval: every operation rounds its
/// bounds outward and then rescales so that the error occupies at most
/// [`RealContext::max_error_digits`] decimal digits.
///
/// Values with `error == 0` are exact. Operations that have no bounded
/// result (reciprocal of an interval containing zero, square root of a
/// negative interval, exponent overflow) return [`BoundedReal::NAN`]; any
/// operation touching NaN yields NaN.
///
/// # Example
/// ```
/// use bounded_real::numeric::BoundedReal;
///
/// let a = BoundedReal::from_exact(123, -1);
/// assert_eq!(a.to_string(), "12.3");
///
/// let b = BoundedReal::from_bounds(1235, -2, 2).unwrap();
/// assert_eq!(b.to_string(), "(12.35 ± 0.02)");
///
/// let sum = a.plus(&b);
/// assert_eq!(sum.to_string(), "(24.65 ± 0.02)");
/// ```
#[derive(Clone)]
pub struct BoundedReal {
    pub(super) repr: Repr,
}

#[derive(Clone)]
pub(super) enum Repr {
    Number(Interval),
    NaN,
}

#[derive(Clone)]
pub(super) struct Interval {
    pub(super) significand: BigInt,
    pub(super) exponent: i32,
    pub(super) error: u64,
}

impl Interval {
    #[inline]
    fn lower(&self) -> BigInt {
        &self.significand - self.error
    }

    #[inline]
    fn upper(&self) -> BigInt {
        &self.significand + self.error
    }

    /// Significand and error rescaled to a smaller (or equal) exponent.
    fn scaled_to(&self, exponent: i32) -> (BigInt, BigInt) {
        let factor = (self.exponent as i64 - exponent as i64) as u32;
        (
            self.significand.times_pow10(factor),
            BigInt::from(self.error).times_pow10(factor),
        )
    }

    /// Bounds at an exponent no smaller than this one, rounded outward.
    fn bounds_at(&self, exponent: i32) -> (BigInt, BigInt) {
        let (lo, hi) = (self.lower(), self.upper());
        if exponent as i64 >= self.magnitude() {
            // Every point lies strictly within one unit of zero
            let min = if lo.is_negative() { -BigInt::one() } else { BigInt::zero() };
            let max = if hi.is_positive() { BigInt::one() } else { BigInt::zero() };
            return (min, max);
        }
        let shift = (exponent as i64 - self.exponent as i64) as u32;
        (
            lo.div_pow10(shift, Rounding::Floor),
            hi.div_pow10(shift, Rounding::Ceiling),
        )
    }

    /// Smallest `m` with every point of the interval strictly inside `±10^m`.
    fn magnitude(&self) -> i64 {
        (self.significand.abs() + self.error).digit_length() as i64 + self.exponent as i64
    }

    #[inline]
    fn is_exact_zero(&self) -> bool {
        self.error == 0 && self.significand.is_zero()
    }
}

/// Compare `a × 10^a_exp` with `b × 10^b_exp`.
///
/// Sign and decimal order of magnitude settle most comparisons; only values
/// of the same magnitude are aligned, so the scale factor stays within the
/// operands' own digit lengths.
fn cmp_scaled(a: &BigInt, a_exp: i32, b: &BigInt, b_exp: i32) -> Ordering {
    let by_sign = a.sign().cmp(&b.sign());
    if by_sign != Ordering::Equal || a.is_zero() {
        return by_sign;
    }
    let a_mag = a.digit_length() as i64 + a_exp as i64;
    let b_mag = b.digit_length() as i64 + b_exp as i64;
    if a_mag != b_mag {
        let by_mag = a_mag.cmp(&b_mag);
        return if a.is_negative() { by_mag.reverse() } else { by_mag };
    }
    let exponent = a_exp.min(b_exp);
    let a = a.times_pow10((a_exp as i64 - exponent as i64) as u32);
    let b = b.times_pow10((b_exp as i64 - exponent as i64) as u32);
    a.cmp(&b)
}

/// Lower and upper bounds of the product of two intervals.
///
/// Branches on which end of each operand dominates in magnitude (the sign of
/// its significand). Within a branch the dominant-end product is always one
/// extremum; the other depends on whether the operands straddle zero.
fn product_bounds(a: &Interval, b: &Interval) -> (BigInt, BigInt) {
    let (a_lo, a_hi) = (a.lower(), a.upper());
    let (b_lo, b_hi) = (b.lower(), b.upper());

    match (!a.significand.is_negative(), !b.significand.is_negative()) {
        (true, true) => {
            let min = if !a_lo.is_negative() && !b_lo.is_negative() {
                &a_lo * &b_lo
            } else {
                (&a_lo * &b_hi).min(&a_hi * &b_lo)
            };
            (min, a_hi * b_hi)
        },
        (false, false) => {
            let min = if !a_hi.is_positive() && !b_hi.is_positive() {
                &a_hi * &b_hi
            } else {
                (&a_hi * &b_lo).min(&a_lo * &b_hi)
            };
            (min, a_lo * b_lo)
        },
        (true, false) => {
            let max = if !a_lo.is_negative() && !b_hi.is_positive() {
                &a_lo * &b_hi
            } else {
                (&a_lo * &b_lo).max(&a_hi * &b_hi)
            };
            (a_hi * b_lo, max)
        },
        (false, true) => {
            let max = if !a_hi.is_positive() && !b_lo.is_negative() {
                &a_hi * &b_lo
            } else {
                (&a_lo * &b_lo).max(&a_hi * &b_hi)
            };
            (a_lo * b_hi, max)
        },
    }
}

impl BoundedReal {
    /// Not-a-number
    pub const NAN: Self = Self { repr: Repr::NaN };

    /// Exact zero
    pub const ZERO: Self = Self {
        repr: Repr::Number(Interval {
            significand: BigInt::ZERO,
            exponent: 0,
            error: 0,
        }),
    };

    // ========================================================================
    // Construction & Normalization
    // ========================================================================

    /// Exact one.
    pub fn one() -> Self {
        Self::from_exact(1, 0)
    }

    /// Create the exact value `significand × 10^exponent`.
    pub fn from_exact(significand: impl Into<BigInt>, exponent: i32) -> Self {
        Self {
            repr: Repr::Number(Interval {
                significand: significand.into(),
                exponent,
                error: 0,
            }),
        }
    }

    /// Create an exact integer.
    #[inline]
    pub fn from_i64(value: i64) -> Self {
        Self::from_exact(value, 0)
    }

    /// Create `(significand ± error) × 10^exponent` using the current context.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `error` is negative.
    pub fn from_bounds(
        significand: impl Into<BigInt>,
        exponent: i32,
        error: i64,
    ) -> NumericResult<Self> {
        Self::from_bounds_in(significand, exponent, error, &RealContext::current())
    }

    /// Create `(significand ± error) × 10^exponent`.
    ///
    /// An error wider than the context's budget is rescaled outward.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `error` is negative.
    pub fn from_bounds_in(
        significand: impl Into<BigInt>,
        exponent: i32,
        error: i64,
        ctx: &RealContext,
    ) -> NumericResult<Self> {
        if error < 0 {
            return Err(NumericError::InvalidArgument);
        }
        let significand = significand.into();
        let min = &significand - error;
        let max = significand + error;
        Ok(Self::normalize(min, max, exponent as i64, ctx))
    }

    /// Smallest bounded real containing `[min, max] × 10^exponent`, using the
    /// current context.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `min > max`.
    pub fn from_interval(
        min: impl Into<BigInt>,
        max: impl Into<BigInt>,
        exponent: i32,
    ) -> NumericResult<Self> {
        Self::from_interval_in(min, max, exponent, &RealContext::current())
    }

    /// Smallest bounded real containing `[min, max] × 10^exponent`.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `min > max`.
    pub fn from_interval_in(
        min: impl Into<BigInt>,
        max: impl Into<BigInt>,
        exponent: i32,
        ctx: &RealContext,
    ) -> NumericResult<Self> {
        let (min, max) = (min.into(), max.into());
        if min > max {
            return Err(NumericError::InvalidArgument);
        }
        Ok(Self::normalize(min, max, exponent as i64, ctx))
    }

    /// Build the interval hull of `[min, max] × 10^exponent`.
    ///
    /// Every arithmetic result passes through here. The significand is the
    /// floored midpoint, so `max - significand >= significand - min` and the
    /// error `max - significand` covers both ends. While the error is wider
    /// than the budget, both bounds are divided by a power of ten with the
    /// minimum rounded down and the maximum rounded up.
    pub(super) fn normalize(
        mut min: BigInt,
        mut max: BigInt,
        mut exponent: i64,
        ctx: &RealContext,
    ) -> Self {
        debug_assert!(min <= max);
        // A zero-digit budget could never be met by a nonzero error.
        let budget = ctx.max_error_digits().max(1);
        let two = BigInt::from(2u32);
        loop {
            let significand = (&min + &max).div_floor(&two);
            let error = &max - &significand;
            let digits = error.digit_length();
            if digits <= budget {
                return match error.to_u64() {
                    Some(error) => Self::finite(significand, exponent, error),
                    None => Self::saturated("error exceeds machine word"),
                };
            }
            let shift = digits - budget;
            min = min.div_pow10(shift, Rounding::Floor);
            max = max.div_pow10(shift, Rounding::Ceiling);
            exponent += shift as i64;
        }
    }

    fn finite(significand: BigInt, exponent: i64, error: u64) -> Self {
        match i32::try_from(exponent) {
            Ok(exponent) => Self {
                repr: Repr::Number(Interval {
                    significand,
                    exponent,
                    error,
                }),
            },
            Err(_) => Self::saturated("exponent overflow"),
        }
    }

    #[cold]
    fn saturated(reason: &'static str) -> Self {
        tracing::trace!(reason, "bounded real arithmetic saturated to NaN");
        Self::NAN
    }

    /// Treat an exact value as accurate to `exactness` significant digits.
    ///
    /// The significand is rescaled to `exactness` digits (rounding to nearest
    /// when digits must be dropped) and given an error of one unit in the last
    /// place. Inexact values and NaN are returned unchanged.
    pub fn to_inexact_in(&self, ctx: &RealContext) -> Self {
        let x = match &self.repr {
            Repr::Number(x) if x.error == 0 => x,
            _ => return self.clone(),
        };
        let shift = ctx.exactness().max(1) as i64 - x.significand.digit_length() as i64;
        let significand = if shift >= 0 {
            x.significand.times_pow10(shift as u32)
        } else {
            x.significand.div_pow10((-shift) as u32, Rounding::HalfUp)
        };
        Self::finite(significand, x.exponent as i64 - shift, 1)
    }

    /// [`to_inexact_in`](Self::to_inexact_in) with the current context.
    pub fn to_inexact(&self) -> Self {
        self.to_inexact_in(&RealContext::current())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn is_nan(&self) -> bool {
        matches!(self.repr, Repr::NaN)
    }

    /// Whether the error is zero. NaN is not exact.
    #[inline]
    pub fn is_exact(&self) -> bool {
        matches!(&self.repr, Repr::Number(x) if x.error == 0)
    }

    /// Whether this is exactly zero.
    pub fn is_zero(&self) -> bool {
        matches!(&self.repr, Repr::Number(x) if x.error == 0 && x.significand.is_zero())
    }

    /// Whether the whole interval lies above zero.
    pub fn is_positive(&self) -> bool {
        matches!(&self.repr, Repr::Number(x) if x.lower().is_positive())
    }

    /// Whether the whole interval lies below zero.
    pub fn is_negative(&self) -> bool {
        matches!(&self.repr, Repr::Number(x) if x.upper().is_negative())
    }

    /// The significand. NaN reports zero.
    pub fn significand(&self) -> &BigInt {
        match &self.repr {
            Repr::Number(x) => &x.significand,
            Repr::NaN => &NAN_SIGNIFICAND,
        }
    }

    /// The decimal exponent. NaN reports zero.
    pub fn exponent(&self) -> i32 {
        match &self.repr {
            Repr::Number(x) => x.exponent,
            Repr::NaN => 0,
        }
    }

    /// The error in units of `10^exponent`. NaN reports `u64::MAX`.
    pub fn error(&self) -> u64 {
        match &self.repr {
            Repr::Number(x) => x.error,
            Repr::NaN => u64::MAX,
        }
    }

    /// Total number of guaranteed significant digits.
    pub fn precision(&self) -> DigitCount {
        match &self.repr {
            Repr::NaN => DigitCount::NaN,
            Repr::Number(x) if x.error == 0 => DigitCount::Exact,
            Repr::Number(x) => {
                let digits = x.significand.digit_length() as i64
                    - BigInt::from(x.error).digit_length() as i64;
                DigitCount::Finite(saturate_i32(digits))
            },
        }
    }

    /// Number of guaranteed digits to the right of the decimal point.
    pub fn accuracy(&self) -> DigitCount {
        match &self.repr {
            Repr::NaN => DigitCount::NaN,
            Repr::Number(x) if x.error == 0 => DigitCount::Exact,
            Repr::Number(x) => {
                let digits =
                    -(x.exponent as i64) - BigInt::from(x.error).digit_length() as i64;
                DigitCount::Finite(saturate_i32(digits))
            },
        }
    }

    /// Exact lower end of the interval.
    pub fn minimum(&self) -> Self {
        match &self.repr {
            Repr::Number(x) => Self::from_exact(x.lower(), x.exponent),
            Repr::NaN => Self::NAN,
        }
    }

    /// Exact upper end of the interval.
    pub fn maximum(&self) -> Self {
        match &self.repr {
            Repr::Number(x) => Self::from_exact(x.upper(), x.exponent),
            Repr::NaN => Self::NAN,
        }
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Same interval mirrored around zero. Always exact-preserving.
    pub fn opposite(&self) -> Self {
        match &self.repr {
            Repr::Number(x) => Self {
                repr: Repr::Number(Interval {
                    significand: -&x.significand,
                    exponent: x.exponent,
                    error: x.error,
                }),
            },
            Repr::NaN => Self::NAN,
        }
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        match &self.repr {
            Repr::Number(x) if x.significand.is_negative() => self.opposite(),
            _ => self.clone(),
        }
    }

    /// Interval sum.
    pub fn plus_in(&self, other: &Self, ctx: &RealContext) -> Self {
        let (a, b) = match (&self.repr, &other.repr) {
            (Repr::Number(a), Repr::Number(b)) => (a, b),
            _ => return Self::NAN,
        };
        // `coarse` has the larger exponent
        let (coarse, fine) = if a.exponent >= b.exponent { (a, b) } else { (b, a) };
        if fine.is_exact_zero() {
            return Self::normalize(coarse.lower(), coarse.upper(), coarse.exponent as i64, ctx);
        }
        if coarse.is_exact_zero() {
            return Self::normalize(fine.lower(), fine.upper(), fine.exponent as i64, ctx);
        }
        // Digits far below an inexact operand's error cannot survive
        // normalization; round the finer operand outward to a working exponent.
        let floor = coarse.exponent as i64 - (ctx.exactness() + ctx.max_error_digits()) as i64;
        let exponent = if coarse.error > 0 && (fine.exponent as i64) < floor {
            floor as i32
        } else {
            fine.exponent
        };
        let (a_sig, a_err) = coarse.scaled_to(exponent);
        let (b_min, b_max) = fine.bounds_at(exponent);
        let min = (&a_sig - &a_err) + b_min;
        let max = a_sig + a_err + b_max;
        Self::normalize(min, max, exponent as i64, ctx)
    }

    pub fn plus(&self, other: &Self) -> Self {
        self.plus_in(other, &RealContext::current())
    }

    /// Interval difference.
    pub fn minus_in(&self, other: &Self, ctx: &RealContext) -> Self {
        self.plus_in(&other.opposite(), ctx)
    }

    pub fn minus(&self, other: &Self) -> Self {
        self.minus_in(other, &RealContext::current())
    }

    /// Interval product.
    pub fn times_in(&self, other: &Self, ctx: &RealContext) -> Self {
        let (a, b) = match (&self.repr, &other.repr) {
            (Repr::Number(a), Repr::Number(b)) => (a, b),
            _ => return Self::NAN,
        };
        let exponent = a.exponent as i64 + b.exponent as i64;
        let (min, max) = product_bounds(a, b);
        Self::normalize(min, max, exponent, ctx)
    }

    pub fn times(&self, other: &Self) -> Self {
        self.times_in(other, &RealContext::current())
    }

    /// Product with an exact integer.
    pub fn times_int_in(&self, n: i64, ctx: &RealContext) -> Self {
        self.times_in(&Self::from_i64(n), ctx)
    }

    pub fn times_int(&self, n: i64) -> Self {
        self.times_int_in(n, &RealContext::current())
    }

    /// Reciprocal.
    ///
    /// Exact values are first made inexact (see
    /// [`to_inexact_in`](Self::to_inexact_in)). An interval containing zero
    /// has no bounded reciprocal and yields NaN.
    pub fn inverse_in(&self, ctx: &RealContext) -> Self {
        let x = match &self.repr {
            Repr::Number(x) if x.error == 0 => {
                return self.to_inexact_in(ctx).inverse_in(ctx);
            },
            Repr::Number(x) => x,
            Repr::NaN => return Self::NAN,
        };
        let (lo, hi) = (x.lower(), x.upper());
        if !lo.is_positive() && !hi.is_negative() {
            return Self::saturated("reciprocal of an interval containing zero");
        }

        // Reciprocal is decreasing on either side of zero: work on magnitudes
        let negative = hi.is_negative();
        let (small, large) = if negative { (-hi, -lo) } else { (lo, hi) };
        let k = 2 * large.digit_length() + 1;
        let low = large.scaled_reciprocal(k, Rounding::Floor);
        let high = small.scaled_reciprocal(k, Rounding::Ceiling);
        let (min, max) = if negative { (-high, -low) } else { (low, high) };

        Self::normalize(min, max, -(x.exponent as i64) - k as i64, ctx)
    }

    pub fn inverse(&self) -> Self {
        self.inverse_in(&RealContext::current())
    }

    /// Quotient, computed as `self × other⁻¹`.
    pub fn divide_in(&self, other: &Self, ctx: &RealContext) -> Self {
        self.times_in(&other.inverse_in(ctx), ctx)
    }

    pub fn divide(&self, other: &Self) -> Self {
        self.divide_in(other, &RealContext::current())
    }

    /// Quotient by an exact integer.
    ///
    /// An exact dividend evenly divisible by `n` stays exact; otherwise the
    /// reciprocal of `n` is taken like any other exact value.
    pub fn divide_int_in(&self, n: i64, ctx: &RealContext) -> Self {
        if let Repr::Number(x) = &self.repr {
            if x.error == 0 && n != 0 {
                let (quotient, remainder) = x.significand.div_rem(&BigInt::from(n));
                if remainder.is_zero() {
                    return Self::from_exact(quotient, x.exponent);
                }
            }
        }
        self.times_in(&Self::from_i64(n).inverse_in(ctx), ctx)
    }

    pub fn divide_int(&self, n: i64) -> Self {
        self.divide_int_in(n, &RealContext::current())
    }

    /// Square root.
    ///
    /// Exact zero and one are returned as is; other exact values are first
    /// made inexact. NaN if the interval reaches below zero.
    pub fn sqrt_in(&self, ctx: &RealContext) -> Self {
        let x = match &self.repr {
            Repr::NaN => return Self::NAN,
            Repr::Number(x) if x.error == 0 => {
                if x.significand.is_negative() {
                    return Self::saturated("square root of a negative value");
                }
                if x.significand.is_zero() || self.is_exact_one() {
                    return self.clone();
                }
                return self.to_inexact_in(ctx).sqrt_in(ctx);
            },
            Repr::Number(x) => x,
        };
        let (lo, hi) = (x.lower(), x.upper());
        if lo.is_negative() {
            return Self::saturated("square root of an interval reaching below zero");
        }

        // Keep one digit beyond the operand and make the exponent even
        let mut shift = hi.digit_length() as i64 + 2;
        if (x.exponent as i64 - shift) % 2 != 0 {
            shift += 1;
        }
        let min = lo.times_pow10(shift as u32).floor_sqrt();
        let max = hi.times_pow10(shift as u32).ceil_sqrt();

        Self::normalize(min, max, (x.exponent as i64 - shift) / 2, ctx)
    }

    pub fn sqrt(&self) -> Self {
        self.sqrt_in(&RealContext::current())
    }

    fn is_exact_one(&self) -> bool {
        match &self.repr {
            Repr::Number(x) if x.error == 0 && x.exponent <= 0 => {
                let zeros = x.exponent.unsigned_abs();
                x.significand.digit_length() == zeros + 1
                    && x.significand == BigInt::one().times_pow10(zeros)
            },
            _ => false,
        }
    }

    /// Integer power by repeated squaring. Negative powers invert the result.
    pub fn pow_in(&self, exp: i32, ctx: &RealContext) -> Self {
        if self.is_nan() {
            return Self::NAN;
        }
        let power = self.pow_unsigned(exp.unsigned_abs(), ctx);
        if exp < 0 {
            power.inverse_in(ctx)
        } else {
            power
        }
    }

    fn pow_unsigned(&self, exp: u32, ctx: &RealContext) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut remaining = exp;
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.times_in(&base, ctx);
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.times_in(&base, ctx);
            }
        }
        result
    }

    pub fn pow(&self, exp: i32) -> Self {
        self.pow_in(exp, &RealContext::current())
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Whether the difference of the two intervals contains zero.
    pub fn approximates_in(&self, other: &Self, ctx: &RealContext) -> bool {
        match &self.minus_in(other, ctx).repr {
            Repr::Number(d) => d.significand.abs() <= BigInt::from(d.error),
            Repr::NaN => false,
        }
    }

    pub fn approximates(&self, other: &Self) -> bool {
        self.approximates_in(other, &RealContext::current())
    }

    /// Whether `|self|` orders after `|other|`.
    pub fn is_larger_than(&self, other: &Self) -> bool {
        self.abs() > other.abs()
    }

    // ========================================================================
    // Conversion
    // ========================================================================

    /// Round to the nearest integer, ties away from zero.
    ///
    /// # Errors
    /// Returns `DomainError` for NaN.
    pub fn round(&self) -> NumericResult<BigInt> {
        match &self.repr {
            Repr::NaN => Err(NumericError::DomainError),
            Repr::Number(x) if x.exponent >= 0 => {
                Ok(x.significand.times_pow10(x.exponent.unsigned_abs()))
            },
            Repr::Number(x) => Ok(x
                .significand
                .div_pow10(x.exponent.unsigned_abs(), Rounding::HalfUp)),
        }
    }

    /// Round to the nearest `i64`.
    ///
    /// # Errors
    /// - `DomainError` for NaN
    /// - `Overflow` if the rounded value does not fit
    pub fn to_i64(&self) -> NumericResult<i64> {
        self.round()?.to_i64().ok_or(NumericError::Overflow)
    }

    /// Best-effort conversion of the central value. NaN maps to `f64::NAN`.
    pub fn to_f64(&self) -> f64 {
        match &self.repr {
            Repr::Number(x) => format!("{}e{}", x.significand, x.exponent)
                .parse()
                .unwrap_or(f64::NAN),
            Repr::NaN => f64::NAN,
        }
    }

    /// Exact value of the shortest decimal that round-trips to `value`.
    ///
    /// Infinities and NaN map to NaN.
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Self::NAN;
        }
        match super::format::parse_decimal(&format!("{:e}", value)) {
            Ok((significand, exponent)) => Self::from_exact(significand, exponent),
            Err(_) => Self::NAN,
        }
    }

    /// Exact conversion from `rust_decimal::Decimal`.
    pub fn from_decimal(d: rust_decimal::Decimal) -> Self {
        Self::from_exact(d.mantissa(), -(d.scale() as i32))
    }

    /// Convert an exact value to `rust_decimal::Decimal`.
    ///
    /// # Errors
    /// - `DomainError` for NaN
    /// - `PrecisionLoss` if the value is inexact or needs more than 28 decimals
    /// - `Overflow` if the value exceeds the 96-bit decimal range
    pub fn to_decimal(&self) -> NumericResult<rust_decimal::Decimal> {
        let x = match &self.repr {
            Repr::NaN => return Err(NumericError::DomainError),
            Repr::Number(x) if x.error != 0 => return Err(NumericError::PrecisionLoss),
            Repr::Number(x) => x,
        };

        let (mut significand, mut exponent) = (x.significand.clone(), x.exponent as i64);
        if exponent > 0 {
            significand = significand.times_pow10(exponent as u32);
            exponent = 0;
        }
        let ten = BigInt::from(10u32);
        while exponent < -28 && !significand.is_zero() && significand.is_multiple_of(&ten) {
            significand /= 10u32;
            exponent += 1;
        }
        if exponent < -28 {
            if !significand.is_zero() {
                return Err(NumericError::PrecisionLoss);
            }
            exponent = 0;
        }

        let mantissa = significand.to_i128().ok_or(NumericError::Overflow)?;
        rust_decimal::Decimal::try_from_i128_with_scale(mantissa, (-exponent) as u32)
            .map_err(|_| NumericError::Overflow)
    }
}

fn saturate_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for BoundedReal {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

/// NaN orders after every number. Numbers order by value, then by error
/// (narrower intervals first).
impl Ord for BoundedReal {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.repr, &other.repr) {
            (Repr::NaN, Repr::NaN) => Ordering::Equal,
            (Repr::NaN, Repr::Number(_)) => Ordering::Greater,
            (Repr::Number(_), Repr::NaN) => Ordering::Less,
            (Repr::Number(a), Repr::Number(b)) => {
                let (a_err, b_err) = (BigInt::from(a.error), BigInt::from(b.error));
                cmp_scaled(&a.significand, a.exponent, &b.significand, b.exponent)
                    .then_with(|| cmp_scaled(&a_err, a.exponent, &b_err, b.exponent))
            },
        }
    }
}

impl PartialOrd for BoundedReal {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for BoundedReal {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BoundedReal {}

impl From<i64> for BoundedReal {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<BigInt> for BoundedReal {
    fn from(value: BigInt) -> Self {
        Self::from_exact(value, 0)
    }
}

impl From<rust_decimal::Decimal> for BoundedReal {
    fn from(value: rust_decimal::Decimal) -> Self {
        Self::from_decimal(value)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ctx() -> RealContext {
        RealContext::default()
    }

    fn bounds(significand: i64, exponent: i32, error: i64) -> BoundedReal {
        BoundedReal::from_bounds_in(significand, exponent, error, &ctx()).unwrap()
    }

    fn contains(interval: &BoundedReal, point: &BoundedReal) -> bool {
        interval.minimum() <= *point && *point <= interval.maximum()
    }

    #[test]
    fn test_from_exact() {
        let x = BoundedReal::from_exact(123, -1);
        assert!(x.is_exact());
        assert_eq!(x.significand(), &BigInt::from(123));
        assert_eq!(x.exponent(), -1);
        assert_eq!(x.error(), 0);
    }

    #[test]
    fn test_from_bounds_rejects_negative_error() {
        assert_eq!(
            BoundedReal::from_bounds(10, 0, -1).err(),
            Some(NumericError::InvalidArgument)
        );
    }

    #[test]
    fn test_from_interval_rejects_reversed_bounds() {
        assert_eq!(
            BoundedReal::from_interval(5, 4, 0).err(),
            Some(NumericError::InvalidArgument)
        );
    }

    #[test]
    fn test_normalize_midpoint() {
        // [10, 13] -> 11 ± 2 covers both ends
        let x = BoundedReal::from_interval_in(10, 13, 0, &ctx()).unwrap();
        assert_eq!(x.significand(), &BigInt::from(11));
        assert_eq!(x.error(), 2);

        // Negative odd sum floors toward -inf
        let y = BoundedReal::from_interval_in(-13, -10, 0, &ctx()).unwrap();
        assert_eq!(y.significand(), &BigInt::from(-12));
        assert_eq!(y.error(), 2);
    }

    #[test]
    fn test_normalize_rescales_error() {
        // Error 1234 needs 4 digits; budget 2 shifts by two decades
        let x = BoundedReal::from_interval_in(10_000, 12_468, 0, &ctx()).unwrap();
        assert_eq!(x.exponent(), 2);
        assert!(x.error() <= 99);
        assert!(contains(&x, &BoundedReal::from_i64(10_000)));
        assert!(contains(&x, &BoundedReal::from_i64(12_468)));
    }

    #[test]
    fn test_normalize_exponent_overflow_is_nan() {
        let x = BoundedReal::from_interval_in(0, 1_000_000, i32::MAX, &ctx()).unwrap();
        assert!(x.is_nan());
    }

    #[test]
    fn test_normalize_single_digit_budget() {
        let ctx = RealContext::default().with_max_error_digits(1).unwrap();

        let unit = BoundedReal::from_interval_in(0, 1, 0, &ctx).unwrap();
        assert_eq!(unit.error(), 1);

        let wide = BoundedReal::from_interval_in(0, 10i128.pow(30), 0, &ctx).unwrap();
        assert!(wide.error() <= 9);
        assert!(contains(&wide, &BoundedReal::ZERO));
        assert!(contains(&wide, &BoundedReal::from_exact(1, 30)));
    }

    #[test]
    fn test_exact_addition() {
        let a = BoundedReal::from_exact(123, -1);
        let b = BoundedReal::from_exact(7, 0);
        let c = a.plus_in(&b, &ctx());
        assert!(c.is_exact());
        assert_eq!(c, BoundedReal::from_exact(193, -1));
        assert_eq!(c.exponent(), -1);
    }

    #[test]
    fn test_inexact_addition_aligns_exponents() {
        let a = bounds(1235, -2, 2); // 12.35 ± 0.02
        let b = BoundedReal::from_i64(10);
        let c = a.plus_in(&b, &ctx());
        assert_eq!(c.exponent(), -2);
        assert_eq!(c.significand(), &BigInt::from(2235));
        assert_eq!(c.error(), 2);

        // 12.35 ± 0.02 + 10 ± 1 = [21.33, 23.37], too wide for two error digits
        let d = a.plus_in(&bounds(10, 0, 1), &ctx());
        assert_eq!(d.exponent(), -1);
        assert_eq!(d.significand(), &BigInt::from(223));
        assert_eq!(d.error(), 11);
        assert!(contains(&d, &BoundedReal::from_exact(2133, -2)));
        assert!(contains(&d, &BoundedReal::from_exact(2337, -2)));
    }

    #[test]
    fn test_addition_across_distant_exponents() {
        let ctx = ctx();
        let coarse = bounds(5, i32::MAX - 1, 1);
        let tiny = BoundedReal::from_exact(7, i32::MIN);

        let sum = coarse.plus_in(&tiny, &ctx);
        assert!(contains(&sum, &coarse.minimum()));
        assert!(contains(&sum, &coarse.maximum()));
        assert!(sum.exponent() >= i32::MAX - 30);
        assert!(BigInt::from(sum.error()).digit_length() <= ctx.max_error_digits());

        let negated = coarse.minus_in(&tiny, &ctx);
        assert!(contains(&negated, &coarse.minimum()));

        // Exact zero adds nothing regardless of exponent
        let zero_far = BoundedReal::from_exact(0, i32::MIN);
        assert_eq!(coarse.plus_in(&zero_far, &ctx), coarse);
        assert_eq!(zero_far.plus_in(&tiny, &ctx), tiny);
    }

    #[test]
    fn test_addition_keeps_digits_near_error() {
        // (5 ± 1) + 0.3 stays centered on 5.3
        let sum = bounds(5, 0, 1).plus_in(&BoundedReal::from_exact(3, -1), &ctx());
        assert_eq!(sum.significand(), &BigInt::from(53));
        assert_eq!(sum.exponent(), -1);
        assert_eq!(sum.error(), 10);
    }

    #[test]
    fn test_additive_inverse_of_exact_is_zero() {
        let a = BoundedReal::from_exact(-98765, -3);
        let z = a.plus_in(&a.opposite(), &ctx());
        assert!(z.is_zero());
    }

    #[test]
    fn test_exact_multiplication() {
        let a = BoundedReal::from_exact(12, -1);
        let b = BoundedReal::from_exact(-3, 2);
        let c = a.times_in(&b, &ctx());
        assert!(c.is_exact());
        assert_eq!(c.significand(), &BigInt::from(-36));
        assert_eq!(c.exponent(), 1);
    }

    #[test]
    fn test_multiplication_exponent_overflow_is_nan() {
        let a = BoundedReal::from_exact(1, i32::MAX);
        let b = BoundedReal::from_exact(1, 1);
        assert!(a.times_in(&b, &ctx()).is_nan());
    }

    #[test]
    fn test_multiplication_sign_quadrants() {
        // Each case: (a, b, expected lower, expected upper) in units
        let cases = [
            (bounds(5, 0, 1), bounds(3, 0, 1), 8, 24),
            (bounds(-5, 0, 1), bounds(-3, 0, 1), 8, 24),
            (bounds(5, 0, 1), bounds(-3, 0, 1), -24, -8),
            (bounds(-5, 0, 1), bounds(3, 0, 1), -24, -8),
            (bounds(1, 0, 2), bounds(1, 0, 2), -3, 9),
            (bounds(-1, 0, 2), bounds(-1, 0, 2), -3, 9),
            (bounds(1, 0, 2), bounds(-1, 0, 2), -9, 3),
            (bounds(2, 0, 1), bounds(0, 0, 3), -9, 9),
        ];
        for (a, b, lo, hi) in cases {
            let c = a.times_in(&b, &ctx());
            assert!(
                contains(&c, &BoundedReal::from_i64(lo)) && contains(&c, &BoundedReal::from_i64(hi)),
                "{} × {} = {} should contain [{}, {}]",
                a,
                b,
                c,
                lo,
                hi
            );
        }
    }

    #[test]
    fn test_inverse_of_zero_interval_is_nan() {
        assert!(bounds(0, 0, 5).inverse_in(&ctx()).is_nan());
        assert!(bounds(3, 0, 5).inverse_in(&ctx()).is_nan());
        assert!(bounds(5, 0, 5).inverse_in(&ctx()).is_nan());
        assert!(BoundedReal::ZERO.inverse_in(&ctx()).is_nan());
    }

    #[test]
    fn test_inverse_contains_true_value() {
        let ctx = ctx();
        let three = BoundedReal::from_i64(3);
        let third = three.inverse_in(&ctx);
        assert!(!third.is_exact());
        // 3 × (1/3) must contain one
        assert!(third.times_in(&three, &ctx).approximates_in(&BoundedReal::one(), &ctx));

        let negative = bounds(-400, -2, 1).inverse_in(&ctx);
        assert!(negative.is_negative());
        assert!(contains(&negative, &BoundedReal::from_exact(-25, -2)));
    }

    #[test]
    fn test_divide_int_exactness() {
        let ctx = ctx();
        let a = BoundedReal::from_i64(9000);
        assert!(!a.divide_int_in(7, &ctx).times_int_in(7, &ctx).is_exact());

        let b = a.divide_int_in(3, &ctx).times_int_in(3, &ctx);
        assert!(b.is_exact());
        assert_eq!(b, a);

        assert!(a.divide_int_in(0, &ctx).is_nan());
    }

    #[test]
    fn test_divide_contains_quotient() {
        let ctx = ctx();
        let q = BoundedReal::from_i64(1).divide_in(&BoundedReal::from_i64(8), &ctx);
        assert!(contains(&q, &BoundedReal::from_exact(125, -3)));
    }

    #[test]
    fn test_sqrt_special_cases() {
        let ctx = ctx();
        assert!(BoundedReal::NAN.sqrt_in(&ctx).is_nan());
        assert!(BoundedReal::from_i64(-4).sqrt_in(&ctx).is_nan());
        assert!(bounds(1, 0, 2).sqrt_in(&ctx).is_nan());
        assert_eq!(BoundedReal::ZERO.sqrt_in(&ctx), BoundedReal::ZERO);
        assert!(BoundedReal::one().sqrt_in(&ctx).is_exact());
        assert!(BoundedReal::from_exact(100, -2).sqrt_in(&ctx).is_exact());
    }

    #[test]
    fn test_sqrt_two() {
        let ctx = RealContext::default().with_exactness(30).unwrap();
        let root = BoundedReal::from_i64(2).sqrt_in(&ctx);
        assert!(!root.is_exact());
        assert!(root.precision() >= DigitCount::Finite(30));
        assert!(root.to_string().starts_with("(1.41421356237309504880168872"));

        let square = root.times_in(&root, &ctx);
        assert!(square.approximates_in(&BoundedReal::from_i64(2), &ctx));
    }

    #[test]
    fn test_sqrt_odd_exponent() {
        let ctx = ctx();
        let root = bounds(4000, -1, 1).sqrt_in(&ctx); // sqrt(400.0 ± 0.1)
        assert!(contains(&root, &BoundedReal::from_i64(20)));
    }

    #[test]
    fn test_round() {
        assert_eq!(BoundedReal::from_exact(125, -1).round(), Ok(BigInt::from(13)));
        assert_eq!(BoundedReal::from_exact(-125, -1).round(), Ok(BigInt::from(-13)));
        assert_eq!(BoundedReal::from_exact(124, -1).round(), Ok(BigInt::from(12)));
        assert_eq!(BoundedReal::from_exact(3, 2).round(), Ok(BigInt::from(300)));
        assert_eq!(BoundedReal::NAN.round(), Err(NumericError::DomainError));
        assert_eq!(BoundedReal::NAN.to_i64(), Err(NumericError::DomainError));
        assert_eq!(
            BoundedReal::from_exact(1, 30).to_i64(),
            Err(NumericError::Overflow)
        );
    }

    #[test]
    fn test_comparison() {
        let narrow = bounds(100, 0, 1);
        let wide = bounds(100, 0, 2);
        assert!(narrow < wide);

        assert!(BoundedReal::from_i64(1) < BoundedReal::from_i64(2));
        assert_eq!(BoundedReal::from_exact(10, 0), BoundedReal::from_exact(100, -1));
        assert!(BoundedReal::from_i64(i64::MAX) < BoundedReal::NAN);
        assert_eq!(BoundedReal::NAN, BoundedReal::NAN);
        assert_ne!(BoundedReal::NAN, BoundedReal::ZERO);
    }

    #[test]
    fn test_comparison_across_distant_exponents() {
        let huge = BoundedReal::from_exact(1, i32::MAX);
        let tiny = BoundedReal::from_exact(5, i32::MIN);
        assert_ne!(huge, BoundedReal::ZERO);
        assert!(huge > tiny);
        assert!(tiny > BoundedReal::ZERO);
        assert!(-&huge < -&tiny);
        assert!(BoundedReal::from_exact(-1, i32::MAX) < BoundedReal::from_i64(-5));

        // Same value, errors at distant exponents
        let narrow = BoundedReal::from_bounds_in(0, i32::MIN, 1, &ctx()).unwrap();
        let wide = BoundedReal::from_bounds_in(0, i32::MAX, 1, &ctx()).unwrap();
        assert!(narrow < wide);

        // Same magnitude still compares digit by digit
        assert!(BoundedReal::from_exact(123, 0) < BoundedReal::from_exact(1231, -1));
        assert!(BoundedReal::from_exact(-123, 0) > BoundedReal::from_exact(-1231, -1));
    }

    #[test]
    fn test_approximates() {
        let ctx = ctx();
        let a = bounds(1000, -2, 5);
        assert!(a.approximates_in(&BoundedReal::from_exact(1004, -2), &ctx));
        assert!(!a.approximates_in(&BoundedReal::from_exact(1006, -2), &ctx));
        assert!(!a.approximates_in(&BoundedReal::NAN, &ctx));
    }

    #[test]
    fn test_nan_propagation() {
        let ctx = ctx();
        let one = BoundedReal::one();
        let nan = BoundedReal::NAN;
        assert!(nan.plus_in(&one, &ctx).is_nan());
        assert!(one.times_in(&nan, &ctx).is_nan());
        assert!(nan.inverse_in(&ctx).is_nan());
        assert!(nan.opposite().is_nan());
        assert!(nan.pow_in(2, &ctx).is_nan());
        assert!(nan.minimum().is_nan());
        assert!(!nan.is_exact());
    }

    #[test]
    fn test_precision_and_accuracy() {
        let x = bounds(1235, -2, 2);
        assert_eq!(x.precision(), DigitCount::Finite(3));
        assert_eq!(x.accuracy(), DigitCount::Finite(1));
        assert_eq!(BoundedReal::one().precision(), DigitCount::Exact);
        assert_eq!(BoundedReal::NAN.accuracy(), DigitCount::NaN);
    }

    #[test]
    fn test_to_inexact() {
        let ctx = RealContext::default().with_exactness(5).unwrap();
        let x = BoundedReal::from_i64(2).to_inexact_in(&ctx);
        assert_eq!(x.significand(), &BigInt::from(20_000));
        assert_eq!(x.exponent(), -4);
        assert_eq!(x.error(), 1);

        let y = BoundedReal::from_i64(1_234_567).to_inexact_in(&ctx);
        assert_eq!(y.significand(), &BigInt::from(12_346));
        assert_eq!(y.exponent(), 2);
        assert!(contains(&y, &BoundedReal::from_i64(1_234_567)));
    }

    #[test]
    fn test_pow() {
        let ctx = ctx();
        let two = BoundedReal::from_i64(2);
        assert_eq!(two.pow_in(10, &ctx), BoundedReal::from_i64(1024));
        assert_eq!(two.pow_in(0, &ctx), BoundedReal::one());
        let quarter = two.pow_in(-2, &ctx);
        assert!(contains(&quarter, &BoundedReal::from_exact(25, -2)));
    }

    #[test]
    fn test_pow_most_negative_exponent() {
        // (-1)^(-2^31) is +1; an odd exponent would give -1
        let ctx = ctx();
        let power = BoundedReal::from_i64(-1).pow_in(i32::MIN, &ctx);
        assert!(contains(&power, &BoundedReal::one()));
        assert!(!contains(&power, &BoundedReal::from_i64(-1)));
    }

    #[test]
    fn test_abs_and_magnitude() {
        let a = BoundedReal::from_i64(-7);
        assert_eq!(a.abs(), BoundedReal::from_i64(7));
        assert!(a.is_larger_than(&BoundedReal::from_i64(5)));
        assert!(a.is_negative());
        assert!(!bounds(1, 0, 2).is_positive());
    }

    #[test]
    fn test_f64_conversions() {
        assert_eq!(BoundedReal::from_exact(-123, -1).to_f64(), -12.3);
        assert!(BoundedReal::NAN.to_f64().is_nan());
        assert_eq!(BoundedReal::from_f64(0.1), BoundedReal::from_exact(1, -1));
        assert_eq!(BoundedReal::from_f64(-2.5e-7), BoundedReal::from_exact(-25, -8));
        assert!(BoundedReal::from_f64(f64::INFINITY).is_nan());
    }

    #[test]
    fn test_decimal_conversions() {
        use rust_decimal::Decimal;

        let d = Decimal::new(12345, 2); // 123.45
        let x = BoundedReal::from_decimal(d);
        assert_eq!(x, BoundedReal::from_exact(12345, -2));
        assert_eq!(x.to_decimal(), Ok(d));

        assert_eq!(
            BoundedReal::from_exact(5, 3).to_decimal(),
            Ok(Decimal::from(5000))
        );
        assert_eq!(bounds(1, 0, 1).to_decimal(), Err(NumericError::PrecisionLoss));
        assert_eq!(BoundedReal::NAN.to_decimal(), Err(NumericError::DomainError));
        assert_eq!(
            BoundedReal::from_exact(1, 40).to_decimal(),
            Err(NumericError::Overflow)
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Property-based tests
    // ─────────────────────────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn prop_interval_contains_endpoints(
            min in -1_000_000_000i64..1_000_000_000,
            width in 0i64..1_000_000_000,
            exponent in -20i32..20,
            budget in 1u32..=10,
        ) {
            let ctx = RealContext::default().with_max_error_digits(budget).unwrap();
            let max = min + width;
            let x = BoundedReal::from_interval_in(min, max, exponent, &ctx).unwrap();
            prop_assert!(contains(&x, &BoundedReal::from_exact(min, exponent)));
            prop_assert!(contains(&x, &BoundedReal::from_exact(max, exponent)));
            prop_assert!(BigInt::from(x.error()).digit_length() <= budget);
        }

        #[test]
        fn prop_multiply_contains_point_products(
            a_sig in -100_000i64..100_000,
            a_err in 0i64..5_000,
            a_exp in -4i32..4,
            b_sig in -100_000i64..100_000,
            b_err in 0i64..5_000,
            b_exp in -4i32..4,
        ) {
            let ctx = RealContext::default();
            let a = BoundedReal::from_bounds_in(a_sig, a_exp, a_err, &ctx).unwrap();
            let b = BoundedReal::from_bounds_in(b_sig, b_exp, b_err, &ctx).unwrap();
            let product = a.times_in(&b, &ctx);
            prop_assert!(BigInt::from(product.error()).digit_length() <= ctx.max_error_digits());

            let center = |x: &BoundedReal| BoundedReal::from_exact(x.significand().clone(), x.exponent());
            let a_points = [a.minimum(), center(&a), a.maximum(), BoundedReal::ZERO];
            let b_points = [b.minimum(), center(&b), b.maximum(), BoundedReal::ZERO];
            for pa in a_points.iter().filter(|p| contains(&a, p)) {
                for pb in b_points.iter().filter(|p| contains(&b, p)) {
                    let point = pa.times_in(pb, &ctx);
                    prop_assert!(
                        contains(&product, &point),
                        "{} × {} = {} misses {}", a, b, product, point
                    );
                }
            }
        }

        #[test]
        fn prop_sum_contains_endpoint_sums(
            a_sig in -1_000_000i64..1_000_000,
            a_err in 0i64..100,
            b_sig in -1_000_000i64..1_000_000,
            b_err in 0i64..100,
            b_exp in -6i32..6,
        ) {
            let ctx = RealContext::default();
            let a = BoundedReal::from_bounds_in(a_sig, 0, a_err, &ctx).unwrap();
            let b = BoundedReal::from_bounds_in(b_sig, b_exp, b_err, &ctx).unwrap();
            let sum = a.plus_in(&b, &ctx);
            prop_assert!(contains(&sum, &a.minimum().plus_in(&b.minimum(), &ctx)));
            prop_assert!(contains(&sum, &a.maximum().plus_in(&b.maximum(), &ctx)));
        }

        #[test]
        fn prop_inverse_contains_reciprocal(sig in 1i64..1_000_000, err in 0i64..10) {
            let ctx = RealContext::default();
            let x = BoundedReal::from_bounds_in(sig, 0, err, &ctx).unwrap();
            let inv = x.inverse_in(&ctx);
            if err >= sig {
                prop_assert!(inv.is_nan());
            } else {
                // x × x⁻¹ must still contain one
                prop_assert!(x.times_in(&inv, &ctx).approximates_in(&BoundedReal::one(), &ctx));
            }
        }

        #[test]
        fn prop_inverse_brackets_inexact_reciprocal(
            sig in 1i64..1_000_000_000,
            err in 1i64..100_000,
            exp in -12i32..12,
            negative in any::<bool>(),
            budget in 1u32..=10,
        ) {
            let ctx = RealContext::default().with_max_error_digits(budget).unwrap();
            let sig = if negative { -sig } else { sig };
            let x = BoundedReal::from_bounds_in(sig, exp, err, &ctx).unwrap();
            let inv = x.inverse_in(&ctx);
            let (lo, hi) = (x.minimum(), x.maximum());
            let one = BoundedReal::one();

            if lo <= BoundedReal::ZERO && hi >= BoundedReal::ZERO {
                prop_assert!(inv.is_nan());
            } else {
                prop_assert!(!inv.is_nan());
                prop_assert!(BigInt::from(inv.error()).digit_length() <= budget);
                // [1/hi, 1/lo] must lie inside the result; multiplying by a
                // negative bound flips the comparison
                let low_product = inv.minimum().times_in(&hi, &ctx);
                let high_product = inv.maximum().times_in(&lo, &ctx);
                if negative {
                    prop_assert!(low_product >= one, "{} vs 1/{}", inv, x);
                    prop_assert!(high_product <= one, "{} vs 1/{}", inv, x);
                } else {
                    prop_assert!(low_product <= one, "{} vs 1/{}", inv, x);
                    prop_assert!(high_product >= one, "{} vs 1/{}", inv, x);
                }
            }
        }

        #[test]
        fn prop_sqrt_brackets_inexact_root(
            sig in -1_000i64..1_000_000_000,
            err in 1i64..100_000,
            exp in -12i32..12,
            budget in 1u32..=10,
        ) {
            let ctx = RealContext::default().with_max_error_digits(budget).unwrap();
            let x = BoundedReal::from_bounds_in(sig, exp, err, &ctx).unwrap();
            let root = x.sqrt_in(&ctx);

            if x.minimum() < BoundedReal::ZERO {
                prop_assert!(root.is_nan());
            } else {
                prop_assert!(!root.is_nan());
                prop_assert!(BigInt::from(root.error()).digit_length() <= budget);
                let low = root.minimum();
                let high = root.maximum();
                prop_assert!(
                    low <= BoundedReal::ZERO || low.times_in(&low, &ctx) <= x.minimum(),
                    "{} vs sqrt {}", root, x
                );
                prop_assert!(high.times_in(&high, &ctx) >= x.maximum(), "{} vs sqrt {}", root, x);
            }
        }

        #[test]
        fn prop_sqrt_squares_back(sig in 1i64..1_000_000_000, exp in -10i32..10) {
            let ctx = RealContext::default();
            let x = BoundedReal::from_exact(sig, exp);
            let root = x.sqrt_in(&ctx);
            prop_assert!(!root.is_nan());
            prop_assert!(root.times_in(&root, &ctx).approximates_in(&x, &ctx));
        }
    }
}
