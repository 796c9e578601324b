// ============================================================================
// Large Integer Primitives
// Decimal scaling, digit length, roots and reciprocals over BigInt
// ============================================================================

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use parking_lot::{const_rwlock, RwLock};

/// Number of powers of ten kept in the shared table.
const CACHED_POWERS: usize = 256;

/// log10(2), used to estimate decimal length from bit length
const LOG10_2: f64 = std::f64::consts::LOG10_2;

static POW10_TABLE: RwLock<Vec<BigInt>> = const_rwlock(Vec::new());

/// Returns 10^n.
///
/// Small powers are served from a table shared by all threads; the table
/// grows on demand and is never shrunk.
pub fn pow10(n: u32) -> BigInt {
    let index = n as usize;
    if index >= CACHED_POWERS {
        return BigInt::from(10u32).pow(n);
    }

    if let Some(power) = POW10_TABLE.read().get(index) {
        return power.clone();
    }

    let mut table = POW10_TABLE.write();
    // Another thread may have filled the slot while we waited for the lock
    while table.len() <= index {
        let next = table.last().map_or_else(BigInt::one, |last| last * 10u32);
        table.push(next);
    }
    table[index].clone()
}

/// Direction used when an integer division cannot be exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Toward negative infinity
    Floor,
    /// Toward positive infinity
    Ceiling,
    /// Toward zero
    Truncate,
    /// To nearest, ties away from zero
    HalfUp,
}

/// Divides `numerator` by a strictly positive `denominator` with the given rounding.
pub fn div_rounded(numerator: &BigInt, denominator: &BigInt, rounding: Rounding) -> BigInt {
    debug_assert!(denominator.is_positive());
    match rounding {
        Rounding::Floor => numerator.div_floor(denominator),
        Rounding::Ceiling => -((-numerator).div_floor(denominator)),
        Rounding::Truncate => numerator / denominator,
        Rounding::HalfUp => {
            let half: BigInt = denominator >> 1;
            let magnitude = (numerator.abs() + half) / denominator;
            if numerator.is_negative() {
                -magnitude
            } else {
                magnitude
            }
        },
    }
}

/// Operations the interval layer needs from an arbitrary-precision integer.
///
/// Implemented for [`BigInt`]; all results are exact except where a
/// [`Rounding`] is requested explicitly.
pub trait LargeIntegerExt {
    /// Number of decimal digits in the magnitude. Zero has length 0.
    fn digit_length(&self) -> u32;

    /// Returns `self × 10^n`.
    fn times_pow10(&self, n: u32) -> BigInt;

    /// Returns `self / 10^n` rounded as requested.
    fn div_pow10(&self, n: u32, rounding: Rounding) -> BigInt;

    /// Returns `self × 10^n`, truncating toward zero when `n` is negative.
    fn scale10(&self, n: i32) -> BigInt;

    /// Floor of the square root. `self` must not be negative.
    fn floor_sqrt(&self) -> BigInt;

    /// Ceiling of the square root. `self` must not be negative.
    fn ceil_sqrt(&self) -> BigInt;

    /// Approximates `10^k / self` for a strictly positive `self`.
    ///
    /// The quotient is rounded in the requested direction, so a floor and a
    /// ceiling call bracket the true reciprocal.
    fn scaled_reciprocal(&self, k: u32, rounding: Rounding) -> BigInt;
}

impl LargeIntegerExt for BigInt {
    fn digit_length(&self) -> u32 {
        if self.is_zero() {
            return 0;
        }
        let magnitude = self.abs();
        let bits = magnitude.bits();
        // Lower bound from 2^(bits-1) <= |self|, corrected by at most one step
        let mut digits = ((bits - 1) as f64 * LOG10_2) as u32 + 1;
        while magnitude >= pow10(digits) {
            digits += 1;
        }
        while digits > 1 && magnitude < pow10(digits - 1) {
            digits -= 1;
        }
        digits
    }

    #[inline]
    fn times_pow10(&self, n: u32) -> BigInt {
        if n == 0 {
            self.clone()
        } else {
            self * pow10(n)
        }
    }

    #[inline]
    fn div_pow10(&self, n: u32, rounding: Rounding) -> BigInt {
        if n == 0 {
            self.clone()
        } else {
            div_rounded(self, &pow10(n), rounding)
        }
    }

    fn scale10(&self, n: i32) -> BigInt {
        if n >= 0 {
            self.times_pow10(n.unsigned_abs())
        } else {
            self.div_pow10(n.unsigned_abs(), Rounding::Truncate)
        }
    }

    fn floor_sqrt(&self) -> BigInt {
        debug_assert!(!self.is_negative());
        self.sqrt()
    }

    fn ceil_sqrt(&self) -> BigInt {
        let root = self.floor_sqrt();
        if &root * &root == *self {
            root
        } else {
            root + 1u32
        }
    }

    fn scaled_reciprocal(&self, k: u32, rounding: Rounding) -> BigInt {
        debug_assert!(self.is_positive());
        div_rounded(&pow10(k), self, rounding)
    }
}
