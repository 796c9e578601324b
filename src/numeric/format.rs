// ============================================================================
// Text Format
// Display, parsing and serde support for bounded reals
// ============================================================================
//
// Forms:
// - exact:   "-12.3"             (significand -123, exponent -1)
// - inexact: "(12.35 ± 0.02)"    (value and error share one exponent)
// - NaN:     "NaN"
//
// Positive exponents are written as an `E` suffix ("12E3") so that parsing
// the output restores the same exponent.

use super::bounded_real::{BoundedReal, Repr};
use super::context::RealContext;
use super::errors::{NumericError, NumericResult};
use super::large_int::LargeIntegerExt;
use num_bigint::BigInt;
use num_traits::Signed;
use std::fmt;
use std::str::FromStr;

const NAN_TEXT: &str = "NaN";
const PLUS_MINUS: char = '±';

/// Writes `significand × 10^exponent` in plain decimal notation.
fn write_decimal(f: &mut fmt::Formatter<'_>, significand: &BigInt, exponent: i32) -> fmt::Result {
    if exponent > 0 {
        return write!(f, "{}E{}", significand, exponent);
    }
    if exponent == 0 {
        return write!(f, "{}", significand);
    }

    let scale = exponent.unsigned_abs() as usize;
    let digits = significand.magnitude().to_string();
    let sign = if significand.is_negative() { "-" } else { "" };
    if digits.len() > scale {
        let (int_part, frac_part) = digits.split_at(digits.len() - scale);
        write!(f, "{}{}.{}", sign, int_part, frac_part)
    } else {
        write!(f, "{}0.{:0>width$}", sign, digits, width = scale)
    }
}

impl fmt::Display for BoundedReal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::NaN => f.write_str(NAN_TEXT),
            Repr::Number(x) if x.error == 0 => write_decimal(f, &x.significand, x.exponent),
            Repr::Number(x) => {
                f.write_str("(")?;
                write_decimal(f, &x.significand, x.exponent)?;
                write!(f, " {} ", PLUS_MINUS)?;
                write_decimal(f, &BigInt::from(x.error), x.exponent)?;
                f.write_str(")")
            },
        }
    }
}

impl fmt::Debug for BoundedReal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::NaN => write!(f, "BoundedReal(NaN)"),
            Repr::Number(x) => write!(
                f,
                "BoundedReal({}, significand={}, exponent={}, error={})",
                self, x.significand, x.exponent, x.error
            ),
        }
    }
}

// ============================================================================
// String Parsing
// ============================================================================

/// Parse a plain decimal with optional sign, fraction and `E` exponent.
///
/// Returns the significand and exponent exactly as written: "1.50" keeps
/// both fraction digits.
pub(super) fn parse_decimal(s: &str) -> NumericResult<(BigInt, i32)> {
    let (mantissa, exp_str) = match s.find(['e', 'E']) {
        Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
        None => (s, None),
    };

    let exponent: i32 = match exp_str {
        Some(e) => e.parse().map_err(|_| NumericError::InvalidArgument)?,
        None => 0,
    };

    let (is_negative, unsigned) = if let Some(rest) = mantissa.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = mantissa.strip_prefix('+') {
        (false, rest)
    } else {
        (false, mantissa)
    };

    let (int_str, frac_str) = match unsigned.find('.') {
        Some(pos) => (&unsigned[..pos], &unsigned[pos + 1..]),
        None => (unsigned, ""),
    };

    if int_str.is_empty() && frac_str.is_empty() {
        return Err(NumericError::InvalidArgument);
    }
    if !int_str
        .bytes()
        .chain(frac_str.bytes())
        .all(|b| b.is_ascii_digit())
    {
        return Err(NumericError::InvalidArgument);
    }

    let digits = format!("{}{}", int_str, frac_str);
    let magnitude: BigInt = digits.parse().map_err(|_| NumericError::InvalidArgument)?;
    let frac_len = i32::try_from(frac_str.len()).map_err(|_| NumericError::InvalidArgument)?;
    let exponent = exponent
        .checked_sub(frac_len)
        .ok_or(NumericError::InvalidArgument)?;

    let significand = if is_negative { -magnitude } else { magnitude };
    Ok((significand, exponent))
}

impl BoundedReal {
    /// Parse the text form, normalizing inexact values with `ctx`.
    ///
    /// The value and error of the `(v ± e)` form are brought to the smaller
    /// of their two exponents before the interval is built, so nothing is
    /// rounded unless the error exceeds the context's digit budget.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for malformed text or a negative error.
    pub fn parse_in(s: &str, ctx: &RealContext) -> NumericResult<Self> {
        let s = s.trim();
        if s == NAN_TEXT {
            return Ok(Self::NAN);
        }

        let inner = match s.strip_prefix('(') {
            Some(rest) => rest.strip_suffix(')').ok_or(NumericError::InvalidArgument)?,
            None => {
                let (significand, exponent) = parse_decimal(s)?;
                return Ok(Self::from_exact(significand, exponent));
            },
        };

        let (value_str, error_str) = inner
            .split_once(PLUS_MINUS)
            .ok_or(NumericError::InvalidArgument)?;
        let (significand, value_exp) = parse_decimal(value_str.trim())?;
        let (error, error_exp) = parse_decimal(error_str.trim())?;
        if error.is_negative() {
            return Err(NumericError::InvalidArgument);
        }

        let exponent = value_exp.min(error_exp);
        let significand = significand.times_pow10((value_exp as i64 - exponent as i64) as u32);
        let error = error.times_pow10((error_exp as i64 - exponent as i64) as u32);
        let min = &significand - &error;
        let max = significand + error;
        Ok(Self::normalize(min, max, exponent as i64, ctx))
    }
}

impl FromStr for BoundedReal {
    type Err = NumericError;

    /// Parse with the current context.
    ///
    /// # Examples
    /// - "12.3" -> exact, significand 123, exponent -1
    /// - "(0.00 ± 0.01)" -> significand 0, exponent -2, error 1
    /// - "NaN"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_in(s, &RealContext::current())
    }
}

// ============================================================================
// Serde (text form)
// ============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for BoundedReal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BoundedReal {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
