// ============================================================================
// Arithmetic Context
// Error-digit budget and exactness settings, scoped per thread
// ============================================================================

use super::errors::{NumericError, NumericResult};
use std::cell::Cell;
use std::marker::PhantomData;

/// Settings consulted by every bounded real operation.
///
/// A context is a plain value: pass it explicitly to the `*_in` methods of
/// [`BoundedReal`](super::BoundedReal), or install it for the current thread
/// with [`RealContext::enter`] / [`RealContext::scope`] so the plain methods
/// and operators pick it up.
///
/// # Example
/// ```
/// use bounded_real::numeric::{BoundedReal, RealContext};
///
/// let ctx = RealContext::default().with_exactness(30)?;
/// let root = RealContext::scope(ctx, || BoundedReal::from_i64(2).sqrt())?;
/// assert!(root.to_string().starts_with("(1.41421356237309504880"));
/// # Ok::<(), bounded_real::numeric::NumericError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RealContext {
    max_error_digits: u32,
    exactness: u32,
}

impl RealContext {
    /// Default width of the error field, in decimal digits
    pub const DEFAULT_MAX_ERROR_DIGITS: u32 = 2;

    /// Largest width the error field may be configured to
    pub const MAX_ERROR_DIGITS_LIMIT: u32 = 10;

    /// Default number of significant digits assumed exact
    pub const DEFAULT_EXACTNESS: u32 = 19;

    /// Create a validated context.
    ///
    /// # Errors
    /// Returns `InvalidArgument` unless `max_error_digits` is in `1..=10`
    /// and `exactness` is at least 1.
    pub fn new(max_error_digits: u32, exactness: u32) -> NumericResult<Self> {
        let ctx = Self {
            max_error_digits,
            exactness,
        };
        ctx.validate()?;
        Ok(ctx)
    }

    /// Builder method: set the error-digit budget
    ///
    /// # Errors
    /// Returns `InvalidArgument` unless `digits` is in `1..=10`.
    pub fn with_max_error_digits(mut self, digits: u32) -> NumericResult<Self> {
        self.max_error_digits = digits;
        self.validate()?;
        Ok(self)
    }

    /// Builder method: set the exactness
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `digits` is zero.
    pub fn with_exactness(mut self, digits: u32) -> NumericResult<Self> {
        self.exactness = digits;
        self.validate()?;
        Ok(self)
    }

    /// Maximum number of decimal digits the error field may occupy.
    #[inline]
    pub const fn max_error_digits(&self) -> u32 {
        self.max_error_digits
    }

    /// Significant digits assumed exact when an exact value must become inexact.
    #[inline]
    pub const fn exactness(&self) -> u32 {
        self.exactness
    }

    /// Validate the settings
    pub fn validate(&self) -> NumericResult<()> {
        if self.max_error_digits == 0 || self.max_error_digits > Self::MAX_ERROR_DIGITS_LIMIT {
            return Err(NumericError::InvalidArgument);
        }
        if self.exactness == 0 {
            return Err(NumericError::InvalidArgument);
        }
        Ok(())
    }

    // ========================================================================
    // Thread Scoping
    // ========================================================================

    /// The context installed for the current thread, or the default one.
    pub fn current() -> Self {
        CURRENT.with(Cell::get)
    }

    /// Install this context for the current thread until the guard drops.
    ///
    /// Guards nest: dropping one restores whatever was active when it was
    /// created, including on early return and unwinding.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the settings do not validate.
    pub fn enter(self) -> NumericResult<ContextGuard> {
        self.validate()?;
        let previous = CURRENT.with(|current| current.replace(self));
        tracing::debug!(
            max_error_digits = self.max_error_digits,
            exactness = self.exactness,
            "entered real context"
        );
        Ok(ContextGuard {
            previous,
            _not_send: PhantomData,
        })
    }

    /// Run `f` with this context installed for the current thread.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the settings do not validate; `f` is not run.
    pub fn scope<R>(self, f: impl FnOnce() -> R) -> NumericResult<R> {
        let _guard = self.enter()?;
        Ok(f())
    }
}

impl Default for RealContext {
    fn default() -> Self {
        Self {
            max_error_digits: Self::DEFAULT_MAX_ERROR_DIGITS,
            exactness: Self::DEFAULT_EXACTNESS,
        }
    }
}

thread_local! {
    static CURRENT: Cell<RealContext> = Cell::new(RealContext::default());
}

/// Restores the previously active [`RealContext`] when dropped.
///
/// Bound to the thread that created it.
#[must_use = "the context is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ContextGuard {
    previous: RealContext,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let previous = self.previous;
        CURRENT.with(|current| current.set(previous));
        tracing::debug!(
            max_error_digits = previous.max_error_digits,
            exactness = previous.exactness,
            "restored real context"
        );
    }
}
