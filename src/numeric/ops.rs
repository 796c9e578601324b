// ============================================================================
// Operator Traits
// std::ops over bounded reals, evaluated in the current thread's context
// ============================================================================
//
// Operators never fail: undefined results are NaN, as with the named methods.
// Use the `*_in` methods to pass a context explicitly.

use super::bounded_real::BoundedReal;
use super::context::RealContext;
use std::iter::{Product, Sum};
use std::ops::{Add, Div, Mul, Neg, Sub};

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $op:ident) => {
        impl $trait<&BoundedReal> for &BoundedReal {
            type Output = BoundedReal;

            #[inline]
            fn $method(self, rhs: &BoundedReal) -> BoundedReal {
                self.$op(rhs, &RealContext::current())
            }
        }

        impl $trait<BoundedReal> for BoundedReal {
            type Output = BoundedReal;

            #[inline]
            fn $method(self, rhs: BoundedReal) -> BoundedReal {
                (&self).$method(&rhs)
            }
        }

        impl $trait<&BoundedReal> for BoundedReal {
            type Output = BoundedReal;

            #[inline]
            fn $method(self, rhs: &BoundedReal) -> BoundedReal {
                (&self).$method(rhs)
            }
        }

        impl $trait<BoundedReal> for &BoundedReal {
            type Output = BoundedReal;

            #[inline]
            fn $method(self, rhs: BoundedReal) -> BoundedReal {
                self.$method(&rhs)
            }
        }
    };
}

forward_binop!(Add, add, plus_in);
forward_binop!(Sub, sub, minus_in);
forward_binop!(Mul, mul, times_in);
forward_binop!(Div, div, divide_in);

impl Neg for BoundedReal {
    type Output = BoundedReal;

    #[inline]
    fn neg(self) -> Self::Output {
        self.opposite()
    }
}

impl Neg for &BoundedReal {
    type Output = BoundedReal;

    #[inline]
    fn neg(self) -> Self::Output {
        self.opposite()
    }
}

impl Sum for BoundedReal {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        let ctx = RealContext::current();
        iter.fold(BoundedReal::ZERO, |acc, x| acc.plus_in(&x, &ctx))
    }
}

impl<'a> Sum<&'a BoundedReal> for BoundedReal {
    fn sum<I: Iterator<Item = &'a BoundedReal>>(iter: I) -> Self {
        let ctx = RealContext::current();
        iter.fold(BoundedReal::ZERO, |acc, x| acc.plus_in(x, &ctx))
    }
}

impl Product for BoundedReal {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        let ctx = RealContext::current();
        iter.fold(BoundedReal::one(), |acc, x| acc.times_in(&x, &ctx))
    }
}

impl<'a> Product<&'a BoundedReal> for BoundedReal {
    fn product<I: Iterator<Item = &'a BoundedReal>>(iter: I) -> Self {
        let ctx = RealContext::current();
        iter.fold(BoundedReal::one(), |acc, x| acc.times_in(x, &ctx))
    }
}
