//! Native operator syntax over the builder functions.
//!
//! `a + b` is exactly [`add(a, b)`](crate::overlay::add), and likewise for
//! `-`, `*`, `/` and unary `-`. Comparisons have no operator form because
//! the standard comparison traits must return `bool`.

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::divide::div;
use crate::multiply::mul;
use crate::overlay::{add, neg, sub};
use crate::value::{FixedConst, FixedExpr, FixedSignal, Value};

macro_rules! fixed_ops {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<R: Into<Value>> Add<R> for $ty {
                type Output = FixedExpr;

                fn add(self, rhs: R) -> FixedExpr {
                    add(self, rhs)
                }
            }

            impl<R: Into<Value>> Sub<R> for $ty {
                type Output = FixedExpr;

                fn sub(self, rhs: R) -> FixedExpr {
                    sub(self, rhs)
                }
            }

            impl<R: Into<Value>> Mul<R> for $ty {
                type Output = FixedExpr;

                fn mul(self, rhs: R) -> FixedExpr {
                    mul(self, rhs)
                }
            }

            impl<R: Into<Value>> Div<R> for $ty {
                type Output = FixedExpr;

                fn div(self, rhs: R) -> FixedExpr {
                    div(self, rhs)
                }
            }

            impl Neg for $ty {
                type Output = FixedExpr;

                fn neg(self) -> FixedExpr {
                    neg(self)
                }
            }
        )*
    };
}

fixed_ops!(FixedSignal, &FixedSignal, FixedConst, FixedExpr, &FixedExpr, Value);
