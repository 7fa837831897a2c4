/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! Element-wise operations that can be mapped over a matrix.
//!
//! Each operation is a unit struct implementing [`ElementOp`] for the
//! element types it makes sense for, plus [`YieldsStructure`] declaring
//! which structures it keeps. An operation that implements
//! `YieldsStructure` without overriding anything keeps nothing.

use crate::structure::YieldsStructure;
use crate::traits::Numberish;

/// An operation applied independently to every element of a matrix.
pub trait ElementOp<T>: YieldsStructure + Copy + Default + 'static {
    /// A name for diagnostics.
    const NAME: &'static str;

    /// Applies the operation to a single value.
    fn apply(&self, v: T) -> T;
}

/// Rounding of an element to an integral value. Integers are already
/// integral, so they are returned unchanged.
pub trait Rounding: Copy {
    /// Round half away from zero
    fn round(self) -> Self;
    /// Largest integral value not greater than `self`
    fn floor(self) -> Self;
    /// Smallest integral value not lower than `self`
    fn ceil(self) -> Self;
    /// Integral part of `self`
    fn trunc(self) -> Self;
}

macro_rules! impl_rounding_int {
    ($($t:ty),*) => {
        $(impl Rounding for $t {
            fn round(self) -> Self { self }
            fn floor(self) -> Self { self }
            fn ceil(self) -> Self { self }
            fn trunc(self) -> Self { self }
        })*
    };
}

macro_rules! impl_rounding_float {
    ($($t:ty),*) => {
        $(impl Rounding for $t {
            fn round(self) -> Self { <$t>::round(self) }
            fn floor(self) -> Self { <$t>::floor(self) }
            fn ceil(self) -> Self { <$t>::ceil(self) }
            fn trunc(self) -> Self { <$t>::trunc(self) }
        })*
    };
}

impl_rounding_int!(i8, i16, i32, i64, isize);
impl_rounding_float!(f32, f64);

/// Declares an element-wise operation: its marker struct, which structures
/// it keeps, and how it acts on each element.
macro_rules! element_op {
    (
        $(#[$doc:meta])*
        $name:ident, $label:literal,
        keeps [$($flag:ident),*],
        <$t:ident : $($bound:path),+> |$v:ident| $body:expr
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl YieldsStructure for $name {
            $(const $flag: bool = true;)*
        }

        impl<$t: Numberish $(+ $bound)+> ElementOp<$t> for $name {
            const NAME: &'static str = $label;

            #[inline]
            fn apply(&self, $v: $t) -> $t {
                $body
            }
        }
    };
}

element_op!(
    /// `round(x)`. Since `round(0) = 0` and it commutes with (conjugate)
    /// transposition, it keeps every structure.
    Round, "round",
    keeps [PRESERVES_SYMMETRIC, PRESERVES_HERMITIAN, PRESERVES_LOWER, PRESERVES_UPPER],
    <T: Rounding> |v| Rounding::round(v)
);

element_op!(
    /// `floor(x)`
    Floor, "floor",
    keeps [PRESERVES_SYMMETRIC, PRESERVES_HERMITIAN, PRESERVES_LOWER, PRESERVES_UPPER],
    <T: Rounding> |v| Rounding::floor(v)
);

element_op!(
    /// `ceil(x)`
    Ceil, "ceil",
    keeps [PRESERVES_SYMMETRIC, PRESERVES_HERMITIAN, PRESERVES_LOWER, PRESERVES_UPPER],
    <T: Rounding> |v| Rounding::ceil(v)
);

element_op!(
    /// `trunc(x)`
    Trunc, "trunc",
    keeps [PRESERVES_SYMMETRIC, PRESERVES_HERMITIAN, PRESERVES_LOWER, PRESERVES_UPPER],
    <T: Rounding> |v| Rounding::trunc(v)
);

element_op!(
    /// `|x|`
    Abs, "abs",
    keeps [PRESERVES_SYMMETRIC, PRESERVES_HERMITIAN, PRESERVES_LOWER, PRESERVES_UPPER],
    <T: num_traits::Signed> |v| num_traits::Signed::abs(&v)
);

element_op!(
    /// `-x`
    Neg, "neg",
    keeps [PRESERVES_SYMMETRIC, PRESERVES_HERMITIAN, PRESERVES_LOWER, PRESERVES_UPPER],
    <T: num_traits::Signed> |v| -v
);

element_op!(
    /// `exp(x)`. `exp(0) = 1`, so triangular matrices fill up.
    Exp, "exp",
    keeps [PRESERVES_SYMMETRIC, PRESERVES_HERMITIAN],
    <T: num_traits::Float> |v| num_traits::Float::exp(v)
);

element_op!(
    /// `cos(x)`. `cos(0) = 1`, so triangular matrices fill up.
    Cos, "cos",
    keeps [PRESERVES_SYMMETRIC, PRESERVES_HERMITIAN],
    <T: num_traits::Float> |v| num_traits::Float::cos(v)
);
