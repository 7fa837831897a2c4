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

use crate::error::{MatrixError, Result};
use crate::traits::{Axis, Matrix, Numberish};
use crate::vector::{write_vector, VectorSource};

/// The compound assignments that can be applied to a row or a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    /// `line = v`
    Replace,
    /// `line += v`
    Add,
    /// `line -= v`
    Subtract,
    /// `line *= v`, element-wise
    Multiply,
}

impl AssignOp {
    /// Combines the current value of an element with the value coming
    /// from the right-hand side.
    fn combine<T: Numberish>(self, current: T, rhs: T) -> T {
        match self {
            AssignOp::Replace => rhs,
            AssignOp::Add => current + rhs,
            AssignOp::Subtract => current - rhs,
            AssignOp::Multiply => current * rhs,
        }
    }
}

impl std::fmt::Display for AssignOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AssignOp::Replace => "=",
            AssignOp::Add => "+=",
            AssignOp::Subtract => "-=",
            AssignOp::Multiply => "*=",
        };
        write!(f, "{}", s)
    }
}

/// Applies `op` between line `index` of `matrix` and `rhs`.
///
/// The new line is computed in full and checked against the positions the
/// structure of `matrix` forces to zero before anything is written. If any
/// of those would end up non-zero, nothing is written and the offending
/// positions are reported. Multiplication never touches a forced-zero
/// position, since the element there is zero already.
pub fn assign_line<T, M, V>(
    matrix: &mut M,
    axis: Axis,
    index: usize,
    op: AssignOp,
    rhs: &V,
) -> Result<()>
where
    T: Numberish,
    M: Matrix<T> + ?Sized,
    V: VectorSource<T> + ?Sized,
{
    let size = matrix.size();
    let bound = axis.count(size);
    if index >= bound {
        return Err(MatrixError::IndexOutOfRange { axis, index, bound });
    }
    let len = axis.length(size);
    if rhs.len() != len {
        return Err(MatrixError::DimensionMismatch {
            expected: len,
            found: rhs.len(),
        });
    }

    let current = matrix.line(axis, index)?;
    let rhs = rhs.to_dense();

    let mut next = Vec::with_capacity(len);
    let mut positions = Vec::new();
    for (pos, (cur, r)) in current.into_iter().zip(rhs).enumerate() {
        let (row, col) = axis.cell(index, pos);
        if !matrix.is_forced_zero(row, col) {
            next.push(op.combine(cur, r));
            continue;
        }
        if op == AssignOp::Multiply {
            next.push(cur);
            continue;
        }
        let v = op.combine(cur, r);
        if !v.is_zero() {
            positions.push(pos);
        }
        next.push(v);
    }

    if !positions.is_empty() {
        log::warn!(
            "rejected '{} {} {}': positions {:?} must remain zero",
            axis,
            index,
            op,
            positions
        );
        return Err(MatrixError::StructureViolation {
            axis,
            index,
            positions,
        });
    }

    matrix.write_line(axis, index, &next)?;
    log::debug!(
        "{} {} {} committed; {} non-zeros",
        axis,
        index,
        op,
        matrix.non_zeros()
    );
    Ok(())
}

macro_rules! line_view {
    ($name:ident, $ctor:ident, $axis:expr, $what:literal) => {
        #[doc = concat!("A mutable view of one ", $what, " of a matrix.")]
        ///
        /// Every write goes through the structural checks of the underlying
        /// matrix and either succeeds completely or leaves it untouched.
        #[derive(Debug)]
        pub struct $name<'a, M: ?Sized> {
            matrix: &'a mut M,
            index: usize,
        }

        #[doc = concat!("Borrows ", $what, " `index` of `matrix`.")]
        pub fn $ctor<T, M>(matrix: &mut M, index: usize) -> Result<$name<'_, M>>
        where
            T: Numberish,
            M: Matrix<T> + ?Sized,
        {
            let axis = $axis;
            let bound = axis.count(matrix.size());
            if index >= bound {
                return Err(MatrixError::IndexOutOfRange { axis, index, bound });
            }
            Ok($name { matrix, index })
        }

        impl<'a, M: ?Sized> $name<'a, M> {
            #[doc = concat!("The index of this ", $what, " within the matrix")]
            pub fn index(&self) -> usize {
                self.index
            }

            /// Number of elements
            pub fn len<T: Numberish>(&self) -> usize
            where
                M: Matrix<T>,
            {
                $axis.length(self.matrix.size())
            }

            /// Checks whether there are no elements
            pub fn is_empty<T: Numberish>(&self) -> bool
            where
                M: Matrix<T>,
            {
                self.len::<T>() == 0
            }

            /// Gets element `i`
            pub fn get<T: Numberish>(&self, i: usize) -> Result<T>
            where
                M: Matrix<T>,
            {
                let (row, col) = $axis.cell(self.index, i);
                self.matrix.get(row, col)
            }

            /// Copies the elements into a `Vec`
            pub fn to_dense<T: Numberish>(&self) -> Result<Vec<T>>
            where
                M: Matrix<T>,
            {
                self.matrix.line($axis, self.index)
            }

            /// Overwrites every element with `rhs`
            pub fn assign<T, V>(&mut self, rhs: &V) -> Result<()>
            where
                T: Numberish,
                M: Matrix<T>,
                V: VectorSource<T> + ?Sized,
            {
                assign_line(&mut *self.matrix, $axis, self.index, AssignOp::Replace, rhs)
            }

            /// Adds `rhs` element by element
            pub fn add_assign<T, V>(&mut self, rhs: &V) -> Result<()>
            where
                T: Numberish,
                M: Matrix<T>,
                V: VectorSource<T> + ?Sized,
            {
                assign_line(&mut *self.matrix, $axis, self.index, AssignOp::Add, rhs)
            }

            /// Subtracts `rhs` element by element
            pub fn sub_assign<T, V>(&mut self, rhs: &V) -> Result<()>
            where
                T: Numberish,
                M: Matrix<T>,
                V: VectorSource<T> + ?Sized,
            {
                assign_line(&mut *self.matrix, $axis, self.index, AssignOp::Subtract, rhs)
            }

            /// Multiplies by `rhs` element by element
            pub fn mul_assign<T, V>(&mut self, rhs: &V) -> Result<()>
            where
                T: Numberish,
                M: Matrix<T>,
                V: VectorSource<T> + ?Sized,
            {
                assign_line(&mut *self.matrix, $axis, self.index, AssignOp::Multiply, rhs)
            }

            /// Applies any [`AssignOp`]
            pub fn apply<T, V>(&mut self, op: AssignOp, rhs: &V) -> Result<()>
            where
                T: Numberish,
                M: Matrix<T>,
                V: VectorSource<T> + ?Sized,
            {
                assign_line(&mut *self.matrix, $axis, self.index, op, rhs)
            }
        }
    };
}

line_view!(Column, column, Axis::Column, "column");
line_view!(Row, row, Axis::Row, "row");

/// Writes the elements as `( a b c )`.
pub fn display_line<T, M>(matrix: &M, axis: Axis, index: usize) -> Result<String>
where
    T: Numberish,
    M: Matrix<T> + ?Sized,
{
    let line = matrix.line(axis, index)?;
    Ok(LineDisplay(&line).to_string())
}

struct LineDisplay<'a, T>(&'a [T]);

impl<'a, T: Numberish> std::fmt::Display for LineDisplay<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_vector(f, self.0)
    }
}
