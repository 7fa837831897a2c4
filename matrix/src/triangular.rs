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

use std::marker::PhantomData;

use serde::Serialize;

use crate::error::{MatrixError, Result};
use crate::functors::ElementOp;
use crate::mapped::Mapped;
use crate::structure::{yields, Structure, StructureKind};
use crate::traits::{Axis, Layout, Matrix, Numberish, Storage};

/// Decides which elements of a square matrix are forced to be zero.
pub trait Triangle: Copy + Default + std::fmt::Debug + 'static {
    /// The tag of this structure
    const KIND: StructureKind;

    /// The guarantee carried by matrices of this kind
    const STRUCTURE: Structure;

    /// Checks whether `(row, col)` must always hold a zero
    fn is_forced_zero(row: usize, col: usize) -> bool;
}

/// Every element above the diagonal is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lower;

/// Every element below the diagonal is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Upper;

impl Triangle for Lower {
    const KIND: StructureKind = StructureKind::Lower;
    const STRUCTURE: Structure = Structure::LOWER;

    fn is_forced_zero(row: usize, col: usize) -> bool {
        col > row
    }
}

impl Triangle for Upper {
    const KIND: StructureKind = StructureKind::Upper;
    const STRUCTURE: Structure = Structure::UPPER;

    fn is_forced_zero(row: usize, col: usize) -> bool {
        row > col
    }
}

/// A square matrix whose elements on one side of the diagonal are zero
/// for as long as it lives. Any write that would break this is rejected
/// and leaves the matrix untouched.
///
/// `M` is the storage (dense or compressed) holding the elements.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct TriangularMatrix<M, K: Triangle> {
    matrix: M,
    #[serde(skip)]
    kind: PhantomData<K>,
}

/// A lower-triangular matrix
pub type LowerMatrix<M> = TriangularMatrix<M, Lower>;

/// An upper-triangular matrix
pub type UpperMatrix<M> = TriangularMatrix<M, Upper>;

/// Positions along line `index` that hold a non-zero value where the
/// triangle `K` requires a zero.
pub(crate) fn violations<T: Numberish, K: Triangle>(
    axis: Axis,
    index: usize,
    values: &[T],
) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(pos, v)| {
            let (r, c) = axis.cell(index, *pos);
            K::is_forced_zero(r, c) && !v.is_zero()
        })
        .map(|(pos, _)| pos)
        .collect()
}

impl<M, K: Triangle> TriangularMatrix<M, K> {
    /// Wraps an existing matrix, checking that it is square and that every
    /// forced-zero element is zero.
    pub fn new<T: Numberish>(matrix: M) -> Result<Self>
    where
        M: Matrix<T>,
    {
        let (rows, columns) = matrix.size();
        if rows != columns {
            return Err(MatrixError::NotSquare { rows, columns });
        }
        for r in 0..rows {
            let row = matrix.line(Axis::Row, r)?;
            let positions = violations::<T, K>(Axis::Row, r, &row);
            if !positions.is_empty() {
                return Err(MatrixError::StructureViolation {
                    axis: Axis::Row,
                    index: r,
                    positions,
                });
            }
        }
        Ok(Self {
            matrix,
            kind: PhantomData,
        })
    }

    /// Creates an `n` by `n` matrix full of zeroes
    pub fn with_size<T: Numberish>(n: usize, layout: Layout) -> Self
    where
        M: Storage<T>,
    {
        Self {
            matrix: M::zeros(n, n, layout),
            kind: PhantomData,
        }
    }

    /// Changes the size to `n` by `n`. Existing elements within the new
    /// size are kept; new ones are zero, which keeps the structure.
    pub fn resize<T: Numberish>(&mut self, n: usize)
    where
        M: Storage<T>,
    {
        self.matrix.resize(n, n);
    }

    /// Borrows the underlying storage
    pub fn as_inner(&self) -> &M {
        &self.matrix
    }

    /// Returns the underlying storage
    pub fn into_inner(self) -> M {
        self.matrix
    }
}

impl<T, M, K> Matrix<T> for TriangularMatrix<M, K>
where
    T: Numberish,
    M: Matrix<T>,
    K: Triangle,
{
    type Owned = M::Owned;

    fn size(&self) -> (usize, usize) {
        self.matrix.size()
    }

    fn layout(&self) -> Layout {
        self.matrix.layout()
    }

    fn get(&self, row: usize, col: usize) -> Result<T> {
        self.matrix.get(row, col)
    }

    /// Sets an element. Writing a non-zero value into a forced-zero
    /// position fails; writing a zero there does nothing.
    fn set(&mut self, row: usize, col: usize, v: T) -> Result<()> {
        if K::is_forced_zero(row, col) {
            // Still check the bounds
            self.matrix.get(row, col)?;
            if v.is_zero() {
                return Ok(());
            }
            log::warn!(
                "rejected write of {} into ({},{}) of a {} matrix",
                v,
                row,
                col,
                K::KIND
            );
            return Err(MatrixError::StructureViolation {
                axis: Axis::Row,
                index: row,
                positions: vec![col],
            });
        }
        self.matrix.set(row, col, v)
    }

    fn non_zeros(&self) -> usize {
        self.matrix.non_zeros()
    }

    fn capacity(&self) -> usize {
        self.matrix.capacity()
    }

    fn structure(&self) -> Structure {
        K::STRUCTURE
    }

    fn is_forced_zero(&self, row: usize, col: usize) -> bool {
        K::is_forced_zero(row, col)
    }

    fn line(&self, axis: Axis, index: usize) -> Result<Vec<T>> {
        self.matrix.line(axis, index)
    }

    fn write_line(&mut self, axis: Axis, index: usize, values: &[T]) -> Result<()> {
        let positions = violations::<T, K>(axis, index, values);
        if !positions.is_empty() {
            return Err(MatrixError::StructureViolation {
                axis,
                index,
                positions,
            });
        }
        self.matrix.write_line(axis, index, values)
    }

    fn map<Op: ElementOp<T>>(&self, op: Op) -> Mapped<M::Owned> {
        let inner = self.matrix.map(op).into_inner();
        let structure = yields::<Op>(self.structure());
        log::debug!("'{}' on a {} matrix yields {}", Op::NAME, K::KIND, structure);
        Mapped::new(inner, structure, Op::NAME)
    }
}
