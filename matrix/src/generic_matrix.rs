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
use crate::functors::ElementOp;
use crate::mapped::Mapped;
use crate::structure::yields;
use crate::traits::{Axis, Layout, Matrix, Numberish, Storage};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A dense matrix: every element is stored.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawGenericMatrix<T>")]
pub struct GenericMatrix<T: Numberish> {
    pub(crate) ncols: usize,
    pub(crate) nrows: usize,

    #[serde(default)]
    pub(crate) layout: Layout,

    // Contains the data ordered by row (going left to right, and up and
    // down) or by column, depending on the layout.
    pub(crate) data: Vec<T>,
}

#[derive(Deserialize)]
struct RawGenericMatrix<T> {
    ncols: usize,
    nrows: usize,
    #[serde(default)]
    layout: Layout,
    data: Vec<T>,
}

impl<T: Numberish> TryFrom<RawGenericMatrix<T>> for GenericMatrix<T> {
    type Error = MatrixError;

    fn try_from(raw: RawGenericMatrix<T>) -> Result<Self> {
        if raw.nrows.checked_mul(raw.ncols) != Some(raw.data.len()) {
            return Err(MatrixError::MalformedStorage(format!(
                "a {}x{} matrix cannot hold {} elements",
                raw.nrows,
                raw.ncols,
                raw.data.len()
            )));
        }
        Ok(Self {
            ncols: raw.ncols,
            nrows: raw.nrows,
            layout: raw.layout,
            data: raw.data,
        })
    }
}

impl<T: Numberish> std::fmt::Display for GenericMatrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.nrows {
            write!(f, "\n\t(")?;
            for j in 0..self.ncols {
                write!(f, " {}", self.data[self.index(i, j)])?;
            }
            write!(f, " )")?;
        }
        Ok(())
    }
}

impl<T: Numberish> PartialEq for GenericMatrix<T> {
    /// Two matrices are equal when they have the same size and elements,
    /// regardless of their layout.
    fn eq(&self, other: &Self) -> bool {
        self.compare(other)
    }
}

impl<T: Numberish> GenericMatrix<T> {
    /// Creates a `GenericMatrix` from a vector containing the elements of the
    /// matrix, ordered by row.
    ///
    /// # Panics
    /// Panics if `data` does not contain `nrows * ncols` elements
    #[must_use]
    pub fn from_data(nrows: usize, ncols: usize, data: Vec<T>) -> Self {
        if nrows * ncols != data.len() {
            panic!("When creating Matrix: Number of rows (nrows = {}) and cols (ncols = {}) does not match length of data (data.len() = {})... (nrows * ncols = {})", nrows, ncols, data.len(), nrows*ncols)
        }
        Self {
            nrows,
            ncols,
            layout: Layout::RowMajor,
            data,
        }
    }

    /// Creates a `GenericMatrix` from its rows.
    ///
    /// Returns an error if the rows are not all the same length
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            if row.len() != ncols {
                return Err(MatrixError::DimensionMismatch {
                    expected: ncols,
                    found: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self::from_data(nrows, ncols, data))
    }

    /// Creates a `GenericMatrix` of `nrows` and `ncols` full of values `v`
    #[must_use]
    pub fn new(v: T, nrows: usize, ncols: usize) -> Self {
        GenericMatrix {
            nrows,
            ncols,
            layout: Layout::RowMajor,
            data: vec![v; nrows * ncols],
        }
    }

    /// Creates a squared matrix with the elements of `data`
    /// in the diagonal
    #[must_use]
    pub fn diag(data: Vec<T>) -> Self {
        let n_rows = data.len();
        let mut v = vec![T::zero(); n_rows * n_rows];

        for (nrow, value) in data.iter().enumerate() {
            let i = nrow * (n_rows + 1);
            v[i] = *value;
        }

        GenericMatrix::from_data(n_rows, n_rows, v)
    }

    /// Creates an Identity matrix of size NxN
    #[must_use]
    pub fn eye(n: usize) -> Self {
        GenericMatrix {
            nrows: n,
            ncols: n,
            layout: Layout::RowMajor,
            data: (0..(n * n))
                .map(|i| {
                    let col = i % n;
                    let row = (i - col) / n;
                    if row == col {
                        T::one()
                    } else {
                        T::zero()
                    }
                })
                .collect(),
        }
    }

    /// Creates an empty Matrix (i.e., size 0x0)
    #[must_use]
    pub fn empty() -> Self {
        GenericMatrix {
            nrows: 0,
            ncols: 0,
            layout: Layout::RowMajor,
            data: Vec::with_capacity(0),
        }
    }

    /// Checks whether a Matrix has Zero columns and Zero rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nrows == 0 && self.ncols == 0
    }

    /// Returns the same matrix, stored with `layout`
    #[must_use]
    pub fn with_layout(&self, layout: Layout) -> Self {
        if layout == self.layout {
            return self.clone();
        }
        let mut ret = Self::zeros(self.nrows, self.ncols, layout);
        for r in 0..self.nrows {
            for c in 0..self.ncols {
                let i = ret.index(r, c);
                ret.data[i] = self.data[self.index(r, c)];
            }
        }
        ret
    }

    /// Returns the same matrix stored in the opposite layout
    #[must_use]
    pub fn opposite(&self) -> Self {
        self.with_layout(self.layout.opposite())
    }

    /// Copies the data from a `GenericMatrix` into `self`.
    ///
    /// # Panics
    /// Panics if the matrices are of different sizes
    pub fn copy_from(&mut self, other: &GenericMatrix<T>) {
        assert_eq!(self.nrows, other.nrows);
        assert_eq!(self.ncols, other.ncols);
        if self.layout == other.layout {
            self.data.copy_from_slice(&other.data)
        } else {
            *self = other.with_layout(self.layout);
        }
    }

    /// Gets the index of an element within the `data` array of the Matrix
    pub(crate) fn index(&self, nrow: usize, ncol: usize) -> usize {
        match self.layout {
            Layout::RowMajor => self.ncols * nrow + ncol,
            Layout::ColumnMajor => self.nrows * ncol + nrow,
        }
    }

    fn check_bounds(&self, nrow: usize, ncol: usize) -> Result<()> {
        if nrow < self.nrows && ncol < self.ncols {
            Ok(())
        } else {
            Err(MatrixError::ElementOutOfRange {
                row: nrow,
                col: ncol,
                size: (self.nrows, self.ncols),
            })
        }
    }

    fn check_line(&self, axis: Axis, index: usize) -> Result<()> {
        let bound = axis.count((self.nrows, self.ncols));
        if index < bound {
            Ok(())
        } else {
            Err(MatrixError::IndexOutOfRange { axis, index, bound })
        }
    }

    /// Checks if two matrices are exactly the same (as in `element == other_element`... beware Floats).
    pub fn compare(&self, other: &GenericMatrix<T>) -> bool {
        if self.ncols != other.ncols || self.nrows != other.nrows {
            return false;
        }
        if self.layout == other.layout {
            return self.data == other.data;
        }
        (0..self.nrows).all(|r| {
            (0..self.ncols).all(|c| self.data[self.index(r, c)] == other.data[other.index(r, c)])
        })
    }

    /// Returns the rows of the matrix
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.nrows)
            .map(|r| (0..self.ncols).map(|c| self.data[self.index(r, c)]).collect())
            .collect()
    }
}

impl<T: Numberish> Matrix<T> for GenericMatrix<T> {
    type Owned = Self;

    fn size(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    fn layout(&self) -> Layout {
        self.layout
    }

    fn get(&self, nrow: usize, ncol: usize) -> Result<T> {
        self.check_bounds(nrow, ncol)?;
        Ok(self.data[self.index(nrow, ncol)])
    }

    fn set(&mut self, nrow: usize, ncol: usize, v: T) -> Result<()> {
        self.check_bounds(nrow, ncol)?;
        let i = self.index(nrow, ncol);
        self.data[i] = v;
        Ok(())
    }

    fn non_zeros(&self) -> usize {
        self.data.iter().filter(|v| !v.is_zero()).count()
    }

    fn capacity(&self) -> usize {
        self.data.capacity()
    }

    fn line(&self, axis: Axis, index: usize) -> Result<Vec<T>> {
        self.check_line(axis, index)?;
        let len = axis.length((self.nrows, self.ncols));
        Ok((0..len)
            .map(|pos| {
                let (r, c) = axis.cell(index, pos);
                self.data[self.index(r, c)]
            })
            .collect())
    }

    fn write_line(&mut self, axis: Axis, index: usize, values: &[T]) -> Result<()> {
        self.check_line(axis, index)?;
        let len = axis.length((self.nrows, self.ncols));
        if values.len() != len {
            return Err(MatrixError::DimensionMismatch {
                expected: len,
                found: values.len(),
            });
        }
        for (pos, v) in values.iter().enumerate() {
            let (r, c) = axis.cell(index, pos);
            let i = self.index(r, c);
            self.data[i] = *v;
        }
        Ok(())
    }

    fn map<Op: ElementOp<T>>(&self, op: Op) -> Mapped<Self> {
        #[cfg(not(feature = "parallel"))]
        let data = self.data.iter().map(|v| op.apply(*v)).collect();

        #[cfg(feature = "parallel")]
        let data = self.data.par_iter().map(|v| op.apply(*v)).collect();

        let ret = GenericMatrix {
            nrows: self.nrows,
            ncols: self.ncols,
            layout: self.layout,
            data,
        };
        Mapped::new(ret, yields::<Op>(self.structure()), Op::NAME)
    }
}

impl<T: Numberish> Storage<T> for GenericMatrix<T> {
    fn zeros(nrows: usize, ncols: usize, layout: Layout) -> Self {
        GenericMatrix {
            nrows,
            ncols,
            layout,
            data: vec![T::zero(); nrows * ncols],
        }
    }

    fn resize(&mut self, nrows: usize, ncols: usize) {
        if (nrows, ncols) == (self.nrows, self.ncols) {
            return;
        }
        let mut ret = Self::zeros(nrows, ncols, self.layout);
        for r in 0..nrows.min(self.nrows) {
            for c in 0..ncols.min(self.ncols) {
                let i = ret.index(r, c);
                ret.data[i] = self.data[self.index(r, c)];
            }
        }
        *self = ret;
    }
}
