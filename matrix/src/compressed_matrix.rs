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
use crate::generic_matrix::GenericMatrix;
use crate::mapped::Mapped;
use crate::structure::yields;
use crate::traits::{Axis, Layout, Matrix, Numberish, Storage};
use serde::{Deserialize, Serialize};

/// A sparse matrix in compressed format.
///
/// Row-major matrices are stored as compressed rows (CSR), column-major
/// ones as compressed columns (CSC). Only explicitly stored elements take
/// space; everything else reads as zero. Explicit zeroes are allowed.
///
/// Deserialization checks that the arrays describe a valid matrix and
/// fails with [`MatrixError::MalformedStorage`] otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawCompressedMatrix<T>")]
pub struct CompressedMatrix<T: Numberish> {
    nrows: usize,
    ncols: usize,
    #[serde(default)]
    layout: Layout,

    // Line `i` (a row or a column, depending on `layout`) consists of the
    // elements in `ptr[i]..ptr[i+1]`. `idx` is strictly sorted within each line.
    ptr: Vec<usize>,
    idx: Vec<usize>,
    val: Vec<T>,
}

/// The serialized form of a [`CompressedMatrix`], before validation.
#[derive(Deserialize)]
struct RawCompressedMatrix<T> {
    nrows: usize,
    ncols: usize,
    #[serde(default)]
    layout: Layout,
    ptr: Vec<usize>,
    idx: Vec<usize>,
    val: Vec<T>,
}

impl<T: Numberish> TryFrom<RawCompressedMatrix<T>> for CompressedMatrix<T> {
    type Error = MatrixError;

    fn try_from(raw: RawCompressedMatrix<T>) -> Result<Self> {
        let malformed = |msg: String| Err(MatrixError::MalformedStorage(msg));
        let (nmajor, nminor) = raw.layout.split_size((raw.nrows, raw.ncols));
        if raw.ptr.len() != nmajor + 1 {
            return malformed(format!(
                "expected {} line pointers, found {}",
                nmajor + 1,
                raw.ptr.len()
            ));
        }
        if raw.idx.len() != raw.val.len() {
            return malformed(format!(
                "{} indices but {} values",
                raw.idx.len(),
                raw.val.len()
            ));
        }
        if raw.ptr[0] != 0 || raw.ptr[nmajor] != raw.idx.len() {
            return malformed(format!(
                "line pointers must span 0..{}, found {}..{}",
                raw.idx.len(),
                raw.ptr[0],
                raw.ptr[nmajor]
            ));
        }
        for (major, win) in raw.ptr.windows(2).enumerate() {
            let line = match raw.idx.get(win[0]..win[1]) {
                Some(line) => line,
                None => return malformed(format!("line pointers decrease at line {}", major)),
            };
            if line.iter().any(|i| *i >= nminor) {
                return malformed(format!(
                    "line {} has an index out of range (bound is {})",
                    major, nminor
                ));
            }
            if line.windows(2).any(|w| w[0] >= w[1]) {
                return malformed(format!("indices of line {} are not strictly sorted", major));
            }
        }
        Ok(Self {
            nrows: raw.nrows,
            ncols: raw.ncols,
            layout: raw.layout,
            ptr: raw.ptr,
            idx: raw.idx,
            val: raw.val,
        })
    }
}

impl<T: Numberish> Default for CompressedMatrix<T> {
    fn default() -> Self {
        Self::zeros(0, 0, Layout::RowMajor)
    }
}

impl<T: Numberish> std::fmt::Display for CompressedMatrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in 0..self.nrows {
            write!(f, "\n\t(")?;
            for c in 0..self.ncols {
                write!(f, " {}", self.value(r, c))?;
            }
            write!(f, " )")?;
        }
        Ok(())
    }
}

impl<T: Numberish> PartialEq for CompressedMatrix<T> {
    /// Compares values only: explicit zeroes and layout do not matter.
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size()
            && (0..self.nrows)
                .all(|r| (0..self.ncols).all(|c| self.value(r, c) == other.value(r, c)))
    }
}

impl<T: Numberish> CompressedMatrix<T> {
    /// Creates an empty (i.e., all zeroes) `nrows` by `ncols` row-major matrix
    #[must_use]
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self::zeros(nrows, ncols, Layout::RowMajor)
    }

    /// Creates an all-zero matrix with room for `capacity` explicit elements
    #[must_use]
    pub fn with_capacity(nrows: usize, ncols: usize, layout: Layout, capacity: usize) -> Self {
        let mut ret = Self::zeros(nrows, ncols, layout);
        ret.reserve(capacity);
        ret
    }

    /// Builds a compressed matrix holding the non-zero elements of `dense`
    #[must_use]
    pub fn from_dense(dense: &GenericMatrix<T>, layout: Layout) -> Self {
        let (nrows, ncols) = dense.size();
        let (nmajor, nminor) = layout.split_size((nrows, ncols));
        let mut ret = Self::zeros(nrows, ncols, layout);
        for major in 0..nmajor {
            for minor in 0..nminor {
                let (r, c) = layout.major_axis().cell(major, minor);
                let v = dense.data[dense.index(r, c)];
                if !v.is_zero() {
                    ret.idx.push(minor);
                    ret.val.push(v);
                }
            }
            ret.ptr[major + 1] = ret.idx.len();
        }
        ret
    }

    /// Creates a row-major `CompressedMatrix` from its rows, dropping zeroes.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let dense = GenericMatrix::from_rows(rows)?;
        Ok(Self::from_dense(&dense, Layout::RowMajor))
    }

    /// Expands into a dense matrix with the same layout
    #[must_use]
    pub fn to_dense(&self) -> GenericMatrix<T> {
        let mut ret = GenericMatrix::zeros(self.nrows, self.ncols, self.layout);
        for (r, c, v) in self.entries() {
            let i = ret.index(r, c);
            ret.data[i] = v;
        }
        ret
    }

    /// Returns the same matrix stored in the opposite layout, keeping
    /// explicit zeroes.
    #[must_use]
    pub fn opposite(&self) -> Self {
        let layout = self.layout.opposite();
        let mut entries: Vec<(usize, usize, T)> = self.entries().collect();
        entries.sort_by_key(|(r, c, _)| layout.split(*r, *c));
        self.rebuild(self.nrows, self.ncols, layout, entries)
    }

    /// Iterates over the explicitly stored elements, as `(row, col, value)`
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        let axis = self.layout.major_axis();
        self.ptr.windows(2).enumerate().flat_map(move |(major, win)| {
            (win[0]..win[1]).map(move |k| {
                let (r, c) = axis.cell(major, self.idx[k]);
                (r, c, self.val[k])
            })
        })
    }

    /// Reserves room for at least `additional` more explicit elements.
    pub fn reserve(&mut self, additional: usize) {
        self.idx.reserve(additional);
        self.val.reserve(additional);
    }

    /// Removes the element at `(row, col)` from the storage, if present.
    pub fn erase(&mut self, row: usize, col: usize) -> Result<()> {
        self.check_bounds(row, col)?;
        let (major, minor) = self.layout.split(row, col);
        if let Ok(k) = self.find(major, minor) {
            self.remove_at(major, k);
        }
        Ok(())
    }

    /// Removes every explicitly stored zero
    pub fn prune(&mut self) {
        let mut write = 0;
        let mut start = 0;
        for major in 0..self.ptr.len() - 1 {
            let end = self.ptr[major + 1];
            for k in start..end {
                if !self.val[k].is_zero() {
                    self.idx[write] = self.idx[k];
                    self.val[write] = self.val[k];
                    write += 1;
                }
            }
            start = end;
            self.ptr[major + 1] = write;
        }
        self.idx.truncate(write);
        self.val.truncate(write);
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row < self.nrows && col < self.ncols {
            Ok(())
        } else {
            Err(MatrixError::ElementOutOfRange {
                row,
                col,
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

    /// Position of `(major, minor)` within `idx`/`val`, or the position
    /// where it would be inserted.
    fn find(&self, major: usize, minor: usize) -> std::result::Result<usize, usize> {
        let (ini, fin) = (self.ptr[major], self.ptr[major + 1]);
        self.idx[ini..fin]
            .binary_search(&minor)
            .map(|k| k + ini)
            .map_err(|k| k + ini)
    }

    /// The value at `(row, col)`, which must be in bounds.
    fn value(&self, row: usize, col: usize) -> T {
        let (major, minor) = self.layout.split(row, col);
        match self.find(major, minor) {
            Ok(k) => self.val[k],
            Err(_) => T::zero(),
        }
    }

    fn insert_at(&mut self, major: usize, k: usize, minor: usize, v: T) {
        self.idx.insert(k, minor);
        self.val.insert(k, v);
        self.ptr[major + 1..].iter_mut().for_each(|p| *p += 1);
    }

    fn remove_at(&mut self, major: usize, k: usize) {
        self.idx.remove(k);
        self.val.remove(k);
        self.ptr[major + 1..].iter_mut().for_each(|p| *p -= 1);
    }

    /// Builds a matrix from entries sorted by `(major, minor)` in `layout`,
    /// keeping at least the current capacity.
    fn rebuild(
        &self,
        nrows: usize,
        ncols: usize,
        layout: Layout,
        entries: Vec<(usize, usize, T)>,
    ) -> Self {
        let (nmajor, _) = layout.split_size((nrows, ncols));
        let mut ret = Self::with_capacity(nrows, ncols, layout, self.capacity());
        let mut major_now = 0;
        for (r, c, v) in entries {
            let (major, minor) = layout.split(r, c);
            while major_now < major {
                major_now += 1;
                ret.ptr[major_now] = ret.idx.len();
            }
            ret.idx.push(minor);
            ret.val.push(v);
        }
        while major_now < nmajor {
            major_now += 1;
            ret.ptr[major_now] = ret.idx.len();
        }
        ret
    }
}

impl<T: Numberish> Matrix<T> for CompressedMatrix<T> {
    type Owned = Self;

    fn size(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    fn layout(&self) -> Layout {
        self.layout
    }

    fn get(&self, row: usize, col: usize) -> Result<T> {
        self.check_bounds(row, col)?;
        Ok(self.value(row, col))
    }

    /// Stores `v` at `(row, col)`, even if it is zero.
    fn set(&mut self, row: usize, col: usize, v: T) -> Result<()> {
        self.check_bounds(row, col)?;
        let (major, minor) = self.layout.split(row, col);
        match self.find(major, minor) {
            Ok(k) => self.val[k] = v,
            Err(k) => self.insert_at(major, k, minor, v),
        }
        Ok(())
    }

    fn non_zeros(&self) -> usize {
        self.val.len()
    }

    fn capacity(&self) -> usize {
        self.val.capacity()
    }

    fn line(&self, axis: Axis, index: usize) -> Result<Vec<T>> {
        self.check_line(axis, index)?;
        let len = axis.length((self.nrows, self.ncols));
        let mut ret = vec![T::zero(); len];
        if axis == self.layout.major_axis() {
            for k in self.ptr[index]..self.ptr[index + 1] {
                ret[self.idx[k]] = self.val[k];
            }
        } else {
            for (major, v) in ret.iter_mut().enumerate() {
                if let Ok(k) = self.find(major, index) {
                    *v = self.val[k];
                }
            }
        }
        Ok(ret)
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

        if axis == self.layout.major_axis() {
            // Replace the whole stored line at once
            let (ini, fin) = (self.ptr[index], self.ptr[index + 1]);
            let (new_idx, new_val): (Vec<usize>, Vec<T>) = values
                .iter()
                .enumerate()
                .filter(|(_, v)| !v.is_zero())
                .map(|(i, v)| (i, *v))
                .unzip();
            let added = new_idx.len();
            let removed = fin - ini;
            self.idx.splice(ini..fin, new_idx);
            self.val.splice(ini..fin, new_val);
            for p in self.ptr[index + 1..].iter_mut() {
                *p = *p + added - removed;
            }
        } else {
            // One element in each of the stored lines
            for (major, v) in values.iter().enumerate() {
                match (self.find(major, index), v.is_zero()) {
                    (Ok(k), true) => self.remove_at(major, k),
                    (Ok(k), false) => self.val[k] = *v,
                    (Err(k), false) => self.insert_at(major, k, index, *v),
                    (Err(_), true) => {}
                }
            }
        }
        Ok(())
    }

    fn map<Op: ElementOp<T>>(&self, op: Op) -> Mapped<Self> {
        let structure = yields::<Op>(self.structure());
        if op.apply(T::zero()).is_zero() {
            // Implicit zeroes stay zero: only stored values change
            let mut ret = self.clone();
            ret.val.iter_mut().for_each(|v| *v = op.apply(*v));
            Mapped::new(ret, structure, Op::NAME)
        } else {
            let dense = self.to_dense().map(op).into_inner();
            Mapped::new(Self::from_dense(&dense, self.layout), structure, Op::NAME)
        }
    }
}

impl<T: Numberish> Storage<T> for CompressedMatrix<T> {
    fn zeros(nrows: usize, ncols: usize, layout: Layout) -> Self {
        let (nmajor, _) = layout.split_size((nrows, ncols));
        CompressedMatrix {
            nrows,
            ncols,
            layout,
            ptr: vec![0; nmajor + 1],
            idx: Vec::new(),
            val: Vec::new(),
        }
    }

    fn resize(&mut self, nrows: usize, ncols: usize) {
        if (nrows, ncols) == (self.nrows, self.ncols) {
            return;
        }
        let entries = self
            .entries()
            .filter(|(r, c, _)| *r < nrows && *c < ncols)
            .collect();
        *self = self.rebuild(nrows, ncols, self.layout, entries);
    }
}
