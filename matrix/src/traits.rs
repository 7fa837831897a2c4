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

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::functors::ElementOp;
use crate::mapped::Mapped;
use crate::structure::Structure;

/// A simple trait required for initializing some matrices (e.g., the
/// identity matrix)
pub trait OneZero {
    /// Returns an element considered to be 0.
    fn zero() -> Self;

    /// Returns an element considered to be 1.
    fn one() -> Self;
}

/// Complex conjugation of an element. Real numbers are their own conjugate.
pub trait Conjugate: Copy {
    /// Returns the conjugate of `self`
    fn conj(self) -> Self {
        self
    }
}

macro_rules! impl_real_element {
    ($zero:expr, $one:expr; $($t:ty),*) => {
        $(
            impl OneZero for $t {
                fn zero() -> Self {
                    $zero
                }
                fn one() -> Self {
                    $one
                }
            }

            impl Conjugate for $t {}
        )*
    };
}

impl_real_element!(0, 1; i8, i16, i32, i64, isize);
impl_real_element!(0., 1.; f32, f64);

/// Define the basic algebraic requirements for T
pub trait Numberish:
    Copy
    + Clone
    + OneZero
    + Conjugate
    + PartialEq
    + Sized
    + std::fmt::Display
    + std::fmt::Debug
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::AddAssign
    + std::ops::SubAssign
    + std::ops::MulAssign
    + Sync
    + Send
    + Serialize
{
    /// Checks whether this is exactly zero
    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}
impl<
        T: OneZero
            + Conjugate
            + Copy
            + Clone
            + PartialEq
            + Sized
            + std::fmt::Display
            + std::fmt::Debug
            + std::ops::Add<Output = Self>
            + std::ops::Sub<Output = Self>
            + std::ops::Mul<Output = Self>
            + std::ops::AddAssign
            + std::ops::SubAssign
            + std::ops::MulAssign
            + Sync
            + Send
            + Serialize,
    > Numberish for T
{
}

/// The order in which the elements of a matrix are laid out in memory.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Elements of the same row are contiguous.
    #[default]
    RowMajor,
    /// Elements of the same column are contiguous.
    ColumnMajor,
}

impl Layout {
    /// The other layout
    pub fn opposite(self) -> Self {
        match self {
            Layout::RowMajor => Layout::ColumnMajor,
            Layout::ColumnMajor => Layout::RowMajor,
        }
    }

    /// Splits a `(row, col)` pair into `(major, minor)` indices.
    pub(crate) fn split(self, row: usize, col: usize) -> (usize, usize) {
        match self {
            Layout::RowMajor => (row, col),
            Layout::ColumnMajor => (col, row),
        }
    }

    /// Splits a `(nrows, ncols)` size into `(major, minor)` counts.
    pub(crate) fn split_size(self, size: (usize, usize)) -> (usize, usize) {
        self.split(size.0, size.1)
    }

    /// The axis whose lines are contiguous in this layout.
    pub(crate) fn major_axis(self) -> Axis {
        match self {
            Layout::RowMajor => Axis::Row,
            Layout::ColumnMajor => Axis::Column,
        }
    }
}

/// Identifies a kind of line through a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// A row; positions along it are column indices.
    Row,
    /// A column; positions along it are row indices.
    Column,
}

impl Axis {
    /// Returns the `(row, col)` of the element at position `pos` along line `index`.
    pub fn cell(self, index: usize, pos: usize) -> (usize, usize) {
        match self {
            Axis::Row => (index, pos),
            Axis::Column => (pos, index),
        }
    }

    /// Number of lines of this kind in a matrix of size `(nrows, ncols)`
    pub fn count(self, size: (usize, usize)) -> usize {
        match self {
            Axis::Row => size.0,
            Axis::Column => size.1,
        }
    }

    /// Length of each line of this kind in a matrix of size `(nrows, ncols)`
    pub fn length(self, size: (usize, usize)) -> usize {
        match self {
            Axis::Row => size.1,
            Axis::Column => size.0,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// The interface shared by every matrix in this library: dense and
/// compressed storage, and the structural adaptors wrapping them.
pub trait Matrix<T: Numberish> {
    /// The storage that holds the result of [`Matrix::map`]
    type Owned: Storage<T>;

    /// Returns a tuple with number of rows and columns
    fn size(&self) -> (usize, usize);

    /// Number of rows
    fn rows(&self) -> usize {
        self.size().0
    }

    /// Number of columns
    fn columns(&self) -> usize {
        self.size().1
    }

    /// The memory layout of the elements
    fn layout(&self) -> Layout;

    /// Gets an element from the matrix
    fn get(&self, row: usize, col: usize) -> Result<T>;

    /// Sets an element into the matrix
    fn set(&mut self, row: usize, col: usize, v: T) -> Result<()>;

    /// The number of non-zero elements. For compressed storage these are
    /// the explicitly stored ones, which may include explicit zeroes.
    fn non_zeros(&self) -> usize;

    /// The number of elements the matrix can hold without reallocating.
    fn capacity(&self) -> usize;

    /// The structural guarantees of this matrix.
    fn structure(&self) -> Structure {
        Structure::GENERAL
    }

    /// Whether the structure forces the element at `(row, col)` to be zero.
    fn is_forced_zero(&self, _row: usize, _col: usize) -> bool {
        false
    }

    /// Copies line `index` along `axis` into a dense vector.
    fn line(&self, axis: Axis, index: usize) -> Result<Vec<T>>;

    /// Overwrites line `index` along `axis` with `values`.
    ///
    /// Compressed storage drops every exact zero in `values`.
    fn write_line(&mut self, axis: Axis, index: usize, values: &[T]) -> Result<()>;

    /// Applies `op` to every element, tagging the result with the
    /// structure the operation is known to keep.
    fn map<Op: ElementOp<T>>(&self, op: Op) -> Mapped<Self::Owned>;
}

/// A matrix that owns its elements and can be created and resized
/// freely; i.e., dense or compressed storage, not an adaptor.
pub trait Storage<T: Numberish>: Matrix<T> + Clone + Sized {
    /// Creates a `nrows` by `ncols` matrix full of zeroes
    fn zeros(nrows: usize, ncols: usize, layout: Layout) -> Self;

    /// Changes the size of the matrix. Elements that remain inside the new
    /// size keep their value, new elements are zero.
    fn resize(&mut self, nrows: usize, ncols: usize);
}
