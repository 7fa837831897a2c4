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

use crate::structure::StructureKind;
use crate::traits::Axis;

/// Everything that can go wrong when building, querying or mutating a matrix.
///
/// None of these leave a matrix in a modified state: every operation that
/// returns an error has validated its input before touching storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// A write would put a non-zero value in a position the matrix
    /// structure requires to stay zero.
    #[error("invalid assignment to {axis} {index}: positions {positions:?} must remain zero")]
    StructureViolation {
        /// The axis of the line being written.
        axis: Axis,
        /// The index of the line being written.
        index: usize,
        /// Positions along the line that would have become non-zero.
        positions: Vec<usize>,
    },

    /// A row or column index used to build a view is out of bounds.
    #[error("{axis} index {index} is out of range (the matrix has {bound})")]
    IndexOutOfRange {
        /// Which kind of line was requested.
        axis: Axis,
        /// The requested index.
        index: usize,
        /// The number of lines of that kind in the matrix.
        bound: usize,
    },

    /// An element access out of bounds.
    #[error("element ({row},{col}) is out of bounds for a {}x{} matrix", size.0, size.1)]
    ElementOutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Size of the matrix, as `(rows, columns)`.
        size: (usize, usize),
    },

    /// Two operands have incompatible lengths.
    #[error("size mismatch: expected {expected} elements, found {found}")]
    DimensionMismatch {
        /// The length required by the destination.
        expected: usize,
        /// The length of the source.
        found: usize,
    },

    /// A triangular matrix was requested from a non-square one.
    #[error("triangular matrices must be square, found {rows}x{columns}")]
    NotSquare {
        /// Rows of the offending matrix.
        rows: usize,
        /// Columns of the offending matrix.
        columns: usize,
    },

    /// The result of an element-wise operation is not guaranteed to keep
    /// the requested structure.
    #[error("applying '{op}' does not guarantee a {required} result")]
    StructureNotGuaranteed {
        /// Name of the element-wise operation.
        op: &'static str,
        /// The structure that was requested.
        required: StructureKind,
    },

    /// Deserialized storage arrays do not describe a valid matrix or vector.
    #[error("malformed storage: {0}")]
    MalformedStorage(String),
}

/// Shorthand used across the crate.
pub type Result<T> = std::result::Result<T, MatrixError>;
