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

#![deny(missing_docs)]

//! A Library for structured Matrices.
//!
//! Matrices are built generically (i.e., `GenericMatrix<T: Numberish>`,
//! `CompressedMatrix<T: Numberish>`) so that the same library can be used
//! for defining Matrices over `i32`, `f32`, `f64` and so on.
//!
//! On top of the dense and compressed storage, a [`TriangularMatrix`] keeps
//! one side of its diagonal at zero for as long as it lives. Rows and
//! columns of any matrix can be modified through [`column`] and [`row`]
//! views, which check such constraints before writing anything; and
//! element-wise operations (see [`functors`]) know which structures their
//! results keep.
//!
//! ```
//! use matrix::{column, DenseVector, GenericMatrix, LowerMatrix, Matrix};
//!
//! let m = GenericMatrix::from_rows(vec![vec![1, 0], vec![2, 3]]).unwrap();
//! let mut lower = LowerMatrix::new(m).unwrap();
//!
//! // Zero stays zero above the diagonal
//! column(&mut lower, 1).unwrap().assign(&DenseVector::from(vec![0, 5])).unwrap();
//! assert_eq!(lower.get(1, 1).unwrap(), 5);
//!
//! // ... anything else is rejected
//! let bad = DenseVector::from(vec![1, 5]);
//! assert!(column(&mut lower, 1).unwrap().assign(&bad).is_err());
//! ```

mod error;
pub use error::{MatrixError, Result};

mod traits;
pub use traits::{Axis, Conjugate, Layout, Matrix, Numberish, OneZero, Storage};

mod structure;
pub use structure::{yields, Structure, StructureKind, YieldsStructure};

pub mod functors;
pub use functors::ElementOp;

mod mapped;
pub use mapped::Mapped;

mod generic_matrix;
pub use generic_matrix::GenericMatrix;

mod compressed_matrix;
pub use compressed_matrix::CompressedMatrix;

mod vector;
pub use vector::{DenseVector, SparseVector, VectorSource};

mod triangular;
pub use triangular::{Lower, LowerMatrix, Triangle, TriangularMatrix, Upper, UpperMatrix};

mod view;
pub use view::{assign_line, column, display_line, row, AssignOp, Column, Row};

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(feature = "float")]
pub type Float = f32;

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(not(feature = "float"))]
pub type Float = f64;

/// A shorthand for `GenericMatrix<Float>`; i.e., a normal dense
/// matrix. Note that `Float` is defined as `f32` if the feature `float`
/// is utilized; otherwise, it defauts to `f64`.
pub type DenseMatrix = GenericMatrix<Float>;

/// A shorthand for `CompressedMatrix<Float>`
pub type SparseMatrix = CompressedMatrix<Float>;
