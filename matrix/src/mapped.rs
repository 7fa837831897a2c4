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
use crate::structure::{Structure, StructureKind};
use crate::traits::{Matrix, Numberish};
use crate::triangular::{LowerMatrix, Triangle, TriangularMatrix, UpperMatrix};

/// The result of mapping an element-wise operation over a matrix: the
/// resulting storage, together with the structure the operation is known
/// to keep.
#[derive(Debug, Clone)]
pub struct Mapped<M> {
    matrix: M,
    structure: Structure,
    op: &'static str,
}

impl<M> Mapped<M> {
    /// Wraps a `matrix` produced by `op`
    pub fn new(matrix: M, structure: Structure, op: &'static str) -> Self {
        Self {
            matrix,
            structure,
            op,
        }
    }

    /// The structure guaranteed for the result
    pub fn structure(&self) -> Structure {
        self.structure
    }

    /// The name of the operation that produced this
    pub fn op_name(&self) -> &'static str {
        self.op
    }

    /// Borrows the resulting storage
    pub fn as_inner(&self) -> &M {
        &self.matrix
    }

    /// Drops the structural information, returning the storage
    pub fn into_inner(self) -> M {
        self.matrix
    }

    /// Turns this into a triangular matrix of kind `K`, if the operation
    /// guarantees that structure.
    pub fn into_triangular<T, K>(self) -> Result<TriangularMatrix<M, K>>
    where
        T: Numberish,
        M: Matrix<T>,
        K: Triangle,
    {
        if !self.structure.contains(K::KIND) {
            return Err(MatrixError::StructureNotGuaranteed {
                op: self.op,
                required: K::KIND,
            });
        }
        TriangularMatrix::new(self.matrix)
    }

    /// Turns this into a lower-triangular matrix, if the operation
    /// guarantees that structure.
    pub fn into_lower<T>(self) -> Result<LowerMatrix<M>>
    where
        T: Numberish,
        M: Matrix<T>,
    {
        self.into_triangular()
    }

    /// Turns this into an upper-triangular matrix, if the operation
    /// guarantees that structure.
    pub fn into_upper<T>(self) -> Result<UpperMatrix<M>>
    where
        T: Numberish,
        M: Matrix<T>,
    {
        self.into_triangular()
    }

    /// Checks that the structure is guaranteed to contain `kind`
    pub fn require(&self, kind: StructureKind) -> Result<()> {
        if self.structure.contains(kind) {
            Ok(())
        } else {
            Err(MatrixError::StructureNotGuaranteed {
                op: self.op,
                required: kind,
            })
        }
    }
}
