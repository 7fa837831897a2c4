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

//! Helpers shared by the integration tests
#![allow(dead_code)]

use matrix::{CompressedMatrix, GenericMatrix, Matrix};

/// Storage whose explicitly stored elements can be listed.
pub trait Stored: Matrix<i32> {
    /// The stored elements as `(row, col, value)`, in storage order
    fn stored(&self) -> Vec<(usize, usize, i32)>;
}

impl Stored for GenericMatrix<i32> {
    fn stored(&self) -> Vec<(usize, usize, i32)> {
        let (nrows, ncols) = self.size();
        let mut ret = Vec::with_capacity(nrows * ncols);
        for r in 0..nrows {
            for c in 0..ncols {
                ret.push((r, c, self.get(r, c).unwrap()));
            }
        }
        ret
    }
}

impl Stored for CompressedMatrix<i32> {
    fn stored(&self) -> Vec<(usize, usize, i32)> {
        self.entries().collect()
    }
}

/// What must not change when a write is rejected: the number of stored
/// elements and every stored element, explicit zeroes included.
#[derive(Debug, PartialEq)]
pub struct Snapshot {
    pub non_zeros: usize,
    pub stored: Vec<(usize, usize, i32)>,
}

pub fn snapshot<M: Stored>(m: &M) -> Snapshot {
    Snapshot {
        non_zeros: m.non_zeros(),
        stored: m.stored(),
    }
}
