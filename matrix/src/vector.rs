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
use crate::traits::Numberish;
use serde::{Deserialize, Serialize};

/// Anything that can be written into a row or a column of a matrix.
pub trait VectorSource<T: Numberish> {
    /// Number of elements
    fn len(&self) -> usize;

    /// Checks whether the vector has no elements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expands into a dense vector
    fn to_dense(&self) -> Vec<T>;
}

/// A vector with every element stored.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DenseVector<T: Numberish> {
    data: Vec<T>,
}

impl<T: Numberish> DenseVector<T> {
    /// Creates a vector of `n` elements with value `v`
    #[must_use]
    pub fn new(v: T, n: usize) -> Self {
        Self { data: vec![v; n] }
    }

    /// Sets element `i`
    pub fn set(&mut self, i: usize, v: T) -> Result<()> {
        let len = self.data.len();
        match self.data.get_mut(i) {
            Some(x) => {
                *x = v;
                Ok(())
            }
            None => Err(MatrixError::DimensionMismatch {
                expected: len,
                found: i + 1,
            }),
        }
    }

    /// Borrows the elements
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: Numberish> From<Vec<T>> for DenseVector<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T: Numberish> VectorSource<T> for DenseVector<T> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn to_dense(&self) -> Vec<T> {
        self.data.clone()
    }
}

/// A vector stored in a sparse format. Explicit zeroes are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSparseVector<T>")]
pub struct SparseVector<T: Numberish> {
    dim: usize,
    // Strictly increasing, each below `dim`
    pos: Vec<usize>,
    val: Vec<T>,
}

#[derive(Deserialize)]
struct RawSparseVector<T> {
    dim: usize,
    pos: Vec<usize>,
    val: Vec<T>,
}

impl<T: Numberish> TryFrom<RawSparseVector<T>> for SparseVector<T> {
    type Error = MatrixError;

    fn try_from(raw: RawSparseVector<T>) -> Result<Self> {
        let reason = if raw.pos.len() != raw.val.len() {
            Some(format!(
                "{} positions but {} values",
                raw.pos.len(),
                raw.val.len()
            ))
        } else if raw.pos.iter().any(|i| *i >= raw.dim) {
            Some(format!("positions must be below {}", raw.dim))
        } else if raw.pos.windows(2).any(|w| w[0] >= w[1]) {
            Some("positions are not strictly sorted".to_string())
        } else {
            None
        };
        match reason {
            Some(reason) => Err(MatrixError::MalformedStorage(reason)),
            None => Ok(Self {
                dim: raw.dim,
                pos: raw.pos,
                val: raw.val,
            }),
        }
    }
}

impl<T: Numberish> SparseVector<T> {
    /// Creates an empty vector of length `dim` with room for `capacity` elements
    #[must_use]
    pub fn new(dim: usize, capacity: usize) -> Self {
        Self {
            dim,
            pos: Vec::with_capacity(capacity),
            val: Vec::with_capacity(capacity),
        }
    }

    /// Builds a vector from `(position, value)` pairs in any order.
    ///
    /// A position given more than once keeps the last value.
    pub fn from_entries(dim: usize, entries: Vec<(usize, T)>) -> Result<Self> {
        let mut ret = Self::new(dim, entries.len());
        for (i, v) in entries {
            ret.insert(i, v)?;
        }
        Ok(ret)
    }

    /// Stores `v` in position `i`, even if it is zero.
    pub fn insert(&mut self, i: usize, v: T) -> Result<()> {
        if i >= self.dim {
            return Err(MatrixError::DimensionMismatch {
                expected: self.dim,
                found: i + 1,
            });
        }
        match self.pos.binary_search(&i) {
            Ok(k) => self.val[k] = v,
            Err(k) => {
                self.pos.insert(k, i);
                self.val.insert(k, v);
            }
        }
        Ok(())
    }

    /// Number of explicitly stored elements
    pub fn non_zeros(&self) -> usize {
        self.val.len()
    }
}

impl<T: Numberish> VectorSource<T> for SparseVector<T> {
    fn len(&self) -> usize {
        self.dim
    }

    fn to_dense(&self) -> Vec<T> {
        let mut ret = vec![T::zero(); self.dim];
        for (i, v) in self.pos.iter().zip(&self.val) {
            ret[*i] = *v;
        }
        ret
    }
}

impl<T: Numberish> std::fmt::Display for DenseVector<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_vector(f, &self.data)
    }
}

impl<T: Numberish> std::fmt::Display for SparseVector<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_vector(f, &self.to_dense())
    }
}

/// Writes `( a b c )`
pub(crate) fn write_vector<T: Numberish>(
    f: &mut std::fmt::Formatter<'_>,
    data: &[T],
) -> std::fmt::Result {
    write!(f, "(")?;
    for v in data {
        write!(f, " {}", v)?;
    }
    write!(f, " )")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_insert_keeps_order() {
        let mut v = SparseVector::new(3, 3);
        v.insert(2, 2).unwrap();
        v.insert(1, 8).unwrap();
        v.insert(0, 0).unwrap();
        assert_eq!(v.non_zeros(), 3);
        assert_eq!(v.pos, vec![0, 1, 2]);
        assert_eq!(v.to_dense(), vec![0, 8, 2]);
        assert!(v.insert(3, 1).is_err());
    }

    #[test]
    fn test_sparse_dense() {
        let v = SparseVector::from_entries(4, vec![(3, 1.5), (1, -2.)]).unwrap();
        assert_eq!(v.to_dense(), vec![0., -2., 0., 1.5]);
        assert_eq!(v.len(), 4);
        assert_eq!(format!("{}", v), "( 0 -2 0 1.5 )");
    }

    #[test]
    fn test_sparse_serde() {
        let v = SparseVector::from_entries(4, vec![(3, 7), (0, 0)]).unwrap();
        let json = serde_json::to_string(&v).unwrap();
        let v2: SparseVector<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(v, v2);
        assert_eq!(v2.non_zeros(), 2);
    }

    #[test]
    fn test_sparse_serde_rejects_malformed() {
        let parse = |json: &str| serde_json::from_str::<SparseVector<i32>>(json);
        // Lengths differ
        assert!(parse(r#"{"dim":3,"pos":[0,1],"val":[1]}"#).is_err());
        // Out of range
        assert!(parse(r#"{"dim":3,"pos":[3],"val":[1]}"#).is_err());
        // Unsorted
        assert!(parse(r#"{"dim":3,"pos":[2,0],"val":[1,2]}"#).is_err());
        // Repeated
        assert!(parse(r#"{"dim":3,"pos":[1,1],"val":[1,2]}"#).is_err());

        let raw = RawSparseVector {
            dim: 2,
            pos: vec![5],
            val: vec![1],
        };
        assert!(matches!(
            SparseVector::try_from(raw),
            Err(MatrixError::MalformedStorage(_))
        ));
    }

    #[test]
    fn test_dense() {
        let mut v = DenseVector::new(0, 3);
        v.set(1, 8).unwrap();
        assert!(v.set(3, 8).is_err());
        assert_eq!(v.as_slice(), &[0, 8, 0]);
        assert_eq!(v.len(), 3);
        assert_eq!(format!("{}", v), "( 0 8 0 )");
    }
}
