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

//! Whatever is written into a triangular matrix, its forced zeroes stay
//! zero and a rejected write leaves no trace.

mod common;

use common::snapshot;
use matrix::{
    column, row, AssignOp, Axis, CompressedMatrix, DenseVector, GenericMatrix, Layout, Matrix,
    MatrixError, SparseVector, Storage, Structure, TriangularMatrix, Triangle, UpperMatrix,
    Lower, Upper,
};

const OPS: [AssignOp; 4] = [
    AssignOp::Replace,
    AssignOp::Add,
    AssignOp::Subtract,
    AssignOp::Multiply,
];

/// A few right-hand sides of length 4, some of them valid for any line
fn sources() -> Vec<Vec<i32>> {
    vec![
        vec![0, 0, 0, 0],
        vec![1, 2, 3, 4],
        vec![0, 0, 0, 9],
        vec![5, 0, 0, 0],
        vec![-1, 1, -1, 1],
    ]
}

fn filled<M: Storage<i32>, K: Triangle>(layout: Layout) -> TriangularMatrix<M, K> {
    let mut m: TriangularMatrix<M, K> = TriangularMatrix::with_size(4, layout);
    for r in 0..4 {
        for c in 0..4 {
            if !m.is_forced_zero(r, c) {
                m.set(r, c, (r * 4 + c) as i32 + 1).unwrap();
            }
        }
    }
    m
}

fn exercise<M, K>(layout: Layout)
where
    M: Storage<i32> + common::Stored,
    K: Triangle,
{
    for axis in [Axis::Row, Axis::Column] {
        for index in 0..4 {
            for op in OPS {
                for source in sources() {
                    let mut m = filled::<M, K>(layout);
                    let before = snapshot(m.as_inner());
                    let v = DenseVector::from(source.clone());

                    let result = match axis {
                        Axis::Row => row(&mut m, index).unwrap().apply(op, &v),
                        Axis::Column => column(&mut m, index).unwrap().apply(op, &v),
                    };

                    // Forced zeroes are still zero
                    let detected = Structure::detect(&m);
                    assert!(
                        detected.contains(K::KIND),
                        "{} {} {} {:?} broke the structure",
                        axis,
                        index,
                        op,
                        source
                    );
                    assert!(m.capacity() >= m.non_zeros());

                    match result {
                        Ok(()) => {}
                        Err(MatrixError::StructureViolation { positions, .. }) => {
                            assert!(!positions.is_empty());
                            assert_eq!(snapshot(m.as_inner()), before);
                        }
                        Err(e) => panic!("unexpected error {}", e),
                    }
                }
            }
        }
    }
}

#[test]
fn test_invariant_lower() {
    exercise::<GenericMatrix<i32>, Lower>(Layout::RowMajor);
    exercise::<GenericMatrix<i32>, Lower>(Layout::ColumnMajor);
    exercise::<CompressedMatrix<i32>, Lower>(Layout::RowMajor);
    exercise::<CompressedMatrix<i32>, Lower>(Layout::ColumnMajor);
}

#[test]
fn test_invariant_upper() {
    exercise::<GenericMatrix<i32>, Upper>(Layout::RowMajor);
    exercise::<GenericMatrix<i32>, Upper>(Layout::ColumnMajor);
    exercise::<CompressedMatrix<i32>, Upper>(Layout::RowMajor);
    exercise::<CompressedMatrix<i32>, Upper>(Layout::ColumnMajor);
}

#[test]
fn test_multiply_never_fails() {
    // Multiplying keeps zeroes at zero, so it is valid for any source
    let mut m = filled::<CompressedMatrix<i32>, Upper>(Layout::RowMajor);
    for index in 0..4 {
        column(&mut m, index)
            .unwrap()
            .mul_assign(&DenseVector::from(vec![7, 7, 7, 7]))
            .unwrap();
    }
    assert!(Structure::detect(&m).is_upper());
    assert_eq!(m.get(0, 3).unwrap(), 4 * 7);
}

#[test]
fn test_upper_row() {
    // ( 1 2 3 )
    // ( 0 4 5 )
    // ( 0 0 6 )
    let dense = GenericMatrix::from_rows(vec![vec![1, 2, 3], vec![0, 4, 5], vec![0, 0, 6]]).unwrap();
    let mut upper = UpperMatrix::new(CompressedMatrix::from_dense(&dense, Layout::RowMajor)).unwrap();
    assert_eq!(upper.non_zeros(), 6);

    // row1 = ( 0 0 9 )
    row(&mut upper, 1)
        .unwrap()
        .assign(&SparseVector::from_entries(3, vec![(2, 9)]).unwrap())
        .unwrap();
    assert_eq!(upper.as_inner().to_dense().to_rows()[1], vec![0, 0, 9]);
    assert_eq!(upper.non_zeros(), 5);

    // row2 += ( 1 0 0 ) must fail
    let before = snapshot(upper.as_inner());
    let entries: Vec<_> = upper.as_inner().entries().collect();
    let err = row(&mut upper, 2)
        .unwrap()
        .add_assign(&DenseVector::from(vec![1, 0, 0]))
        .unwrap_err();
    assert_eq!(
        err,
        MatrixError::StructureViolation {
            axis: Axis::Row,
            index: 2,
            positions: vec![0]
        }
    );
    assert_eq!(snapshot(upper.as_inner()), before);
    assert_eq!(upper.as_inner().entries().collect::<Vec<_>>(), entries);
}

#[test]
fn test_set_keeps_structure() {
    let mut m = filled::<GenericMatrix<i32>, Lower>(Layout::RowMajor);
    let before = snapshot(m.as_inner());
    assert!(m.set(0, 3, 1).is_err());
    m.set(0, 3, 0).unwrap();
    assert_eq!(snapshot(m.as_inner()), before);
}

#[test]
fn test_rejected_write_keeps_explicit_zeroes() {
    // Explicit zeroes in the line being written must not be pruned by a
    // rejected write
    let mut m = filled::<CompressedMatrix<i32>, Lower>(Layout::ColumnMajor);
    m.set(2, 1, 0).unwrap();
    m.set(3, 1, 0).unwrap();
    let before = snapshot(m.as_inner());
    assert_eq!(before.non_zeros, 10);

    for op in [AssignOp::Replace, AssignOp::Add, AssignOp::Subtract] {
        let err = column(&mut m, 1)
            .unwrap()
            .apply(op, &DenseVector::from(vec![1, 0, 0, 0]))
            .unwrap_err();
        assert!(matches!(err, MatrixError::StructureViolation { .. }));
        assert_eq!(snapshot(m.as_inner()), before, "after a rejected '{}'", op);
    }
}
