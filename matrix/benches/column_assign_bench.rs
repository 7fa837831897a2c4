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

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use matrix::{
    column, DenseMatrix, DenseVector, Layout, LowerMatrix, Matrix, SparseMatrix, Storage,
};

const N: usize = 100;

fn filled<M: Storage<matrix::Float>>(layout: Layout) -> LowerMatrix<M> {
    let mut m: LowerMatrix<M> = LowerMatrix::with_size(N, layout);
    for r in 0..N {
        for c in 0..=r {
            m.set(r, c, 1.23123).unwrap();
        }
    }
    m
}

fn rhs(index: usize) -> DenseVector<matrix::Float> {
    let mut v = DenseVector::new(0., N);
    for i in index..N {
        v.set(i, 0.5).unwrap();
    }
    v
}

pub fn dense_add_assign(c: &mut Criterion) {
    let mut m = black_box(filled::<DenseMatrix>(Layout::RowMajor));
    let v = black_box(rhs(N / 2));

    c.bench_function("dense_add_assign", |b| {
        b.iter(|| column(&mut m, N / 2).unwrap().add_assign(&v))
    });
}

pub fn sparse_add_assign(c: &mut Criterion) {
    let mut m = black_box(filled::<SparseMatrix>(Layout::RowMajor));
    let v = black_box(rhs(N / 2));

    c.bench_function("sparse_add_assign", |b| {
        b.iter(|| column(&mut m, N / 2).unwrap().add_assign(&v))
    });
}

pub fn sparse_column_major_assign(c: &mut Criterion) {
    let mut m = black_box(filled::<SparseMatrix>(Layout::ColumnMajor));
    let v = black_box(rhs(N / 2));

    c.bench_function("sparse_column_major_assign", |b| {
        b.iter(|| column(&mut m, N / 2).unwrap().assign(&v))
    });
}

pub fn rejected_assign(c: &mut Criterion) {
    let mut m = black_box(filled::<SparseMatrix>(Layout::RowMajor));
    let v = black_box(rhs(0));

    c.bench_function("rejected_assign", |b| {
        b.iter(|| column(&mut m, N / 2).unwrap().assign(&v))
    });
}

criterion_group!(
    benches,
    dense_add_assign,
    sparse_add_assign,
    sparse_column_major_assign,
    rejected_assign
);
criterion_main!(benches);
