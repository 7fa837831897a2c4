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

use clap::Parser;
use matrix::functors::{Abs, Ceil, Cos, Exp, Floor, Neg, Round, Trunc};
use matrix::{
    assign_line, Axis, CompressedMatrix, DenseVector, GenericMatrix, Lower, Mapped, Matrix,
    Storage, Structure, Triangle, TriangularMatrix, Upper,
};
use serde::Serialize;
use std::io::Write;

use crate::error_msgs::print_warning;
use crate::job::{Action, DeclaredStructure, Job, JobError, MapName, Source, StorageKind};
use crate::Float;

/// The options we can pass to the job runner
#[derive(Parser, Default)]
#[clap(author, version, about, long_about = None)]
pub struct JobOptions {
    /// The input job file (JSON)
    #[clap(short = 'i')]
    pub input_file: String,

    /// Specifies the path to which to write the report.
    /// If none is given, STDOUT is used
    #[clap(short = 'o')]
    pub output: Option<String>,
}

/// What happened with one step of a job
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    /// The position of the step in the job
    pub step: usize,

    /// Whether it was applied. A rejected step leaves the matrix as it was.
    pub accepted: bool,

    /// Why it was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The state of the matrix after running a job
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// The final elements, row by row
    pub rows: Vec<Vec<Float>>,

    /// Number of non-zero (or, for sparse storage, stored) elements
    pub non_zeros: usize,

    /// Number of elements that fit without reallocating
    pub capacity: usize,

    /// The structure the matrix is guaranteed to keep
    pub declared: Structure,

    /// The structure found by inspecting the final elements
    pub detected: Structure,

    /// One entry per step
    pub steps: Vec<StepReport>,
}

/// A matrix the job runner can operate on, and which can take back the
/// result of an element-wise map.
trait JobMatrix: Matrix<Float> + Sized {
    /// Rebuilds `Self` from the result of [`Matrix::map`]. Fails if the
    /// structure of `Self` is not guaranteed to hold.
    fn from_mapped(mapped: Mapped<Self::Owned>) -> matrix::Result<Self>;
}

impl JobMatrix for GenericMatrix<Float> {
    fn from_mapped(mapped: Mapped<Self>) -> matrix::Result<Self> {
        Ok(mapped.into_inner())
    }
}

impl JobMatrix for CompressedMatrix<Float> {
    fn from_mapped(mapped: Mapped<Self>) -> matrix::Result<Self> {
        Ok(mapped.into_inner())
    }
}

impl<M, K> JobMatrix for TriangularMatrix<M, K>
where
    M: Storage<Float, Owned = M>,
    K: Triangle,
{
    fn from_mapped(mapped: Mapped<M>) -> matrix::Result<Self> {
        mapped.into_triangular::<Float, K>()
    }
}

fn map<M: JobMatrix>(matrix: &M, op: MapName) -> Mapped<M::Owned> {
    match op {
        MapName::Round => matrix.map(Round),
        MapName::Floor => matrix.map(Floor),
        MapName::Ceil => matrix.map(Ceil),
        MapName::Trunc => matrix.map(Trunc),
        MapName::Abs => matrix.map(Abs),
        MapName::Neg => matrix.map(Neg),
        MapName::Exp => matrix.map(Exp),
        MapName::Cos => matrix.map(Cos),
    }
}

fn apply<M: JobMatrix>(matrix: &mut M, action: &Action) -> matrix::Result<()> {
    match action {
        Action::Assign {
            axis,
            index,
            op,
            source,
        } => match source {
            Source::Dense(v) => {
                let v = DenseVector::from(v.clone());
                assign_line(matrix, *axis, *index, *op, &v)
            }
            Source::Sparse(v) => assign_line(matrix, *axis, *index, *op, v),
        },
        Action::Map(op) => {
            let mapped = map(matrix, *op);
            *matrix = M::from_mapped(mapped)?;
            Ok(())
        }
    }
}

fn execute<M: JobMatrix>(mut matrix: M, actions: &[Action]) -> Result<Report, JobError> {
    let mut steps = Vec::with_capacity(actions.len());
    for (i, action) in actions.iter().enumerate() {
        let report = match apply(&mut matrix, action) {
            Ok(()) => StepReport {
                step: i,
                accepted: true,
                error: None,
            },
            Err(e) => {
                print_warning("job", format!("step {} rejected: {}", i, e));
                StepReport {
                    step: i,
                    accepted: false,
                    error: Some(e.to_string()),
                }
            }
        };
        steps.push(report);
    }

    let rows = (0..matrix.rows())
        .map(|r| matrix.line(Axis::Row, r))
        .collect::<matrix::Result<Vec<_>>>()?;

    Ok(Report {
        rows,
        non_zeros: matrix.non_zeros(),
        capacity: matrix.capacity(),
        declared: matrix.structure(),
        detected: Structure::detect(&matrix),
        steps,
    })
}

fn with_structure<M>(
    matrix: M,
    structure: DeclaredStructure,
    actions: &[Action],
) -> Result<Report, JobError>
where
    M: Storage<Float, Owned = M> + JobMatrix,
{
    match structure {
        DeclaredStructure::General => execute(matrix, actions),
        DeclaredStructure::Lower => {
            execute(TriangularMatrix::<M, Lower>::new(matrix)?, actions)
        }
        DeclaredStructure::Upper => {
            execute(TriangularMatrix::<M, Upper>::new(matrix)?, actions)
        }
    }
}

/// Runs a job, returning the state of its matrix at the end.
///
/// Every step is checked before anything runs, so a malformed job fails
/// as a whole. Steps the matrix rejects are reported and skipped.
pub fn run_job(job: &Job) -> Result<Report, JobError> {
    let actions = job
        .steps
        .iter()
        .enumerate()
        .map(|(i, s)| s.action(i))
        .collect::<Result<Vec<_>, _>>()?;

    let dense = GenericMatrix::from_rows(job.rows.clone())?.with_layout(job.layout);
    log::debug!(
        "running {} steps on a {}x{} {:?} matrix",
        actions.len(),
        dense.rows(),
        dense.columns(),
        job.storage
    );

    match job.storage {
        StorageKind::Dense => with_structure(dense, job.structure, &actions),
        StorageKind::Sparse => {
            let sparse = CompressedMatrix::from_dense(&dense, job.layout);
            with_structure(sparse, job.structure, &actions)
        }
    }
}

/// Reads the job given in `options`, runs it and writes the report
/// as JSON into `out`.
pub fn run<T: Write>(options: &JobOptions, mut out: T) -> Result<(), JobError> {
    let job = Job::from_file(&options.input_file)?;
    let report = run_job(&job)?;
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out).map_err(|source| JobError::Io {
        path: options.output.clone().unwrap_or_else(|| "stdout".to_string()),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{OpName, Step};
    use matrix::Layout;

    fn job(storage: StorageKind, structure: DeclaredStructure) -> Job {
        Job {
            storage,
            layout: Layout::ColumnMajor,
            structure,
            rows: vec![vec![1., 0., 0.], vec![-4., 2., 0.], vec![7., 0., 3.]],
            steps: vec![
                Step {
                    column: Some(1),
                    op: Some(OpName::Assign),
                    dense: Some(vec![9., 8., 2.]),
                    ..Step::default()
                },
                Step {
                    column: Some(1),
                    op: Some(OpName::Add),
                    dense: Some(vec![0., 8., 2.]),
                    ..Step::default()
                },
                Step {
                    map: Some(MapName::Exp),
                    ..Step::default()
                },
            ],
        }
    }

    #[test]
    fn test_lower_job() {
        for storage in [StorageKind::Dense, StorageKind::Sparse] {
            let report = run_job(&job(storage, DeclaredStructure::Lower)).unwrap();
            assert!(!report.steps[0].accepted);
            assert!(report.steps[1].accepted);
            // exp(0) = 1 cannot stay lower triangular
            assert!(!report.steps[2].accepted);

            assert_eq!(
                report.rows,
                vec![vec![1., 0., 0.], vec![-4., 10., 0.], vec![7., 2., 3.]]
            );
            assert_eq!(report.non_zeros, 6);
            assert!(report.capacity >= report.non_zeros);
            assert!(report.declared.is_lower());
            assert!(report.detected.is_lower());
        }
    }

    #[test]
    fn test_general_job() {
        let report = run_job(&job(StorageKind::Sparse, DeclaredStructure::General)).unwrap();
        assert!(report.steps.iter().all(|s| s.accepted));
        assert!(report.declared.is_general());
        assert_eq!(report.non_zeros, 9);
        assert_eq!(report.rows[0][1], (9. as Float).exp());
    }

    #[test]
    fn test_not_triangular() {
        let r = run_job(&job(StorageKind::Dense, DeclaredStructure::Upper));
        assert!(matches!(r, Err(JobError::Matrix(_))));
    }
}
