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

use matrix::{AssignOp, Axis, Layout, MatrixError, SparseVector};
use serde::{Deserialize, Serialize};

use crate::Float;

/// Everything that can stop a job from running.
///
/// A step rejected by the matrix is not one of these: it is reported
/// and the job goes on.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    /// A file could not be read or created
    #[error("could not access file '{path}': {source}")]
    Io {
        /// The file
        path: String,
        /// What went wrong
        #[source]
        source: std::io::Error,
    },

    /// The job is not valid JSON, or the report could not be written
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The initial matrix could not be built
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    /// A step that makes no sense
    #[error("invalid step {index}: {reason}")]
    InvalidStep {
        /// The position of the step in the job
        index: usize,
        /// What is wrong with it
        reason: String,
    },
}

/// How the matrix of a job stores its elements
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// Every element stored
    #[default]
    Dense,
    /// Compressed rows or columns, depending on the layout
    Sparse,
}

/// The structure declared for the matrix of a job
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclaredStructure {
    /// Anything goes
    #[default]
    General,
    /// Lower triangular
    Lower,
    /// Upper triangular
    Upper,
}

/// A compound assignment, as written in a job file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpName {
    /// `=`
    Assign,
    /// `+=`
    Add,
    /// `-=`
    Sub,
    /// `*=`
    Mul,
}

impl From<OpName> for AssignOp {
    fn from(op: OpName) -> Self {
        match op {
            OpName::Assign => AssignOp::Replace,
            OpName::Add => AssignOp::Add,
            OpName::Sub => AssignOp::Subtract,
            OpName::Mul => AssignOp::Multiply,
        }
    }
}

/// An element-wise operation, as written in a job file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapName {
    /// Round half away from zero
    Round,
    /// Round down
    Floor,
    /// Round up
    Ceil,
    /// Round towards zero
    Trunc,
    /// Absolute value
    Abs,
    /// Negation
    Neg,
    /// Exponential
    Exp,
    /// Cosine
    Cos,
}

/// A sparse right-hand side: its length and the stored elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseSource {
    /// The length of the vector
    pub dim: usize,
    /// `[position, value]` pairs. Zeroes are stored explicitly.
    #[serde(default)]
    pub entries: Vec<(usize, Float)>,
}

/// A single step of a job, as written in the file.
///
/// It is either a line assignment (`column` or `row`, `op`, and one of
/// `dense` or `sparse`) or an element-wise map (`map`).
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    /// Assign to this column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,

    /// Assign to this row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,

    /// The assignment to perform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<OpName>,

    /// A dense right-hand side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dense: Option<Vec<Float>>,

    /// A sparse right-hand side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparse: Option<SparseSource>,

    /// Map this operation over every element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<MapName>,
}

/// The right-hand side of an assignment
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// Every element given
    Dense(Vec<Float>),
    /// Only some elements given
    Sparse(SparseVector<Float>),
}

/// A [`Step`] that has been checked
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Apply `op` to line `index` along `axis`
    Assign {
        /// Row or column
        axis: Axis,
        /// Which one
        index: usize,
        /// What to do
        op: AssignOp,
        /// With what
        source: Source,
    },
    /// Map an element-wise operation
    Map(MapName),
}

impl Step {
    /// Checks that the step describes exactly one thing to do.
    ///
    /// `index` is the position of the step in the job, used for
    /// reporting.
    pub fn action(&self, index: usize) -> Result<Action, JobError> {
        let invalid = |reason: &str| JobError::InvalidStep {
            index,
            reason: reason.to_string(),
        };

        if let Some(map) = self.map {
            if self.column.is_some()
                || self.row.is_some()
                || self.op.is_some()
                || self.dense.is_some()
                || self.sparse.is_some()
            {
                return Err(invalid("a 'map' step cannot also assign"));
            }
            return Ok(Action::Map(map));
        }

        let (axis, line) = match (self.column, self.row) {
            (Some(c), None) => (Axis::Column, c),
            (None, Some(r)) => (Axis::Row, r),
            (Some(_), Some(_)) => return Err(invalid("give either 'column' or 'row', not both")),
            (None, None) => return Err(invalid("expecting 'column', 'row' or 'map'")),
        };

        let op = self.op.ok_or_else(|| invalid("missing 'op'"))?;

        let source = match (&self.dense, &self.sparse) {
            (Some(v), None) => Source::Dense(v.clone()),
            (None, Some(s)) => {
                let v = SparseVector::from_entries(s.dim, s.entries.clone())
                    .map_err(|e| invalid(&e.to_string()))?;
                Source::Sparse(v)
            }
            (Some(_), Some(_)) => return Err(invalid("give either 'dense' or 'sparse', not both")),
            (None, None) => return Err(invalid("expecting a 'dense' or 'sparse' vector")),
        };

        Ok(Action::Assign {
            axis,
            index: line,
            op: op.into(),
            source,
        })
    }
}

/// A job: a matrix, and what to do with it
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Dense or sparse storage
    #[serde(default)]
    pub storage: StorageKind,

    /// The order of the elements in memory
    #[serde(default)]
    pub layout: Layout,

    /// The structure to enforce
    #[serde(default)]
    pub structure: DeclaredStructure,

    /// The initial elements, row by row
    pub rows: Vec<Vec<Float>>,

    /// What to do, in order
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Job {
    /// Reads a job from a JSON file
    pub fn from_file(path: &str) -> Result<Self, JobError> {
        let s = std::fs::read_to_string(path).map_err(|source| JobError::Io {
            path: path.to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&s)?)
    }
}
