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

//! The main `structmat` crate: runs jobs over structured matrices.
//!
//! A job (a JSON file) declares a matrix, its storage and its structure,
//! and then a list of steps: assignments to rows or columns, and
//! element-wise maps. Steps that would break the structure are rejected
//! and reported, and the matrix is left as it was.

pub use matrix::Float;

/// Prints warnings and errors
pub mod error_msgs;

/// The contents of a job file
pub mod job;
pub use job::{Job, JobError};

/// A module with some useful functions to run a job
pub mod run_job;
pub use run_job::{run, run_job, JobOptions, Report, StepReport};

// Re-exports
pub use matrix;
