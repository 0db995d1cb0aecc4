//! Dense row-major `f64` matrices.
//!
//! Every fallible operation returns a typed error rather than panicking; the
//! operator impls (`&a * &b` and friends) are the exception and panic on shape
//! mismatch, for use in code that has already checked its shapes.

pub use ::tabla_slice_math::{DimensionError, Dims, BadNorm};

pub use self::matrix::{Matrix, MatrixRef};
mod matrix;
mod linalg;
mod special;

/// An element or sub-matrix index lies outside the matrix.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("index ({row}, {col}) is out of bounds for a {num_rows}x{num_cols} matrix")]
pub struct IndexError {
    pub row: usize,
    pub col: usize,
    pub num_rows: usize,
    pub num_cols: usize,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("matrix was perfectly degenerate")]
pub struct DegenerateMatrixError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum MatrixError {
    #[error(transparent)]
    Dimension(#[from] DimensionError),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Degenerate(#[from] DegenerateMatrixError),
}
