/* ************************************************************************ **
** This file is part of tabla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Small dense linear algebra.
//!
//! Everything lives in the member crates; this one gathers their public
//! items and offers an [`Error`] that any of their failures convert into.
//!
//! ```
//! use tabla::{Matrix, householder_qr};
//!
//! # fn main() -> Result<(), tabla::Error> {
//! let a = Matrix::from_rows(&[[2.0, 0.0], [0.0, 3.0]])?;
//! assert_eq!(a.determinant()?, 6.0);
//!
//! let qr = householder_qr(&a)?;
//! assert!(qr.reconstruction_error(&a)? < 1e-12);
//! # Ok(())
//! # }
//! ```

pub use ::tabla_slice_math as slice_math;
pub use ::tabla_slice_math::{DimensionError, Dims, BadNorm};

pub use ::tabla_matrix::{Matrix, MatrixRef, MatrixError, IndexError, DegenerateMatrixError};

pub use ::tabla_linalg::{QrFactors, QrError, ShapeError, ReflectionSign, GivensRotation};
pub use ::tabla_linalg::{householder_reflector, householder_reflectors, householder_qt, householder_qr, householder_qr_with};
pub use ::tabla_linalg::{givens_rotation, givens_rotations, givens_qt, givens_qr};

pub use ::tabla_iterative as iterative;
pub use ::tabla_iterative::{Settings, GapMeasure, Converged, ConvergenceFailure, SolveError, PowerError};
pub use ::tabla_iterative::{LinearSystem, Splitting, SplittingSolver, Solution, Eigenpair};
pub use ::tabla_iterative::{jacobi, gauss_seidel, power_iteration, inverse_power_iteration_2x2};

/// Any failure from the `tabla` crates.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    #[error(transparent)]
    Qr(#[from] QrError),
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error(transparent)]
    Power(#[from] PowerError),
}

impl From<DimensionError> for Error {
    fn from(e: DimensionError) -> Self { Error::Matrix(e.into()) }
}

impl From<IndexError> for Error {
    fn from(e: IndexError) -> Self { Error::Matrix(e.into()) }
}

impl From<DegenerateMatrixError> for Error {
    fn from(e: DegenerateMatrixError) -> Self { Error::Matrix(e.into()) }
}

impl From<ShapeError> for Error {
    fn from(e: ShapeError) -> Self { Error::Qr(e.into()) }
}
