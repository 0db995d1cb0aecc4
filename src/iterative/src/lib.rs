/* ************************************************************************ **
** This file is part of tabla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Fixed-point iterations on small dense systems.
//!
//! Every algorithm here is a "transform, measure the gap, compare against the
//! tolerance" loop, and all of them run through [`converge`].

#[macro_use] extern crate log;
#[macro_use] extern crate serde_derive;

pub use ::tabla_matrix::{Matrix, MatrixError, DimensionError, DegenerateMatrixError, BadNorm};

pub use self::settings::{Settings, GapMeasure};
mod settings;

pub use self::convergence::{converge, Converged, ConvergenceFailure};
mod convergence;

pub use self::splitting::{check_square, check_invertible};
pub use self::splitting::{LinearSystem, Splitting, SplittingSolver, Solution, jacobi, gauss_seidel};
mod splitting;

pub use self::power::{Eigenpair, power_iteration, inverse_power_iteration_2x2};
mod power;

pub mod fixtures;

//==================================================================================================
// Errors

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum SolveError {
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    #[error(transparent)]
    Convergence(#[from] ConvergenceFailure),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum PowerError {
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    #[error("iterate could not be normalized")]
    BadNorm(#[from] BadNorm),
    #[error(transparent)]
    Convergence(#[from] ConvergenceFailure),
}

macro_rules! impl_from_matrix_parts {
    ($Error:ident) => {
        impl From<DimensionError> for $Error {
            fn from(e: DimensionError) -> Self { $Error::Matrix(e.into()) }
        }

        impl From<DegenerateMatrixError> for $Error {
            fn from(e: DegenerateMatrixError) -> Self { $Error::Matrix(e.into()) }
        }
    };
}

impl_from_matrix_parts!(SolveError);
impl_from_matrix_parts!(PowerError);
