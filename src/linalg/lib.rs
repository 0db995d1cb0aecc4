/* ************************************************************************ **
** This file is part of tabla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! QR factorization of dense matrices.
//!
//! Two engines are provided.  Both accumulate an explicit `Q^T` as a product
//! of orthogonal factors and then form `R = Q^T A` from the *original* `A`.
//!
//! * [`householder_qr`] reflects one whole column at a time.
//! * [`givens_qr`] rotates away one sub-diagonal entry at a time.

#[macro_use] extern crate log;
#[macro_use] extern crate serde_derive;

pub use ::tabla_matrix::{Matrix, DimensionError, IndexError, DegenerateMatrixError};

pub use self::householder::{ReflectionSign, householder_reflector, householder_reflectors};
pub use self::householder::{householder_qt, householder_qr, householder_qr_with};
mod householder;

pub use self::givens::{GivensRotation, givens_rotation, givens_rotations, givens_qt, givens_qr};
mod givens;

pub use self::qr::QrFactors;
mod qr;

/// The input does not have the row/column relationship an algorithm needs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{algorithm} requires at least as many rows as columns (got a {rows}x{cols} matrix)")]
pub struct ShapeError {
    pub algorithm: &'static str,
    pub rows: usize,
    pub cols: usize,
}

impl ShapeError {
    pub(crate) fn check_tall(algorithm: &'static str, a: &Matrix) -> Result<(), ShapeError>
    {
        let (rows, cols) = a.dims();
        match rows >= cols {
            true => Ok(()),
            false => Err(ShapeError { algorithm, rows, cols }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum QrError {
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Dimension(#[from] DimensionError),
    #[error(transparent)]
    Degenerate(#[from] DegenerateMatrixError),
}
