/* ************************************************************************ **
** This file is part of tabla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{Matrix, QrError, QrFactors, ShapeError};
use ::tabla_slice_math::{norm, normalize};

/// How the reflection vector `v` is formed from the active sub-column `x`.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ReflectionSign {
    /// `v = x + ||x|| e_1`, whatever the sign of the leading entry.
    ///
    /// When the leading entry is negative and dominates the column, this
    /// subtracts nearly equal numbers and loses precision.
    AddNorm,
    /// `v = x + sign(x_1) ||x|| e_1`.  Never cancels.
    MatchSign,
}

impl Default for ReflectionSign {
    fn default() -> Self { ReflectionSign::AddNorm }
}

/// The reflector `H_j` that zeros column `j` of `a` below the diagonal.
///
/// `H_j` is `rows x rows`, equal to the identity outside the trailing block
/// starting at `(j, j)`, and `I - 2 u u^T` inside it, where `u` is the unit
/// reflection vector.  When that vector is zero (or its norm is not finite)
/// there is nothing to reflect and the identity is returned.
pub fn householder_reflector(a: &Matrix, j: usize, sign: ReflectionSign) -> Result<Matrix, QrError>
{
    ShapeError::check_tall("householder QR", a)?;

    let rows = a.num_rows();
    let mut v = a.column_from(j, j)?;
    let x_norm = norm(&v);

    // v[0] lives on the diagonal
    v[0] += match sign {
        ReflectionSign::AddNorm => x_norm,
        ReflectionSign::MatchSign => if v[0] < 0.0 { -x_norm } else { x_norm },
    };

    let mut h = Matrix::identity(rows, rows);
    let u = match normalize(&v) {
        Ok(u) => u,
        Err(_) => {
            trace!("householder: column {} needs no reflection", j);
            return Ok(h);
        },
    };

    let k = u.len();
    let block = &Matrix::identity(k, k) - &(&Matrix::outer(&u, &u) * 2.0);
    h.set_submatrix(j, j, &block)?;
    Ok(h)
}

/// One reflector per column, each built from the matrix as transformed by
/// all of the previous ones.
pub fn householder_reflectors(a: &Matrix, sign: ReflectionSign) -> Result<Vec<Matrix>, QrError>
{
    ShapeError::check_tall("householder QR", a)?;

    let mut running = a.clone();
    let mut out = Vec::with_capacity(a.num_cols());
    for j in 0..a.num_cols() {
        let h = householder_reflector(&running, j, sign)?;
        running = h.multiply(&running)?;
        out.push(h);
    }
    Ok(out)
}

/// `Q^T = H_{k-1} ... H_1 H_0`.
pub fn householder_qt(a: &Matrix, sign: ReflectionSign) -> Result<Matrix, QrError>
{
    let reflectors = householder_reflectors(a, sign)?;

    let mut qt = Matrix::identity(a.num_rows(), a.num_rows());
    for h in &reflectors {
        qt = h.multiply(&qt)?;
    }
    Ok(qt)
}

/// Householder QR with the default [`ReflectionSign`].
pub fn householder_qr(a: &Matrix) -> Result<QrFactors, QrError>
{ householder_qr_with(a, ReflectionSign::default()) }

pub fn householder_qr_with(a: &Matrix, sign: ReflectionSign) -> Result<QrFactors, QrError>
{
    let qt = householder_qt(a, sign)?;
    debug!(
        "householder QR ({:?}): {} reflections for a {}x{} matrix",
        sign, a.num_cols(), a.num_rows(), a.num_cols(),
    );
    Ok(QrFactors::from_qt(qt, a)?)
}
