/* ************************************************************************ **
** This file is part of tabla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{Matrix, DimensionError, QrError, QrFactors, ShapeError};

/// A rotation in the plane of rows `pivot` and `target` (`pivot < target`).
///
/// As a dense `dim x dim` matrix it is the identity except for
///
/// ```text
/// G[pivot][pivot] =  cos     G[pivot][target] = -sin
/// G[target][pivot] = sin     G[target][target] = cos
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GivensRotation {
    pub dim: usize,
    pub pivot: usize,
    pub target: usize,
    pub cos: f64,
    pub sin: f64,
}

impl GivensRotation {
    pub fn to_matrix(&self) -> Matrix
    {
        let mut out = Matrix::identity(self.dim, self.dim);
        out[(self.pivot, self.pivot)] = self.cos;
        out[(self.target, self.target)] = self.cos;
        out[(self.pivot, self.target)] = -self.sin;
        out[(self.target, self.pivot)] = self.sin;
        out
    }

    /// Replace `m` with `G m`.  Only the two affected rows are touched.
    pub fn apply_left(&self, m: &mut Matrix) -> Result<(), DimensionError>
    {
        if m.num_rows() != self.dim {
            return Err(DimensionError::matrices("apply_left", (self.dim, self.dim), m.dims()));
        }
        self.rotate_rows(m);
        Ok(())
    }

    fn rotate_rows(&self, m: &mut Matrix)
    {
        let GivensRotation { pivot, target, cos, sin, .. } = *self;
        for c in 0..m.num_cols() {
            let (a, b) = (m[(pivot, c)], m[(target, c)]);
            m[(pivot, c)] = cos * a - sin * b;
            m[(target, c)] = sin * a + cos * b;
        }
    }
}

/// The next rotation of the sequence, or `None` once `a` is upper-triangular.
///
/// The entry chosen for elimination is the first nonzero one below the
/// diagonal, scanning columns left to right and each column top to bottom.
pub fn givens_rotation(a: &Matrix) -> Result<Option<GivensRotation>, ShapeError>
{
    ShapeError::check_tall("givens QR", a)?;

    let (rows, cols) = a.dims();
    let found = (0..cols)
        .flat_map(|c| (c + 1..rows).map(move |r| (r, c)))
        .find(|&(r, c)| a[(r, c)] != 0.0);

    Ok(found.map(|(target, pivot)| {
        let (x0, x1) = (a[(pivot, pivot)], a[(target, pivot)]);
        let r = x0.hypot(x1);
        GivensRotation { dim: rows, pivot, target, cos: x0 / r, sin: -x1 / r }
    }))
}

/// Rotations that reduce `a` to upper-triangular form, in the order applied.
pub fn givens_rotations(a: &Matrix) -> Result<Vec<GivensRotation>, ShapeError>
{
    let mut running = a.clone();
    let mut out = vec![];
    while let Some(g) = givens_rotation(&running)? {
        g.rotate_rows(&mut running);
        // rounding may leave a residue; the entry is zero by construction
        running[(g.target, g.pivot)] = 0.0;
        out.push(g);
    }
    Ok(out)
}

fn accumulate(dim: usize, rotations: &[GivensRotation]) -> Matrix
{
    let mut qt = Matrix::identity(dim, dim);
    for g in rotations {
        g.rotate_rows(&mut qt);
    }
    qt
}

/// `Q^T = G_{k-1} ... G_1 G_0`.
pub fn givens_qt(a: &Matrix) -> Result<Matrix, QrError>
{ Ok(accumulate(a.num_rows(), &givens_rotations(a)?)) }

pub fn givens_qr(a: &Matrix) -> Result<QrFactors, QrError>
{
    let rotations = givens_rotations(a)?;
    debug!("givens QR: {} rotations for a {}x{} matrix", rotations.len(), a.num_rows(), a.num_cols());

    let qt = accumulate(a.num_rows(), &rotations);
    Ok(QrFactors::from_qt(qt, a)?)
}
