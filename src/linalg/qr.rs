/* ************************************************************************ **
** This file is part of tabla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{Matrix, DimensionError, DegenerateMatrixError, QrError, ShapeError};

/// Result of a QR factorization `A = Q R`.
///
/// For an `m x n` input, `q` is `m x m` and orthogonal, and `r` is `m x n`
/// and upper-triangular (up to rounding in the entries below the diagonal).
#[derive(Debug, Clone, PartialEq)]
pub struct QrFactors {
    pub q: Matrix,
    pub r: Matrix,
}

impl QrFactors {
    // R comes from the input itself, not from the running product
    pub(crate) fn from_qt(qt: Matrix, a: &Matrix) -> Result<QrFactors, DimensionError>
    {
        let r = qt.multiply(a)?;
        Ok(QrFactors { q: qt.to_transpose(), r })
    }

    /// `Q R`, which should reproduce the input.
    pub fn reconstruct(&self) -> Result<Matrix, DimensionError>
    { self.q.multiply(&self.r) }

    /// Largest absolute entry of `Q R - a`.
    pub fn reconstruction_error(&self, a: &Matrix) -> Result<f64, DimensionError>
    { self.reconstruct()?.max_abs_diff(a) }

    /// Solve `A x = b` through `R x = Q^T b`.
    ///
    /// For a tall `A` this is the least-squares solution.  Fails with
    /// `DegenerateMatrixError` on an exactly zero diagonal entry of `R`.
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>, QrError>
    {
        ShapeError::check_tall("QR solve", &self.r)?;
        let (rows, cols) = self.r.dims();
        if self.q.dims() != (rows, rows) {
            return Err(DimensionError::matrices("solve", self.q.dims(), self.r.dims()).into());
        }

        let y = self.q.to_transpose().multiply_vector(b)?;

        let mut x = vec![0.0; cols];
        for i in (0..cols).rev() {
            let diag = self.r[(i, i)];
            if diag == 0.0 {
                return Err(DegenerateMatrixError.into());
            }
            let known: f64 = (i + 1..cols).map(|k| self.r[(i, k)] * x[k]).sum();
            x[i] = (y[i] - known) / diag;
        }
        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{householder_qr, givens_qr};
    use ::tabla_assert_close::assert_close;
    use ::rand::Rng;

    fn m(rows: &[&[f64]]) -> Matrix { Matrix::from_rows(rows).unwrap() }

    fn random_matrix(rows: usize, cols: usize) -> Matrix
    {
        let mut rng = ::rand::thread_rng();
        let data = (0..rows * cols).map(|_| rng.gen_range(-1.0..1.0)).collect();
        Matrix::from_row_major_data((rows, cols), data).unwrap()
    }

    fn check_factors(a: &Matrix, qr: &QrFactors, tol: f64)
    {
        let (rows, cols) = a.dims();
        assert_close!(abs=tol, &qr.q.to_transpose() * &qr.q, Matrix::identity(rows, rows));
        assert!(qr.reconstruction_error(a).unwrap() < tol);
        for c in 0..cols {
            for r in c + 1..rows {
                assert_close!(abs=tol, qr.r[(r, c)], 0.0, "R[{}][{}]", r, c);
            }
        }
    }

    #[test]
    fn random_square() {
        let _ = env_logger::try_init();
        for n in 1..8 {
            let a = random_matrix(n, n);
            check_factors(&a, &householder_qr(&a).unwrap(), 1e-12);
            check_factors(&a, &givens_qr(&a).unwrap(), 1e-12);
        }
    }

    #[test]
    fn random_tall() {
        let a = random_matrix(6, 3);
        check_factors(&a, &householder_qr(&a).unwrap(), 1e-12);
        check_factors(&a, &givens_qr(&a).unwrap(), 1e-12);
    }

    #[test]
    fn hilbert() {
        for n in 2..=10 {
            let a = Matrix::hilbert(n);
            check_factors(&a, &householder_qr(&a).unwrap(), 1e-12);
            check_factors(&a, &givens_qr(&a).unwrap(), 1e-12);
        }
    }

    #[test]
    fn pascal() {
        // entries reach C(20, 10) so the error is only small relative to them
        let a = Matrix::pascal(11);
        for qr in vec![householder_qr(&a).unwrap(), givens_qr(&a).unwrap()] {
            let err = qr.reconstruction_error(&a).unwrap();
            assert!(err < 1e-12 * a.max_norm(), "{} vs {}", err, a.max_norm());
        }
    }

    #[test]
    fn solve_square() {
        let a = m(&[&[2.0, 1.0, -1.0], &[-3.0, -1.0, 2.0], &[-2.0, 1.0, 2.0]]);
        let b = [8.0, -11.0, -3.0];
        let expected = vec![2.0, 3.0, -1.0];
        assert_close!(abs=1e-12, householder_qr(&a).unwrap().solve(&b).unwrap(), expected.clone());
        assert_close!(abs=1e-12, givens_qr(&a).unwrap().solve(&b).unwrap(), expected.clone());
        assert_close!(abs=1e-10, a.solve_cramer(&b).unwrap(), expected);
    }

    #[test]
    fn solve_least_squares() {
        // the points lie exactly on y = 1 + 2 t
        let a = m(&[&[1.0, 0.0], &[1.0, 1.0], &[1.0, 2.0]]);
        let b = [1.0, 3.0, 5.0];
        assert_close!(abs=1e-12, householder_qr(&a).unwrap().solve(&b).unwrap(), vec![1.0, 2.0]);
        assert_close!(abs=1e-12, givens_qr(&a).unwrap().solve(&b).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn solve_failures() {
        let a = m(&[&[1.0, 0.0], &[1.0, 0.0]]);
        let qr = householder_qr(&a).unwrap();
        assert_eq!(qr.solve(&[1.0, 1.0]), Err(QrError::Degenerate(DegenerateMatrixError)));
        assert!(matches!(qr.solve(&[1.0]), Err(QrError::Dimension(_))));

        let qr = givens_qr(&a).unwrap();
        assert_eq!(qr.solve(&[1.0, 1.0]), Err(QrError::Degenerate(DegenerateMatrixError)));
    }
}
