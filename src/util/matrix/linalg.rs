use crate::{Matrix, MatrixError, IndexError, DegenerateMatrixError};
use ::tabla_slice_math::{DimensionError, Dims};

impl Matrix {
    fn check_square(&self, op: &'static str) -> Result<(), DimensionError>
    {
        let (height, width) = self.dims();
        match height == width {
            true => Ok(()),
            false => Err(DimensionError::matrices(op, (height, width), (height, height))),
        }
    }

    /// Determinant by cofactor expansion along the first row.
    ///
    /// The cost is factorial in the dimension; this is meant for the small
    /// matrices where an exact expansion is wanted.  The empty matrix has
    /// determinant `1`.
    pub fn determinant(&self) -> Result<f64, DimensionError>
    {
        self.check_square("determinant")?;
        Ok(cofactor_determinant(self))
    }

    /// The matrix with row `row` and column `col` removed.
    pub fn minor(&self, row: usize, col: usize) -> Result<Matrix, IndexError>
    {
        let (height, width) = self.dims();
        if row >= height || col >= width {
            return Err(IndexError { row, col, num_rows: height, num_cols: width });
        }
        let rows: Vec<_> = (0..height).filter(|&r| r != row).collect();
        let cols: Vec<_> = (0..width).filter(|&c| c != col).collect();
        self.select(&rows, &cols)
    }

    pub fn trace(&self) -> Result<f64, DimensionError>
    {
        self.check_square("trace")?;
        Ok((0..self.num_rows()).map(|i| self[(i, i)]).sum())
    }

    /// Closed-form inverse of a 2x2 matrix.
    pub fn inverse_2x2(&self) -> Result<Matrix, MatrixError>
    {
        if self.dims() != (2, 2) {
            return Err(DimensionError::matrices("inverse_2x2", self.dims(), (2, 2)).into());
        }
        let (a, b, c, d) = (self[(0, 0)], self[(0, 1)], self[(1, 0)], self[(1, 1)]);
        let det = a * d - b * c;
        if det == 0.0 {
            return Err(DegenerateMatrixError.into());
        }

        let mut out = Matrix::new(2, 2);
        out[(0, 0)] = d / det;
        out[(0, 1)] = -b / det;
        out[(1, 0)] = -c / det;
        out[(1, 1)] = a / det;
        Ok(out)
    }

    /// Copy of the main diagonal, zeros elsewhere.
    pub fn diagonal_part(&self) -> Matrix
    {
        let mut out = Matrix::new(self.num_rows(), self.num_cols());
        for i in 0..usize::min(self.num_rows(), self.num_cols()) {
            out[(i, i)] = self[(i, i)];
        }
        out
    }

    /// Copy of the lower triangle, diagonal included.
    pub fn lower_part(&self) -> Matrix
    {
        let mut out = Matrix::new(self.num_rows(), self.num_cols());
        for (r, row) in self.rows().enumerate() {
            for (c, &x) in row.iter().enumerate().take(r + 1) {
                out[(r, c)] = x;
            }
        }
        out
    }

    /// Inverse of a lower-triangular matrix by forward substitution.
    ///
    /// Entries above the diagonal are ignored.
    pub fn lower_triangular_inverse(&self) -> Result<Matrix, MatrixError>
    {
        self.check_square("lower_triangular_inverse")?;
        let n = self.num_rows();
        if (0..n).any(|i| self[(i, i)] == 0.0) {
            return Err(DegenerateMatrixError.into());
        }

        // Column j of the inverse solves L x = e_j, and is zero above row j.
        let mut out = Matrix::new(n, n);
        for j in 0..n {
            for i in j..n {
                let rhs = if i == j { 1.0 } else { 0.0 };
                let acc: f64 = (j..i).map(|k| self[(i, k)] * out[(k, j)]).sum();
                out[(i, j)] = (rhs - acc) / self[(i, i)];
            }
        }
        Ok(out)
    }

    /// Copy with column `col` replaced by `values`.
    pub fn with_column(&self, col: usize, values: &[f64]) -> Result<Matrix, MatrixError>
    {
        if col >= self.num_cols() {
            return Err(IndexError { row: 0, col, num_rows: self.num_rows(), num_cols: self.num_cols() }.into());
        }
        if values.len() != self.num_rows() {
            return Err(DimensionError {
                op: "with_column",
                left: Dims::Matrix(self.num_rows(), self.num_cols()),
                right: Dims::Vector(values.len()),
            }.into());
        }

        let mut out = self.clone();
        for (r, &x) in values.iter().enumerate() {
            out[(r, col)] = x;
        }
        Ok(out)
    }

    /// Solve `A x = b` by Cramer's rule, `x_i = det(A_i) / det(A)`.
    pub fn solve_cramer(&self, b: &[f64]) -> Result<Vec<f64>, MatrixError>
    {
        let det = self.determinant()?;
        if b.len() != self.num_rows() {
            return Err(DimensionError {
                op: "solve_cramer",
                left: Dims::Matrix(self.num_rows(), self.num_cols()),
                right: Dims::Vector(b.len()),
            }.into());
        }
        if det == 0.0 {
            return Err(DegenerateMatrixError.into());
        }

        (0..self.num_cols())
            .map(|i| -> Result<f64, MatrixError> { Ok(self.with_column(i, b)?.determinant()? / det) })
            .collect()
    }
}

// Caller guarantees a square matrix.
fn cofactor_determinant(m: &Matrix) -> f64
{
    match m.num_rows() {
        0 => 1.0,
        1 => m[(0, 0)],
        2 => m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)],
        n => {
            let mut sign = 1.0;
            let mut total = 0.0;
            for col in 0..n {
                let a0j = m[(0, col)];
                if a0j != 0.0 {
                    total += sign * a0j * cofactor_determinant(&first_row_minor(m, col));
                }
                sign = -sign;
            }
            total
        },
    }
}

// `m.minor(0, col)` for a square `m` with at least one row.
fn first_row_minor(m: &Matrix, col: usize) -> Matrix
{
    let n = m.num_rows() - 1;
    let mut out = Matrix::new(n, n);
    for r in 0..n {
        for c in 0..n {
            let src_col = if c < col { c } else { c + 1 };
            out[(r, c)] = m[(r + 1, src_col)];
        }
    }
    out
}
