//! Named test matrices and their customary right-hand sides.

use crate::Matrix;

impl Matrix {
    /// The `n x n` Hilbert matrix, `H[i][j] = 1 / (i + j + 1)`.
    pub fn hilbert(n: usize) -> Matrix
    {
        let mut out = Matrix::new(n, n);
        for i in 0..n {
            for j in 0..n {
                out[(i, j)] = 1.0 / (i + j + 1) as f64;
            }
        }
        out
    }

    /// The `n x n` symmetric Pascal matrix, `P[i][j] = C(i + j, i)`.
    ///
    /// Built from the additive recurrence `P[i][j] = P[i-1][j] + P[i][j-1]`, so
    /// entries stay exact for as long as they fit in the mantissa.
    pub fn pascal(n: usize) -> Matrix
    {
        let mut out = Matrix::new_filled((n, n), 1.0);
        for i in 1..n {
            for j in 1..n {
                out[(i, j)] = out[(i - 1, j)] + out[(i, j - 1)];
            }
        }
        out
    }

    /// Right-hand side paired with `hilbert(n)`: every entry is `0.1^(n/3)`.
    pub fn hilbert_rhs(n: usize) -> Vec<f64>
    { vec![0.1f64.powf(n as f64 / 3.0); n] }

    /// Right-hand side paired with `pascal(n)`: `b[i] = 1 / (i + 1)`.
    pub fn pascal_rhs(n: usize) -> Vec<f64>
    { (1..=n).map(|i| 1.0 / i as f64).collect() }
}
