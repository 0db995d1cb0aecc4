//! The 3x3 system that the splitting solvers have always been checked against.
//!
//! The coefficients are kept exactly as they have always been written, so
//! the matrix is only nearly symmetric (`0.3333333` above the diagonal,
//! `0.33333` below it).

use crate::{LinearSystem, Matrix};

const COEFFICIENTS: [[f64; 3]; 3] = [
    [1.0, 0.5, 0.3333333],
    [0.5, 1.0, 0.25],
    [0.33333, 0.25, 1.0],
];

const RHS: [f64; 3] = [0.1, 0.1, 0.1];

pub fn reference_system() -> LinearSystem
{
    let mut a = Matrix::new(3, 3);
    for (r, row) in COEFFICIENTS.iter().enumerate() {
        for (c, &x) in row.iter().enumerate() {
            a[(r, c)] = x;
        }
    }
    LinearSystem { a, b: RHS.to_vec() }
}

/// `[9/190, 28/475, 33/475]`, the solution with exact thirds in place of the
/// truncated coefficients.  It agrees with the true solution of
/// [`reference_system`] to better than `1e-6`.
pub fn reference_solution() -> Vec<f64>
{ vec![9.0 / 190.0, 28.0 / 475.0, 33.0 / 475.0] }
