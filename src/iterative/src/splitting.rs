/* ************************************************************************ **
** This file is part of tabla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Splitting iterations for `A x = b`.
//!
//! `A` is written as `S - T` with `S` easy to invert, and the iteration is
//! `x_{k+1} = S^-1 T x_k + S^-1 b`.

use crate::{converge, Converged, Settings, SolveError};
use crate::{Matrix, MatrixError, DimensionError, DegenerateMatrixError};
use ::tabla_slice_math::{self as slice_math, Dims};

//==================================================================================================
// Preconditions

pub fn check_square(a: &Matrix) -> Result<(), DimensionError>
{
    let (rows, cols) = a.dims();
    match rows == cols {
        true => Ok(()),
        false => Err(DimensionError::matrices("check_square", (rows, cols), (rows, rows))),
    }
}

/// Fails unless `a` is square and nonsingular.
///
/// A triangular matrix is judged by its diagonal, since the product of a long
/// diagonal can underflow to zero.  Anything else falls back to the exact
/// cofactor determinant, which is only practical for small matrices.
pub fn check_invertible(a: &Matrix) -> Result<(), MatrixError>
{
    check_square(a)?;
    let n = a.num_rows();
    let is_lower = (0..n).all(|r| (r + 1..n).all(|c| a[(r, c)] == 0.0));
    let is_upper = (0..n).all(|r| (0..r).all(|c| a[(r, c)] == 0.0));

    let singular = match is_lower || is_upper {
        true => (0..n).any(|i| a[(i, i)] == 0.0),
        false => a.determinant()? == 0.0,
    };
    match singular {
        true => Err(DegenerateMatrixError.into()),
        false => Ok(()),
    }
}

//==================================================================================================
// Problem

/// A square system `A x = b`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    pub(crate) a: Matrix,
    pub(crate) b: Vec<f64>,
}

impl LinearSystem {
    pub fn new(a: Matrix, b: Vec<f64>) -> Result<Self, DimensionError>
    {
        check_square(&a)?;
        if b.len() != a.num_rows() {
            return Err(DimensionError {
                op: "LinearSystem::new",
                left: Dims::Matrix(a.num_rows(), a.num_cols()),
                right: Dims::Vector(b.len()),
            });
        }
        Ok(LinearSystem { a, b })
    }

    pub fn a(&self) -> &Matrix { &self.a }
    pub fn b(&self) -> &[f64] { &self.b }

    /// `A x - b`.
    pub fn residual(&self, x: &[f64]) -> Result<Vec<f64>, DimensionError>
    { slice_math::sub(&self.a.multiply_vector(x)?, &self.b) }
}

//==================================================================================================
// Solver

/// Choice of `S` in `A = S - T`.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Splitting {
    /// `S` is the diagonal of `A`.
    Jacobi,
    /// `S` is the lower triangle of `A`, diagonal included.
    GaussSeidel,
}

impl Splitting {
    fn s_part(self, a: &Matrix) -> Matrix
    {
        match self {
            Splitting::Jacobi => a.diagonal_part(),
            Splitting::GaussSeidel => a.lower_part(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub x: Vec<f64>,
    /// Updates performed by the call that produced this.
    pub iterations: u32,
    pub gap: f64,
}

impl From<Converged<Vec<f64>>> for Solution {
    fn from(c: Converged<Vec<f64>>) -> Self
    { Solution { x: c.value, iterations: c.iterations, gap: c.gap } }
}

/// A splitting of one system, ready to iterate from any starting point.
///
/// `S^-1 T` and `S^-1 b` are formed once up front.  Solving holds no state
/// between calls.
#[derive(Debug, Clone)]
pub struct SplittingSolver {
    splitting: Splitting,
    // S^-1 T
    transition: Matrix,
    // S^-1 b
    offset: Vec<f64>,
}

impl SplittingSolver {
    pub fn new(system: &LinearSystem, splitting: Splitting) -> Result<Self, SolveError>
    {
        let a = system.a();
        check_square(a)?;

        let s = splitting.s_part(a);
        // fails on a zero pivot
        let s_inv = s.lower_triangular_inverse()?;
        let t = s.minus(a)?;

        let transition = s_inv.multiply(&t)?;
        let offset = s_inv.multiply_vector(system.b())?;
        Ok(SplittingSolver { splitting, transition, offset })
    }

    pub fn splitting(&self) -> Splitting { self.splitting }

    /// One update, `S^-1 T x + S^-1 b`.
    pub fn step(&self, x: &[f64]) -> Result<Vec<f64>, DimensionError>
    { slice_math::add(&self.transition.multiply_vector(x)?, &self.offset) }

    pub fn solve(&self, x0: &[f64], settings: &Settings) -> Result<Solution, SolveError>
    {
        slice_math::check_same_len("solve", x0, &self.offset)?;
        debug!("{:?}: x(0) = {:?}", self.splitting, x0);

        let gap = settings.gap;
        let converged = converge(
            x0.to_vec(),
            settings,
            |x| self.step(x).map_err(SolveError::from),
            |prev, next| gap.measure(prev, next),
        )?;
        debug!("{:?}: x(N) = {:?}", self.splitting, converged.value);
        Ok(converged.into())
    }
}

pub fn jacobi(system: &LinearSystem, x0: &[f64], settings: &Settings) -> Result<Solution, SolveError>
{ SplittingSolver::new(system, Splitting::Jacobi)?.solve(x0, settings) }

pub fn gauss_seidel(system: &LinearSystem, x0: &[f64], settings: &Settings) -> Result<Solution, SolveError>
{ SplittingSolver::new(system, Splitting::GaussSeidel)?.solve(x0, settings) }
