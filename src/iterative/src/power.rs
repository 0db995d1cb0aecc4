/* ************************************************************************ **
** This file is part of tabla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{converge, check_square, Matrix, Settings, PowerError};
use ::tabla_slice_math as slice_math;

/// An eigenvalue estimate with its (unit) eigenvector.
#[derive(Debug, Clone, PartialEq)]
pub struct Eigenpair {
    pub value: f64,
    pub vector: Vec<f64>,
    pub iterations: u32,
}

#[derive(Debug, Clone)]
struct Estimate {
    // unit length
    vector: Vec<f64>,
    // Rayleigh quotient of `vector`
    value: f64,
}

impl Estimate {
    fn from_vector(a: &Matrix, x: &[f64]) -> Result<Estimate, PowerError>
    {
        let vector = slice_math::normalize(x)?;
        let value = slice_math::dot(&vector, &a.multiply_vector(&vector)?)?;
        Ok(Estimate { vector, value })
    }
}

/// Estimate the eigenvalue of largest magnitude, and its eigenvector.
///
/// Each update applies `a` to the current unit vector and renormalizes.  The
/// gap is the change in the Rayleigh quotient between updates; `settings.gap`
/// plays no part.
///
/// Fails with `BadNorm` if `x0` or any iterate is zero (for instance when
/// `x0` lies in the null space of `a`).
pub fn power_iteration(a: &Matrix, x0: &[f64], settings: &Settings) -> Result<Eigenpair, PowerError>
{
    check_square(a)?;

    let initial = Estimate::from_vector(a, x0)?;
    let converged = converge(
        initial,
        settings,
        |prev| -> Result<Estimate, PowerError> {
            let applied = a.multiply_vector(&prev.vector)?;
            Estimate::from_vector(a, &applied)
        },
        |prev, next| (next.value - prev.value).abs(),
    )?;

    let Estimate { vector, value } = converged.value;
    Ok(Eigenpair { value, vector, iterations: converged.iterations })
}

/// The eigenvalue of smallest magnitude of a 2x2 matrix.
///
/// Runs [`power_iteration`] on the closed-form inverse.  The returned value
/// is the reciprocal of the dominant eigenvalue of the inverse, and so an
/// eigenvalue of `a` itself.
pub fn inverse_power_iteration_2x2(a: &Matrix, x0: &[f64], settings: &Settings) -> Result<Eigenpair, PowerError>
{
    let inverse = a.inverse_2x2()?;
    let Eigenpair { value, vector, iterations } = power_iteration(&inverse, x0, settings)?;
    Ok(Eigenpair { value: value.recip(), vector, iterations })
}
