/* ************************************************************************ **
** This file is part of tabla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::Settings;

/// The iteration budget ran out before the gap dropped to the tolerance.
///
/// `last_gap` is infinite when no update was performed at all.
#[derive(Debug, Copy, Clone, PartialEq, thiserror::Error)]
#[error("failed to converge within {iterations} iterations (last gap: {last_gap:e})")]
pub struct ConvergenceFailure {
    pub iterations: u32,
    pub last_gap: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Converged<T> {
    pub value: T,
    /// Number of updates performed by this call.
    pub iterations: u32,
    /// Gap measured on the final update.
    pub gap: f64,
}

/// Repeatedly apply `step` until `gap(prev, next) <= settings.tolerance`.
///
/// At most `settings.max_iterations` updates are performed; the gap test is
/// applied after every one of them, including the last.  A `NaN` gap never
/// passes.  Errors from `step` end the loop immediately.
pub fn converge<T, E>(
    initial: T,
    settings: &Settings,
    mut step: impl FnMut(&T) -> Result<T, E>,
    mut gap: impl FnMut(&T, &T) -> f64,
) -> Result<Converged<T>, E>
where
    E: From<ConvergenceFailure>,
{
    let Settings { tolerance, max_iterations, .. } = *settings;
    debug!("Iterating. (tolerance: {:e}, max iterations: {})", tolerance, max_iterations);

    let mut current = initial;
    let mut last_gap = f64::INFINITY;
    for iteration in 1..=max_iterations {
        let next = step(&current)?;
        last_gap = gap(&current, &next);
        trace!("i: {:>4}  gap: {:<23e}", iteration, last_gap);
        current = next;

        if last_gap <= tolerance {
            debug!("Converged. (iterations: {}, gap: {:e})", iteration, last_gap);
            return Ok(Converged { value: current, iterations: iteration, gap: last_gap });
        }
    }

    warn!("No convergence after {} iterations. (last gap: {:e})", max_iterations, last_gap);
    Err(ConvergenceFailure { iterations: max_iterations, last_gap }.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    // x -> x / 2 has gap x / 2, so from 1.0 the k'th gap is 2^-k
    fn halve(x: &f64) -> Result<f64, ConvergenceFailure> { Ok(x / 2.0) }
    fn diff(a: &f64, b: &f64) -> f64 { (a - b).abs() }

    #[test]
    fn counts_updates() {
        let _ = env_logger::try_init();

        let settings = Settings::new(1.0 / 16.0, 100);
        let out = converge(1.0, &settings, halve, diff).unwrap();
        assert_eq!(out.iterations, 4);
        assert_eq!(out.value, 1.0 / 16.0);
        assert_eq!(out.gap, 1.0 / 16.0);
    }

    #[test]
    fn success_on_last_permitted_update() {
        let settings = Settings::new(1.0 / 16.0, 4);
        assert_eq!(converge(1.0, &settings, halve, diff).unwrap().iterations, 4);

        let settings = Settings::new(1.0 / 16.0, 3);
        let err = converge(1.0, &settings, halve, diff).unwrap_err();
        assert_eq!(err, ConvergenceFailure { iterations: 3, last_gap: 1.0 / 8.0 });
    }

    #[test]
    fn zero_budget_never_steps() {
        let settings = Settings::new(1.0, 0);
        let mut calls = 0;
        let err = converge(1.0, &settings, |x| { calls += 1; halve(x) }, diff).unwrap_err();
        assert_eq!(calls, 0);
        assert_eq!(err.iterations, 0);
        assert!(err.last_gap.is_infinite());
    }

    #[test]
    fn nan_gap_never_converges() {
        let settings = Settings::new(1e10, 5);
        let err = converge(1.0, &settings, halve, |_, _| f64::NAN).unwrap_err();
        assert_eq!(err.iterations, 5);
        assert!(err.last_gap.is_nan());
    }

    #[test]
    fn step_errors_stop_the_loop() {
        #[derive(Debug, PartialEq)]
        enum Error { Step(u32), Failure(ConvergenceFailure) }
        impl From<ConvergenceFailure> for Error {
            fn from(e: ConvergenceFailure) -> Self { Error::Failure(e) }
        }

        let settings = Settings::new(0.0, 100);
        let step = |&x: &u32| if x == 3 { Err(Error::Step(x)) } else { Ok(x + 1) };
        assert_eq!(converge(0, &settings, step, |_, _| 1.0), Err(Error::Step(3)));
    }
}
