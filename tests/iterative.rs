use ::tabla::{Settings, GapMeasure, Splitting, SplittingSolver, SolveError, ConvergenceFailure};
use ::tabla::{jacobi, gauss_seidel, power_iteration, Matrix};
use ::tabla::iterative::fixtures;
use ::tabla_assert_close::assert_close;
use ::serde_json::json;

#[test]
fn reference_system_from_zero() {
    let _ = env_logger::try_init();

    let system = fixtures::reference_system();
    let settings = Settings::new(0.00005, 100);
    let expected = vec![9.0 / 190.0, 28.0 / 475.0, 33.0 / 475.0];

    let jac = jacobi(&system, &[0.0, 0.0, 0.0], &settings).unwrap();
    let gs = gauss_seidel(&system, &[0.0, 0.0, 0.0], &settings).unwrap();
    assert_close!(abs=1e-4, jac.x, expected.clone());
    assert_close!(abs=1e-4, gs.x, expected.clone());
    assert!(gs.iterations <= jac.iterations);
}

#[test]
fn zero_budget_fails_immediately() {
    let system = fixtures::reference_system();
    let settings = Settings::new(0.00005, 0);
    for &splitting in &[Splitting::Jacobi, Splitting::GaussSeidel] {
        let solver = SplittingSolver::new(&system, splitting).unwrap();
        match solver.solve(&[0.0; 3], &settings) {
            Err(SolveError::Convergence(ConvergenceFailure { iterations: 0, last_gap })) => {
                assert!(last_gap.is_infinite());
            },
            r => panic!("{:?}", r),
        }
    }
}

#[test]
fn settings_from_json() {
    let settings: Settings = ::serde_json::from_value(json!({
        "tolerance": 1e-10,
        "max-iterations": 500,
    })).unwrap();
    assert_eq!(settings.gap, GapMeasure::DifferenceNorm);

    let system = fixtures::reference_system();
    let solution = gauss_seidel(&system, &[0.0; 3], &settings).unwrap();
    let residual = system.residual(&solution.x).unwrap();
    assert!(residual.iter().all(|r| r.abs() < 1e-9), "{:?}", residual);
}

#[test]
fn power_iteration_on_diagonal() {
    let a = Matrix::from_rows(&[[3.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, 0.5]]).unwrap();
    let pair = power_iteration(&a, &[1.0, 1.0, 1.0], &Settings::new(1e-12, 100)).unwrap();
    assert_close!(abs=1e-9, pair.value, 3.0);
    assert_close!(abs=1e-5, pair.vector, vec![1.0, 0.0, 0.0]);
}

#[test]
fn errors_gather_into_one_type() {
    fn solve_twice() -> Result<u32, ::tabla::Error> {
        let system = fixtures::reference_system();
        let loose = jacobi(&system, &[0.0; 3], &Settings::new(1e-3, 100))?;
        let tight = jacobi(&system, &loose.x, &Settings::new(1e-20, 5))?;
        Ok(loose.iterations + tight.iterations)
    }
    assert!(matches!(
        solve_twice(),
        Err(::tabla::Error::Solve(SolveError::Convergence(ConvergenceFailure { iterations: 5, .. }))),
    ));
}
