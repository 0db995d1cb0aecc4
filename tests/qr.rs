use ::tabla::{Matrix, QrFactors, QrError, ShapeError};
use ::tabla::{householder_qr, householder_qr_with, givens_qr, ReflectionSign};
use ::tabla_assert_close::assert_close;
use ::rand::Rng;

fn random_matrix(rows: usize, cols: usize) -> Matrix
{
    let mut rng = ::rand::thread_rng();
    let data = (0..rows * cols).map(|_| rng.gen_range(-1.0..1.0)).collect();
    Matrix::from_row_major_data((rows, cols), data).unwrap()
}

fn check_factors(a: &Matrix, qr: &QrFactors, tol: f64)
{
    let (rows, cols) = a.dims();
    assert_eq!(qr.q.dims(), (rows, rows));
    assert_eq!(qr.r.dims(), (rows, cols));

    let qtq = qr.q.to_transpose().multiply(&qr.q).unwrap();
    assert_close!(abs=1e-12, qtq, Matrix::identity(rows, rows));

    let error = qr.reconstruction_error(a).unwrap();
    assert!(error < tol, "reconstruction error {:e} for {:?}", error, a);

    for r in 0..rows {
        for c in 0..usize::min(r, cols) {
            assert!(qr.r[(r, c)].abs() < 1e-12, "R[{}][{}] = {:e}", r, c, qr.r[(r, c)]);
        }
    }
}

#[test]
fn random_square_matrices() {
    let _ = env_logger::try_init();

    for n in 1..8 {
        let a = random_matrix(n, n);
        check_factors(&a, &householder_qr(&a).unwrap(), 1e-9);
        check_factors(&a, &householder_qr_with(&a, ReflectionSign::MatchSign).unwrap(), 1e-9);
        check_factors(&a, &givens_qr(&a).unwrap(), 1e-9);
    }
}

#[test]
fn random_tall_matrices() {
    for &(rows, cols) in &[(3, 1), (4, 2), (7, 3), (6, 5)] {
        let a = random_matrix(rows, cols);
        check_factors(&a, &householder_qr(&a).unwrap(), 1e-9);
        check_factors(&a, &givens_qr(&a).unwrap(), 1e-9);
    }
}

#[test]
fn hilbert_matrices() {
    for n in 2..=10 {
        let a = Matrix::hilbert(n);
        check_factors(&a, &householder_qr(&a).unwrap(), 1e-9);
        check_factors(&a, &givens_qr(&a).unwrap(), 1e-9);
    }
}

#[test]
fn engines_agree_up_to_signs() {
    let a = random_matrix(5, 5);
    let h = householder_qr(&a).unwrap();
    let g = givens_qr(&a).unwrap();

    // R is unique up to the sign of each row
    for r in 0..5 {
        for c in r..5 {
            assert_close!(abs=1e-9, h.r[(r, c)].abs(), g.r[(r, c)].abs());
        }
    }
}

#[test]
fn solve_through_qr() {
    let a = Matrix::pascal(5);
    let b = Matrix::pascal_rhs(5);
    let x = householder_qr(&a).unwrap().solve(&b).unwrap();

    let ax = a.multiply_vector(&x).unwrap();
    assert_close!(abs=1e-9, ax, b.clone());

    let x_cramer = a.solve_cramer(&b).unwrap();
    assert_close!(abs=1e-8, x, x_cramer);
}

#[test]
fn wide_input_is_rejected() {
    let a = random_matrix(2, 3);
    let expected = |algorithm| QrError::Shape(ShapeError { algorithm, rows: 2, cols: 3 });
    assert_eq!(householder_qr(&a).unwrap_err(), expected("householder QR"));
    assert_eq!(givens_qr(&a).unwrap_err(), expected("givens QR"));
}
