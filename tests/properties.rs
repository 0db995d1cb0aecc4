use ::tabla::{Matrix, MatrixError, DimensionError, IndexError};
use ::tabla_assert_close::assert_close;
use ::rand::Rng;

fn random_matrix(rows: usize, cols: usize) -> Matrix
{
    let mut rng = ::rand::thread_rng();
    let data = (0..rows * cols).map(|_| rng.gen_range(-10.0..10.0)).collect();
    Matrix::from_row_major_data((rows, cols), data).unwrap()
}

#[test]
fn transpose_round_trip() {
    for &(rows, cols) in &[(0, 0), (1, 4), (3, 3), (5, 2)] {
        let a = random_matrix(rows, cols);
        assert_eq!(a.to_transpose().dims(), (cols, rows));
        assert_eq!(a.to_transpose().to_transpose(), a);
    }
}

#[test]
fn multiply_is_associative() {
    for _ in 0..20 {
        let a = random_matrix(3, 4);
        let b = random_matrix(4, 2);
        let c = random_matrix(2, 5);

        let left = a.multiply(&b).unwrap().multiply(&c).unwrap();
        let right = a.multiply(&b.multiply(&c).unwrap()).unwrap();
        assert_close!(rel=1e-12, abs=1e-10, left, right);
    }
}

#[test]
fn mismatched_dimensions_are_errors() {
    let a = Matrix::new(2, 3);
    let b = Matrix::new(3, 2);

    assert!(matches!(a.plus(&b), Err(DimensionError { op: "plus", .. })));
    assert!(matches!(a.minus(&b), Err(DimensionError { .. })));
    assert!(a.multiply(&a).is_err());
    assert!(a.multiply_vector(&[1.0, 2.0]).is_err());
    assert!(a.clone().plus_equals(&b).is_err());

    assert_eq!(a.multiply(&b).unwrap().dims(), (2, 2));
    assert!(a.multiply_vector(&[1.0, 2.0, 3.0]).is_err());
    assert_eq!(Matrix::identity(3, 3).multiply_vector(&[1.0, 2.0, 3.0]), Ok(vec![1.0, 2.0, 3.0]));
}

#[test]
fn determinant_examples() {
    assert_eq!(Matrix::identity(2, 2).determinant(), Ok(1.0));
    assert_eq!(Matrix::from_rows(&[[2.0, 0.0], [0.0, 3.0]]).unwrap().determinant(), Ok(6.0));

    let singular = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [1.0, 2.0, 3.0]]).unwrap();
    assert_eq!(singular.determinant(), Ok(0.0));

    assert_eq!(Matrix::from_rows(&[[-7.5]]).unwrap().determinant(), Ok(-7.5));
    assert!(Matrix::new(2, 3).determinant().is_err());
}

#[test]
fn determinant_of_product() {
    let a = random_matrix(4, 4);
    let b = random_matrix(4, 4);
    let det_ab = a.multiply(&b).unwrap().determinant().unwrap();
    let product = a.determinant().unwrap() * b.determinant().unwrap();
    assert_close!(rel=1e-7, abs=1e-3, det_ab, product);
}

#[test]
fn out_of_range_access() {
    let mut a = Matrix::new(2, 2);
    assert_eq!(a.get(2, 0), Err(IndexError { row: 2, col: 0, num_rows: 2, num_cols: 2 }));
    assert!(a.set(0, 5, 1.0).is_err());
    assert!(a.submatrix(0..=2, 0..=1).is_err());

    let err: MatrixError = a.minor(3, 0).unwrap_err().into();
    assert!(matches!(err, MatrixError::Index(_)));
}
