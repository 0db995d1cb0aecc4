//! Math on variable length contiguous vectors of `f64`.
//!
//! Binary operations validate lengths and report a [`DimensionError`] instead
//! of truncating or padding.  The exception is [`distance`], which is used
//! inside iteration loops on vectors that are the same length by construction.

use ::std::fmt;
use ::itertools::Itertools;

//------------------------
// Errors

/// The shape of an operand, for error messages.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Dims {
    Vector(usize),
    Matrix(usize, usize),
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Dims::Vector(len) => write!(f, "vector of length {}", len),
            Dims::Matrix(rows, cols) => write!(f, "{}x{} matrix", rows, cols),
        }
    }
}

/// Operands of an operation have incompatible shapes.
///
/// Vectors and matrices both report mismatches with this type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{op}: dimensions do not agree ({left} vs {right})")]
pub struct DimensionError {
    pub op: &'static str,
    pub left: Dims,
    pub right: Dims,
}

impl DimensionError {
    pub fn vectors(op: &'static str, left: usize, right: usize) -> Self
    { DimensionError { op, left: Dims::Vector(left), right: Dims::Vector(right) } }

    pub fn matrices(op: &'static str, left: (usize, usize), right: (usize, usize)) -> Self
    { DimensionError { op, left: Dims::Matrix(left.0, left.1), right: Dims::Matrix(right.0, right.1) } }
}

/// A vector could not be normalized because its norm is zero or not finite.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, thiserror::Error)]
#[error("cannot normalize a vector of norm {0}")]
pub struct BadNorm(pub f64);

//------------------------
// Operations

/// Fails unless both operands have the same length.
pub fn check_same_len(op: &'static str, a: &[f64], b: &[f64]) -> Result<(), DimensionError> {
    match a.len() == b.len() {
        true => Ok(()),
        false => Err(DimensionError::vectors(op, a.len(), b.len())),
    }
}

pub fn dot(a: &[f64], b: &[f64]) -> Result<f64, DimensionError> {
    check_same_len("dot", a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

pub fn sqnorm(a: &[f64]) -> f64 { a.iter().map(|x| x * x).sum() }

/// Euclidean norm.  Defined for every vector, including the empty one.
pub fn norm(a: &[f64]) -> f64 { sqnorm(a).sqrt() }

pub fn add(a: &[f64], b: &[f64]) -> Result<Vec<f64>, DimensionError> {
    check_same_len("add", a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x + y).collect())
}

pub fn sub(a: &[f64], b: &[f64]) -> Result<Vec<f64>, DimensionError> {
    check_same_len("sub", a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x - y).collect())
}

pub fn scale(a: &[f64], s: f64) -> Vec<f64> { a.iter().map(|x| s * x).collect() }

/// Largest absolute value of any element, or `0.0` for an empty vector.
pub fn max_abs(a: &[f64]) -> f64 {
    a.iter().fold(0.0, |acc: f64, &x| acc.max(x.abs()))
}

/// Scale to unit Euclidean norm.
pub fn normalize(a: &[f64]) -> Result<Vec<f64>, BadNorm> {
    let length = norm(a);
    let recip = length.recip();
    if !recip.is_normal() {
        return Err(BadNorm(length));
    }
    Ok(scale(a, recip))
}

/// `||a - b||`.
///
/// # Panics
///
/// Panics if the lengths differ.
pub fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip_eq(b).map(|(x, y)| (x - y) * (x - y)).sum::<f64>().sqrt()
}

//---------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_works() {
        assert_eq!(dot(&[4.0, 2.0, 1.0], &[2.0, -1.0, 1.0]), Ok(7.0));
        assert_eq!(dot(&[], &[]), Ok(0.0));
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let a = [1.0, 2.0, 3.0];
        let b = [1.0, 2.0];
        let expected = DimensionError::vectors("dot", 3, 2);
        assert_eq!(dot(&a, &b), Err(expected));
        assert_eq!(add(&a, &b).unwrap_err().op, "add");
        assert_eq!(sub(&b, &a).unwrap_err(), DimensionError::vectors("sub", 2, 3));
    }

    #[test]
    fn norms() {
        assert_eq!(norm(&[3.0, 4.0]), 5.0);
        assert_eq!(sqnorm(&[3.0, 4.0]), 25.0);
        assert_eq!(norm(&[]), 0.0);
        assert_eq!(max_abs(&[1.0, -7.5, 3.0]), 7.5);
        assert_eq!(max_abs(&[]), 0.0);
    }

    #[test]
    fn normalize_rejects_zero() {
        assert_eq!(normalize(&[0.0, 0.0]), Err(BadNorm(0.0)));
        assert_eq!(normalize(&[0.0, 2.0]), Ok(vec![0.0, 1.0]));
    }

    #[test]
    fn scale_and_arith() {
        assert_eq!(scale(&[1.0, -2.0], 3.0), vec![3.0, -6.0]);
        assert_eq!(add(&[1.0, 2.0], &[10.0, 20.0]), Ok(vec![11.0, 22.0]));
        assert_eq!(sub(&[1.0, 2.0], &[10.0, 20.0]), Ok(vec![-9.0, -18.0]));
    }

    #[test]
    fn distances() {
        assert_eq!(distance(&[1.0, 2.0], &[4.0, 6.0]), 5.0);
        assert_eq!(distance(&[], &[]), 0.0);
    }

    #[test]
    #[should_panic]
    fn distance_panics_on_mismatch() {
        let _ = distance(&[1.0, 2.0], &[1.0]);
    }

    #[test]
    fn display() {
        let e = DimensionError::matrices("plus", (2, 3), (3, 2));
        assert_eq!(e.to_string(), "plus: dimensions do not agree (2x3 matrix vs 3x2 matrix)");
    }
}
