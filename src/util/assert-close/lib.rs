//! Approximate-equality assertions for floating point data.
//!
//! ```
//! # use tabla_assert_close::assert_close;
//! assert_close!(abs=1e-12, 0.1 + 0.2, 0.3);
//! assert_close!(rel=1e-9, vec![1.0, 2.0], vec![1.0, 2.0 + 1e-12]);
//! ```

use std::fmt;

/// Relative tolerance used when a call to [`assert_close!`] names none.
pub const DEFAULT_REL_TOL: f64 = 1e-9;

/// Panics unless the two values are close.
///
/// Tolerances are given as leading `abs=` and/or `rel=` arguments, in either
/// order.  A pair of numbers passes if it satisfies either one.  Omitted
/// tolerances are `abs=0` and `rel=`[`DEFAULT_REL_TOL`].  An optional format
/// string and arguments may follow the two values.
#[macro_export]
macro_rules! assert_close {
    (abs=$abs:expr, rel=$rel:expr, $($rest:tt)+) => { $crate::__assert_close!{[$abs, $rel] $($rest)+} };
    (rel=$rel:expr, abs=$abs:expr, $($rest:tt)+) => { $crate::__assert_close!{[$abs, $rel] $($rest)+} };
    (abs=$abs:expr, $($rest:tt)+) => { $crate::__assert_close!{[$abs, $crate::DEFAULT_REL_TOL] $($rest)+} };
    (rel=$rel:expr, $($rest:tt)+) => { $crate::__assert_close!{[0.0, $rel] $($rest)+} };
    ($($rest:tt)+) => { $crate::__assert_close!{[0.0, $crate::DEFAULT_REL_TOL] $($rest)+} };
}

/// `assert_close!` in debug builds only.
#[macro_export]
macro_rules! debug_assert_close {
    ($($t:tt)*) => {
        if cfg!(debug_assertions) {
            $crate::assert_close!{$($t)*}
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __assert_close {
    ([$abs:expr, $rel:expr] $a:expr, $b:expr $(,)?) => {
        $crate::__assert_close!{[$abs, $rel] $a, $b, "not nearly equal!"}
    };
    ([$abs:expr, $rel:expr] $a:expr, $b:expr, $($fmt:tt)+) => {
        $crate::check_close_or_panic(
            &$a,
            &$b,
            $crate::Tolerances { abs: $abs, rel: $rel },
            format_args!($($fmt)+),
        )
    };
}

#[doc(hidden)]
pub fn check_close_or_panic<A, B>(a: &A, b: &B, tol: Tolerances, message: fmt::Arguments<'_>)
where
    A: ?Sized + CheckClose<B> + fmt::Debug,
    B: ?Sized + fmt::Debug,
{
    if let Err(e) = a.check_close(b, tol) {
        panic!("{} ({})\n left: {:?}\nright: {:?}\n{}", message, tol, a, b, e);
    }
}

/// The test used by `assert_close!` for a single pair of values.
///
/// Mirrors `math.isclose` from the Python standard library.
pub fn is_close(a: f64, b: f64, Tolerances { abs, rel }: Tolerances) -> bool {
    assert!(rel >= 0.0);
    assert!(abs >= 0.0);

    // equal infinities
    if a == b { return true; }
    // an infinite relative tolerance would let these through
    if a.is_infinite() || b.is_infinite() { return false; }

    // NaN fails here
    (a - b).abs() <= abs.max(rel * a.abs()).max(rel * b.abs())
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

/// Where and how two values failed to compare close.
///
/// `path` holds the indices leading to the offending element, outermost first.
/// For a matrix this is `[row, col]`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckCloseError {
    #[error("failed at {}: (left, right) = {:?} with {}", display_path(.path), .values, .tol)]
    NotClose {
        path: Vec<usize>,
        values: (f64, f64),
        tol: Tolerances,
    },
    #[error("shapes differ at {}: {:?} vs {:?}", display_path(.path), .left, .right)]
    ShapeMismatch {
        path: Vec<usize>,
        left: Vec<usize>,
        right: Vec<usize>,
    },
}

impl CheckCloseError {
    /// Record that this error occurred inside element `index` of a container.
    pub fn within(mut self, index: usize) -> Self {
        match &mut self {
            CheckCloseError::NotClose { path, .. } |
            CheckCloseError::ShapeMismatch { path, .. } => path.insert(0, index),
        }
        self
    }
}

fn display_path(path: &[usize]) -> String {
    match path.len() {
        0 => "top level".to_string(),
        _ => path.iter().map(|i| format!("[{}]", i)).collect(),
    }
}

pub trait CheckClose<Rhs: ?Sized = Self> {
    /// `Ok` if every pair of corresponding numbers is close.
    fn check_close(&self, other: &Rhs, tol: Tolerances) -> Result<(), CheckCloseError>;
}

impl CheckClose for f64 {
    #[inline]
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError> {
        match is_close(*self, *other, tol) {
            true => Ok(()),
            false => Err(CheckCloseError::NotClose {
                path: vec![],
                values: (*self, *other),
                tol,
            }),
        }
    }
}

impl<'a, T: ?Sized + CheckClose> CheckClose for &'a T {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
    { CheckClose::check_close(*self, *other, tol) }
}

impl<T: CheckClose> CheckClose for [T] {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError> {
        if self.len() != other.len() {
            return Err(CheckCloseError::ShapeMismatch {
                path: vec![],
                left: vec![self.len()],
                right: vec![other.len()],
            });
        }
        for (i, (a, b)) in self.iter().zip(other).enumerate() {
            a.check_close(b, tol).map_err(|e| e.within(i))?;
        }
        Ok(())
    }
}

impl<T: CheckClose> CheckClose for Vec<T> {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
    { self[..].check_close(&other[..], tol) }
}

impl<T: CheckClose> CheckClose<[T]> for Vec<T> {
    fn check_close(&self, other: &[T], tol: Tolerances) -> Result<(), CheckCloseError>
    { self[..].check_close(other, tol) }
}

impl<T: CheckClose> CheckClose<Vec<T>> for [T] {
    fn check_close(&self, other: &Vec<T>, tol: Tolerances) -> Result<(), CheckCloseError>
    { self.check_close(&other[..], tol) }
}

impl<T: CheckClose, const N: usize> CheckClose for [T; N] {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
    { self[..].check_close(&other[..], tol) }
}

impl fmt::Display for Tolerances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rel={}, abs={}", self.rel, self.abs)
    }
}
