/* ************************************************************************ **
** This file is part of dlin, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use ::std::fmt;

pub const DEFAULT_NONZERO_TOL: f64 = 1e-9;

/// Asserts that two values are close elementwise.
///
/// ```text
/// assert_close!(a, b);
/// assert_close!(abs=1e-10, a, b);
/// assert_close!(rel=1e-8, abs=1e-10, a, b, "context: {}", x);
/// ```
///
/// `rel` defaults to [`DEFAULT_NONZERO_TOL`] and `abs` to zero.
#[macro_export]
macro_rules! assert_close {
    (rel=$rel:expr, abs=$abs:expr, $($rest:tt)+) => {
        $crate::__assert_close_with!{$crate::Tolerances { rel: $rel, abs: $abs }, $($rest)+}
    };
    (abs=$abs:expr, rel=$rel:expr, $($rest:tt)+) => {
        $crate::__assert_close_with!{$crate::Tolerances { rel: $rel, abs: $abs }, $($rest)+}
    };
    (rel=$rel:expr, $($rest:tt)+) => {
        $crate::__assert_close_with!{$crate::Tolerances { rel: $rel, abs: 0.0 }, $($rest)+}
    };
    (abs=$abs:expr, $($rest:tt)+) => {
        $crate::__assert_close_with!{$crate::Tolerances { rel: $crate::DEFAULT_NONZERO_TOL, abs: $abs }, $($rest)+}
    };
    ($($rest:tt)+) => {
        $crate::__assert_close_with!{$crate::Tolerances::default(), $($rest)+}
    };
}

#[macro_export]
macro_rules! debug_assert_close {
    ($($t:tt)*) => {{
        #[cfg(debug_assertions)] {
            $crate::assert_close!{$($t)*}
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __assert_close_with {
    ($tol:expr, $a:expr, $b:expr $(,)?) => {
        $crate::__assert_close_with!{$tol, $a, $b, "not nearly equal!"}
    };
    ($tol:expr, $a:expr, $b:expr, $($fmt:tt)+) => {{
        let tol: $crate::Tolerances = $tol;
        let a = &$a;
        let b = &$b;
        if let Err(e) = $crate::CheckClose::check_close(a, b, tol) {
            panic!(
                "{} (tolerances: rel={}, abs={})\n left: {:?}\nright: {:?}\n{}",
                format!($($fmt)+), tol.rel, tol.abs, a, b, e,
            );
        }
    }};
}

/// Same test as Python's `math.isclose`.
#[inline]
pub fn is_close(a: f64, b: f64, Tolerances { abs, rel }: Tolerances) -> bool {
    assert!(rel >= 0.0);
    assert!(abs >= 0.0);

    // infinities of the same sign
    if a == b { return true; }

    // opposite infinities; avoid an infinite relative tolerance
    if a.is_infinite() || b.is_infinite() { return false; }

    // NaN fails here too
    (a - b).abs() <= abs.max(rel * a.abs()).max(rel * b.abs())
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Default for Tolerances {
    fn default() -> Self { Tolerances { abs: 0.0, rel: DEFAULT_NONZERO_TOL } }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckCloseError {
    /// First offending element, in flat (storage) order.
    #[error("failed at index {index}:\n  left: {left:?}\n right: {right:?}\n   tol: {tol:?}")]
    Value { index: usize, left: f64, right: f64, tol: Tolerances },
    #[error("shapes differ: {left} vs {right}")]
    Shape { left: String, right: String },
}

pub trait CheckClose<Rhs: ?Sized = Self>: fmt::Debug {
    /// Test that all values of self and other are close.
    fn check_close(&self, other: &Rhs, tol: Tolerances) -> Result<(), CheckCloseError>;
}

impl CheckClose for f64 {
    fn check_close(&self, other: &f64, tol: Tolerances) -> Result<(), CheckCloseError> {
        check_flat(&[*self], &[*other], tol)
    }
}

impl CheckClose for [f64] {
    fn check_close(&self, other: &[f64], tol: Tolerances) -> Result<(), CheckCloseError> {
        check_flat(self, other, tol)
    }
}

impl CheckClose for Vec<f64> {
    fn check_close(&self, other: &Vec<f64>, tol: Tolerances) -> Result<(), CheckCloseError> {
        check_flat(self, other, tol)
    }
}

impl<'a, T: ?Sized + CheckClose> CheckClose for &'a T {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError> {
        CheckClose::check_close(*self, *other, tol)
    }
}

/// Elementwise comparison of two flat buffers.  Container types with a shape
/// should check the shape first and then defer to this.
pub fn check_flat(left: &[f64], right: &[f64], tol: Tolerances) -> Result<(), CheckCloseError> {
    if left.len() != right.len() {
        return Err(CheckCloseError::Shape {
            left: format!("length {}", left.len()),
            right: format!("length {}", right.len()),
        });
    }
    match left.iter().zip(right).position(|(&a, &b)| !is_close(a, b, tol)) {
        None => Ok(()),
        Some(index) => Err(CheckCloseError::Value {
            index, tol,
            left: left[index],
            right: right[index],
        }),
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    #[test]
    fn macro_output_can_compile() {
        assert_close!(1.0, 1.0);
        assert_close!(abs=1e-8, 1.0, 1.0);
        assert_close!(rel=1e-8, 1.0, 1.0);
        assert_close!(rel=1e-8, abs=1e-8, 1.0, 1.0);
        assert_close!(abs=1e-8, rel=1e-8, 1.0, 1.0);
        assert_close!(1.0, 1.0,);
        assert_close!(abs=1e-8, 1.0, 1.0,);
        assert_close!(abs=1e-8, vec![1.0, 2.0], vec![1.0, 2.0 + 1e-10], "{}", "hello");
    }

    #[test]
    fn method_chains_parse() {
        #[derive(Debug)] struct S;
        impl S { fn x(self) -> S { self } }
        impl CheckClose for S {
            fn check_close(&self, _: &S, _: Tolerances) -> Result<(), CheckCloseError> { Ok(()) }
        }
        assert_close!(
            abs=1e-10,
            S.x().x().x(),
            S.x().x().x(),
        );
        debug_assert_close!(
            abs=1e-10,
            S.x().x().x(),
            S.x().x().x(),
            "{}", "hello",
        );
    }

    #[test]
    fn reports_first_bad_index() {
        let err = check_flat(&[1.0, 2.0, 3.0], &[1.0, 2.5, 3.5], Tolerances::default()).unwrap_err();
        match err {
            CheckCloseError::Value { index, left, right, .. } => {
                assert_eq!((index, left, right), (1, 2.0, 2.5));
            },
            e => panic!("unexpected: {}", e),
        }
        assert!(check_flat(&[1.0], &[1.0, 1.0], Tolerances::default()).is_err());
    }

    #[test]
    fn nan_is_never_close() {
        assert!(!is_close(::std::f64::NAN, ::std::f64::NAN, Tolerances { abs: 1.0, rel: 1.0 }));
        assert!(is_close(::std::f64::INFINITY, ::std::f64::INFINITY, Tolerances::default()));
    }

    #[test]
    #[should_panic]
    fn not_close() {
        assert_close!(abs=0.0, rel=0.0, 1.0, 1.1);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic)]
    fn debug_not_close() {
        debug_assert_close!(abs=0.0, rel=0.0, 1.0, 1.1);
    }
}
