/* ************************************************************************ **
** This file is part of dlin, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Strided loops for operations BLAS doesn't have.

use crate::check_strided;

/// `x[i] *= y[i]`
pub fn dhad(n: usize, x: &mut [f64], incx: usize, y: &[f64], incy: usize) {
    check_strided("dhad", n, x, incx);
    check_strided("dhad", n, y, incy);
    for i in 0..n {
        x[i * incx] *= y[i * incy];
    }
}

/// `x[i] = x[i].powf(alpha)`, with any non-finite result replaced by `non_finite`.
pub fn dpow(n: usize, x: &mut [f64], incx: usize, alpha: f64, non_finite: f64) {
    check_strided("dpow", n, x, incx);
    for i in 0..n {
        let z = x[i * incx].powf(alpha);
        x[i * incx] = if z.is_finite() { z } else { non_finite };
    }
}

/// `x[i] = exp(x[i])`
pub fn dexp(n: usize, x: &mut [f64], incx: usize) {
    check_strided("dexp", n, x, incx);
    for i in 0..n {
        x[i * incx] = x[i * incx].exp();
    }
}

/// Ternary select: `out[i]` is `p[i]`, `z[i]` or `neg[i]` according to
/// whether `c[i]` is positive, zero, or anything else.
///
/// Each input is a `(slice, stride)` pair; stride 0 broadcasts a scalar.
pub fn dsign(
    out: &mut [f64],
    (c, incc): (&[f64], usize),
    (p, incp): (&[f64], usize),
    (z, incz): (&[f64], usize),
    (neg, incn): (&[f64], usize),
) {
    let n = out.len();
    check_strided("dsign", n, c, incc);
    check_strided("dsign", n, p, incp);
    check_strided("dsign", n, z, incz);
    check_strided("dsign", n, neg, incn);
    for (i, x) in out.iter_mut().enumerate() {
        let ci = c[i * incc];
        *x = if ci > 0.0 {
            p[i * incp]
        } else if ci == 0.0 {
            z[i * incz]
        } else {
            neg[i * incn]
        };
    }
}

/// Largest element, or NaN if `n == 0`.
pub fn dmax(n: usize, x: &[f64], incx: usize) -> f64 {
    check_strided("dmax", n, x, incx);
    (0..n).map(|i| x[i * incx]).fold(None, |acc: Option<f64>, v| match acc {
        Some(m) if m >= v => Some(m),
        _ => Some(v),
    }).unwrap_or(::std::f64::NAN)
}

/// Smallest element, or NaN if `n == 0`.
pub fn dmin(n: usize, x: &[f64], incx: usize) -> f64 {
    check_strided("dmin", n, x, incx);
    (0..n).map(|i| x[i * incx]).fold(None, |acc: Option<f64>, v| match acc {
        Some(m) if m <= v => Some(m),
        _ => Some(v),
    }).unwrap_or(::std::f64::NAN)
}

/// Out-of-place transpose of the `m x n` column-major `a` into `out` (`n x m`).
pub fn dtrans(m: usize, n: usize, a: &[f64], out: &mut [f64]) {
    assert_eq!(a.len(), m * n, "(BUG) dtrans: bad input buffer");
    assert_eq!(out.len(), m * n, "(BUG) dtrans: bad output buffer");
    for j in 0..n {
        for i in 0..m {
            out[j + i * n] = a[i + j * m];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pow_replaces_non_finite() {
        let mut x = vec![1.0, 2.0, 0.0];
        dpow(3, &mut x, 1, -1.0, 7.0);
        assert_eq!(x, vec![1.0, 0.5, 7.0]);
    }

    #[test]
    fn extrema_of_empty_are_nan() {
        assert!(dmax(0, &[], 1).is_nan());
        assert!(dmin(0, &[], 1).is_nan());
        assert_eq!(dmax(3, &[1.0, 5.0, -2.0, 8.0, 3.0], 2), 3.0);
        assert_eq!(dmin(2, &[4.0, 0.0, -1.0], 2), -1.0);
    }

    #[test]
    fn sign_broadcasts_scalars() {
        let c = [1.0, -1.0, 0.0];
        let p = [1.0, 2.0, 3.0];
        let mut out = vec![0.0; 3];
        dsign(&mut out, (&c, 1), (&p, 1), (&[20.0], 0), (&[30.0], 0));
        assert_eq!(out, vec![1.0, 30.0, 20.0]);
    }

    #[test]
    fn transpose_rectangular() {
        // [[1, 2, 3], [4, 5, 6]]
        let a = [1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
        let mut out = vec![0.0; 6];
        dtrans(2, 3, &a, &mut out);
        assert_eq!(out, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }
}
