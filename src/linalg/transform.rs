/* ************************************************************************ **
** This file is part of dlin, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Elementwise transforms: softmax, sign-select, and division with an
//! infinite fallback.

use crate::errors::shape_mismatch;
use crate::operand::Container;
use crate::{Matrix, Operand, Result, Vector, VectorBase};
use ::dlin_kernel as kernel;

/// `a / b`, except that division by zero gives `+inf` when `a > 0` and
/// `-inf` otherwise (including `0 / 0`).
pub fn divorinf(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        if a > 0.0 { ::std::f64::INFINITY } else { ::std::f64::NEG_INFINITY }
    } else {
        a / b
    }
}

/// Numerically stable softmax of a sequence.
pub fn softmax(xs: &[f64]) -> Vec<f64> {
    let mut out = xs.to_vec();
    softmax_in_place(&mut out);
    out
}

pub fn softmax_in_place(xs: &mut [f64]) {
    let n = xs.len();
    if n == 0 {
        return;
    }
    let max = kernel::dmax(n, xs, 1);
    kernel::daxpy(n, -1.0, &[max], 0, xs, 1);
    kernel::dexp(n, xs, 1);
    let sum = kernel::dsum(n, xs, 1);
    kernel::dscal(n, 1.0 / sum, xs, 1);
}

impl<S: AsRef<[f64]>> VectorBase<S> {
    #[cfg_attr(feature = "nightly", must_use = "not an in-place operation!")]
    pub fn softmax(&self) -> Vector {
        Vector::from(softmax(self.as_slice()))
    }
}

impl<S: AsRef<[f64]> + AsMut<[f64]>> VectorBase<S> {
    pub fn softmax_mut(&mut self) -> &mut Self {
        softmax_in_place(self.as_mut_slice());
        self
    }
}

impl Matrix {
    /// Softmax of each row.
    #[cfg_attr(feature = "nightly", must_use = "not an in-place operation!")]
    pub fn softmax_rows(&self) -> Matrix {
        let mut out = self.copy();
        out.softmax_rows_mut();
        out
    }

    pub fn softmax_rows_mut(&mut self) -> &mut Self {
        let nrows = self.nrows();
        let maxs = self.rowmaxs();
        for mut col in self.columns_mut() {
            kernel::daxpy(nrows, -1.0, maxs.as_slice(), 1, col.as_mut_slice(), 1);
        }

        let len = self.len();
        kernel::dexp(len, self.as_mut_slice(), 1);

        let scales = self.rowsums().power_elements(-1.0);
        for mut col in self.columns_mut() {
            kernel::dhad(nrows, col.as_mut_slice(), 1, scales.as_slice(), 1);
        }
        self
    }
}

/// Elementwise ternary select on the sign of `c`.
///
/// Each output element is taken from `p` where `c > 0`, from `z` where
/// `c == 0`, and from `n` elsewhere.  Each of `p`, `z`, `n` is either a
/// scalar or has the same shape as `c`.  The output has the type of `c`.
pub fn sign<'p, 'z, 'n, C: Container>(
    c: &C,
    p: impl Into<Operand<'p>>,
    z: impl Into<Operand<'z>>,
    n: impl Into<Operand<'n>>,
) -> Result<C::Owned> {
    let cond = c.operand();
    let (p, z, n) = (p.into(), z.into(), n.into());
    for arg in &[p, z, n] {
        match arg {
            Operand::Scalar(_) => {},
            _ if arg.shape() == cond.shape() => {},
            _ => return Err(shape_mismatch("sign", cond.shape(), arg.shape())),
        }
    }

    let (cond_data, _) = cond.strided();
    let mut out = vec![0.0; cond_data.len()];
    kernel::dsign(&mut out, cond.strided(), p.strided(), z.strided(), n.strided());
    Ok(c.with_data(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use ::std::f64::{INFINITY, NEG_INFINITY};

    #[test]
    fn divorinf_cases() {
        assert_eq!(divorinf(1.0, 2.0), 0.5);
        assert_eq!(divorinf(1.0, 0.0), INFINITY);
        assert_eq!(divorinf(-1.0, 0.0), NEG_INFINITY);
        assert_eq!(divorinf(0.0, 0.0), NEG_INFINITY);
    }

    #[test]
    fn softmax_values() {
        let expected = vector![0.0417725705, 0.1135496194, 0.0056533027, 0.8390245075];
        assert_eq!(Vector::from(softmax(&[1.0, 2.0, -1.0, 4.0])).round(10), expected);
        assert_eq!(vector![1.0, 2.0, -1.0, 4.0].softmax().round(10), expected);

        let mut v = vector![1.0, 2.0, -1.0, 4.0];
        v.softmax_mut();
        assert_eq!(v.round(10), expected);

        assert!(softmax(&[]).is_empty());
    }

    #[test]
    fn softmax_is_shift_invariant() {
        // would overflow without subtracting the max
        let big = vector![1000.0, 1001.0];
        let small = vector![0.0, 1.0];
        assert_eq!(big.softmax().round(12), small.softmax().round(12));
    }

    #[test]
    fn softmax_rows_values() {
        let a = Matrix::from_rows(&[[1.0, 2.0, -1.0, 4.0], [2.0, 3.0, -2.0, 4.0]]).unwrap();
        let expected = Matrix::from_rows(&[
            [0.0417725705, 0.1135496194, 0.0056533027, 0.8390245075],
            [0.0898823601, 0.2443255861, 0.0016462528, 0.664145801],
        ]).unwrap();
        assert_eq!(a.softmax_rows().round(10), expected);
        assert_eq!(a.to_rows()[0], vec![1.0, 2.0, -1.0, 4.0]);
    }

    #[test]
    fn sign_with_scalars() {
        let c = vector![1.0, -1.0, 0.0, -1.0, 0.0, 1.0];
        assert_eq!(sign(&c, 10.0, 20.0, 30.0).unwrap(), vector![10, 30, 20, 30, 20, 10]);
    }

    #[test]
    fn sign_with_containers() {
        let c = Matrix::from_rows(&[[1.0, 0.0], [-1.0, 2.0]]).unwrap();
        let p = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let out = sign(&c, &p, 0.0, -1.0).unwrap();
        assert_eq!(out, Matrix::from_rows(&[[1.0, 0.0], [-1.0, 4.0]]).unwrap());
    }

    #[test]
    fn sign_shape_mismatch() {
        let c = vector![1, 2, 3];
        assert!(match sign(&c, &vector![1, 2], 0.0, 0.0) {
            Err(Error::ShapeMismatch { .. }) => true,
            _ => false,
        });
        let m = Matrix::new(3, 1);
        assert!(sign(&c, 0.0, &m, 0.0).is_err());
    }
}
