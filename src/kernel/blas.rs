/* ************************************************************************ **
** This file is part of dlin, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{check_strided, leading_dim};
use ::cblas::{Layout, Transpose};

const LAYOUT: Layout = Layout::ColumnMajor;

/// Sum of absolute values.
pub fn dasum(n: usize, x: &[f64], incx: usize) -> f64 {
    check_strided("dasum", n, x, incx);
    unsafe { ::cblas::dasum(n as i32, x, incx as i32) }
}

/// Euclidean norm.
pub fn dnrm2(n: usize, x: &[f64], incx: usize) -> f64 {
    check_strided("dnrm2", n, x, incx);
    unsafe { ::cblas::dnrm2(n as i32, x, incx as i32) }
}

pub fn ddot(n: usize, x: &[f64], incx: usize, y: &[f64], incy: usize) -> f64 {
    check_strided("ddot", n, x, incx);
    check_strided("ddot", n, y, incy);
    if incy == 0 && n > 0 {
        return (0..n).map(|i| x[i * incx]).sum::<f64>() * y[0];
    }
    if incx == 0 && n > 0 {
        return (0..n).map(|i| y[i * incy]).sum::<f64>() * x[0];
    }
    unsafe { ::cblas::ddot(n as i32, x, incx as i32, y, incy as i32) }
}

/// Plain sum, computed as a dot product against a broadcast `1.0`.
pub fn dsum(n: usize, x: &[f64], incx: usize) -> f64 {
    ddot(n, x, incx, &[1.0], 0)
}

// Some OpenBLAS kernels mishandle an increment of 0, so broadcasts of a
// single element never reach them.
fn broadcast(n: usize, x: &[f64], incx: usize, y: &mut [f64], incy: usize, f: impl Fn(&mut f64, f64)) {
    debug_assert_eq!(incx, 0);
    for i in 0..n {
        f(&mut y[i * incy], x[0]);
    }
}

/// `x *= alpha`
pub fn dscal(n: usize, alpha: f64, x: &mut [f64], incx: usize) {
    check_strided("dscal", n, x, incx);
    unsafe { ::cblas::dscal(n as i32, alpha, x, incx as i32) }
}

/// `y += alpha * x`
pub fn daxpy(n: usize, alpha: f64, x: &[f64], incx: usize, y: &mut [f64], incy: usize) {
    check_strided("daxpy", n, x, incx);
    check_strided("daxpy", n, y, incy);
    if incx == 0 {
        return broadcast(n, x, incx, y, incy, |y, x| *y += alpha * x);
    }
    unsafe { ::cblas::daxpy(n as i32, alpha, x, incx as i32, y, incy as i32) }
}

/// `y = x`
pub fn dcopy(n: usize, x: &[f64], incx: usize, y: &mut [f64], incy: usize) {
    check_strided("dcopy", n, x, incx);
    check_strided("dcopy", n, y, incy);
    if incx == 0 {
        return broadcast(n, x, incx, y, incy, |y, x| *y = x);
    }
    unsafe { ::cblas::dcopy(n as i32, x, incx as i32, y, incy as i32) }
}

/// Rank-1 update `a += alpha * x yᵗ` of the `m x n` column-major `a`.
pub fn dger(m: usize, n: usize, alpha: f64, x: &[f64], y: &[f64], a: &mut [f64]) {
    if m == 0 || n == 0 {
        return;
    }
    check_strided("dger", m, x, 1);
    check_strided("dger", n, y, 1);
    assert_eq!(a.len(), m * n, "(BUG) dger: output has wrong size");
    unsafe {
        ::cblas::dger(LAYOUT, m as i32, n as i32, alpha, x, 1, y, 1, a, leading_dim(m))
    }
}

/// Whether an operand of [`dgemm`] is read transposed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Trans { No, Yes }

impl Trans {
    fn cblas(self) -> Transpose {
        match self {
            Trans::No => Transpose::None,
            Trans::Yes => Transpose::Ordinary,
        }
    }
}

/// Stored shape of a column-major operand, before any transposition.
#[derive(Debug, Copy, Clone)]
pub struct Stored<'a> {
    pub data: &'a [f64],
    pub nrows: usize,
    pub ncols: usize,
    pub trans: Trans,
}

impl<'a> Stored<'a> {
    pub fn new(data: &'a [f64], nrows: usize, ncols: usize) -> Self {
        Stored { data, nrows, ncols, trans: Trans::No }
    }

    pub fn t(self) -> Self {
        let trans = match self.trans {
            Trans::No => Trans::Yes,
            Trans::Yes => Trans::No,
        };
        Stored { trans, ..self }
    }

    /// Shape after applying `trans`.
    pub fn op_dims(&self) -> (usize, usize) {
        match self.trans {
            Trans::No => (self.nrows, self.ncols),
            Trans::Yes => (self.ncols, self.nrows),
        }
    }
}

/// `c = op(a) op(b)`, where `c` is column-major with shape `(op(a).rows, op(b).cols)`.
pub fn dgemm(a: Stored<'_>, b: Stored<'_>, c: &mut [f64]) {
    let (m, k) = a.op_dims();
    let (kb, n) = b.op_dims();
    assert_eq!(k, kb, "(BUG) dgemm: inner dimensions differ");
    assert_eq!(c.len(), m * n, "(BUG) dgemm: output has wrong size");
    assert_eq!(a.data.len(), a.nrows * a.ncols, "(BUG) dgemm: bad lhs buffer");
    assert_eq!(b.data.len(), b.nrows * b.ncols, "(BUG) dgemm: bad rhs buffer");

    if m == 0 || n == 0 {
        return;
    }
    if k == 0 {
        // empty inner product; BLAS would scale c by beta, do it directly
        for x in c.iter_mut() { *x = 0.0; }
        return;
    }

    unsafe {
        ::cblas::dgemm(
            LAYOUT, a.trans.cblas(), b.trans.cblas(),
            m as i32, n as i32, k as i32,
            1.0, a.data, leading_dim(a.nrows),
            b.data, leading_dim(b.nrows),
            0.0, c, leading_dim(m),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_stride_broadcasts() {
        let mut y = vec![1.0, 2.0, 3.0];
        daxpy(3, 1.0, &[10.0], 0, &mut y, 1);
        assert_eq!(y, vec![11.0, 12.0, 13.0]);
        assert_eq!(dsum(3, &y, 1), 36.0);

        dcopy(2, &[4.0], 0, &mut y, 2);
        assert_eq!(y, vec![4.0, 12.0, 4.0]);
        assert_eq!(ddot(0, &[], 1, &[1.0], 0), 0.0);
    }

    #[test]
    fn strided_row_access() {
        // 2x3 column-major [[1, 2, 3], [4, 5, 6]]
        let a = [1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
        assert_eq!(dsum(3, &a[0..], 2), 6.0);
        assert_eq!(dsum(3, &a[1..], 2), 15.0);
        assert_eq!(dasum(2, &[-1.0, 2.0], 1), 3.0);
    }

    #[test]
    fn gemm_transposed_lhs() {
        // aᵗ b with a = 2x3 as above, b = [1, 1]ᵗ
        let a = [1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
        let b = [1.0, 1.0];
        let mut c = vec![0.0; 3];
        dgemm(Stored::new(&a, 2, 3).t(), Stored::new(&b, 2, 1), &mut c);
        assert_eq!(c, vec![5.0, 7.0, 9.0]);
    }

    #[test]
    fn gemm_empty_inner_dimension() {
        let mut c = vec![f64::NAN; 4];
        dgemm(Stored::new(&[], 2, 0), Stored::new(&[], 0, 2), &mut c);
        assert_eq!(c, vec![0.0; 4]);
    }
}
