/* ************************************************************************ **
** This file is part of dlin, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! LAPACKe calls, column-major only.
//!
//! lapacke hates size-zero arrays, so none of these may be called with an
//! empty matrix; the decompositions in `dlin-linalg` short-circuit those.

use crate::{leading_dim, KernelError};
use ::lapacke::Layout;

const LAYOUT: Layout = Layout::ColumnMajor;

fn check(routine: &'static str, info: i32) -> Result<(), KernelError> {
    match info {
        0 => Ok(()),
        info => {
            debug!("{} failed with info = {}", routine, info);
            Err(KernelError { routine, info })
        },
    }
}

/// Rank-revealing QR with column pivoting of the `m x n` matrix in `a`.
///
/// On entry `jpvt` must be all zeros (every column free to move).  On exit
/// `a` holds R in its upper triangle and the Householder vectors below it,
/// `tau` holds the `min(m, n)` reflector scales, and `jpvt[j]` is the
/// ONE-based index of the original column now at position `j`.
pub fn dgeqp3(m: usize, n: usize, a: &mut [f64], jpvt: &mut [i32], tau: &mut [f64]) -> Result<(), KernelError> {
    assert!(m > 0 && n > 0, "(BUG) dgeqp3 on empty matrix");
    assert_eq!(a.len(), m * n);
    assert_eq!(jpvt.len(), n);
    assert_eq!(tau.len(), usize::min(m, n));
    trace!("dgeqp3: m = {}, n = {}", m, n);

    let info = unsafe { ::lapacke::dgeqp3(LAYOUT, m as i32, n as i32, a, leading_dim(m), jpvt, tau) };
    check("dgeqp3", info)
}

/// Overwrites the leading `n` columns of `a` (leading dimension `m`) with
/// the explicit orthonormal factor built from `k` reflectors left there by
/// [`dgeqp3`].
pub fn dorgqr(m: usize, n: usize, k: usize, a: &mut [f64], tau: &[f64]) -> Result<(), KernelError> {
    assert!(m > 0 && n > 0, "(BUG) dorgqr on empty matrix");
    assert!(k <= n && n <= m);
    assert!(a.len() >= m * n);
    assert_eq!(tau.len(), k);
    trace!("dorgqr: m = {}, n = {}, k = {}", m, n, k);

    let info = unsafe { ::lapacke::dorgqr(LAYOUT, m as i32, n as i32, k as i32, a, leading_dim(m), tau) };
    check("dorgqr", info)
}

/// What [`dsyev`] should compute.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EigenJob {
    ValuesOnly,
    ValuesAndVectors,
}

/// Symmetric eigensolver.  Only the upper triangle of `a` is read.
///
/// Eigenvalues land in `w` in ascending order.  With
/// [`EigenJob::ValuesAndVectors`], column `j` of `a` is overwritten with the
/// eigenvector for `w[j]`; otherwise the contents of `a` are destroyed.
pub fn dsyev(job: EigenJob, n: usize, a: &mut [f64], w: &mut [f64]) -> Result<(), KernelError> {
    assert!(n > 0, "(BUG) dsyev on empty matrix");
    assert_eq!(a.len(), n * n);
    assert_eq!(w.len(), n);
    trace!("dsyev: n = {}, job = {:?}", n, job);

    let jobz = match job {
        EigenJob::ValuesOnly => b'N',
        EigenJob::ValuesAndVectors => b'V',
    };
    let info = unsafe { ::lapacke::dsyev(LAYOUT, jobz, b'U', n as i32, a, leading_dim(n), w) };
    check("dsyev", info)
}

/// Minimum-norm solution of `min |A X - B|` using a complete orthogonal
/// factorization.  Singular directions below `rcond` (relative to the largest)
/// are treated as rank deficiency.
///
/// `b` is `ldb x nrhs` with `ldb >= max(m, n)`; on exit its leading `n` rows
/// hold the solution.  Returns the effective rank of `a`.
pub fn dgelsy(
    m: usize,
    n: usize,
    nrhs: usize,
    a: &mut [f64],
    b: &mut [f64],
    ldb: usize,
    rcond: f64,
) -> Result<usize, KernelError> {
    assert!(m > 0 && n > 0 && nrhs > 0, "(BUG) dgelsy on empty system");
    assert_eq!(a.len(), m * n);
    assert!(ldb >= usize::max(m, n));
    assert_eq!(b.len(), ldb * nrhs);
    trace!("dgelsy: m = {}, n = {}, nrhs = {}, rcond = {:e}", m, n, nrhs, rcond);

    let mut jpvt = vec![0; n];
    let mut rank = 0;
    let info = unsafe {
        ::lapacke::dgelsy(
            LAYOUT, m as i32, n as i32, nrhs as i32,
            a, leading_dim(m),
            b, ldb as i32,
            &mut jpvt, rcond, &mut rank,
        )
    };
    check("dgelsy", info)?;
    Ok(rank as usize)
}
