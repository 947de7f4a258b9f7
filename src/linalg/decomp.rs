/* ************************************************************************ **
** This file is part of dlin, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Decompositions.  Inputs are copied before LAPACK overwrites anything.

use crate::errors::shape_mismatch;
use crate::operand::Shape;
use crate::{Ids, Matrix, Result, Vector};
use ::dlin_kernel as kernel;
use ::dlin_kernel::EigenJob;

/// A column permutation, zero-based.
///
/// `pivot[j]` is the index of the original column that was moved to
/// position `j`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pivot(Vec<usize>);

impl Pivot {
    pub fn identity(n: usize) -> Self { Pivot((0..n).collect()) }

    pub fn as_slice(&self) -> &[usize] { &self.0 }
    pub fn into_vec(self) -> Vec<usize> { self.0 }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// The permutation that undoes this one.
    ///
    /// `m.project(&pivot).project(&pivot.inverse()) == m`
    pub fn inverse(&self) -> Pivot {
        let mut out = vec![0; self.0.len()];
        for (dest, &src) in self.0.iter().enumerate() {
            out[src] = dest;
        }
        Pivot(out)
    }
}

impl<'a> From<&'a Pivot> for Ids {
    fn from(pivot: &'a Pivot) -> Ids { Ids::from(pivot.as_slice()) }
}

impl From<Pivot> for Ids {
    fn from(pivot: Pivot) -> Ids { Ids::from(&pivot) }
}

/// Output of [`decompose_qrp`].
#[derive(Debug, Clone)]
pub struct Qrp {
    /// `m x k` with orthonormal columns, where `k = min(m, n)`.
    pub q: Matrix,
    /// `k x n`, upper triangular.
    pub r: Matrix,
    pub pivot: Pivot,
}

/// Column-pivoted QR decomposition of an `m x n` matrix.
///
/// `Q R` equals `a` with its columns permuted by `pivot`; that is,
/// column `j` of `Q R` is column `pivot[j]` of `a`.
pub fn decompose_qrp(a: &Matrix) -> Result<Qrp> {
    let (m, n) = a.dims();
    let k = usize::min(m, n);
    if k == 0 {
        return Ok(Qrp {
            q: Matrix::new(m, 0),
            r: Matrix::new(0, n),
            pivot: Pivot::identity(n),
        });
    }

    let mut work = a.copy();
    let mut jpvt = vec![0; n];
    let mut tau = vec![0.0; k];
    kernel::dgeqp3(m, n, work.as_mut_slice(), &mut jpvt, &mut tau)?;

    // LAPACK leaves a zero where a column never moved
    let pivot = Pivot({
        jpvt.iter().enumerate()
            .map(|(pos, &j)| match j {
                0 => pos,
                j => j as usize - 1,
            })
            .collect()
    });

    let mut r = Matrix::new(k, n);
    for j in 0..n {
        for i in 0..=usize::min(j, k - 1) {
            r[(i, j)] = work[(i, j)];
        }
    }

    kernel::dorgqr(m, k, k, work.as_mut_slice(), &tau)?;
    let q = work.resize(m, k, None);

    Ok(Qrp { q, r, pivot })
}

/// Eigenvalues (ascending) and eigenvectors (as columns) of a symmetric matrix.
///
/// Only the upper triangle of `a` is read; symmetry is not checked.
pub fn eigen_system_symmetric(a: &Matrix) -> Result<(Vector, Matrix)> {
    eigen_symmetric(a, EigenJob::ValuesAndVectors)
}

/// Eigenvalues (ascending) of a symmetric matrix.
pub fn eigen_values_symmetric(a: &Matrix) -> Result<Vector> {
    eigen_symmetric(a, EigenJob::ValuesOnly).map(|(values, _)| values)
}

fn eigen_symmetric(a: &Matrix, job: EigenJob) -> Result<(Vector, Matrix)> {
    if !a.is_square() {
        return Err(shape_mismatch("eigen_system_symmetric", "a square matrix", Shape::Matrix(a.nrows(), a.ncols())));
    }
    let n = a.nrows();
    if n == 0 {
        return Ok((Vector::new(0), Matrix::new(0, 0)));
    }

    let mut work = a.copy();
    let mut values = Vector::new(n);
    kernel::dsyev(job, n, work.as_mut_slice(), values.as_mut_slice())?;
    Ok((values, work))
}
