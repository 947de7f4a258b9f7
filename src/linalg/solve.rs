/* ************************************************************************ **
** This file is part of dlin, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::errors::shape_mismatch;
use crate::{Matrix, Result, Vector, VectorBase, VectorView};
use ::dlin_config::LeastSquares;
use ::dlin_kernel as kernel;

/// Right-hand side of [`solve_linear_equation`]: one column (a vector) or
/// several (a matrix).  The solution has the same kind.
pub trait LeastSquaresRhs {
    type Solution;

    /// `(rows, columns)`
    fn rhs_dims(&self) -> (usize, usize);

    /// Column-major.
    fn rhs_data(&self) -> &[f64];

    fn solution_from(nrows: usize, ncols: usize, data: Vec<f64>) -> Self::Solution;
}

impl<S: AsRef<[f64]>> LeastSquaresRhs for VectorBase<S> {
    type Solution = Vector;

    fn rhs_dims(&self) -> (usize, usize) { (self.len(), 1) }
    fn rhs_data(&self) -> &[f64] { self.as_slice() }
    fn solution_from(_: usize, _: usize, data: Vec<f64>) -> Vector { Vector::from(data) }
}

impl LeastSquaresRhs for Matrix {
    type Solution = Matrix;

    fn rhs_dims(&self) -> (usize, usize) { self.dims() }
    fn rhs_data(&self) -> &[f64] { self.as_slice() }
    fn solution_from(nrows: usize, ncols: usize, data: Vec<f64>) -> Matrix {
        Matrix::from_parts(nrows, ncols, data)
    }
}

/// Minimum-norm least squares solution `x` of `a x = b`.
///
/// Works for over-, under-, and exactly determined systems.  Directions in
/// which `a` is singular to within [`DEFAULT_RCOND`] are dropped.
///
/// `b` must have at least as many rows as `a`; any extra rows are ignored.
/// The solution has `a.ncols()` rows.
///
/// [`DEFAULT_RCOND`]: ::dlin_config::DEFAULT_RCOND
pub fn solve_linear_equation<B: LeastSquaresRhs>(a: &Matrix, b: &B) -> Result<B::Solution> {
    solve_linear_equation_with(&LeastSquares::default(), a, b)
}

/// [`solve_linear_equation`] with an explicit rank threshold.
pub fn solve_linear_equation_with<B: LeastSquaresRhs>(
    settings: &LeastSquares,
    a: &Matrix,
    b: &B,
) -> Result<B::Solution> {
    let (m, n) = a.dims();
    let (b_rows, nrhs) = b.rhs_dims();
    if b_rows < m {
        return Err(shape_mismatch("solve_linear_equation", format!("at least {} rows", m), format!("{} rows", b_rows)));
    }

    let mut x = vec![0.0; n * nrhs];
    if m == 0 || n == 0 || nrhs == 0 {
        // nothing to fit; the minimum norm solution is zero
        return Ok(B::solution_from(n, nrhs, x));
    }

    // dgelsy solves in place, so B needs room for the n rows of the solution
    let ldb = usize::max(n, b_rows);
    let mut work_b = vec![0.0; ldb * nrhs];
    for (src, dest) in b.rhs_data().chunks(b_rows).zip(work_b.chunks_mut(ldb)) {
        dest[..b_rows].copy_from_slice(src);
    }
    let mut work_a = a.copy();

    let rank = kernel::dgelsy(m, n, nrhs, work_a.as_mut_slice(), &mut work_b, ldb, settings.rcond)?;
    debug!("solve_linear_equation: {}x{} system has effective rank {}", m, n, rank);

    for (src, dest) in work_b.chunks(ldb).zip(x.chunks_mut(n)) {
        dest.copy_from_slice(&src[..n]);
    }
    Ok(B::solution_from(n, nrhs, x))
}

/// Minimize `(y - a x)ᵗ diag(w) (y - a x)`.
///
/// Without weights this is ordinary least squares.  Weights are taken as a
/// view, so a column of a weight matrix can be passed without copying.
pub fn solve_weighted_least_squares<S: AsRef<[f64]>>(
    y: &VectorBase<S>,
    a: &Matrix,
    w: Option<VectorView<'_>>,
) -> Result<Vector> {
    let op = "solve_weighted_least_squares";
    if y.len() != a.nrows() {
        return Err(shape_mismatch(op, format!("{} observations", a.nrows()), y.len()));
    }

    match w {
        None => solve_linear_equation(a, y),
        Some(w) => {
            if w.len() != a.nrows() {
                return Err(shape_mismatch(op, format!("{} weights", a.nrows()), w.len()));
            }
            // |√W (y - A x)|² is the weighted objective
            let sqrt_w = w.power_elements(0.5);
            let y = y.hadamard(&sqrt_w)?;
            let a = a.mul_rows(&sqrt_w)?;
            solve_linear_equation(&a, &y)
        },
    }
}

/// One weighted least squares fit per column of `y` (and `w`), all sharing
/// the design matrix `a`.
///
/// Returns an `a.ncols() x y.ncols()` matrix of coefficients.  Missing
/// weights are all ones.
pub fn solve_multiple_weighted_least_squares(
    y: &Matrix,
    a: &Matrix,
    w: Option<&Matrix>,
) -> Result<Matrix> {
    let op = "solve_multiple_weighted_least_squares";
    if let Some(w) = w {
        if w.dims() != y.dims() {
            return Err(shape_mismatch(op, format!("{}x{} weights", y.nrows(), y.ncols()), format!("{}x{}", w.nrows(), w.ncols())));
        }
    }

    let ones = Vector::from(vec![1.0; y.nrows()]);
    let mut out = Matrix::new(a.ncols(), y.ncols());
    for (j, mut dest) in out.columns_mut().enumerate() {
        let j = j as isize;
        let weights = match w {
            Some(w) => w.column(j)?,
            None => ones.view(),
        };
        let x = solve_weighted_least_squares(&y.column(j)?, a, Some(weights))?;
        dest.fill(&x)?;
    }
    Ok(out)
}
