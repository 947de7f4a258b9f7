/* ************************************************************************ **
** This file is part of dlin, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! The numeric backend underneath `dlin-linalg`.
//!
//! Everything here works on raw column-major `f64` buffers described by
//! `(n, slice, inc)` triples, which is how BLAS wants them.  A stride of `0`
//! broadcasts the first element of the slice, so a scalar operand can be
//! passed as `(&[x], 0)`.
//!
//! BLAS and LAPACK come from OpenBLAS (via `lapack-src`).  The handful of
//! elementwise operations those libraries do not provide live in `native`.

extern crate lapack_src;
#[macro_use]
extern crate log;

pub use crate::blas::*;
mod blas;

pub use crate::lapack::*;
mod lapack;

pub use crate::native::*;
mod native;

/// A LAPACK routine returned a non-zero `info`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{routine} returned info = {info}")]
pub struct KernelError {
    pub routine: &'static str,
    pub info: i32,
}

/// Leading dimension for a column-major buffer with `nrows` rows.
///
/// BLAS and LAPACK both reject `ld < 1`, even for empty matrices.
#[inline]
pub fn leading_dim(nrows: usize) -> i32 { usize::max(nrows, 1) as i32 }

// (BUG) checks; a failure here means a caller computed a bad stride.
#[inline]
fn check_strided(routine: &str, n: usize, x: &[f64], inc: usize) {
    if n > 0 {
        assert!(
            x.len() > (n - 1) * inc,
            "(BUG) {}: slice of length {} too short for n = {}, inc = {}",
            routine, x.len(), n, inc,
        );
    }
}
