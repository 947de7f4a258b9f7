/* ************************************************************************ **
** This file is part of dlin, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Dense `f64` vectors and column-major matrices, with the decompositions
//! and least squares solvers built on them.
//!
//! Storage is either owned ([`Vector`], [`Matrix`]) or borrowed
//! ([`VectorView`], [`VectorViewMut`], matrix columns).  Views are ordinary
//! borrows, so a view can never outlive the buffer it looks at.
//!
//! Fallible operations are named methods returning [`Result`].  The
//! operator overloads (`&a + &b`, `2.0 * &v`, ...) call those methods and
//! panic on error.

#[macro_use]
extern crate log;

#[macro_use]
mod ids;
#[macro_use]
mod vector;

mod decomp;
mod errors;
mod matrix;
mod operand;
mod solve;
mod tabular;
mod transform;

pub use crate::decomp::{decompose_qrp, eigen_system_symmetric, eigen_values_symmetric, Pivot, Qrp};
pub use crate::errors::{Error, Result};
pub use crate::ids::Ids;
pub use crate::matrix::{Columns, ColumnsMut, Matrix};
pub use crate::operand::{Container, Operand, Shape};
pub use crate::solve::{solve_linear_equation, solve_linear_equation_with, LeastSquaresRhs};
pub use crate::solve::{solve_multiple_weighted_least_squares, solve_weighted_least_squares};
pub use crate::tabular::{Cell, TabularSource};
pub use crate::transform::{divorinf, sign, softmax, softmax_in_place};
pub use crate::vector::{Vector, VectorBase, VectorView, VectorViewMut};
