/* ************************************************************************ **
** This file is part of dlin, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{Matrix, Vector, VectorBase};
use ::std::fmt;

/// Right-hand side of an elementwise operation.
///
/// Methods like `add_mut` accept `impl Into<Operand>` so that one method
/// covers both the scalar and the container case; which kinds are legal is
/// up to each method.
#[derive(Debug, Copy, Clone)]
pub enum Operand<'a> {
    Scalar(f64),
    Vector(&'a [f64]),
    Matrix {
        data: &'a [f64],
        nrows: usize,
        ncols: usize,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    Vector(usize),
    Matrix(usize, usize),
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Shape::Scalar => write!(f, "scalar"),
            Shape::Vector(len) => write!(f, "vector of length {}", len),
            Shape::Matrix(r, c) => write!(f, "{}x{} matrix", r, c),
        }
    }
}

impl<'a> Operand<'a> {
    pub fn shape(&self) -> Shape {
        match *self {
            Operand::Scalar(_) => Shape::Scalar,
            Operand::Vector(data) => Shape::Vector(data.len()),
            Operand::Matrix { nrows, ncols, .. } => Shape::Matrix(nrows, ncols),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Operand::Scalar(_) => "scalar",
            Operand::Vector(_) => "vector",
            Operand::Matrix { .. } => "matrix",
        }
    }

    /// Data and stride in the form the kernels take.  Scalars broadcast
    /// with stride 0.
    pub(crate) fn strided(&self) -> (&[f64], usize) {
        match self {
            Operand::Scalar(x) => (::std::slice::from_ref(x), 0),
            Operand::Vector(data) => (*data, 1),
            Operand::Matrix { data, .. } => (*data, 1),
        }
    }
}

impl From<f64> for Operand<'static> {
    fn from(x: f64) -> Self { Operand::Scalar(x) }
}

impl<'a, S: AsRef<[f64]>> From<&'a VectorBase<S>> for Operand<'a> {
    fn from(v: &'a VectorBase<S>) -> Self { Operand::Vector(v.as_slice()) }
}

impl<'a> From<&'a Matrix> for Operand<'a> {
    fn from(m: &'a Matrix) -> Self {
        Operand::Matrix {
            data: m.as_slice(),
            nrows: m.nrows(),
            ncols: m.ncols(),
        }
    }
}

/// Something with a shape that can be rebuilt around new data of that shape.
///
/// Lets shape-preserving functions like [`sign`](crate::sign) return a
/// `Vector` for vector input and a `Matrix` for matrix input.
pub trait Container {
    type Owned;

    fn operand(&self) -> Operand<'_>;

    /// `data` has the same length as `self`.
    fn with_data(&self, data: Vec<f64>) -> Self::Owned;
}

impl<S: AsRef<[f64]>> Container for VectorBase<S> {
    type Owned = Vector;

    fn operand(&self) -> Operand<'_> { self.into() }

    fn with_data(&self, data: Vec<f64>) -> Vector {
        assert_eq!(data.len(), self.len());
        Vector::from(data)
    }
}

impl Container for Matrix {
    type Owned = Matrix;

    fn operand(&self) -> Operand<'_> { self.into() }

    fn with_data(&self, data: Vec<f64>) -> Matrix {
        Matrix::from_parts(self.nrows(), self.ncols(), data)
    }
}
