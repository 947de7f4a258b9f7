/* ************************************************************************ **
** This file is part of dlin, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::errors::{or_panic, shape_mismatch};
use crate::ids::{check_index, normalize_index};
use crate::operand::Shape;
use crate::vector::bitwise_eq;
use crate::{Error, Ids, Operand, Result};
use crate::{Vector, VectorBase, VectorView, VectorViewMut};
use ::dlin_kernel as kernel;
use ::dlin_kernel::Stored;
use ::std::fmt;
use ::std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

/// Dense `nrows x ncols` matrix in column-major order.
///
/// Element `(i, j)` lives at `i + j * nrows`, so every column is a
/// contiguous run of the buffer and can be borrowed as a [`VectorView`].
#[derive(Debug, Clone, Default)]
pub struct Matrix {
    // invariant: data.len() == nrows * ncols
    data: Vec<f64>,
    nrows: usize,
    ncols: usize,
}

//------------------------
// construction

impl Matrix {
    /// Zero-filled.
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Matrix { data: vec![0.0; nrows * ncols], nrows, ncols }
    }

    pub fn from_column_major(nrows: usize, ncols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != nrows * ncols {
            return Err(shape_mismatch("from_column_major", format!("length {}", nrows * ncols), data.len()));
        }
        Ok(Matrix { data, nrows, ncols })
    }

    pub(crate) fn from_parts(nrows: usize, ncols: usize, data: Vec<f64>) -> Self {
        assert_eq!(data.len(), nrows * ncols, "(BUG) matrix buffer has wrong length");
        Matrix { data, nrows, ncols }
    }

    /// Build from a sequence of rows, which must all have the same length.
    ///
    /// No rows gives a `0 x 0` matrix.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        if let Some(bad) = rows.iter().find(|r| r.as_ref().len() != ncols) {
            return Err(shape_mismatch("from_rows", format!("rows of length {}", ncols), format!("a row of length {}", bad.as_ref().len())));
        }

        let mut out = Matrix::new(nrows, ncols);
        for (i, row) in rows.iter().enumerate() {
            kernel::dcopy(ncols, row.as_ref(), 1, out.row_strided_mut(i), nrows);
        }
        Ok(out)
    }

    pub fn identity(n: usize) -> Self {
        let mut out = Matrix::new(n, n);
        kernel::dcopy(n, &[1.0], 0, &mut out.data, n + 1);
        out
    }

    /// Square matrix with `v` on the diagonal.
    pub fn from_diag<S: AsRef<[f64]>>(v: &VectorBase<S>) -> Self {
        let n = v.len();
        let mut out = Matrix::new(n, n);
        kernel::dcopy(n, v.as_slice(), 1, &mut out.data, n + 1);
        out
    }
}

//------------------------
// storage and shape

impl Matrix {
    pub fn nrows(&self) -> usize { self.nrows }
    pub fn ncols(&self) -> usize { self.ncols }
    pub fn dims(&self) -> (usize, usize) { (self.nrows, self.ncols) }
    pub fn len(&self) -> usize { self.data.len() }
    pub fn is_empty(&self) -> bool { self.data.is_empty() }
    pub fn is_square(&self) -> bool { self.nrows == self.ncols }

    pub fn as_slice(&self) -> &[f64] { &self.data }
    pub fn as_mut_slice(&mut self) -> &mut [f64] { &mut self.data }

    #[cfg_attr(feature = "nightly", must_use = "not an in-place operation!")]
    pub fn copy(&self) -> Matrix { self.clone() }

    /// The whole buffer as a vector, in column-major order.
    pub fn to_vector(&self) -> VectorView<'_> { VectorView::from(&self.data[..]) }

    /// Writing through the returned view writes this matrix.
    pub fn to_vector_mut(&mut self) -> VectorViewMut<'_> { VectorViewMut::from(&mut self.data[..]) }

    pub fn into_vector(self) -> Vector { Vector::from(self.data) }

    /// Copy into a fresh `nrows x ncols` buffer.
    ///
    /// The buffer is filled with `fill` (zero if `None`), and then the block
    /// the two shapes have in common is copied over column by column.
    #[cfg_attr(feature = "nightly", must_use = "not an in-place operation!")]
    pub fn resize(&self, nrows: usize, ncols: usize, fill: Option<f64>) -> Matrix {
        let mut out = Matrix { data: vec![fill.unwrap_or(0.0); nrows * ncols], nrows, ncols };
        let common_rows = usize::min(nrows, self.nrows);
        for j in 0..usize::min(ncols, self.ncols) {
            let src = &self.data[j * self.nrows..][..common_rows];
            out.data[j * nrows..][..common_rows].copy_from_slice(src);
        }
        out
    }

    fn offset(&self, i: isize, j: isize) -> Result<usize> {
        let i = normalize_index(i, self.nrows)?;
        let j = normalize_index(j, self.ncols)?;
        Ok(i + j * self.nrows)
    }

    /// Negative indices count from the end of each dimension.
    pub fn get(&self, i: isize, j: isize) -> Result<f64> {
        Ok(self.data[self.offset(i, j)?])
    }

    /// Negative indices count from the end of each dimension.
    pub fn set(&mut self, i: isize, j: isize, value: f64) -> Result<()> {
        let k = self.offset(i, j)?;
        self.data[k] = value;
        Ok(())
    }

    /// Borrow column `j`.  Negative indices count from the end.
    pub fn column(&self, j: isize) -> Result<VectorView<'_>> {
        let j = normalize_index(j, self.ncols)?;
        Ok(VectorView::from(&self.data[j * self.nrows..][..self.nrows]))
    }

    pub fn column_mut(&mut self, j: isize) -> Result<VectorViewMut<'_>> {
        let j = normalize_index(j, self.ncols)?;
        let nrows = self.nrows;
        Ok(VectorViewMut::from(&mut self.data[j * nrows..][..nrows]))
    }

    pub fn columns(&self) -> Columns<'_> {
        Columns { rest: &self.data, nrows: self.nrows, remaining: self.ncols }
    }

    pub fn columns_mut(&mut self) -> ColumnsMut<'_> {
        ColumnsMut { rest: &mut self.data, nrows: self.nrows, remaining: self.ncols }
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.nrows).map(|i| self.row_iter(i).collect()).collect()
    }

    fn row_iter(&self, i: usize) -> impl Iterator<Item = f64> + '_ {
        self.row_strided(i).iter().step_by(self.nrows).cloned()
    }

    // row `i` in kernel form; stride is nrows.
    // (with no columns there is no data at offset i, hence the fallback)
    fn row_strided(&self, i: usize) -> &[f64] {
        self.data.get(i..).unwrap_or(&[])
    }

    fn row_strided_mut(&mut self, i: usize) -> &mut [f64] {
        self.data.get_mut(i..).unwrap_or(&mut [])
    }
}

/// Iterator over the columns of a [`Matrix`] as views.
#[derive(Debug, Clone)]
pub struct Columns<'a> {
    rest: &'a [f64],
    nrows: usize,
    remaining: usize,
}

impl<'a> Iterator for Columns<'a> {
    type Item = VectorView<'a>;

    fn next(&mut self) -> Option<VectorView<'a>> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let (col, rest) = self.rest.split_at(self.nrows);
        self.rest = rest;
        Some(VectorView::from(col))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.remaining, Some(self.remaining)) }
}

impl<'a> ExactSizeIterator for Columns<'a> {}

/// Iterator over the columns of a [`Matrix`] as mutable views.
#[derive(Debug)]
pub struct ColumnsMut<'a> {
    rest: &'a mut [f64],
    nrows: usize,
    remaining: usize,
}

impl<'a> Iterator for ColumnsMut<'a> {
    type Item = VectorViewMut<'a>;

    fn next(&mut self) -> Option<VectorViewMut<'a>> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let rest = ::std::mem::take(&mut self.rest);
        let (col, rest) = rest.split_at_mut(self.nrows);
        self.rest = rest;
        Some(VectorViewMut::from(col))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.remaining, Some(self.remaining)) }
}

impl<'a> ExactSizeIterator for ColumnsMut<'a> {}

//------------------------
// elementwise arithmetic
//
// All of these run the vector implementation on the flattened buffer.

impl Matrix {
    // matrix arithmetic accepts scalars and same-shape matrices, and hands
    // the vector code a flat operand
    fn elementwise_operand<'y>(&self, op: &'static str, y: Operand<'y>) -> Result<Operand<'y>> {
        match y {
            Operand::Scalar(_) => Ok(y),
            Operand::Matrix { data, nrows, ncols } => {
                if (nrows, ncols) != self.dims() {
                    return Err(shape_mismatch(op, Shape::Matrix(self.nrows, self.ncols), y.shape()));
                }
                Ok(Operand::Vector(data))
            },
            Operand::Vector(_) => Err(Error::InvalidArgumentType {
                op,
                expected: "scalar or matrix",
                found: y.kind(),
            }),
        }
    }

    pub fn add_mut<'y>(&mut self, y: impl Into<Operand<'y>>) -> Result<&mut Self> {
        let y = self.elementwise_operand("add", y.into())?;
        self.to_vector_mut().add_mut(y)?;
        Ok(self)
    }

    pub fn sub_mut<'y>(&mut self, y: impl Into<Operand<'y>>) -> Result<&mut Self> {
        let y = self.elementwise_operand("sub", y.into())?;
        self.to_vector_mut().sub_mut(y)?;
        Ok(self)
    }

    pub fn hadamard_mut<'y>(&mut self, y: impl Into<Operand<'y>>) -> Result<&mut Self> {
        let y = self.elementwise_operand("hadamard", y.into())?;
        self.to_vector_mut().hadamard_mut(y)?;
        Ok(self)
    }

    /// Only scalar divisors are supported.
    pub fn div_mut<'y>(&mut self, y: impl Into<Operand<'y>>) -> Result<&mut Self> {
        match y.into() {
            Operand::Scalar(y) => self.hadamard_mut(1.0 / y),
            y => Err(Error::UnsupportedOperand { op: "div", lhs: "matrix", rhs: y.kind() }),
        }
    }

    /// Broadcast a scalar, or copy a matrix of the same shape.
    pub fn fill<'y>(&mut self, value: impl Into<Operand<'y>>) -> Result<&mut Self> {
        let value = self.elementwise_operand("fill", value.into())?;
        self.to_vector_mut().fill(value)?;
        Ok(self)
    }

    pub fn add<'y>(&self, y: impl Into<Operand<'y>>) -> Result<Matrix> {
        let mut out = self.copy();
        out.add_mut(y)?;
        Ok(out)
    }

    pub fn sub<'y>(&self, y: impl Into<Operand<'y>>) -> Result<Matrix> {
        let mut out = self.copy();
        out.sub_mut(y)?;
        Ok(out)
    }

    pub fn hadamard<'y>(&self, y: impl Into<Operand<'y>>) -> Result<Matrix> {
        let mut out = self.copy();
        out.hadamard_mut(y)?;
        Ok(out)
    }

    pub fn div<'y>(&self, y: impl Into<Operand<'y>>) -> Result<Matrix> {
        let mut out = self.copy();
        out.div_mut(y)?;
        Ok(out)
    }

    /// Raise each element to `alpha`; non-finite results become NaN.
    #[cfg_attr(feature = "nightly", must_use = "not an in-place operation!")]
    pub fn power_elements(&self, alpha: f64) -> Matrix {
        let mut out = self.copy();
        out.power_elements_mut(alpha);
        out
    }

    #[cfg_attr(feature = "nightly", must_use = "not an in-place operation!")]
    pub fn power_elements_or(&self, alpha: f64, non_finite: f64) -> Matrix {
        let mut out = self.copy();
        out.power_elements_or_mut(alpha, non_finite);
        out
    }

    pub fn power_elements_mut(&mut self, alpha: f64) -> &mut Self {
        self.to_vector_mut().power_elements_mut(alpha);
        self
    }

    pub fn power_elements_or_mut(&mut self, alpha: f64, non_finite: f64) -> &mut Self {
        self.to_vector_mut().power_elements_or_mut(alpha, non_finite);
        self
    }

    /// See [`VectorBase::round`].
    #[cfg_attr(feature = "nightly", must_use = "not an in-place operation!")]
    pub fn round(&self, ndigits: i32) -> Matrix {
        let mut out = self.copy();
        out.round_mut(ndigits);
        out
    }

    pub fn round_mut(&mut self, ndigits: i32) -> &mut Self {
        self.to_vector_mut().round_mut(ndigits);
        self
    }

    /// Scale row `i` by `v[i]`.
    pub fn mul_rows_mut<S: AsRef<[f64]>>(&mut self, v: &VectorBase<S>) -> Result<&mut Self> {
        if v.len() != self.nrows {
            return Err(shape_mismatch("mul_rows", format!("length {}", self.nrows), v.len()));
        }
        for mut col in self.columns_mut() {
            col.hadamard_mut(v)?;
        }
        Ok(self)
    }

    pub fn mul_rows<S: AsRef<[f64]>>(&self, v: &VectorBase<S>) -> Result<Matrix> {
        let mut out = self.copy();
        out.mul_rows_mut(v)?;
        Ok(out)
    }
}

//------------------------
// products and transposition

impl Matrix {
    /// Matrix product.
    pub fn matmul(&self, b: &Matrix) -> Result<Matrix> {
        if self.ncols != b.nrows {
            return Err(shape_mismatch(
                "matmul",
                format!("{} rows", self.ncols),
                Shape::Matrix(b.nrows, b.ncols),
            ));
        }
        let mut out = Matrix::new(self.nrows, b.ncols);
        kernel::dgemm(self.stored(), b.stored(), &mut out.data);
        Ok(out)
    }

    /// Product with `v` as a single column.
    ///
    /// The result is an `nrows x 1` **matrix**, unlike [`VectorBase::mul_matrix`].
    pub fn mul_vector<S: AsRef<[f64]>>(&self, v: &VectorBase<S>) -> Result<Matrix> {
        if self.ncols != v.len() {
            return Err(shape_mismatch("matrix * vector", format!("length {}", self.ncols), v.len()));
        }
        let mut out = Matrix::new(self.nrows, 1);
        kernel::dgemm(self.stored(), Stored::new(v.as_slice(), v.len(), 1), &mut out.data);
        Ok(out)
    }

    /// Transpose into a new matrix.
    #[cfg_attr(feature = "nightly", must_use = "not an in-place operation!")]
    pub fn t(&self) -> Matrix {
        let mut out = Matrix::new(self.ncols, self.nrows);
        kernel::dtrans(self.nrows, self.ncols, &self.data, &mut out.data);
        out
    }

    pub(crate) fn stored(&self) -> Stored<'_> {
        Stored::new(&self.data, self.nrows, self.ncols)
    }
}

//------------------------
// selection

impl Matrix {
    pub fn rowids(&self, ids: impl Into<Ids>) -> Result<Vec<usize>> {
        ids.into().resolve(self.nrows)
    }

    pub fn colids(&self, ids: impl Into<Ids>) -> Result<Vec<usize>> {
        ids.into().resolve(self.ncols)
    }

    /// New matrix made of the columns `js`, in that order.
    pub fn collect_columns(&self, js: &[usize]) -> Result<Matrix> {
        let mut data = Vec::with_capacity(self.nrows * js.len());
        for &j in js {
            let j = check_index(j, self.ncols)?;
            data.extend_from_slice(&self.data[j * self.nrows..][..self.nrows]);
        }
        Ok(Matrix::from_parts(self.nrows, js.len(), data))
    }

    /// New matrix made of the rows `is`, in that order.
    pub fn collect_rows(&self, is: &[usize]) -> Result<Matrix> {
        for &i in is {
            check_index(i, self.nrows)?;
        }
        let mut out = Matrix::new(is.len(), self.ncols);
        for (dest, &i) in is.iter().enumerate() {
            kernel::dcopy(self.ncols, self.row_strided(i), self.nrows, out.row_strided_mut(dest), is.len());
        }
        Ok(out)
    }

    /// Select columns.
    pub fn project(&self, ids: impl Into<Ids>) -> Result<Matrix> {
        self.collect_columns(&self.colids(ids)?)
    }

    /// Select rows.
    pub fn select(&self, ids: impl Into<Ids>) -> Result<Matrix> {
        Ok(self.t().project(ids)?.t())
    }
}

//------------------------
// reductions

impl Matrix {
    pub fn rowsums(&self) -> Vector {
        self.each_row(kernel::dsum)
    }

    pub fn rowmaxs(&self) -> Vector {
        self.each_row(kernel::dmax)
    }

    pub fn rowmins(&self) -> Vector {
        self.each_row(kernel::dmin)
    }

    pub fn colsums(&self) -> Vector { self.columns().map(|c| c.sum()).collect() }
    pub fn colmaxs(&self) -> Vector { self.columns().map(|c| c.max()).collect() }
    pub fn colmins(&self) -> Vector { self.columns().map(|c| c.min()).collect() }

    fn each_row(&self, f: impl Fn(usize, &[f64], usize) -> f64) -> Vector {
        (0..self.nrows).map(|i| f(self.ncols, self.row_strided(i), self.nrows)).collect()
    }

    /// The leading `min(nrows, ncols)` diagonal entries.
    pub fn diag(&self) -> Vector {
        let k = usize::min(self.nrows, self.ncols);
        (0..k).map(|i| self.data[i + i * self.nrows]).collect()
    }

    /// NaN for an empty matrix.
    pub fn max(&self) -> f64 { self.to_vector().max() }

    /// NaN for an empty matrix.
    pub fn min(&self) -> f64 { self.to_vector().min() }
}

//------------------------
// comparison, display, indexing

/// Exact comparison of the shape and bit patterns.
impl PartialEq for Matrix {
    fn eq(&self, other: &Matrix) -> bool {
        self.dims() == other.dims() && bitwise_eq(&self.data, &other.data)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matrix[")?;
        for i in 0..self.nrows {
            if i > 0 { write!(f, ",")?; }
            write!(f, "[")?;
            for (j, x) in self.row_iter(i).enumerate() {
                if j > 0 { write!(f, ",")?; }
                write!(f, "{:?}", x)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        assert!(i < self.nrows && j < self.ncols, "index {:?} out of bounds for {}x{} matrix", (i, j), self.nrows, self.ncols);
        &self.data[i + j * self.nrows]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        assert!(i < self.nrows && j < self.ncols, "index {:?} out of bounds for {}x{} matrix", (i, j), self.nrows, self.ncols);
        &mut self.data[i + j * self.nrows]
    }
}

impl ::dlin_assert_close::CheckClose for Matrix {
    fn check_close(&self, other: &Matrix, tol: ::dlin_assert_close::Tolerances) -> ::std::result::Result<(), ::dlin_assert_close::CheckCloseError> {
        if self.dims() != other.dims() {
            return Err(::dlin_assert_close::CheckCloseError::Shape {
                left: Shape::Matrix(self.nrows, self.ncols).to_string(),
                right: Shape::Matrix(other.nrows, other.ncols).to_string(),
            });
        }
        ::dlin_assert_close::check_flat(&self.data, &other.data, tol)
    }
}

//------------------------
// operators
//
// As with vectors, these are only implemented on references and panic
// where the named methods would return an error.

impl<'a, 'b> Add<&'b Matrix> for &'a Matrix {
    type Output = Matrix;
    fn add(self, b: &'b Matrix) -> Matrix { or_panic(Matrix::add(self, b)) }
}

impl<'a, 'b> Sub<&'b Matrix> for &'a Matrix {
    type Output = Matrix;
    fn sub(self, b: &'b Matrix) -> Matrix { or_panic(Matrix::sub(self, b)) }
}

impl<'a, 'b> Mul<&'b Matrix> for &'a Matrix {
    type Output = Matrix;
    fn mul(self, b: &'b Matrix) -> Matrix { or_panic(self.matmul(b)) }
}

/// Returns an `nrows x 1` matrix.
impl<'a, 'b, S: AsRef<[f64]>> Mul<&'b VectorBase<S>> for &'a Matrix {
    type Output = Matrix;
    fn mul(self, v: &'b VectorBase<S>) -> Matrix { or_panic(self.mul_vector(v)) }
}

impl<'a> Add<f64> for &'a Matrix {
    type Output = Matrix;
    fn add(self, y: f64) -> Matrix { or_panic(Matrix::add(self, y)) }
}

impl<'a> Sub<f64> for &'a Matrix {
    type Output = Matrix;
    fn sub(self, y: f64) -> Matrix { or_panic(Matrix::sub(self, y)) }
}

impl<'a> Mul<f64> for &'a Matrix {
    type Output = Matrix;
    fn mul(self, y: f64) -> Matrix { or_panic(self.hadamard(y)) }
}

impl<'a> Div<f64> for &'a Matrix {
    type Output = Matrix;
    fn div(self, y: f64) -> Matrix { or_panic(Matrix::div(self, y)) }
}

impl<'a> Neg for &'a Matrix {
    type Output = Matrix;
    fn neg(self) -> Matrix { self * -1.0 }
}

impl Neg for Matrix {
    type Output = Matrix;
    fn neg(self) -> Matrix { -&self }
}

impl<'a> Add<&'a Matrix> for f64 {
    type Output = Matrix;
    fn add(self, m: &'a Matrix) -> Matrix { m + self }
}

impl<'a> Sub<&'a Matrix> for f64 {
    type Output = Matrix;
    fn sub(self, m: &'a Matrix) -> Matrix {
        let mut out = -m;
        or_panic(out.add_mut(self));
        out
    }
}

impl<'a> Mul<&'a Matrix> for f64 {
    type Output = Matrix;
    fn mul(self, m: &'a Matrix) -> Matrix { m * self }
}

impl<'a> Div<&'a Matrix> for f64 {
    type Output = Matrix;
    fn div(self, m: &'a Matrix) -> Matrix {
        let mut out = m.power_elements(-1.0);
        or_panic(out.hadamard_mut(self));
        out
    }
}
