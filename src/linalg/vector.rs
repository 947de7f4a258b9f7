/* ************************************************************************ **
** This file is part of dlin, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::errors::{or_panic, shape_mismatch};
use crate::ids::{normalize_index, saturating_isize};
use crate::{Error, Matrix, Operand, Result};
use ::dlin_kernel as kernel;
use ::dlin_kernel::Stored;
use ::std::fmt;
use ::std::iter::FromIterator;
use ::std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

/// A dense vector of `f64` over some storage `S`.
///
/// Use the aliases:
///
/// * [`Vector`] owns its buffer.
/// * [`VectorView`] borrows someone else's buffer, e.g. a column of a [`Matrix`].
/// * [`VectorViewMut`] borrows mutably; writing through it writes the owner.
///
/// Operations that produce a new vector always return an owned [`Vector`].
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorBase<S>(S);

pub type Vector = VectorBase<Vec<f64>>;
pub type VectorView<'a> = VectorBase<&'a [f64]>;
pub type VectorViewMut<'a> = VectorBase<&'a mut [f64]>;

/// Build a [`Vector`] from a list of numbers.
#[macro_export]
macro_rules! vector {
    ($($x:expr),* $(,)?) => { $crate::Vector::from(vec![$(($x) as f64),*]) };
}

//------------------------
// construction

impl Vector {
    /// Zero-filled vector of length `len`.
    pub fn new(len: usize) -> Self { VectorBase(vec![0.0; len]) }

    pub fn from_a(data: &[f64]) -> Self { VectorBase(data.to_vec()) }

    pub fn into_vec(self) -> Vec<f64> { self.0 }

    /// Reinterpret the buffer as an `nrows x ncols` column-major matrix.
    pub fn into_matrix(self, nrows: usize, ncols: usize) -> Result<Matrix> {
        if nrows * ncols != self.len() {
            return Err(shape_mismatch("into_matrix", format!("length {}", nrows * ncols), self.len()));
        }
        Ok(Matrix::from_parts(nrows, ncols, self.0))
    }
}

impl<'a> VectorView<'a> {
    /// View `len` elements of `storage` starting at `offset`.
    pub fn new(storage: &'a [f64], offset: usize, len: usize) -> Result<Self> {
        check_view_bounds(storage.len(), offset, len)?;
        Ok(VectorBase(&storage[offset..offset + len]))
    }
}

impl<'a> VectorViewMut<'a> {
    /// Mutably view `len` elements of `storage` starting at `offset`.
    pub fn new(storage: &'a mut [f64], offset: usize, len: usize) -> Result<Self> {
        check_view_bounds(storage.len(), offset, len)?;
        Ok(VectorBase(&mut storage[offset..offset + len]))
    }
}

fn check_view_bounds(storage_len: usize, offset: usize, len: usize) -> Result<()> {
    match offset.checked_add(len) {
        Some(end) if end <= storage_len => Ok(()),
        _ => Err(Error::IndexOutOfRange {
            index: saturating_isize(offset.saturating_add(len)),
            len: storage_len,
        }),
    }
}

impl From<Vec<f64>> for Vector {
    fn from(data: Vec<f64>) -> Self { VectorBase(data) }
}

impl<'a> From<&'a [f64]> for VectorView<'a> {
    fn from(data: &'a [f64]) -> Self { VectorBase(data) }
}

impl<'a> From<&'a mut [f64]> for VectorViewMut<'a> {
    fn from(data: &'a mut [f64]) -> Self { VectorBase(data) }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self { VectorBase(iter.into_iter().collect()) }
}

impl IntoIterator for Vector {
    type IntoIter = ::std::vec::IntoIter<f64>;
    type Item = f64;
    fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}

//------------------------
// read-only operations

impl<S: AsRef<[f64]>> VectorBase<S> {
    pub fn as_slice(&self) -> &[f64] { self.0.as_ref() }
    pub fn len(&self) -> usize { self.as_slice().len() }
    pub fn is_empty(&self) -> bool { self.len() == 0 }
    pub fn iter(&self) -> ::std::slice::Iter<'_, f64> { self.as_slice().iter() }
    pub fn to_vec(&self) -> Vec<f64> { self.as_slice().to_vec() }

    pub fn view(&self) -> VectorView<'_> { VectorBase(self.as_slice()) }

    /// Deep copy into fresh storage.
    #[cfg_attr(feature = "nightly", must_use = "not an in-place operation!")]
    pub fn copy(&self) -> Vector { VectorBase(self.to_vec()) }

    /// Copy into a fresh buffer of length `len`.
    ///
    /// The new buffer is first filled with `fill` (zero if `None`), then the
    /// leading `min(self.len(), len)` elements are copied over it.
    #[cfg_attr(feature = "nightly", must_use = "not an in-place operation!")]
    pub fn resize(&self, len: usize, fill: Option<f64>) -> Vector {
        let mut out = vec![fill.unwrap_or(0.0); len];
        let n = usize::min(len, self.len());
        out[..n].copy_from_slice(&self.as_slice()[..n]);
        VectorBase(out)
    }

    /// Negative indices count from the end.
    pub fn get(&self, index: isize) -> Result<f64> {
        let i = normalize_index(index, self.len())?;
        Ok(self.as_slice()[i])
    }

    pub fn add<'y>(&self, y: impl Into<Operand<'y>>) -> Result<Vector> {
        let mut out = self.copy();
        out.add_mut(y)?;
        Ok(out)
    }

    pub fn sub<'y>(&self, y: impl Into<Operand<'y>>) -> Result<Vector> {
        let mut out = self.copy();
        out.sub_mut(y)?;
        Ok(out)
    }

    /// Elementwise product (with a vector) or scaling (with a scalar).
    pub fn hadamard<'y>(&self, y: impl Into<Operand<'y>>) -> Result<Vector> {
        let mut out = self.copy();
        out.hadamard_mut(y)?;
        Ok(out)
    }

    /// Only scalar divisors are supported.
    pub fn div<'y>(&self, y: impl Into<Operand<'y>>) -> Result<Vector> {
        let mut out = self.copy();
        out.div_mut(y)?;
        Ok(out)
    }

    /// Raise each element to `alpha`; non-finite results become NaN.
    #[cfg_attr(feature = "nightly", must_use = "not an in-place operation!")]
    pub fn power_elements(&self, alpha: f64) -> Vector {
        self.power_elements_or(alpha, ::std::f64::NAN)
    }

    /// Raise each element to `alpha`; non-finite results become `non_finite`.
    #[cfg_attr(feature = "nightly", must_use = "not an in-place operation!")]
    pub fn power_elements_or(&self, alpha: f64, non_finite: f64) -> Vector {
        let mut out = self.copy();
        out.power_elements_or_mut(alpha, non_finite);
        out
    }

    /// Round each element to `ndigits` decimal places, half away from zero.
    ///
    /// Results that round to zero are always `+0.0`, so that rounded values
    /// can be compared exactly.
    #[cfg_attr(feature = "nightly", must_use = "not an in-place operation!")]
    pub fn round(&self, ndigits: i32) -> Vector {
        let mut out = self.copy();
        out.round_mut(ndigits);
        out
    }

    pub fn sum(&self) -> f64 { kernel::dsum(self.len(), self.as_slice(), 1) }
    pub fn l1norm(&self) -> f64 { kernel::dasum(self.len(), self.as_slice(), 1) }
    pub fn l2norm(&self) -> f64 { kernel::dnrm2(self.len(), self.as_slice(), 1) }

    /// NaN for an empty vector.
    pub fn max(&self) -> f64 { kernel::dmax(self.len(), self.as_slice(), 1) }

    /// NaN for an empty vector.
    pub fn min(&self) -> f64 { kernel::dmin(self.len(), self.as_slice(), 1) }

    pub fn dot<T: AsRef<[f64]>>(&self, other: &VectorBase<T>) -> Result<f64> {
        if self.len() != other.len() {
            return Err(shape_mismatch("dot", self.len(), other.len()));
        }
        Ok(kernel::ddot(self.len(), self.as_slice(), 1, other.as_slice(), 1))
    }

    /// Outer product `self otherᵗ`, a `self.len() x other.len()` matrix.
    pub fn rank1op<T: AsRef<[f64]>>(&self, other: &VectorBase<T>) -> Matrix {
        let mut out = Matrix::new(self.len(), other.len());
        kernel::dger(self.len(), other.len(), 1.0, self.as_slice(), other.as_slice(), out.as_mut_slice());
        out
    }

    /// `selfᵗ a`: the vector is treated as a single row.
    pub fn mul_matrix(&self, a: &Matrix) -> Result<Vector> {
        if self.len() != a.nrows() {
            return Err(shape_mismatch("vector * matrix", format!("length {}", a.nrows()), self.len()));
        }
        let mut out = Vector::new(a.ncols());
        kernel::dgemm(
            Stored::new(a.as_slice(), a.nrows(), a.ncols()).t(),
            Stored::new(self.as_slice(), self.len(), 1),
            out.as_mut_slice(),
        );
        Ok(out)
    }

    // vector arithmetic accepts scalars and same-length vectors
    fn check_elementwise(&self, op: &'static str, y: &Operand<'_>) -> Result<()> {
        match *y {
            Operand::Scalar(_) => Ok(()),
            Operand::Vector(data) if data.len() == self.len() => Ok(()),
            Operand::Vector(data) => Err(shape_mismatch(op, format!("length {}", self.len()), data.len())),
            Operand::Matrix { .. } => Err(Error::InvalidArgumentType {
                op,
                expected: "scalar or vector",
                found: y.kind(),
            }),
        }
    }
}

//------------------------
// in-place operations

impl<S: AsRef<[f64]> + AsMut<[f64]>> VectorBase<S> {
    pub fn as_mut_slice(&mut self) -> &mut [f64] { self.0.as_mut() }

    pub fn view_mut(&mut self) -> VectorViewMut<'_> { VectorBase(self.as_mut_slice()) }

    /// Negative indices count from the end.
    pub fn set(&mut self, index: isize, value: f64) -> Result<()> {
        let i = normalize_index(index, self.len())?;
        self.as_mut_slice()[i] = value;
        Ok(())
    }

    /// Broadcast a scalar, or copy a vector of the same length.
    pub fn fill<'y>(&mut self, value: impl Into<Operand<'y>>) -> Result<&mut Self> {
        let value = value.into();
        self.check_elementwise("fill", &value)?;
        let (x, incx) = value.strided();
        let n = self.len();
        kernel::dcopy(n, x, incx, self.as_mut_slice(), 1);
        Ok(self)
    }

    pub fn add_mut<'y>(&mut self, y: impl Into<Operand<'y>>) -> Result<&mut Self> {
        self.axpy_mut("add", 1.0, y.into())
    }

    pub fn sub_mut<'y>(&mut self, y: impl Into<Operand<'y>>) -> Result<&mut Self> {
        self.axpy_mut("sub", -1.0, y.into())
    }

    fn axpy_mut(&mut self, op: &'static str, alpha: f64, y: Operand<'_>) -> Result<&mut Self> {
        self.check_elementwise(op, &y)?;
        let (x, incx) = y.strided();
        let n = self.len();
        kernel::daxpy(n, alpha, x, incx, self.as_mut_slice(), 1);
        Ok(self)
    }

    pub fn hadamard_mut<'y>(&mut self, y: impl Into<Operand<'y>>) -> Result<&mut Self> {
        let y = y.into();
        self.check_elementwise("hadamard", &y)?;
        let n = self.len();
        match y {
            Operand::Scalar(alpha) => kernel::dscal(n, alpha, self.as_mut_slice(), 1),
            _ => {
                let (x, incx) = y.strided();
                kernel::dhad(n, self.as_mut_slice(), 1, x, incx);
            },
        }
        Ok(self)
    }

    pub fn div_mut<'y>(&mut self, y: impl Into<Operand<'y>>) -> Result<&mut Self> {
        match y.into() {
            Operand::Scalar(y) => self.hadamard_mut(1.0 / y),
            y => Err(Error::UnsupportedOperand { op: "div", lhs: "vector", rhs: y.kind() }),
        }
    }

    pub fn power_elements_mut(&mut self, alpha: f64) -> &mut Self {
        self.power_elements_or_mut(alpha, ::std::f64::NAN)
    }

    pub fn power_elements_or_mut(&mut self, alpha: f64, non_finite: f64) -> &mut Self {
        let n = self.len();
        kernel::dpow(n, self.as_mut_slice(), 1, alpha, non_finite);
        self
    }

    pub fn round_mut(&mut self, ndigits: i32) -> &mut Self {
        for x in self.as_mut_slice() {
            *x = round_to(*x, ndigits);
        }
        self
    }
}

pub(crate) fn round_to(x: f64, ndigits: i32) -> f64 {
    let scale = 10f64.powi(ndigits);
    let scaled = x * scale;
    if !scaled.is_finite() {
        // too many digits to matter (or x is already inf/nan)
        return x;
    }
    // adding zero turns a rounded -0.0 into 0.0
    scaled.round() / scale + 0.0
}

//------------------------
// comparison, display, indexing

/// Exact comparison of the bit patterns; `NaN == NaN` when the bits agree.
impl<S: AsRef<[f64]>, T: AsRef<[f64]>> PartialEq<VectorBase<T>> for VectorBase<S> {
    fn eq(&self, other: &VectorBase<T>) -> bool {
        bitwise_eq(self.as_slice(), other.as_slice())
    }
}

pub(crate) fn bitwise_eq(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
}

impl<S: AsRef<[f64]>> fmt::Display for VectorBase<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector[")?;
        for (i, x) in self.iter().enumerate() {
            if i > 0 { write!(f, ",")?; }
            write!(f, "{:?}", x)?;
        }
        write!(f, "]")
    }
}

impl<S: AsRef<[f64]>> Index<usize> for VectorBase<S> {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 { &self.as_slice()[i] }
}

impl<S: AsRef<[f64]> + AsMut<[f64]>> IndexMut<usize> for VectorBase<S> {
    fn index_mut(&mut self, i: usize) -> &mut f64 { &mut self.as_mut_slice()[i] }
}

impl<S: AsRef<[f64]> + fmt::Debug> ::dlin_assert_close::CheckClose for VectorBase<S> {
    fn check_close(&self, other: &Self, tol: ::dlin_assert_close::Tolerances) -> ::std::result::Result<(), ::dlin_assert_close::CheckCloseError> {
        ::dlin_assert_close::check_flat(self.as_slice(), other.as_slice(), tol)
    }
}

//------------------------
// operators
//
// These panic where the named methods would return an error.  Only
// references implement them, so that `v.add(..)` on an owned vector still
// finds the fallible method.

macro_rules! impl_binary {
    ($Op:ident::$op:ident, $method:ident) => {
        // vector + vector
        impl<'a, 'b, S, T> $Op<&'b VectorBase<T>> for &'a VectorBase<S>
        where S: AsRef<[f64]>, T: AsRef<[f64]>,
        {
            type Output = Vector;
            fn $op(self, y: &'b VectorBase<T>) -> Vector { or_panic(self.$method(y)) }
        }

        // vector + scalar
        impl<'a, S: AsRef<[f64]>> $Op<f64> for &'a VectorBase<S> {
            type Output = Vector;
            fn $op(self, y: f64) -> Vector { or_panic(self.$method(y)) }
        }
    };
}

impl_binary!(Add::add, add);
impl_binary!(Sub::sub, sub);
impl_binary!(Mul::mul, hadamard);

impl<'a, S: AsRef<[f64]>> Div<f64> for &'a VectorBase<S> {
    type Output = Vector;
    fn div(self, y: f64) -> Vector { or_panic(VectorBase::div(self, y)) }
}

impl<'a, S: AsRef<[f64]>> Neg for &'a VectorBase<S> {
    type Output = Vector;
    fn neg(self) -> Vector { or_panic(self.hadamard(-1.0)) }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector { -&self }
}

/// `vᵗ A`
impl<'a, 'b, S: AsRef<[f64]>> Mul<&'b Matrix> for &'a VectorBase<S> {
    type Output = Vector;
    fn mul(self, a: &'b Matrix) -> Vector { or_panic(self.mul_matrix(a)) }
}

// scalar OP vector
//
// Addition and multiplication commute.  Subtraction is `(-v) + s`, and
// division is the elementwise reciprocal scaled by `s` (so a zero element
// becomes NaN, not infinity).

impl<'a, S: AsRef<[f64]>> Add<&'a VectorBase<S>> for f64 {
    type Output = Vector;
    fn add(self, v: &'a VectorBase<S>) -> Vector { v + self }
}

impl<'a, S: AsRef<[f64]>> Sub<&'a VectorBase<S>> for f64 {
    type Output = Vector;
    fn sub(self, v: &'a VectorBase<S>) -> Vector {
        let mut out = -v;
        or_panic(out.add_mut(self));
        out
    }
}

impl<'a, S: AsRef<[f64]>> Mul<&'a VectorBase<S>> for f64 {
    type Output = Vector;
    fn mul(self, v: &'a VectorBase<S>) -> Vector { v * self }
}

impl<'a, S: AsRef<[f64]>> Div<&'a VectorBase<S>> for f64 {
    type Output = Vector;
    fn div(self, v: &'a VectorBase<S>) -> Vector {
        let mut out = v.power_elements(-1.0);
        or_panic(out.hadamard_mut(self));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::std::f64::NAN;

    #[test]
    fn construction_and_indexing() {
        let mut v = Vector::new(4);
        assert_eq!(v.to_string(), "Vector[0.0,0.0,0.0,0.0]");
        v.set(0, 1.0).unwrap();
        v.set(1, 2.0).unwrap();
        v.set(2, 3.0).unwrap();
        v.set(-1, 4.0).unwrap();
        assert_eq!(v.get(-1).unwrap(), 4.0);
        assert_eq!(v, vector![1, 2, 3, 4]);
        assert_eq!(v, Vector::from_a(&[1.0, 2.0, 3.0, 4.0]));

        assert_eq!(v.get(4), Err(Error::IndexOutOfRange { index: 4, len: 4 }));
        assert_eq!(v.set(-5, 0.0), Err(Error::IndexOutOfRange { index: -5, len: 4 }));
    }

    #[test]
    fn copies_are_independent() {
        let mut v = vector![1, 2, 3, 4];
        let mut v2 = v.copy();
        v[0] = 5.0;
        assert_eq!(v2[0], 1.0);
        v2[0] = 6.0;
        assert_eq!(v[0], 5.0);
    }

    #[test]
    fn views_write_through() {
        let mut storage = vec![0.0; 5];
        {
            let mut view = VectorViewMut::new(&mut storage, 1, 3).unwrap();
            view.fill(2.0).unwrap();
            view.set(-1, 7.0).unwrap();
        }
        assert_eq!(storage, vec![0.0, 2.0, 2.0, 7.0, 0.0]);

        let view = VectorView::new(&storage, 3, 2).unwrap();
        assert_eq!(view, vector![7, 0]);
        assert!(VectorView::new(&storage, 4, 2).is_err());
    }

    #[test]
    fn view_past_the_end_of_memory() {
        let storage = vec![0.0; 4];
        let max = isize::max_value();
        assert_eq!(
            VectorView::new(&storage, ::std::usize::MAX, 2).map(|v| v.len()),
            Err(Error::IndexOutOfRange { index: max, len: 4 }),
        );
        assert_eq!(
            VectorView::new(&storage, 3, 2).map(|v| v.len()),
            Err(Error::IndexOutOfRange { index: 5, len: 4 }),
        );
    }

    #[test]
    fn resize() {
        let v = vector![1, 2];
        assert_eq!(v.resize(5, None), vector![1, 2, 0, 0, 0]);
        assert_eq!(v.resize(2, None), vector![1, 2]);
        assert_eq!(v.resize(1, None), vector![1]);
        assert_eq!(v.resize(5, Some(1.0)), vector![1, 2, 1, 1, 1]);
        assert_eq!(v.resize(2, Some(1.0)), vector![1, 2]);
        assert_eq!(v.resize(1, Some(1.0)), vector![1]);
        assert_eq!(v, vector![1, 2]);
    }

    #[test]
    fn unary_ops() {
        let v = vector![1, 2, 3, 4];
        assert_eq!(-&v, vector![-1, -2, -3, -4]);
        assert_eq!(v, vector![1, 2, 3, 4]);
    }

    #[test]
    fn binary_ops() {
        let v1 = vector![1, 2, 3, 4];
        let v2 = vector![4, 3, 2, 1];
        let v3 = vector![1, 2, 3, 0];
        assert_eq!(&v1 + 1.0, vector![2, 3, 4, 5]);
        assert_eq!(1.0 + &v1, vector![2, 3, 4, 5]);
        assert_eq!(&v1 + &v2, vector![5, 5, 5, 5]);
        assert_eq!(&v1 - 1.0, vector![0, 1, 2, 3]);
        assert_eq!(1.0 - &v1, vector![0, -1, -2, -3]);
        assert_eq!(&v1 - &v2, vector![-3, -1, 1, 3]);
        assert_eq!(&v1 * 2.0, vector![2, 4, 6, 8]);
        assert_eq!(2.0 * &v1, vector![2, 4, 6, 8]);
        assert_eq!(&v1 * &v2, vector![4, 6, 6, 4]);
        assert_eq!(v1.hadamard(&v2).unwrap(), vector![4, 6, 6, 4]);
        assert_eq!(v1.power_elements(2.0), vector![1, 4, 9, 16]);
        assert_eq!(v3.power_elements(-1.0), vector![1.0, 1.0 / 2.0, 1.0 / 3.0, NAN]);
        assert_eq!(v3.power_elements_or(-1.0, 0.0), vector![1.0, 1.0 / 2.0, 1.0 / 3.0, 0.0]);
        assert_eq!(&v1 / 2.0, vector![0.5, 1.0, 1.5, 2.0]);
        assert_eq!(2.0 / &v1, vector![2.0, 1.0, 2.0 / 3.0, 0.5]);
        assert_eq!(v1.dot(&v2).unwrap(), 20.0);
        assert_eq!(v1, vector![1, 2, 3, 4]);
    }

    #[test]
    fn operand_errors() {
        let mut v = vector![1, 2, 3];
        let short = vector![1, 2];
        let m = Matrix::new(3, 1);
        assert!(match v.add_mut(&short) { Err(Error::ShapeMismatch { .. }) => true, _ => false });
        assert!(match v.add_mut(&m) { Err(Error::InvalidArgumentType { .. }) => true, _ => false });
        assert_eq!(
            v.div(&short).unwrap_err(),
            Error::UnsupportedOperand { op: "div", lhs: "vector", rhs: "vector" },
        );
        assert!(v.dot(&short).is_err());
        assert!(v.fill(&short).is_err());
        // failed operations leave the receiver alone
        assert_eq!(v, vector![1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "incompatible shapes")]
    fn operator_panics_on_mismatch() {
        let _ = &vector![1, 2, 3] + &vector![1, 2];
    }

    #[test]
    fn in_place_ops_chain() {
        let mut v = vector![1, 2, 3];
        v.add_mut(1.0).unwrap().hadamard_mut(&vector![1, 0, -1]).unwrap().sub_mut(0.5).unwrap();
        assert_eq!(v, vector![1.5, -0.5, -4.5]);
        v.fill(&vector![9, 8, 7]).unwrap();
        assert_eq!(v, vector![9, 8, 7]);
    }

    #[test]
    fn reductions() {
        assert_eq!(vector![1, 2, -2, 1].max(), 2.0);
        assert_eq!(vector![1, 2, -2, 1].min(), -2.0);
        assert!(Vector::new(0).max().is_nan());
        assert!(Vector::new(0).min().is_nan());
        assert_eq!(vector![1, -2, 3].l1norm(), 6.0);
        assert_eq!(vector![1, -2, 3].l2norm(), 14f64.sqrt());
        assert_eq!(vector![1, -2, 3].sum(), 2.0);
    }

    #[test]
    fn rank1op() {
        let v = vector![1, 2];
        let w = vector![3, 4, 5];
        let expected = Matrix::from_rows(&[[3.0, 4.0, 5.0], [6.0, 8.0, 10.0]]).unwrap();
        assert_eq!(v.rank1op(&w), expected);
    }

    #[test]
    fn round() {
        let v = vector![1.0, 2.00001, 3.000002];
        assert_eq!(v.round(5), vector![1.0, 2.00001, 3.0]);
        assert_eq!(v, vector![1.0, 2.00001, 3.000002]);
        assert_eq!(vector![2.5, -2.5].round(0), vector![3.0, -3.0]);
        assert_eq!(vector![-1e-17].round(10), vector![0.0]);
    }

    #[test]
    fn equality_is_bitwise() {
        assert_eq!(vector![NAN], vector![NAN]);
        assert_ne!(vector![0.0], vector![-0.0]);
        assert_ne!(vector![1, 2], vector![1, 2, 3]);
    }

    #[test]
    fn into_matrix_shares_layout() {
        let m = vector![1, 0, 2, 0, 0, 0, 3, 0, 0].into_matrix(3, 3).unwrap();
        let expected = Matrix::from_rows(&[[1.0, 0.0, 3.0], [0.0, 0.0, 0.0], [2.0, 0.0, 0.0]]).unwrap();
        assert_eq!(m, expected);
        assert!(vector![1, 2, 3].into_matrix(2, 2).is_err());
    }
}
