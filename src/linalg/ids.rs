/* ************************************************************************ **
** This file is part of dlin, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{Error, Result};
use ::std::convert::TryFrom;
use ::std::ops::{Range, RangeFull, RangeInclusive};

/// A selection of row or column indices.
///
/// Negative numbers count from the end (`-1` is the last index).  Ranges
/// resolve each end separately, so `0..=-2` is "everything but the last".
/// A range whose start lies after its end selects nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ids {
    All,
    Index(isize),
    Range {
        start: isize,
        end: isize,
        inclusive: bool,
    },
    /// Concatenation, in order.  Duplicates are kept.
    List(Vec<Ids>),
}

/// Build an [`Ids::List`] from anything convertible to `Ids`.
///
/// `ids![1, 2, 0]`, `ids![0..=-2, -1]`
#[macro_export]
macro_rules! ids {
    ($($x:expr),* $(,)?) => { $crate::Ids::List(vec![$($crate::Ids::from($x)),*]) };
}

/// Bounds check for an index that cannot be negative.
pub(crate) fn check_index(index: usize, len: usize) -> Result<usize> {
    match index < len {
        true => Ok(index),
        false => Err(Error::IndexOutOfRange { index: saturating_isize(index), len }),
    }
}

pub(crate) fn saturating_isize(x: usize) -> isize {
    isize::try_from(x).unwrap_or(isize::max_value())
}

pub(crate) fn normalize_index(index: isize, len: usize) -> Result<usize> {
    let normalized = if index < 0 { index + len as isize } else { index };
    match 0 <= normalized && normalized < len as isize {
        true => Ok(normalized as usize),
        false => Err(Error::IndexOutOfRange { index, len }),
    }
}

impl Ids {
    /// Resolve against an axis of length `len`.
    pub fn resolve(&self, len: usize) -> Result<Vec<usize>> {
        let mut out = vec![];
        self.resolve_into(len, &mut out)?;
        Ok(out)
    }

    fn resolve_into(&self, len: usize, out: &mut Vec<usize>) -> Result<()> {
        match *self {
            Ids::All => out.extend(0..len),
            Ids::Index(i) => out.push(normalize_index(i, len)?),
            Ids::Range { start, end, inclusive } => {
                let wrap = |i: isize| if i < 0 { i + len as isize } else { i };
                let (start, end) = (wrap(start), wrap(end));
                let end = match inclusive {
                    false => end,
                    true => end.checked_add(1).ok_or(Error::IndexOutOfRange { index: end, len })?,
                };
                for i in start..end {
                    out.push(normalize_index(i, len)?);
                }
            },
            Ids::List(ref items) => {
                for item in items {
                    item.resolve_into(len, out)?;
                }
            },
        }
        Ok(())
    }
}

impl From<RangeFull> for Ids {
    fn from(_: RangeFull) -> Self { Ids::All }
}

impl From<usize> for Ids {
    fn from(i: usize) -> Self { Ids::Index(saturating_isize(i)) }
}

impl From<&[usize]> for Ids {
    fn from(is: &[usize]) -> Self { Ids::List(is.iter().map(|&i| i.into()).collect()) }
}

macro_rules! impl_signed_conversions {
    ($($T:ty)*) => {$(
        impl From<$T> for Ids {
            fn from(i: $T) -> Self { Ids::Index(i as isize) }
        }

        impl From<Range<$T>> for Ids {
            fn from(r: Range<$T>) -> Self {
                Ids::Range { start: r.start as isize, end: r.end as isize, inclusive: false }
            }
        }

        impl From<RangeInclusive<$T>> for Ids {
            fn from(r: RangeInclusive<$T>) -> Self {
                Ids::Range { start: *r.start() as isize, end: *r.end() as isize, inclusive: true }
            }
        }
    )*};
}

impl_signed_conversions!{ i32 i64 isize }

impl<T: Into<Ids>> From<Vec<T>> for Ids {
    fn from(items: Vec<T>) -> Self { Ids::List(items.into_iter().map(Into::into).collect()) }
}
