/* ************************************************************************ **
** This file is part of dlin, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use ::dlin_kernel::KernelError;
use ::std::fmt;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("{op}: incompatible shapes (expected {expected}, found {found})")]
    ShapeMismatch {
        op: &'static str,
        expected: String,
        found: String,
    },

    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("{op}: expected {expected}, found {found}")]
    InvalidArgumentType {
        op: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{op} is not supported between a {lhs} and a {rhs}")]
    UnsupportedOperand {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },

    #[error("{routine} failed with status {info}")]
    KernelFailure { routine: &'static str, info: i32 },
}

pub type Result<T> = ::std::result::Result<T, Error>;

impl From<KernelError> for Error {
    fn from(KernelError { routine, info }: KernelError) -> Self {
        Error::KernelFailure { routine, info }
    }
}

pub(crate) fn shape_mismatch(op: &'static str, expected: impl fmt::Display, found: impl fmt::Display) -> Error {
    Error::ShapeMismatch {
        op,
        expected: expected.to_string(),
        found: found.to_string(),
    }
}

/// For `std::ops` impls, which have no way to return an error.
pub(crate) fn or_panic<T>(result: Result<T>) -> T {
    match result {
        Ok(x) => x,
        Err(e) => panic!("{}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fails(info: i32) -> ::std::result::Result<(), KernelError> {
        Err(KernelError { routine: "dsyev", info })
    }

    fn propagate(info: i32) -> Result<()> {
        fails(info)?;
        Ok(())
    }

    #[test]
    fn kernel_error_keeps_routine_and_status() {
        assert_eq!(propagate(-5), Err(Error::KernelFailure { routine: "dsyev", info: -5 }));
        assert_eq!(propagate(3).unwrap_err().to_string(), "dsyev failed with status 3");
    }
}
