/* ************************************************************************ **
** This file is part of dlin, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Dense linear algebra over column-major `f64` buffers.
//!
//! This crate gathers the workspace into one API:
//!
//! * the containers and algorithms of `dlin-linalg`, re-exported at the root;
//! * [`config`], the YAML-readable settings;
//! * [`logging`], a global logger for applications;
//! * [`kernel`], the raw BLAS/LAPACK wrappers, for anyone who needs them.

pub use ::dlin_linalg::*;
pub use ::dlin_linalg::{ids, vector};

pub use ::dlin_config as config;
pub use ::dlin_kernel as kernel;

pub mod logging;
