/* ************************************************************************ **
** This file is part of dlin, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

// All serde_yaml codegen for dlin happens in this crate.
//
// NOTE: Please go through the YamlRead trait rather than calling
//       serde_yaml::from_{reader,value,etc.} elsewhere, so that unknown
//       keys get reported.

#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;

use ::std::io::Read;
use ::std::path::PathBuf;

/// Provides an alternative to serde_yaml::from_reader that warns about
/// config keys nothing reads.
pub trait YamlRead: for<'de> ::serde::Deserialize<'de> {
    fn from_reader(mut r: impl Read) -> Result<Self, ::serde_yaml::Error>
    { YamlRead::from_dyn_reader(&mut r) }

    fn from_dyn_reader(r: &mut dyn Read) -> Result<Self, ::serde_yaml::Error> {
        // serde_ignored needs a Deserializer, which serde_yaml::Value provides.
        Self::from_value(value_from_dyn_reader(r)?)
    }

    fn from_value(value: ::serde_yaml::Value) -> Result<Self, ::serde_yaml::Error>;
}

macro_rules! derive_yaml_read {
    ($Type:ty) => {
        impl YamlRead for $Type {
            fn from_value(value: ::serde_yaml::Value) -> Result<$Type, ::serde_yaml::Error> {
                ::serde_ignored::deserialize(
                    value,
                    |path| warn!("Unused config item (possible typo?): {}", path),
                )
            }
        }
    };
}

fn value_from_dyn_reader(r: &mut dyn Read) -> Result<::serde_yaml::Value, ::serde_yaml::Error>
{ ::serde_yaml::from_reader(r) }

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    #[serde(default)]
    pub least_squares: LeastSquares,

    #[serde(default)]
    pub logging: Logging,
}
derive_yaml_read!{Settings}

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct LeastSquares {
    /// Rank threshold for the least-squares kernel.  Directions whose
    /// estimated condition relative to the largest falls below this are
    /// treated as rank-deficient and contribute nothing to the solution.
    #[serde(default = "_least_squares__rcond")]
    pub rcond: f64,
}
#[allow(non_snake_case)]
fn _least_squares__rcond() -> f64 { DEFAULT_RCOND }

/// Rank threshold used by `solve_linear_equation` when no settings are given.
pub const DEFAULT_RCOND: f64 = 1e-5;

impl Default for LeastSquares {
    fn default() -> Self { LeastSquares { rcond: DEFAULT_RCOND } }
}

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Logging {
    /// Anything above zero turns on trace output from the kernel crate.
    #[serde(default)]
    pub verbosity: i32,

    /// Also write the log to this file.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("least-squares.rcond must be finite and non-negative (got {0})")]
    InvalidRcond(f64),
}

impl Settings {
    pub fn validate(self) -> Result<Settings, ConfigError> {
        self.least_squares.validate()?;
        Ok(self)
    }
}

impl LeastSquares {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rcond = self.rcond;
        if !rcond.is_finite() || rcond < 0.0 {
            return Err(ConfigError::InvalidRcond(rcond));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let settings = Settings::from_reader("{}".as_bytes()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.least_squares.rcond, 1e-5);
        assert_eq!(settings.logging.path, None);
    }

    #[test]
    fn kebab_case_keys() {
        let yaml = "
least-squares:
  rcond: 1.0e-8
logging:
  verbosity: 2
  path: out.log
";
        let settings = Settings::from_reader(yaml.as_bytes()).unwrap();
        assert_eq!(settings.least_squares.rcond, 1e-8);
        assert_eq!(settings.logging.verbosity, 2);
        assert_eq!(settings.logging.path, Some(PathBuf::from("out.log")));
    }

    #[test]
    fn unknown_keys_are_not_fatal() {
        let settings = Settings::from_reader("least-squares: { rcond: 0.5, rcnod: 1 }".as_bytes()).unwrap();
        assert_eq!(settings.least_squares.rcond, 0.5);
    }

    #[test]
    fn validation() {
        let mut settings = Settings::default();
        assert!(settings.clone().validate().is_ok());

        settings.least_squares.rcond = -1.0;
        assert_eq!(settings.clone().validate(), Err(ConfigError::InvalidRcond(-1.0)));

        settings.least_squares.rcond = ::std::f64::NAN;
        assert!(settings.validate().is_err());
    }
}
