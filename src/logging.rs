/* ************************************************************************ **
** This file is part of dlin, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use ::std::fmt;
use ::std::path::{Path, PathBuf};
use ::log::{Level, LevelFilter};

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("could not open log file: {0}")]
    Io(#[from] ::std::io::Error),

    #[error("a global logger was already set")]
    AlreadySet(#[from] ::log::SetLoggerError),
}

/// Builder-style setup for logging
#[derive(Debug, Clone, Default)]
pub struct GlobalLogger {
    path: Option<PathBuf>,
    verbosity: Verbosity,
}

impl GlobalLogger {
    pub fn from_settings(settings: &::dlin_config::Logging) -> Self {
        let mut logger = GlobalLogger::default();
        logger.verbosity(settings.verbosity);
        if let Some(path) = &settings.path {
            logger.path(path);
        }
        logger
    }

    /// Also write to this file (appending).
    pub fn path<P: AsRef<Path>>(&mut self, path: P) -> &mut Self
    { self.path = Some(path.as_ref().to_owned()); self }

    /// Any integer will be accepted; everything above zero is loud.
    pub fn verbosity(&mut self, level: i32) -> &mut Self
    {
        self.verbosity = match level > 0 {
            true => Verbosity::Loud,
            false => Verbosity::Default,
        };
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Verbosity { Default, Loud }

impl Default for Verbosity {
    fn default() -> Self { Verbosity::Default }
}

impl GlobalLogger {
    /// Install as the global logger.  Fails if one is already installed.
    pub fn apply(&self) -> Result<(), LoggingError>
    {
        use ::std::time::Instant;

        let start = Instant::now();
        let mut fern = ::fern::Dispatch::new();
        fern = fern.format(move |out, message, record| {
                let t = start.elapsed();
                out.finish(format_args!("[{:>4}.{:03}s][{}][{}] {}",
                    t.as_secs(),
                    t.subsec_millis(),
                    record.target(),
                    ColorizedLevel(record.level()),
                    message))
            })
            .level(LevelFilter::Info)
            .level_for("dlin", LevelFilter::Debug)
            .level_for("dlin_linalg", LevelFilter::Debug)
            .level_for("dlin_config", LevelFilter::Debug)
            .level_for("dlin_kernel", match self.verbosity {
                Verbosity::Default => LevelFilter::Debug,
                Verbosity::Loud => LevelFilter::Trace,
            })
            .chain(::std::io::stdout());

        if let Some(path) = self.path.as_ref() {
            fern = fern.chain(::fern::log_file(path)?);
        }

        fern.apply()?;
        Ok(())
    }
}

#[derive(Debug, Copy, Clone)]
pub struct ColorizedLevel(pub Level);
impl fmt::Display for ColorizedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = match self.0 {
            Level::Error => ::ansi_term::Colour::Red.bold(),
            Level::Warn  => ::ansi_term::Colour::Red.normal(),
            Level::Info  => ::ansi_term::Colour::Cyan.bold(),
            Level::Debug => ::ansi_term::Colour::Yellow.dimmed(),
            Level::Trace => ::ansi_term::Colour::Cyan.normal(),
        };
        write!(f, "{}", style.paint(self.0.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_settings() {
        let settings = ::dlin_config::Logging { verbosity: 2, path: Some("out.log".into()) };
        let logger = GlobalLogger::from_settings(&settings);
        assert_eq!(logger.verbosity, Verbosity::Loud);
        assert_eq!(logger.path, Some(PathBuf::from("out.log")));

        let logger = GlobalLogger::from_settings(&Default::default());
        assert_eq!(logger.verbosity, Verbosity::Default);
        assert_eq!(logger.path, None);
    }

    #[test]
    fn colorized_level_keeps_name() {
        assert!(ColorizedLevel(Level::Warn).to_string().contains("WARN"));
    }
}
