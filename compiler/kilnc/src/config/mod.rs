//! Driver configuration from flags and the environment.

use kiln_diagnostic::emitter::ColorMode;
use kiln_diagnostic::Severity;

/// Environment variable read for the default color mode.
pub const COLOR_ENV: &str = "KILN_COLOR";

/// Invalid command-line flag or environment value.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown option `{0}`")]
    UnknownFlag(String),
    #[error("invalid value for `{name}`: {reason}")]
    InvalidValue { name: String, reason: String },
}

/// How a session reports and what it runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Severity at which a diagnostic fails the run.
    pub threshold: Severity,
    pub color: ColorMode,
    /// Run semantic checks after parsing.
    pub run_checks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            threshold: Severity::Error,
            color: ColorMode::Auto,
            run_checks: true,
        }
    }
}

impl Config {
    /// Config for tests: no colors, checks on.
    pub fn plain() -> Self {
        Config {
            color: ColorMode::Never,
            ..Config::default()
        }
    }

    /// Apply the value of [`COLOR_ENV`], if set.
    pub fn with_env_color(mut self, value: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(value) = value {
            self.color = value.parse().map_err(|reason| ConfigError::InvalidValue {
                name: COLOR_ENV.to_string(),
                reason,
            })?;
        }
        Ok(self)
    }

    /// Apply `--color=`, `--threshold=` and `--no-check`, returning the
    /// remaining positional arguments in order.
    ///
    /// Flags override the environment.
    pub fn apply_args<S: AsRef<str>>(
        &mut self,
        args: impl IntoIterator<Item = S>,
    ) -> Result<Vec<String>, ConfigError> {
        let mut positional = Vec::new();
        for arg in args {
            let arg = arg.as_ref();
            if let Some(value) = arg.strip_prefix("--color=") {
                self.color = value.parse().map_err(|reason| ConfigError::InvalidValue {
                    name: "--color".to_string(),
                    reason,
                })?;
            } else if let Some(value) = arg.strip_prefix("--threshold=") {
                self.threshold = value.parse().map_err(|reason| ConfigError::InvalidValue {
                    name: "--threshold".to_string(),
                    reason,
                })?;
            } else if arg == "--no-check" {
                self.run_checks = false;
            } else if arg.starts_with('-') && arg != "-" {
                return Err(ConfigError::UnknownFlag(arg.to_string()));
            } else {
                positional.push(arg.to_string());
            }
        }
        Ok(positional)
    }
}
