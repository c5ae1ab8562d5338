//! Runtime environment selection.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Environment variable naming the active environment.
pub const ENVIRONMENT_ENV_VAR: &str = "MARKETDATA_ENVIRONMENT";

/// Runtime environment whose `database.<env>` and `symbols.<env>` entries
/// the loader resolves. Environments are mutually exclusive parameter
/// sets; nothing is merged across them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

/// Error for an unrecognized environment name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a supported environment; use `development`, `staging`, or `production`")]
pub struct ParseEnvironmentError(String);

impl Environment {
    /// Key used for this environment in the settings document.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }

    /// Loads the environment from `MARKETDATA_ENVIRONMENT`.
    ///
    /// Defaults to [`Environment::Development`] if the variable is not set.
    pub fn from_env() -> Result<Self, ParseEnvironmentError> {
        match std::env::var(ENVIRONMENT_ENV_VAR) {
            Ok(value) => value.parse(),
            Err(_) => Ok(Self::default()),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ParseEnvironmentError(other.to_string())),
        }
    }
}
