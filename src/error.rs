//! Error types for configuration loading and validation.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::environment::Environment;

/// Result type alias using our error type.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// A single missing or invalid configuration field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// Dotted key path of the offending field, e.g. `database.development.port`.
    pub path: String,
    /// What is wrong with the value.
    pub message: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Aggregated validation failures for a whole document.
///
/// Every problem is collected before reporting so an operator can fix the
/// document in one pass instead of replaying first-failure aborts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ConfigIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a problem at the given dotted key path.
    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ConfigIssue {
            path: path.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// All recorded issues, in discovery order.
    pub fn issues(&self) -> &[ConfigIssue] {
        &self.issues
    }

    /// Whether any issue was recorded at the given key path.
    pub fn names(&self, path: &str) -> bool {
        self.issues.iter().any(|issue| issue.path == path)
    }

    /// Converts the report into a `Result`, erroring if anything was recorded.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(self))
        }
    }

    /// Folds `validator` derive failures into the report under `prefix`.
    pub(crate) fn merge_validator(&mut self, prefix: &str, errors: &validator::ValidationErrors) {
        for (field, failures) in errors.field_errors() {
            for failure in failures.iter() {
                let message = failure
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("failed `{}` validation", failure.code));
                self.push(format!("{prefix}.{field}"), message);
            }
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.issues.len();
        write!(
            f,
            "configuration is invalid ({count} problem{})",
            if count == 1 { "" } else { "s" }
        )?;
        for issue in &self.issues {
            write!(f, "\n  {issue}")?;
        }
        Ok(())
    }
}

/// Errors raised while loading or resolving the settings document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("configuration file `{}` does not exist", .0.display())]
    FileMissing(PathBuf),

    /// A source failed while assembling the layered configuration.
    #[error("failed to read configuration sources")]
    Builder(#[source] config::ConfigError),

    /// The document was read but could not be parsed into typed settings.
    #[error("malformed configuration document")]
    Deserialization(#[source] config::ConfigError),

    /// The document parsed but one or more fields are missing or invalid.
    #[error("{0}")]
    Validation(ValidationReport),

    /// The selected environment has no entry under the named section.
    #[error("environment `{environment}` is not defined under `{section}`")]
    MissingEnvironment {
        environment: Environment,
        section: &'static str,
    },
}

impl ConfigError {
    /// The validation report, if this is an aggregated validation failure.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Validation(report) => Some(report),
            _ => None,
        }
    }
}
