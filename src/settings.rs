//! Top-level settings document and loader.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::database::ConnectionConfig;
use crate::environment::Environment;
use crate::error::{ConfigError, Result, ValidationReport};
use crate::performance::PerformanceConfig;
use crate::symbols::SymbolsConfig;
use crate::timescale::TimescaleConfig;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "MARKETDATA";

/// Separator for nested keys in environment variable overrides.
const ENV_SEPARATOR: &str = "__";

/// The typed settings document for the ingestion pipeline.
///
/// Loaded once at startup and treated as immutable afterwards;
/// reconfiguration requires a restart. Use [`Settings::for_environment`]
/// to resolve the view a consumer actually runs with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Connection parameters per environment.
    pub database: BTreeMap<String, ConnectionConfig>,
    /// Time-series storage tuning, shared by all environments.
    pub timescale: TimescaleConfig,
    /// Symbol watchlists and batching knobs.
    pub symbols: SymbolsConfig,
    /// Write-path performance knobs.
    pub performance: PerformanceConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: BTreeMap::new(),
            timescale: TimescaleConfig::default(),
            symbols: SymbolsConfig::default(),
            performance: PerformanceConfig::default(),
        }
    }
}

/// Immutable view of the settings resolved for one environment.
#[derive(Debug, Clone, Copy)]
pub struct EnvironmentSettings<'a> {
    /// Environment this view was resolved for.
    pub environment: Environment,
    /// Connection parameters for the environment.
    pub connection: &'a ConnectionConfig,
    /// Ticker watchlist for the environment, in document order.
    pub watchlist: &'a [String],
    /// Shared time-series storage tuning.
    pub timescale: &'a TimescaleConfig,
    /// Shared batching knobs.
    pub symbols: &'a SymbolsConfig,
    /// Shared performance knobs.
    pub performance: &'a PerformanceConfig,
}

impl Settings {
    /// Loads the document at `path`, layers `MARKETDATA_*` environment
    /// overrides on top, and validates the result.
    ///
    /// Nested keys use double underscores, so
    /// `MARKETDATA_DATABASE__DEVELOPMENT__PASSWORD` overrides
    /// `database.development.password`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::FileMissing(path.to_path_buf()));
        }

        let source = config::Config::builder()
            .add_source(config::File::from(path.to_path_buf()).format(config::FileFormat::Yaml))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .map_err(ConfigError::Builder)?;

        let settings: Settings = source
            .try_deserialize()
            .map_err(ConfigError::Deserialization)?;

        settings.validate()?;

        debug!(
            path = %path.display(),
            environments = settings.database.len(),
            "Loaded settings document"
        );
        Ok(settings)
    }

    /// Parses and validates a document from a YAML string.
    ///
    /// Environment variable overrides are not applied; use
    /// [`Settings::load`] for the full layering.
    pub fn from_yaml_str(document: &str) -> Result<Self> {
        let source = config::Config::builder()
            .add_source(config::File::from_str(document, config::FileFormat::Yaml))
            .build()
            .map_err(ConfigError::Builder)?;

        let settings: Settings = source
            .try_deserialize()
            .map_err(ConfigError::Deserialization)?;

        settings.validate()?;
        Ok(settings)
    }

    /// Checks every invariant, aggregating all problems into one report
    /// instead of stopping at the first.
    pub fn validate(&self) -> Result<()> {
        let mut report = ValidationReport::new();

        if self.database.is_empty() {
            report.push("database", "must define at least one environment");
        }
        for (environment, connection) in &self.database {
            connection.collect_issues(&format!("database.{environment}"), &mut report);
        }

        self.timescale.collect_issues(&mut report);
        self.symbols.collect_issues(&mut report);
        self.performance.collect_issues(&mut report);

        report.into_result()
    }

    /// Resolves the view for one environment.
    ///
    /// Environments are mutually exclusive parameter sets; the selected
    /// environment must appear under both `database` and `symbols`.
    pub fn for_environment(&self, environment: Environment) -> Result<EnvironmentSettings<'_>> {
        let connection =
            self.database
                .get(environment.as_str())
                .ok_or(ConfigError::MissingEnvironment {
                    environment,
                    section: "database",
                })?;

        let watchlist =
            self.symbols
                .watchlist(environment.as_str())
                .ok_or(ConfigError::MissingEnvironment {
                    environment,
                    section: "symbols",
                })?;

        Ok(EnvironmentSettings {
            environment,
            connection,
            watchlist,
            timescale: &self.timescale,
            symbols: &self.symbols,
            performance: &self.performance,
        })
    }
}
