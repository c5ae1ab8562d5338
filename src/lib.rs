//! Typed configuration for the market data ingestion pipeline.
//!
//! The settings document is a YAML file with four sections: `database`
//! (connection parameters per environment), `timescale` (time-series
//! storage tuning), `symbols` (watchlists and batching), and
//! `performance` (write-path knobs). [`Settings::load`] layers
//! `MARKETDATA_*` environment overrides on top of the file, validates
//! every field at once, and hands back an immutable document that
//! [`Settings::for_environment`] resolves into a per-environment view.

pub mod database;
pub mod environment;
pub mod error;
pub mod interval;
pub mod performance;
pub mod secret;
pub mod settings;
pub mod symbols;
pub mod telemetry;
pub mod timescale;

pub use database::ConnectionConfig;
pub use environment::{Environment, ParseEnvironmentError, ENVIRONMENT_ENV_VAR};
pub use error::{ConfigError, ConfigIssue, Result, ValidationReport};
pub use interval::{Interval, IntervalParseError};
pub use performance::PerformanceConfig;
pub use secret::Secret;
pub use settings::{EnvironmentSettings, Settings, ENV_PREFIX};
pub use symbols::SymbolsConfig;
pub use timescale::{Compression, TimescaleConfig};
