//! Write-path performance knobs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ValidationReport;

/// Performance knobs for the ingestion writers and statement execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PerformanceConfig {
    /// Connection pool size for the ingestion writers.
    #[serde(default = "default_connection_pool_size")]
    #[validate(range(min = 1, message = "must be positive"))]
    pub connection_pool_size: u32,
    /// Server-side statement timeout in milliseconds.
    #[serde(default = "default_statement_timeout")]
    #[validate(range(min = 1, message = "must be positive"))]
    pub statement_timeout: u64,
    /// Client-side query timeout in milliseconds.
    #[serde(default = "default_query_timeout")]
    #[validate(range(min = 1, message = "must be positive"))]
    pub query_timeout: u64,
    /// Rows per multi-row INSERT statement.
    #[serde(default = "default_batch_insert_size")]
    #[validate(range(min = 1, message = "must be positive"))]
    pub batch_insert_size: u32,
}

fn default_connection_pool_size() -> u32 {
    25
}

fn default_statement_timeout() -> u64 {
    30_000
}

fn default_query_timeout() -> u64 {
    10_000
}

fn default_batch_insert_size() -> u32 {
    1000
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            connection_pool_size: default_connection_pool_size(),
            statement_timeout: default_statement_timeout(),
            query_timeout: default_query_timeout(),
            batch_insert_size: default_batch_insert_size(),
        }
    }
}

impl PerformanceConfig {
    /// Records every invalid field.
    pub(crate) fn collect_issues(&self, report: &mut ValidationReport) {
        if let Err(errors) = self.validate() {
            report.merge_validator("performance", &errors);
        }
    }
}
