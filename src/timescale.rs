//! Time-series storage tuning.

use serde::{Deserialize, Serialize};

use crate::error::ValidationReport;
use crate::interval::Interval;

/// Compression codec applied to chunks older than `compression_after`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    #[default]
    Lz4,
    Zstd,
    Gzip,
    Snappy,
    None,
}

impl Compression {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lz4 => "lz4",
            Self::Zstd => "zstd",
            Self::Gzip => "gzip",
            Self::Snappy => "snappy",
            Self::None => "none",
        }
    }
}

/// Tuning for the time-series tables: chunking granularity, when aged
/// chunks are compressed, and how long data is kept before it is purged.
///
/// `retention_policy` is required; a purge threshold is never defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimescaleConfig {
    /// Partitioning granularity for new chunks.
    #[serde(default = "default_chunk_time_interval")]
    pub chunk_time_interval: Interval,
    /// Chunk age before the compression policy kicks in.
    #[serde(default = "default_compression_after")]
    pub compression_after: Interval,
    /// Codec used when compressing aged chunks.
    #[serde(default)]
    pub compression_policy: Compression,
    /// Chunk age after which data is purged.
    #[serde(default)]
    pub retention_policy: Interval,
}

impl Default for TimescaleConfig {
    fn default() -> Self {
        Self {
            chunk_time_interval: default_chunk_time_interval(),
            compression_after: default_compression_after(),
            compression_policy: Compression::default(),
            retention_policy: Interval::default(),
        }
    }
}

fn default_chunk_time_interval() -> Interval {
    Interval::parse("30 minutes").expect("literal interval parses")
}

fn default_compression_after() -> Interval {
    Interval::parse("2 hours").expect("literal interval parses")
}

impl TimescaleConfig {
    /// Records every missing or invalid field plus ordering violations.
    pub(crate) fn collect_issues(&self, report: &mut ValidationReport) {
        check_positive(report, "timescale.chunk_time_interval", &self.chunk_time_interval);
        check_positive(report, "timescale.compression_after", &self.compression_after);

        if self.retention_policy.is_unset() {
            report.push("timescale.retention_policy", "is required");
            return;
        }
        check_positive(report, "timescale.retention_policy", &self.retention_policy);

        // Chunks must age through compression before they are purged.
        if self.compression_after >= self.retention_policy {
            report.push(
                "timescale.compression_after",
                "must be shorter than `timescale.retention_policy`",
            );
        }
        if self.chunk_time_interval > self.compression_after {
            report.push(
                "timescale.chunk_time_interval",
                "must not exceed `timescale.compression_after`",
            );
        }
    }
}

fn check_positive(report: &mut ValidationReport, path: &str, interval: &Interval) {
    if interval.is_zero() {
        report.push(path, "must be a positive duration");
    }
}
