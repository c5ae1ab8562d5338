//! Symbol watchlists and batching knobs.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ValidationReport;

/// Ticker shape: uppercase root, optional class suffix (`BRK.B`).
static SYMBOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9]*(\.[A-Z0-9]+)?$").expect("symbol regex is valid"));

/// Symbol watchlists plus the batching knobs shared by all environments.
///
/// Environment keys (`development`, `production`, ...) sit at the same
/// level as the knobs in the document, so the lists are captured through
/// the flattened map. Watchlist order is preserved; duplicates are a
/// validation error rather than silently dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SymbolsConfig {
    /// Ticker watchlist per environment.
    #[serde(flatten)]
    pub watchlists: BTreeMap<String, Vec<String>>,
    /// Records per write batch.
    #[serde(default = "default_batch_size")]
    #[validate(range(min = 1, message = "must be positive"))]
    pub batch_size: u32,
    /// Max seconds before a partial batch is flushed.
    #[serde(default = "default_flush_interval")]
    #[validate(range(min = 1, message = "must be positive"))]
    pub flush_interval: u64,
    /// Buffered records before writers see backpressure.
    #[serde(default = "default_max_queue_size")]
    #[validate(range(min = 1, message = "must be positive"))]
    pub max_queue_size: u32,
}

fn default_batch_size() -> u32 {
    5000
}

fn default_flush_interval() -> u64 {
    2
}

fn default_max_queue_size() -> u32 {
    50_000
}

impl Default for SymbolsConfig {
    fn default() -> Self {
        Self {
            watchlists: BTreeMap::new(),
            batch_size: default_batch_size(),
            flush_interval: default_flush_interval(),
            max_queue_size: default_max_queue_size(),
        }
    }
}

impl SymbolsConfig {
    /// Watchlist for the given environment key.
    pub fn watchlist(&self, environment: &str) -> Option<&[String]> {
        self.watchlists.get(environment).map(Vec::as_slice)
    }

    /// Records every missing or invalid field.
    pub(crate) fn collect_issues(&self, report: &mut ValidationReport) {
        if self.watchlists.is_empty() {
            report.push("symbols", "must define at least one environment watchlist");
        }

        for (environment, symbols) in &self.watchlists {
            let prefix = format!("symbols.{environment}");
            if symbols.is_empty() {
                report.push(prefix, "must list at least one symbol");
                continue;
            }

            let mut seen = HashSet::new();
            for (index, symbol) in symbols.iter().enumerate() {
                if symbol.is_empty() {
                    report.push(format!("{prefix}[{index}]"), "symbol must not be empty");
                } else if !SYMBOL_RE.is_match(symbol) {
                    report.push(
                        format!("{prefix}[{index}]"),
                        format!("`{symbol}` is not an uppercase ticker symbol"),
                    );
                }
                if !seen.insert(symbol.as_str()) {
                    report.push(
                        format!("{prefix}[{index}]"),
                        format!("duplicate symbol `{symbol}`"),
                    );
                }
            }
        }

        if let Err(errors) = self.validate() {
            report.merge_validator("symbols", &errors);
        }
        if self.batch_size > self.max_queue_size {
            report.push(
                "symbols.batch_size",
                "must not exceed `symbols.max_queue_size`",
            );
        }
    }
}
