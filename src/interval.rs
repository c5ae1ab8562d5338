//! Human-readable duration intervals ("30 minutes", "7 days").

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A duration field parsed from an interval string such as `"30 minutes"`.
///
/// The original spelling is preserved so a loaded document can be written
/// back without rewriting `"2 hours"` as `"7200s"`. Equality and ordering
/// compare the parsed duration, so `"60 minutes"` equals `"1 hour"`.
#[derive(Debug, Clone, Default)]
pub struct Interval {
    text: String,
    duration: Duration,
}

/// Error for an interval string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{text}` is not a valid interval: {reason}")]
pub struct IntervalParseError {
    text: String,
    reason: String,
}

impl Interval {
    /// Parses an interval string. See [`FromStr`] for the accepted syntax.
    pub fn parse(text: &str) -> Result<Self, IntervalParseError> {
        text.parse()
    }

    /// The parsed duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whole seconds of the parsed duration.
    pub fn as_secs(&self) -> u64 {
        self.duration.as_secs()
    }

    /// The original interval spelling.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the parsed duration is zero.
    pub fn is_zero(&self) -> bool {
        self.duration.is_zero()
    }

    /// Whether the field was absent from the document. Validation turns
    /// this into a named issue; a validated interval is never unset.
    pub(crate) fn is_unset(&self) -> bool {
        self.text.is_empty()
    }
}

impl FromStr for Interval {
    type Err = IntervalParseError;

    /// Accepts `humantime` units (`seconds`, `minutes`, `hours`, `days`, ...)
    /// with or without a space between value and unit: `"30 minutes"`,
    /// `"30min"`, and `"1 hour 30 minutes"` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(IntervalParseError {
                text: s.to_string(),
                reason: "empty string".to_string(),
            });
        }

        // humantime wants the unit glued to its value.
        let normalized = trimmed
            .split_whitespace()
            .collect::<String>()
            .to_ascii_lowercase();

        let duration =
            humantime::parse_duration(&normalized).map_err(|e| IntervalParseError {
                text: s.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            text: trimmed.to_string(),
            duration,
        })
    }
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        self.duration == other.duration
    }
}

impl Eq for Interval {}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.duration.cmp(&other.duration)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Interval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
