//! Timestamp pattern compilation and rendering
//!
//! Audit lines are prefixed with a timestamp rendered from a user-supplied
//! strftime pattern. The pattern is validated when the configuration is
//! built, so an unparseable pattern can never reach the write path.

use crate::core::error::{AuditError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated strftime timestamp pattern
///
/// Compilation rejects empty input and unrecognized format directives up
/// front. Rendering re-derives the parsed items on every call, so a single
/// pattern can be formatted from any number of threads without shared
/// scratch state.
///
/// Timestamps are rendered in the host's local timezone, which is treated
/// as ambient configuration rather than a parameter.
///
/// # Examples
///
/// ```
/// use audit_trail_system::core::TimestampPattern;
///
/// let pattern = TimestampPattern::compile("%Y-%m-%d %H:%M:%S").unwrap();
/// let rendered = pattern.format_now();
/// assert_eq!(rendered.len(), 19);
///
/// assert!(TimestampPattern::compile("%Q").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimestampPattern {
    pattern: String,
}

impl TimestampPattern {
    /// Compile a strftime pattern, rejecting invalid input
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::NullField`] for empty or whitespace-only input
    /// and [`AuditError::InvalidPattern`] when the pattern contains a
    /// directive chrono does not recognize.
    pub fn compile(pattern: &str) -> Result<Self> {
        if pattern.trim().is_empty() {
            return Err(AuditError::null_field("timestamp_pattern"));
        }

        for item in StrftimeItems::new(pattern) {
            if item == Item::Error {
                return Err(AuditError::invalid_pattern(
                    pattern,
                    "unrecognized format directive",
                ));
            }
        }

        Ok(Self {
            pattern: pattern.to_string(),
        })
    }

    /// The raw pattern string this was compiled from
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Render a point in time with this pattern
    ///
    /// Deterministic for a given pattern and instant.
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        datetime
            .format_with_items(StrftimeItems::new(&self.pattern))
            .to_string()
    }

    /// Render the current instant with this pattern
    #[must_use]
    pub fn format_now(&self) -> String {
        self.format(&Local::now())
    }
}

impl fmt::Display for TimestampPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

impl TryFrom<String> for TimestampPattern {
    type Error = AuditError;

    fn try_from(value: String) -> Result<Self> {
        Self::compile(&value)
    }
}

impl From<TimestampPattern> for String {
    fn from(pattern: TimestampPattern) -> Self {
        pattern.pattern
    }
}
