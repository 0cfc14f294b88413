//! Logger configuration types
//!
//! A [`LoggerConfig`] is immutable once constructed and fully validated at
//! construction time. Reconfiguring a logger means building a new
//! configuration and a new logger, never mutating fields in place.

use crate::core::error::{AuditError, Result};
use crate::core::timestamp::TimestampPattern;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// The two process console streams a console logger can bind to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsoleTarget {
    StdOut,
    StdErr,
}

impl ConsoleTarget {
    /// The closed set of valid targets, in presentation order
    ///
    /// Configuration front ends use this to fill a selection control rather
    /// than hard-coding the variants.
    pub const ALL: [ConsoleTarget; 2] = [ConsoleTarget::StdOut, ConsoleTarget::StdErr];

    pub fn to_str(&self) -> &'static str {
        match self {
            ConsoleTarget::StdOut => "STD_OUT",
            ConsoleTarget::StdErr => "STD_ERR",
        }
    }
}

impl fmt::Display for ConsoleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for ConsoleTarget {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AuditError::null_field("destination"));
        }
        match trimmed.to_uppercase().as_str() {
            "STD_OUT" | "STDOUT" => Ok(ConsoleTarget::StdOut),
            "STD_ERR" | "STDERR" => Ok(ConsoleTarget::StdErr),
            _ => Err(AuditError::unsupported_destination(trimmed)),
        }
    }
}

/// Where audit lines are delivered
///
/// The set is closed; anything outside it is rejected before a logger is
/// constructed. The console form is bound to a process stream, the file and
/// network forms carry the descriptor needed to open their sink.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    Console(ConsoleTarget),
    File { path: PathBuf },
    Network { address: String },
}

impl Destination {
    /// Short name of the sink kind this destination resolves to
    pub fn kind(&self) -> &'static str {
        match self {
            Destination::Console(_) => "console",
            Destination::File { .. } => "file",
            Destination::Network { .. } => "network",
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Destination::Console(_) => Ok(()),
            Destination::File { path } => {
                if path.as_os_str().is_empty() {
                    Err(AuditError::null_field("path"))
                } else {
                    Ok(())
                }
            }
            Destination::Network { address } => {
                if address.trim().is_empty() {
                    Err(AuditError::null_field("address"))
                } else {
                    Ok(())
                }
            }
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Console(target) => write!(f, "console:{}", target),
            Destination::File { path } => write!(f, "file:{}", path.display()),
            Destination::Network { address } => write!(f, "network:{}", address),
        }
    }
}

/// Immutable, validated logger configuration
///
/// Both fields are checked here so an invalid destination or timestamp
/// pattern fails construction, never first use. Two configurations compare
/// equal iff destination and pattern are equal, which is what the host uses
/// to deduplicate loggers when a configured list is reloaded.
///
/// # Examples
///
/// ```
/// use audit_trail_system::core::{ConsoleTarget, LoggerConfig};
///
/// let config = LoggerConfig::console(ConsoleTarget::StdOut, "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(config.pattern().as_str(), "%Y-%m-%d %H:%M:%S");
///
/// assert!(LoggerConfig::console(ConsoleTarget::StdOut, "%Q").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoggerConfig {
    destination: Destination,
    pattern: TimestampPattern,
}

impl LoggerConfig {
    /// Validate and build a configuration
    ///
    /// # Errors
    ///
    /// [`AuditError::NullField`] for an empty pattern, path, or address;
    /// [`AuditError::InvalidPattern`] for an uncompilable pattern.
    pub fn new(destination: Destination, pattern: &str) -> Result<Self> {
        destination.validate()?;
        let pattern = TimestampPattern::compile(pattern)?;
        Ok(Self {
            destination,
            pattern,
        })
    }

    /// Configuration for a console logger
    pub fn console(target: ConsoleTarget, pattern: &str) -> Result<Self> {
        Self::new(Destination::Console(target), pattern)
    }

    /// Configuration for a file logger appending to `path`
    pub fn file(path: impl Into<PathBuf>, pattern: &str) -> Result<Self> {
        Self::new(Destination::File { path: path.into() }, pattern)
    }

    /// Configuration for a network logger sending to `address`
    pub fn network(address: impl Into<String>, pattern: &str) -> Result<Self> {
        Self::new(
            Destination::Network {
                address: address.into(),
            },
            pattern,
        )
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn pattern(&self) -> &TimestampPattern {
        &self.pattern
    }
}
