//! Core audit logger types and traits

pub mod config;
pub mod error;
pub mod logger;
pub mod sink;
pub mod timestamp;

pub use config::{ConsoleTarget, Destination, LoggerConfig};
pub use error::{AuditError, Result};
pub use logger::AuditLogger;
pub use sink::{Sink, SinkResolver};
pub use timestamp::TimestampPattern;
