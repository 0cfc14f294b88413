//! # Audit Trail System
//!
//! A thread-safe audit-event logging sink with reconfigurable console, file,
//! and network destinations.
//!
//! ## Features
//!
//! - **Eager validation**: destinations and timestamp patterns are checked
//!   when a configuration is built, never at first use
//! - **Atomic rebinding**: re-activation swaps the bound sink and formatter
//!   as one unit, without losing or corrupting in-flight writes
//! - **Thread safe**: any number of threads may log through one instance,
//!   concurrently with configuration reloads
//! - **Multiple sinks**: console, file, and network destinations behind one
//!   contract

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        AuditError, AuditLogger, ConsoleTarget, Destination, LoggerConfig, Result, Sink,
        SinkResolver, TimestampPattern,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, NetworkSink, ProcessSinkResolver};
}

pub use core::{
    AuditError, AuditLogger, ConsoleTarget, Destination, LoggerConfig, Result, Sink, SinkResolver,
    TimestampPattern,
};
pub use sinks::{ConsoleSink, FileSink, NetworkSink, ProcessSinkResolver};
