//! Audit macro for ergonomic event formatting.
//!
//! # Examples
//!
//! ```
//! use audit_trail_system::prelude::*;
//! use audit_trail_system::audit;
//!
//! let config = LoggerConfig::console(ConsoleTarget::StdOut, "%Y-%m-%d %H:%M:%S")?;
//! let logger = AuditLogger::new(config);
//! logger.activate()?;
//!
//! let user = "admin";
//! audit!(logger, "user {} deleted job foo", user)?;
//! # Ok::<(), AuditError>(())
//! ```

/// Log an audit event with automatic formatting.
///
/// Expands to a [`log`](crate::core::AuditLogger::log) call on the given
/// logger and yields its `Result`.
#[macro_export]
macro_rules! audit {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log(&format!($($arg)+))
    };
}
