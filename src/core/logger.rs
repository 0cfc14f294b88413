//! Audit logger implementation

use crate::core::config::LoggerConfig;
use crate::core::error::{AuditError, Result};
use crate::core::sink::{Sink, SinkResolver};
use crate::core::timestamp::TimestampPattern;
use crate::sinks::ProcessSinkResolver;
use chrono::Local;
use parking_lot::Mutex;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Resources bound by the last successful activation
///
/// Replaced as one unit under the instance lock, so a concurrent `log`
/// observes either the old pair or the new pair, never a torn mix.
struct BoundResources {
    sink: Box<dyn Sink>,
    formatter: TimestampPattern,
}

/// A sink-bound audit logger
///
/// Construction takes a validated [`LoggerConfig`] and yields an inert
/// logger; [`activate`](AuditLogger::activate) resolves the configuration
/// into a live sink and compiled formatter, and may be called again on every
/// host configuration reload. [`log`](AuditLogger::log) appends one
/// timestamped line per event and is safe to call from any number of threads,
/// concurrently with re-activation.
///
/// Two loggers are equal iff their configurations are equal, independent of
/// whether either has been activated.
///
/// # Examples
///
/// ```
/// use audit_trail_system::core::{AuditLogger, ConsoleTarget, LoggerConfig};
///
/// let config = LoggerConfig::console(ConsoleTarget::StdOut, "%Y-%m-%d %H:%M:%S")?;
/// let logger = AuditLogger::new(config);
/// logger.activate()?;
/// logger.log("user admin deleted job foo")?;
/// # Ok::<(), audit_trail_system::core::AuditError>(())
/// ```
pub struct AuditLogger {
    config: LoggerConfig,
    /// Guards the bound pair and serializes line writes
    bound: Mutex<Option<BoundResources>>,
}

impl AuditLogger {
    /// Build an inert logger
    ///
    /// No resources are bound until [`activate`](AuditLogger::activate) is
    /// called. All validation already happened when `config` was built, so
    /// construction itself cannot fail.
    #[must_use]
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            config,
            bound: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Whether a sink is currently bound
    pub fn is_active(&self) -> bool {
        self.bound.lock().is_some()
    }

    /// Resolve the configured destination into live resources
    ///
    /// Uses the process-backed resolver: console targets bind the real
    /// stdout/stderr streams, file paths are opened for append, network
    /// addresses are connected. See
    /// [`activate_with`](AuditLogger::activate_with) to substitute a
    /// resolver.
    pub fn activate(&self) -> Result<()> {
        self.activate_with(&ProcessSinkResolver)
    }

    /// Resolve the configured destination through `resolver` and bind the
    /// resulting sink together with a freshly compiled formatter
    ///
    /// Idempotent: each call rebuilds the pair from scratch, closes the
    /// previously bound sink, and swaps the new pair in under the instance
    /// lock. A resolver failure leaves the previous binding untouched, so a
    /// logger that was active stays active on its last-known-good resources.
    pub fn activate_with(&self, resolver: &dyn SinkResolver) -> Result<()> {
        // Fully build the replacement before taking the lock; a failure here
        // must not disturb in-flight writes.
        let next = BoundResources {
            sink: resolver.open(self.config.destination())?,
            formatter: self.config.pattern().clone(),
        };

        let mut bound = self.bound.lock();
        if let Some(previous) = bound.as_mut() {
            if let Err(e) = previous.sink.close() {
                eprintln!(
                    "[AUDIT ERROR] failed to close replaced {} sink: {}",
                    previous.sink.name(),
                    e
                );
            }
        }
        *bound = Some(next);
        Ok(())
    }

    /// Append one timestamped line for `event`
    ///
    /// The line has the form `<timestamp> - <event>`, rendered with the
    /// currently bound formatter at call time. The whole
    /// format-and-write sequence runs under the instance lock, so concurrent
    /// calls never interleave partial lines; ordering across threads is
    /// whatever the sink observes.
    ///
    /// Event text is passed through verbatim, embedded newlines included.
    ///
    /// # Errors
    ///
    /// [`AuditError::NotActivated`] if called before the first activation;
    /// otherwise only sink write failures.
    pub fn log(&self, event: &str) -> Result<()> {
        let mut bound = self.bound.lock();
        let bound = bound.as_mut().ok_or(AuditError::NotActivated)?;

        let line = format!("{} - {}", bound.formatter.format(&Local::now()), event);
        bound.sink.write_line(&line)?;
        bound.sink.flush()
    }
}

impl fmt::Debug for AuditLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditLogger")
            .field("config", &self.config)
            .field("active", &self.is_active())
            .finish()
    }
}

impl PartialEq for AuditLogger {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
    }
}

impl Eq for AuditLogger {}

impl Hash for AuditLogger {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.config.hash(state);
    }
}
