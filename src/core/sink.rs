//! Sink trait for audit line destinations

use crate::core::config::Destination;
use crate::core::error::Result;

/// A destination that accepts complete text lines
///
/// Sinks are only ever driven from behind the owning logger's lock, so
/// implementations see one call at a time and need `Send` but no internal
/// synchronization.
pub trait Sink: Send {
    /// Append one line. `line` carries no trailing newline; the sink adds
    /// its own terminator.
    fn write_line(&mut self, line: &str) -> Result<()>;

    fn flush(&mut self) -> Result<()>;

    /// Release any owned resources. Called when the sink is replaced by a
    /// re-activation; process-owned streams only need the default flush.
    fn close(&mut self) -> Result<()> {
        self.flush()
    }

    fn name(&self) -> &str;
}

/// Resolves a validated destination into a live sink
///
/// Activation goes through a resolver instead of reading fixed process
/// globals, so tests can substitute an in-memory sink for the real console
/// streams.
pub trait SinkResolver {
    fn open(&self, destination: &Destination) -> Result<Box<dyn Sink>>;
}
