//! Console sink implementation

use crate::core::{ConsoleTarget, Result, Sink};
use std::io::{self, Write};

/// Writes audit lines to one of the process console streams
///
/// The stream handle is bound at construction, which is when a logger
/// activates. Console streams are process-owned, so `close` only flushes.
pub struct ConsoleSink {
    handle: StreamHandle,
}

enum StreamHandle {
    StdOut(io::Stdout),
    StdErr(io::Stderr),
}

impl ConsoleSink {
    /// Bind to the live stream for `target`
    #[must_use]
    pub fn new(target: ConsoleTarget) -> Self {
        let handle = match target {
            ConsoleTarget::StdOut => StreamHandle::StdOut(io::stdout()),
            ConsoleTarget::StdErr => StreamHandle::StdErr(io::stderr()),
        };
        Self { handle }
    }
}

impl Sink for ConsoleSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        // Hold the stream's own lock for the whole line so output from other
        // parts of the process cannot split it.
        match &mut self.handle {
            StreamHandle::StdOut(out) => {
                let mut lock = out.lock();
                writeln!(lock, "{}", line)?;
            }
            StreamHandle::StdErr(err) => {
                let mut lock = err.lock();
                writeln!(lock, "{}", line)?;
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match &mut self.handle {
            StreamHandle::StdOut(out) => out.flush()?,
            StreamHandle::StdErr(err) => err.flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
