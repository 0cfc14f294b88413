//! File sink implementation

use crate::core::{AuditError, Result, Sink};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Appends audit lines to a file
///
/// The file is opened for append when the sink is constructed, which is when
/// a logger activates; a logger re-activated on the same path keeps
/// appending, it never truncates. `close` flushes and releases the handle so
/// a replaced sink does not leak it.
#[derive(Debug)]
pub struct FileSink {
    writer: Option<BufWriter<File>>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                AuditError::activation("file", format!("cannot open '{}': {}", path.display(), e))
            })?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
        })
    }
}

impl Sink for FileSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| AuditError::sink("file sink is closed"))?;

        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer
                .flush()
                .map_err(|e| AuditError::io_operation("closing file sink", "flush failed", e))?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Ensure all buffered data reaches the file
        let _ = self.flush();
    }
}
