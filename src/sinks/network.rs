//! Network sink for remote audit collection
//!
//! Sends audit lines to a remote server over TCP, one line per event.

use crate::core::{AuditError, Result, Sink};
use std::io::Write;
use std::net::TcpStream;
use std::time::Duration;

const WRITE_TIMEOUT: Duration = Duration::from_secs(5);

/// Sends audit lines to a remote TCP endpoint
///
/// The connection is established when the sink is constructed, which is when
/// a logger activates. A write failure drops the connection; by default one
/// reconnect-and-resend attempt is made within the same call before the
/// error propagates.
#[derive(Debug)]
pub struct NetworkSink {
    stream: Option<TcpStream>,
    address: String,
    reconnect_on_error: bool,
}

impl NetworkSink {
    /// Connect to `address` (e.g. "loghost:6514")
    ///
    /// # Errors
    ///
    /// Returns an activation error if the connection cannot be established.
    pub fn new(address: impl Into<String>) -> Result<Self> {
        let address = address.into();
        let stream = Self::connect(&address)?;

        Ok(Self {
            stream: Some(stream),
            address,
            reconnect_on_error: true,
        })
    }

    /// Enable or disable the in-call reconnect attempt
    ///
    /// Default: enabled
    #[must_use]
    pub fn with_reconnect(mut self, enable: bool) -> Self {
        self.reconnect_on_error = enable;
        self
    }

    fn connect(address: &str) -> Result<TcpStream> {
        let stream = TcpStream::connect(address).map_err(|e| {
            AuditError::activation("network", format!("cannot connect to '{}': {}", address, e))
        })?;

        // Timeouts keep log() a bounded call; NODELAY because each event is
        // one small write
        stream.set_write_timeout(Some(WRITE_TIMEOUT))?;
        stream.set_read_timeout(Some(WRITE_TIMEOUT))?;
        stream.set_nodelay(true)?;

        Ok(stream)
    }
}

impl Sink for NetworkSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        let mut payload = String::with_capacity(line.len() + 1);
        payload.push_str(line);
        payload.push('\n');

        let result = if let Some(ref mut stream) = self.stream {
            stream.write_all(payload.as_bytes())
        } else {
            return Err(AuditError::sink("network sink not connected"));
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                // Connection lost
                self.stream = None;

                if self.reconnect_on_error {
                    match Self::connect(&self.address) {
                        Ok(stream) => {
                            self.stream = Some(stream);
                            if let Some(ref mut stream) = self.stream {
                                stream.write_all(payload.as_bytes())?;
                            }
                            Ok(())
                        }
                        Err(reconnect_err) => Err(AuditError::sink(format!(
                            "failed to send audit line and reconnect: {} (reconnect: {})",
                            e, reconnect_err
                        ))),
                    }
                } else {
                    Err(e.into())
                }
            }
        }
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut stream) = self.stream {
            stream.flush()?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            stream.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "network"
    }
}

impl Drop for NetworkSink {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
