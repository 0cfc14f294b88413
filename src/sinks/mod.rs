//! Sink implementations

pub mod console;
pub mod file;
pub mod network;

pub use console::ConsoleSink;
pub use file::FileSink;
pub use network::NetworkSink;

pub use crate::core::Sink;

use crate::core::{Destination, Result, SinkResolver};

/// The default resolver, backed by real process resources
///
/// Console targets bind the process streams, file paths are opened for
/// append, network addresses are connected.
pub struct ProcessSinkResolver;

impl SinkResolver for ProcessSinkResolver {
    fn open(&self, destination: &Destination) -> Result<Box<dyn Sink>> {
        match destination {
            Destination::Console(target) => Ok(Box::new(ConsoleSink::new(*target))),
            Destination::File { path } => Ok(Box::new(FileSink::new(path)?)),
            Destination::Network { address } => Ok(Box::new(NetworkSink::new(address.clone())?)),
        }
    }
}
