//! Fan-out writer replicating writes to several destinations.

use std::fmt;
use std::io::{self, Write};

struct Destination {
    id: String,
    writer: Box<dyn Write + Send>,
    closable: bool,
}

/// A writer that forwards every write to each destination in insertion order.
///
/// A write stops at the first failing destination and returns its error;
/// destinations after it do not receive that write.
#[derive(Default)]
pub struct FanOutWriter {
    destinations: Vec<Destination>,
}

impl fmt::Debug for FanOutWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FanOutWriter")
            .field(
                "destinations",
                &self.destinations.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl FanOutWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a destination. Only `closable` destinations are released by `close`.
    pub fn push(&mut self, id: impl Into<String>, writer: Box<dyn Write + Send>, closable: bool) {
        self.destinations.push(Destination {
            id: id.into(),
            writer,
            closable,
        });
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Number of destinations owned by this writer.
    pub fn closable_count(&self) -> usize {
        self.destinations.iter().filter(|d| d.closable).count()
    }

    /// Identifiers of all destinations, in write order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.destinations.iter().map(|d| d.id.as_str())
    }

    /// Flush and release every closable destination.
    ///
    /// Every destination is attempted. The failures are returned in order as
    /// `(id, error)` pairs. Non-closable destinations are flushed only.
    pub fn close(self) -> Vec<(String, io::Error)> {
        let mut failures = Vec::new();
        for mut dest in self.destinations {
            let flushed = dest.writer.flush();
            if !dest.closable {
                if let Err(e) = flushed {
                    log::debug!("could not flush {}: {e}", dest.id);
                }
                continue;
            }
            if let Err(e) = flushed {
                failures.push((dest.id, e));
            }
        }
        failures
    }
}

impl Write for FanOutWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for dest in &mut self.destinations {
            dest.writer.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        for dest in &mut self.destinations {
            dest.writer.flush()?;
        }
        Ok(())
    }
}
