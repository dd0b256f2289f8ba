//! I/O abstractions for output destinations.
//!
//! This module provides:
//! - `OutputTarget`: Trait for a destination a writer can be opened on
//! - `StdoutOutput` / `FileOutput`: The destinations the file output uses
//! - `FanOutWriter`: A writer replicating every write to several destinations
//! - `InMemorySink`: In-memory destination for testing

mod fanout;
mod memory;
mod output;
mod std_io;

pub use fanout::FanOutWriter;
pub use memory::InMemorySink;
pub use output::OutputTarget;
pub use std_io::{FileOutput, STDOUT, StdoutOutput};
