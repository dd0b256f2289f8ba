//! Output target trait definition.

use std::fmt::Debug;
use std::io::Write;

/// Trait for synchronous output destinations.
///
/// Implementors provide a way to open a writable stream to various destinations
/// such as files, stdout, or in-memory buffers.
pub trait OutputTarget: Send + Sync + Debug {
    /// Returns a unique identifier for this output target.
    ///
    /// This is used for error messages and logging.
    /// Convention: "stdout" for standard output, file path for files.
    fn id(&self) -> &str;

    /// Open the target for writing, truncating any existing content.
    fn open(&self) -> std::io::Result<Box<dyn Write + Send>>;

    /// Whether the opened writer is owned by the output and released on close.
    ///
    /// Process streams return `false`: they are flushed but never closed.
    fn is_closable(&self) -> bool {
        true
    }
}
