//! Standard output and file destinations.

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use super::OutputTarget;

/// Destination name reserved for the process's standard output.
pub const STDOUT: &str = "stdout";

/// Output target for writing to stdout.
#[derive(Debug, Clone)]
pub struct StdoutOutput {
    id: String,
}

impl StdoutOutput {
    /// Create a new stdout output target.
    pub fn new() -> Self {
        Self { id: STDOUT.into() }
    }
}

impl Default for StdoutOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputTarget for StdoutOutput {
    fn id(&self) -> &str {
        &self.id
    }

    fn open(&self) -> io::Result<Box<dyn Write + Send>> {
        Ok(Box::new(io::stdout()))
    }

    fn is_closable(&self) -> bool {
        false
    }
}

/// Output target for writing to files through a buffered writer.
#[derive(Debug, Clone)]
pub struct FileOutput {
    id: String,
    path: PathBuf,
}

impl FileOutput {
    /// Create a new file output target.
    pub fn new(path: PathBuf) -> Self {
        let id = path.to_string_lossy().into_owned();
        Self { id, path }
    }

    /// Get the file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl OutputTarget for FileOutput {
    fn id(&self) -> &str {
        &self.id
    }

    fn open(&self) -> io::Result<Box<dyn Write + Send>> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&self.path)?;
        Ok(Box::new(BufWriter::new(file)))
    }
}
