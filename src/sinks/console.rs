//! Console sink implementation

use crate::core::{Result, Sink};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleStream {
    #[default]
    Stdout,
    Stderr,
}

/// Writes every batch to the process console, followed by a newline
#[derive(Debug, Default)]
pub struct ConsoleSink {
    stream: ConsoleStream,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stderr() -> Self {
        Self {
            stream: ConsoleStream::Stderr,
        }
    }

    pub fn stream(&self) -> ConsoleStream {
        self.stream
    }
}

impl Sink for ConsoleSink {
    fn write_batch(&mut self, batch: &str) -> Result<()> {
        match self.stream {
            ConsoleStream::Stdout => writeln!(io::stdout().lock(), "{}", batch)?,
            ConsoleStream::Stderr => writeln!(io::stderr().lock(), "{}", batch)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.stream {
            ConsoleStream::Stdout => io::stdout().flush()?,
            ConsoleStream::Stderr => io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
