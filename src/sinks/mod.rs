//! Sink implementations

pub mod console;
pub mod debug;
pub mod file;
pub mod memory;

pub use console::{ConsoleSink, ConsoleStream};
pub use debug::DebugSink;
pub use file::{FileCompression, FileSink};
pub use memory::MemorySink;

pub use crate::core::Sink;
