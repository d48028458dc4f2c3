//! # Line Batch Writer
//!
//! An asynchronous line-batching writer: producers enqueue text lines from
//! any thread, and a single dedicated worker drains them in order, joins them
//! into bounded batches and hands each batch to a pluggable sink.
//!
//! ## Features
//!
//! - **Non-blocking producers**: `enqueue` never waits for the sink
//! - **Ordered delivery**: lines reach the sink in enqueue order
//! - **Lossless shutdown**: `dispose` returns only after every queued line was delivered
//! - **Bounded batches**: `max_batch_length` caps the size of a single sink call
//! - **Multiple targets**: [`LogWriter`] fans lines out to console, debug and file sinks

pub mod core;
pub mod diagnostics;
pub mod log_writer;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        AsyncStringWriter, FnSink, LogOutput, Result, Sink, SinkFailurePolicy, TimestampFormat,
        WorkerState, WriterConfig, WriterError, WriterMetrics,
    };
    pub use crate::diagnostics::DiagnosticLevel;
    pub use crate::log_writer::{LogWriter, LogWriterSettings, ObjectSerialization};
    pub use crate::sinks::{ConsoleSink, DebugSink, FileCompression, FileSink, MemorySink};
}

pub use crate::core::{
    AsyncStringWriter, FnSink, LogOutput, Result, Sink, SinkFailurePolicy, TimestampFormat,
    WorkerState, WriterConfig, WriterError, WriterMetrics, DEFAULT_MAX_BATCH_LENGTH,
};
pub use diagnostics::DiagnosticLevel;
pub use log_writer::{LogWriter, LogWriterSettings, ObjectSerialization};
pub use sinks::{ConsoleSink, DebugSink, FileSink, MemorySink};
