//! Core writer types and traits

pub mod config;
pub mod error;
pub mod log_output;
pub mod metrics;
pub mod signal;
pub mod sink;
pub mod timestamp;
pub mod writer;

pub use config::{SinkFailurePolicy, WriterConfig, DEFAULT_LINE_SEPARATOR, DEFAULT_MAX_BATCH_LENGTH};
pub use error::{Result, WriterError};
pub use log_output::LogOutput;
pub use metrics::WriterMetrics;
pub use signal::{Gate, WakeSignal};
pub use sink::{FnSink, Sink};
pub use timestamp::TimestampFormat;
pub use writer::{AsyncStringWriter, WorkerState};
