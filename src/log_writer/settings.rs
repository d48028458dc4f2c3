//! Settings for a [`LogWriter`](super::LogWriter)

use super::serialization::{ObjectSerialization, SerializationOverride};
use crate::core::{LogOutput, TimestampFormat, WriterConfig};
use crate::sinks::FileCompression;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Default directory that log files are written to
pub const DEFAULT_LOG_DIRECTORY: &str = "Logs";

/// # Example
///
/// ```
/// use line_batch_writer::{LogOutput, LogWriterSettings};
/// use line_batch_writer::sinks::FileCompression;
///
/// let settings = LogWriterSettings::new()
///     .with_directory("/tmp/app-logs")
///     .with_output_target(LogOutput::FILE | LogOutput::CONSOLE)
///     .with_compression(FileCompression::Gzip);
///
/// assert!(settings.output_target.contains(LogOutput::FILE));
/// ```
#[derive(Clone)]
pub struct LogWriterSettings {
    /// Compression applied to the log file
    pub compression: FileCompression,

    pub directory: PathBuf,

    pub serialization: ObjectSerialization,

    /// Renderer used by `Auto` and `Override` serialization
    pub serialization_override: Option<SerializationOverride>,

    /// Targets used when a write does not name its own
    pub output_target: LogOutput,

    /// File name inside `directory`; generated from the start time and
    /// executable name when unset
    pub log_file_name: Option<String>,

    pub timestamp_format: TimestampFormat,

    /// Configuration shared by every target's writer
    pub writer_config: WriterConfig,
}

impl LogWriterSettings {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_compression(mut self, compression: FileCompression) -> Self {
        self.compression = compression;
        self
    }

    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    #[must_use]
    pub fn with_serialization(mut self, method: ObjectSerialization) -> Self {
        self.serialization = method;
        self
    }

    #[must_use]
    pub fn with_serialization_override<F>(mut self, f: F) -> Self
    where
        F: Fn(&serde_json::Value) -> String + Send + Sync + 'static,
    {
        self.serialization_override = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn with_output_target(mut self, target: LogOutput) -> Self {
        self.output_target = target;
        self
    }

    #[must_use]
    pub fn with_log_file_name(mut self, name: impl Into<String>) -> Self {
        self.log_file_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_writer_config(mut self, config: WriterConfig) -> Self {
        self.writer_config = config;
        self
    }
}

impl Default for LogWriterSettings {
    fn default() -> Self {
        Self {
            compression: FileCompression::None,
            directory: PathBuf::from(DEFAULT_LOG_DIRECTORY),
            serialization: ObjectSerialization::Auto,
            serialization_override: None,
            output_target: LogOutput::ALL,
            log_file_name: None,
            timestamp_format: TimestampFormat::default(),
            writer_config: WriterConfig::default(),
        }
    }
}

impl fmt::Debug for LogWriterSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogWriterSettings")
            .field("compression", &self.compression)
            .field("directory", &self.directory)
            .field("serialization", &self.serialization)
            .field("serialization_override", &self.serialization_override.is_some())
            .field("output_target", &self.output_target)
            .field("log_file_name", &self.log_file_name)
            .field("timestamp_format", &self.timestamp_format)
            .field("writer_config", &self.writer_config)
            .finish()
    }
}
