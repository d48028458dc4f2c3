//! Writer configuration
//!
//! Batch capacity, line separator and sink failure handling for an
//! [`AsyncStringWriter`](super::AsyncStringWriter). Configurations can be
//! built fluently or loaded from JSON.

use super::error::{Result, WriterError};
use serde::{Deserialize, Serialize};

/// Default maximum batch length in bytes (32 KiB)
pub const DEFAULT_MAX_BATCH_LENGTH: usize = 32 * 1024;

/// Default separator placed between lines of a batch
pub const DEFAULT_LINE_SEPARATOR: &str = "\n";

/// Default name of the background worker thread
pub const DEFAULT_THREAD_NAME: &str = "line-batch-writer";

/// What the worker does when a sink returns an error or panics
///
/// The worker never terminates because of a sink failure, so `dispose`
/// always completes.
///
/// # Example
///
/// ```
/// use line_batch_writer::SinkFailurePolicy;
///
/// let policy: SinkFailurePolicy =
///     serde_json::from_str(r#"{"mode":"retry","attempts":3}"#).unwrap();
/// assert_eq!(policy, SinkFailurePolicy::Retry { attempts: 3 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SinkFailurePolicy {
    /// Report the failure and discard the batch
    #[default]
    DropBatch,

    /// Re-submit the same batch up to `attempts` more times, then discard it
    Retry { attempts: u32 },
}

impl SinkFailurePolicy {
    /// Number of extra attempts after the first failed one
    pub fn retries(&self) -> u32 {
        match self {
            SinkFailurePolicy::DropBatch => 0,
            SinkFailurePolicy::Retry { attempts } => *attempts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Batch length (bytes) that forces an early flush mid-drain
    pub max_batch_length: usize,
    pub line_separator: String,
    pub sink_failure_policy: SinkFailurePolicy,
    pub thread_name: String,
}

impl WriterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_batch_length(mut self, max_batch_length: usize) -> Self {
        self.max_batch_length = max_batch_length;
        self
    }

    #[must_use]
    pub fn with_line_separator(mut self, separator: impl Into<String>) -> Self {
        self.line_separator = separator.into();
        self
    }

    #[must_use]
    pub fn with_sink_failure_policy(mut self, policy: SinkFailurePolicy) -> Self {
        self.sink_failure_policy = policy;
        self
    }

    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Load a configuration from JSON; missing fields take their defaults
    ///
    /// # Example
    ///
    /// ```
    /// use line_batch_writer::WriterConfig;
    ///
    /// let config = WriterConfig::from_json_str(r#"{"max_batch_length": 1024}"#).unwrap();
    /// assert_eq!(config.max_batch_length, 1024);
    /// assert_eq!(config.line_separator, "\n");
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_batch_length == 0 {
            return Err(WriterError::config(
                "WriterConfig",
                "max_batch_length must be greater than zero",
            ));
        }
        if self.line_separator.is_empty() {
            return Err(WriterError::config(
                "WriterConfig",
                "line_separator must not be empty",
            ));
        }
        if self.thread_name.contains('\0') {
            return Err(WriterError::config(
                "WriterConfig",
                "thread_name must not contain NUL bytes",
            ));
        }
        Ok(())
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            max_batch_length: DEFAULT_MAX_BATCH_LENGTH,
            line_separator: DEFAULT_LINE_SEPARATOR.to_string(),
            sink_failure_policy: SinkFailurePolicy::default(),
            thread_name: DEFAULT_THREAD_NAME.to_string(),
        }
    }
}
