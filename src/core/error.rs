//! Error types for the line batch writer

pub type Result<T> = std::result::Result<T, WriterError>;

#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// `dispose` was called on a writer that is already disposed
    #[error("Writer already disposed")]
    AlreadyDisposed,

    /// The worker has finished its final drain and no longer accepts lines
    #[error("Writer stopped: no further lines are accepted")]
    WriterStopped,

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A sink returned an error for a batch
    #[error("Sink '{sink}' failed: {message}")]
    SinkFailed { sink: String, message: String },

    /// A sink panicked while handling a batch
    #[error("Sink '{sink}' panicked: {message}")]
    SinkPanicked { sink: String, message: String },

    /// File lock error
    #[error("Failed to acquire file lock on '{path}'")]
    FileLock { path: String },

    /// The background worker thread could not be started
    #[error("Failed to spawn worker thread '{name}': {source}")]
    WorkerSpawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The background worker thread terminated by panicking
    #[error("Worker thread panicked: {0}")]
    WorkerPanicked(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl WriterError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        WriterError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        WriterError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a sink failure error
    pub fn sink(sink: impl Into<String>, message: impl Into<String>) -> Self {
        WriterError::SinkFailed {
            sink: sink.into(),
            message: message.into(),
        }
    }

    pub fn sink_panicked(sink: impl Into<String>, message: impl Into<String>) -> Self {
        WriterError::SinkPanicked {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create a file lock error
    pub fn file_lock(path: impl Into<String>) -> Self {
        WriterError::FileLock { path: path.into() }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        WriterError::Other(msg.into())
    }

    /// Whether this error reports API misuse rather than an operational failure
    pub fn is_misuse(&self) -> bool {
        matches!(self, WriterError::AlreadyDisposed | WriterError::WriterStopped)
    }
}

/// Extract a readable message from a panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = WriterError::config("WriterConfig", "max_batch_length must be positive");
        assert!(matches!(err, WriterError::InvalidConfiguration { .. }));

        let err = WriterError::sink("file", "disk full");
        assert!(matches!(err, WriterError::SinkFailed { .. }));

        let err = WriterError::file_lock("/var/log/app.log");
        assert!(matches!(err, WriterError::FileLock { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = WriterError::sink("console", "broken pipe");
        assert_eq!(err.to_string(), "Sink 'console' failed: broken pipe");

        let err = WriterError::config("WriterConfig", "empty separator");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for WriterConfig: empty separator"
        );

        assert_eq!(WriterError::AlreadyDisposed.to_string(), "Writer already disposed");
    }

    #[test]
    fn test_misuse_classification() {
        assert!(WriterError::AlreadyDisposed.is_misuse());
        assert!(WriterError::WriterStopped.is_misuse());
        assert!(!WriterError::other("boom").is_misuse());
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("static str");
        assert_eq!(panic_message(&*payload), "static str");

        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(&*payload), "owned");

        let payload: Box<dyn std::any::Any + Send> = Box::new(42u32);
        assert_eq!(panic_message(&*payload), "Unknown panic");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = WriterError::io_operation("opening log file", "cannot open", io_err);

        assert!(err.to_string().contains("opening log file"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
