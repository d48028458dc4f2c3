//! Formatting macros for writers and the diagnostic queue.
//!
//! These macros provide a `format!`-style interface on top of
//! [`LogWriter::write_line`](crate::LogWriter::write_line),
//! [`AsyncStringWriter::enqueue`](crate::AsyncStringWriter::enqueue) and
//! [`diagnostics::log`](crate::diagnostics::log).
//!
//! # Examples
//!
//! ```
//! use line_batch_writer::prelude::*;
//! use line_batch_writer::enqueue;
//!
//! let sink = MemorySink::new();
//! let writer = AsyncStringWriter::new(sink.clone()).unwrap();
//!
//! let port = 8080;
//! enqueue!(writer, "listening on port {}", port).unwrap();
//! writer.dispose().unwrap();
//!
//! assert_eq!(sink.lines(), vec!["listening on port 8080"]);
//! ```

/// Enqueue a formatted line on an [`AsyncStringWriter`](crate::AsyncStringWriter).
///
/// Evaluates to the `Result` of the enqueue.
#[macro_export]
macro_rules! enqueue {
    ($writer:expr, $($arg:tt)+) => {
        $writer.enqueue(format!($($arg)+))
    };
}

/// Write a formatted, timestamped line through a [`LogWriter`](crate::LogWriter).
///
/// An optional [`LogOutput`](crate::LogOutput) selects the targets.
///
/// # Examples
///
/// ```no_run
/// # use line_batch_writer::prelude::*;
/// use line_batch_writer::write_line;
///
/// let log = LogWriter::new(LogWriterSettings::new()).unwrap();
/// write_line!(log, "cache warmed in {} ms", 12).unwrap();
/// write_line!(log, target: LogOutput::FILE, "file only: {}", "details").unwrap();
/// ```
#[macro_export]
macro_rules! write_line {
    ($writer:expr, target: $target:expr, $($arg:tt)+) => {
        $writer.write_line_to(format!($($arg)+), $target)
    };
    ($writer:expr, $($arg:tt)+) => {
        $writer.write_line(format!($($arg)+))
    };
}

/// Queue a formatted message on the process-wide diagnostic queue.
///
/// Formatting is skipped entirely while nothing is listening.
///
/// # Examples
///
/// ```
/// use line_batch_writer::diag;
/// use line_batch_writer::DiagnosticLevel;
///
/// diag!(DiagnosticLevel::Call, "resolved {} entries", 3);
/// ```
#[macro_export]
macro_rules! diag {
    ($level:expr, $($arg:tt)+) => {
        if $crate::diagnostics::is_listening() {
            $crate::diagnostics::log(&format!($($arg)+), $level)
        }
    };
}
