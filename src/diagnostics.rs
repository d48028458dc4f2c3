//! Process-wide diagnostic message queue
//!
//! A single in-memory buffer for low-level self-logging, independent of any
//! [`AsyncStringWriter`](crate::AsyncStringWriter). Messages are appended
//! under one lock and handed, as one newline-separated string, to an
//! endpoint installed by the application. Nothing is buffered while the
//! level is [`DiagnosticLevel::None`].
//!
//! ```
//! use line_batch_writer::diagnostics::{self, DiagnosticLevel};
//! use std::sync::{Arc, Mutex};
//!
//! let captured = Arc::new(Mutex::new(String::new()));
//! let sink = Arc::clone(&captured);
//! diagnostics::init(DiagnosticLevel::Call, move |text| {
//!     sink.lock().unwrap().push_str(text);
//!     true
//! });
//!
//! diagnostics::log("opening cache", DiagnosticLevel::Call);
//! assert!(captured.lock().unwrap().contains("opening cache"));
//!
//! diagnostics::shutdown();
//! ```

use parking_lot::{const_mutex, Mutex};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How eagerly buffered messages are pushed to the endpoint.
///
/// A message logged at level `L` triggers a flush when `L` is at or above
/// the configured level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum DiagnosticLevel {
    /// Nothing is queued
    #[default]
    None = 0,
    /// Flush when an error is logged
    Exception = 1,
    /// Flush on every message
    Call = 2,
    /// Flush when a method-level checkpoint is logged
    Method = 3,
    /// Flush only at final checkpoints
    Final = 4,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticLevel::None => "NONE",
            DiagnosticLevel::Exception => "EXCEPTION",
            DiagnosticLevel::Call => "CALL",
            DiagnosticLevel::Method => "METHOD",
            DiagnosticLevel::Final => "FINAL",
        };
        f.write_str(name)
    }
}

/// Receives the buffered text; returns `false` to keep it queued
pub type Endpoint = Box<dyn FnMut(&str) -> bool + Send>;

struct DiagnosticState {
    level: DiagnosticLevel,
    buffer: String,
    endpoint: Option<Endpoint>,
}

static STATE: Mutex<DiagnosticState> = const_mutex(DiagnosticState {
    level: DiagnosticLevel::None,
    buffer: String::new(),
    endpoint: None,
});

/// Install `endpoint` and start listening at `level`
pub fn init<F>(level: DiagnosticLevel, endpoint: F)
where
    F: FnMut(&str) -> bool + Send + 'static,
{
    let mut state = STATE.lock();
    state.level = level;
    state.endpoint = Some(Box::new(endpoint));
}

/// Flush what is queued, then stop listening and drop the endpoint.
///
/// Returns the result of the final flush.
pub fn shutdown() -> bool {
    let mut state = STATE.lock();
    let flushed = flush_locked(&mut state);
    state.level = DiagnosticLevel::None;
    state.endpoint = None;
    state.buffer.clear();
    flushed
}

pub fn set_level(level: DiagnosticLevel) {
    STATE.lock().level = level;
}

pub fn level() -> DiagnosticLevel {
    STATE.lock().level
}

/// Whether messages are being queued at all
pub fn is_listening() -> bool {
    level() != DiagnosticLevel::None
}

pub fn set_endpoint<F>(endpoint: F)
where
    F: FnMut(&str) -> bool + Send + 'static,
{
    STATE.lock().endpoint = Some(Box::new(endpoint));
}

/// Number of bytes waiting for the endpoint
pub fn pending_len() -> usize {
    STATE.lock().buffer.len()
}

/// Queue `message`, flushing if `level` is at or above the configured level.
///
/// The endpoint runs while the queue lock is held; it must not log back
/// into this module.
pub fn log(message: &str, level: DiagnosticLevel) {
    let mut state = STATE.lock();
    if state.level == DiagnosticLevel::None {
        return;
    }

    state.buffer.push_str(message);
    state.buffer.push('\n');

    if level >= state.level {
        flush_locked(&mut state);
    }
}

/// Queue an error and its `source()` chain as one message
pub fn log_error(error: &(dyn std::error::Error + 'static), level: DiagnosticLevel) {
    if !is_listening() {
        return;
    }
    log(&error_chain(error), level);
}

/// Hand the queue to the endpoint.
///
/// Returns `false` if no endpoint is installed or the endpoint reports a
/// failure; the queue is only cleared on success.
pub fn flush() -> bool {
    flush_locked(&mut STATE.lock())
}

fn flush_locked(state: &mut DiagnosticState) -> bool {
    let DiagnosticState { buffer, endpoint, .. } = state;
    let Some(endpoint) = endpoint.as_mut() else {
        return false;
    };

    let success = endpoint(buffer.as_str());
    if success {
        buffer.clear();
    }
    success
}

/// `outer: inner: innermost`
fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

/// Serializes tests that touch the process-wide state
#[cfg(test)]
pub(crate) static TEST_LOCK: Mutex<()> = const_mutex(());
