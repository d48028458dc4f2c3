//! Multi-target log facade
//!
//! [`LogWriter`] timestamps and serializes each message, then enqueues the
//! finished line on one [`AsyncStringWriter`] per selected output target
//! (debug channel, console, file). Targets named in the settings are started
//! eagerly; any other target is started on its first write.

pub mod serialization;
pub mod settings;

pub use serialization::{ObjectSerialization, SerializationOverride};
pub use settings::{LogWriterSettings, DEFAULT_LOG_DIRECTORY};

use crate::core::{AsyncStringWriter, LogOutput, Result, WriterError};
use crate::diagnostics::{self, DiagnosticLevel};
use crate::sinks::{ConsoleSink, DebugSink, FileSink};
use chrono::Local;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    File,
    Debug,
    Console,
}

impl Target {
    const ALL: [Target; 3] = [Target::File, Target::Debug, Target::Console];

    fn flag(self) -> LogOutput {
        match self {
            Target::File => LogOutput::FILE,
            Target::Debug => LogOutput::DEBUG,
            Target::Console => LogOutput::CONSOLE,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Target::File => "file",
            Target::Debug => "debug",
            Target::Console => "console",
        }
    }
}

type Slot = Mutex<Option<Arc<AsyncStringWriter>>>;

/// Logs everything, everywhere
///
/// # Example
///
/// ```no_run
/// use line_batch_writer::{LogOutput, LogWriter, LogWriterSettings};
///
/// let writer = LogWriter::new(
///     LogWriterSettings::new()
///         .with_directory("logs")
///         .with_output_target(LogOutput::FILE | LogOutput::CONSOLE),
/// )?;
///
/// writer.write_line("service started")?;
/// writer.write_object(&vec![1, 2, 3])?;
/// writer.dispose()?;
/// # Ok::<(), line_batch_writer::WriterError>(())
/// ```
pub struct LogWriter {
    settings: LogWriterSettings,
    log_file_name: String,
    debug_category: Arc<RwLock<String>>,
    file: Slot,
    debug: Slot,
    console: Slot,
    disposed: AtomicBool,
}

impl LogWriter {
    /// Create the output directory and start the writers for every target
    /// in `settings.output_target`
    pub fn new(settings: LogWriterSettings) -> Result<Self> {
        settings.writer_config.validate()?;

        fs::create_dir_all(&settings.directory).map_err(|e| {
            WriterError::io_operation(
                "creating log directory",
                format!("cannot create {}", settings.directory.display()),
                e,
            )
        })?;

        let log_file_name = settings
            .log_file_name
            .clone()
            .unwrap_or_else(default_log_file_name);

        let writer = Self {
            debug_category: Arc::new(RwLock::new(log_file_name.clone())),
            log_file_name,
            settings,
            file: Mutex::new(None),
            debug: Mutex::new(None),
            console: Mutex::new(None),
            disposed: AtomicBool::new(false),
        };

        for target in Target::ALL {
            if writer.settings.output_target.contains(target.flag()) {
                writer.target(target)?;
            }
        }

        Ok(writer)
    }

    /// Write a message to the default targets
    pub fn write_line(&self, message: impl fmt::Display) -> Result<()> {
        self.write_line_to(message, self.settings.output_target)
    }

    /// Write a message to the given targets
    pub fn write_line_to(&self, message: impl fmt::Display, target: LogOutput) -> Result<()> {
        self.ensure_open()?;
        let line = self.settings.timestamp_format.prefix_line(&message.to_string());
        self.enqueue(line, target)
    }

    /// Serialize `object` under the configured policy and write it to the
    /// default targets
    pub fn write_object<T>(&self, object: &T) -> Result<()>
    where
        T: Serialize + fmt::Debug + ?Sized,
    {
        self.write_object_to(object, self.settings.output_target)
    }

    pub fn write_object_to<T>(&self, object: &T, target: LogOutput) -> Result<()>
    where
        T: Serialize + fmt::Debug + ?Sized,
    {
        self.ensure_open()?;
        let payload = serialization::serialize_object(
            object,
            self.settings.serialization,
            self.settings.serialization_override.as_ref(),
        );
        let line = self.settings.timestamp_format.prefix_line(&payload);
        self.enqueue(line, target)
    }

    /// Wait until every line written before this call reached its sinks
    pub fn flush(&self) -> Result<()> {
        for writer in self.live_writers() {
            writer.flush()?;
        }
        Ok(())
    }

    /// Drain and stop every target.
    ///
    /// All targets are disposed even if one fails; the first error is
    /// returned. A second call returns `Err(AlreadyDisposed)`.
    pub fn dispose(&self) -> Result<()> {
        if self.disposed.swap(true, Ordering::AcqRel) {
            diagnostics::log(
                &format!(
                    "Attempting to dispose of already disposed LogWriter ({})",
                    self.log_file_name
                ),
                DiagnosticLevel::Exception,
            );
            return Err(WriterError::AlreadyDisposed);
        }

        let mut first_error = None;
        for target in Target::ALL {
            let writer = self.slot(target).lock().take();
            if let Some(writer) = writer {
                if let Err(e) = writer.dispose() {
                    eprintln!(
                        "[WRITER ERROR] Failed to dispose {} target: {}",
                        target.name(),
                        e
                    );
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// The directory that log files are written to
    pub fn directory(&self) -> &Path {
        &self.settings.directory
    }

    pub fn log_file_name(&self) -> &str {
        &self.log_file_name
    }

    /// Full path of the log file, including any compression extension
    pub fn log_file_path(&self) -> PathBuf {
        self.settings
            .compression
            .apply_extension(&self.settings.directory.join(&self.log_file_name))
    }

    /// Tag used on the debug channel; defaults to the log file name
    pub fn debug_category(&self) -> String {
        self.debug_category.read().clone()
    }

    /// Takes effect immediately, including for a running debug target
    pub fn set_debug_category(&self, category: impl Into<String>) {
        *self.debug_category.write() = category.into();
    }

    pub fn settings(&self) -> &LogWriterSettings {
        &self.settings
    }

    /// Targets whose writers are currently running
    pub fn active_targets(&self) -> LogOutput {
        Target::ALL
            .into_iter()
            .filter(|target| self.slot(*target).lock().is_some())
            .fold(LogOutput::NONE, |acc, target| acc | target.flag())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_disposed() {
            return Err(WriterError::WriterStopped);
        }
        Ok(())
    }

    fn enqueue(&self, line: String, target: LogOutput) -> Result<()> {
        for t in Target::ALL {
            if target.contains(t.flag()) {
                self.target(t)?.enqueue(line.clone())?;
            }
        }
        Ok(())
    }

    fn slot(&self, target: Target) -> &Slot {
        match target {
            Target::File => &self.file,
            Target::Debug => &self.debug,
            Target::Console => &self.console,
        }
    }

    fn live_writers(&self) -> Vec<Arc<AsyncStringWriter>> {
        Target::ALL
            .into_iter()
            .filter_map(|target| self.slot(target).lock().clone())
            .collect()
    }

    /// The running writer for `target`, started on first use
    fn target(&self, target: Target) -> Result<Arc<AsyncStringWriter>> {
        let mut slot = self.slot(target).lock();
        // Checked under the slot lock so `dispose` cannot miss a new writer
        self.ensure_open()?;

        if let Some(writer) = slot.as_ref() {
            return Ok(Arc::clone(writer));
        }

        let writer = Arc::new(self.start(target)?);
        *slot = Some(Arc::clone(&writer));
        Ok(writer)
    }

    fn start(&self, target: Target) -> Result<AsyncStringWriter> {
        let base = &self.settings.writer_config;
        let config = base
            .clone()
            .with_thread_name(format!("{}-{}", base.thread_name, target.name()));

        match target {
            Target::File => {
                let sink = FileSink::with_compression(
                    self.settings.directory.join(&self.log_file_name),
                    self.settings.compression,
                )?;
                AsyncStringWriter::with_config(sink, config)
            }
            Target::Debug => {
                let sink = DebugSink::with_shared_category(Arc::clone(&self.debug_category))
                    .with_separator(config.line_separator.clone());
                AsyncStringWriter::with_config(sink, config)
            }
            Target::Console => AsyncStringWriter::with_config(ConsoleSink::new(), config),
        }
    }
}

impl fmt::Debug for LogWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogWriter")
            .field("log_file_path", &self.log_file_path())
            .field("active_targets", &self.active_targets())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        if self.is_disposed() {
            return;
        }
        if let Err(e) = self.dispose() {
            eprintln!("[WRITER ERROR] Failed to dispose LogWriter on drop: {}", e);
        }
    }
}

/// `yyyyMMdd_HHmmss_<executable>.log`
fn default_log_file_name() -> String {
    format!(
        "{}_{}.log",
        Local::now().format("%Y%m%d_%H%M%S"),
        executable_stem()
    )
}

fn executable_stem() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "Unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_only(dir: &TempDir) -> LogWriterSettings {
        LogWriterSettings::new()
            .with_directory(dir.path())
            .with_output_target(LogOutput::FILE)
            .with_log_file_name("test.log")
    }

    #[test]
    fn test_file_target_receives_timestamped_lines() {
        let dir = TempDir::new().unwrap();
        let writer = LogWriter::new(file_only(&dir)).unwrap();

        writer.write_line("hello").unwrap();
        writer.write_line(42).unwrap();
        writer.dispose().unwrap();

        let content = fs::read_to_string(writer.log_file_path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] hello"));
        assert!(lines[1].ends_with("] 42"));
    }

    #[test]
    fn test_only_requested_targets_start() {
        let dir = TempDir::new().unwrap();
        let writer = LogWriter::new(file_only(&dir)).unwrap();
        assert_eq!(writer.active_targets(), LogOutput::FILE);
        writer.dispose().unwrap();
    }

    #[test]
    fn test_file_target_started_lazily() {
        let dir = TempDir::new().unwrap();
        let settings = file_only(&dir).with_output_target(LogOutput::NONE);
        let writer = LogWriter::new(settings).unwrap();
        assert!(writer.active_targets().is_empty());

        writer.write_line_to("late file", LogOutput::FILE).unwrap();
        assert_eq!(writer.active_targets(), LogOutput::FILE);

        writer.flush().unwrap();
        let content = fs::read_to_string(writer.log_file_path()).unwrap();
        assert!(content.contains("late file"));
        writer.dispose().unwrap();
    }

    #[test]
    fn test_write_object_uses_json() {
        let dir = TempDir::new().unwrap();
        let writer = LogWriter::new(file_only(&dir)).unwrap();

        writer.write_object(&serde_json::json!({"user": "ada"})).unwrap();
        writer.write_object("raw string").unwrap();
        writer.dispose().unwrap();

        let content = fs::read_to_string(writer.log_file_path()).unwrap();
        assert!(content.contains(r#"] {"user":"ada"}"#));
        assert!(content.contains("] raw string"));
    }

    #[test]
    fn test_serialization_override() {
        let dir = TempDir::new().unwrap();
        let settings = file_only(&dir)
            .with_serialization(ObjectSerialization::Override)
            .with_serialization_override(|v| format!("<{}>", v["n"]));
        let writer = LogWriter::new(settings).unwrap();

        writer.write_object(&serde_json::json!({"n": 5})).unwrap();
        writer.dispose().unwrap();

        let content = fs::read_to_string(writer.log_file_path()).unwrap();
        assert!(content.contains("] <5>"));
    }

    #[test]
    fn test_dispose_twice_reports_misuse() {
        let _guard = diagnostics::TEST_LOCK.lock();
        let dir = TempDir::new().unwrap();
        let writer = LogWriter::new(file_only(&dir)).unwrap();

        writer.dispose().unwrap();
        assert!(matches!(writer.dispose(), Err(WriterError::AlreadyDisposed)));
        assert!(matches!(writer.write_line("late"), Err(WriterError::WriterStopped)));
    }

    #[test]
    fn test_debug_category_defaults_to_file_name() {
        let dir = TempDir::new().unwrap();
        let writer = LogWriter::new(file_only(&dir)).unwrap();
        assert_eq!(writer.debug_category(), "test.log");

        writer.set_debug_category("service");
        assert_eq!(writer.debug_category(), "service");
        writer.dispose().unwrap();
    }

    #[test]
    fn test_default_file_name_shape() {
        let name = default_log_file_name();
        assert!(name.ends_with(".log"));
        // yyyyMMdd_HHmmss_
        assert_eq!(&name[8..9], "_");
        assert_eq!(&name[15..16], "_");
    }

    #[test]
    fn test_gzip_path_has_extension() {
        let dir = TempDir::new().unwrap();
        let settings = file_only(&dir).with_compression(crate::sinks::FileCompression::Gzip);
        let writer = LogWriter::new(settings).unwrap();
        assert!(writer.log_file_path().to_string_lossy().ends_with("test.log.gz"));
        writer.dispose().unwrap();
        assert!(writer.log_file_path().exists());
    }
}
