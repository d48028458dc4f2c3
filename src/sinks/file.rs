//! File sink implementation

use crate::core::{Result, Sink, WriterError};
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Compression applied to the log file stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FileCompression {
    #[default]
    None,
    /// gzip stream; each writer session appends one gzip member
    Gzip,
}

impl FileCompression {
    /// The path actually written for `path` under this compression
    ///
    /// # Example
    ///
    /// ```
    /// use line_batch_writer::sinks::FileCompression;
    /// use std::path::Path;
    ///
    /// let path = FileCompression::Gzip.apply_extension(Path::new("logs/app.log"));
    /// assert_eq!(path, Path::new("logs/app.log.gz"));
    /// ```
    pub fn apply_extension(&self, path: &Path) -> PathBuf {
        match self {
            FileCompression::None => path.to_path_buf(),
            FileCompression::Gzip => {
                if path.extension().is_some_and(|ext| ext == "gz") {
                    return path.to_path_buf();
                }
                let mut name = path.as_os_str().to_owned();
                name.push(".gz");
                PathBuf::from(name)
            }
        }
    }
}

enum FileWriter {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl FileWriter {
    fn finish(self) -> io::Result<()> {
        match self {
            FileWriter::Plain(mut writer) => writer.flush(),
            FileWriter::Gzip(encoder) => encoder.finish()?.flush(),
        }
    }
}

impl Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileWriter::Plain(writer) => writer.write(buf),
            FileWriter::Gzip(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileWriter::Plain(writer) => writer.flush(),
            FileWriter::Gzip(encoder) => encoder.flush(),
        }
    }
}

/// Appends every batch, followed by a newline, to a file
pub struct FileSink {
    path: PathBuf,
    compression: FileCompression,
    writer: Option<FileWriter>,
    /// Second handle holding the advisory lock; dropping it releases the lock
    lock: Option<File>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_compression(path, FileCompression::None)
    }

    /// Open `path` (with `.gz` appended for gzip) for appending, creating
    /// missing parent directories
    pub fn with_compression(path: impl Into<PathBuf>, compression: FileCompression) -> Result<Self> {
        let path = compression.apply_extension(&path.into());

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                WriterError::io_operation(
                    "creating log directory",
                    format!("cannot create {}", parent.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                WriterError::io_operation(
                    "opening log file",
                    format!("cannot open {}", path.display()),
                    e,
                )
            })?;

        let buffered = BufWriter::new(file);
        let writer = match compression {
            FileCompression::None => FileWriter::Plain(buffered),
            FileCompression::Gzip => {
                FileWriter::Gzip(GzEncoder::new(buffered, flate2::Compression::default()))
            }
        };

        Ok(Self {
            path,
            compression,
            writer: Some(writer),
            lock: None,
        })
    }

    /// Take an exclusive advisory lock on the file for the sink's lifetime
    ///
    /// Fails with [`WriterError::FileLock`] if another handle holds it.
    #[cfg(feature = "file")]
    pub fn lock_exclusive(mut self) -> Result<Self> {
        use fs2::FileExt;

        let file = OpenOptions::new().append(true).open(&self.path)?;
        file.try_lock_exclusive()
            .map_err(|_| WriterError::file_lock(self.path.display().to_string()))?;
        self.lock = Some(file);
        Ok(self)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn compression(&self) -> FileCompression {
        self.compression
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_some()
    }
}

impl Sink for FileSink {
    fn write_batch(&mut self, batch: &str) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| WriterError::sink("file", "file sink already closed"))?;

        writer.write_all(batch.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    /// Finish the gzip stream (if any) and release the lock
    fn close(&mut self) -> Result<()> {
        let result = match self.writer.take() {
            Some(writer) => writer.finish().map_err(|e| {
                WriterError::io_operation(
                    "closing log file",
                    format!("cannot finish {}", self.path.display()),
                    e,
                )
            }),
            None => Ok(()),
        };
        self.lock = None;
        result
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Ensure buffered data reaches disk and gzip streams are terminated
        let _ = self.close();
    }
}
