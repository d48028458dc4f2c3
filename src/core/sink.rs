//! Sink trait for batch output destinations

use super::error::Result;

/// Destination for finished batches.
///
/// A sink is owned by exactly one writer and only ever called from that
/// writer's worker thread, one call at a time, so it needs `Send` but not
/// `Sync`.
pub trait Sink: Send {
    /// Receive one separator-joined batch of lines
    fn write_batch(&mut self, batch: &str) -> Result<()>;

    /// Called after every delivered batch
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called once, right before the worker stops
    fn close(&mut self) -> Result<()> {
        self.flush()
    }

    fn name(&self) -> &str;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write_batch(&mut self, batch: &str) -> Result<()> {
        (**self).write_batch(batch)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Adapts a closure into a [`Sink`]
///
/// # Example
///
/// ```
/// use line_batch_writer::{FnSink, Sink};
///
/// let mut seen = Vec::new();
/// let mut sink = FnSink::new(|batch: &str| seen.push(batch.to_string()));
/// sink.write_batch("a\nb").unwrap();
/// drop(sink);
/// assert_eq!(seen, vec!["a\nb"]);
/// ```
pub struct FnSink<F> {
    f: F,
    name: String,
}

impl<F> FnSink<F>
where
    F: FnMut(&str) + Send,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            name: "fn".to_string(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<F> Sink for FnSink<F>
where
    F: FnMut(&str) + Send,
{
    fn write_batch(&mut self, batch: &str) -> Result<()> {
        (self.f)(batch);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
