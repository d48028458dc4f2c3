//! Writer metrics for observability
//!
//! Counters describing what a writer has accepted, delivered and lost,
//! so that sink failures and misuse are visible instead of silent.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for one [`AsyncStringWriter`](super::AsyncStringWriter)
///
/// # Example
///
/// ```
/// use line_batch_writer::WriterMetrics;
///
/// let metrics = WriterMetrics::new();
/// metrics.record_enqueued();
/// metrics.record_batch_written(1);
///
/// assert_eq!(metrics.lines_enqueued(), 1);
/// assert_eq!(metrics.lines_written(), 1);
/// assert_eq!(metrics.batches_written(), 1);
/// ```
#[derive(Debug)]
pub struct WriterMetrics {
    /// Lines accepted by `enqueue`
    lines_enqueued: AtomicU64,

    /// Lines contained in batches the sink accepted
    lines_written: AtomicU64,

    batches_written: AtomicU64,

    /// Sink calls that returned an error or panicked
    sink_failures: AtomicU64,

    /// Sink calls repeated under a retry policy
    sink_retries: AtomicU64,

    /// Lines contained in batches that were finally discarded
    lines_dropped: AtomicU64,

    /// `enqueue` calls refused because the writer had stopped
    rejected_enqueues: AtomicU64,
}

impl WriterMetrics {
    pub const fn new() -> Self {
        Self {
            lines_enqueued: AtomicU64::new(0),
            lines_written: AtomicU64::new(0),
            batches_written: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            sink_retries: AtomicU64::new(0),
            lines_dropped: AtomicU64::new(0),
            rejected_enqueues: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn lines_enqueued(&self) -> u64 {
        self.lines_enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn lines_written(&self) -> u64 {
        self.lines_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn batches_written(&self) -> u64 {
        self.batches_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_retries(&self) -> u64 {
        self.sink_retries.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn lines_dropped(&self) -> u64 {
        self.lines_dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rejected_enqueues(&self) -> u64 {
        self.rejected_enqueues.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.lines_enqueued.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a batch of `lines` lines accepted by the sink
    #[inline]
    pub fn record_batch_written(&self, lines: u64) {
        self.batches_written.fetch_add(1, Ordering::Relaxed);
        self.lines_written.fetch_add(lines, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_retry(&self) -> u64 {
        self.sink_retries.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a discarded batch of `lines` lines
    #[inline]
    pub fn record_dropped(&self, lines: u64) -> u64 {
        self.lines_dropped.fetch_add(lines, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rejected(&self) -> u64 {
        self.rejected_enqueues.fetch_add(1, Ordering::Relaxed)
    }

    /// Percentage (0.0 - 100.0) of delivered-or-dropped lines that were dropped
    ///
    /// Returns 0.0 if nothing has been processed yet.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.lines_dropped() as f64;
        let total = self.lines_written() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.lines_enqueued.store(0, Ordering::Relaxed);
        self.lines_written.store(0, Ordering::Relaxed);
        self.batches_written.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
        self.sink_retries.store(0, Ordering::Relaxed);
        self.lines_dropped.store(0, Ordering::Relaxed);
        self.rejected_enqueues.store(0, Ordering::Relaxed);
    }
}

impl Default for WriterMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for WriterMetrics {
    /// Snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            lines_enqueued: AtomicU64::new(self.lines_enqueued()),
            lines_written: AtomicU64::new(self.lines_written()),
            batches_written: AtomicU64::new(self.batches_written()),
            sink_failures: AtomicU64::new(self.sink_failures()),
            sink_retries: AtomicU64::new(self.sink_retries()),
            lines_dropped: AtomicU64::new(self.lines_dropped()),
            rejected_enqueues: AtomicU64::new(self.rejected_enqueues()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = WriterMetrics::new();
        assert_eq!(metrics.lines_enqueued(), 0);
        assert_eq!(metrics.lines_written(), 0);
        assert_eq!(metrics.batches_written(), 0);
        assert_eq!(metrics.sink_failures(), 0);
        assert_eq!(metrics.lines_dropped(), 0);
        assert_eq!(metrics.rejected_enqueues(), 0);
    }

    #[test]
    fn test_batch_written_counts_lines() {
        let metrics = WriterMetrics::new();
        metrics.record_batch_written(3);
        metrics.record_batch_written(2);
        assert_eq!(metrics.batches_written(), 2);
        assert_eq!(metrics.lines_written(), 5);
    }

    #[test]
    fn test_drop_rate() {
        let metrics = WriterMetrics::new();
        assert_eq!(metrics.drop_rate(), 0.0);

        metrics.record_batch_written(90);
        metrics.record_dropped(10);

        let rate = metrics.drop_rate();
        assert!((9.9..=10.1).contains(&rate), "Drop rate was {}", rate);
    }

    #[test]
    fn test_reset_and_snapshot() {
        let metrics = WriterMetrics::new();
        metrics.record_enqueued();
        metrics.record_rejected();

        let snapshot = metrics.clone();
        metrics.reset();

        assert_eq!(metrics.lines_enqueued(), 0);
        assert_eq!(snapshot.lines_enqueued(), 1);
        assert_eq!(snapshot.rejected_enqueues(), 1);
    }
}
