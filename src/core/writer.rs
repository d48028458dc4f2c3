//! Asynchronous line-batching writer
//!
//! [`AsyncStringWriter`] accepts lines from any number of producer threads and
//! hands them, in order and joined into batches, to a [`Sink`] on a single
//! dedicated worker thread.
//!
//! The worker parks on a [`WakeSignal`] that every `enqueue` raises. On
//! wake-up it clears the idle gate, drains the queue into batches bounded by
//! `max_batch_length`, delivers each batch, opens the idle gate again and
//! parks. `dispose` sets a stop flag, raises the wake signal and blocks on the
//! shutdown gate, which the worker opens only after it has found the queue
//! empty with the stop flag set.

use super::{
    config::WriterConfig,
    error::{panic_message, Result, WriterError},
    metrics::WriterMetrics,
    signal::{Gate, WakeSignal},
    sink::{FnSink, Sink},
};
use crate::diagnostics::{self, DiagnosticLevel};
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::{Condvar, Mutex, RwLock};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;

/// Lifecycle state of the worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WorkerState {
    /// Parked, nothing in flight
    Idle = 0,
    /// Popping lines and delivering batches
    Draining = 1,
    /// Terminated; accepts no more lines
    Stopped = 2,
}

impl WorkerState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => WorkerState::Idle,
            1 => WorkerState::Draining,
            _ => WorkerState::Stopped,
        }
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkerState::Idle => "idle",
            WorkerState::Draining => "draining",
            WorkerState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Count of lines the worker has finished with, for `flush` waiters
#[derive(Debug, Default)]
struct Progress {
    state: Mutex<ProgressState>,
    cond: Condvar,
}

#[derive(Debug, Default)]
struct ProgressState {
    processed: u64,
    finished: bool,
}

impl Progress {
    fn advance(&self, lines: u64) {
        let mut state = self.state.lock();
        state.processed += lines;
        self.cond.notify_all();
    }

    fn finish(&self) {
        let mut state = self.state.lock();
        state.finished = true;
        self.cond.notify_all();
    }

    /// Returns `true` once `target` lines are processed, `false` if the
    /// worker finished first.
    fn wait_for(&self, target: u64) -> bool {
        let mut state = self.state.lock();
        while state.processed < target && !state.finished {
            self.cond.wait(&mut state);
        }
        state.processed >= target
    }
}

struct Shared {
    config: WriterConfig,
    sink_name: String,
    sender: Sender<String>,
    receiver: Receiver<String>,
    wake: WakeSignal,
    idle: Gate,
    shutdown: Gate,
    disposed: AtomicBool,
    /// Cleared by the worker, under the write lock, when it commits to stopping
    accepting: RwLock<bool>,
    state: AtomicU8,
    enqueued: AtomicU64,
    progress: Progress,
    metrics: WriterMetrics,
}

impl Shared {
    fn set_state(&self, state: WorkerState) {
        self.state.store(state as u8, Ordering::Release);
    }

    /// Stop accepting lines if, and only if, none are left to drain
    fn try_close(&self) -> bool {
        let mut accepting = self.accepting.write();
        if self.receiver.is_empty() {
            *accepting = false;
            true
        } else {
            false
        }
    }

    fn should_stop(&self) -> bool {
        self.disposed.load(Ordering::Acquire) && self.try_close()
    }
}

/// Opens every gate when the worker exits, including by panic, so no
/// `dispose`, `flush` or `wait_for_idle` caller is left blocked.
struct ExitGuard<'a> {
    shared: &'a Shared,
}

impl Drop for ExitGuard<'_> {
    fn drop(&mut self) {
        *self.shared.accepting.write() = false;
        self.shared.set_state(WorkerState::Stopped);
        self.shared.idle.set();
        self.shared.progress.finish();
        self.shared.shutdown.set();
    }
}

/// The single-consumer side: owns the sink and the batch buffer
struct Worker<S> {
    shared: Arc<Shared>,
    sink: S,
    batch: String,
    batch_lines: u64,
    /// Lines handed to the sink since its last flush
    unflushed: u64,
}

impl<S: Sink> Worker<S> {
    fn run(mut self) {
        let shared = Arc::clone(&self.shared);
        let _exit = ExitGuard { shared: &shared };

        loop {
            shared.wake.wait();

            if shared.should_stop() {
                break;
            }

            shared.idle.reset();
            shared.set_state(WorkerState::Draining);

            self.drain();

            shared.set_state(WorkerState::Idle);
            shared.idle.set();

            if shared.should_stop() {
                break;
            }
        }

        self.close_sink();
    }

    fn drain(&mut self) {
        let max = self.shared.config.max_batch_length;
        let separator_len = self.shared.config.line_separator.len();

        while let Ok(line) = self.shared.receiver.try_recv() {
            // Counted by lines, not bytes: an empty line is still a line
            if self.batch_lines > 0 && self.batch.len() + separator_len + line.len() > max {
                self.deliver();
            }
            if self.batch_lines > 0 {
                self.batch.push_str(&self.shared.config.line_separator);
            }
            self.batch.push_str(&line);
            self.batch_lines += 1;
        }

        if self.batch_lines > 0 {
            self.deliver();
        }
        self.flush_sink();
    }

    /// Hand the current batch to the sink under the failure policy, then clear it
    fn deliver(&mut self) {
        let lines = self.batch_lines;
        let retries = self.shared.config.sink_failure_policy.retries();
        let mut attempt = 0;

        loop {
            match self.invoke(|sink, batch| sink.write_batch(batch)) {
                Ok(()) => {
                    self.shared.metrics.record_batch_written(lines);
                    break;
                }
                Err(e) => {
                    self.shared.metrics.record_sink_failure();
                    if attempt < retries {
                        attempt += 1;
                        self.shared.metrics.record_retry();
                        report(
                            "WRITER WARNING",
                            &format!("{} (retry {}/{})", e, attempt, retries),
                        );
                        continue;
                    }
                    self.shared.metrics.record_dropped(lines);
                    report(
                        "WRITER ERROR",
                        &format!("{}. Batch of {} line(s) dropped.", e, lines),
                    );
                    break;
                }
            }
        }

        self.batch.clear();
        self.batch_lines = 0;
        self.unflushed += lines;
    }

    /// Flush the sink once per drain cycle, then release `flush` waiters
    fn flush_sink(&mut self) {
        if self.unflushed == 0 {
            return;
        }
        if let Err(e) = self.invoke(|sink, _| sink.flush()) {
            report("WRITER ERROR", &format!("flush after drain failed: {}", e));
        }
        self.shared.progress.advance(std::mem::take(&mut self.unflushed));
    }

    /// Call into the sink with panic isolation
    fn invoke<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut S, &str) -> Result<()>,
    {
        let sink = &mut self.sink;
        let batch = self.batch.as_str();
        match catch_unwind(AssertUnwindSafe(|| f(sink, batch))) {
            Ok(result) => result,
            Err(payload) => Err(WriterError::sink_panicked(
                self.shared.sink_name.as_str(),
                panic_message(&*payload),
            )),
        }
    }

    fn close_sink(&mut self) {
        if let Err(e) = self.invoke(|sink, _| sink.close()) {
            report("WRITER ERROR", &format!("closing sink failed: {}", e));
        }
    }
}

fn report(tag: &str, message: &str) {
    eprintln!("[{}] {}", tag, message);
    diagnostics::log(&format!("[{}] {}", tag, message), DiagnosticLevel::Exception);
}

/// Batches lines from many producers onto one sink
///
/// # Example
///
/// ```
/// use line_batch_writer::{AsyncStringWriter, MemorySink};
///
/// let sink = MemorySink::new();
/// let writer = AsyncStringWriter::new(sink.clone()).unwrap();
///
/// writer.enqueue("a").unwrap();
/// writer.enqueue("b").unwrap();
/// writer.enqueue("c").unwrap();
/// writer.dispose().unwrap();
///
/// assert_eq!(sink.lines(), vec!["a", "b", "c"]);
/// ```
pub struct AsyncStringWriter {
    shared: Arc<Shared>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
}

impl AsyncStringWriter {
    /// Start a writer with the default configuration
    pub fn new<S: Sink + 'static>(sink: S) -> Result<Self> {
        Self::with_config(sink, WriterConfig::default())
    }

    /// Start a writer that hands each batch to `f`
    pub fn from_fn<F>(f: F) -> Result<Self>
    where
        F: FnMut(&str) + Send + 'static,
    {
        Self::new(FnSink::new(f))
    }

    /// Start a writer with a custom configuration.
    ///
    /// The worker thread is spawned immediately and parks until the first
    /// line arrives.
    pub fn with_config<S: Sink + 'static>(sink: S, config: WriterConfig) -> Result<Self> {
        config.validate()?;

        let (sender, receiver) = unbounded();
        let thread_name = config.thread_name.clone();
        let shared = Arc::new(Shared {
            config,
            sink_name: sink.name().to_string(),
            sender,
            receiver,
            wake: WakeSignal::new(),
            idle: Gate::new(true),
            shutdown: Gate::new(false),
            disposed: AtomicBool::new(false),
            accepting: RwLock::new(true),
            state: AtomicU8::new(WorkerState::Idle as u8),
            enqueued: AtomicU64::new(0),
            progress: Progress::default(),
            metrics: WriterMetrics::new(),
        });

        let worker = Worker {
            shared: Arc::clone(&shared),
            sink,
            batch: String::new(),
            batch_lines: 0,
            unflushed: 0,
        };

        let handle = thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || worker.run())
            .map_err(|source| WriterError::WorkerSpawn {
                name: thread_name,
                source,
            })?;

        Ok(Self {
            shared,
            worker: Mutex::new(Some(handle)),
        })
    }

    /// Append a line and wake the worker.
    ///
    /// Never waits for the worker. Lines enqueued after `dispose` was called
    /// but before the worker's final drain are still delivered; once the
    /// worker has stopped, `Err(WriterStopped)` is returned instead.
    pub fn enqueue(&self, line: impl Into<String>) -> Result<()> {
        {
            let accepting = self.shared.accepting.read();
            if !*accepting {
                self.shared.metrics.record_rejected();
                return Err(WriterError::WriterStopped);
            }
            // Counted before the push so `flush` never under-counts a queued line
            self.shared.enqueued.fetch_add(1, Ordering::AcqRel);
            self.shared
                .sender
                .send(line.into())
                .map_err(|_| WriterError::WriterStopped)?;
        }

        self.shared.metrics.record_enqueued();
        self.shared.wake.raise();
        Ok(())
    }

    /// Block until the worker holds no in-flight batch.
    ///
    /// This only observes a moment at which the worker was caught up; a line
    /// enqueued just before the call may not have been picked up yet. Use
    /// [`flush`](Self::flush) to wait for specific lines.
    pub fn wait_for_idle(&self) {
        self.shared.idle.wait();
    }

    /// Block until every line enqueued before this call has been handed to
    /// the sink (or dropped under the failure policy) and the sink flushed.
    ///
    /// The sink is flushed once at the end of each drain cycle, so while
    /// producers keep the queue non-empty this waits for the cycle to end.
    ///
    /// Must not be called from inside the sink.
    pub fn flush(&self) -> Result<()> {
        let target = self.shared.enqueued.load(Ordering::Acquire);
        if self.shared.progress.wait_for(target) {
            Ok(())
        } else {
            Err(WriterError::WriterStopped)
        }
    }

    /// Drain every queued line, stop the worker and wait for it to exit.
    ///
    /// When this returns `Ok`, every line enqueued before the call has
    /// reached the sink and the worker thread has exited. A second call
    /// returns `Err(AlreadyDisposed)` immediately. Must not be called from
    /// inside the sink.
    pub fn dispose(&self) -> Result<()> {
        if self.shared.disposed.swap(true, Ordering::AcqRel) {
            diagnostics::log(
                &format!(
                    "Attempted to dispose already disposed writer for sink '{}'",
                    self.shared.sink_name
                ),
                DiagnosticLevel::Exception,
            );
            return Err(WriterError::AlreadyDisposed);
        }

        self.shared.wake.raise();
        self.shared.shutdown.wait();

        let handle = self.worker.lock().take();
        if let Some(handle) = handle {
            handle
                .join()
                .map_err(|payload| WriterError::WorkerPanicked(panic_message(&*payload)))?;
        }
        Ok(())
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.disposed.load(Ordering::Acquire)
    }

    /// Whether the worker has terminated
    pub fn is_stopped(&self) -> bool {
        self.shared.shutdown.is_set()
    }

    pub fn worker_state(&self) -> WorkerState {
        WorkerState::from_u8(self.shared.state.load(Ordering::Acquire))
    }

    /// Lines queued but not yet picked up by the worker
    pub fn pending_lines(&self) -> usize {
        self.shared.receiver.len()
    }

    pub fn config(&self) -> &WriterConfig {
        &self.shared.config
    }

    pub fn sink_name(&self) -> &str {
        &self.shared.sink_name
    }

    pub fn metrics(&self) -> &WriterMetrics {
        &self.shared.metrics
    }
}

#[cfg(feature = "async")]
impl AsyncStringWriter {
    /// [`flush`](Self::flush) on tokio's blocking pool
    pub async fn flush_async(self: &Arc<Self>) -> Result<()> {
        let writer = Arc::clone(self);
        tokio::task::spawn_blocking(move || writer.flush())
            .await
            .map_err(|e| WriterError::other(format!("flush task failed: {}", e)))?
    }

    /// [`dispose`](Self::dispose) on tokio's blocking pool
    pub async fn dispose_async(self: &Arc<Self>) -> Result<()> {
        let writer = Arc::clone(self);
        tokio::task::spawn_blocking(move || writer.dispose())
            .await
            .map_err(|e| WriterError::other(format!("dispose task failed: {}", e)))?
    }
}

impl fmt::Debug for AsyncStringWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncStringWriter")
            .field("sink", &self.shared.sink_name)
            .field("state", &self.worker_state())
            .field("pending_lines", &self.pending_lines())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

impl Drop for AsyncStringWriter {
    fn drop(&mut self) {
        if self.is_disposed() {
            return;
        }
        if let Err(e) = self.dispose() {
            eprintln!("[WRITER ERROR] Failed to dispose writer on drop: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::MemorySink;
    use crossbeam_channel::{bounded, Receiver, Sender};
    use std::sync::atomic::AtomicUsize;
    use std::time::{Duration, Instant};

    /// Blocks inside `write_batch` on the batch `"hold"` until released
    struct GatedSink {
        entered: Sender<()>,
        release: Receiver<()>,
        batches: Arc<Mutex<Vec<String>>>,
        flushes: Arc<AtomicUsize>,
    }

    impl Sink for GatedSink {
        fn write_batch(&mut self, batch: &str) -> Result<()> {
            if batch == "hold" {
                let _ = self.entered.send(());
                let _ = self.release.recv();
            }
            self.batches.lock().push(batch.to_string());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            self.flushes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn name(&self) -> &str {
            "gated"
        }
    }

    struct Gated {
        writer: Arc<AsyncStringWriter>,
        entered: Receiver<()>,
        release: Sender<()>,
        batches: Arc<Mutex<Vec<String>>>,
        flushes: Arc<AtomicUsize>,
    }

    fn gated_writer(config: WriterConfig) -> Gated {
        let (entered_tx, entered_rx) = bounded(1);
        let (release_tx, release_rx) = bounded(1);
        let batches = Arc::new(Mutex::new(Vec::new()));
        let flushes = Arc::new(AtomicUsize::new(0));
        let sink = GatedSink {
            entered: entered_tx,
            release: release_rx,
            batches: Arc::clone(&batches),
            flushes: Arc::clone(&flushes),
        };
        Gated {
            writer: Arc::new(AsyncStringWriter::with_config(sink, config).unwrap()),
            entered: entered_rx,
            release: release_tx,
            batches,
            flushes,
        }
    }

    #[test]
    fn test_lines_delivered_in_order() {
        let sink = MemorySink::new();
        let writer = AsyncStringWriter::new(sink.clone()).unwrap();

        writer.enqueue("a").unwrap();
        writer.enqueue("b").unwrap();
        writer.enqueue("c").unwrap();
        writer.dispose().unwrap();

        assert_eq!(sink.lines(), vec!["a", "b", "c"]);
        assert!(writer.is_stopped());
        assert_eq!(writer.worker_state(), WorkerState::Stopped);
    }

    #[test]
    fn test_starts_idle() {
        let writer = AsyncStringWriter::new(MemorySink::new()).unwrap();
        assert_eq!(writer.worker_state(), WorkerState::Idle);
        assert!(!writer.is_disposed());
        writer.wait_for_idle();
    }

    #[test]
    fn test_idle_gate_closed_while_draining() {
        let gated = gated_writer(WriterConfig::default());
        gated.writer.enqueue("hold").unwrap();
        gated.entered.recv_timeout(Duration::from_secs(5)).unwrap();

        assert_eq!(gated.writer.worker_state(), WorkerState::Draining);
        assert!(!gated.writer.shared.idle.is_set());

        let waiter = {
            let writer = Arc::clone(&gated.writer);
            thread::spawn(move || {
                writer.wait_for_idle();
                Instant::now()
            })
        };

        thread::sleep(Duration::from_millis(100));
        assert!(!waiter.is_finished());

        let released_at = Instant::now();
        gated.release.send(()).unwrap();
        let returned_at = waiter.join().unwrap();

        assert!(returned_at >= released_at);
        assert_eq!(*gated.batches.lock(), vec!["hold"]);
        assert_eq!(gated.writer.worker_state(), WorkerState::Idle);
        gated.writer.dispose().unwrap();
        assert_eq!(gated.writer.worker_state(), WorkerState::Stopped);
        assert!(gated.writer.shared.idle.is_set());
    }

    #[test]
    fn test_sink_flushed_once_per_drain() {
        let gated = gated_writer(WriterConfig::new().with_max_batch_length(15));
        gated.writer.enqueue("hold").unwrap();
        gated.entered.recv_timeout(Duration::from_secs(5)).unwrap();

        // Queued while the worker is stuck, so one drain cycle takes them all
        for i in 0..5 {
            gated.writer.enqueue(format!("line-{:05}", i)).unwrap();
        }
        gated.release.send(()).unwrap();
        gated.writer.flush().unwrap();

        assert_eq!(gated.batches.lock().len(), 6);
        assert_eq!(gated.flushes.load(Ordering::SeqCst), 2);
        gated.writer.dispose().unwrap();
    }

    #[test]
    fn test_flush_waits_for_delivery() {
        let sink = MemorySink::new();
        let writer = AsyncStringWriter::new(sink.clone()).unwrap();

        for i in 0..100 {
            writer.enqueue(format!("line {}", i)).unwrap();
        }
        writer.flush().unwrap();

        assert_eq!(sink.lines().len(), 100);
        assert_eq!(writer.pending_lines(), 0);
    }

    #[test]
    fn test_small_capacity_splits_batches() {
        let sink = MemorySink::new();
        let config = WriterConfig::new().with_max_batch_length(15);
        let writer = AsyncStringWriter::with_config(sink.clone(), config).unwrap();

        writer.enqueue("0123456789").unwrap();
        writer.enqueue("abcdefghij").unwrap();
        writer.dispose().unwrap();

        assert_eq!(sink.batches(), vec!["0123456789", "abcdefghij"]);
    }

    #[test]
    fn test_oversized_line_is_not_split() {
        let sink = MemorySink::new();
        let config = WriterConfig::new().with_max_batch_length(4);
        let writer = AsyncStringWriter::with_config(sink.clone(), config).unwrap();

        writer.enqueue("this line is longer than four bytes").unwrap();
        writer.dispose().unwrap();

        assert_eq!(sink.batches(), vec!["this line is longer than four bytes"]);
    }

    #[test]
    fn test_empty_lines_are_delivered() {
        let sink = MemorySink::new();
        let writer = AsyncStringWriter::new(sink.clone()).unwrap();

        writer.enqueue("").unwrap();
        writer.flush().unwrap();
        writer.enqueue("").unwrap();
        writer.enqueue("x").unwrap();
        writer.dispose().unwrap();

        assert_eq!(sink.lines(), vec!["", "", "x"]);
    }

    #[test]
    fn test_custom_separator() {
        let sink = MemorySink::with_separator("|");
        let config = WriterConfig::new().with_line_separator("|");
        let writer = AsyncStringWriter::with_config(sink.clone(), config).unwrap();

        writer.enqueue("x").unwrap();
        writer.enqueue("y").unwrap();
        writer.dispose().unwrap();

        assert_eq!(sink.lines(), vec!["x", "y"]);
        assert!(sink.batches().iter().all(|b| !b.contains('\n')));
    }

    #[test]
    fn test_dispose_twice_is_reported() {
        let _guard = diagnostics::TEST_LOCK.lock();
        let sink = MemorySink::new();
        let writer = AsyncStringWriter::new(sink.clone()).unwrap();
        writer.enqueue("only").unwrap();

        writer.dispose().unwrap();
        let batches_after_first = sink.batches();

        assert!(matches!(writer.dispose(), Err(WriterError::AlreadyDisposed)));
        assert_eq!(sink.batches(), batches_after_first);
    }

    #[test]
    fn test_enqueue_after_dispose_is_rejected() {
        let writer = AsyncStringWriter::new(MemorySink::new()).unwrap();
        writer.dispose().unwrap();

        assert!(matches!(writer.enqueue("late"), Err(WriterError::WriterStopped)));
        assert_eq!(writer.metrics().rejected_enqueues(), 1);
    }

    #[test]
    fn test_dispose_without_lines() {
        let sink = MemorySink::new();
        let writer = AsyncStringWriter::new(sink.clone()).unwrap();
        writer.dispose().unwrap();
        assert_eq!(sink.batch_count(), 0);
    }

    #[test]
    fn test_drop_disposes() {
        let sink = MemorySink::new();
        {
            let writer = AsyncStringWriter::new(sink.clone()).unwrap();
            writer.enqueue("dropped writer still drains").unwrap();
        }
        assert_eq!(sink.lines(), vec!["dropped writer still drains"]);
    }

    #[test]
    fn test_from_fn_sink() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let writer = AsyncStringWriter::from_fn(move |batch| {
            let _ = tx.send(batch.to_string());
        })
        .unwrap();

        writer.enqueue("hello").unwrap();
        writer.dispose().unwrap();

        let received: Vec<String> = rx.try_iter().collect();
        assert_eq!(received.join("\n"), "hello");
    }

    #[test]
    fn test_thread_name_from_config() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let config = WriterConfig::new().with_thread_name("named-writer");
        let writer = AsyncStringWriter::with_config(
            FnSink::new(move |_: &str| {
                let _ = tx.send(thread::current().name().map(String::from));
            }),
            config,
        )
        .unwrap();

        writer.enqueue("x").unwrap();
        writer.dispose().unwrap();
        assert_eq!(rx.recv_timeout(Duration::from_secs(1)).unwrap().as_deref(), Some("named-writer"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = WriterConfig::new().with_max_batch_length(0);
        assert!(matches!(
            AsyncStringWriter::with_config(MemorySink::new(), config),
            Err(WriterError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_metrics_track_delivery() {
        let writer = AsyncStringWriter::new(MemorySink::new()).unwrap();
        for i in 0..10 {
            writer.enqueue(format!("{}", i)).unwrap();
        }
        writer.dispose().unwrap();

        let metrics = writer.metrics();
        assert_eq!(metrics.lines_enqueued(), 10);
        assert_eq!(metrics.lines_written(), 10);
        assert!(metrics.batches_written() >= 1);
        assert_eq!(metrics.lines_dropped(), 0);
    }

    #[test]
    fn test_worker_state_display() {
        assert_eq!(WorkerState::Idle.to_string(), "idle");
        assert_eq!(WorkerState::Draining.to_string(), "draining");
        assert_eq!(WorkerState::Stopped.to_string(), "stopped");
    }
}
