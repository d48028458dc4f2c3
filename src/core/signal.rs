//! Wake and gate primitives for the writer's worker handshake
//!
//! [`WakeSignal`] is an auto-resetting, single-slot notification: any number
//! of raises before the waiter runs collapse into one wake-up, and a raise
//! that happens before the waiter parks is never lost.
//!
//! [`Gate`] is a manual-reset event: it stays open until explicitly reset,
//! and every waiter passes while it is open.

use parking_lot::{Condvar, Mutex};
#[cfg(test)]
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
pub struct WakeSignal {
    raised: Mutex<bool>,
    cond: Condvar,
}

impl WakeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the signal, waking the parked waiter if there is one
    pub fn raise(&self) {
        let mut raised = self.raised.lock();
        *raised = true;
        self.cond.notify_one();
    }

    /// Park until the signal is raised, then consume it
    pub fn wait(&self) {
        let mut raised = self.raised.lock();
        while !*raised {
            self.cond.wait(&mut raised);
        }
        *raised = false;
    }

    /// Like [`wait`](Self::wait) but gives up after `timeout`.
    ///
    /// Returns `true` if the signal was consumed.
    #[cfg(test)]
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut raised = self.raised.lock();
        while !*raised {
            if self.cond.wait_until(&mut raised, deadline).timed_out() {
                break;
            }
        }
        std::mem::replace(&mut *raised, false)
    }

    #[cfg(test)]
    pub fn is_raised(&self) -> bool {
        *self.raised.lock()
    }
}

#[derive(Debug)]
pub struct Gate {
    open: Mutex<bool>,
    cond: Condvar,
}

impl Gate {
    pub fn new(open: bool) -> Self {
        Self {
            open: Mutex::new(open),
            cond: Condvar::new(),
        }
    }

    /// Open the gate and release every waiter
    pub fn set(&self) {
        let mut open = self.open.lock();
        *open = true;
        self.cond.notify_all();
    }

    pub fn reset(&self) {
        *self.open.lock() = false;
    }

    pub fn is_set(&self) -> bool {
        *self.open.lock()
    }

    /// Block until the gate is open
    pub fn wait(&self) {
        let mut open = self.open.lock();
        while !*open {
            self.cond.wait(&mut open);
        }
    }

    /// Block until the gate is open or `timeout` elapses.
    ///
    /// Returns whether the gate was open on return.
    #[cfg(test)]
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut open = self.open.lock();
        while !*open {
            if self.cond.wait_until(&mut open, deadline).timed_out() {
                break;
            }
        }
        *open
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_raise_before_wait_is_not_lost() {
        let signal = WakeSignal::new();
        signal.raise();
        assert!(signal.is_raised());
        signal.wait();
        assert!(!signal.is_raised());
    }

    #[test]
    fn test_raises_collapse_into_one_wakeup() {
        let signal = WakeSignal::new();
        signal.raise();
        signal.raise();
        signal.raise();
        assert!(signal.wait_timeout(Duration::from_millis(10)));
        assert!(!signal.wait_timeout(Duration::from_millis(10)));
    }

    #[test]
    fn test_wait_wakes_on_raise_from_other_thread() {
        let signal = Arc::new(WakeSignal::new());
        let signal_clone = Arc::clone(&signal);

        let handle = thread::spawn(move || {
            signal_clone.wait();
            true
        });

        thread::sleep(Duration::from_millis(20));
        signal.raise();
        assert!(handle.join().unwrap());
    }

    #[test]
    fn test_gate_releases_all_waiters() {
        let gate = Arc::new(Gate::new(false));
        let passed = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let gate = Arc::clone(&gate);
                let passed = Arc::clone(&passed);
                thread::spawn(move || {
                    gate.wait();
                    passed.fetch_add(1, Ordering::SeqCst);
                })
            })
            .collect();

        thread::sleep(Duration::from_millis(20));
        assert_eq!(passed.load(Ordering::SeqCst), 0);

        gate.set();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(passed.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_gate_is_manual_reset() {
        let gate = Gate::new(true);
        gate.wait();
        gate.wait();
        assert!(gate.is_set());

        gate.reset();
        assert!(!gate.wait_timeout(Duration::from_millis(10)));
    }
}
