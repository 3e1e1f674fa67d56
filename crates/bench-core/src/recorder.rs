use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Outcome counters shared across all workers.
///
/// Each increment is atomic, so callers never need external locking.
/// Once a run completes, `requests == successes + failures`.
#[derive(Debug, Default)]
pub struct Counters {
    requests: AtomicU64,
    successes: AtomicU64,
    failures: AtomicU64,
}

/// Plain copy of the counters at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub requests: u64,
    pub successes: u64,
    pub failures: u64,
}

impl Counters {
    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            successes: self.successes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// Thread-safe accumulator of per-request elapsed times in milliseconds.
///
/// The lock is held only for the duration of the append, never across
/// the HTTP call. Append order across workers is unspecified.
#[derive(Debug, Default)]
pub struct TimeRecorder {
    samples: Mutex<Vec<f64>>,
}

impl TimeRecorder {
    pub fn record(&self, elapsed_ms: f64) {
        self.samples
            .lock()
            .expect("latency sample mutex poisoned")
            .push(elapsed_ms);
    }

    pub fn snapshot(&self) -> Vec<f64> {
        self.samples
            .lock()
            .expect("latency sample mutex poisoned")
            .clone()
    }

    pub fn len(&self) -> usize {
        self.samples
            .lock()
            .expect("latency sample mutex poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
