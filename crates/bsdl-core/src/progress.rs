//! Progress reporting for downloads.
//!
//! The downloader only talks to `ProgressReporter`; the CLI renders it as a
//! terminal bar, tests count bytes, and library callers can pass `NoopProgress`.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

/// Receives progress updates while a body is streamed to disk.
pub trait ProgressReporter: Send + Sync {
    /// Transfer started. `total` is the announced body size, `None` when unknown.
    fn start(&self, label: &str, total: Option<u64>);

    /// `bytes` more were written.
    fn advance(&self, bytes: u64);

    /// Transfer completed successfully.
    fn finish(&self, message: &str);

    /// Transfer failed; whatever was shown must not look like success.
    fn fail(&self, message: &str);
}

/// Ignores all updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn start(&self, _label: &str, _total: Option<u64>) {}
    fn advance(&self, _bytes: u64) {}
    fn finish(&self, _message: &str) {}
    fn fail(&self, _message: &str) {}
}

/// Records totals; handy for tests and for callers that only need the numbers.
#[derive(Debug, Default)]
pub struct CountingProgress {
    total: Mutex<Option<u64>>,
    done: AtomicU64,
    updates: AtomicU64,
    finished: AtomicBool,
    failed: AtomicBool,
}

impl CountingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size announced at `start`.
    pub fn total(&self) -> Option<u64> {
        *self.total.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Sum of all `advance` calls.
    pub fn bytes_done(&self) -> u64 {
        self.done.load(Ordering::Relaxed)
    }

    /// Number of `advance` calls.
    pub fn updates(&self) -> u64 {
        self.updates.load(Ordering::Relaxed)
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Relaxed)
    }

    pub fn is_failed(&self) -> bool {
        self.failed.load(Ordering::Relaxed)
    }
}

impl ProgressReporter for CountingProgress {
    fn start(&self, _label: &str, total: Option<u64>) {
        *self.total.lock().unwrap_or_else(|e| e.into_inner()) = total;
    }

    fn advance(&self, bytes: u64) {
        self.done.fetch_add(bytes, Ordering::Relaxed);
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    fn finish(&self, _message: &str) {
        self.finished.store(true, Ordering::Relaxed);
    }

    fn fail(&self, _message: &str) {
        self.failed.store(true, Ordering::Relaxed);
    }
}
