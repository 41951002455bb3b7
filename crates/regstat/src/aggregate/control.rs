//! Cancellation and progress reporting for aggregation jobs.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable flag that asks a running job to stop at the next batch boundary.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Progress of one source after a batch completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Name of the source being aggregated.
    pub source: String,
    pub rows_processed: usize,
    pub rows_total: usize,
}

impl ProgressUpdate {
    /// Fraction complete in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.rows_total == 0 {
            1.0
        } else {
            self.rows_processed as f64 / self.rows_total as f64
        }
    }
}

/// Receives progress updates from the batch loop.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, update: ProgressUpdate);
}

/// Adapts a closure into a [`ProgressReporter`].
pub struct ClosureProgressReporter<F> {
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update)
    }
}

impl<F> fmt::Debug for ClosureProgressReporter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureProgressReporter").finish_non_exhaustive()
    }
}
