//! Per-request execution scope: a deadline plus a cooperative cancel flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::errors::ForecastError;

/// Bounded, cancellable execution scope shared by every day-task of one
/// query.
///
/// Cancellation is cooperative: each day-task checks
/// [`is_cancelled`](Self::is_cancelled) once before dispatching its network
/// call. A call already in flight is never aborted. The deadline is a
/// passive instant, so there is no background timer to stop; dropping the
/// scope at the end of the request releases everything.
#[derive(Debug)]
pub struct RequestScope {
    deadline: Option<Instant>,
    cancelled: AtomicBool,
}

impl RequestScope {
    /// Create a scope with no deadline. It can still be cancelled manually.
    pub fn new() -> Self {
        Self {
            deadline: None,
            cancelled: AtomicBool::new(false),
        }
    }

    /// Create a scope whose deadline fires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
            cancelled: AtomicBool::new(false),
        }
    }

    /// Cancel the scope. All not-yet-started day-tasks will observe this and
    /// exit without recording anything.
    pub fn cancel(&self) {
        // Relaxed is enough: the flag is only ever checked cooperatively.
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// True once the scope is cancelled or its deadline has passed.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
            || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// The error a caller should surface when the deadline fired.
    pub fn deadline_error(&self) -> ForecastError {
        ForecastError::DeadlineExceeded
    }
}

impl Default for RequestScope {
    fn default() -> Self {
        Self::new()
    }
}
