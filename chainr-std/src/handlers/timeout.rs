//! Timeout - time-limited handler execution.
//!
//! **Note**: This module requires the `tokio` runtime (`timeout` feature).

use chainr_core::{BoxError, Handler};
use std::time::Duration;
use thiserror::Error;

/// Error returned when a handler does not finish in time.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("handler timed out after {0:?}")]
pub struct TimeoutError(pub Duration);

/// A handler wrapper that bounds `handle` by a deadline.
///
/// The resolver itself defines no timeouts; wrap individual handlers when a
/// slow one must not stall `handle_all_sequential` or `handle_all`.
///
/// ```rust,ignore
/// let bounded = Timeout::millis(SlowHandler, 250);
/// ```
#[derive(Debug, Clone)]
pub struct Timeout<H> {
    inner: H,
    duration: Duration,
}

impl<H> Timeout<H> {
    /// Create a new `Timeout` wrapping the given handler.
    pub fn new(inner: H, duration: Duration) -> Self {
        Self { inner, duration }
    }

    /// Create a `Timeout` with the deadline specified in milliseconds.
    pub fn millis(inner: H, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// Get the configured timeout duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Get a reference to the inner handler.
    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<T, A, H> Handler<T, A> for Timeout<H>
where
    T: ?Sized,
    A: Sync,
    H: Handler<T, A>,
{
    type Output = H::Output;

    fn supports(&self, token: &T) -> bool {
        self.inner.supports(token)
    }

    fn priority(&self) -> i32 {
        self.inner.priority()
    }

    async fn handle(&self, args: &A) -> Result<Self::Output, BoxError> {
        match tokio::time::timeout(self.duration, self.inner.handle(args)).await {
            Ok(result) => result,
            Err(_) => Err(Box::new(TimeoutError(self.duration))),
        }
    }
}
