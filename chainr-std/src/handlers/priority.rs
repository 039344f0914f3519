//! Priority override.

use chainr_core::{BoxError, Handler};
use std::future::Future;

/// A handler whose priority is fixed at registration time.
///
/// Useful when the same handler type is registered several times with
/// different weights, or when a third-party handler's own priority is wrong
/// for the local chain.
#[derive(Debug, Clone)]
pub struct Prioritized<H> {
    inner: H,
    priority: i32,
}

impl<H> Prioritized<H> {
    /// Wrap `inner` with the given priority.
    pub fn new(inner: H, priority: i32) -> Self {
        Self { inner, priority }
    }

    /// Get a reference to the inner handler.
    pub fn inner(&self) -> &H {
        &self.inner
    }

    /// Unwrap the inner handler.
    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<T, A, H> Handler<T, A> for Prioritized<H>
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
        self.priority
    }

    fn handle(&self, args: &A) -> impl Future<Output = Result<Self::Output, BoxError>> + Send {
        self.inner.handle(args)
    }
}
