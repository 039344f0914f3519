//! Extra predicate on top of a handler's own `supports`.

use chainr_core::{BoxError, Handler};
use std::future::Future;

/// A handler that claims a token only when both its inner handler and an
/// extra predicate agree.
pub struct Guarded<H, P> {
    inner: H,
    predicate: P,
}

impl<H, P> Guarded<H, P> {
    /// Guard `inner` with `predicate`.
    pub fn new(inner: H, predicate: P) -> Self {
        Self { inner, predicate }
    }

    /// Get a reference to the inner handler.
    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<T, A, H, P> Handler<T, A> for Guarded<H, P>
where
    T: ?Sized,
    A: Sync,
    H: Handler<T, A>,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    type Output = H::Output;

    fn supports(&self, token: &T) -> bool {
        (self.predicate)(token) && self.inner.supports(token)
    }

    fn priority(&self) -> i32 {
        self.inner.priority()
    }

    fn handle(&self, args: &A) -> impl Future<Output = Result<Self::Output, BoxError>> + Send {
        self.inner.handle(args)
    }
}
