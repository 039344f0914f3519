//! Tracing instrumentation for handlers.

use chainr_core::{BoxError, Handler};

#[cfg(feature = "tracing")]
use tracing::Instrument;

/// A handler wrapper that runs `handle` inside a `tracing` span.
///
/// The span records the handler's name and priority. Failures are logged at
/// `debug` level and returned untouched. Without the `tracing` feature this
/// is a pass-through.
#[derive(Debug, Clone, Copy)]
pub struct Traced<H> {
    inner: H,
    name: &'static str,
}

impl<H> Traced<H> {
    /// Create a new `Traced` wrapper around a handler.
    pub const fn new(inner: H, name: &'static str) -> Self {
        Self { inner, name }
    }

    /// The name recorded on the span.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Get a reference to the inner handler.
    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<T, A, H> Handler<T, A> for Traced<H>
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

    #[cfg(feature = "tracing")]
    async fn handle(&self, args: &A) -> Result<Self::Output, BoxError> {
        let span = tracing::info_span!(
            "handle",
            handler = %self.name,
            priority = self.inner.priority()
        );

        async move {
            let result = self.inner.handle(args).await;
            if let Err(err) = &result {
                tracing::debug!(error = %err, "handler failed");
            }
            result
        }
        .instrument(span)
        .await
    }

    #[cfg(not(feature = "tracing"))]
    async fn handle(&self, args: &A) -> Result<Self::Output, BoxError> {
        self.inner.handle(args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy)]
    struct Echo;

    impl Handler<str, u32> for Echo {
        type Output = u32;

        fn supports(&self, token: &str) -> bool {
            token == "echo"
        }

        fn priority(&self) -> i32 {
            7
        }

        async fn handle(&self, args: &u32) -> Result<u32, BoxError> {
            Ok(*args)
        }
    }

    #[tokio::test]
    async fn traced_handler_passes_through() {
        let handler = Traced::new(Echo, "echo").clone();

        assert_eq!(handler.name(), "echo");
        assert!(handler.supports("echo"));
        assert_eq!(handler.priority(), 7);
        assert_eq!(handler.handle(&5).await.unwrap(), 5);
    }
}
