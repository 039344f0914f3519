//! Standard handler decorators.
//!
//! Each decorator wraps another [`Handler`] and is itself a `Handler`, so
//! they stack freely before registration:
//!
//! ```rust,ignore
//! resolver.add(PdfHandler.when(|kind: &str| !kind.ends_with(".tmp")).with_priority(50).traced("pdf"));
//! ```

pub mod guard;
pub mod priority;
#[cfg(feature = "timeout")]
pub mod timeout;
pub mod traced;

pub use guard::Guarded;
pub use priority::Prioritized;
#[cfg(feature = "timeout")]
pub use timeout::{Timeout, TimeoutError};
pub use traced::Traced;

use chainr_core::{Handler, SharedHandler, share};

/// Decorator methods available on every [`Handler`].
pub trait HandlerExt<T: ?Sized, A: Sync>: Handler<T, A> + Sized {
    /// Override the handler's priority.
    fn with_priority(self, priority: i32) -> Prioritized<Self> {
        Prioritized::new(self, priority)
    }

    /// Narrow the tokens this handler claims with an extra predicate.
    fn when<P>(self, predicate: P) -> Guarded<Self, P>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guarded::new(self, predicate)
    }

    /// Wrap each `handle` call in a tracing span.
    fn traced(self, name: &'static str) -> Traced<Self> {
        Traced::new(self, name)
    }

    /// Bound each `handle` call by a deadline.
    #[cfg(feature = "timeout")]
    fn timeout(self, duration: std::time::Duration) -> Timeout<Self> {
        Timeout::new(self, duration)
    }

    /// Erase into the shared form a resolver stores.
    fn shared(self) -> SharedHandler<T, A, Self::Output>
    where
        T: 'static,
        A: 'static,
    {
        share(self)
    }
}

impl<T: ?Sized, A: Sync, H: Handler<T, A>> HandlerExt<T, A> for H {}
