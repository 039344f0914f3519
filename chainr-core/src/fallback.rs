//! Fallback actions.
//!
//! A fallback is a catch-all action with the same argument shape as
//! [`Handler::handle`], but without a `supports` predicate. The resolver
//! only reaches for it when no registered handler claims a token.
//!
//! [`Handler::handle`]: crate::Handler::handle

use crate::{error::BoxError, handler::BoxFuture};
use std::{future::Future, sync::Arc};

/// A catch-all action used when no handler matches.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a fallback for arguments `{A}`",
    label = "missing `Fallback<{A}>` implementation",
    note = "Closures of the form `Fn(&{A}) -> impl Future<Output = Result<_, BoxError>>` are fallbacks."
)]
pub trait Fallback<A: Sync>: Send + Sync + 'static {
    /// The value produced by a successful call.
    type Output: Send + 'static;

    /// Runs the fallback action.
    fn call(&self, args: &A) -> impl Future<Output = Result<Self::Output, BoxError>> + Send;
}

// Blanket impl for closures
impl<A, F, Fut, R> Fallback<A> for F
where
    A: Sync,
    F: Fn(&A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, BoxError>> + Send,
    R: Send + 'static,
{
    type Output = R;

    fn call(&self, args: &A) -> impl Future<Output = Result<Self::Output, BoxError>> + Send {
        (self)(args)
    }
}

/// Object-safe version of [`Fallback`].
pub trait DynFallback<A: Sync>: Send + Sync + 'static {
    /// The value produced by a successful call.
    type Output: Send + 'static;

    /// Runs the fallback action (dynamic dispatch version).
    fn call_dyn<'a>(&'a self, args: &'a A) -> BoxFuture<'a, Result<Self::Output, BoxError>>;
}

impl<A: Sync, F: Fallback<A>> DynFallback<A> for F {
    type Output = F::Output;

    fn call_dyn<'a>(&'a self, args: &'a A) -> BoxFuture<'a, Result<Self::Output, BoxError>> {
        Box::pin(self.call(args))
    }
}

/// A type-erased fallback.
pub type SharedFallback<A, R> = Arc<dyn DynFallback<A, Output = R>>;
