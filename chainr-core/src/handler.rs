//! # Handler
//!
//! A handler is a capability that can claim a token and then process an
//! argument bundle. Handlers are opaque to the resolver beyond three
//! things: the `supports` predicate, an optional `priority`, and the
//! asynchronous `handle` action.
//!
//! # Usage Patterns
//!
//! 1. **Struct implementation**: `impl Handler<str, MyArgs> for MyHandler`
//! 2. **Closures**: `HandlerFn::new(|t: &str| t == "pdf", |args: &MyArgs| async { ... })`
//! 3. **Attribute macro**: `#[chainr::handler(supports = ["pdf"])]` (with the `macros` feature)
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Handler`] uses native `async fn` so decorators compose without boxing.
//! Collections of heterogeneous handlers store [`SharedHandler`], which goes
//! through the object-safe [`DynHandler`].

use crate::error::BoxError;
use std::{future::Future, pin::Pin, sync::Arc};

/// A boxed future returned by the object-safe traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A capability able to claim certain tokens and process them.
///
/// `T` is the token type (may be unsized, e.g. `str`), `A` is the argument
/// bundle passed to [`handle`](Handler::handle). All handlers registered on
/// one resolver share the same `T`, `A` and `Output`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle tokens of type `{T}` with arguments `{A}`",
    label = "missing `Handler<{T}, {A}>` implementation",
    note = "Handlers must implement `supports` and `handle` for the token type `{T}`."
)]
pub trait Handler<T: ?Sized, A: Sync>: Send + Sync + 'static {
    /// The value produced by a successful [`handle`](Handler::handle).
    type Output: Send + 'static;

    /// Whether this handler claims the token.
    fn supports(&self, token: &T) -> bool;

    /// Ordering weight among matching handlers. Higher runs first.
    fn priority(&self) -> i32 {
        0
    }

    /// Processes the argument bundle.
    fn handle(&self, args: &A) -> impl Future<Output = Result<Self::Output, BoxError>> + Send;
}

impl<T, A, H> Handler<T, A> for Arc<H>
where
    T: ?Sized,
    A: Sync,
    H: Handler<T, A>,
{
    type Output = H::Output;

    fn supports(&self, token: &T) -> bool {
        (**self).supports(token)
    }

    fn priority(&self) -> i32 {
        (**self).priority()
    }

    fn handle(&self, args: &A) -> impl Future<Output = Result<Self::Output, BoxError>> + Send {
        (**self).handle(args)
    }
}

/// Object-safe version of [`Handler`].
///
/// Every [`Handler`] implements this automatically.
pub trait DynHandler<T: ?Sized, A: Sync>: Send + Sync + 'static {
    /// The value produced by a successful handle.
    type Output: Send + 'static;

    /// Whether this handler claims the token.
    fn supports_dyn(&self, token: &T) -> bool;

    /// Ordering weight among matching handlers.
    fn priority_dyn(&self) -> i32;

    /// Processes the argument bundle (dynamic dispatch version).
    fn handle_dyn<'a>(&'a self, args: &'a A) -> BoxFuture<'a, Result<Self::Output, BoxError>>;
}

// The boxed future captures `T`, hence the `'static` bound on tokens.
impl<T, A, H> DynHandler<T, A> for H
where
    T: ?Sized + 'static,
    A: Sync,
    H: Handler<T, A>,
{
    type Output = H::Output;

    fn supports_dyn(&self, token: &T) -> bool {
        self.supports(token)
    }

    fn priority_dyn(&self) -> i32 {
        self.priority()
    }

    fn handle_dyn<'a>(&'a self, args: &'a A) -> BoxFuture<'a, Result<Self::Output, BoxError>> {
        Box::pin(self.handle(args))
    }
}

/// A type-erased handler shared between the caller and a resolver.
pub type SharedHandler<T, A, R> = Arc<dyn DynHandler<T, A, Output = R>>;

/// Erase a handler into its shared form.
pub fn share<T, A, H>(handler: H) -> SharedHandler<T, A, H::Output>
where
    T: ?Sized + 'static,
    A: Sync + 'static,
    H: Handler<T, A>,
{
    Arc::new(handler)
}

/// A handler assembled from a predicate and an async action.
///
/// ```rust,ignore
/// let pdf = HandlerFn::new(
///     |kind: &str| kind == "pdf",
///     |doc: &Document| { let len = doc.len(); async move { Ok(len) } },
/// )
/// .with_priority(10);
/// ```
pub struct HandlerFn<P, F> {
    predicate: P,
    action: F,
    priority: i32,
}

impl<P, F> HandlerFn<P, F> {
    /// Create a handler with priority 0.
    pub fn new(predicate: P, action: F) -> Self {
        Self {
            predicate,
            action,
            priority: 0,
        }
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl<T, A, P, F, Fut, R> Handler<T, A> for HandlerFn<P, F>
where
    T: ?Sized,
    A: Sync,
    P: Fn(&T) -> bool + Send + Sync + 'static,
    F: Fn(&A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, BoxError>> + Send,
    R: Send + 'static,
{
    type Output = R;

    fn supports(&self, token: &T) -> bool {
        (self.predicate)(token)
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn handle(&self, args: &A) -> impl Future<Output = Result<Self::Output, BoxError>> + Send {
        (self.action)(args)
    }
}
