//! The resolver: an ordered handler registry with an optional fallback.
//!
//! Resolution is synchronous and happens before any handler runs:
//!
//! 1. an empty registry fails with [`ResolveError::UnassignedTarget`]
//!    (even when a fallback is installed),
//! 2. handlers whose `supports(token)` holds are kept in insertion order,
//! 3. the matches are stable-sorted by descending priority.
//!
//! When nothing matches, an installed fallback is wrapped into a
//! [`FallbackHandler`] so single and multi resolution share one shape.

use chainr_core::{
    BoxError, DispatchError, Fallback, Handler, Interrupted, ResolveError, SharedFallback,
    SharedHandler, Token,
};
use futures::future::try_join_all;
use std::{cmp::Reverse, fmt, sync::Arc};

/// An ordered set of handlers plus an optional fallback.
///
/// `T` is the token type, `A` the argument bundle handed to every handler
/// and `R` the handlers' common output.
///
/// # Example
///
/// ```rust,ignore
/// let mut resolver = Resolver::<str, Document, Summary>::new();
/// resolver
///     .add(PdfHandler)
///     .set_fallback(|doc: &Document| async { Ok(Summary::empty()) })
///     .add(ImageHandler);
///
/// let summary = resolver.resolve("pdf")?.handle(&doc).await?;
/// let all = resolver.handle_all("pdf", &doc).await?;
/// ```
pub struct Resolver<T, A, R>
where
    T: ?Sized,
    A: Sync,
    R: Send + 'static,
{
    handlers: Vec<SharedHandler<T, A, R>>,
    fallback: Option<SharedFallback<A, R>>,
}

impl<T, A, R> Resolver<T, A, R>
where
    T: ?Sized + 'static,
    A: Sync + 'static,
    R: Send + 'static,
{
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            fallback: None,
        }
    }

    /// Create a resolver pre-seeded with handlers, in the given order.
    pub fn with_handlers<I>(handlers: I) -> Self
    where
        I: IntoIterator<Item = SharedHandler<T, A, R>>,
    {
        Self {
            handlers: handlers.into_iter().collect(),
            fallback: None,
        }
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Replace every registered handler.
    pub fn replace_all<I>(&mut self, handlers: I)
    where
        I: IntoIterator<Item = SharedHandler<T, A, R>>,
    {
        self.handlers = handlers.into_iter().collect();

        #[cfg(feature = "tracing")]
        tracing::trace!(count = self.handlers.len(), "replaced handlers");
    }

    /// Append handlers after the existing ones.
    pub fn append<I>(&mut self, handlers: I)
    where
        I: IntoIterator<Item = SharedHandler<T, A, R>>,
    {
        self.handlers.extend(handlers);

        #[cfg(feature = "tracing")]
        tracing::trace!(count = self.handlers.len(), "appended handlers");
    }

    /// Register one handler.
    pub fn add<H>(&mut self, handler: H) -> &mut Self
    where
        H: Handler<T, A, Output = R>,
    {
        self.add_shared(Arc::new(handler))
    }

    /// Register one handler that is already shared.
    pub fn add_shared(&mut self, handler: SharedHandler<T, A, R>) -> &mut Self {
        self.handlers.push(handler);

        #[cfg(feature = "tracing")]
        tracing::trace!(count = self.handlers.len(), "added handler");

        self
    }

    /// Install or replace the fallback.
    pub fn set_fallback<F>(&mut self, fallback: F) -> &mut Self
    where
        F: Fallback<A, Output = R>,
    {
        self.set_shared_fallback(Arc::new(fallback))
    }

    /// Install or replace the fallback with one that is already shared.
    pub fn set_shared_fallback(&mut self, fallback: SharedFallback<A, R>) -> &mut Self {
        self.fallback = Some(fallback);
        self
    }

    /// Remove the fallback, if any.
    pub fn clear_fallback(&mut self) -> &mut Self {
        self.fallback = None;
        self
    }

    /// Number of registered handlers (the fallback is not counted).
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered handlers in insertion order.
    pub fn handlers(&self) -> &[SharedHandler<T, A, R>] {
        &self.handlers
    }

    /// Whether a fallback is installed.
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    // ------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------

    /// Matching handlers, highest priority first, ties in insertion order.
    fn matching(&self, token: &T) -> Result<Vec<&SharedHandler<T, A, R>>, ResolveError> {
        if self.handlers.is_empty() {
            return Err(ResolveError::UnassignedTarget);
        }

        let mut matched: Vec<_> = self
            .handlers
            .iter()
            .filter(|handler| handler.supports_dyn(token))
            .collect();
        // `sort_by_key` is stable.
        matched.sort_by_key(|handler| Reverse(handler.priority_dyn()));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            registered = self.handlers.len(),
            matched = matched.len(),
            "resolved token"
        );

        Ok(matched)
    }

    fn fallback_handler(&self) -> Option<Resolved<T, A, R>> {
        self.fallback.as_ref().map(|action| {
            #[cfg(feature = "tracing")]
            tracing::debug!("no handler matched, using fallback");

            Resolved::Fallback(FallbackHandler::new(Arc::clone(action)))
        })
    }

    /// Select the single best handler for `token`.
    ///
    /// Returns the highest-priority match (insertion order breaks ties),
    /// else the fallback, else [`ResolveError::UnsupportedType`].
    pub fn resolve(&self, token: &T) -> Result<Resolved<T, A, R>, ResolveError>
    where
        T: Token,
    {
        match self.matching(token)?.into_iter().next() {
            Some(handler) => Ok(Resolved::Handler(Arc::clone(handler))),
            None => self
                .fallback_handler()
                .ok_or_else(|| ResolveError::UnsupportedType {
                    token: token.render(),
                }),
        }
    }

    /// Select every handler for `token`, in execution order.
    ///
    /// No match is not an error here: the result is the fallback alone when
    /// one is installed, otherwise empty.
    pub fn resolve_all(&self, token: &T) -> Result<Vec<Resolved<T, A, R>>, ResolveError> {
        let matched = self.matching(token)?;
        if matched.is_empty() {
            return Ok(self.fallback_handler().into_iter().collect());
        }
        Ok(matched
            .into_iter()
            .map(|handler| Resolved::Handler(Arc::clone(handler)))
            .collect())
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    /// Run every resolved handler concurrently.
    ///
    /// Invocations start in execution order without waiting for each other.
    /// Results are returned in execution order regardless of completion
    /// order. The first failure is returned as is; sibling invocations still
    /// in flight are dropped.
    pub async fn handle_all(&self, token: &T, args: &A) -> Result<Vec<R>, DispatchError> {
        let resolved = self.resolve_all(token)?;
        let results = try_join_all(resolved.iter().map(|handler| handler.handle(args))).await?;
        Ok(results)
    }

    /// Run every resolved handler one at a time.
    ///
    /// Each invocation completes before the next starts. The first failure
    /// stops the run; later handlers are never invoked and the results
    /// produced so far travel with the error in [`Interrupted`].
    pub async fn handle_all_sequential(
        &self,
        token: &T,
        args: &A,
    ) -> Result<Vec<R>, Interrupted<R>> {
        let resolved = self.resolve_all(token)?;
        let mut completed = Vec::with_capacity(resolved.len());

        for handler in &resolved {
            match handler.handle(args).await {
                Ok(output) => completed.push(output),
                Err(err) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        completed = completed.len(),
                        remaining = resolved.len() - completed.len() - 1,
                        error = %err,
                        "sequential run interrupted"
                    );

                    return Err(Interrupted::new(completed, err));
                }
            }
        }

        Ok(completed)
    }
}

impl<T, A, R> Default for Resolver<T, A, R>
where
    T: ?Sized + 'static,
    A: Sync + 'static,
    R: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A, R> FromIterator<SharedHandler<T, A, R>> for Resolver<T, A, R>
where
    T: ?Sized + 'static,
    A: Sync + 'static,
    R: Send + 'static,
{
    fn from_iter<I: IntoIterator<Item = SharedHandler<T, A, R>>>(iter: I) -> Self {
        Self::with_handlers(iter)
    }
}

impl<T, A, R> fmt::Debug for Resolver<T, A, R>
where
    T: ?Sized,
    A: Sync,
    R: Send + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("handlers", &self.handlers.len())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

// ============================================================================
// Resolved handlers
// ============================================================================

/// A handler selected by [`Resolver::resolve`] or [`Resolver::resolve_all`].
///
/// Either a registered handler or the wrapped fallback. Both are
/// handler-shaped: `Resolved` implements [`Handler`] itself.
pub enum Resolved<T, A, R>
where
    T: ?Sized,
    A: Sync,
    R: Send + 'static,
{
    /// A registered handler claimed the token.
    Handler(SharedHandler<T, A, R>),
    /// Nothing claimed the token; the fallback stands in.
    Fallback(FallbackHandler<A, R>),
}

impl<T, A, R> Resolved<T, A, R>
where
    T: ?Sized,
    A: Sync,
    R: Send + 'static,
{
    /// Whether this is the fallback stand-in.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolved::Fallback(_))
    }

    /// The registered handler, unless this is the fallback.
    pub fn as_shared(&self) -> Option<&SharedHandler<T, A, R>> {
        match self {
            Resolved::Handler(handler) => Some(handler),
            Resolved::Fallback(_) => None,
        }
    }

    /// Whether this is exactly the given registered handler.
    pub fn is(&self, handler: &SharedHandler<T, A, R>) -> bool {
        self.as_shared().is_some_and(|shared| Arc::ptr_eq(shared, handler))
    }
}

impl<T, A, R> Clone for Resolved<T, A, R>
where
    T: ?Sized,
    A: Sync,
    R: Send + 'static,
{
    fn clone(&self) -> Self {
        match self {
            Resolved::Handler(handler) => Resolved::Handler(Arc::clone(handler)),
            Resolved::Fallback(fallback) => Resolved::Fallback(fallback.clone()),
        }
    }
}

impl<T, A, R> fmt::Debug for Resolved<T, A, R>
where
    T: ?Sized + 'static,
    A: Sync + 'static,
    R: Send + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolved::Handler(handler) => f
                .debug_struct("Handler")
                .field("priority", &handler.priority_dyn())
                .finish(),
            Resolved::Fallback(_) => f.write_str("Fallback"),
        }
    }
}

impl<T, A, R> Handler<T, A> for Resolved<T, A, R>
where
    T: ?Sized + 'static,
    A: Sync + 'static,
    R: Send + 'static,
{
    type Output = R;

    fn supports(&self, token: &T) -> bool {
        match self {
            Resolved::Handler(handler) => handler.supports_dyn(token),
            Resolved::Fallback(_) => true,
        }
    }

    fn priority(&self) -> i32 {
        match self {
            Resolved::Handler(handler) => handler.priority_dyn(),
            Resolved::Fallback(_) => 0,
        }
    }

    async fn handle(&self, args: &A) -> Result<R, BoxError> {
        match self {
            Resolved::Handler(handler) => handler.handle_dyn(args).await,
            Resolved::Fallback(fallback) => fallback.action.call_dyn(args).await,
        }
    }
}

/// Handler-shaped adapter around a fallback action.
///
/// Claims every token and delegates `handle` to the fallback. Built on
/// demand at resolution time; it is never stored in a resolver.
pub struct FallbackHandler<A: Sync, R: Send + 'static> {
    action: SharedFallback<A, R>,
}

impl<A: Sync, R: Send + 'static> FallbackHandler<A, R> {
    /// Wrap a fallback action.
    pub fn new(action: SharedFallback<A, R>) -> Self {
        Self { action }
    }
}

impl<A: Sync, R: Send + 'static> Clone for FallbackHandler<A, R> {
    fn clone(&self) -> Self {
        Self {
            action: Arc::clone(&self.action),
        }
    }
}

impl<T, A, R> Handler<T, A> for FallbackHandler<A, R>
where
    T: ?Sized,
    A: Sync + 'static,
    R: Send + 'static,
{
    type Output = R;

    fn supports(&self, _token: &T) -> bool {
        true
    }

    async fn handle(&self, args: &A) -> Result<R, BoxError> {
        self.action.call_dyn(args).await
    }
}
