//! Error types for chainr.
//!
//! - [`ResolveError`] - Registry misuse detected while resolving a token
//! - [`DispatchError`] - Errors surfaced by the execution helpers
//! - [`Interrupted`] - A sequential run that stopped on its first failure

use std::fmt;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
///
/// Handlers and fallbacks report their own failures through this type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while selecting handlers for a token.
///
/// Both variants are deterministic and caller-correctable: register a
/// handler, pass a supported token, or install a fallback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The resolver has no registered handlers.
    ///
    /// Raised regardless of whether a fallback is installed.
    #[error("no handlers assigned")]
    UnassignedTarget,

    /// No handler claimed the token and no fallback is installed.
    #[error("unsupported type: {token}")]
    UnsupportedType {
        /// Rendered form of the rejected token.
        token: String,
    },
}

/// Errors surfaced by the execution helpers.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Resolution failed before any handler ran.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A handler (or the fallback) failed; the error is passed through as is.
    #[error(transparent)]
    Handler(BoxError),
}

impl DispatchError {
    /// Returns the resolution error, if this is one.
    pub fn as_resolve(&self) -> Option<&ResolveError> {
        match self {
            DispatchError::Resolve(err) => Some(err),
            DispatchError::Handler(_) => None,
        }
    }

    /// Returns the handler's own error, if this is one.
    pub fn as_handler(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            DispatchError::Handler(err) => Some(err.as_ref()),
            DispatchError::Resolve(_) => None,
        }
    }

    /// Unwraps the handler's own error, if this is one.
    pub fn into_handler(self) -> Option<BoxError> {
        match self {
            DispatchError::Handler(err) => Some(err),
            DispatchError::Resolve(_) => None,
        }
    }
}

impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::Handler(err)
    }
}

/// A sequential run that stopped on its first failure.
///
/// `completed` holds the results of the handlers that finished before the
/// failing one, in execution order. Handlers after the failing one were never
/// invoked.
pub struct Interrupted<R> {
    /// Results produced before the failure.
    pub completed: Vec<R>,
    /// The failure that stopped the run.
    pub error: DispatchError,
}

impl<R> Interrupted<R> {
    /// Create an interruption with the given prefix of results.
    pub fn new(completed: Vec<R>, error: impl Into<DispatchError>) -> Self {
        Self {
            completed,
            error: error.into(),
        }
    }

    /// Discard the prefix and keep only the failure.
    pub fn into_error(self) -> DispatchError {
        self.error
    }
}

impl<R> From<ResolveError> for Interrupted<R> {
    fn from(err: ResolveError) -> Self {
        Self::new(Vec::new(), err)
    }
}

impl<R> fmt::Debug for Interrupted<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interrupted")
            .field("completed", &self.completed.len())
            .field("error", &self.error)
            .finish()
    }
}

impl<R> fmt::Display for Interrupted<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "interrupted after {} handler(s): {}",
            self.completed.len(),
            self.error
        )
    }
}

impl<R> std::error::Error for Interrupted<R> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
