//! Testing utilities for chainr.
//!
//! - [`CallLog`]: a shared, ordered record of handler invocations
//! - [`RecordingHandler`]: a handler that claims fixed tokens, records every
//!   call into a [`CallLog`] and either succeeds with its name or fails

use chainr_core::{BoxError, Handler};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

// ============================================================================
// Call Log
// ============================================================================

/// An ordered record of handler invocations, shared between handlers.
///
/// # Example
///
/// ```rust,ignore
/// let log = CallLog::new();
/// resolver.add(RecordingHandler::new("A", &log).supporting(["t"]));
///
/// resolver.handle_all_sequential("t", &()).await?;
/// assert_eq!(log.calls(), ["A"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an entry.
    pub fn record(&self, name: impl Into<String>) {
        self.lock().push(name.into());
    }

    /// Get a copy of the recorded entries, oldest first.
    pub fn calls(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Get the number of recorded entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Clear all recorded entries.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

// ============================================================================
// Recording Handler
// ============================================================================

/// Error returned by a [`RecordingHandler`] built with
/// [`RecordingHandler::failing`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("handler `{0}` failed")]
pub struct HandlerFailed(pub String);

/// A handler that records its invocations.
///
/// It claims exactly the string tokens given to
/// [`supporting`](RecordingHandler::supporting), records its name into the
/// log on every `handle`, then returns its name (or [`HandlerFailed`]).
/// Works with any argument bundle.
#[derive(Debug, Clone)]
pub struct RecordingHandler {
    name: String,
    tokens: Vec<String>,
    priority: i32,
    fail: bool,
    log: CallLog,
}

impl RecordingHandler {
    /// Create a handler that succeeds with its name.
    pub fn new(name: impl Into<String>, log: &CallLog) -> Self {
        Self {
            name: name.into(),
            tokens: Vec::new(),
            priority: 0,
            fail: false,
            log: log.clone(),
        }
    }

    /// Create a handler that fails with [`HandlerFailed`] after recording.
    pub fn failing(name: impl Into<String>, log: &CallLog) -> Self {
        Self {
            fail: true,
            ..Self::new(name, log)
        }
    }

    /// Add tokens this handler claims.
    pub fn supporting<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens.extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Set the priority.
    pub fn at_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// The handler's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<A: Sync> Handler<str, A> for RecordingHandler {
    type Output = String;

    fn supports(&self, token: &str) -> bool {
        self.tokens.iter().any(|claimed| claimed == token)
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    async fn handle(&self, _args: &A) -> Result<String, BoxError> {
        self.log.record(self.name.clone());
        if self.fail {
            Err(Box::new(HandlerFailed(self.name.clone())))
        } else {
            Ok(self.name.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_calls_in_order() {
        let log = CallLog::new();
        let a = RecordingHandler::new("A", &log).supporting(["t"]);
        let b = RecordingHandler::failing("B", &log).supporting(["t", "u"]);

        assert!(Handler::<str, ()>::supports(&a, "t"));
        assert!(!Handler::<str, ()>::supports(&a, "u"));
        assert!(Handler::<str, ()>::supports(&b, "u"));

        assert_eq!(Handler::<str, ()>::handle(&a, &()).await.unwrap(), "A");
        let err = Handler::<str, ()>::handle(&b, &()).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<HandlerFailed>(),
            Some(&HandlerFailed("B".to_string()))
        );

        assert_eq!(log.calls(), ["A", "B"]);
        log.clear();
        assert!(log.is_empty());
    }
}
