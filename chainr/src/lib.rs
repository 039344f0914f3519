//! # chainr - Chain-of-Responsibility Resolver
//!
//! `chainr` selects handlers by token and runs them. A [`Resolver`] holds an
//! ordered set of [`Handler`]s and an optional [`Fallback`]:
//!
//! - [`Resolver::resolve`] picks the single best match,
//! - [`Resolver::resolve_all`] returns every match in execution order,
//! - [`Resolver::handle_all`] runs every match concurrently,
//! - [`Resolver::handle_all_sequential`] runs them one at a time and stops
//!   at the first failure.
//!
//! Matches are ordered by descending [`Handler::priority`]; equal priorities
//! keep registration order. When nothing matches, the fallback stands in.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chainr::prelude::*;
//!
//! struct Pdf;
//!
//! impl Handler<str, Document> for Pdf {
//!     type Output = Summary;
//!
//!     fn supports(&self, kind: &str) -> bool {
//!         kind == "pdf"
//!     }
//!
//!     async fn handle(&self, doc: &Document) -> Result<Summary, BoxError> {
//!         summarize(doc).await
//!     }
//! }
//!
//! let mut resolver = Resolver::new();
//! resolver
//!     .add(Pdf)
//!     .set_fallback(|doc: &Document| { let size = doc.len(); async move { Ok(Summary::raw(size)) } });
//!
//! let summary = resolver.resolve("pdf")?.handle(&doc).await?;
//! ```
//!
//! ## Features
//!
//! - `tracing` (default): resolution and failure events, [`Traced`](handlers::Traced) spans
//! - `timeout`: the [`Timeout`](handlers::Timeout) decorator (tokio)
//! - `macros`: the `#[chainr::handler]` attribute

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use chainr_core::{
    // Errors
    BoxError,
    // Handler
    BoxFuture,
    DispatchError,
    DynFallback,
    DynHandler,
    // Fallback
    Fallback,
    Handler,
    HandlerFn,
    Interrupted,
    ResolveError,
    SharedFallback,
    SharedHandler,
    // Token
    Structured,
    Token,
    share,
};

// Resolution
pub use chainr_std::resolver::{FallbackHandler, Resolved, Resolver};

/// Standard handler decorators.
pub mod handlers {
    #![allow(clippy::wildcard_imports)]
    pub use chainr_std::handlers::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use chainr_std::testing::*;
}

/// Prelude module - common imports for chainr.
///
/// # Usage
///
/// ```rust,ignore
/// use chainr::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Errors
        BoxError,
        DispatchError,
        // Core traits
        Fallback,
        Handler,
        HandlerFn,
        Interrupted,
        ResolveError,
        // Resolution
        Resolved,
        Resolver,
        SharedHandler,
        Token,
        handlers::HandlerExt,
        share,
    };
}

#[cfg(feature = "macros")]
pub use chainr_macros::handler;
