//! # chainr-core
//!
//! Core traits for the chainr chain-of-responsibility resolver.
//!
//! This crate has minimal dependencies and is meant to be imported by crates
//! that only *provide* handlers and don't need the resolver itself.
//!
//! # Building Blocks
//!
//! ## [`Handler`]
//!
//! A capability made of a `supports(token)` predicate, an optional
//! `priority` and an asynchronous `handle(args)` action. Handlers are
//! heterogeneous in behavior only; [`DynHandler`] and [`SharedHandler`]
//! erase them for storage.
//!
//! ## [`Fallback`]
//!
//! A catch-all action with the same argument shape as `handle`, used only
//! when no handler claims a token.
//!
//! ## [`Token`]
//!
//! Anything handlers can be selected by. The resolver never compares tokens;
//! it only renders them for error messages.
//!
//! # Error Types
//!
//! - [`ResolveError`] - Registry misuse (`UnassignedTarget`, `UnsupportedType`)
//! - [`DispatchError`] - Errors surfaced by the execution helpers
//! - [`Interrupted`] - A sequential run stopped by a failure

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod fallback;
mod handler;
mod token;

// Re-exports
pub use error::{BoxError, DispatchError, Interrupted, ResolveError};
pub use fallback::{DynFallback, Fallback, SharedFallback};
pub use handler::{BoxFuture, DynHandler, Handler, HandlerFn, SharedHandler, share};
pub use token::{Structured, Token};
