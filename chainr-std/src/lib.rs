//! # chainr-std
//!
//! Standard implementations for the chainr resolver.
//!
//! This crate provides:
//! - **Resolution**: [`Resolver`], [`Resolved`], [`FallbackHandler`]
//! - **Decorators**: priority override, guards, tracing, timeout
//! - **Testing**: [`CallLog`](testing::CallLog), [`RecordingHandler`](testing::RecordingHandler)

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use chainr_core;

// Modules
pub mod handlers;
pub mod resolver;
pub mod testing;

pub use resolver::{FallbackHandler, Resolved, Resolver};
