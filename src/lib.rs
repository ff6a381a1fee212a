//! # Ripple
//!
//! > *"Every stone leaves a ripple"*
//!
//! Scoped, composable warning streams for Rust.
//!
//! ## Philosophy
//!
//! Code deep in a call tree often notices something worth reporting that is
//! not worth failing for: a deprecated option, a slow query, a skipped record.
//! **Ripple** lets that code emit a warning without changing its return type.
//! A [`Scope`] carries the active [`Writer`]; whoever created the scope
//! decides where warnings go and how they are transformed on the way.
//!
//! - Emitting into a scope nobody listens to is free and never fails.
//! - Scopes are values: attaching, detaching or wrapping returns a new scope,
//!   so sibling branches never see each other's pipelines.
//! - A [`Collector`] anchors a stream; read it back with [`read_all`] or a
//!   [`Scanner`].
//!
//! ## Quick Example
//!
//! ```rust
//! use std::sync::Arc;
//! use ripple::prelude::*;
//!
//! let collector = Arc::new(Collector::new());
//! let scope = Scope::new().attach(Arc::clone(&collector));
//!
//! ripple::warnf!(scope, "this is a warning 1").unwrap();
//! ripple::warnf!(scope, "this is a warning 2").unwrap();
//!
//! let messages: Vec<String> = read_all(&*collector)
//!     .unwrap()
//!     .iter()
//!     .map(|w| w.message())
//!     .collect();
//! assert_eq!(messages, vec!["this is a warning 1", "this is a warning 2"]);
//! ```
//!
//! ## Pipelines
//!
//! Each wrapper sees warnings before the ones installed earlier, so the
//! filter below runs first and the upper-casing after it.
//!
//! ```rust
//! use std::sync::Arc;
//! use ripple::prelude::*;
//!
//! let collector = Arc::new(Collector::new());
//! let scope = Scope::new()
//!     .attach(Arc::clone(&collector))
//!     .map(|w| warning::new(w.message().to_uppercase()))
//!     .filter(|w| !w.message().starts_with("ignore"));
//!
//! ripple::warnf!(scope, "this is a warning").unwrap();
//! ripple::warnf!(scope, "ignore this warning").unwrap();
//! ripple::warnf!(scope, "this is another warning").unwrap();
//!
//! let mut scanner = Scanner::new(&*collector);
//! let mut seen = Vec::new();
//! while scanner.scan() {
//!     seen.push(scanner.warning().unwrap().message());
//! }
//! assert_eq!(seen, vec!["THIS IS A WARNING", "THIS IS ANOTHER WARNING"]);
//! ```
//!
//! ## Features
//!
//! - `async` - tokio task-local ambient scope (`scope::task`)
//! - `tracing` - diagnostics through `tracing` and the `LogWriter` sink
//! - `serde` - serialize warnings as their message string
//! - `proptest` - `Arbitrary` for [`Message`](warning::Message)

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod collector;
pub mod combinators;
pub mod error;
#[cfg(feature = "tracing")]
pub mod log;
pub mod reader;
pub mod scanner;
pub mod scope;
pub mod testing;
pub mod warning;
pub mod writer;

// Re-exports
pub use collector::Collector;
pub use combinators::{Filter, Flush, Map, Tap};
pub use error::WarnError;
#[cfg(feature = "tracing")]
pub use log::LogWriter;
pub use reader::{read_all, Reader};
pub use scanner::Scanner;
pub use scope::Scope;
pub use warning::{Message, SharedWarning, Warning};
pub use writer::{MultiWriter, Writer, WriterExt};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::collector::Collector;
    pub use crate::error::WarnError;
    pub use crate::reader::{read_all, Reader};
    pub use crate::scanner::Scanner;
    pub use crate::scope::Scope;
    pub use crate::warning::{self, Message, SharedWarning, Warning};
    pub use crate::writer::{MultiWriter, Writer, WriterExt};
}
