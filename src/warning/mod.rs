//! Warning values
//!
//! A [`Warning`] is an immutable diagnostic carrying a single message. Warnings
//! travel through writers and collectors as [`SharedWarning`] handles, so the
//! same value can be fanned out to several sinks without copying it.
//!
//! # Examples
//!
//! ```
//! use ripple::warning::{self, Message, Warning};
//!
//! let w = warning::new("disk almost full");
//! assert_eq!(w.message(), "disk almost full");
//! assert_eq!(w.to_string(), "disk almost full");
//!
//! let m = Message::from("deprecated flag");
//! assert_eq!(m.as_str(), "deprecated flag");
//! ```
//!
//! Custom warnings only need to produce their text:
//!
//! ```
//! use ripple::Warning;
//!
//! #[derive(Debug)]
//! struct SlowQuery {
//!     millis: u64,
//! }
//!
//! impl Warning for SlowQuery {
//!     fn message(&self) -> String {
//!         format!("query took {}ms", self.millis)
//!     }
//! }
//!
//! assert_eq!(SlowQuery { millis: 1200 }.message(), "query took 1200ms");
//! ```

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
mod serde_impl;

/// A non-fatal diagnostic.
///
/// The only required operation is producing the message text. Implementors
/// must be shareable across threads because writers and collectors are.
pub trait Warning: fmt::Debug + Send + Sync {
    /// The diagnostic text.
    fn message(&self) -> String;
}

/// Shared handle to a warning, as passed to writers and returned by readers.
///
/// Identity is by reference: use [`Arc::ptr_eq`] to check whether two handles
/// point to the same warning.
pub type SharedWarning = Arc<dyn Warning>;

/// Renders the warning's message.
///
/// This is what lets warnings interpolate as plain text in `format!` and
/// [`warnf!`](crate::warnf).
impl fmt::Display for dyn Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// A warning made from a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message(String);

impl Message {
    /// Create a message warning.
    pub fn new(message: impl Into<String>) -> Self {
        Message(message.into())
    }

    /// Borrow the message text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the message text.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Wrap into a [`SharedWarning`].
    pub fn shared(self) -> SharedWarning {
        Arc::new(self)
    }
}

impl Warning for Message {
    fn message(&self) -> String {
        self.0.clone()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Message {
    fn from(s: &str) -> Self {
        Message(s.to_string())
    }
}

impl From<String> for Message {
    fn from(s: String) -> Self {
        Message(s)
    }
}

/// Create a shared warning from a string.
///
/// # Example
///
/// ```
/// use ripple::warning;
///
/// let w = warning::new("unused variable");
/// assert_eq!(w.message(), "unused variable");
/// ```
pub fn new(message: impl Into<String>) -> SharedWarning {
    Arc::new(Message::new(message))
}
