//! Scopes carrying the active warning writer
//!
//! A [`Scope`] is an immutable value naming the writer that receives warnings
//! emitted under it. Attaching, detaching or wrapping the writer returns a new
//! scope and leaves the original untouched, so sibling branches of a call tree
//! can build independent pipelines from the same parent.
//!
//! Emitting through a scope with no writer is free: nothing happens and no
//! error is returned.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use ripple::prelude::*;
//!
//! fn parse(scope: &Scope, input: &str) -> usize {
//!     if input.is_empty() {
//!         let _ = ripple::warnf!(scope, "empty input");
//!     }
//!     input.len()
//! }
//!
//! let collector = Arc::new(Collector::new());
//! let root = Scope::new().attach(Arc::clone(&collector));
//!
//! // A child scope that upper-cases its warnings; `root` is unaffected.
//! let loud = root.map(|w| warning::new(w.message().to_uppercase()));
//!
//! parse(&root, "");
//! parse(&loud, "");
//! parse(&root.detach(), "");
//!
//! let messages: Vec<String> = read_all(&*collector)
//!     .unwrap()
//!     .iter()
//!     .map(|w| w.message())
//!     .collect();
//! assert_eq!(messages, vec!["empty input", "EMPTY INPUT"]);
//! ```
//!
//! Code that cannot take a `Scope` parameter can use the ambient carriers in
//! [`ambient`] (thread-local) and, with the `async` feature, `task`
//! (tokio task-local).

use std::fmt;
use std::sync::Arc;

use crate::combinators::{reduce, Filter, Flush, Map, Tap};
use crate::error::WarnError;
use crate::warning::{Message, SharedWarning, Warning};
use crate::writer::{MultiWriter, Writer};

pub mod ambient;
#[cfg(feature = "async")]
pub mod task;

/// The writer binding of a call scope.
///
/// Cloning is cheap; every modifying operation returns a new `Scope`.
#[derive(Clone, Default)]
pub struct Scope {
    writer: Option<Arc<dyn Writer>>,
}

impl Scope {
    /// A scope with no writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active writer, if any.
    pub fn writer(&self) -> Option<&Arc<dyn Writer>> {
        self.writer.as_ref()
    }

    /// Whether a writer is active.
    pub fn is_attached(&self) -> bool {
        self.writer.is_some()
    }

    fn bind(writer: Option<Arc<dyn Writer>>) -> Self {
        Scope { writer }
    }

    /// Replace the active writer with `wrap(active)`, or return an unchanged
    /// copy when there is none.
    fn wrap<F>(&self, wrap: F) -> Scope
    where
        F: FnOnce(Arc<dyn Writer>) -> Arc<dyn Writer>,
    {
        match &self.writer {
            Some(active) => Scope::bind(Some(wrap(Arc::clone(active)))),
            None => self.clone(),
        }
    }

    /// Start collecting with `writer`.
    ///
    /// If a writer is already active, both receive every later warning: the
    /// existing one first, then `writer`.
    ///
    /// # Example
    ///
    /// ```
    /// use ripple::prelude::*;
    /// use ripple::testing::RecordingWriter;
    ///
    /// let first = RecordingWriter::new();
    /// let second = RecordingWriter::new();
    ///
    /// let scope = Scope::new().attach(first.clone());
    /// scope.warn_one(warning::new("test-1")).unwrap();
    ///
    /// let scope = scope.attach(second.clone());
    /// scope.warn_one(warning::new("test-2")).unwrap();
    ///
    /// assert_eq!(first.messages(), vec!["test-1", "test-2"]);
    /// assert_eq!(second.messages(), vec!["test-2"]);
    /// ```
    pub fn attach<W>(&self, writer: W) -> Scope
    where
        W: Writer + 'static,
    {
        let writer: Arc<dyn Writer> = Arc::new(writer);
        match &self.writer {
            Some(active) => Scope::bind(Some(Arc::new(MultiWriter::new([
                Arc::clone(active),
                writer,
            ])))),
            None => Scope::bind(Some(writer)),
        }
    }

    /// A scope where warnings go nowhere.
    ///
    /// Only the returned scope is affected; `self` keeps its writer.
    pub fn detach(&self) -> Scope {
        Scope::bind(None)
    }

    /// Write warnings, in order, to the active writer.
    ///
    /// Without a writer this does nothing and succeeds. Each warning is
    /// written even if an earlier one failed; failures are joined, and
    /// warnings written before a failure stay written.
    ///
    /// # Example
    ///
    /// ```
    /// use ripple::prelude::*;
    ///
    /// let scope = Scope::new();
    /// assert!(scope.warn([warning::new("nobody listens")]).is_ok());
    /// ```
    pub fn warn<I>(&self, warnings: I) -> Result<(), WarnError>
    where
        I: IntoIterator<Item = SharedWarning>,
    {
        let Some(writer) = &self.writer else {
            return Ok(());
        };
        let errors: Vec<WarnError> = warnings
            .into_iter()
            .filter_map(|w| writer.write_warning(w).err())
            .collect();
        match WarnError::join(errors) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Write a single warning.
    pub fn warn_one(&self, warning: SharedWarning) -> Result<(), WarnError> {
        self.warn(std::iter::once(warning))
    }

    /// Write one warning built from format arguments.
    ///
    /// Usually called through [`warnf!`](crate::warnf). Shared or `dyn`
    /// warnings used as arguments render as their plain message.
    pub fn warnf(&self, args: fmt::Arguments<'_>) -> Result<(), WarnError> {
        if !self.is_attached() {
            return Ok(());
        }
        self.warn_one(Arc::new(Message::new(args.to_string())))
    }

    /// Rewrite every warning emitted under the returned scope.
    pub fn map<F>(&self, f: F) -> Scope
    where
        F: Fn(SharedWarning) -> SharedWarning + Send + Sync + 'static,
    {
        self.wrap(|active| Arc::new(Map::new(active, f)))
    }

    /// Keep only warnings matching `predicate` under the returned scope.
    pub fn filter<P>(&self, predicate: P) -> Scope
    where
        P: Fn(&SharedWarning) -> bool + Send + Sync + 'static,
    {
        self.wrap(|active| Arc::new(Filter::new(active, predicate)))
    }

    /// Observe every warning emitted under the returned scope.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::{Arc, Mutex};
    /// use ripple::prelude::*;
    ///
    /// let collector = Arc::new(Collector::new());
    /// let echoed = Arc::new(Mutex::new(Vec::new()));
    /// let echo = Arc::clone(&echoed);
    ///
    /// let scope = Scope::new()
    ///     .attach(Arc::clone(&collector))
    ///     .tap(move |w| echo.lock().unwrap().push(format!("side-effect: {}", w)));
    ///
    /// ripple::warnf!(scope, "this is a warning 1").unwrap();
    /// ripple::warnf!(scope, "this is a warning 2").unwrap();
    ///
    /// assert_eq!(
    ///     *echoed.lock().unwrap(),
    ///     vec!["side-effect: this is a warning 1", "side-effect: this is a warning 2"]
    /// );
    /// assert_eq!(read_all(&*collector).unwrap().len(), 2);
    /// ```
    pub fn tap<F>(&self, f: F) -> Scope
    where
        F: Fn(&SharedWarning) + Send + Sync + 'static,
    {
        self.wrap(|active| Arc::new(Tap::new(active, f)))
    }

    /// Buffer warnings emitted under the returned scope and fold them into one
    /// when the returned [`Flush`] is called.
    ///
    /// The fold starts from `T::default()` and visits warnings in write order.
    /// Without a writer, the scope is returned unchanged and the flush does
    /// nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use ripple::prelude::*;
    ///
    /// #[derive(Debug, Default)]
    /// struct Summary {
    ///     details: Vec<String>,
    /// }
    ///
    /// impl Warning for Summary {
    ///     fn message(&self) -> String {
    ///         self.details.join(", ")
    ///     }
    /// }
    ///
    /// let collector = Arc::new(Collector::new());
    /// let scope = Scope::new().attach(Arc::clone(&collector));
    /// let (scope, flush) = scope.reduce(|mut acc: Summary, w| {
    ///     acc.details.push(w.message());
    ///     acc
    /// });
    ///
    /// for i in 1..=3 {
    ///     ripple::warnf!(scope, "this is a warning {}", i).unwrap();
    /// }
    /// flush.flush().unwrap();
    ///
    /// let warnings = read_all(&*collector).unwrap();
    /// assert_eq!(warnings.len(), 1);
    /// assert_eq!(
    ///     warnings[0].message(),
    ///     "this is a warning 1, this is a warning 2, this is a warning 3"
    /// );
    /// ```
    pub fn reduce<T, F>(&self, f: F) -> (Scope, Flush<T, F>)
    where
        T: Warning + Default + 'static,
        F: Fn(T, SharedWarning) -> T + Send + Sync,
    {
        match &self.writer {
            Some(active) => {
                let (buffer, flush) = reduce(Arc::clone(active), f);
                (Scope::bind(Some(buffer)), flush)
            }
            None => (self.clone(), Flush::disabled()),
        }
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Format a warning and write it to a scope.
///
/// Expands to [`Scope::warnf`] with `format_args!`. A [`SharedWarning`] or
/// `&dyn Warning` argument interpolates as its
/// [`message`](crate::Warning::message). A concrete warning type is formatted
/// through its own `Display` (or `Debug`) impl, which may differ from its
/// message; pass it as `&dyn Warning` to get the message.
///
/// # Example
///
/// ```
/// use ripple::prelude::*;
/// use ripple::testing::RecordingWriter;
///
/// let sink = RecordingWriter::new();
/// let scope = Scope::new().attach(sink.clone());
/// let inner = warning::new("sub-warning");
///
/// ripple::warnf!(scope, "test-warning: {}", inner).unwrap();
/// assert_eq!(sink.messages(), vec!["test-warning: sub-warning"]);
/// ```
#[macro_export]
macro_rules! warnf {
    ($scope:expr, $($arg:tt)+) => {
        $scope.warnf(::std::format_args!($($arg)+))
    };
}
