//! Writing warnings
//!
//! [`Writer`] is the sink capability: it accepts one warning at a time and may
//! fail. [`MultiWriter`] fans a single write out to several writers, and
//! [`WriterExt`] builds transform pipelines directly on any writer.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use ripple::prelude::*;
//!
//! let collector = Arc::new(Collector::new());
//! let pipeline = Arc::clone(&collector)
//!     .map(|w| warning::new(w.message().to_uppercase()))
//!     .filter(|w| !w.message().starts_with("ignore"));
//!
//! pipeline.write_warning(warning::new("disk almost full")).unwrap();
//! pipeline.write_warning(warning::new("ignore me")).unwrap();
//!
//! let messages: Vec<String> = read_all(&*collector)
//!     .unwrap()
//!     .iter()
//!     .map(|w| w.message())
//!     .collect();
//! assert_eq!(messages, vec!["DISK ALMOST FULL"]);
//! ```

use std::sync::Arc;

use crate::combinators::{Filter, Map, Tap};
use crate::error::WarnError;
use crate::warning::SharedWarning;

/// A sink for warnings.
///
/// Writers are shared between scopes and threads, so `write_warning` takes
/// `&self`; implementors that keep state use interior mutability.
pub trait Writer: Send + Sync {
    /// Write one warning.
    fn write_warning(&self, warning: SharedWarning) -> Result<(), WarnError>;
}

impl<W: Writer + ?Sized> Writer for Arc<W> {
    fn write_warning(&self, warning: SharedWarning) -> Result<(), WarnError> {
        (**self).write_warning(warning)
    }
}

impl<W: Writer + ?Sized> Writer for Box<W> {
    fn write_warning(&self, warning: SharedWarning) -> Result<(), WarnError> {
        (**self).write_warning(warning)
    }
}

impl<W: Writer + ?Sized> Writer for &W {
    fn write_warning(&self, warning: SharedWarning) -> Result<(), WarnError> {
        (**self).write_warning(warning)
    }
}

/// A writer that duplicates each write to every delegate.
///
/// Delegates are called in the order they were supplied, and a failing
/// delegate does not stop the ones after it. All failures are joined into one
/// [`WarnError`] that [`contains`](WarnError::contains) each of them.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ripple::prelude::*;
///
/// let first = Arc::new(Collector::new());
/// let second = Arc::new(Collector::new());
/// second.close().unwrap();
///
/// let multi = MultiWriter::new([
///     Arc::clone(&first) as Arc<dyn Writer>,
///     Arc::clone(&second) as Arc<dyn Writer>,
/// ]);
///
/// let err = multi.write_warning(warning::new("fan out")).unwrap_err();
/// assert!(err.is_closed());
/// assert_eq!(first.len(), 1);
/// ```
#[derive(Clone)]
pub struct MultiWriter {
    writers: Vec<Arc<dyn Writer>>,
}

impl MultiWriter {
    /// Create a writer fanning out to `writers`.
    pub fn new<I>(writers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Writer>>,
    {
        MultiWriter {
            writers: writers.into_iter().collect(),
        }
    }

    /// Number of delegates.
    pub fn len(&self) -> usize {
        self.writers.len()
    }

    /// Whether there are no delegates.
    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }
}

impl std::fmt::Debug for MultiWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiWriter")
            .field("writers", &self.writers.len())
            .finish()
    }
}

impl Writer for MultiWriter {
    fn write_warning(&self, warning: SharedWarning) -> Result<(), WarnError> {
        let errors: Vec<WarnError> = self
            .writers
            .iter()
            .filter_map(|w| w.write_warning(Arc::clone(&warning)).err())
            .collect();
        match WarnError::join(errors) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Extension trait building transform pipelines on any [`Writer`].
///
/// This trait is automatically implemented for all sized writers. The same
/// wrappers are installed into a scope by [`Scope::map`](crate::Scope::map),
/// [`Scope::filter`](crate::Scope::filter) and [`Scope::tap`](crate::Scope::tap).
pub trait WriterExt: Writer {
    /// Transform every warning before passing it on.
    ///
    /// # Example
    ///
    /// ```
    /// use ripple::prelude::*;
    /// use ripple::testing::RecordingWriter;
    ///
    /// let sink = RecordingWriter::new();
    /// let upper = sink.clone().map(|w| warning::new(w.message().to_uppercase()));
    /// upper.write_warning(warning::new("quiet")).unwrap();
    /// assert_eq!(sink.messages(), vec!["QUIET"]);
    /// ```
    fn map<F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(SharedWarning) -> SharedWarning + Send + Sync,
    {
        Map::new(self, f)
    }

    /// Pass on only warnings matching the predicate; others are dropped
    /// without error.
    ///
    /// # Example
    ///
    /// ```
    /// use ripple::prelude::*;
    /// use ripple::testing::RecordingWriter;
    ///
    /// let sink = RecordingWriter::new();
    /// let keep_short = sink.clone().filter(|w| w.message().len() < 6);
    /// keep_short.write_warning(warning::new("short")).unwrap();
    /// keep_short.write_warning(warning::new("much too long")).unwrap();
    /// assert_eq!(sink.messages(), vec!["short"]);
    /// ```
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        Self: Sized,
        P: Fn(&SharedWarning) -> bool + Send + Sync,
    {
        Filter::new(self, predicate)
    }

    /// Run a side effect for every warning, then pass it on unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    /// use ripple::prelude::*;
    /// use ripple::testing::RecordingWriter;
    ///
    /// let seen = Arc::new(AtomicUsize::new(0));
    /// let counter = Arc::clone(&seen);
    /// let sink = RecordingWriter::new();
    /// let counted = sink.clone().tap(move |_| {
    ///     counter.fetch_add(1, Ordering::SeqCst);
    /// });
    /// counted.write_warning(warning::new("once")).unwrap();
    /// assert_eq!(seen.load(Ordering::SeqCst), 1);
    /// assert_eq!(sink.messages(), vec!["once"]);
    /// ```
    fn tap<F>(self, f: F) -> Tap<Self, F>
    where
        Self: Sized,
        F: Fn(&SharedWarning) + Send + Sync,
    {
        Tap::new(self, f)
    }

    /// Erase the writer's type.
    fn shared(self) -> Arc<dyn Writer>
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

impl<W: Writer> WriterExt for W {}
