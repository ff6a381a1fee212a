//! In-memory warning queue
//!
//! A [`Collector`] anchors a warning stream: attach it to a
//! [`Scope`](crate::Scope), let code emit warnings, then read them back with
//! [`read_all`](crate::read_all) or a [`Scanner`](crate::Scanner).
//!
//! Reads never block. An empty collector reports exhaustion (`Ok(None)`)
//! immediately, so drain it once the producers are known to be done.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use ripple::prelude::*;
//!
//! let collector = Arc::new(Collector::new());
//! let scope = Scope::new().attach(Arc::clone(&collector));
//!
//! scope.warn_one(warning::new("this is a warning 1")).unwrap();
//! scope.warn_one(warning::new("this is a warning 2")).unwrap();
//!
//! let warnings = read_all(&*collector).unwrap();
//! assert_eq!(warnings.len(), 2);
//!
//! collector.close().unwrap();
//! assert_eq!(collector.close(), Err(WarnError::Closed));
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::WarnError;
use crate::reader::Reader;
use crate::warning::SharedWarning;
use crate::writer::Writer;

#[derive(Debug, Default)]
struct State {
    buf: VecDeque<SharedWarning>,
    closed: bool,
}

/// A thread-safe, closeable FIFO queue of warnings.
///
/// Implements both [`Writer`] and [`Reader`]. Warnings are read back in
/// exactly the order they were written, also with concurrent writers. The
/// queue is unbounded.
///
/// Once [`close`](Collector::close)d, the buffered warnings are dropped and
/// every further read, write or close fails with [`WarnError::Closed`].
#[derive(Debug, Default)]
pub struct Collector {
    state: Mutex<State>,
}

impl Collector {
    /// Create an empty, open collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty collector already wrapped for sharing.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    // Every operation leaves the state consistent before it can panic, so a
    // poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Close the collector and drop any buffered warnings.
    ///
    /// Only the first call succeeds; closing again returns
    /// [`WarnError::Closed`].
    pub fn close(&self) -> Result<(), WarnError> {
        let mut state = self.lock();
        if state.closed {
            return Err(WarnError::Closed);
        }
        state.closed = true;
        let discarded = std::mem::take(&mut state.buf).len();
        #[cfg(feature = "tracing")]
        tracing::trace!(discarded, "warning collector closed");
        #[cfg(not(feature = "tracing"))]
        let _ = discarded;
        Ok(())
    }

    /// Take every buffered warning and close, under a single lock.
    ///
    /// A concurrent write lands either before (and is returned) or after
    /// (and fails with [`WarnError::Closed`]).
    pub(crate) fn drain_and_close(&self) -> Result<Vec<SharedWarning>, WarnError> {
        let mut state = self.lock();
        if state.closed {
            return Err(WarnError::Closed);
        }
        state.closed = true;
        Ok(std::mem::take(&mut state.buf).into())
    }

    /// Append a warning to the tail of the queue.
    pub fn write_warning(&self, warning: SharedWarning) -> Result<(), WarnError> {
        let mut state = self.lock();
        if state.closed {
            return Err(WarnError::Closed);
        }
        state.buf.push_back(warning);
        Ok(())
    }

    /// Remove and return the head of the queue.
    ///
    /// Returns `Ok(None)` when the queue is empty and [`WarnError::Closed`]
    /// once closed.
    pub fn read_warning(&self) -> Result<Option<SharedWarning>, WarnError> {
        let mut state = self.lock();
        if state.closed {
            return Err(WarnError::Closed);
        }
        Ok(state.buf.pop_front())
    }

    /// Whether [`close`](Collector::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Number of buffered warnings; zero once closed.
    pub fn len(&self) -> usize {
        self.lock().buf.len()
    }

    /// Whether no warnings are buffered.
    pub fn is_empty(&self) -> bool {
        self.lock().buf.is_empty()
    }
}

impl Writer for Collector {
    fn write_warning(&self, warning: SharedWarning) -> Result<(), WarnError> {
        Collector::write_warning(self, warning)
    }
}

impl Reader for Collector {
    fn read_warning(&mut self) -> Result<Option<SharedWarning>, WarnError> {
        Collector::read_warning(self)
    }
}

impl Reader for &Collector {
    fn read_warning(&mut self) -> Result<Option<SharedWarning>, WarnError> {
        Collector::read_warning(self)
    }
}
