//! Reduce combinator - buffer warnings and fold them into one on demand.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::collector::Collector;
use crate::error::WarnError;
use crate::warning::{SharedWarning, Warning};
use crate::writer::Writer;

/// Buffer warnings bound for `upstream` and fold them later.
///
/// Returns a private [`Collector`] to install in place of `upstream`, and the
/// [`Flush`] that drains it. Nothing reaches `upstream` until the flush.
///
/// [`Scope::reduce`](crate::Scope::reduce) is the usual entry point.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ripple::combinators::reduce;
/// use ripple::prelude::*;
/// use ripple::testing::RecordingWriter;
///
/// #[derive(Debug, Default)]
/// struct Count(usize);
///
/// impl Warning for Count {
///     fn message(&self) -> String {
///         format!("{} warnings", self.0)
///     }
/// }
///
/// let sink = RecordingWriter::new();
/// let (buffer, flush) = reduce(sink.clone().shared(), |acc: Count, _| Count(acc.0 + 1));
///
/// buffer.write_warning(warning::new("a")).unwrap();
/// buffer.write_warning(warning::new("b")).unwrap();
/// assert!(sink.messages().is_empty());
///
/// flush.flush().unwrap();
/// assert_eq!(sink.messages(), vec!["2 warnings"]);
/// ```
pub fn reduce<T, F>(upstream: Arc<dyn Writer>, f: F) -> (Arc<Collector>, Flush<T, F>)
where
    T: Warning + Default + 'static,
    F: Fn(T, SharedWarning) -> T + Send + Sync,
{
    let buffer = Collector::shared();
    let flush = Flush {
        state: Some(FlushState {
            buffer: Arc::clone(&buffer),
            upstream,
            f,
        }),
        _marker: PhantomData,
    };
    (buffer, flush)
}

struct FlushState<F> {
    buffer: Arc<Collector>,
    upstream: Arc<dyn Writer>,
    f: F,
}

/// The drain-and-fold action returned by [`reduce`] and
/// [`Scope::reduce`](crate::Scope::reduce).
///
/// Meant to be called once. The first [`flush`](Flush::flush) closes the
/// buffer, so later calls find nothing to fold and do nothing.
pub struct Flush<T, F> {
    state: Option<FlushState<F>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T, F> Flush<T, F> {
    /// A flush with nothing behind it, for scopes without a writer.
    pub(crate) fn disabled() -> Self {
        Flush {
            state: None,
            _marker: PhantomData,
        }
    }
}

impl<T, F> Flush<T, F>
where
    T: Warning + Default + 'static,
    F: Fn(T, SharedWarning) -> T + Send + Sync,
{
    /// Fold the buffered warnings, in write order, starting from
    /// `T::default()`, and write the result upstream.
    ///
    /// Writes nothing if no warnings were buffered. Returns the upstream's
    /// write result.
    pub fn flush(&self) -> Result<(), WarnError> {
        let Some(state) = &self.state else {
            return Ok(());
        };
        // Already closed means this is a repeated flush.
        let warnings = match state.buffer.drain_and_close() {
            Ok(warnings) => warnings,
            Err(_) => return Ok(()),
        };
        if warnings.is_empty() {
            return Ok(());
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(folded = warnings.len(), "flushing reduced warnings");

        let acc = warnings
            .into_iter()
            .fold(T::default(), |acc, w| (state.f)(acc, w));
        let result = state.upstream.write_warning(Arc::new(acc));

        #[cfg(feature = "tracing")]
        if let Err(ref err) = result {
            tracing::warn!("reduced warning rejected upstream: {}", err);
        }

        result
    }
}

impl<T, F> std::fmt::Debug for Flush<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Flush")
            .field("active", &self.state.is_some())
            .field("f", &"<function>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingWriter;
    use crate::warning;
    use crate::writer::WriterExt;

    #[derive(Debug, Default)]
    struct Joined {
        details: Vec<String>,
    }

    impl Warning for Joined {
        fn message(&self) -> String {
            self.details.join(", ")
        }
    }

    fn join(mut acc: Joined, w: SharedWarning) -> Joined {
        acc.details.push(w.message());
        acc
    }

    #[test]
    fn folds_in_write_order() {
        let sink = RecordingWriter::new();
        let (buffer, flush) = reduce(sink.clone().shared(), join);

        for msg in ["a", "b", "c"] {
            buffer.write_warning(warning::new(msg)).unwrap();
        }
        assert_eq!(sink.calls(), 0);

        flush.flush().unwrap();
        assert_eq!(sink.messages(), vec!["a, b, c"]);
    }

    #[test]
    fn nothing_buffered_writes_nothing() {
        let sink = RecordingWriter::new();
        let (_buffer, flush) = reduce(sink.clone().shared(), join);

        flush.flush().unwrap();
        assert_eq!(sink.calls(), 0);
    }

    #[test]
    fn second_flush_is_noop() {
        let sink = RecordingWriter::new();
        let (buffer, flush) = reduce(sink.clone().shared(), join);
        buffer.write_warning(warning::new("once")).unwrap();

        flush.flush().unwrap();
        assert_eq!(flush.flush(), Ok(()));
        assert_eq!(sink.calls(), 1);
        assert!(buffer.is_closed());
    }

    #[test]
    fn writes_after_flush_fail_closed() {
        let sink = RecordingWriter::new();
        let (buffer, flush) = reduce(sink.shared(), join);
        flush.flush().unwrap();

        assert_eq!(
            buffer.write_warning(warning::new("late")),
            Err(WarnError::Closed)
        );
    }

    #[test]
    fn upstream_failure_is_returned() {
        let err = WarnError::other("upstream");
        let (buffer, flush) = reduce(
            RecordingWriter::failing_with(err.clone()).shared(),
            join,
        );
        buffer.write_warning(warning::new("x")).unwrap();

        assert_eq!(flush.flush(), Err(err));
    }

    #[test]
    fn concurrent_writes_are_folded_or_rejected() {
        use std::thread;

        #[derive(Debug, Default)]
        struct Count(usize);

        impl Warning for Count {
            fn message(&self) -> String {
                self.0.to_string()
            }
        }

        for _ in 0..50 {
            let sink = RecordingWriter::new();
            let (buffer, flush) = reduce(sink.clone().shared(), |acc: Count, _| Count(acc.0 + 1));

            let writer = {
                let buffer = Arc::clone(&buffer);
                thread::spawn(move || {
                    (0..100)
                        .filter(|_| buffer.write_warning(warning::new("w")).is_ok())
                        .count()
                })
            };
            flush.flush().unwrap();
            let accepted = writer.join().unwrap();

            let folded: usize = sink
                .messages()
                .first()
                .map(|m| m.parse().unwrap())
                .unwrap_or(0);
            assert_eq!(folded, accepted);
        }
    }

    #[test]
    fn disabled_flush_does_nothing() {
        let flush: Flush<Joined, fn(Joined, SharedWarning) -> Joined> = Flush::disabled();
        assert_eq!(flush.flush(), Ok(()));
    }

    #[cfg(feature = "tracing")]
    mod tracing_tests {
        use super::*;
        use tracing_test::traced_test;

        #[traced_test]
        #[test]
        fn flush_logs_fold_size() {
            let sink = RecordingWriter::new();
            let (buffer, flush) = reduce(sink.shared(), join);
            buffer.write_warning(warning::new("a")).unwrap();
            buffer.write_warning(warning::new("b")).unwrap();
            flush.flush().unwrap();
            assert!(logs_contain("folded=2"));
        }

        #[traced_test]
        #[test]
        fn flush_logs_rejection() {
            let sink = RecordingWriter::failing_with(WarnError::other("full"));
            let (buffer, flush) = reduce(sink.shared(), join);
            buffer.write_warning(warning::new("a")).unwrap();
            let _ = flush.flush();
            assert!(logs_contain("reduced warning rejected upstream: full"));
        }
    }
}
