//! Pull-style iteration over a reader

use crate::error::WarnError;
use crate::reader::Reader;
use crate::warning::SharedWarning;

/// Steps through the warnings of a [`Reader`] one at a time.
///
/// [`scan`](Scanner::scan) advances and reports whether a warning is
/// available; [`warning`](Scanner::warning) returns it. Exhaustion ends the
/// scan without an error. Any other failure is recorded and is sticky: the
/// scanner stops reading and [`err`](Scanner::err) keeps returning it.
///
/// A scanner has a single consumer; it is driven through `&mut self`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ripple::prelude::*;
///
/// let collector = Arc::new(Collector::new());
/// let scope = Scope::new().attach(Arc::clone(&collector));
/// ripple::warnf!(scope, "this is a warning {}", 1).unwrap();
/// ripple::warnf!(scope, "this is a warning {}", 2).unwrap();
///
/// let mut scanner = Scanner::new(&*collector);
/// let mut seen = Vec::new();
/// while scanner.scan() {
///     seen.push(scanner.warning().unwrap().message());
/// }
/// assert!(scanner.err().is_none());
/// assert_eq!(seen, vec!["this is a warning 1", "this is a warning 2"]);
/// ```
///
/// A mutable borrow of a scanner is an [`Iterator`], so the scanner stays
/// available for [`err`](Scanner::err) afterwards:
///
/// ```
/// use ripple::prelude::*;
///
/// let collector = Collector::new();
/// collector.write_warning(warning::new("a")).unwrap();
/// collector.write_warning(warning::new("b")).unwrap();
///
/// let mut scanner = Scanner::new(&collector);
/// let messages: Vec<String> = (&mut scanner).map(|w| w.message()).collect();
/// assert_eq!(messages, vec!["a", "b"]);
/// assert!(scanner.err().is_none());
/// ```
#[derive(Debug)]
pub struct Scanner<R> {
    reader: R,
    current: Option<SharedWarning>,
    err: Option<WarnError>,
}

impl<R: Reader> Scanner<R> {
    /// Create a scanner reading from `reader`.
    pub fn new(reader: R) -> Self {
        Scanner {
            reader,
            current: None,
            err: None,
        }
    }

    /// Advance to the next warning.
    ///
    /// Returns `false` once the reader is exhausted or has failed.
    pub fn scan(&mut self) -> bool {
        if self.err.is_some() {
            return false;
        }
        match self.reader.read_warning() {
            Ok(Some(warning)) => {
                self.current = Some(warning);
                true
            }
            Ok(None) => {
                self.current = None;
                false
            }
            Err(err) => {
                self.err = Some(err);
                false
            }
        }
    }

    /// The warning produced by the last successful [`scan`](Scanner::scan).
    pub fn warning(&self) -> Option<&SharedWarning> {
        self.current.as_ref()
    }

    /// The first failure other than exhaustion, if any.
    pub fn err(&self) -> Option<&WarnError> {
        self.err.as_ref()
    }

    /// Give back the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

// Implemented on `&mut Scanner` so that `scanner.scan()` keeps resolving to
// the inherent method instead of `Iterator::scan`.
impl<R: Reader> Iterator for &mut Scanner<R> {
    type Item = SharedWarning;

    fn next(&mut self) -> Option<Self::Item> {
        if Scanner::scan(self) {
            self.current.clone()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::testing::ScriptedReader;
    use crate::warning;

    #[test]
    fn scans_in_order() {
        let want = vec![warning::new("test-1"), warning::new("test-2")];
        let reader = ScriptedReader::new()
            .then_warning(Arc::clone(&want[0]))
            .then_warning(Arc::clone(&want[1]))
            .then_exhausted();

        let mut scanner = Scanner::new(reader);
        for (i, w) in want.iter().enumerate() {
            assert!(scanner.scan(), "expected to scan warning {}", i);
            assert!(Arc::ptr_eq(scanner.warning().unwrap(), w));
        }
        assert!(!scanner.scan());
        assert!(scanner.err().is_none());
    }

    #[test]
    fn exhaustion_clears_current() {
        let reader = ScriptedReader::new()
            .then_warning(warning::new("test-1"))
            .then_exhausted();

        let mut scanner = Scanner::new(reader);
        assert!(scanner.warning().is_none());
        assert!(scanner.scan());
        assert!(scanner.warning().is_some());
        assert!(!scanner.scan());
        assert!(scanner.warning().is_none());
        assert!(scanner.err().is_none());
    }

    #[test]
    fn error_is_sticky() {
        let want_err = WarnError::other("test-error");
        let reader = ScriptedReader::new()
            .then_warning(warning::new("test-1"))
            .then_warning(warning::new("test-2"))
            .then_error(want_err.clone())
            .then_warning(warning::new("never read"));

        let mut scanner = Scanner::new(reader);
        assert!(scanner.scan());
        assert!(scanner.scan());
        assert!(!scanner.scan());
        assert_eq!(scanner.err(), Some(&want_err));

        assert!(!scanner.scan());
        assert_eq!(scanner.err(), Some(&want_err));

        let reader = scanner.into_inner();
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn empty_reader() {
        let mut scanner = Scanner::new(ScriptedReader::new().then_exhausted());
        assert!(!scanner.scan());
        assert!(scanner.err().is_none());
    }

    #[test]
    fn iterator_stops_on_error_and_keeps_it() {
        let want_err = WarnError::Closed;
        let reader = ScriptedReader::new()
            .then_warning(warning::new("a"))
            .then_error(want_err.clone());

        let mut scanner = Scanner::new(reader);
        let collected: Vec<SharedWarning> = (&mut scanner).collect();
        assert_eq!(collected.len(), 1);
        assert_eq!(scanner.err(), Some(&want_err));
    }

    #[test]
    fn scan_on_owned_scanner_after_iterating() {
        let reader = ScriptedReader::new()
            .then_warning(warning::new("a"))
            .then_exhausted()
            .then_warning(warning::new("b"))
            .then_exhausted();

        let mut scanner = Scanner::new(reader);
        let mut seen = Vec::new();
        for w in &mut scanner {
            seen.push(w.message());
        }
        assert_eq!(seen, vec!["a"]);

        let advanced: bool = scanner.scan();
        assert!(advanced);
        assert_eq!(scanner.warning().unwrap().message(), "b");
        assert!(!scanner.scan());
        assert!(scanner.err().is_none());
    }
}
