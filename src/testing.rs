//! Testing utilities for code that emits warnings
//!
//! This module provides test doubles for the [`Writer`] and [`Reader`]
//! capabilities, assertion macros, and property-based testing support.
//!
//! # Examples
//!
//! ## Recording what a function emits
//!
//! ```rust
//! use ripple::prelude::*;
//! use ripple::testing::RecordingWriter;
//!
//! fn check(scope: &Scope, port: u16) {
//!     if port < 1024 {
//!         let _ = ripple::warnf!(scope, "port {} needs privileges", port);
//!     }
//! }
//!
//! let sink = RecordingWriter::new();
//! check(&Scope::new().attach(sink.clone()), 80);
//! assert_eq!(sink.messages(), vec!["port 80 needs privileges"]);
//! ```
//!
//! ## Assertion macros
//!
//! ```rust
//! use ripple::prelude::*;
//! use ripple::{assert_contains_error, assert_messages};
//!
//! let collector = Collector::new();
//! collector.write_warning(warning::new("a")).unwrap();
//! assert_messages!(read_all(&collector).unwrap(), ["a"]);
//!
//! collector.close().unwrap();
//! assert_contains_error!(collector.read_warning(), WarnError::Closed);
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::WarnError;
use crate::reader::Reader;
use crate::warning::SharedWarning;
use crate::writer::Writer;

#[derive(Debug, Default)]
struct Recording {
    warnings: Vec<SharedWarning>,
    calls: usize,
    failure: Option<WarnError>,
    fail_from: usize,
}

/// A writer that records every warning it accepts.
///
/// Clones share the same recording, so keep one clone for assertions and
/// hand the other to the code under test. It can be scripted to fail.
///
/// # Example
///
/// ```rust
/// use ripple::prelude::*;
/// use ripple::testing::RecordingWriter;
///
/// let sink = RecordingWriter::new().fail_after(1, WarnError::other("full"));
/// assert!(sink.write_warning(warning::new("first")).is_ok());
/// assert!(sink.write_warning(warning::new("second")).is_err());
///
/// assert_eq!(sink.messages(), vec!["first"]);
/// assert_eq!(sink.calls(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingWriter {
    inner: Arc<Mutex<Recording>>,
}

impl RecordingWriter {
    /// Create a writer that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer that rejects every warning with `error`.
    pub fn failing_with(error: WarnError) -> Self {
        Self::new().fail_after(0, error)
    }

    /// Accept the first `accepted` warnings, then reject every later one with
    /// `error`.
    pub fn fail_after(self, accepted: usize, error: WarnError) -> Self {
        {
            let mut rec = self.lock();
            rec.failure = Some(error);
            rec.fail_from = accepted;
        }
        self
    }

    fn lock(&self) -> MutexGuard<'_, Recording> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The accepted warnings, in order.
    pub fn warnings(&self) -> Vec<SharedWarning> {
        self.lock().warnings.clone()
    }

    /// Messages of the accepted warnings, in order.
    pub fn messages(&self) -> Vec<String> {
        self.lock().warnings.iter().map(|w| w.message()).collect()
    }

    /// Number of `write_warning` calls, accepted or not.
    pub fn calls(&self) -> usize {
        self.lock().calls
    }

    /// The scripted failure, if any.
    pub fn failure(&self) -> Option<WarnError> {
        self.lock().failure.clone()
    }
}

impl Writer for RecordingWriter {
    fn write_warning(&self, warning: SharedWarning) -> Result<(), WarnError> {
        let mut rec = self.lock();
        rec.calls += 1;
        if let Some(err) = &rec.failure {
            if rec.calls > rec.fail_from {
                return Err(err.clone());
            }
        }
        rec.warnings.push(warning);
        Ok(())
    }
}

/// A writer that rejects every warning with the same error.
#[derive(Debug, Clone)]
pub struct FailingWriter {
    error: WarnError,
}

impl FailingWriter {
    /// Create a writer failing with `error`.
    pub fn new(error: WarnError) -> Self {
        FailingWriter { error }
    }

    /// The error every write returns.
    pub fn error(&self) -> &WarnError {
        &self.error
    }
}

impl Writer for FailingWriter {
    fn write_warning(&self, _warning: SharedWarning) -> Result<(), WarnError> {
        Err(self.error.clone())
    }
}

/// A reader replaying a fixed script of outcomes.
///
/// Once the script runs out it reports exhaustion.
///
/// # Example
///
/// ```rust
/// use ripple::prelude::*;
/// use ripple::testing::ScriptedReader;
///
/// let reader = ScriptedReader::new()
///     .then_warning(warning::new("test-1"))
///     .then_error(WarnError::Closed);
///
/// assert_eq!(read_all(reader).unwrap_err(), WarnError::Closed);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedReader {
    script: VecDeque<Result<Option<SharedWarning>, WarnError>>,
}

impl ScriptedReader {
    /// An empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a warning.
    pub fn then_warning(mut self, warning: SharedWarning) -> Self {
        self.script.push_back(Ok(Some(warning)));
        self
    }

    /// Queue an exhaustion signal.
    pub fn then_exhausted(mut self) -> Self {
        self.script.push_back(Ok(None));
        self
    }

    /// Queue a failure.
    pub fn then_error(mut self, error: WarnError) -> Self {
        self.script.push_back(Err(error));
        self
    }

    /// Outcomes not yet read.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Reader for ScriptedReader {
    fn read_warning(&mut self) -> Result<Option<SharedWarning>, WarnError> {
        self.script.pop_front().unwrap_or(Ok(None))
    }
}

/// Assert that a collection of warnings has exactly the expected messages.
///
/// # Example
///
/// ```rust
/// use ripple::{assert_messages, warning};
///
/// let warnings = vec![warning::new("a"), warning::new("b")];
/// assert_messages!(warnings, ["a", "b"]);
/// ```
#[macro_export]
macro_rules! assert_messages {
    ($warnings:expr, $expected:expr) => {{
        let actual: ::std::vec::Vec<::std::string::String> = ($warnings)
            .iter()
            .map(|w| $crate::Warning::message(&**w))
            .collect();
        let expected: ::std::vec::Vec<::std::string::String> =
            ($expected).iter().map(|s| s.to_string()).collect();
        assert_eq!(actual, expected, "warning messages differ");
    }};
}

/// Assert that a result failed with an error containing `expected`.
///
/// Uses [`WarnError::contains`], so it also matches inside joined errors.
///
/// # Example
///
/// ```rust
/// use ripple::{assert_contains_error, WarnError};
///
/// let boom = WarnError::other("boom");
/// let joined = WarnError::join([boom.clone(), WarnError::Closed]).unwrap();
/// assert_contains_error!(Err::<(), _>(joined), boom);
/// ```
#[macro_export]
macro_rules! assert_contains_error {
    ($result:expr, $expected:expr) => {
        match $result {
            ::std::result::Result::Err(err) => {
                let expected = &$expected;
                assert!(
                    err.contains(expected),
                    "Expected error containing {:?}, got {:?}",
                    expected,
                    err
                );
            }
            ::std::result::Result::Ok(v) => {
                panic!("Expected Err containing {:?}, got Ok: {:?}", $expected, v);
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl Arbitrary for crate::warning::Message {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        any::<String>().prop_map(crate::warning::Message::new).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warning;

    #[test]
    fn recording_writer_shares_state_between_clones() {
        let sink = RecordingWriter::new();
        let handle = sink.clone();
        handle.write_warning(warning::new("x")).unwrap();
        assert_eq!(sink.messages(), vec!["x"]);
        assert_eq!(sink.calls(), 1);
        assert!(sink.failure().is_none());
    }

    #[test]
    fn failing_with_rejects_everything() {
        let err = WarnError::other("nope");
        let sink = RecordingWriter::failing_with(err.clone());
        assert_eq!(sink.write_warning(warning::new("x")), Err(err));
        assert!(sink.warnings().is_empty());
        assert_eq!(sink.calls(), 1);
    }

    #[test]
    fn failing_writer_returns_its_error() {
        let w = FailingWriter::new(WarnError::Closed);
        assert_eq!(w.write_warning(warning::new("x")), Err(WarnError::Closed));
    }

    #[test]
    fn scripted_reader_runs_out_as_exhausted() {
        let mut r = ScriptedReader::new().then_warning(warning::new("only"));
        assert!(r.read_warning().unwrap().is_some());
        assert!(r.read_warning().unwrap().is_none());
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn assert_messages_macro() {
        let warnings = vec![warning::new("a"), warning::new("b")];
        assert_messages!(warnings, ["a", "b"]);
    }

    #[test]
    #[should_panic(expected = "warning messages differ")]
    fn assert_messages_panics_on_mismatch() {
        let warnings = vec![warning::new("a")];
        assert_messages!(warnings, ["b"]);
    }

    #[test]
    fn assert_contains_error_macro() {
        let err = WarnError::other("x");
        assert_contains_error!(Err::<(), _>(err.clone()), err);
    }

    #[test]
    #[should_panic(expected = "Expected Err containing")]
    fn assert_contains_error_panics_on_ok() {
        assert_contains_error!(Ok::<(), WarnError>(()), WarnError::Closed);
    }

    #[cfg(feature = "proptest")]
    mod proptest_tests {
        use proptest::prelude::*;

        use crate::warning::{Message, Warning};

        proptest! {
            #[test]
            fn message_arbitrary_roundtrips_text(m in any::<Message>()) {
                prop_assert_eq!(m.message(), m.as_str());
            }
        }
    }
}
