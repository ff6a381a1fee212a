//! Property-based tests for collectors and transform pipelines

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use proptest::prelude::*;
use ripple::prelude::*;
use ripple::testing::RecordingWriter;

#[derive(Debug, Default)]
struct Trace(String);

impl Warning for Trace {
    fn message(&self) -> String {
        self.0.clone()
    }
}

fn step(acc: Trace, w: SharedWarning) -> Trace {
    Trace(format!("({}+{})", acc.0, w.message()))
}

fn messages_of(warnings: &[SharedWarning]) -> Vec<String> {
    warnings.iter().map(|w| w.message()).collect()
}

proptest! {
    #[test]
    fn prop_read_all_preserves_write_order(
        messages in prop::collection::vec(".{0,16}", 0..50)
    ) {
        let collector = Collector::new();
        for m in &messages {
            collector.write_warning(warning::new(m.clone())).unwrap();
        }

        let read = read_all(&collector).unwrap();
        prop_assert_eq!(messages_of(&read), messages);
        prop_assert!(read_all(&collector).unwrap().is_empty());
    }

    #[test]
    fn prop_close_hides_buffered_content(
        messages in prop::collection::vec("[a-z]{1,8}", 1..20)
    ) {
        let collector = Collector::new();
        for m in &messages {
            collector.write_warning(warning::new(m.clone())).unwrap();
        }
        prop_assert_eq!(collector.close(), Ok(()));
        prop_assert_eq!(collector.read_warning().unwrap_err(), WarnError::Closed);
        prop_assert_eq!(collector.close(), Err(WarnError::Closed));
        prop_assert_eq!(
            collector.write_warning(warning::new("late")),
            Err(WarnError::Closed)
        );
    }

    #[test]
    fn prop_map_delivers_exactly_mapped(
        messages in prop::collection::vec("[a-z ]{0,12}", 0..30)
    ) {
        let sink = RecordingWriter::new();
        let scope = Scope::new()
            .attach(sink.clone())
            .map(|w| warning::new(w.message().to_uppercase()));

        for m in &messages {
            scope.warn_one(warning::new(m.clone())).unwrap();
        }

        let expected: Vec<String> = messages.iter().map(|m| m.to_uppercase()).collect();
        prop_assert_eq!(sink.messages(), expected);
    }

    #[test]
    fn prop_filter_drops_exactly_failing(
        messages in prop::collection::vec("[a-z]{0,6}", 0..40)
    ) {
        let sink = RecordingWriter::new();
        let scope = Scope::new()
            .attach(sink.clone())
            .filter(|w| w.message().len() % 2 == 0);

        for m in &messages {
            scope.warn_one(warning::new(m.clone())).unwrap();
        }

        let expected: Vec<String> = messages
            .iter()
            .filter(|m| m.len() % 2 == 0)
            .cloned()
            .collect();
        prop_assert_eq!(sink.messages(), expected);
    }

    #[test]
    fn prop_reduce_is_a_left_fold(
        messages in prop::collection::vec("[a-z]{1,4}", 0..20)
    ) {
        let sink = RecordingWriter::new();
        let (scope, flush) = Scope::new().attach(sink.clone()).reduce(step);

        for m in &messages {
            scope.warn_one(warning::new(m.clone())).unwrap();
        }
        flush.flush().unwrap();

        if messages.is_empty() {
            prop_assert_eq!(sink.calls(), 0);
        } else {
            let expected = messages
                .iter()
                .fold(String::new(), |acc, m| format!("({}+{})", acc, m));
            prop_assert_eq!(sink.messages(), vec![expected]);
        }
    }

    #[test]
    fn prop_tap_runs_once_per_warning(
        messages in prop::collection::vec("[a-z]{0,6}", 0..30)
    ) {
        let taps = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&taps);
        let sink = RecordingWriter::new();
        let scope = Scope::new().attach(sink.clone()).tap(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        for m in &messages {
            scope.warn_one(warning::new(m.clone())).unwrap();
        }

        prop_assert_eq!(taps.load(Ordering::SeqCst), messages.len());
        prop_assert_eq!(sink.messages(), messages);
    }

    #[test]
    fn prop_unattached_scope_never_fails(
        messages in prop::collection::vec(".{0,8}", 0..20)
    ) {
        let scope = Scope::new().map(|w| w).filter(|_| true);
        let warnings: Vec<SharedWarning> = messages.into_iter().map(warning::new).collect();
        prop_assert_eq!(scope.warn(warnings), Ok(()));
    }
}
