//! Property-based tests for the capture queue and the assertions over it.
//!
//! Random sequences of levels and messages check that consuming assertions
//! follow emission order and that existence checks never consume.

use assertlog::{CaptureQueue, CapturedLogs, Level, LogEvent, Pattern};
use itertools::{Itertools, iproduct};
use proptest::prelude::*;

fn level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Trace),
        Just(Level::Debug),
        Just(Level::Info),
        Just(Level::Warn),
        Just(Level::Error),
    ]
}

fn logs_with(events: &[(Level, String)]) -> CapturedLogs {
    let queue = CaptureQueue::new();
    for (level, message) in events {
        queue.push(LogEvent::new("prop", *level, message));
    }
    CapturedLogs::new(queue)
}

proptest! {
    #[test]
    #[ignore]
    fn prop_consuming_assertions_follow_emission_order(
        ref events in proptest::collection::vec((level(), "[a-z ]{0,12}"), 0..8)
    ) {
        let logs = logs_with(events);
        for (level, message) in events {
            prop_assert!(logs.assert_logged(*level, message).is_ok());
        }
        prop_assert!(logs.assert_no_more_logs().is_ok());
    }

    #[test]
    #[ignore]
    fn prop_existence_checks_never_consume(
        ref events in proptest::collection::vec((level(), "[a-z]{1,6}"), 1..8),
        ref probes in proptest::collection::vec("[a-z]{1,6}", 1..4)
    ) {
        let logs = logs_with(events);
        for (probe, _) in iproduct!(probes, 0..2) {
            let pattern = Pattern::new(probe).expect("literal pattern");
            let present = events.iter().any(|(_, m)| m == probe);
            prop_assert_eq!(logs.assert_any_logged(&pattern).is_ok(), present);
            prop_assert_eq!(logs.assert_not_logged(&pattern).is_ok(), !present);
        }
        prop_assert_eq!(logs.len(), events.len());
    }

    #[test]
    #[ignore]
    fn prop_any_order_drains_every_permutation(
        ref events in proptest::collection::vec((level(), "[a-c]{1,2}"), 1..5)
    ) {
        for order in (0..events.len()).permutations(events.len()) {
            let logs = logs_with(events);
            for index in order {
                let (level, message) = &events[index];
                prop_assert!(logs.assert_logged_in_any_order(*level, message).is_ok());
            }
            prop_assert!(logs.is_empty());
        }
    }
}
