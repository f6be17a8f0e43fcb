//! Assertion vocabulary over a capture queue.
//!
//! [`CapturedLogs`] is the handle tests use inside a capture session. Its
//! operations fall into two groups:
//!
//! - **Consuming** assertions (`assert_logged*`, `assert_logged_in_any_order`,
//!   `get_logged_event`) remove the event they examine. The event stays
//!   removed even when the assertion fails.
//! - **Non-consuming** checks (`assert_any_logged`, `assert_not_logged`,
//!   `assert_no_more_logs`) only look at what is left.
//!
//! Non-consuming pattern checks search the events that are *still queued*.
//! Call them before any consuming assertion in the same test, otherwise the
//! events they are meant to see may already be gone.
//!
//! Failures are returned as [`AssertionFailure`] values and never logged.

use std::fmt::Display;

use thiserror::Error;

use crate::event::{Cause, LogEvent};
use crate::level::Level;
use crate::pattern::Pattern;
use crate::queue::CaptureQueue;

/// Message used when a consuming assertion finds nothing to consume.
pub const QUEUE_EMPTY_MESSAGE: &str = "expected a logged event but none were captured";

/// Event field compared by a failed equality check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Logger,
    Level,
    Message,
    CauseKind,
    CauseMessage,
}

/// Why an assertion failed. All kinds surface the same way and differ only
/// in the rendered message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// A consuming assertion ran against an empty queue.
    QueueEmpty,
    /// A field of the examined event differs from the expectation.
    FieldMismatch(Field),
    /// A cause was expected but absent, or absent but present.
    CausePresence,
    /// No queued event matches the pattern.
    PatternNotFound,
    /// At least one queued event matches a forbidden pattern.
    PatternFound,
    /// No queued event has the expected level and message.
    NoMatchInAnyOrder,
    /// Events remain after the test claimed to have checked them all.
    ResidualEvents,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AssertionFailure {
    kind: FailureKind,
    message: String,
}

impl AssertionFailure {
    fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Build a `"<prefix> ==> expected: <X> but was: <Y>"` failure.
    fn mismatch(
        kind: FailureKind,
        prefix: Option<&str>,
        expected: impl Display,
        actual: impl Display,
    ) -> Self {
        let prefix = match prefix {
            Some(p) if !p.is_empty() => format!("{p} ==> "),
            _ => String::new(),
        };
        Self::new(
            kind,
            format!("{prefix}expected: <{expected}> but was: <{actual}>"),
        )
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result of an assertion.
pub type AssertResult<T = ()> = Result<T, AssertionFailure>;

fn expect_eq<T>(field: Field, prefix: Option<&str>, expected: &T, actual: &T) -> AssertResult
where
    T: PartialEq + Display + ?Sized,
{
    if expected == actual {
        Ok(())
    } else {
        Err(AssertionFailure::mismatch(
            FailureKind::FieldMismatch(field),
            prefix,
            expected,
            actual,
        ))
    }
}

fn describe_cause(cause: Option<&Cause>) -> String {
    cause.map_or_else(|| "null".to_owned(), ToString::to_string)
}

/// Assertions over the events captured by one session.
#[derive(Clone, Debug)]
pub struct CapturedLogs {
    queue: CaptureQueue,
}

impl CapturedLogs {
    pub fn new(queue: CaptureQueue) -> Self {
        Self { queue }
    }

    fn take_head(&self) -> AssertResult<LogEvent> {
        self.queue
            .pop_front()
            .ok_or_else(|| AssertionFailure::new(FailureKind::QueueEmpty, QUEUE_EMPTY_MESSAGE))
    }

    fn check_message_and_level(event: &LogEvent, level: Level, message: &str) -> AssertResult {
        expect_eq(Field::Message, None, message, event.message())?;
        expect_eq(Field::Level, None, &level, &event.level())
    }

    /// Consume the oldest event and require `level` and `message`.
    pub fn assert_logged(&self, level: Level, message: &str) -> AssertResult {
        let event = self.take_head()?;
        Self::check_message_and_level(&event, level, message)
    }

    /// Consume the oldest event and require `logger`, `level`, and `message`.
    ///
    /// The logger name is checked first; its failure message is prefixed
    /// with the expected message so the offending statement is identifiable.
    pub fn assert_logged_by(&self, logger: &str, level: Level, message: &str) -> AssertResult {
        let event = self.take_head()?;
        expect_eq(Field::Logger, Some(message), logger, event.logger())?;
        Self::check_message_and_level(&event, level, message)
    }

    /// Consume the oldest event and require `level`, `message`, and `cause`.
    ///
    /// `None` requires the event to carry no cause. `Some` requires a cause
    /// with the same kind and message; stack content is never compared.
    pub fn assert_logged_with_cause(
        &self,
        level: Level,
        message: &str,
        cause: Option<&Cause>,
    ) -> AssertResult {
        let event = self.take_head()?;
        Self::check_message_and_level(&event, level, message)?;
        match (cause, event.cause()) {
            (None, None) => Ok(()),
            (None, Some(actual)) => Err(AssertionFailure::mismatch(
                FailureKind::CausePresence,
                Some("Cause should be null"),
                "null",
                actual,
            )),
            (Some(expected), None) => Err(AssertionFailure::mismatch(
                FailureKind::CausePresence,
                Some("Cause should be present"),
                expected,
                "null",
            )),
            (Some(expected), Some(actual)) => {
                expect_eq(
                    Field::CauseKind,
                    None,
                    expected.kind.as_str(),
                    actual.kind.as_str(),
                )?;
                expect_eq(
                    Field::CauseMessage,
                    None,
                    expected.message.as_str(),
                    actual.message.as_str(),
                )
            }
        }
    }

    /// Consume the oldest event and require its message to match `pattern`
    /// in full and its level to equal `level`.
    pub fn assert_logged_matching(&self, level: Level, pattern: &Pattern) -> AssertResult {
        let event = self.take_head()?;
        if !pattern.matches(event.message()) {
            return Err(AssertionFailure::mismatch(
                FailureKind::FieldMismatch(Field::Message),
                Some("Message should match pattern"),
                pattern,
                event.message(),
            ));
        }
        expect_eq(Field::Level, None, &level, &event.level())
    }

    /// Remove the oldest event with `level` and rendered `message`, wherever
    /// it sits in the queue.
    pub fn assert_logged_in_any_order(&self, level: Level, message: &str) -> AssertResult {
        self.queue
            .remove_first(|e| e.level() == level && e.message() == message)
            .map(|_| ())
            .ok_or_else(|| {
                AssertionFailure::new(
                    FailureKind::NoMatchInAnyOrder,
                    format!("No entry was logged for level[{level}] and message[{message}]"),
                )
            })
    }

    /// Require at least one queued event whose message matches `pattern`.
    ///
    /// Does not consume. Must run before consuming assertions in the same
    /// test.
    pub fn assert_any_logged(&self, pattern: &Pattern) -> AssertResult {
        if self.queue.any(|e| pattern.matches(e.message())) {
            Ok(())
        } else {
            Err(AssertionFailure::new(
                FailureKind::PatternNotFound,
                format!("No entry was logged matching [{pattern}]"),
            ))
        }
    }

    /// Require that no queued event's message matches `pattern`.
    ///
    /// Does not consume. Must run before consuming assertions in the same
    /// test. The failure lists every matching message.
    pub fn assert_not_logged(&self, pattern: &Pattern) -> AssertResult {
        let found = self.queue.matching(|e| pattern.matches(e.message()));
        if found.is_empty() {
            return Ok(());
        }
        let listed = found
            .iter()
            .map(|e| format!("'{}'", e.message()))
            .collect::<Vec<_>>()
            .join(", ");
        Err(AssertionFailure::new(
            FailureKind::PatternFound,
            format!("Found log entry matching [{pattern}]: {listed}"),
        ))
    }

    /// Require the queue to be empty.
    ///
    /// The failure lists every remaining event as `LEVEL logger message`,
    /// oldest first, one per line.
    pub fn assert_no_more_logs(&self) -> AssertResult {
        let remaining = self.queue.snapshot();
        if remaining.is_empty() {
            return Ok(());
        }
        let listed = remaining
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        Err(AssertionFailure::new(
            FailureKind::ResidualEvents,
            format!("Untested logs found: {listed}"),
        ))
    }

    /// Consume and return the oldest event for ad-hoc inspection.
    pub fn get_logged_event(&self) -> AssertResult<LogEvent> {
        self.take_head()
    }

    /// Drop every queued event.
    pub fn clear(&self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Clone the queued events, oldest first, without consuming them.
    pub fn snapshot(&self) -> Vec<LogEvent> {
        self.queue.snapshot()
    }

    /// Render the queued events as pretty JSON, for attaching to reports.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.queue.snapshot())
    }
}

#[cfg(test)]
#[path = "assertions_tests.rs"]
mod assertions_tests;
