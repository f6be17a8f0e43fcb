//! Captured log events.
//!
//! A [`LogEvent`] is created once per emission by the host and is never
//! mutated afterwards. Sinks receive it by reference; the capture sink keeps
//! its own clone until an assertion consumes it.

use std::error::Error;
use std::fmt;
use std::thread;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::level::Level;

/// Summary of the failure attached to an event.
///
/// Only `kind` and `message` take part in assertions. `stack` is kept for
/// humans reading a dump and is never compared.
#[derive(Clone, Debug, Serialize)]
pub struct Cause {
    /// Fully qualified name of the failure type.
    pub kind: String,
    /// Rendered failure message.
    pub message: String,
    /// Source chain, innermost last, one entry per line.
    pub stack: Vec<String>,
}

impl Cause {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            stack: Vec::new(),
        }
    }

    /// Summarise `err` using its concrete type name and `Display` output.
    pub fn of<E>(err: &E) -> Self
    where
        E: Error + ?Sized,
    {
        let mut stack = Vec::new();
        let mut source = err.source();
        while let Some(inner) = source {
            stack.push(inner.to_string());
            source = inner.source();
        }
        Self {
            kind: std::any::type_name::<E>().to_owned(),
            message: err.to_string(),
            stack,
        }
    }

    /// Return `true` when kind and message are identical. `stack` is ignored.
    pub fn same_failure(&self, other: &Cause) -> bool {
        self.kind == other.kind && self.message == other.message
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Where and when an event was emitted.
#[derive(Clone, Debug, Serialize)]
pub struct EventMetadata {
    /// Rust module path where the log call originated.
    pub module_path: String,
    /// Source file name for the log call.
    pub filename: String,
    /// Line number in the source file.
    pub line_number: u32,
    /// Time the event was created.
    pub timestamp: DateTime<Utc>,
    /// Debug rendering of the emitting thread's id.
    pub thread_id: String,
    /// Name of the emitting thread (if any).
    pub thread_name: Option<String>,
}

impl Default for EventMetadata {
    fn default() -> Self {
        let current = thread::current();
        Self {
            module_path: String::new(),
            filename: String::new(),
            line_number: 0,
            timestamp: Utc::now(),
            thread_id: format!("{:?}", current.id()),
            thread_name: current.name().map(ToString::to_string),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct LogEvent {
    logger: String,
    level: Level,
    message: String,
    template: Option<String>,
    cause: Option<Cause>,
    metadata: EventMetadata,
}

impl LogEvent {
    /// Construct an event from logger `name`, `level`, and rendered `message`.
    pub fn new(logger: &str, level: Level, message: &str) -> Self {
        Self::with_metadata(logger, level, message, EventMetadata::default())
    }

    /// Construct an event with explicit source location.
    ///
    /// Timestamp and thread information in `metadata` are always replaced by
    /// the current ones.
    pub fn with_metadata(
        logger: &str,
        level: Level,
        message: &str,
        metadata: EventMetadata,
    ) -> Self {
        let runtime = EventMetadata::default();
        Self {
            logger: logger.to_owned(),
            level,
            message: message.to_owned(),
            template: None,
            cause: None,
            metadata: EventMetadata {
                timestamp: runtime.timestamp,
                thread_id: runtime.thread_id,
                thread_name: runtime.thread_name,
                ..metadata
            },
        }
    }

    /// Attach the unrendered template the message was produced from.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Attach a failure cause.
    pub fn with_cause(mut self, cause: Cause) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn logger(&self) -> &str {
        &self.logger
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// The fully rendered message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The unrendered template, when the emitter supplied one.
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    pub fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}

impl fmt::Display for LogEvent {
    /// Renders `LEVEL logger message`, the format used in residual listings.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.level, self.logger, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Debug)]
    struct Wrapped(io::Error);

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("purchase failed")
        }
    }

    impl Error for Wrapped {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn cause_of_uses_concrete_type_name_and_display() {
        let err = "x".parse::<u32>().expect_err("not a number");
        let cause = Cause::of(&err);
        assert!(cause.kind.ends_with("ParseIntError"));
        assert_eq!(cause.message, "invalid digit found in string");
        assert!(cause.stack.is_empty());
    }

    #[test]
    fn cause_of_collects_source_chain() {
        let err = Wrapped(io::Error::other("disk gone"));
        let cause = Cause::of(&err);
        assert!(cause.kind.ends_with("Wrapped"));
        assert_eq!(cause.stack, vec!["disk gone".to_string()]);
    }

    #[test]
    fn same_failure_ignores_stack() {
        let mut left = Cause::new("ArithmeticError", "/ by zero");
        left.stack.push("frame".into());
        let right = Cause::new("ArithmeticError", "/ by zero");
        assert!(left.same_failure(&right));
        assert!(!left.same_failure(&Cause::new("ArithmeticError", "overflow")));
        assert!(!left.same_failure(&Cause::new("OverflowError", "/ by zero")));
    }

    #[test]
    fn with_metadata_refreshes_runtime_fields() {
        let meta = EventMetadata {
            module_path: "shop::cart".into(),
            filename: "cart.rs".into(),
            line_number: 7,
            thread_id: "stale".into(),
            ..Default::default()
        };
        let event = LogEvent::with_metadata("shop.cart", Level::Info, "added", meta);
        assert_eq!(event.metadata().module_path, "shop::cart");
        assert_eq!(event.metadata().line_number, 7);
        assert_ne!(event.metadata().thread_id, "stale");
    }

    #[test]
    fn display_renders_residual_triple() {
        let event = LogEvent::new("shop", Level::Warn, "low stock");
        assert_eq!(event.to_string(), "WARN shop low stock");
    }

    #[test]
    fn template_and_cause_are_optional() {
        let plain = LogEvent::new("shop", Level::Info, "hi");
        assert!(plain.template().is_none());
        assert!(plain.cause().is_none());

        let rich = LogEvent::new("shop", Level::Error, "Failed 2")
            .with_template("Failed {}")
            .with_cause(Cause::new("E", "m"));
        assert_eq!(rich.template(), Some("Failed {}"));
        assert_eq!(rich.cause().map(|c| c.kind.as_str()), Some("E"));
    }
}
