//! Compatibility bridge for the `tracing` ecosystem.
//!
//! [`CaptureLayer`] is a `tracing_subscriber::Layer` that turns each tracing
//! event into a [`LogEvent`] and emits it through a [`RootLogger`]. Events
//! whose target belongs to this crate are skipped, so session bookkeeping
//! never lands in a capture queue.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::event::{Cause, EventMetadata, LogEvent};
use crate::host::{RootLogger, root};
use crate::level::Level;

const INTERNAL_TARGET_PREFIX: &str = "assertlog";

/// Layer forwarding tracing events to a root logger.
#[derive(Clone, Debug)]
pub struct CaptureLayer {
    root: Arc<RootLogger>,
}

impl Default for CaptureLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureLayer {
    /// Forward to the process-wide root logger.
    pub fn new() -> Self {
        Self::with_root(root())
    }

    pub fn with_root(root: Arc<RootLogger>) -> Self {
        Self { root }
    }
}

#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    cause: Option<Cause>,
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }

    fn record_error(&mut self, _field: &Field, value: &(dyn Error + 'static)) {
        // The concrete type is erased here; kind is the trait-object name.
        self.cause.get_or_insert_with(|| Cause::of(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }
}

fn normalise_target(target: &str) -> String {
    target.replace("::", ".")
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if meta.target().starts_with(INTERNAL_TARGET_PREFIX) {
            return;
        }
        let level = Level::from(meta.level());
        if !self.root.is_enabled_for(level) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let metadata = EventMetadata {
            module_path: meta.module_path().unwrap_or_default().to_owned(),
            filename: meta.file().unwrap_or_default().to_owned(),
            line_number: meta.line().unwrap_or(0),
            ..Default::default()
        };
        let mut captured = LogEvent::with_metadata(
            &normalise_target(meta.target()),
            level,
            visitor.message.as_deref().unwrap_or_default(),
            metadata,
        );
        if let Some(cause) = visitor.cause {
            captured = captured.with_cause(cause);
        }
        self.root.emit(captured);
    }
}
