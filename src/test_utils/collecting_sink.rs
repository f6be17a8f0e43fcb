//! A sink that accumulates events in memory.
//!
//! Integration tests attach it to a host to play the part of the
//! application's own destinations and check what they did or did not see.

use crate::event::LogEvent;
use crate::sink::{SharedSink, Sink};
use parking_lot::Mutex;
use std::any::Any;
use std::sync::Arc;

/// Sink that stores every event it receives for later inspection.
#[derive(Clone, Default)]
pub struct CollectingSink {
    events: Arc<Mutex<Vec<LogEvent>>>,
}

impl CollectingSink {
    /// Create a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink and return it alongside its erased handle.
    pub fn shared() -> (Self, SharedSink) {
        let sink = Self::new();
        let handle: SharedSink = Arc::new(sink.clone());
        (sink, handle)
    }

    /// Return a snapshot of all events received so far.
    pub fn collected(&self) -> Vec<LogEvent> {
        self.events.lock().clone()
    }

    /// Return the rendered messages received so far.
    pub fn messages(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .map(|e| e.message().to_owned())
            .collect()
    }
}

impl Sink for CollectingSink {
    fn on_event(&self, event: &LogEvent) {
        self.events.lock().push(event.clone());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
