//! Sink that feeds a [`CaptureQueue`].

use std::any::Any;

use crate::event::LogEvent;
use crate::queue::CaptureQueue;
use crate::sink::Sink;

/// Appends every delivered event to its queue, untouched.
#[derive(Clone, Debug)]
pub struct CaptureSink {
    queue: CaptureQueue,
}

impl CaptureSink {
    pub fn new(queue: CaptureQueue) -> Self {
        Self { queue }
    }

    pub fn queue(&self) -> &CaptureQueue {
        &self.queue
    }
}

impl Sink for CaptureSink {
    fn on_event(&self, event: &LogEvent) {
        self.queue.push(event.clone());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
