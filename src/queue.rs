//! Insertion-ordered queue of captured events.
//!
//! Appends may arrive from any emitting thread; every other operation is
//! expected to run on the test thread. A single `parking_lot::Mutex` guards
//! the `VecDeque`, so insertion order equals delivery order.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::event::LogEvent;

#[derive(Clone, Debug, Default)]
pub struct CaptureQueue {
    events: Arc<Mutex<VecDeque<LogEvent>>>,
}

impl CaptureQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: LogEvent) {
        self.events.lock().push_back(event);
    }

    /// Remove and return the oldest event.
    pub fn pop_front(&self) -> Option<LogEvent> {
        self.events.lock().pop_front()
    }

    /// Remove the oldest event satisfying `pred`, leaving the rest in order.
    pub fn remove_first<P>(&self, mut pred: P) -> Option<LogEvent>
    where
        P: FnMut(&LogEvent) -> bool,
    {
        let mut events = self.events.lock();
        let pos = events.iter().position(&mut pred)?;
        events.remove(pos)
    }

    pub fn any<P>(&self, pred: P) -> bool
    where
        P: FnMut(&LogEvent) -> bool,
    {
        self.events.lock().iter().any(pred)
    }

    /// Clone every event satisfying `pred`, oldest first.
    pub fn matching<P>(&self, mut pred: P) -> Vec<LogEvent>
    where
        P: FnMut(&LogEvent) -> bool,
    {
        self.events
            .lock()
            .iter()
            .filter(|e| pred(e))
            .cloned()
            .collect()
    }

    pub fn snapshot(&self) -> Vec<LogEvent> {
        self.events.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}
