use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::event::LogEvent;

/// Trait implemented by everything the host delivers events to.
///
/// `Sink` is `Send + Sync` because the host invokes it synchronously on
/// whichever thread emitted the event.
pub trait Sink: Send + Sync {
    /// Observe one emitted event.
    fn on_event(&self, event: &LogEvent);

    /// Return the sink as `Any` so tests can downcast it.
    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to an attached sink. Identity is pointer identity.
pub type SharedSink = Arc<dyn Sink>;

/// Return `true` when both handles point at the same sink.
pub fn same_sink(a: &SharedSink, b: &SharedSink) -> bool {
    Arc::ptr_eq(a, b)
}

/// Sink backed by a plain closure.
pub struct FnSink<F> {
    f: F,
}

impl<F> FnSink<F>
where
    F: Fn(&LogEvent) + Send + Sync + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Wrap the closure and erase it into a [`SharedSink`].
    pub fn shared(f: F) -> SharedSink {
        Arc::new(Self::new(f))
    }
}

impl<F> Sink for FnSink<F>
where
    F: Fn(&LogEvent) + Send + Sync + 'static,
{
    fn on_event(&self, event: &LogEvent) {
        (self.f)(event);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<F> fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnSink(<closure>)")
    }
}
