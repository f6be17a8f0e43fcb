//! Process-wide logging host.
//!
//! The capture harness only needs a narrow view of the logging system: the
//! active level, the attached sinks, and synchronous delivery. [`LogHost`]
//! is that view. [`RootLogger`] implements it for the process-wide root
//! returned by [`root`], and named [`Logger`] handles emit through it.
//!
//! Level and sink list are guarded independently: the level is an
//! `AtomicU8` and the sinks live behind a `parking_lot::RwLock`. Dispatch
//! clones the sink list before invoking sinks so a sink may itself log
//! without deadlocking.

use std::error::Error;
use std::fmt::{self, Display};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use thiserror::Error;

use crate::event::{Cause, EventMetadata, LogEvent};
use crate::level::Level;
use crate::sink::{SharedSink, same_sink};

/// Errors raised by the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// Logger names are dotted identifiers without empty segments.
    #[error("invalid logger name: {0:?}")]
    InvalidLoggerName(String),
}

/// Accessors and mutators the capture session needs from the host.
pub trait LogHost: Send + Sync {
    /// Return the threshold below which events are never produced.
    fn active_level(&self) -> Level;

    /// Replace the active threshold.
    fn set_active_level(&self, level: Level);

    /// Return the attached sinks in attachment order.
    fn attached_sinks(&self) -> Vec<SharedSink>;

    /// Attach `sink` after every currently attached sink.
    fn attach_sink(&self, sink: SharedSink);

    /// Detach `sink` by identity. Returns `false` when it was not attached.
    fn detach_sink(&self, sink: &SharedSink) -> bool;

    /// Mark the host as owned by a capture session.
    ///
    /// Returns `false` when another session already owns it.
    fn try_claim(&self) -> bool;

    /// Release a claim taken with [`LogHost::try_claim`].
    fn release(&self);
}

/// Root of the logger hierarchy: one level and one ordered sink list.
pub struct RootLogger {
    level: AtomicU8,
    sinks: RwLock<Vec<SharedSink>>,
    claimed: AtomicBool,
}

impl Default for RootLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RootLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootLogger")
            .field("level", &self.active_level())
            .field("sinks", &self.sinks.read().len())
            .field("claimed", &self.claimed.load(Ordering::SeqCst))
            .finish()
    }
}

impl RootLogger {
    /// Create a root with level `INFO` and no sinks.
    pub fn new() -> Self {
        Self {
            level: AtomicU8::new(u8::from(Level::Info)),
            sinks: RwLock::new(Vec::new()),
            claimed: AtomicBool::new(false),
        }
    }

    /// Return whether `level` passes the active threshold.
    pub fn is_enabled_for(&self, level: Level) -> bool {
        u8::from(level) >= self.level.load(Ordering::Relaxed)
    }

    /// Deliver `event` to every attached sink, synchronously and in
    /// attachment order. Events below the active level are discarded.
    pub fn emit(&self, event: LogEvent) {
        if !self.is_enabled_for(event.level()) {
            return;
        }
        let sinks = self.sinks.read().clone();
        for sink in &sinks {
            sink.on_event(&event);
        }
    }

    /// Return a named logger emitting through this root.
    pub fn logger(self: &Arc<Self>, name: &str) -> Result<Logger, HostError> {
        validate_logger_name(name)?;
        Ok(Logger {
            name: name.to_owned(),
            host: Arc::clone(self),
        })
    }
}

impl LogHost for RootLogger {
    fn active_level(&self) -> Level {
        Level::from(self.level.load(Ordering::Relaxed))
    }

    fn set_active_level(&self, level: Level) {
        self.level.store(u8::from(level), Ordering::Relaxed);
    }

    fn attached_sinks(&self) -> Vec<SharedSink> {
        self.sinks.read().clone()
    }

    fn attach_sink(&self, sink: SharedSink) {
        self.sinks.write().push(sink);
    }

    fn detach_sink(&self, sink: &SharedSink) -> bool {
        let mut sinks = self.sinks.write();
        if let Some(pos) = sinks.iter().position(|s| same_sink(s, sink)) {
            sinks.remove(pos);
            true
        } else {
            false
        }
    }

    fn try_claim(&self) -> bool {
        self.claimed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    fn release(&self) {
        self.claimed.store(false, Ordering::SeqCst);
    }
}

static ROOT: Lazy<Arc<RootLogger>> = Lazy::new(|| Arc::new(RootLogger::new()));

/// Return the process-wide root logger.
pub fn root() -> Arc<RootLogger> {
    Arc::clone(&ROOT)
}

/// Retrieve a named logger bound to the process-wide root.
pub fn get_logger(name: &str) -> Result<Logger, HostError> {
    ROOT.logger(name)
}

fn validate_logger_name(name: &str) -> Result<(), HostError> {
    if name.is_empty()
        || name.starts_with('.')
        || name.ends_with('.')
        || name.split('.').any(|s| s.is_empty())
    {
        return Err(HostError::InvalidLoggerName(name.to_owned()));
    }
    Ok(())
}

/// Substitute each `{}` in `template` with the next argument.
///
/// Placeholders without a matching argument stay verbatim; surplus
/// arguments are ignored.
pub fn render_template(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut args = args.iter();
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => out.push_str(&arg.to_string()),
            None => out.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

/// Named handle emitting events through a [`RootLogger`].
#[derive(Clone)]
pub struct Logger {
    name: String,
    host: Arc<RootLogger>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("name", &self.name).finish()
    }
}

impl Logger {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled_for(&self, level: Level) -> bool {
        self.host.is_enabled_for(level)
    }

    /// Emit `message` at `level`.
    pub fn log(&self, level: Level, message: &str) {
        if self.is_enabled_for(level) {
            self.host.emit(LogEvent::new(&self.name, level, message));
        }
    }

    /// Emit `message` at `level` with an explicit failure summary.
    pub fn log_with_cause(&self, level: Level, message: &str, cause: Cause) {
        if self.is_enabled_for(level) {
            self.host
                .emit(LogEvent::new(&self.name, level, message).with_cause(cause));
        }
    }

    /// Emit `message` at `level`, summarising `err` as the cause.
    pub fn log_error<E>(&self, level: Level, message: &str, err: &E)
    where
        E: Error + ?Sized,
    {
        self.log_with_cause(level, message, Cause::of(err));
    }

    /// Render `template` with `args` and emit it, keeping the template.
    ///
    /// Rendering is skipped when `level` is disabled.
    pub fn log_template(&self, level: Level, template: &str, args: &[&dyn Display]) {
        if !self.is_enabled_for(level) {
            return;
        }
        let message = render_template(template, args);
        self.host
            .emit(LogEvent::new(&self.name, level, &message).with_template(template));
    }

    /// Emit an event that already carries source location.
    pub fn log_at(&self, level: Level, message: &str, metadata: EventMetadata) {
        if self.is_enabled_for(level) {
            self.host
                .emit(LogEvent::with_metadata(&self.name, level, message, metadata));
        }
    }

    pub fn trace(&self, message: &str) {
        self.log(Level::Trace, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod host_tests;
