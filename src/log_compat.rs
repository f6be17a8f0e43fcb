//! Compatibility bridge for the Rust `log` crate.
//!
//! This module provides `CaptureLogAdapter`, an implementation of `log::Log`
//! that forwards records from the `log` facade into the process-wide root
//! logger, where attached sinks (including an active capture sink) observe
//! them. Install it once per test binary with [`install_global_logger`].

use std::borrow::Cow;
use std::sync::OnceLock;

use log::{Metadata, Record};

use crate::event::{EventMetadata, LogEvent};
use crate::host::{self, RootLogger};
use crate::level::Level;

/// Adapter implementing the Rust `log::Log` trait.
///
/// Each record is converted to a [`LogEvent`] named after its normalised
/// target and emitted through the root logger, which applies the active
/// level.
pub struct CaptureLogAdapter;

fn normalise_target(target: &str) -> Cow<'_, str> {
    if target.contains("::") {
        Cow::Owned(target.replace("::", "."))
    } else {
        Cow::Borrowed(target)
    }
}

fn event_from_record(record: &Record<'_>) -> LogEvent {
    let metadata = EventMetadata {
        module_path: record.module_path().unwrap_or_default().to_string(),
        filename: record.file().unwrap_or_default().to_string(),
        line_number: record.line().unwrap_or(0),
        ..Default::default()
    };
    let target = normalise_target(record.target());
    let message = record.args().to_string();
    let event = LogEvent::with_metadata(&target, Level::from(record.level()), &message, metadata);
    match record.args().as_str() {
        Some(literal) => event.with_template(literal),
        None => event,
    }
}

fn forward(root: &RootLogger, record: &Record<'_>) {
    if !root.is_enabled_for(Level::from(record.level())) {
        return;
    }
    root.emit(event_from_record(record));
}

impl log::Log for CaptureLogAdapter {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        host::root().is_enabled_for(Level::from(metadata.level()))
    }

    fn log(&self, record: &Record<'_>) {
        forward(&host::root(), record);
    }

    fn flush(&self) {}
}

static CAPTURE_LOG_ADAPTER: CaptureLogAdapter = CaptureLogAdapter;
static INSTALL_RESULT: OnceLock<bool> = OnceLock::new();

/// Install the adapter as the global Rust logger.
///
/// Returns `true` on success. When a different global logger is already set,
/// installation fails and `false` is returned. Subsequent calls return the
/// cached outcome.
pub fn install_global_logger() -> bool {
    *INSTALL_RESULT.get_or_init(|| {
        if log::set_logger(&CAPTURE_LOG_ADAPTER).is_err() {
            return false;
        }
        log::set_max_level(log::LevelFilter::Trace);
        true
    })
}
