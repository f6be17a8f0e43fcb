//! Stream-based host sink.
//!
//! `StreamSink` formats each event as
//! `HH:MM:SS,mmm LEVEL logger - message` and writes it to a stream. It stands
//! in for an application's normal log destination, the one a capture session
//! hides under [`Policy::Hide`](crate::config::Policy::Hide).

use std::any::Any;
use std::fmt;
use std::io::{self, Write};

use parking_lot::Mutex;
use tracing::warn;

use crate::event::LogEvent;
use crate::sink::Sink;

/// Render `event` as a single line without the trailing newline.
pub fn format_line(event: &LogEvent) -> String {
    let mut line = format!(
        "{} {:<5} {} - {}",
        event.metadata().timestamp.format("%H:%M:%S,%3f"),
        event.level(),
        event.logger(),
        event.message(),
    );
    if let Some(cause) = event.cause() {
        line.push_str(&format!("\n{cause}"));
        for frame in &cause.stack {
            line.push_str(&format!("\n\t{frame}"));
        }
    }
    line
}

/// Sink writing formatted events to an `io::Write` stream.
///
/// Writes happen synchronously on the emitting thread under a lock, so lines
/// from concurrent emitters never interleave.
pub struct StreamSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl StreamSink {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    pub fn new<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: &LogEvent) -> io::Result<()> {
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", format_line(event))?;
        writer.flush()
    }
}

impl Sink for StreamSink {
    fn on_event(&self, event: &LogEvent) {
        if let Err(err) = self.write_event(event) {
            warn!(target: "assertlog::stream_sink", error = %err, "failed to write log line");
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for StreamSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamSink").finish_non_exhaustive()
    }
}
