//! In-memory writer for exercising `StreamSink` without touching stdout.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Thread-safe byte buffer implementing `Write`.
///
/// Clones share the same storage, so one clone can be handed to a sink while
/// the test keeps another to read the output.
#[derive(Clone, Default)]
pub struct SharedBuf {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuf {
    /// Return the buffer contents decoded as UTF-8.
    pub fn text(&self) -> String {
        let bytes = self.buffer.lock().expect("SharedBuf mutex poisoned").clone();
        String::from_utf8(bytes).expect("Buffer contains invalid UTF-8")
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .expect("SharedBuf mutex poisoned")
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
