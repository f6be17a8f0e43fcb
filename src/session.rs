//! Capture session lifecycle.
//!
//! A [`CaptureSession`] borrows the host for the duration of one test:
//!
//! - `start` records the host's level (and, under [`Policy::Hide`], its
//!   sinks), applies the configured level, and attaches a [`CaptureSink`].
//! - `stop` undoes exactly those changes.
//!
//! The state machine is `NotStarted → Active → Ended`; any other transition
//! is an error. Dropping an active session stops it, so host state is
//! restored even when an assertion panics. [`with_capture`] wraps the whole
//! cycle around a closure.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::assertions::CapturedLogs;
use crate::capture_sink::CaptureSink;
use crate::config::{CaptureConfig, Policy};
use crate::host::{LogHost, RootLogger, root};
use crate::level::Level;
use crate::queue::CaptureQueue;
use crate::sink::SharedSink;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    Active,
    Ended,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionState::NotStarted => "not started",
            SessionState::Active => "active",
            SessionState::Ended => "ended",
        })
    }
}

/// Errors raised by lifecycle misuse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// `start` or `stop` was called from the wrong state.
    #[error("cannot {operation} a capture session that is {from}")]
    InvalidTransition {
        from: SessionState,
        operation: &'static str,
    },
    /// Another session already owns the host.
    #[error("another capture session is already active on this host")]
    HostBusy,
}

/// Paired acquisition and release run around a test body.
pub trait LifecycleHook {
    fn start(&mut self) -> Result<(), SessionError>;
    fn stop(&mut self) -> Result<(), SessionError>;
}

/// One capture session on one host.
pub struct CaptureSession<H: LogHost + ?Sized = RootLogger> {
    host: Arc<H>,
    config: CaptureConfig,
    state: SessionState,
    prior_level: Level,
    prior_sinks: Vec<SharedSink>,
    injected: SharedSink,
    logs: CapturedLogs,
}

impl CaptureSession<RootLogger> {
    /// Create a session on the process-wide root logger.
    pub fn new(config: CaptureConfig) -> Self {
        Self::on_host(root(), config)
    }

    /// Create and start a session on the process-wide root logger.
    pub fn begin(config: CaptureConfig) -> Result<Self, SessionError> {
        let mut session = Self::new(config);
        session.start()?;
        Ok(session)
    }
}

impl<H: LogHost + ?Sized> CaptureSession<H> {
    /// Create a session on `host`. Nothing changes until [`start`].
    ///
    /// [`start`]: CaptureSession::start
    pub fn on_host(host: Arc<H>, config: CaptureConfig) -> Self {
        let queue = CaptureQueue::new();
        let injected: SharedSink = Arc::new(CaptureSink::new(queue.clone()));
        Self {
            host,
            config,
            state: SessionState::NotStarted,
            prior_level: Level::default(),
            prior_sinks: Vec::new(),
            injected,
            logs: CapturedLogs::new(queue),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> CaptureConfig {
        self.config
    }

    /// Assertions over the events captured so far.
    pub fn logs(&self) -> &CapturedLogs {
        &self.logs
    }

    /// Install the capture sink and apply the configured level.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::NotStarted {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                operation: "start",
            });
        }
        if !self.host.try_claim() {
            return Err(SessionError::HostBusy);
        }

        self.prior_level = self.host.active_level();
        if self.config.policy() == Policy::Hide {
            self.prior_sinks = self.host.attached_sinks();
            for sink in &self.prior_sinks {
                self.host.detach_sink(sink);
            }
        }
        self.host.set_active_level(self.config.level());
        self.host.attach_sink(Arc::clone(&self.injected));
        self.state = SessionState::Active;

        debug!(
            target: "assertlog::session",
            level = %self.config.level(),
            policy = %self.config.policy(),
            hidden_sinks = self.prior_sinks.len(),
            "capture session started"
        );
        Ok(())
    }

    /// Remove the capture sink and restore the host as `start` found it.
    pub fn stop(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Active {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                operation: "stop",
            });
        }
        self.restore();
        Ok(())
    }

    fn restore(&mut self) {
        self.host.detach_sink(&self.injected);
        self.host.set_active_level(self.prior_level);
        for sink in self.prior_sinks.drain(..) {
            self.host.attach_sink(sink);
        }
        self.host.release();
        self.state = SessionState::Ended;

        debug!(
            target: "assertlog::session",
            level = %self.prior_level,
            remaining = self.logs.len(),
            "capture session stopped"
        );
    }
}

impl<H: LogHost + ?Sized> LifecycleHook for CaptureSession<H> {
    fn start(&mut self) -> Result<(), SessionError> {
        CaptureSession::start(self)
    }

    fn stop(&mut self) -> Result<(), SessionError> {
        CaptureSession::stop(self)
    }
}

impl<H: LogHost + ?Sized> Drop for CaptureSession<H> {
    fn drop(&mut self) {
        if self.state == SessionState::Active {
            self.restore();
        }
    }
}

impl<H: LogHost + ?Sized> fmt::Debug for CaptureSession<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureSession")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("captured", &self.logs.len())
            .finish()
    }
}

/// Run `body` inside a session on the process-wide root logger.
///
/// The host is restored on every exit path, including a panic in `body`.
pub fn with_capture<F, R>(config: CaptureConfig, body: F) -> Result<R, SessionError>
where
    F: FnOnce(&CapturedLogs) -> R,
{
    with_capture_on(root(), config, body)
}

/// Run `body` inside a session on `host`.
pub fn with_capture_on<H, F, R>(host: Arc<H>, config: CaptureConfig, body: F) -> Result<R, SessionError>
where
    H: LogHost + ?Sized,
    F: FnOnce(&CapturedLogs) -> R,
{
    let mut session = CaptureSession::on_host(host, config);
    session.start()?;
    let result = body(session.logs());
    session.stop()?;
    Ok(result)
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
