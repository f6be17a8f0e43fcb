//! Log capture and assertion for tests.
//!
//! A [`CaptureSession`] takes over the host logging system for the duration
//! of a test: it applies a capture level, optionally hides the sinks already
//! attached (see [`Policy`]), and records every emitted [`LogEvent`] in a
//! FIFO queue. The test then asserts over that queue through
//! [`CapturedLogs`].
//!
//! Ordered assertions (`assert_logged*`) consume the oldest event, pass or
//! fail. Existence checks (`assert_any_logged`, `assert_not_logged`) never
//! consume. `assert_logged_in_any_order` removes the earliest match only. The
//! queue keeps insertion order, so a test that needs a deterministic order
//! across threads must join its emitters before asserting.
//!
//! ```
//! use assertlog::{CaptureConfig, Level, Policy, get_logger, with_capture};
//!
//! let outcome = with_capture(CaptureConfig::with_policy(Policy::Hide), |logs| {
//!     let logger = get_logger("shop.till").expect("valid name");
//!     logger.info("opened");
//!     logs.assert_logged(Level::Info, "opened")?;
//!     logs.assert_no_more_logs()
//! })
//! .expect("host is free");
//! outcome.expect("assertions pass");
//! ```

pub mod assertions;
pub mod capture_sink;
pub mod config;
pub mod event;
pub mod host;
pub mod level;
#[cfg(feature = "log-compat")]
pub mod log_compat;
pub mod pattern;
pub mod queue;
pub mod session;
pub mod sink;
pub mod stream_sink;
#[cfg(any(test, feature = "test-util"))]
pub mod test_utils;
#[cfg(feature = "tracing-compat")]
pub mod tracing_compat;

pub use assertions::{AssertResult, AssertionFailure, CapturedLogs, FailureKind, Field};
pub use capture_sink::CaptureSink;
pub use config::{CaptureConfig, CaptureConfigBuilder, ConfigError, Policy};
pub use event::{Cause, EventMetadata, LogEvent};
pub use host::{HostError, LogHost, Logger, RootLogger, get_logger, render_template, root};
pub use level::{Level, ParseLevelError};
#[cfg(feature = "log-compat")]
pub use log_compat::{CaptureLogAdapter, install_global_logger};
pub use pattern::{Pattern, PatternError};
pub use queue::CaptureQueue;
pub use session::{
    CaptureSession, LifecycleHook, SessionError, SessionState, with_capture, with_capture_on,
};
pub use sink::{FnSink, SharedSink, Sink, same_sink};
pub use stream_sink::StreamSink;
#[cfg(feature = "tracing-compat")]
pub use tracing_compat::CaptureLayer;
