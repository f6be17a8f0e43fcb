//! Fixtures binding capture sessions and stand-in destinations to the
//! process-wide root logger. Tests using them must be `#[serial]`.

use std::sync::Arc;

use assertlog::test_utils::CollectingSink;
use assertlog::{CaptureConfig, CaptureSession, LogHost, Policy, SharedSink, root, same_sink};
use rstest::fixture;

/// Start a session on the root logger that hides existing sinks.
#[fixture]
pub fn hidden_session() -> CaptureSession {
    CaptureSession::begin(CaptureConfig::with_policy(Policy::Hide))
        .expect("no other session is active")
}

/// Two collecting sinks attached to the root logger.
///
/// Dropping the value detaches them again.
pub struct Destinations {
    pub a: CollectingSink,
    pub b: CollectingSink,
    handles: Vec<SharedSink>,
}

impl Destinations {
    /// Whether the root has exactly these sinks attached, in order.
    pub fn exactly_attached(&self) -> bool {
        let attached = root().attached_sinks();
        attached.len() == self.handles.len()
            && attached
                .iter()
                .zip(&self.handles)
                .all(|(actual, expected)| same_sink(actual, expected))
    }
}

impl Drop for Destinations {
    fn drop(&mut self) {
        for handle in &self.handles {
            root().detach_sink(handle);
        }
    }
}

#[fixture]
pub fn destinations() -> Destinations {
    let (a, a_handle) = CollectingSink::shared();
    let (b, b_handle) = CollectingSink::shared();
    let host = root();
    host.attach_sink(Arc::clone(&a_handle));
    host.attach_sink(Arc::clone(&b_handle));
    Destinations {
        a,
        b,
        handles: vec![a_handle, b_handle],
    }
}
