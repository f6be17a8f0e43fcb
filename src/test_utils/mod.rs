//! Helpers shared by unit tests and, behind the `test-util` feature, by the
//! integration tests under `tests/`.

pub mod collecting_sink;

pub use collecting_sink::CollectingSink;
