//! `StreamSink` as an application destination around capture sessions.

use std::sync::Arc;

use assertlog::{CaptureConfig, LogHost, Policy, RootLogger, StreamSink, with_capture_on};
use rstest::rstest;

mod test_utils;
use test_utils::SharedBuf;

fn host_with_stream() -> (Arc<RootLogger>, SharedBuf) {
    let host = Arc::new(RootLogger::new());
    let buf = SharedBuf::default();
    host.attach_sink(Arc::new(StreamSink::new(buf.clone())));
    (host, buf)
}

#[rstest]
#[case(Policy::Hide, &["after"])]
#[case(Policy::Show, &["during", "after"])]
fn policy_decides_what_the_stream_sees(#[case] policy: Policy, #[case] expected: &[&str]) {
    let (host, buf) = host_with_stream();
    let logger = host.logger("app.stream").expect("valid logger name");

    with_capture_on(Arc::clone(&host), CaptureConfig::with_policy(policy), |logs| {
        logger.info("during");
        logs.clear();
    })
    .expect("host is free");
    logger.warn("after");

    let text = buf.text();
    let messages: Vec<&str> = text
        .lines()
        .map(|line| line.rsplit(" - ").next().unwrap_or_default())
        .collect();
    assert_eq!(messages, expected);
    assert!(text.lines().all(|line| line.contains(" app.stream - ")));
}
