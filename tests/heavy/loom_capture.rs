//! Loom model of concurrent emitters feeding one capture sink.

use loom::sync::Arc;
use loom::thread;

use assertlog::{CaptureQueue, CaptureSink, Level, LogEvent, Sink};

fn messages_from(queue: &CaptureQueue, logger: &str) -> Vec<String> {
    queue
        .matching(|e| e.logger() == logger)
        .iter()
        .map(|e| e.message().to_owned())
        .collect()
}

#[test]
#[ignore]
fn loom_concurrent_emitters_keep_per_thread_order() {
    loom::model(|| {
        let queue = CaptureQueue::new();
        let sink = Arc::new(CaptureSink::new(queue.clone()));

        let s = Arc::clone(&sink);
        let t = thread::spawn(move || {
            s.on_event(&LogEvent::new("worker", Level::Info, "w1"));
            s.on_event(&LogEvent::new("worker", Level::Info, "w2"));
        });
        sink.on_event(&LogEvent::new("main", Level::Warn, "m1"));
        t.join().expect("worker thread panicked");

        assert_eq!(queue.len(), 3);
        assert_eq!(messages_from(&queue, "worker"), vec!["w1", "w2"]);
        assert_eq!(messages_from(&queue, "main"), vec!["m1"]);
    });
}
