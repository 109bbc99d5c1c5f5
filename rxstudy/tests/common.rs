//! Common test utilities

use std::sync::{Arc, Mutex};

/// Shared log of rendered signals
pub type SignalLog = Arc<Mutex<Vec<String>>>;

/// Install a test subscriber once so library `debug!` output shows with `--nocapture`
#[allow(dead_code)] // Used by other test modules
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Snapshot the log contents
#[allow(dead_code)] // Used by other test modules
pub fn entries(log: &SignalLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Callbacks that render next/error/complete into `log`
#[allow(dead_code)] // Used by other test modules
pub fn logging_callbacks<T: std::fmt::Display + 'static>(
    log: &SignalLog,
) -> (
    impl FnMut(T) + Send + 'static,
    impl FnMut(rxstudy::RxError) + Send + 'static,
    impl FnMut() + Send + 'static,
) {
    let (next, error, complete) = (Arc::clone(log), Arc::clone(log), Arc::clone(log));
    (
        move |value: T| next.lock().unwrap().push(value.to_string()),
        move |err: rxstudy::RxError| error.lock().unwrap().push(format!("onError {}", err)),
        move || complete.lock().unwrap().push("onComplete".to_string()),
    )
}
