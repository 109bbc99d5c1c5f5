//! Push-side handle handed to `Observable::create` producers

use crate::error::{Result, RxError};
use tokio::sync::mpsc;
use tracing::debug;

/// Emitter - pushes signals into an Observable built with `Observable::create`
///
/// The first `error` or `complete` closes the emitter; anything pushed after
/// that is dropped. Dropping an emitter without a terminal signal completes
/// the Observable.
pub struct Emitter<T> {
    tx: Option<mpsc::UnboundedSender<Result<T>>>,
}

impl<T> Emitter<T> {
    pub(crate) fn new(tx: mpsc::UnboundedSender<Result<T>>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Emit a value
    pub fn next(&mut self, value: T) {
        match &self.tx {
            Some(tx) => {
                if tx.send(Ok(value)).is_err() {
                    debug!("Emitter value dropped: subscriber is gone");
                }
            }
            None => debug!("Emitter value ignored after terminal signal"),
        }
    }

    /// Emit an error and close the emitter
    pub fn error(&mut self, error: RxError) {
        match self.tx.take() {
            Some(tx) => {
                let _ = tx.send(Err(error));
            }
            None => debug!(error = %error, "Emitter error ignored after terminal signal"),
        }
    }

    /// Signal completion and close the emitter
    pub fn complete(&mut self) {
        if self.tx.take().is_none() {
            debug!("Emitter completion ignored after terminal signal");
        }
    }

    /// True once a terminal signal was emitted or the subscriber went away
    pub fn is_terminated(&self) -> bool {
        self.tx.as_ref().is_none_or(|tx| tx.is_closed())
    }
}
