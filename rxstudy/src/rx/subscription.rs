//! Subscription handle and the tasks that drive pipelines

use super::observable::RxStream;
use super::observer::Observer;
use futures::StreamExt;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Notify, watch};
use tracing::debug;

/// Subscription handle - similar to Rx Disposable
#[derive(Clone)]
pub struct Subscription {
    inner: Arc<SubscriptionState>,
}

struct SubscriptionState {
    active: AtomicBool,
    cancel: Notify,
    finished: watch::Sender<bool>,
}

impl Subscription {
    pub fn new() -> Self {
        let (finished, _) = watch::channel(false);
        Self {
            inner: Arc::new(SubscriptionState {
                active: AtomicBool::new(true),
                cancel: Notify::new(),
                finished,
            }),
        }
    }

    /// Unsubscribe; a signal already being delivered may still finish, but no
    /// new signal is delivered after it
    pub fn unsubscribe(&self) {
        if self.inner.active.swap(false, Ordering::SeqCst) {
            debug!("Subscription cancelled");
            self.inner.cancel.notify_one();
        }
    }

    /// Check if subscription is still delivering signals
    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::SeqCst)
    }

    /// Whether the driving task has ended
    pub fn is_terminated(&self) -> bool {
        *self.inner.finished.borrow()
    }

    /// Resolves once the subscription has ended, either through a terminal
    /// signal or through `unsubscribe`
    pub async fn terminated(&self) {
        let mut rx = self.inner.finished.subscribe();
        let _ = rx.wait_for(|done| *done).await;
    }

    pub(crate) async fn cancelled(&self) {
        if !self.is_active() {
            return;
        }
        self.inner.cancel.notified().await;
    }

    pub(crate) fn finish(&self) {
        self.inner.active.store(false, Ordering::SeqCst);
        self.inner.finished.send_replace(true);
    }
}

impl Default for Subscription {
    fn default() -> Self {
        Self::new()
    }
}

/// Feed stream items to `observer` until a terminal signal or cancellation.
///
/// At most one terminal callback fires, and nothing fires after it.
pub(crate) async fn pump<T, O>(mut stream: RxStream<T>, observer: &mut O, subscription: &Subscription)
where
    O: Observer<T>,
{
    loop {
        let item = tokio::select! {
            biased;
            _ = subscription.cancelled() => return,
            item = stream.next() => item,
        };

        if !subscription.is_active() {
            return;
        }

        match item {
            Some(Ok(value)) => observer.on_next(value),
            Some(Err(error)) => {
                observer.on_error(error);
                return;
            }
            None => {
                observer.on_complete();
                return;
            }
        }
    }
}

/// Marks the subscription finished when the driving task ends, including
/// when a callback panics or the task is dropped with the runtime
struct FinishGuard(Subscription);

impl Drop for FinishGuard {
    fn drop(&mut self) {
        self.0.finish();
    }
}

/// Drive a stream on a background task
pub(crate) fn spawn_stream<T, O>(stream: RxStream<T>, observer: O) -> Subscription
where
    T: Send + 'static,
    O: Observer<T> + 'static,
{
    let subscription = Subscription::new();
    let handle = subscription.clone();

    tokio::spawn(async move {
        let guard = FinishGuard(handle);
        let mut observer = observer;
        pump(stream, &mut observer, &guard.0).await;
    });

    subscription
}

/// Drive a single-shot future on a background task
pub(crate) fn spawn_future<T, F>(future: BoxFuture<'static, T>, on_output: F) -> Subscription
where
    T: Send + 'static,
    F: FnOnce(T) + Send + 'static,
{
    let subscription = Subscription::new();
    let handle = subscription.clone();

    tokio::spawn(async move {
        let guard = FinishGuard(handle);
        tokio::select! {
            biased;
            _ = guard.0.cancelled() => {}
            output = future => {
                if guard.0.is_active() {
                    on_output(output);
                }
            }
        }
    });

    subscription
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_subscription_creation() {
        let sub = Subscription::new();
        assert!(sub.is_active());
        assert!(!sub.is_terminated());
    }

    #[test]
    fn test_subscription_unsubscribe() {
        let sub = Subscription::default();
        sub.unsubscribe();
        assert!(!sub.is_active());
        // Second call is a no-op
        sub.unsubscribe();
        assert!(!sub.is_active());
    }

    #[test]
    fn test_subscription_clone_shares_state() {
        let sub1 = Subscription::new();
        let sub2 = sub1.clone();
        sub1.unsubscribe();
        assert!(!sub2.is_active());
    }

    #[tokio::test]
    async fn test_terminated_resolves_after_finish() {
        let sub = Subscription::new();
        let waiter = sub.clone();
        let task = tokio::spawn(async move { waiter.terminated().await });

        sub.finish();
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("terminated() did not resolve")
            .unwrap();
        assert!(sub.is_terminated());
        assert!(!sub.is_active());
    }

    struct PanickingObserver;

    impl Observer<i32> for PanickingObserver {
        fn on_next(&mut self, _value: i32) {
            panic!("observer failed");
        }

        fn on_error(&mut self, _error: crate::RxError) {}

        fn on_complete(&mut self) {}
    }

    #[tokio::test]
    async fn test_panicking_observer_still_terminates() {
        let stream: RxStream<i32> = Box::pin(futures::stream::iter(vec![Ok(1), Ok(2)]));
        let sub = spawn_stream(stream, PanickingObserver);

        tokio::time::timeout(Duration::from_secs(2), sub.terminated())
            .await
            .expect("terminated() did not resolve after a panic");
        assert!(sub.is_terminated());
        assert!(!sub.is_active());
    }

    #[tokio::test]
    async fn test_panicking_future_callback_still_terminates() {
        let sub = spawn_future(Box::pin(async { 1 }), |_: i32| panic!("callback failed"));

        tokio::time::timeout(Duration::from_secs(2), sub.terminated())
            .await
            .expect("terminated() did not resolve after a panic");
        assert!(!sub.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsubscribe_interrupts_pending_future() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);

        let sub = spawn_future(
            Box::pin(tokio::time::sleep(Duration::from_secs(60))),
            move |_| flag.store(true, Ordering::SeqCst),
        );

        tokio::time::sleep(Duration::from_millis(10)).await;
        sub.unsubscribe();
        sub.terminated().await;

        assert!(!fired.load(Ordering::SeqCst));
    }
}
