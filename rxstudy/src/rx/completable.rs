//! Completable - completion or an error, no value

use super::observer::Recorded;
use super::subscription::{self, Subscription};
use crate::error::{Result, RxError};
use futures::FutureExt;
use futures::future::{self, BoxFuture};
use std::fmt::Display;

/// Completable - runs to completion or fails, without a value
pub struct Completable {
    future: BoxFuture<'static, Result<()>>,
}

impl Completable {
    /// Run `action` at subscribe time, then complete
    ///
    /// # Example
    /// ```no_run
    /// # use rxstudy::rx::Completable;
    /// Completable::from_action(|| println!("Hello, World")).subscribe(
    ///     || println!("onComplete"),
    ///     |_| println!("onError"),
    /// );
    /// ```
    pub fn from_action<F>(action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::from_fallible(move || {
            action();
            Ok::<(), RxError>(())
        })
    }

    /// Run a fallible `action` at subscribe time; its error becomes
    /// [`RxError::Action`]
    pub fn from_fallible<F, E>(action: F) -> Self
    where
        F: FnOnce() -> std::result::Result<(), E> + Send + 'static,
        E: Display,
    {
        Self {
            future: future::lazy(move |_| action().map_err(|e| RxError::Action(e.to_string())))
                .boxed(),
        }
    }

    pub fn complete() -> Self {
        Self {
            future: future::ready(Ok(())).boxed(),
        }
    }

    pub fn error(error: RxError) -> Self {
        Self {
            future: future::ready(Err(error)).boxed(),
        }
    }

    pub fn subscribe<C, E>(self, on_complete: C, on_error: E) -> Subscription
    where
        C: FnOnce() + Send + 'static,
        E: FnOnce(RxError) + Send + 'static,
    {
        subscription::spawn_future(self.future, move |output| match output {
            Ok(()) => on_complete(),
            Err(err) => on_error(err),
        })
    }

    pub async fn record(self) -> Recorded<()> {
        match self.future.await {
            Ok(()) => Recorded::complete(Vec::new()),
            Err(err) => Recorded::error(Vec::new(), err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_action_runs_lazily_once() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);

        let completable = Completable::from_action(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        let recorded = completable.record().await;
        assert!(recorded.is_complete());
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fallible_action_error() {
        let recorded = Completable::from_fallible(|| Err("disk full")).record().await;
        assert_eq!(
            recorded.error_signal(),
            Some(&RxError::Action("disk full".to_string()))
        );
    }

    #[tokio::test]
    async fn test_subscribe_complete_and_error() {
        let completes = Arc::new(AtomicUsize::new(0));
        let errors = Arc::new(AtomicUsize::new(0));

        let (c, e) = (Arc::clone(&completes), Arc::clone(&errors));
        Completable::complete()
            .subscribe(
                move || {
                    c.fetch_add(1, Ordering::SeqCst);
                },
                move |_| {
                    e.fetch_add(1, Ordering::SeqCst);
                },
            )
            .terminated()
            .await;

        let (c, e) = (Arc::clone(&completes), Arc::clone(&errors));
        Completable::error(RxError::bare())
            .subscribe(
                move || {
                    c.fetch_add(1, Ordering::SeqCst);
                },
                move |_| {
                    e.fetch_add(1, Ordering::SeqCst);
                },
            )
            .terminated()
            .await;

        assert_eq!(completes.load(Ordering::SeqCst), 1);
        assert_eq!(errors.load(Ordering::SeqCst), 1);
    }
}
