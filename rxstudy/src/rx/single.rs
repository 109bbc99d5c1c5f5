//! Single - exactly one value or an error

use super::observer::Recorded;
use super::subscription::{self, Subscription};
use crate::error::{Result, RxError};
use futures::FutureExt;
use futures::future::{self, BoxFuture};
use std::future::Future;

/// Single - resolves to exactly one value, or fails
///
/// # Example
/// ```no_run
/// # use rxstudy::rx::Single;
/// Single::just(1).subscribe(
///     |value| println!("onSuccess {}", value),
///     |_| println!("onError"),
/// );
/// ```
pub struct Single<T> {
    future: BoxFuture<'static, Result<T>>,
}

impl<T: Send + 'static> Single<T> {
    pub fn just(value: T) -> Self {
        Self::from_future(future::ready(Ok(value)))
    }

    pub fn error(error: RxError) -> Self {
        Self::from_future(future::ready(Err(error)))
    }

    /// Wrap a future; it is polled only once the Single is subscribed
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        Self {
            future: future.boxed(),
        }
    }

    /// Subscribe with success/error callbacks; exactly one of them fires
    pub fn subscribe<S, E>(self, on_success: S, on_error: E) -> Subscription
    where
        S: FnOnce(T) + Send + 'static,
        E: FnOnce(RxError) + Send + 'static,
    {
        subscription::spawn_future(self.future, move |output| match output {
            Ok(value) => on_success(value),
            Err(err) => on_error(err),
        })
    }

    /// Transform the success value
    pub fn map<F, R>(self, f: F) -> Single<R>
    where
        F: FnOnce(T) -> R + Send + 'static,
        R: Send + 'static,
    {
        Single::from_future(self.future.map(|output| output.map(f)))
    }

    /// Resolve the Single and capture its signal
    pub async fn record(self) -> Recorded<T> {
        match self.future.await {
            Ok(value) => Recorded::success(value),
            Err(err) => Recorded::error(Vec::new(), err),
        }
    }
}
