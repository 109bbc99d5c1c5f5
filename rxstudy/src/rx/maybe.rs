//! Maybe - zero or one value, or an error

use super::observer::Recorded;
use super::subscription::{self, Subscription};
use crate::error::{Result, RxError};
use futures::FutureExt;
use futures::future::{self, BoxFuture};
use std::future::Future;

/// Maybe - succeeds with a value, completes empty, or fails
///
/// Exactly one of `on_success`, `on_error` or `on_complete` fires per
/// subscription; `on_complete` only when there was no value.
pub struct Maybe<T> {
    future: BoxFuture<'static, Result<Option<T>>>,
}

impl<T: Send + 'static> Maybe<T> {
    pub fn just(value: T) -> Self {
        Self::from_future(future::ready(Ok(Some(value))))
    }

    pub fn empty() -> Self {
        Self::from_future(future::ready(Ok(None)))
    }

    pub fn error(error: RxError) -> Self {
        Self::from_future(future::ready(Err(error)))
    }

    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = Result<Option<T>>> + Send + 'static,
    {
        Self {
            future: future.boxed(),
        }
    }

    pub fn subscribe<S, E, C>(self, on_success: S, on_error: E, on_complete: C) -> Subscription
    where
        S: FnOnce(T) + Send + 'static,
        E: FnOnce(RxError) + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        subscription::spawn_future(self.future, move |output| match output {
            Ok(Some(value)) => on_success(value),
            Ok(None) => on_complete(),
            Err(err) => on_error(err),
        })
    }

    pub async fn record(self) -> Recorded<T> {
        match self.future.await {
            Ok(Some(value)) => Recorded::success(value),
            Ok(None) => Recorded::complete(Vec::new()),
            Err(err) => Recorded::error(Vec::new(), err),
        }
    }
}
