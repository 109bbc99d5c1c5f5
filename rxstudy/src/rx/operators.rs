//! Rx-style operators

use super::Observable;
use crate::error::Result;
use crate::value::{FromValue, Value};
use futures::future;
use futures::{Stream, StreamExt};
use pin_project::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll, ready};
use std::time::Duration;

/// Stream adapter that ends right after the first `Err` item.
///
/// Every Observable is wrapped in this, so an error is always the last
/// signal a subscriber can see.
#[pin_project]
pub(crate) struct UntilError<S> {
    #[pin]
    inner: S,
    done: bool,
}

impl<S> UntilError<S> {
    pub(crate) fn new(inner: S) -> Self {
        Self { inner, done: false }
    }
}

impl<S, T> Stream for UntilError<S>
where
    S: Stream<Item = Result<T>>,
{
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        if *this.done {
            return Poll::Ready(None);
        }

        match ready!(this.inner.poll_next(cx)) {
            Some(Ok(value)) => Poll::Ready(Some(Ok(value))),
            Some(Err(err)) => {
                *this.done = true;
                Poll::Ready(Some(Err(err)))
            }
            None => {
                *this.done = true;
                Poll::Ready(None)
            }
        }
    }
}

/// Repeat operator - replay the source `times` times in order
///
/// The source is subscribed once; its values are buffered on the first pass
/// and replayed for the remaining passes. `times == 0` yields an empty
/// Observable. An error during the first pass ends the stream without replay.
///
/// Only meant for finite sources: the buffer holds every value of the first
/// pass, so an endless source such as `interval` grows it without bound.
///
/// # Example
/// ```no_run
/// # use rxstudy::rx::{Observable, operators::repeat};
/// let obs = Observable::from_iterable(vec!["Hello", "World"]);
/// let repeated = repeat(obs, 3);
/// ```
pub fn repeat<T: Clone + Send + 'static>(observable: Observable<T>, times: usize) -> Observable<T> {
    let stream = async_stream::stream! {
        let mut source = observable.into_stream();
        let mut replay = Vec::new();
        let mut failed = false;

        if times > 0 {
            while let Some(item) = source.next().await {
                match item {
                    Ok(value) => {
                        replay.push(value.clone());
                        yield Ok(value);
                    }
                    Err(err) => {
                        failed = true;
                        yield Err(err);
                        break;
                    }
                }
            }
        }

        if !failed {
            for _ in 1..times {
                // Owned pass: no borrow of `replay` may live across a yield
                for value in replay.clone() {
                    yield Ok(value);
                }
            }
        }
    };

    Observable::from_results(stream)
}

/// OfType operator - keep elements whose variant converts to `U`
///
/// # Example
/// ```no_run
/// # use rxstudy::rx::{Observable, operators::of_type};
/// # use rxstudy::Value;
/// let obs = Observable::from_iterable(vec![Value::from(10), Value::from("java")]);
/// let strings: Observable<String> = of_type(obs);
/// ```
pub fn of_type<U: FromValue + Send + 'static>(observable: Observable<Value>) -> Observable<U> {
    tracing::debug!(kind = ?U::KIND, "of_type filter installed");
    let stream = observable.into_stream().filter_map(|item| {
        future::ready(match item {
            Ok(value) => U::from_value(value).map(Ok),
            Err(err) => Some(Err(err)),
        })
    });

    Observable::from_results(stream)
}

/// Collect the values an Observable emits within `window`
///
/// Stops early if the source terminates. The values seen before an error are
/// returned; the error itself is dropped.
///
/// # Example
/// ```no_run
/// # use rxstudy::rx::{Observable, operators::collect_within};
/// # use std::time::Duration;
/// # async fn demo() {
/// let ticks = collect_within(
///     Observable::interval(Duration::from_millis(100)),
///     Duration::from_millis(350),
/// )
/// .await;
/// # }
/// ```
pub async fn collect_within<T: Send + 'static>(observable: Observable<T>, window: Duration) -> Vec<T> {
    let mut stream = observable.into_stream();
    let mut values = Vec::new();
    let deadline = tokio::time::sleep(window);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            biased;
            _ = &mut deadline => break,
            item = stream.next() => match item {
                Some(Ok(value)) => values.push(value),
                Some(Err(err)) => {
                    tracing::debug!(error = %err, "collect_within stopped on error");
                    break;
                }
                None => break,
            },
        }
    }

    values
}
