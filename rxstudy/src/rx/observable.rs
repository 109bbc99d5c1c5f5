//! Observable implementation (Rx-like)

use super::emitter::Emitter;
use super::observer::{CallbackObserver, Observer, Recorded, Recorder};
use super::operators::{self, UntilError};
use super::subscription::{self, Subscription};
use crate::error::{Result, RxError};
use crate::value::{FromValue, Value};
use futures::{Stream, StreamExt, future, stream};
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_stream::wrappers::UnboundedReceiverStream;

pub(crate) type RxStream<T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'static>>;

/// Observable wrapper - zero or more values, then completion or an error
///
/// Observables are cold: nothing runs until the Observable is subscribed,
/// recorded or polled as a stream.
pub struct Observable<T> {
    stream: RxStream<T>,
}

impl<T: Send + 'static> Observable<T> {
    /// Create an Observable from a Stream of plain values
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = T> + Send + 'static,
    {
        Self::from_results(stream.map(Ok))
    }

    /// Create an Observable from a Stream of results; the first `Err` ends it
    pub fn from_results<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<T>> + Send + 'static,
    {
        Self {
            stream: Box::pin(UntilError::new(stream)),
        }
    }

    /// Create an Observable whose producer pushes signals through an [`Emitter`]
    ///
    /// The producer runs when the Observable is first polled. Signals after
    /// the first `error` or `complete` are dropped.
    ///
    /// # Example
    /// ```no_run
    /// # use rxstudy::rx::Observable;
    /// # use rxstudy::RxError;
    /// let obs = Observable::create(|mut emitter| {
    ///     emitter.next("Hello");
    ///     emitter.next("RxJava");
    ///     emitter.error(RxError::bare());
    ///     emitter.complete(); // ignored
    /// });
    /// ```
    pub fn create<F>(producer: F) -> Self
    where
        F: FnOnce(Emitter<T>) + Send + 'static,
    {
        let stream = stream::once(async move {
            let (tx, rx) = mpsc::unbounded_channel();
            producer(Emitter::new(tx));
            UnboundedReceiverStream::new(rx)
        })
        .flatten();

        Self::from_results(stream)
    }

    /// Emit each element of `items` in order, then complete
    pub fn from_iterable<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        Self::from_stream(stream::iter(items))
    }

    /// Emit one value, then complete
    pub fn just(value: T) -> Self {
        Self::from_stream(stream::once(future::ready(value)))
    }

    /// Complete without emitting
    pub fn empty() -> Self {
        Self::from_stream(stream::empty())
    }

    /// Fail immediately with `error`
    pub fn error(error: RxError) -> Self {
        Self::from_results(stream::once(future::ready(Err(error))))
    }

    /// Subscribe with next/error/complete callbacks (Rx style)
    ///
    /// The pipeline runs on a spawned Tokio task, so this must be called from
    /// within a runtime.
    ///
    /// # Example
    /// ```no_run
    /// # use rxstudy::rx::Observable;
    /// let obs = Observable::from_iterable(vec![1, 2, 3]);
    ///
    /// obs.subscribe(
    ///     |value| println!("Next: {}", value),
    ///     |err| eprintln!("Error: {}", err),
    ///     || println!("Complete!"),
    /// );
    /// ```
    pub fn subscribe<N, E, C>(self, next: N, error: E, complete: C) -> Subscription
    where
        N: FnMut(T) + Send + 'static,
        E: FnMut(RxError) + Send + 'static,
        C: FnMut() + Send + 'static,
    {
        self.subscribe_observer(CallbackObserver::new(next, error, complete))
    }

    /// Subscribe with only next callback (simplified)
    ///
    /// An error signal has nowhere to go and is logged instead.
    pub fn subscribe_next<F>(self, next: F) -> Subscription
    where
        F: FnMut(T) + Send + 'static,
    {
        self.subscribe(
            next,
            |err| tracing::warn!(error = %err, "Observable error not handled by subscriber"),
            || {},
        )
    }

    /// Subscribe an [`Observer`] implementation
    pub fn subscribe_observer<O>(self, observer: O) -> Subscription
    where
        O: Observer<T> + 'static,
    {
        subscription::spawn_stream(self.stream, observer)
    }

    /// Run the Observable to its terminal signal and capture what it emitted
    pub async fn record(self) -> Recorded<T> {
        let mut recorder = Recorder::new();
        let handle = Subscription::new();
        subscription::pump(self.stream, &mut recorder, &handle).await;
        recorder.finish()
    }

    /// Values emitted within `window`; see [`operators::collect_within`]
    pub async fn collect_within(self, window: Duration) -> Vec<T> {
        operators::collect_within(self, window).await
    }

    /// Convert back to Stream for chaining with StreamExt operators
    pub fn into_stream(self) -> Pin<Box<dyn Stream<Item = Result<T>> + Send + 'static>> {
        self.stream
    }

    /// Map operator - transform values
    pub fn map<F, R>(self, mut f: F) -> Observable<R>
    where
        F: FnMut(T) -> R + Send + 'static,
        R: Send + 'static,
    {
        Observable::from_results(self.stream.map(move |item| item.map(&mut f)))
    }

    /// Filter operator - filter values
    pub fn filter<F>(self, mut f: F) -> Observable<T>
    where
        F: FnMut(&T) -> bool + Send + 'static,
    {
        Observable::from_results(self.stream.filter(move |item| {
            let keep = match item {
                Ok(value) => f(value),
                Err(_) => true,
            };
            future::ready(keep)
        }))
    }

    /// Take operator - take first N values
    pub fn take(self, n: usize) -> Observable<T> {
        Observable::from_results(self.stream.take(n))
    }

    /// Skip operator - skip first N values
    pub fn skip(self, n: usize) -> Observable<T> {
        let mut remaining = n;
        self.filter(move |_| {
            if remaining == 0 {
                true
            } else {
                remaining -= 1;
                false
            }
        })
    }

    /// Take while predicate is true
    pub fn take_while<F>(self, mut f: F) -> Observable<T>
    where
        F: FnMut(&T) -> bool + Send + 'static,
    {
        Observable::from_results(self.stream.take_while(move |item| {
            let keep = match item {
                Ok(value) => f(value),
                Err(_) => true,
            };
            future::ready(keep)
        }))
    }
}

impl<T: Clone + Send + 'static> Observable<T> {
    /// Repeat operator; see [`operators::repeat`]
    pub fn repeat(self, times: usize) -> Observable<T> {
        operators::repeat(self, times)
    }
}

impl Observable<Value> {
    /// OfType operator; see [`operators::of_type`]
    pub fn of_type<U: FromValue + Send + 'static>(self) -> Observable<U> {
        operators::of_type(self)
    }
}

impl Observable<u64> {
    /// Emit `0, 1, 2, ...` every `period`, forever
    ///
    /// The first value arrives one period after subscription. Late ticks are
    /// delayed rather than bursted. A zero period is treated as one
    /// millisecond.
    pub fn interval(period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        let stream = async_stream::stream! {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut count: u64 = 0;

            loop {
                ticker.tick().await;
                yield Ok::<_, RxError>(count);
                count += 1;
            }
        };

        Self::from_results(stream)
    }

    /// Emit `0` once after `delay`, then complete
    pub fn timer(delay: Duration) -> Self {
        let stream = async_stream::stream! {
            time::sleep(delay).await;
            yield Ok::<_, RxError>(0u64);
        };

        Self::from_results(stream)
    }
}

impl Observable<i32> {
    /// Emit `count` ascending integers starting at `start`, then complete
    ///
    /// Fails with [`RxError::InvalidArgument`] when the last value would
    /// overflow `i32`.
    pub fn range(start: i32, count: u32) -> Result<Self> {
        if count == 0 {
            return Ok(Self::empty());
        }

        let last = i64::from(start) + i64::from(count) - 1;
        let last = i32::try_from(last).map_err(|_| {
            RxError::InvalidArgument(format!(
                "range({}, {}) overflows i32::MAX",
                start, count
            ))
        })?;

        Ok(Self::from_iterable(start..=last))
    }
}

// Implement Stream for Observable so it can be used with StreamExt
impl<T> Stream for Observable<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.stream).poll_next(cx)
    }
}
