//! The demo tour: one small pipeline per Rx type or operator

use crate::config::DemoConfig;
use crate::console::Console;
use anyhow::Result;
use clap::ValueEnum;
use rxstudy::Value;
use rxstudy::rx::{Completable, Maybe, Observable, Single, Subscription};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// One entry of the tour, in run order
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    Single,
    Maybe,
    Completable,
    Create,
    From,
    Interval,
    Timer,
    Range,
    Repeat,
    Map,
    OfType,
    Filter,
}

impl Demo {
    pub const ALL: [Demo; 12] = [
        Demo::Single,
        Demo::Maybe,
        Demo::Completable,
        Demo::Create,
        Demo::From,
        Demo::Interval,
        Demo::Timer,
        Demo::Range,
        Demo::Repeat,
        Demo::Map,
        Demo::OfType,
        Demo::Filter,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Demo::Single => "single",
            Demo::Maybe => "maybe",
            Demo::Completable => "completable",
            Demo::Create => "create",
            Demo::From => "from",
            Demo::Interval => "interval",
            Demo::Timer => "timer",
            Demo::Range => "range",
            Demo::Repeat => "repeat",
            Demo::Map => "map",
            Demo::OfType => "of-type",
            Demo::Filter => "filter",
        }
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs demos in tour order and writes their signals to a [`Console`]
pub struct DemoRunner {
    config: DemoConfig,
    console: Arc<dyn Console>,
}

impl DemoRunner {
    pub fn new(config: DemoConfig, console: Arc<dyn Console>) -> Self {
        Self { config, console }
    }

    /// Run the selected demos, always in tour order
    pub async fn run(&self, selected: &[Demo]) -> Result<()> {
        for demo in Demo::ALL.into_iter().filter(|d| selected.contains(d)) {
            info!(demo = %demo, "Running demo");
            self.run_one(demo).await?;
        }
        Ok(())
    }

    /// Run one demo; returns once its output is complete
    ///
    /// The interval demo is the exception: its subscription is left running
    /// and keeps printing until the runtime shuts down.
    pub async fn run_one(&self, demo: Demo) -> Result<()> {
        match demo {
            Demo::Single => self.single().await,
            Demo::Maybe => self.maybe().await,
            Demo::Completable => self.completable().await,
            Demo::Create => self.create().await,
            Demo::From => self.from().await,
            Demo::Interval => self.interval().await,
            Demo::Timer => self.timer().await,
            Demo::Range => self.range().await?,
            Demo::Repeat => self.repeat().await,
            Demo::Map => self.map().await,
            Demo::OfType => self.of_type().await,
            Demo::Filter => self.filter().await,
        }
        Ok(())
    }

    fn out(&self) -> Arc<dyn Console> {
        Arc::clone(&self.console)
    }

    /// Print every value, and the error if one arrives
    fn print_values<T>(&self, observable: Observable<T>) -> Subscription
    where
        T: fmt::Display + Send + 'static,
    {
        let (next, error) = (self.out(), self.out());
        observable.subscribe(
            move |value| next.line(&value.to_string()),
            move |err| error.line(&format!("onError {}", err)),
            || {},
        )
    }

    async fn single(&self) {
        let (success, error) = (self.out(), self.out());
        Single::just(1)
            .subscribe(
                move |value| success.line(&format!("onSuccess {}", value)),
                move |_| error.line("onError"),
            )
            .terminated()
            .await;
    }

    async fn maybe(&self) {
        let (success, error, complete) = (self.out(), self.out(), self.out());
        Maybe::just("Hello World")
            .subscribe(
                move |value| success.line(&format!("onSuccess {}", value)),
                move |err| error.line(&format!("onError {}", err)),
                move || complete.line("onComplete"),
            )
            .terminated()
            .await;

        let (success, error, complete) = (self.out(), self.out(), self.out());
        Maybe::<()>::empty()
            .subscribe(
                move |value| success.line(&format!("onSuccess {:?}", value)),
                move |err| error.line(&format!("onError {}", err)),
                move || complete.line("onComplete"),
            )
            .terminated()
            .await;
    }

    async fn completable(&self) {
        let (action, complete, error) = (self.out(), self.out(), self.out());
        Completable::from_action(move || complete_action(action.as_ref()))
            .subscribe(
                move || complete.line("onComplete"),
                move |_| error.line("onError"),
            )
            .terminated()
            .await;
    }

    async fn create(&self) {
        let source = Observable::create(|mut emitter| {
            emitter.next("Hello");
            emitter.next("RxJava");
            emitter.error(rxstudy::RxError::bare());
            // Dropped: the error already terminated the stream
            emitter.complete();
        });
        self.print_values(source).terminated().await;
    }

    async fn from(&self) {
        let items = [1, 2, 3, 4];
        self.print_values(Observable::from_iterable(items))
            .terminated()
            .await;
    }

    async fn interval(&self) {
        let _ticker = self.print_values(Observable::interval(self.config.interval_period()));
        debug!(window = ?self.config.interval_window(), "Waiting on interval ticks");
        tokio::time::sleep(self.config.interval_window()).await;
    }

    async fn timer(&self) {
        let started = now_millis();
        self.console.line(&format!("Start TS = {}", started));

        let out = self.out();
        let _timer = Observable::timer(self.config.timer_delay()).subscribe(
            move |tick| out.line(&format!("Start TS = {} {}", now_millis(), tick)),
            |err| tracing::warn!(error = %err, "Timer failed"),
            || {},
        );
        debug!(window = ?self.config.timer_window(), "Waiting on timer");
        tokio::time::sleep(self.config.timer_window()).await;
    }

    async fn range(&self) -> Result<()> {
        self.print_values(Observable::range(3, 10)?)
            .terminated()
            .await;
        Ok(())
    }

    async fn repeat(&self) {
        let source = Observable::from_iterable(["Hello", "World"]).repeat(3);
        self.print_values(source).terminated().await;
    }

    async fn map(&self) {
        let source = Observable::from_iterable(0..=5).map(|i| format!("item = {}", i));
        self.print_values(source).terminated().await;
    }

    async fn of_type(&self) {
        let source = mixed_values().of_type::<String>();
        self.print_values(source).terminated().await;
    }

    async fn filter(&self) {
        let source = mixed_values().filter(|value| value.as_str() == Some("java"));
        self.print_values(source).terminated().await;
    }
}

/// Side effect run by the completable demo (stands in for a DB write)
fn complete_action(console: &dyn Console) {
    console.line("Hello, World");
}

fn mixed_values() -> Observable<Value> {
    Observable::from_iterable([
        Value::from(10),
        Value::from("100"),
        Value::from(true),
        Value::from("java"),
        Value::from(19.4),
    ])
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::testing::MemoryConsole;
    use std::time::Duration;

    fn runner(config: DemoConfig) -> (DemoRunner, MemoryConsole) {
        let console = MemoryConsole::default();
        (DemoRunner::new(config, Arc::new(console.clone())), console)
    }

    async fn lines_of(demo: Demo) -> Vec<String> {
        let (runner, console) = runner(DemoConfig::default());
        runner.run_one(demo).await.unwrap();
        console.lines()
    }

    #[test]
    fn test_demo_names_match_clap_values() {
        for demo in Demo::ALL {
            let value = demo.to_possible_value().unwrap();
            assert_eq!(value.get_name(), demo.name());
        }
    }

    #[tokio::test]
    async fn test_single() {
        assert_eq!(lines_of(Demo::Single).await, vec!["onSuccess 1"]);
    }

    #[tokio::test]
    async fn test_maybe() {
        assert_eq!(
            lines_of(Demo::Maybe).await,
            vec!["onSuccess Hello World", "onComplete"]
        );
    }

    #[tokio::test]
    async fn test_completable() {
        assert_eq!(
            lines_of(Demo::Completable).await,
            vec!["Hello, World", "onComplete"]
        );
    }

    #[tokio::test]
    async fn test_create_stops_at_error() {
        assert_eq!(
            lines_of(Demo::Create).await,
            vec!["Hello", "RxJava", "onError null"]
        );
    }

    #[tokio::test]
    async fn test_from() {
        assert_eq!(lines_of(Demo::From).await, vec!["1", "2", "3", "4"]);
    }

    #[tokio::test]
    async fn test_range() {
        let expected: Vec<String> = (3..=12).map(|i: i32| i.to_string()).collect();
        assert_eq!(lines_of(Demo::Range).await, expected);
    }

    #[tokio::test]
    async fn test_repeat() {
        assert_eq!(
            lines_of(Demo::Repeat).await,
            vec!["Hello", "World", "Hello", "World", "Hello", "World"]
        );
    }

    #[tokio::test]
    async fn test_map() {
        assert_eq!(
            lines_of(Demo::Map).await,
            vec![
                "item = 0", "item = 1", "item = 2", "item = 3", "item = 4", "item = 5"
            ]
        );
    }

    #[tokio::test]
    async fn test_of_type_and_filter() {
        assert_eq!(lines_of(Demo::OfType).await, vec!["100", "java"]);
        assert_eq!(lines_of(Demo::Filter).await, vec!["java"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_window() {
        let config = DemoConfig::default().with_interval_window(Duration::from_millis(350));
        let (runner, console) = runner(config);

        runner.run_one(Demo::Interval).await.unwrap();
        assert_eq!(console.lines(), vec!["0", "1", "2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_prints_start_and_tick() {
        let lines = lines_of(Demo::Timer).await;
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Start TS = "));
        assert!(lines[1].starts_with("Start TS = "));
        assert!(lines[1].ends_with(" 0"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_window_too_short() {
        let config = DemoConfig::default().with_timer_window(Duration::from_millis(500));
        let (runner, console) = runner(config);

        runner.run_one(Demo::Timer).await.unwrap();
        assert_eq!(console.lines().len(), 1);
    }

    #[tokio::test]
    async fn test_run_keeps_tour_order() {
        let (runner, console) = runner(DemoConfig::default());
        runner
            .run(&[Demo::Filter, Demo::Single, Demo::From])
            .await
            .unwrap();

        assert_eq!(
            console.lines(),
            vec!["onSuccess 1", "1", "2", "3", "4", "java"]
        );
    }

    #[tokio::test]
    async fn test_run_untimed_tour() {
        let untimed: Vec<Demo> = Demo::ALL
            .into_iter()
            .filter(|d| !matches!(d, Demo::Interval | Demo::Timer))
            .collect();
        let (runner, console) = runner(DemoConfig::default());
        runner.run(&untimed).await.unwrap();

        let lines = console.lines();
        assert_eq!(lines.first().map(String::as_str), Some("onSuccess 1"));
        assert_eq!(lines.last().map(String::as_str), Some("java"));
        assert_eq!(lines.len(), 1 + 2 + 2 + 3 + 4 + 10 + 6 + 6 + 2 + 1);
    }
}
