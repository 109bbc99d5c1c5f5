use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Demo runner configuration
///
/// Defaults reproduce the classic tour: a 100ms interval watched for 300ms
/// and a 1s timer watched for 5s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub interval: IntervalConfig,
    pub timer: TimerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntervalConfig {
    pub period_ms: u64,
    /// How long the runner waits after subscribing
    pub window_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    pub delay_ms: u64,
    pub window_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            period_ms: 100,
            window_ms: 300,
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1000,
            window_ms: 5000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl DemoConfig {
    /// Load configuration from YAML file; missing keys keep their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: DemoConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn with_interval_period(mut self, period: Duration) -> Self {
        self.interval.period_ms = duration_ms(period);
        self
    }

    pub fn with_interval_window(mut self, window: Duration) -> Self {
        self.interval.window_ms = duration_ms(window);
        self
    }

    pub fn with_timer_delay(mut self, delay: Duration) -> Self {
        self.timer.delay_ms = duration_ms(delay);
        self
    }

    pub fn with_timer_window(mut self, window: Duration) -> Self {
        self.timer.window_ms = duration_ms(window);
        self
    }

    pub fn interval_period(&self) -> Duration {
        Duration::from_millis(self.interval.period_ms)
    }

    pub fn interval_window(&self) -> Duration {
        Duration::from_millis(self.interval.window_ms)
    }

    pub fn timer_delay(&self) -> Duration {
        Duration::from_millis(self.timer.delay_ms)
    }

    pub fn timer_window(&self) -> Duration {
        Duration::from_millis(self.timer.window_ms)
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
