mod config;
mod console;
mod demo;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use config::DemoConfig;
use console::Stdout;
use demo::{Demo, DemoRunner};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "rxstudy")]
#[command(about = "rxstudy - a tour of Single, Maybe, Completable and Observable", long_about = None)]
struct Args {
    /// Run only these demos (repeatable); all demos run by default
    #[arg(long = "only", value_enum)]
    only: Vec<Demo>,

    /// List demo names and exit
    #[arg(long)]
    list: bool,

    /// YAML config file with timing overrides
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interval period in milliseconds
    #[arg(long)]
    interval_period_ms: Option<u64>,

    /// How long to watch the interval, in milliseconds
    #[arg(long)]
    interval_window_ms: Option<u64>,

    /// Timer delay in milliseconds
    #[arg(long)]
    timer_delay_ms: Option<u64>,

    /// How long to wait for the timer, in milliseconds
    #[arg(long)]
    timer_window_ms: Option<u64>,
}

impl Args {
    /// Config file (or defaults) with command-line overrides applied last
    fn load_config(&self) -> Result<DemoConfig> {
        let mut config = match &self.config {
            Some(path) => DemoConfig::from_file(path)?,
            None => DemoConfig::default(),
        };

        if let Some(ms) = self.interval_period_ms {
            config = config.with_interval_period(Duration::from_millis(ms));
        }
        if let Some(ms) = self.interval_window_ms {
            config = config.with_interval_window(Duration::from_millis(ms));
        }
        if let Some(ms) = self.timer_delay_ms {
            config = config.with_timer_delay(Duration::from_millis(ms));
        }
        if let Some(ms) = self.timer_window_ms {
            config = config.with_timer_window(Duration::from_millis(ms));
        }

        Ok(config)
    }

    fn selected_demos(&self) -> Vec<Demo> {
        if self.only.is_empty() {
            Demo::ALL.to_vec()
        } else {
            self.only.clone()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.load_config()?;

    // Demo output owns stdout; diagnostics go to stderr
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_level))
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    if args.list {
        for demo in Demo::ALL {
            println!("{}", demo.name().bold());
        }
        return Ok(());
    }

    let demos = args.selected_demos();
    info!("rxstudy v{}", env!("CARGO_PKG_VERSION"));
    info!(count = demos.len(), "Starting demo tour");

    let runner = DemoRunner::new(config, Arc::new(Stdout));
    runner.run(&demos).await?;

    info!("Demo tour finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_runs_everything_with_defaults() {
        let args = Args::try_parse_from(["rxstudy"]).unwrap();
        assert_eq!(args.selected_demos(), Demo::ALL.to_vec());
        assert_eq!(args.load_config().unwrap(), DemoConfig::default());
    }

    #[test]
    fn test_only_and_overrides() {
        let args = Args::try_parse_from([
            "rxstudy",
            "--only",
            "of-type",
            "--only",
            "range",
            "--interval-window-ms",
            "1000",
            "--timer-delay-ms",
            "10",
        ])
        .unwrap();

        assert_eq!(args.selected_demos(), vec![Demo::OfType, Demo::Range]);
        let config = args.load_config().unwrap();
        assert_eq!(config.interval_window(), Duration::from_secs(1));
        assert_eq!(config.timer_delay(), Duration::from_millis(10));
        assert_eq!(config.interval_period(), Duration::from_millis(100));
    }

    #[test]
    fn test_unknown_demo_rejected() {
        assert!(Args::try_parse_from(["rxstudy", "--only", "flatmap"]).is_err());
    }
}
