//! WaterGuard host runner
//!
//! Runs the irrigation controller against the local clock with logged
//! relay lines. Useful for dry runs of a schedule before flashing a board.

mod clock;
mod lines;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use waterguard_core::constants::DEFAULT_LOG_FILE;
use waterguard_core::sink::FileLogSink;
use waterguard_core::time::TimePoint;
use waterguard_core::{ClockSource, ControlLoop, IrrigationConfig, RelayBank};

use crate::clock::LocalClock;
use crate::lines::{relay_lines, ThreadDelay};

#[derive(Parser, Debug)]
#[command(name = "waterguard", version, about = "RTC-polled multiplexed irrigation controller")]
struct Cli {
    /// JSON schedule; factory settings when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Execution log, appended to on every run
    #[arg(short, long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Also print relay line changes
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<IrrigationConfig> {
    let Some(path) = path else {
        return Ok(IrrigationConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    IrrigationConfig::from_json(&json).with_context(|| format!("parsing config {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    let mut clock = LocalClock;
    let started = TimePoint::from_fields(&clock.read_fields()).unwrap_or_default();

    let level = if cli.verbose { log::LevelFilter::Trace } else { log::LevelFilter::Debug };
    let sink = FileLogSink::new(&cli.log_file).with_level(level);
    sink.new_start(&started);
    sink.install().context("installing logger")?;

    log::info!(
        "Schedule: every {}, {} loops over {} channels, {} s each",
        config.threshold,
        config.loop_count,
        config.channel_count,
        config.activation_secs
    );

    let (select, signal) = relay_lines();
    let mut controller = ControlLoop::new(config, clock, RelayBank::new(select, signal), ThreadDelay)
        .context("starting controller")?;

    match controller.run().context("controller stopped")? {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use waterguard_core::Threshold;

    #[test]
    fn missing_config_uses_factory_settings() {
        assert_eq!(load_config(None).unwrap(), IrrigationConfig::default());
    }

    #[test]
    fn partial_config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");
        fs::write(
            &path,
            r#"{ "loop_count": 3, "threshold": { "unit": "hours", "amount": 6 } }"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.loop_count, 3);
        assert_eq!(config.threshold, Threshold::hours(6));
        assert_eq!(config.channel_count, 7);
    }

    #[test]
    fn unreadable_config_names_the_file() {
        let err = load_config(Some(&PathBuf::from("/nonexistent/schedule.json"))).unwrap_err();
        assert!(err.to_string().contains("schedule.json"));
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["waterguard"]);
        assert_eq!(cli.log_file, PathBuf::from("execution.log"));
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }
}
