//! Binary entrypoint: runs a carousel in the terminal, driven by stdin commands.
//!
//! Delegates all logic to the library crate.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tokio::sync::mpsc::{self, Sender};
use tokio_util::sync::CancellationToken;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use rust_carousel::config::CarouselConfig;
use rust_carousel::events::InputEvent;
use rust_carousel::script::{ScriptLine, parse_line};
use rust_carousel::stage::TerminalStage;
use rust_carousel::tasks::runtime;

#[derive(Debug, Parser)]
#[command(
    name = "carousel",
    version,
    about = "Timed panel carousel driven by keyboard-style commands on stdin"
)]
struct Args {
    /// Path to YAML config
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Override the autoplay interval (ms)
    #[arg(long, value_name = "MILLIS")]
    interval_ms: Option<u64>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("rust_carousel={level}").parse()?)
        .add_directive(format!("carousel={level}").parse()?);
    fmt().with_env_filter(filter).with_target(false).compact().init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let Args {
        config,
        interval_ms,
        verbose,
    } = Args::parse();
    init_tracing(verbose)?;

    let mut cfg = CarouselConfig::from_yaml_file(&config)
        .with_context(|| format!("failed to load configuration from {}", config.display()))?;
    if let Some(ms) = interval_ms {
        cfg.interval = Duration::from_millis(ms);
    }
    let cfg = cfg.validated().context("invalid configuration values")?;
    info!(
        panels = cfg.panels.len(),
        indicators = cfg.indicator_count(),
        interval = %humantime::format_duration(cfg.interval),
        "loaded configuration from {}",
        config.display()
    );

    let (tx, rx) = mpsc::channel::<InputEvent>(64);
    let cancel = CancellationToken::new();

    spawn_stdin_reader(tx.clone(), cancel.clone());

    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!("ctrl-c handler failed: {err}");
                return;
            }
            info!("ctrl-c received; shutting down");
            cancel.cancel();
        });
    }

    let stage = TerminalStage::from_config(&cfg);
    let controller = runtime::run(stage, cfg.settings(), tx, rx, cancel).await;

    println!("{}", controller.stage().status_line());
    Ok(())
}

/// Reads commands on a plain thread so a blocked stdin never holds up shutdown.
fn spawn_stdin_reader(tx: Sender<InputEvent>, cancel: CancellationToken) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    warn!("stdin read failed: {err}");
                    break;
                }
            };
            match parse_line(&line) {
                Ok(ScriptLine::Event(event)) => {
                    if tx.blocking_send(event).is_err() {
                        return;
                    }
                }
                Ok(ScriptLine::Quit) => {
                    info!("quit requested");
                    cancel.cancel();
                    return;
                }
                Ok(ScriptLine::Blank) => {}
                Err(err) => warn!("ignoring input line: {err:#}"),
            }
        }
        info!("stdin closed; shutting down");
        cancel.cancel();
    });
}
