//! Hazardwatch — Main Entry Point
//!
//! Terminal dashboard for a fire/smoke installation backend.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HttpBackend     LogEventSink   JsonFileConfig   SystemClock   │
//! │  (BackendPort)   (EventSink)    (ConfigPort)     (ClockPort)   │
//! │  stdin operator thread                                         │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │         MonitorService · AlertController (pure)        │    │
//! │  │         FSM · edge detection · rate limit              │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  runtime: executor control loop · I/O worker threads           │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tracing_subscriber::EnvFilter;

use hazardwatch::adapters::config_file::{self, JsonFileConfig};
use hazardwatch::adapters::http_backend::HttpBackend;
use hazardwatch::adapters::log_sink::LogEventSink;
use hazardwatch::adapters::stdin_operator;
use hazardwatch::adapters::time::SystemClock;
use hazardwatch::app::service::MonitorService;
use hazardwatch::runtime::channels::Links;
use hazardwatch::runtime::monitor::{self, Periods};
use hazardwatch::runtime::io_task;

/// Hazard monitoring client: alarm lifecycle, suppression and alert log.
#[derive(Debug, Parser)]
#[command(name = "hazardwatch", version, about)]
struct Args {
    /// JSON configuration file (defaults apply when missing)
    #[arg(short, long, default_value = "hazardwatch.json")]
    config: PathBuf,

    /// Override the backend base URL from the config file
    #[arg(short, long)]
    backend: Option<String>,

    /// Write the effective configuration back to the config file and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // ── Configuration ─────────────────────────────────────────
    let store = JsonFileConfig::new(&args.config);
    let config = config_file::resolve(&store, args.backend, args.write_config)
        .with_context(|| format!("configuring from {}", args.config.display()))?;
    if args.write_config {
        info!("Configuration written to {}", args.config.display());
        return Ok(());
    }
    info!(
        "Hazardwatch v{} | backend {} | cooldown {}s | registration interval {}s",
        env!("CARGO_PKG_VERSION"),
        config.backend_url,
        config.dismiss_cooldown_secs,
        config.min_registration_interval_secs
    );

    // ── Adapters ──────────────────────────────────────────────
    let backend = HttpBackend::new(
        &config.backend_url,
        Duration::from_millis(u64::from(config.request_timeout_ms)),
    )
    .context("building HTTP client")?;

    let links = Links::global();
    io_task::spawn_workers(
        Arc::new(backend),
        config.io_workers,
        links.requests,
        links.responses,
    )
    .context("spawning I/O workers")?;
    stdin_operator::spawn(links.operator).context("spawning operator input")?;

    // ── Control loop ──────────────────────────────────────────
    monitor::run(
        MonitorService::new(&config),
        SystemClock::new(),
        LogEventSink::new(),
        Periods::from_config(&config),
        links,
    );

    info!("Hazardwatch stopped");
    Ok(())
}
