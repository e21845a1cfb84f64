//! TTGO Work Display
//!
//! Keeps a TTGO T4 showing the date, time and local weather, redrawing about
//! once a second over HTTP or serial.
//!
//! Losing the display connection or meeting a weather condition the face
//! cannot name ends the process with an error. Failed weather fetches and
//! malformed replies are logged and retried on the next cycle.

mod config;
mod faces;
mod weather;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ttgo_display_hw::{AnyClient, Error as DisplayError, HttpClient, SerialClient};

use config::{Config, DisplayConfig};
use faces::WorkFace;
use weather::{WeatherAdapter, WeatherError};

#[derive(Parser)]
#[command(name = "ttgo-workd")]
#[command(about = "Date, time and weather on a TTGO T4 display")]
#[command(version)]
struct Args {
    /// Configuration file
    #[arg(default_value = "config/default.toml")]
    config: String,

    /// Display host, overrides the configured transport
    #[arg(long, conflicts_with = "serial")]
    host: Option<String>,

    /// Serial port, overrides the configured transport
    #[arg(long)]
    serial: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .init();

    // Load configuration
    let mut config = if Path::new(&args.config).exists() {
        let config = Config::load(&args.config).context("Failed to load configuration")?;
        info!("Loaded configuration from: {}", args.config);
        config
    } else {
        warn!("{} not found, using defaults", args.config);
        Config::default()
    };

    if let Some(host) = args.host {
        config.display = DisplayConfig::Http { host };
    } else if let Some(port) = args.serial {
        config.display = DisplayConfig::Serial { port };
    }

    let mut display = connect(&config.display)?;
    let mut weather =
        WeatherAdapter::wttr(&config.weather.url, config.weather.ttl(), config.weather.capacity);
    let face = WorkFace::new(config.colors.theme()?);

    face.setup(&mut display)
        .await
        .context("Failed to initialise display")?;

    let result = refresh_loop(&mut display, &mut weather, &face, &config).await;

    display.close().await?;
    result
}

fn connect(display: &DisplayConfig) -> Result<AnyClient> {
    let client = match display {
        DisplayConfig::Http { host } => {
            info!("Using display at http://{}", host);
            HttpClient::new(host).into()
        }
        DisplayConfig::Serial { port } => SerialClient::open(port)
            .with_context(|| format!("Failed to open serial port {}", port))?
            .into(),
    };
    Ok(client)
}

async fn refresh_loop(
    display: &mut AnyClient,
    weather: &mut WeatherAdapter,
    face: &WorkFace,
    config: &Config,
) -> Result<()> {
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
    let mut sigint = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;

    let mut consecutive_errors: u32 = 0;
    let mut last_error_log = std::time::Instant::now();

    loop {
        if let Err(e) = draw_frame(display, weather, face).await {
            if is_fatal(&e) {
                return Err(e);
            }

            consecutive_errors += 1;
            // Only log errors once per minute or on first error
            let elapsed = last_error_log.elapsed();
            if consecutive_errors == 1 || elapsed >= std::time::Duration::from_secs(60) {
                if consecutive_errors > 1 {
                    warn!(
                        "Refresh error (repeated {} times in {:?}): {:#}",
                        consecutive_errors, elapsed, e
                    );
                } else {
                    warn!("Refresh error: {:#}", e);
                }
                last_error_log = std::time::Instant::now();
                consecutive_errors = 0;
            }
        } else {
            consecutive_errors = 0;
        }

        if let Err(e) = display.echo_incoming() {
            warn!("Failed to read device output: {}", e);
        }

        tokio::select! {
            _ = tokio::time::sleep(config.refresh()) => {}
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down");
                return Ok(());
            }
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down");
                return Ok(());
            }
        }
    }
}

/// Whether a refresh error should end the loop instead of being retried.
fn is_fatal(e: &anyhow::Error) -> bool {
    // A condition we cannot display means the table is out of date
    if let Some(WeatherError::UnknownCondition(_)) = e.downcast_ref::<WeatherError>() {
        return true;
    }
    matches!(
        e.downcast_ref::<DisplayError>(),
        Some(
            DisplayError::Http(_)
                | DisplayError::Io(_)
                | DisplayError::Serial(_)
                | DisplayError::PortNotFound(_)
                | DisplayError::Closed
        )
    )
}

async fn draw_frame(
    display: &mut AnyClient,
    weather: &mut WeatherAdapter,
    face: &WorkFace,
) -> Result<()> {
    let snapshot = weather.current().await?;
    face.draw(display, &chrono::Local::now(), &snapshot)
        .await
        .context("Failed to draw frame")?;
    Ok(())
}
