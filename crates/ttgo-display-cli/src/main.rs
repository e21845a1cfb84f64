//! TTGO Display Control Tool
//!
//! CLI for sending individual drawing primitives to a TTGO T4 display.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ttgo_display_hw::{
    parse_hex_color, rgb565, AnyClient, DisplayClient, HttpClient, Rotation, SerialClient,
};

#[derive(Parser)]
#[command(name = "ttgoctl")]
#[command(about = "Control tool for TTGO T4 displays")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Display host reachable over HTTP (e.g. 10.0.0.135)
    #[arg(long, global = true, conflicts_with = "serial")]
    host: Option<String>,

    /// Serial port the display is attached to (e.g. /dev/ttyUSB0)
    #[arg(long, global = true)]
    serial: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one or more lines at the cursor
    Println {
        /// Lines of text
        #[arg(required = true)]
        lines: Vec<String>,
    },
    /// Set the text scale multiplier
    TextSize {
        /// Multiplier (1 is the native font size)
        size: u8,
    },
    /// Move the cursor
    Cursor {
        x: i16,
        y: i16,
    },
    /// Turn automatic line wrap on or off
    Wrap {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Set the text color
    TextColor {
        /// Color as #RRGGBB, 0xNNNN or a decimal RGB565 value
        color: String,

        /// Background color, same formats
        #[arg(long)]
        background: Option<String>,
    },
    /// Fill the screen with one color
    Fill {
        /// Color as #RRGGBB, 0xNNNN or a decimal RGB565 value
        color: String,
    },
    /// Rotate the display
    Rotation {
        /// Degrees (0, 90, 180, 270) or portrait, landscape, ...
        rotation: String,
    },
    /// Print the RGB565 value of an RGB color
    Color { r: u8, g: u8, b: u8 },
    /// Cycle through all rotations until interrupted
    Demo {
        /// Milliseconds between frames
        #[arg(long, default_value = "250")]
        delay: u64,
    },
    /// Echo device output from the serial port until interrupted
    Monitor {
        /// Text to print on the display once a second
        #[arg(long)]
        ping: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Commands::Color { r, g, b } = cli.command {
        let color = rgb565(r, g, b);
        println!("0x{:04X} ({})", color, color);
        return Ok(());
    }

    let mut display = connect(cli.host.as_deref(), cli.serial.as_deref())?;
    let result = match cli.command {
        Commands::Demo { delay } => run_demo(&mut display, Duration::from_millis(delay)).await,
        Commands::Monitor { ping } => run_monitor(&mut display, ping.as_deref()).await,
        command => send_command(&mut display, command).await,
    };

    display.close().await?;
    result
}

fn connect(host: Option<&str>, serial: Option<&str>) -> Result<AnyClient> {
    match (host, serial) {
        (Some(host), _) => Ok(HttpClient::new(host).into()),
        (None, Some(port)) => Ok(SerialClient::open(port)
            .with_context(|| format!("Failed to open serial port {}", port))?
            .into()),
        (None, None) => anyhow::bail!("Specify the display with --host or --serial"),
    }
}

/// Parses `#RRGGBB`, `0xNNNN`, or a decimal RGB565 value.
fn parse_color(value: &str) -> Result<u16> {
    let value = value.trim();
    if let Some(hex) = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        return u16::from_str_radix(hex, 16).with_context(|| format!("Invalid color: {}", value));
    }
    if value.starts_with('#') {
        return Ok(parse_hex_color(value)?);
    }
    value
        .parse::<u16>()
        .with_context(|| format!("Invalid color: {}", value))
}

async fn send_command(display: &mut AnyClient, command: Commands) -> Result<()> {
    match command {
        Commands::Println { lines } => {
            for line in &lines {
                display.println(line.as_str()).await?;
            }
        }
        Commands::TextSize { size } => {
            if size == 0 {
                anyhow::bail!("Text size must be at least 1");
            }
            display.set_text_size(size).await?;
        }
        Commands::Cursor { x, y } => display.set_cursor(x, y).await?,
        Commands::Wrap { state } => display.set_text_wrap(matches!(state, Toggle::On)).await?,
        Commands::TextColor { color, background } => {
            let color = parse_color(&color)?;
            let background = background.as_deref().map(parse_color).transpose()?;
            display.set_text_color(color, background).await?;
        }
        Commands::Fill { color } => display.fill_screen(parse_color(&color)?).await?,
        Commands::Rotation { rotation } => {
            let rotation: Rotation = rotation.parse()?;
            display.set_rotation(rotation).await?;
        }
        Commands::Color { .. } | Commands::Demo { .. } | Commands::Monitor { .. } => {
            anyhow::bail!("Not a single display command")
        }
    }

    display.flush().await.context("Failed to send to display")?;
    display.echo_incoming()?;
    Ok(())
}

async fn run_demo(display: &mut AnyClient, delay: Duration) -> Result<()> {
    let red = rgb565(255, 0, 0);
    println!("Running rotation demo, press Ctrl+C to stop");

    loop {
        for rotation in Rotation::ALL {
            display.set_rotation(rotation).await?;
            display.set_cursor(0, 0).await?;
            display.fill_screen(red).await?;
            for i in 0..5 {
                display.println(i.to_string()).await?;
            }
            display.flush().await?;
            display.echo_incoming()?;

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = tokio::signal::ctrl_c() => return Ok(()),
            }
        }
    }
}

async fn run_monitor(display: &mut AnyClient, ping: Option<&str>) -> Result<()> {
    if !matches!(display, AnyClient::Serial(_)) {
        anyhow::bail!("Monitoring device output needs --serial");
    }

    let mut ticks: u32 = 0;
    loop {
        if ticks % 10 == 0 {
            if let Some(text) = ping {
                display.println(text).await?;
            }
        }
        display.echo_incoming()?;
        ticks = ticks.wrapping_add(1);

        tokio::select! {
            _ = tokio::time::sleep(Duration::from_millis(100)) => {}
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}
