//! TTGO Display Host Library
//!
//! Drives a TTGO T4 display from a host computer. Drawing primitives are
//! issued through a [`DisplayClient`], which either frames each command onto a
//! serial link ([`SerialClient`]) or batches them into a single HTTP POST
//! ([`HttpClient`]).

pub mod client;
pub mod color;
pub mod command;
pub mod error;
pub mod http;
pub mod rotation;
pub mod serial;

pub use client::{AnyClient, DisplayClient};
pub use color::{parse_hex_color, rgb565, rgb565_to_rgb888};
pub use command::{Command, CommandQueue};
pub use error::{Error, Result};
pub use http::HttpClient;
pub use rotation::Rotation;
pub use serial::SerialClient;

/// Serial baud rate expected by the device firmware.
pub const BAUD_RATE: u32 = 115_200;

/// Display dimensions in the native (rotation 0) orientation.
pub const DISPLAY_WIDTH: u16 = 240;
pub const DISPLAY_HEIGHT: u16 = 320;
