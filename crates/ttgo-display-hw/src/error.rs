//! Error types for the TTGO display library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the display.
#[derive(Error, Debug)]
pub enum Error {
    /// Serial port path does not exist or could not be opened.
    #[error("Serial port not found at {0}")]
    PortNotFound(String),

    /// Serial port configuration or open error.
    #[error("Serial port error: {0}")]
    Serial(#[from] tokio_serial::Error),

    /// Serial I/O error.
    #[error("Serial I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request could not be completed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Command payload could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bytes on the serial link were not a valid frame.
    #[error("Invalid serial frame")]
    Frame,

    /// The client was closed and can no longer be used.
    #[error("Display connection is closed")]
    Closed,

    /// Invalid rotation value.
    #[error("Invalid rotation: {0}")]
    InvalidRotation(String),

    /// Invalid color string.
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}
