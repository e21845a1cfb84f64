//! Transport-independent display client.

use crate::command::Command;
use crate::http::HttpClient;
use crate::rotation::Rotation;
use crate::serial::SerialClient;
use crate::Result;

/// A connection to a display that accepts drawing primitives.
///
/// Implementations decide when commands reach the device: the serial client
/// writes each one immediately, the HTTP client holds them until [`flush`].
///
/// [`flush`]: DisplayClient::flush
#[allow(async_fn_in_trait)]
pub trait DisplayClient {
    /// Hands one command to the transport.
    async fn issue(&mut self, command: Command) -> Result<()>;

    /// Delivers anything still pending to the device.
    async fn flush(&mut self) -> Result<()>;

    async fn println(&mut self, text: impl Into<String>) -> Result<()> {
        self.issue(Command::Println { text: text.into() }).await
    }

    async fn set_text_size(&mut self, size: u8) -> Result<()> {
        self.issue(Command::SetTextSize { size }).await
    }

    async fn set_cursor(&mut self, x: i16, y: i16) -> Result<()> {
        self.issue(Command::SetCursor { x, y }).await
    }

    async fn set_text_wrap(&mut self, wrap: bool) -> Result<()> {
        self.issue(Command::SetTextWrap { wrap }).await
    }

    async fn set_text_color(&mut self, color: u16, background: Option<u16>) -> Result<()> {
        self.issue(Command::SetTextColor { color, background }).await
    }

    async fn fill_screen(&mut self, color: u16) -> Result<()> {
        self.issue(Command::FillScreen { color }).await
    }

    async fn set_rotation(&mut self, rotation: Rotation) -> Result<()> {
        self.issue(Command::SetRotation { rotation }).await
    }
}

/// A display client whose transport is chosen at runtime.
pub enum AnyClient {
    Serial(SerialClient),
    Http(HttpClient),
}

impl AnyClient {
    /// Echoes buffered device output to stdout. Only the serial link carries
    /// device output; on HTTP this does nothing.
    pub fn echo_incoming(&mut self) -> Result<()> {
        match self {
            AnyClient::Serial(client) => client.echo_incoming(&mut std::io::stdout()),
            AnyClient::Http(_) => Ok(()),
        }
    }

    /// Releases the underlying connection.
    pub async fn close(&mut self) -> Result<()> {
        match self {
            AnyClient::Serial(client) => client.close().await,
            AnyClient::Http(_) => Ok(()),
        }
    }
}

impl DisplayClient for AnyClient {
    async fn issue(&mut self, command: Command) -> Result<()> {
        match self {
            AnyClient::Serial(client) => client.issue(command).await,
            AnyClient::Http(client) => client.issue(command).await,
        }
    }

    async fn flush(&mut self) -> Result<()> {
        match self {
            AnyClient::Serial(client) => client.flush().await,
            AnyClient::Http(client) => client.flush().await,
        }
    }
}

impl From<SerialClient> for AnyClient {
    fn from(client: SerialClient) -> Self {
        AnyClient::Serial(client)
    }
}

impl From<HttpClient> for AnyClient {
    fn from(client: HttpClient) -> Self {
        AnyClient::Http(client)
    }
}
