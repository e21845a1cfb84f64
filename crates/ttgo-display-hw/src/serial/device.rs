//! Display communication via serial port.

use crate::client::DisplayClient;
use crate::command::Command;
use crate::{Error, Result, BAUD_RATE};
use futures::FutureExt;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio_serial::{DataBits, Parity, SerialPortBuilderExt, SerialStream, StopBits};
use tracing::{debug, info};

use super::frame::build_frame;

/// Serial read timeout.
const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Size of each non-blocking read when draining device output.
const READ_CHUNK: usize = 256;

/// Display controller on a serial link.
///
/// Every primitive is written as one frame as soon as it is issued; nothing
/// is batched.
pub struct SerialClient<S = SerialStream> {
    port: Option<S>,
    name: String,
}

impl SerialClient<SerialStream> {
    /// Opens the serial port at 115200-8-N-1.
    pub fn open(port_path: &str) -> Result<Self> {
        let port = tokio_serial::new(port_path, BAUD_RATE)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .timeout(READ_TIMEOUT)
            .open_native_async()
            .map_err(|e| {
                if let tokio_serial::ErrorKind::Io(kind) = &e.kind {
                    if (*kind == std::io::ErrorKind::NotFound
                        || *kind == std::io::ErrorKind::PermissionDenied)
                        && !std::path::Path::new(port_path).exists()
                    {
                        return Error::PortNotFound(port_path.to_string());
                    }
                }
                Error::Serial(e)
            })?;

        info!("Serial display opened at {} ({} baud)", port_path, BAUD_RATE);
        Ok(Self::from_stream(port, port_path))
    }
}

impl<S> SerialClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wraps an already open byte stream.
    pub fn from_stream(stream: S, name: impl Into<String>) -> Self {
        Self {
            port: Some(stream),
            name: name.into(),
        }
    }

    fn port(&mut self) -> Result<&mut S> {
        self.port.as_mut().ok_or(Error::Closed)
    }

    /// Encodes one command and writes its frame.
    pub async fn send(&mut self, command: &Command) -> Result<()> {
        let frame = build_frame(command)?;
        let port = self.port()?;

        port.write_all(&frame).await?;
        port.flush().await?;

        debug!(
            "Sent {} (id {}) as {}-byte frame: {:?}",
            command.name(),
            command.id(),
            frame.len(),
            command.serial_args()
        );
        Ok(())
    }

    /// Reads whatever the device has already sent, without waiting.
    pub fn drain_incoming(&mut self) -> Result<Vec<u8>> {
        let port = self.port()?;
        let mut received = Vec::new();
        let mut chunk = [0u8; READ_CHUNK];

        loop {
            match port.read(&mut chunk).now_or_never() {
                None | Some(Ok(0)) => break,
                Some(Ok(n)) => received.extend_from_slice(&chunk[..n]),
                Some(Err(e))
                    if matches!(
                        e.kind(),
                        std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                    ) =>
                {
                    break
                }
                Some(Err(e)) => return Err(e.into()),
            }
        }

        if !received.is_empty() {
            debug!("Drained {} bytes from {}", received.len(), self.name);
        }
        Ok(received)
    }

    /// Forwards buffered device output to `out`, one char per byte.
    pub fn echo_incoming<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let received = self.drain_incoming()?;
        if received.is_empty() {
            return Ok(());
        }
        let text: String = received.iter().map(|&b| b as char).collect();
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Closes the port. Closing twice is a no-op.
    pub async fn close(&mut self) -> Result<()> {
        if let Some(mut port) = self.port.take() {
            port.shutdown().await?;
            info!("Serial display {} closed", self.name);
        }
        Ok(())
    }

    /// Returns true once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.port.is_none()
    }

    /// Returns the port name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<S> DisplayClient for SerialClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    async fn issue(&mut self, command: Command) -> Result<()> {
        self.send(&command).await
    }

    async fn flush(&mut self) -> Result<()> {
        // Frames are already on the wire
        self.port()?.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::Rotation;
    use crate::serial::frame::{decode_frame, FRAME_DELIMITER};
    use serde_json::Value;
    use tokio::io::{duplex, DuplexStream};

    fn client() -> (SerialClient<DuplexStream>, DuplexStream) {
        let (host, device) = duplex(4096);
        (SerialClient::from_stream(host, "test"), device)
    }

    async fn read_frames(device: &mut DuplexStream) -> Vec<Value> {
        let mut bytes = Vec::new();
        device.read_to_end(&mut bytes).await.unwrap();
        bytes
            .split_inclusive(|&b| b == FRAME_DELIMITER)
            .map(|frame| serde_json::from_slice(&decode_frame(frame).unwrap()).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_one_frame_per_call() {
        let (mut client, mut device) = client();

        client.println("hello").await.unwrap();
        client.set_text_size(2).await.unwrap();
        client.set_cursor(5, 27).await.unwrap();
        client.set_text_wrap(true).await.unwrap();
        client.set_text_color(0xFFFF, Some(0x0000)).await.unwrap();
        client.fill_screen(0xF800).await.unwrap();
        client.set_rotation(Rotation::Deg270).await.unwrap();
        client.close().await.unwrap();

        let frames = read_frames(&mut device).await;
        assert_eq!(frames.len(), 7);
        for (expected_id, frame) in frames.iter().enumerate() {
            let commands = frame["commands"].as_array().unwrap();
            assert_eq!(commands.len(), 1);
            assert_eq!(commands[0]["command"], expected_id as u64);
        }
        assert_eq!(frames[0]["commands"][0]["args"]["text"], "hello");
        assert_eq!(frames[6]["commands"][0]["args"]["orientation"], 3);
    }

    #[tokio::test]
    async fn test_flush_sends_nothing_extra() {
        let (mut client, mut device) = client();

        client.fill_screen(0).await.unwrap();
        client.flush().await.unwrap();
        client.flush().await.unwrap();
        client.close().await.unwrap();

        assert_eq!(read_frames(&mut device).await.len(), 1);
    }

    #[tokio::test]
    async fn test_drain_reads_only_buffered_bytes() {
        let (mut client, mut device) = client();

        assert!(client.drain_incoming().unwrap().is_empty());

        device.write_all(b"boot ok\r\n").await.unwrap();
        assert_eq!(client.drain_incoming().unwrap(), b"boot ok\r\n");
        assert!(client.drain_incoming().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_echo_forwards_bytes_as_chars() {
        let (mut client, mut device) = client();

        device.write_all(&[b'o', b'k', 0xB0]).await.unwrap();
        let mut out = Vec::new();
        client.echo_incoming(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ok\u{B0}");
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let (mut client, _device) = client();

        client.close().await.unwrap();
        client.close().await.unwrap();
        assert!(client.is_closed());

        assert!(matches!(client.println("late").await, Err(Error::Closed)));
        assert!(matches!(client.drain_incoming(), Err(Error::Closed)));
        assert!(matches!(client.flush().await, Err(Error::Closed)));
    }

    #[tokio::test]
    async fn test_write_failure_propagates() {
        let (mut client, device) = client();
        drop(device);

        assert!(matches!(client.println("x").await, Err(Error::Io(_))));
    }

    #[test]
    #[ignore]
    fn test_port_open() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let _guard = runtime.enter();
        assert!(SerialClient::open("/dev/ttyUSB0").is_ok());
    }

    #[tokio::test]
    async fn test_missing_port_fails_to_open() {
        let result = SerialClient::open("/dev/does-not-exist-ttgo");
        assert!(result.is_err());
    }
}
