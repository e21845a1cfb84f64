//! Display communication via the device's HTTP endpoint.

use crate::client::DisplayClient;
use crate::command::{Command, CommandQueue};
use crate::Result;
use tracing::{debug, warn};

use super::{COMMAND_FIELD, COMMAND_PATH};

/// Display controller reachable over HTTP.
///
/// Primitives only append to an in-memory queue. [`DisplayClient::flush`]
/// posts the whole queue as one request and always leaves the queue empty,
/// whether or not the device accepted it.
pub struct HttpClient {
    http: reqwest::Client,
    endpoint: String,
    queue: CommandQueue,
}

impl HttpClient {
    /// Creates a client for the device at `host` (a hostname or `host:port`).
    pub fn new(host: &str) -> Self {
        Self::with_client(reqwest::Client::new(), host)
    }

    /// Creates a client that reuses an existing HTTP session.
    pub fn with_client(http: reqwest::Client, host: &str) -> Self {
        Self {
            http,
            endpoint: format!("http://{}{}", host, COMMAND_PATH),
            queue: CommandQueue::new(),
        }
    }

    /// Returns the URL batches are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the commands waiting for the next flush.
    pub fn queue(&self) -> &CommandQueue {
        &self.queue
    }

    /// Posts the queued batch.
    pub async fn send_commands(&mut self) -> Result<()> {
        let batch = self.queue.take();
        let body = batch.to_batch_json()?;

        debug!("Posting {} commands to {}", batch.len(), self.endpoint);
        let response = self
            .http
            .post(&self.endpoint)
            .form(&[(COMMAND_FIELD, body)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // The batch is dropped either way
            warn!(
                "Display at {} rejected batch of {} commands: {}",
                self.endpoint,
                batch.len(),
                status
            );
        }
        Ok(())
    }
}

impl DisplayClient for HttpClient {
    async fn issue(&mut self, command: Command) -> Result<()> {
        self.queue.push(command);
        Ok(())
    }

    async fn flush(&mut self) -> Result<()> {
        self.send_commands().await
    }
}
