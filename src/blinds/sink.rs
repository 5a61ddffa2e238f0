use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, Mutex};

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("alert destination is closed")]
    Closed,

    #[error("failed to write alert: {0}")]
    Write(#[from] std::io::Error),
}

/// Destination for fired blind alerts (a console, a websocket, ...)
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn send_alert(&self, message: String) -> Result<(), AlertError>;
}

/// Outbound channel of a websocket connection
#[async_trait]
impl AlertSink for mpsc::UnboundedSender<String> {
    async fn send_alert(&self, message: String) -> Result<(), AlertError> {
        self.send(message).map_err(|_| AlertError::Closed)
    }
}

/// Shares one writer between prompts and alerts so their output never interleaves mid-line
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W> WriterSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub async fn write_str(&self, text: &str) -> std::io::Result<()> {
        let mut writer = self.writer.lock().await;
        writer.write_all(text.as_bytes()).await?;
        writer.flush().await
    }
}

impl<W: Clone> WriterSink<W> {
    /// Copy of the underlying writer, e.g. the bytes written so far to a `Vec<u8>`
    pub async fn contents(&self) -> W {
        self.writer.lock().await.clone()
    }
}

#[async_trait]
impl<W> AlertSink for WriterSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send_alert(&self, message: String) -> Result<(), AlertError> {
        self.write_str(&message).await?;
        Ok(())
    }
}
