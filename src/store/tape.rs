use std::io::SeekFrom;
use tokio::fs::File;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};

use super::StoreError;

/// Backing file that is rewritten from offset zero on every write
///
/// There is no temp-file-and-rename step, so a crash between truncate and
/// write leaves an empty or partial file behind.
pub struct Tape {
    file: File,
}

impl Tape {
    pub fn new(file: File) -> Self {
        Self { file }
    }

    /// Replaces the whole file content with `bytes`
    pub async fn rewrite(&mut self, bytes: &[u8]) -> Result<(), StoreError> {
        self.file.set_len(0).await.map_err(StoreError::Write)?;
        self.file
            .seek(SeekFrom::Start(0))
            .await
            .map_err(StoreError::Seek)?;
        self.file.write_all(bytes).await.map_err(StoreError::Write)?;
        self.file.flush().await.map_err(StoreError::Write)
    }

    pub async fn close(mut self) -> Result<(), StoreError> {
        self.file.flush().await.map_err(StoreError::Close)?;
        self.file.sync_all().await.map_err(StoreError::Close)
    }
}
