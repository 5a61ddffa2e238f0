use async_trait::async_trait;
use std::io::SeekFrom;
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use super::{tape::Tape, PlayerStore, StoreError};
use crate::league::League;

/// Player store persisted as a JSON array in a single file
///
/// The league is held in memory and the whole file is rewritten after every
/// recorded win. One mutex guards both, so a win is recorded and persisted
/// before any other request sees the league.
pub struct FileSystemPlayerStore {
    state: Mutex<FileState>,
}

struct FileState {
    tape: Tape,
    league: League,
}

impl FileSystemPlayerStore {
    /// Opens (creating if missing) the db file at `path` and loads the league from it
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true);
        #[cfg(unix)]
        options.mode(0o600);

        let file = options.open(path.as_ref()).await.map_err(StoreError::Open)?;
        Self::new(file).await
    }

    /// Loads the league from an already opened read/write file.
    /// A zero-length file is initialized to an empty league.
    pub async fn new(mut file: File) -> Result<Self, StoreError> {
        initialize_db_file(&mut file).await?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .await
            .map_err(StoreError::Read)?;
        let league = League::from_json(&contents).map_err(StoreError::Decode)?;

        info!(players = league.len(), "Loaded league from player db file");

        Ok(Self {
            state: Mutex::new(FileState {
                tape: Tape::new(file),
                league,
            }),
        })
    }

    /// Flushes and syncs the backing file
    pub async fn close(self) -> Result<(), StoreError> {
        self.state.into_inner().tape.close().await
    }
}

async fn initialize_db_file(file: &mut File) -> Result<(), StoreError> {
    file.seek(SeekFrom::Start(0))
        .await
        .map_err(StoreError::Seek)?;

    let metadata = file.metadata().await.map_err(StoreError::Stat)?;

    if metadata.len() == 0 {
        debug!("Player db file is empty, writing empty league");
        file.write_all(b"[]").await.map_err(StoreError::Write)?;
        file.flush().await.map_err(StoreError::Write)?;
        file.seek(SeekFrom::Start(0))
            .await
            .map_err(StoreError::Seek)?;
    }

    Ok(())
}

#[async_trait]
impl PlayerStore for FileSystemPlayerStore {
    async fn get_player_score(&self, name: &str) -> u32 {
        self.state.lock().await.league.score_of(name)
    }

    #[instrument(skip(self))]
    async fn record_win(&self, name: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;

        // The in-memory league keeps the win even if persisting fails below
        let wins = state.league.record_win(name);
        let snapshot = state.league.to_json().map_err(StoreError::Encode)?;
        state.tape.rewrite(&snapshot).await?;

        debug!(player = %name, wins, bytes = snapshot.len(), "Recorded win and rewrote player db file");
        Ok(())
    }

    async fn get_league(&self) -> League {
        let mut state = self.state.lock().await;
        state.league.sort_by_wins();
        state.league.clone()
    }
}
