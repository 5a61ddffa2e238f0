use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, Lines};
use tracing::{info, instrument, warn};

use crate::blinds::{BlindSession, WriterSink};
use crate::holdem::Game;
use crate::store::StoreError;

pub const PLAYER_PROMPT: &str = "Please enter the number of players: ";
pub const BAD_PLAYER_INPUT_MSG: &str =
    "Bad value received for number of players, please try again with a number";
pub const BAD_WINNER_INPUT_MSG: &str =
    "You entered an incorrect value. Please enter '{Playername} wins'";

const WINS_SUFFIX: &str = " wins";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("bad value for number of players: {0:?}")]
    BadPlayerInput(String),

    #[error("input closed before {0}")]
    InputClosed(&'static str),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Line-based terminal driver for one game
///
/// Prompts, blind alerts and error messages all go to the same output.
/// Blind alerts keep firing until the `Cli` is dropped.
pub struct Cli<R, W> {
    input: Lines<R>,
    out: Arc<WriterSink<W>>,
    game: Arc<dyn Game>,
    blinds: Option<BlindSession>,
}

impl<R, W> Cli<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(input: R, out: Arc<WriterSink<W>>, game: Arc<dyn Game>) -> Self {
        Self {
            input: input.lines(),
            out,
            game,
            blinds: None,
        }
    }

    /// Asks for the number of players, starts the game, then records the winner
    #[instrument(skip(self))]
    pub async fn play_poker(&mut self) -> Result<(), CliError> {
        self.out.write_str(PLAYER_PROMPT).await?;

        let count_input = self.read_line("the number of players").await?;
        let number_of_players: i64 = match count_input.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                warn!(input = %count_input, "Non-numeric number of players");
                self.out.write_str(BAD_PLAYER_INPUT_MSG).await?;
                return Err(CliError::BadPlayerInput(count_input));
            }
        };

        let blinds = self.game.start(number_of_players, self.out.clone()).await;
        self.blinds = Some(blinds);

        let winner_input = self.read_line("the winner").await?;
        if !winner_input.contains(WINS_SUFFIX) {
            warn!(input = %winner_input, "Winner line without ' wins'");
            self.out.write_str(BAD_WINNER_INPUT_MSG).await?;
        }

        let winner = extract_winner(&winner_input);
        self.game.finish(&winner).await?;

        info!(winner = %winner, "Recorded winner from terminal");
        Ok(())
    }

    /// Blind alerts of the current game that have not fired yet
    pub fn pending_blinds(&self) -> usize {
        self.blinds.as_ref().map_or(0, BlindSession::pending_count)
    }

    async fn read_line(&mut self, expecting: &'static str) -> Result<String, CliError> {
        self.input
            .next_line()
            .await?
            .ok_or(CliError::InputClosed(expecting))
    }
}

/// Strips the first " wins" from the line, leaving the winner's name
pub fn extract_winner(line: &str) -> String {
    line.replacen(WINS_SUFFIX, "", 1)
}
