use async_trait::async_trait;
use axum::extract::ws::{CloseFrame, Message, WebSocket};
use futures::stream::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use strum_macros::Display;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::messages::{parse_player_count, ProtocolError, PROTOCOL_ERROR_CLOSE_CODE};
use crate::blinds::BlindSession;
use crate::holdem::Game;

/// Simple WebSocket abstraction - all we care about is send/receive
#[async_trait]
pub trait SocketWrapper: Send {
    /// Send a text message to the client
    async fn send_message(&mut self, message: String) -> Result<(), SocketError>;

    /// Receive the next text message from the client (None if connection closed)
    async fn receive_message(&mut self) -> Result<Option<String>, SocketError>;

    /// Close the connection, optionally telling the client why
    async fn close(&mut self, reason: Option<CloseReason>) -> Result<(), SocketError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseReason {
    pub code: u16,
    pub reason: String,
}

impl CloseReason {
    pub fn protocol_error(error: &ProtocolError) -> Self {
        Self {
            code: PROTOCOL_ERROR_CLOSE_CODE,
            reason: error.close_reason().to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SocketError {
    #[error("send failed: {0}")]
    SendFailed(String),

    #[error("receive failed: {0}")]
    ReceiveFailed(String),

    #[error("no player count received within {0:?}")]
    ReadTimeout(Duration),
}

/// Direct implementation on axum's WebSocket
#[async_trait]
impl SocketWrapper for WebSocket {
    async fn send_message(&mut self, message: String) -> Result<(), SocketError> {
        self.send(Message::Text(message))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }

    async fn receive_message(&mut self) -> Result<Option<String>, SocketError> {
        loop {
            match self.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Some(text)),
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue, // Ignore binary/ping/pong
                Some(Err(e)) => return Err(SocketError::ReceiveFailed(e.to_string())),
            }
        }
    }

    async fn close(&mut self, reason: Option<CloseReason>) -> Result<(), SocketError> {
        let frame = reason.map(|r| CloseFrame {
            code: r.code,
            reason: r.reason.into(),
        });
        self.send(Message::Close(frame))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }
}

/// Where a connection is in the count-then-winner exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ProtocolPhase {
    AwaitingPlayerCount,
    AwaitingWinner,
    Finished,
}

/// One game played over a WebSocket
///
/// The first text frame is the number of players and starts the game, the
/// second names the winner and finishes it. Blind alerts are pushed through
/// the outbound channel and written to the socket as they fire, until the
/// client disconnects. The connection owns its game's blind session, so
/// alerts still pending at disconnect are cancelled with it.
pub struct GameConnection {
    pub connection_id: Uuid,
    socket: Box<dyn SocketWrapper>,
    game: Arc<dyn Game>,
    alerts: mpsc::UnboundedSender<String>,
    outbound_receiver: mpsc::UnboundedReceiver<String>,
    read_timeout: Option<Duration>,
    phase: ProtocolPhase,
    blinds: Option<BlindSession>,
}

impl GameConnection {
    pub fn new(connection_id: Uuid, socket: Box<dyn SocketWrapper>, game: Arc<dyn Game>) -> Self {
        let (alerts, outbound_receiver) = mpsc::unbounded_channel::<String>();
        Self {
            connection_id,
            socket,
            game,
            alerts,
            outbound_receiver,
            read_timeout: None,
            phase: ProtocolPhase::AwaitingPlayerCount,
            blinds: None,
        }
    }

    /// How long a new client has to send the player count. Once the game has
    /// started the connection waits for the winner without a deadline.
    pub fn with_read_timeout(mut self, read_timeout: Option<Duration>) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Run the connection - handles both sending and receiving until disconnect
    pub async fn run(mut self) -> Result<(), SocketError> {
        let result = self.serve().await;

        if let Some(mut blinds) = self.blinds.take() {
            let cancelled = blinds.cancel();
            debug!(connection_id = %self.connection_id, cancelled, "Game connection ended");
        }
        result
    }

    async fn serve(&mut self) -> Result<(), SocketError> {
        // Fixed when the connection opens, so outbound traffic never extends it
        let count_deadline = self
            .read_timeout
            .map(|limit| (Instant::now() + limit, limit));

        loop {
            let deadline = match self.phase {
                ProtocolPhase::AwaitingPlayerCount => count_deadline,
                ProtocolPhase::AwaitingWinner | ProtocolPhase::Finished => None,
            };

            tokio::select! {
                // Alerts that are already due go out before the next client frame is read
                biased;

                Some(message) = self.outbound_receiver.recv() => {
                    self.socket.send_message(message).await?
                }

                msg = receive_before(&mut self.socket, deadline) => {
                    match msg {
                        Ok(Some(frame)) => match self.handle_frame(frame).await {
                            Ok(Some(reply)) => self.socket.send_message(reply).await?,
                            Ok(None) => {}
                            Err(e) => {
                                self.reject(e).await;
                                return Ok(());
                            }
                        },
                        Ok(None) => break, // Client disconnected
                        Err(e) => {
                            let _ = self.socket.close(None).await;
                            return Err(e);
                        }
                    }
                }
            }
        }

        // Clean disconnect
        let _ = self.socket.close(None).await;
        Ok(())
    }

    /// Applies one client frame, returning an optional reply for the client
    async fn handle_frame(&mut self, frame: String) -> Result<Option<String>, ProtocolError> {
        debug!(
            connection_id = %self.connection_id,
            phase = %self.phase,
            frame = %frame,
            "Received game frame"
        );

        match self.phase {
            ProtocolPhase::AwaitingPlayerCount => {
                let number_of_players = parse_player_count(&frame)?;
                let blinds = self
                    .game
                    .start(number_of_players, Arc::new(self.alerts.clone()))
                    .await;
                self.blinds = Some(blinds);
                self.phase = ProtocolPhase::AwaitingWinner;
                Ok(None)
            }
            ProtocolPhase::AwaitingWinner => {
                self.phase = ProtocolPhase::Finished;
                match self.game.finish(&frame).await {
                    Ok(()) => {
                        info!(connection_id = %self.connection_id, winner = %frame, "Game finished");
                        Ok(None)
                    }
                    Err(e) => {
                        warn!(
                            connection_id = %self.connection_id,
                            winner = %frame,
                            error = %e,
                            "Failed to record winner"
                        );
                        Ok(Some(format!("Failed to record win for {}: {}", frame, e)))
                    }
                }
            }
            ProtocolPhase::Finished => {
                debug!(connection_id = %self.connection_id, "Ignoring frame after game finished");
                Ok(None)
            }
        }
    }

    async fn reject(&mut self, error: ProtocolError) {
        warn!(
            connection_id = %self.connection_id,
            phase = %self.phase,
            error = %error,
            "Closing connection on protocol error"
        );

        if let Err(e) = self
            .socket
            .send_message(format!("protocol error: {}", error))
            .await
        {
            debug!(connection_id = %self.connection_id, error = %e, "Could not report protocol error");
        }
        let _ = self
            .socket
            .close(Some(CloseReason::protocol_error(&error)))
            .await;
    }
}

async fn receive_before(
    socket: &mut Box<dyn SocketWrapper>,
    deadline: Option<(Instant, Duration)>,
) -> Result<Option<String>, SocketError> {
    match deadline {
        Some((at, limit)) => tokio::time::timeout_at(at, socket.receive_message())
            .await
            .map_err(|_| SocketError::ReadTimeout(limit))?,
        None => socket.receive_message().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blinds::{AlertSink, BlindAlerter, TokioBlindAlerter};
    use crate::shared::test_utils::GameSpy;
    use crate::store::StoreError;
    use std::sync::Mutex;
    use rstest::rstest;

    /// Socket fed from a channel; dropping the sender is a client disconnect
    struct FakeSocket {
        inbound: mpsc::UnboundedReceiver<String>,
        sent: Arc<Mutex<Vec<String>>>,
        closed_with: Arc<Mutex<Vec<Option<CloseReason>>>>,
    }

    struct FakeClient {
        to_server: mpsc::UnboundedSender<String>,
        sent: Arc<Mutex<Vec<String>>>,
        closed_with: Arc<Mutex<Vec<Option<CloseReason>>>>,
    }

    fn fake_socket() -> (FakeSocket, FakeClient) {
        let (to_server, inbound) = mpsc::unbounded_channel();
        let sent = Arc::new(Mutex::new(Vec::new()));
        let closed_with = Arc::new(Mutex::new(Vec::new()));
        (
            FakeSocket {
                inbound,
                sent: sent.clone(),
                closed_with: closed_with.clone(),
            },
            FakeClient {
                to_server,
                sent,
                closed_with,
            },
        )
    }

    #[async_trait]
    impl SocketWrapper for FakeSocket {
        async fn send_message(&mut self, message: String) -> Result<(), SocketError> {
            self.sent.lock().unwrap().push(message);
            Ok(())
        }

        async fn receive_message(&mut self) -> Result<Option<String>, SocketError> {
            Ok(self.inbound.recv().await)
        }

        async fn close(&mut self, reason: Option<CloseReason>) -> Result<(), SocketError> {
            self.closed_with.lock().unwrap().push(reason);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_count_then_winner_drives_game() {
        let game = Arc::new(GameSpy::with_blind_alert("Blind is now 100\n"));
        let (socket, client) = fake_socket();

        client.to_server.send("3".to_string()).unwrap();
        client.to_server.send("Chris".to_string()).unwrap();
        drop(client.to_server);

        GameConnection::new(Uuid::new_v4(), Box::new(socket), game.clone())
            .run()
            .await
            .unwrap();

        assert_eq!(game.start_calls(), vec![3]);
        assert_eq!(game.finish_calls(), vec!["Chris".to_string()]);
        assert_eq!(*client.sent.lock().unwrap(), vec!["Blind is now 100\n"]);
        assert_eq!(*client.closed_with.lock().unwrap(), vec![None]);
    }

    #[tokio::test]
    async fn test_frames_after_finish_are_ignored() {
        let game = Arc::new(GameSpy::new());
        let (socket, client) = fake_socket();

        for frame in ["2", "Ruth", "Ruth", "5"] {
            client.to_server.send(frame.to_string()).unwrap();
        }
        drop(client.to_server);

        GameConnection::new(Uuid::new_v4(), Box::new(socket), game.clone())
            .run()
            .await
            .unwrap();

        assert_eq!(game.start_calls(), vec![2]);
        assert_eq!(game.finish_calls(), vec!["Ruth".to_string()]);
    }

    #[tokio::test]
    async fn test_bad_player_count_closes_with_protocol_error() {
        let game = Arc::new(GameSpy::new());
        let (socket, client) = fake_socket();

        client.to_server.send("lots".to_string()).unwrap();

        GameConnection::new(Uuid::new_v4(), Box::new(socket), game.clone())
            .run()
            .await
            .unwrap();

        assert!(game.start_calls().is_empty());
        assert!(game.finish_calls().is_empty());

        let sent = client.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with("protocol error:"));

        assert_eq!(
            *client.closed_with.lock().unwrap(),
            vec![Some(CloseReason {
                code: PROTOCOL_ERROR_CLOSE_CODE,
                reason: "bad player count".to_string(),
            })]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_timeout_closes_idle_connection() {
        let game = Arc::new(GameSpy::new());
        let (socket, client) = fake_socket();

        let result = GameConnection::new(Uuid::new_v4(), Box::new(socket), game.clone())
            .with_read_timeout(Some(Duration::from_secs(30)))
            .run()
            .await;

        assert!(matches!(result, Err(SocketError::ReadTimeout(_))));
        assert!(game.start_calls().is_empty());
        assert_eq!(*client.closed_with.lock().unwrap(), vec![None]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_timeout_does_not_cut_off_a_running_game() {
        let game = Arc::new(GameSpy::with_blind_alert("Blind is now 100\n"));
        let (socket, client) = fake_socket();

        let connection = tokio::spawn(
            GameConnection::new(Uuid::new_v4(), Box::new(socket), game.clone())
                .with_read_timeout(Some(Duration::from_secs(30)))
                .run(),
        );

        client.to_server.send("5".to_string()).unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;
        client.to_server.send("Chris".to_string()).unwrap();
        drop(client.to_server);

        connection.await.unwrap().unwrap();
        assert_eq!(game.finish_calls(), vec!["Chris".to_string()]);
        assert_eq!(*client.sent.lock().unwrap(), vec!["Blind is now 100\n"]);
        assert_eq!(*client.closed_with.lock().unwrap(), vec![None]);
    }

    /// Schedules its blinds onto a sink the test can watch after the socket is gone
    struct WatchedBlindsGame {
        alerter: TokioBlindAlerter,
        watcher: mpsc::UnboundedSender<String>,
    }

    #[async_trait]
    impl Game for WatchedBlindsGame {
        async fn start(&self, _number_of_players: i64, _alerts: Arc<dyn AlertSink>) -> BlindSession {
            [self.alerter.schedule_alert_at(
                Duration::from_secs(60),
                200,
                Arc::new(self.watcher.clone()),
            )]
            .into_iter()
            .collect()
        }

        async fn finish(&self, _winner: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_disconnect_cancels_pending_blinds() {
        let (watcher, mut watched) = mpsc::unbounded_channel();
        let game = Arc::new(WatchedBlindsGame {
            alerter: TokioBlindAlerter::new(),
            watcher,
        });
        let (socket, client) = fake_socket();

        client.to_server.send("4".to_string()).unwrap();
        drop(client.to_server);

        GameConnection::new(Uuid::new_v4(), Box::new(socket), game.clone())
            .run()
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert!(watched.try_recv().is_err());
    }

    #[rstest]
    #[case(ProtocolPhase::AwaitingPlayerCount, "awaiting_player_count")]
    #[case(ProtocolPhase::AwaitingWinner, "awaiting_winner")]
    #[case(ProtocolPhase::Finished, "finished")]
    fn test_protocol_phase_log_names(#[case] phase: ProtocolPhase, #[case] want: &str) {
        assert_eq!(phase.to_string(), want);
    }
}
