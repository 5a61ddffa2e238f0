#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use poker_league::{
    AlertSink, BlindSession, CloseReason, Game, SocketError, SocketWrapper, StoreError,
};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Records every start and finish; optionally pushes one canned alert on start
#[derive(Default)]
pub struct GameSpy {
    blind_alert: String,
    start_calls: Mutex<Vec<i64>>,
    finish_calls: Mutex<Vec<String>>,
}

impl GameSpy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blind_alert(blind_alert: &str) -> Self {
        Self {
            blind_alert: blind_alert.to_string(),
            ..Self::default()
        }
    }

    pub fn start_calls(&self) -> Vec<i64> {
        self.start_calls.lock().unwrap().clone()
    }

    pub fn finish_calls(&self) -> Vec<String> {
        self.finish_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Game for GameSpy {
    async fn start(&self, number_of_players: i64, alerts: Arc<dyn AlertSink>) -> BlindSession {
        self.start_calls.lock().unwrap().push(number_of_players);
        if !self.blind_alert.is_empty() {
            let _ = alerts.send_alert(self.blind_alert.clone()).await;
        }
        BlindSession::new()
    }

    async fn finish(&self, winner: &str) -> Result<(), StoreError> {
        self.finish_calls.lock().unwrap().push(winner.to_string());
        Ok(())
    }
}

/// What the server did to the client side of a socket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerFrame {
    Text(String),
    Close(Option<CloseReason>),
}

/// Socket backed by two channels, standing in for a real browser connection
pub struct ChannelSocket {
    inbound: mpsc::UnboundedReceiver<String>,
    outbound: mpsc::UnboundedSender<ServerFrame>,
}

pub struct SocketClient {
    to_server: Option<mpsc::UnboundedSender<String>>,
    from_server: mpsc::UnboundedReceiver<ServerFrame>,
}

pub fn channel_socket() -> (ChannelSocket, SocketClient) {
    let (to_server, inbound) = mpsc::unbounded_channel();
    let (outbound, from_server) = mpsc::unbounded_channel();
    (
        ChannelSocket { inbound, outbound },
        SocketClient {
            to_server: Some(to_server),
            from_server,
        },
    )
}

#[async_trait]
impl SocketWrapper for ChannelSocket {
    async fn send_message(&mut self, message: String) -> Result<(), SocketError> {
        self.outbound
            .send(ServerFrame::Text(message))
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }

    async fn receive_message(&mut self) -> Result<Option<String>, SocketError> {
        Ok(self.inbound.recv().await)
    }

    async fn close(&mut self, reason: Option<CloseReason>) -> Result<(), SocketError> {
        self.outbound
            .send(ServerFrame::Close(reason))
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }
}

impl SocketClient {
    pub fn send(&self, frame: &str) {
        self.to_server
            .as_ref()
            .expect("client already disconnected")
            .send(frame.to_string())
            .expect("server stopped reading");
    }

    /// Drops the sending half, which the server sees as the client going away
    pub fn disconnect(&mut self) {
        self.to_server = None;
    }

    pub async fn next_frame(&mut self) -> ServerFrame {
        self.from_server
            .recv()
            .await
            .expect("server dropped the socket")
    }

    /// Everything the server has sent so far, without waiting
    pub fn drain(&mut self) -> Vec<ServerFrame> {
        let mut frames = Vec::new();
        while let Ok(frame) = self.from_server.try_recv() {
            frames.push(frame);
        }
        frames
    }
}
