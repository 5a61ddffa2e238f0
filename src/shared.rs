use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::error;

use crate::holdem::Game;
use crate::store::{PlayerStore, StoreError};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PlayerStore>,
    pub game: Arc<dyn Game>,
    pub ws_read_timeout: Option<Duration>,
}

impl AppState {
    pub fn new(store: Arc<dyn PlayerStore>, game: Arc<dyn Game>) -> Self {
        Self {
            store,
            game,
            ws_read_timeout: None,
        }
    }

    pub fn with_ws_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.ws_read_timeout = timeout;
        self
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Store(e) => {
                error!(error = %e, "Player store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Store error: {}", e),
                )
            }
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
