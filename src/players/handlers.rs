use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use tracing::{info, instrument};

use crate::league::Player;
use crate::shared::{AppError, AppState};

const GAME_PAGE: &str = include_str!("../../assets/game.html");

/// HTTP handler for reading a player's score
///
/// GET /players/{name}
/// Returns the score as plain text. A score of zero is reported as 404,
/// whether or not the player has ever been recorded.
#[instrument(name = "get_score", skip(state))]
pub async fn get_score(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> (StatusCode, String) {
    let score = state.store.get_player_score(&name).await;

    if score == 0 {
        info!(player = %name, "No wins recorded for player");
        return (StatusCode::NOT_FOUND, score.to_string());
    }

    (StatusCode::OK, score.to_string())
}

/// HTTP handler for recording a win
///
/// POST /players/{name}
/// Returns 202 once the win is persisted
#[instrument(name = "record_win", skip(state))]
pub async fn record_win(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.record_win(&name).await?;

    info!(player = %name, "Win recorded");
    Ok(StatusCode::ACCEPTED)
}

/// HTTP handler for the league table
///
/// GET /league
/// Returns every player as JSON, most wins first
#[instrument(name = "get_league", skip(state))]
pub async fn get_league(State(state): State<AppState>) -> Json<Vec<Player>> {
    let league = state.store.get_league().await;

    info!(player_count = league.len(), "League listed");
    Json(league.into_players())
}

/// GET /game
pub async fn game_page() -> Html<&'static str> {
    Html(GAME_PAGE)
}
