#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use poker_league::{
    app_router, AppState, Player, PlayerStore, TexasHoldEm, TokioBlindAlerter,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

/// Uniquely named db file in the temp dir, removed on drop
pub struct TempDbFile {
    path: PathBuf,
}

impl TempDbFile {
    pub fn missing() -> Self {
        let path = std::env::temp_dir().join(format!("poker-league-{}.json", Uuid::new_v4()));
        Self { path }
    }

    pub fn with_contents(contents: &str) -> Self {
        let db = Self::missing();
        std::fs::write(&db.path, contents).unwrap();
        db
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_to_string(&self) -> String {
        std::fs::read_to_string(&self.path).unwrap()
    }
}

impl Drop for TempDbFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Full router over a real game and the given store
pub struct TestServer {
    app: Router,
}

impl TestServer {
    pub fn new(store: Arc<dyn PlayerStore>) -> Self {
        let game = Arc::new(TexasHoldEm::new(
            Arc::new(TokioBlindAlerter::new()),
            store.clone(),
        ));
        Self {
            app: app_router(AppState::new(store, game)),
        }
    }

    pub async fn post_win(&self, name: &str) -> StatusCode {
        let (status, _) = self.send("POST", &format!("/players/{}", name)).await;
        status
    }

    pub async fn get_score(&self, name: &str) -> (StatusCode, String) {
        self.send("GET", &format!("/players/{}", name)).await
    }

    pub async fn get_league(&self) -> Vec<Player> {
        let (status, body) = self.send("GET", "/league").await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_str(&body).unwrap()
    }

    async fn send(&self, method: &str, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }
}
