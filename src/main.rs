use poker_league::{
    app_router, AppConfig, AppState, FileSystemPlayerStore, TexasHoldEm, TokioBlindAlerter,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "poker_league=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting poker league server");

    let config = AppConfig::from_env();

    let store = match FileSystemPlayerStore::from_path(&config.db_file).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!(db_file = %config.db_file.display(), error = %e, "Problem creating file system player store");
            std::process::exit(1);
        }
    };

    let game = Arc::new(TexasHoldEm::with_blind_unit(
        Arc::new(TokioBlindAlerter::new()),
        store.clone(),
        config.blind_unit,
    ));

    let app_state = AppState::new(store, game).with_ws_read_timeout(config.ws_read_timeout);
    let app = app_router(app_state);

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(bind_addr = %config.bind_addr, error = %e, "Could not bind listener");
            std::process::exit(1);
        }
    };
    info!("Server running on http://{}", config.bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server stopped");
        std::process::exit(1);
    }
}
