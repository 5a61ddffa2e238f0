use poker_league::{AppConfig, FileSystemPlayerStore, TexasHoldEm, TokioBlindAlerter, WriterSink};
use poker_league::cli::Cli;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{debug, error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Logs go to stderr so they never interleave with the game on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "poker_league=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env();

    let store = match FileSystemPlayerStore::from_path(&config.db_file).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!(db_file = %config.db_file.display(), error = %e, "Problem creating file system player store");
            std::process::exit(1);
        }
    };

    println!("Let's play poker");
    println!("Type {{Name}} wins to record a win");

    let game = Arc::new(TexasHoldEm::with_blind_unit(
        Arc::new(TokioBlindAlerter::new()),
        store.clone(),
        config.blind_unit,
    ));
    let out = Arc::new(WriterSink::new(tokio::io::stdout()));

    let mut cli = Cli::new(BufReader::new(tokio::io::stdin()), out, game.clone());
    let outcome = cli.play_poker().await;

    // Release every other handle so the store can be flushed and closed
    debug!(pending = cli.pending_blinds(), "Game over, cancelling remaining blinds");
    drop(cli);
    drop(game);
    if let Err(e) = outcome {
        error!(error = %e, "Game ended with an error");
    }

    match Arc::try_unwrap(store) {
        Ok(store) => {
            if let Err(e) = store.close().await {
                error!(error = %e, "Problem closing player store");
            }
        }
        Err(_) => warn!("Player store still shared at exit; skipping close"),
    }
}
