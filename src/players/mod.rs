// Public API - what other modules can use
pub use handlers::{game_page, get_league, get_score, record_win};

// Internal modules
mod handlers;
