pub mod models;

pub use models::{League, Player};
