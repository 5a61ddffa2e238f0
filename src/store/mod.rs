// Public API - what other modules can use
pub use errors::StoreError;
pub use file_system::FileSystemPlayerStore;
pub use repository::{InMemoryPlayerStore, PlayerStore};

// Internal modules
mod errors;
mod file_system;
mod repository;
mod tape;
