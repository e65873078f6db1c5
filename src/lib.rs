pub mod api;
pub mod config;
pub mod crypto;
pub mod db;
pub mod utils;

pub use db::DbPool;

pub struct AppState {
    pub db: DbPool,
}

impl AppState {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}
