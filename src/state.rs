use std::sync::Arc;

use crate::{config::Config, database::DbPool, services::chat::ChatClient};

/// Application state shared across all HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing the database
    pub pool: DbPool,
    /// Configuration loaded at startup
    pub config: Arc<Config>,
    /// Client for the chat-completions endpoint
    pub chat: Arc<ChatClient>,
}

impl AppState {
    /// Create a new AppState instance
    pub fn new(pool: DbPool, config: Arc<Config>, chat: Arc<ChatClient>) -> Self {
        Self { pool, config, chat }
    }
}
