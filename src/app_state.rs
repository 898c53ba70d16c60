use sqlx::MySqlPool;

use crate::ai::AiClient;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: MySqlPool,
    pub ai: AiClient,
}
