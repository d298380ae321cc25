use mh_auth::{IdentityVerifier, TokenManager};
use mh_config::PaginationConfig;

use std::sync::Arc;

use sqlx::SqlitePool;

/// Application state threaded through every handler.
///
/// Constructed once at startup; nothing here is reachable through a global.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub tokens: Arc<TokenManager>,
    pub verifier: Arc<dyn IdentityVerifier>,
    /// Hosted domain logins must belong to, when restricted.
    pub allowed_domain: Option<String>,
    pub pagination: PaginationConfig,
}
