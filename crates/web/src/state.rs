use std::sync::Arc;

use axum::extract::FromRef;
use storage::Database;

use crate::auth::jwt::JwtKeys;

/// Shared application state. Handlers extract the part they need
/// (`State<Database>` or `State<Arc<JwtKeys>>`).
#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: Database,
    pub jwt: Arc<JwtKeys>,
}

impl AppState {
    pub fn new(db: Database, jwt: JwtKeys) -> Self {
        Self {
            db,
            jwt: Arc::new(jwt),
        }
    }
}
