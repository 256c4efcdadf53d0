use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{create_notification, list_notifications, mark_as_read};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/notifications/",
            get(list_notifications).post(create_notification),
        )
        .route("/notifications/:id/read/", post(mark_as_read))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
