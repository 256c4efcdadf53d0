use axum::{Router, middleware, routing::get};

use super::handlers::{create_school, delete_school, get_school, list_schools, update_school};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/schools/", get(list_schools).post(create_school))
        .route(
            "/schools/:id/",
            get(get_school).put(update_school).delete(delete_school),
        )
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
