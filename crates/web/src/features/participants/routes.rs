use axum::{Router, middleware, routing::get};

use super::handlers::{
    create_participant, delete_participant, get_participant, list_participants,
    update_participant,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/participants/", get(list_participants).post(create_participant))
        .route(
            "/participants/:id/",
            get(get_participant)
                .put(update_participant)
                .delete(delete_participant),
        )
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
