use axum::{
    Router, middleware,
    routing::get,
};

use super::handlers::{
    add_participant, create_event, delete_event, get_event, get_results, list_events,
    list_roster, record_results, remove_participant, update_event,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/events/", get(list_events).post(create_event))
        .route(
            "/events/:id/",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route(
            "/events/:id/participants/",
            get(list_roster)
                .post(add_participant)
                .delete(remove_participant),
        )
        .route("/events/:id/results/", get(get_results).put(record_results))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
