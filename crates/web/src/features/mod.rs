use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod events;
pub mod notifications;
pub mod participants;
pub mod schools;

/// All API routes, relative to the `/api` prefix
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(auth::routes::routes(state.clone()))
        .merge(schools::routes::routes(state.clone()))
        .merge(participants::routes::routes(state.clone()))
        .merge(events::routes::routes(state.clone()))
        .merge(notifications::routes::routes(state))
}
