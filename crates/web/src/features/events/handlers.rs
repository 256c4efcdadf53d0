use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::{PaginatedResponse, PaginationParams},
        event::{
            CreateEventRequest, EventFilter, EventResponse, EventResultResponse,
            RecordResultsRequest, RosterRequest, UpdateEventRequest,
        },
    },
    models::EventParticipant,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::extractors::json::{AppJson, AppPath, AppQuery};

use super::services;

#[utoipa::path(
    get,
    path = "/api/events/",
    params(PaginationParams, EventFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Paginated list of events, most recent first", body = PaginatedResponse<EventResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "events"
)]
pub async fn list_events(
    State(db): State<Database>,
    AppQuery(pagination): AppQuery<PaginationParams>,
    AppQuery(filter): AppQuery<EventFilter>,
) -> Result<Json<PaginatedResponse<EventResponse>>, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let (events, total_items) = services::list_events(db.pool(), &filter, &pagination).await?;

    Ok(Json(
        PaginatedResponse::new(events, &pagination, total_items).map(EventResponse::from),
    ))
}

#[utoipa::path(
    get,
    path = "/api/events/{id}/",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Event found", body = EventResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn get_event(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let event = services::get_event(db.pool(), id).await?;

    Ok(Json(EventResponse::from(event)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/events/",
    request_body = CreateEventRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Event created successfully", body = EventResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "events"
)]
pub async fn create_event(
    State(db): State<Database>,
    AppJson(req): AppJson<CreateEventRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    req.validate_times()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let event = services::create_event(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(EventResponse::from(event))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/events/{id}/",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    request_body = UpdateEventRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Event updated successfully", body = EventResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn update_event(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<UpdateEventRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let updated = services::update_event(db.pool(), id, &req).await?;

    Ok(Json(EventResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}/",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Event and its roster deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    services::delete_event(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/{id}/participants/",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Event roster", body = Vec<EventResultResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn list_roster(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Vec<EventResultResponse>>, WebError> {
    let roster = services::list_results(db.pool(), id).await?;

    Ok(Json(roster))
}

#[utoipa::path(
    post,
    path = "/api/events/{id}/participants/",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    request_body = RosterRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Participant added to the roster", body = EventParticipant),
        (status = 400, description = "Unknown participant"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found"),
        (status = 409, description = "Participant already on the roster")
    ),
    tag = "events"
)]
pub async fn add_participant(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<RosterRequest>,
) -> Result<Response, WebError> {
    let entry = services::add_participant(db.pool(), id, req.participant_id).await?;
    tracing::info!(event_id = %id, participant_id = %req.participant_id, "Participant added to roster");

    Ok((StatusCode::CREATED, Json(entry)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}/participants/",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    request_body = RosterRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Participant removed from the roster"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found or participant not on the roster")
    ),
    tag = "events"
)]
pub async fn remove_participant(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<RosterRequest>,
) -> Result<Response, WebError> {
    services::remove_participant(db.pool(), id, req.participant_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/{id}/results/",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Results ranked by position", body = Vec<EventResultResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn get_results(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Vec<EventResultResponse>>, WebError> {
    let results = services::list_results(db.pool(), id).await?;

    Ok(Json(results))
}

#[utoipa::path(
    put,
    path = "/api/events/{id}/results/",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    request_body = RecordResultsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Results recorded", body = Vec<EventResultResponse>),
        (status = 400, description = "Validation error or participant not on the roster"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn record_results(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<RecordResultsRequest>,
) -> Result<Json<Vec<EventResultResponse>>, WebError> {
    req.validate()?;

    req.validate_unique_participants()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let results = services::record_results(db.pool(), id, &req.results).await?;
    tracing::info!(event_id = %id, count = req.results.len(), "Results recorded");

    Ok(Json(results))
}
