use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::{
    Database,
    dto::{
        common::{PaginatedResponse, PaginationParams},
        participant::{
            CreateParticipantRequest, ParticipantFilter, ParticipantResponse,
            UpdateParticipantRequest,
        },
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::extractors::json::{AppJson, AppPath, AppQuery};

use super::services;

#[utoipa::path(
    get,
    path = "/api/participants/",
    params(PaginationParams, ParticipantFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Paginated list of participants", body = PaginatedResponse<ParticipantResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "participants"
)]
pub async fn list_participants(
    State(db): State<Database>,
    AppQuery(pagination): AppQuery<PaginationParams>,
    AppQuery(filter): AppQuery<ParticipantFilter>,
) -> Result<Json<PaginatedResponse<ParticipantResponse>>, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let (participants, total_items) =
        services::list_participants(db.pool(), &filter, &pagination).await?;

    Ok(Json(
        PaginatedResponse::new(participants, &pagination, total_items)
            .map(ParticipantResponse::from),
    ))
}

#[utoipa::path(
    get,
    path = "/api/participants/{id}/",
    params(
        ("id" = Uuid, Path, description = "Participant ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Participant found", body = ParticipantResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn get_participant(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let participant = services::get_participant(db.pool(), id).await?;

    Ok(Json(ParticipantResponse::from(participant)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/participants/",
    request_body = CreateParticipantRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Participant created successfully", body = ParticipantResponse),
        (status = 400, description = "Validation error or unknown school"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "participants"
)]
pub async fn create_participant(
    State(db): State<Database>,
    AppJson(req): AppJson<CreateParticipantRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    req.validate_birth_date(Utc::now().date_naive())
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let participant = services::create_participant(db.pool(), &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ParticipantResponse::from(participant)),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/api/participants/{id}/",
    params(
        ("id" = Uuid, Path, description = "Participant ID")
    ),
    request_body = UpdateParticipantRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Participant updated successfully", body = ParticipantResponse),
        (status = 400, description = "Validation error or unknown school"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn update_participant(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<UpdateParticipantRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    req.validate_birth_date(Utc::now().date_naive())
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let updated = services::update_participant(db.pool(), id, &req).await?;

    Ok(Json(ParticipantResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/participants/{id}/",
    params(
        ("id" = Uuid, Path, description = "Participant ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Participant and roster entries deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn delete_participant(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    services::delete_participant(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
