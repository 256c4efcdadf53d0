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
        school::{CreateSchoolRequest, SchoolFilter, SchoolResponse, UpdateSchoolRequest},
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::extractors::json::{AppJson, AppPath, AppQuery};

use super::services;

#[utoipa::path(
    get,
    path = "/api/schools/",
    params(PaginationParams, SchoolFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Paginated list of schools", body = PaginatedResponse<SchoolResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "schools"
)]
pub async fn list_schools(
    State(db): State<Database>,
    AppQuery(pagination): AppQuery<PaginationParams>,
    AppQuery(filter): AppQuery<SchoolFilter>,
) -> Result<Json<PaginatedResponse<SchoolResponse>>, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let (schools, total_items) = services::list_schools(db.pool(), &filter, &pagination).await?;

    let response = PaginatedResponse::new(schools, &pagination, total_items)
        .map(SchoolResponse::from);

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/schools/{id}/",
    params(
        ("id" = Uuid, Path, description = "School ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "School found", body = SchoolResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "School not found")
    ),
    tag = "schools"
)]
pub async fn get_school(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let school = services::get_school(db.pool(), id).await?;

    Ok(Json(SchoolResponse::from(school)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/schools/",
    request_body = CreateSchoolRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "School created successfully", body = SchoolResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "schools"
)]
pub async fn create_school(
    State(db): State<Database>,
    AppJson(req): AppJson<CreateSchoolRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let school = services::create_school(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(SchoolResponse::from(school))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/schools/{id}/",
    params(
        ("id" = Uuid, Path, description = "School ID")
    ),
    request_body = UpdateSchoolRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "School updated successfully", body = SchoolResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "School not found")
    ),
    tag = "schools"
)]
pub async fn update_school(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<UpdateSchoolRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let updated = services::update_school(db.pool(), id, &req).await?;

    Ok(Json(SchoolResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/schools/{id}/",
    params(
        ("id" = Uuid, Path, description = "School ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "School and its participants deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "School not found")
    ),
    tag = "schools"
)]
pub async fn delete_school(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    services::delete_school(db.pool(), id).await?;
    tracing::info!(school_id = %id, "School deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}
