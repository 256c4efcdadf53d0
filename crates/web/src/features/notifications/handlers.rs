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
        notification::{CreateNotificationRequest, NotificationFilter, NotificationResponse},
    },
    models::UserRole,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::extractors::json::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/notifications/",
    params(PaginationParams, NotificationFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The caller's notifications, most recent first", body = PaginatedResponse<NotificationResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications"
)]
pub async fn list_notifications(
    State(db): State<Database>,
    auth: AuthUser,
    AppQuery(pagination): AppQuery<PaginationParams>,
    AppQuery(filter): AppQuery<NotificationFilter>,
) -> Result<Json<PaginatedResponse<NotificationResponse>>, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let (notifications, total_items) =
        services::list_notifications(db.pool(), auth.user_id, &filter, &pagination).await?;

    Ok(Json(
        PaginatedResponse::new(notifications, &pagination, total_items)
            .map(NotificationResponse::from),
    ))
}

#[utoipa::path(
    post,
    path = "/api/notifications/",
    request_body = CreateNotificationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Notification sent", body = NotificationResponse),
        (status = 400, description = "Validation error or unknown reference"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only admins may send notifications")
    ),
    tag = "notifications"
)]
pub async fn create_notification(
    State(db): State<Database>,
    auth: AuthUser,
    AppJson(req): AppJson<CreateNotificationRequest>,
) -> Result<Response, WebError> {
    auth.require_role(&[UserRole::Admin])?;
    req.validate()?;

    let notification = services::create_notification(db.pool(), &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(NotificationResponse::from(notification)),
    )
        .into_response())
}

#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read/",
    params(
        ("id" = Uuid, Path, description = "Notification ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Notification marked as read", body = NotificationResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Notification belongs to another user"),
        (status = 404, description = "Notification not found")
    ),
    tag = "notifications"
)]
pub async fn mark_as_read(
    State(db): State<Database>,
    auth: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<NotificationResponse>, WebError> {
    let notification = services::mark_as_read(db.pool(), id, auth.user_id).await?;

    Ok(Json(NotificationResponse::from(notification)))
}
