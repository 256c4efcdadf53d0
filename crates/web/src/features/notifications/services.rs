use sqlx::PgPool;
use storage::{
    dto::{
        common::PaginationParams,
        notification::{CreateNotificationRequest, NotificationFilter},
    },
    error::{Result, StorageError},
    models::Notification,
    repository::notification::NotificationRepository,
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

/// The caller's notifications, newest first
pub async fn list_notifications(
    pool: &PgPool,
    user_id: Uuid,
    filter: &NotificationFilter,
    pagination: &PaginationParams,
) -> Result<(Vec<Notification>, i64)> {
    let repo = NotificationRepository::new(pool);
    repo.list_for_user(user_id, filter, pagination).await
}

pub async fn create_notification(
    pool: &PgPool,
    request: &CreateNotificationRequest,
) -> Result<Notification> {
    let repo = NotificationRepository::new(pool);
    repo.create(request).await
}

/// Mark a notification as read. Only its owner may do so; anyone else gets
/// `Forbidden` and the row is left untouched.
pub async fn mark_as_read(pool: &PgPool, id: Uuid, user_id: Uuid) -> WebResult<Notification> {
    let repo = NotificationRepository::new(pool);

    let notification = repo.find_by_id(id).await?;
    if notification.user_id != user_id {
        tracing::warn!(notification_id = %id, %user_id, "Attempt to read another user's notification");
        return Err(WebError::Forbidden);
    }

    repo.mark_read(id, user_id)
        .await?
        .ok_or(WebError::Storage(StorageError::NotFound))
}
