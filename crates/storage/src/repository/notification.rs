use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::dto::notification::{CreateNotificationRequest, NotificationFilter};
use crate::error::{Result, StorageError};
use crate::models::Notification;

const NOTIFICATION_COLUMNS: &str = "notification_id, user_id, title, message, notification_type, related_event_id, related_participant_id, related_school_id, is_read, created_at";

pub struct NotificationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NotificationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Notifications owned by `user_id`, newest first
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: &NotificationFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Notification>, i64)> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM notifications WHERE user_id = ");
        count.push_bind(user_id);
        if let Some(unread) = filter.unread {
            count.push(" AND is_read = ");
            count.push_bind(!unread);
        }
        let total_items = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::new(format!(
            "SELECT {} FROM notifications WHERE user_id = ",
            NOTIFICATION_COLUMNS
        ));
        query.push_bind(user_id);
        if let Some(unread) = filter.unread {
            query.push(" AND is_read = ");
            query.push_bind(!unread);
        }
        query.push(" ORDER BY created_at DESC, notification_id DESC LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let notifications = query
            .build_query_as::<Notification>()
            .fetch_all(self.pool)
            .await?;

        Ok((notifications, total_items))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Notification> {
        sqlx::query_as::<_, Notification>(&format!(
            "SELECT {} FROM notifications WHERE notification_id = $1",
            NOTIFICATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreateNotificationRequest) -> Result<Notification> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            r#"
            INSERT INTO notifications (
                user_id, title, message, notification_type,
                related_event_id, related_participant_id, related_school_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            NOTIFICATION_COLUMNS
        ))
        .bind(req.user_id)
        .bind(&req.title)
        .bind(&req.message)
        .bind(req.notification_type)
        .bind(req.related_event_id)
        .bind(req.related_participant_id)
        .bind(req.related_school_id)
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from_write)?;

        Ok(notification)
    }

    /// Set the read flag on a row owned by `user_id`. Returns `None` when no
    /// notification matches both the id and the owner.
    pub async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<Option<Notification>> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE notification_id = $1 AND user_id = $2
            RETURNING {}
            "#,
            NOTIFICATION_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(notification)
    }
}
