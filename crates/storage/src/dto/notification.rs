use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Notification, NotificationType};

/// Request payload for sending a notification to a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateNotificationRequest {
    pub user_id: Uuid,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Title must be between 1 and 100 characters"
    ))]
    pub title: String,

    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,

    #[serde(default)]
    pub notification_type: NotificationType,

    pub related_event_id: Option<Uuid>,
    pub related_participant_id: Option<Uuid>,
    pub related_school_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationFilter {
    /// `true` for unread only, `false` for read only
    pub unread: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationResponse {
    pub notification_id: Uuid,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub related_event_id: Option<Uuid>,
    pub related_participant_id: Option<Uuid>,
    pub related_school_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            notification_id: notification.notification_id,
            title: notification.title,
            message: notification.message,
            notification_type: notification.notification_type,
            related_event_id: notification.related_event_id,
            related_participant_id: notification.related_participant_id,
            related_school_id: notification.related_school_id,
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_defaults_to_system() {
        let req: CreateNotificationRequest = serde_json::from_value(serde_json::json!({
            "user_id": Uuid::new_v4(),
            "title": "Schedule change",
            "message": "Heats moved to 10:00"
        }))
        .unwrap();
        assert_eq!(req.notification_type, NotificationType::System);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_title_too_long() {
        let req: CreateNotificationRequest = serde_json::from_value(serde_json::json!({
            "user_id": Uuid::new_v4(),
            "title": "t".repeat(101),
            "message": "body",
            "notification_type": "result"
        }))
        .unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }
}
