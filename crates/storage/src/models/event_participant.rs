use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One participant's entry on an event roster. The result fields stay null
/// until a result is recorded.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EventParticipant {
    pub event_participant_id: Uuid,
    pub event_id: Uuid,
    pub participant_id: Uuid,
    pub position: Option<i32>,
    #[serde(with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub score: Option<Decimal>,
    pub time: Option<String>,
    pub notes: Option<String>,
}
