use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Event, EventStatus, Gender};

/// Request payload for creating a new event
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEventRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub event_date: NaiveDate,

    #[schema(value_type = String, example = "09:00:00")]
    pub start_time: NaiveTime,

    #[schema(value_type = String, example = "17:00:00")]
    pub end_time: NaiveTime,

    #[validate(length(
        min = 1,
        max = 200,
        message = "Location must be between 1 and 200 characters"
    ))]
    pub location: String,

    #[serde(default)]
    pub status: EventStatus,
}

/// Request payload for updating an event; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    pub description: Option<String>,

    pub event_date: Option<NaiveDate>,

    #[schema(value_type = Option<String>)]
    pub start_time: Option<NaiveTime>,

    #[schema(value_type = Option<String>)]
    pub end_time: Option<NaiveTime>,

    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,

    /// Any status may be set; transitions are not enforced
    pub status: Option<EventStatus>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventFilter {
    pub status: Option<EventStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    pub event_id: Uuid,
    pub name: String,
    pub description: String,
    pub event_date: NaiveDate,
    #[schema(value_type = String)]
    pub start_time: NaiveTime,
    #[schema(value_type = String)]
    pub end_time: NaiveTime,
    pub location: String,
    pub status: EventStatus,
    pub created_at: NaiveDateTime,
}

/// Roster add/remove payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RosterRequest {
    pub participant_id: Uuid,
}

/// Batch of per-participant results for one event
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RecordResultsRequest {
    #[validate(length(min = 1, message = "At least one result is required"))]
    #[validate(nested)]
    pub results: Vec<ResultEntry>,
}

/// Result fields for one roster entry. Omitted fields are stored as null.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ResultEntry {
    pub participant_id: Uuid,

    #[validate(range(min = 1, message = "Position must be 1 or greater"))]
    pub position: Option<i32>,

    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>, example = 12.4)]
    pub score: Option<Decimal>,

    #[validate(length(max = 20))]
    pub time: Option<String>,

    pub notes: Option<String>,
}

/// A roster entry joined with participant details
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct EventResultResponse {
    pub event_participant_id: Uuid,
    pub event_id: Uuid,
    pub participant_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub school_id: Uuid,
    pub school_name: String,
    pub position: Option<i32>,
    #[serde(with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub score: Option<Decimal>,
    pub time: Option<String>,
    pub notes: Option<String>,
}

impl CreateEventRequest {
    /// Additional validation that requires multiple fields
    pub fn validate_times(&self) -> Result<(), &'static str> {
        check_times(self.start_time, self.end_time)
    }
}

impl UpdateEventRequest {
    /// Checks the merged start/end times against the stored event
    pub fn validate_times(&self, existing: &Event) -> Result<(), &'static str> {
        check_times(
            self.start_time.unwrap_or(existing.start_time),
            self.end_time.unwrap_or(existing.end_time),
        )
    }
}

fn check_times(start: NaiveTime, end: NaiveTime) -> Result<(), &'static str> {
    if end < start {
        return Err("End time must be on or after start time");
    }
    Ok(())
}

impl RecordResultsRequest {
    /// Rejects batches that mention the same participant twice
    pub fn validate_unique_participants(&self) -> Result<(), &'static str> {
        let mut seen = std::collections::HashSet::new();
        if self.results.iter().all(|r| seen.insert(r.participant_id)) {
            Ok(())
        } else {
            Err("Each participant may appear only once per batch")
        }
    }
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            event_id: event.event_id,
            name: event.name,
            description: event.description,
            event_date: event.event_date,
            start_time: event.start_time,
            end_time: event.end_time,
            location: event.location,
            status: event.status,
            created_at: event.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn regional_finals() -> CreateEventRequest {
        serde_json::from_value(serde_json::json!({
            "name": "Regional Finals",
            "description": "Track and field",
            "event_date": "2024-05-01",
            "start_time": "09:00:00",
            "end_time": "17:00:00",
            "location": "Central Stadium"
        }))
        .unwrap()
    }

    #[test]
    fn test_status_defaults_to_upcoming() {
        let req = regional_finals();
        assert_eq!(req.status, EventStatus::Upcoming);
        assert!(req.validate().is_ok());
        assert!(req.validate_times().is_ok());
    }

    #[test]
    fn test_end_before_start() {
        let req = CreateEventRequest {
            end_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            ..regional_finals()
        };
        assert!(req.validate_times().is_err());
    }

    #[test]
    fn test_position_must_be_positive() {
        let req = RecordResultsRequest {
            results: vec![ResultEntry {
                participant_id: Uuid::new_v4(),
                position: Some(0),
                score: None,
                time: None,
                notes: None,
            }],
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_empty_results_rejected() {
        let req = RecordResultsRequest { results: vec![] };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("results"));
    }

    #[test]
    fn test_duplicate_participants_in_batch() {
        let participant_id = Uuid::new_v4();
        let entry = ResultEntry {
            participant_id,
            position: Some(1),
            score: Some(Decimal::from_str("12.4").unwrap()),
            time: None,
            notes: None,
        };
        let req = RecordResultsRequest {
            results: vec![entry.clone(), entry],
        };
        assert!(req.validate().is_ok());
        assert!(req.validate_unique_participants().is_err());
    }

    #[test]
    fn test_score_accepts_json_number() {
        let entry: ResultEntry = serde_json::from_value(serde_json::json!({
            "participant_id": Uuid::new_v4(),
            "position": 1,
            "score": 12.4
        }))
        .unwrap();
        assert_eq!(entry.score, Some(Decimal::from_str("12.4").unwrap()));
    }

    #[test]
    fn test_score_missing_is_null() {
        let entry: ResultEntry = serde_json::from_value(serde_json::json!({
            "participant_id": Uuid::new_v4(),
            "position": 2
        }))
        .unwrap();
        assert!(entry.score.is_none());
    }

    #[test]
    fn test_result_score_serializes_as_number() {
        let result = EventResultResponse {
            event_participant_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            participant_id: Uuid::new_v4(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            gender: Gender::Female,
            school_id: Uuid::new_v4(),
            school_name: "Lincoln HS".into(),
            position: Some(1),
            score: Some(Decimal::from_str("12.4").unwrap()),
            time: None,
            notes: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["score"], serde_json::json!(12.4));

        let unscored = EventResultResponse { score: None, ..result };
        assert!(serde_json::to_value(&unscored).unwrap()["score"].is_null());
    }
}
