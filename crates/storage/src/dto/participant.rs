use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::validate_phone;
use crate::models::{Gender, Participant};

/// Request payload for creating a new participant
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateParticipantRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "First name must be between 1 and 50 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 1,
        max = 50,
        message = "Last name must be between 1 and 50 characters"
    ))]
    pub last_name: String,

    pub gender: Gender,

    pub date_of_birth: NaiveDate,

    pub school_id: Uuid,

    #[validate(length(max = 20))]
    #[validate(custom(function = "validate_phone"))]
    pub contact_phone: Option<String>,

    #[validate(email)]
    pub contact_email: Option<String>,
}

/// Request payload for updating a participant; absent fields are left
/// unchanged, an explicit `null` clears a contact field
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateParticipantRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub last_name: Option<String>,

    pub gender: Option<Gender>,

    pub date_of_birth: Option<NaiveDate>,

    pub school_id: Option<Uuid>,

    #[validate(length(max = 20))]
    #[validate(custom(function = "validate_phone"))]
    #[serde(default, deserialize_with = "super::common::double_option")]
    #[schema(value_type = Option<String>)]
    pub contact_phone: Option<Option<String>>,

    #[validate(email)]
    #[serde(default, deserialize_with = "super::common::double_option")]
    #[schema(value_type = Option<String>)]
    pub contact_email: Option<Option<String>>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ParticipantFilter {
    /// Only participants fielded by this school
    pub school_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipantResponse {
    pub participant_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub school_id: Uuid,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub created_at: NaiveDateTime,
}

impl CreateParticipantRequest {
    pub fn validate_birth_date(&self, today: NaiveDate) -> Result<(), &'static str> {
        check_birth_date(self.date_of_birth, today)
    }
}

impl UpdateParticipantRequest {
    pub fn validate_birth_date(&self, today: NaiveDate) -> Result<(), &'static str> {
        match self.date_of_birth {
            Some(date) => check_birth_date(date, today),
            None => Ok(()),
        }
    }
}

fn check_birth_date(date_of_birth: NaiveDate, today: NaiveDate) -> Result<(), &'static str> {
    if date_of_birth > today {
        return Err("Date of birth cannot be in the future");
    }
    Ok(())
}

impl From<Participant> for ParticipantResponse {
    fn from(participant: Participant) -> Self {
        Self {
            participant_id: participant.participant_id,
            first_name: participant.first_name,
            last_name: participant.last_name,
            gender: participant.gender,
            date_of_birth: participant.date_of_birth,
            school_id: participant.school_id,
            contact_phone: participant.contact_phone,
            contact_email: participant.contact_email,
            created_at: participant.created_at,
        }
    }
}
