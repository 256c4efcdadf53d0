use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::validate_phone;
use crate::models::School;

/// Request payload for creating a new school
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSchoolRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,

    #[validate(length(min = 1, max = 50))]
    pub city: String,

    #[validate(length(min = 1, max = 50))]
    pub state: String,

    #[validate(length(min = 1, max = 10))]
    pub zip_code: String,

    #[validate(length(max = 20))]
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(url)]
    #[validate(length(max = 200))]
    pub website: Option<String>,
}

/// Request payload for updating a school; absent fields are left unchanged,
/// an explicit `null` clears an optional contact field
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSchoolRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 1))]
    pub address: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub city: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub state: Option<String>,

    #[validate(length(min = 1, max = 10))]
    pub zip_code: Option<String>,

    #[validate(length(max = 20))]
    #[validate(custom(function = "validate_phone"))]
    #[serde(default, deserialize_with = "super::common::double_option")]
    #[schema(value_type = Option<String>)]
    pub phone: Option<Option<String>>,

    #[validate(email)]
    #[serde(default, deserialize_with = "super::common::double_option")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,

    #[validate(url)]
    #[validate(length(max = 200))]
    #[serde(default, deserialize_with = "super::common::double_option")]
    #[schema(value_type = Option<String>)]
    pub website: Option<Option<String>>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SchoolFilter {
    /// Case-insensitive match on name or city
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SchoolResponse {
    pub school_id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<School> for SchoolResponse {
    fn from(school: School) -> Self {
        Self {
            school_id: school.school_id,
            name: school.name,
            address: school.address,
            city: school.city,
            state: school.state,
            zip_code: school.zip_code,
            phone: school.phone,
            email: school.email,
            website: school.website,
            created_at: school.created_at,
        }
    }
}
