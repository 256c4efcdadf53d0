use utoipa::OpenApi;

use crate::features;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::auth::handlers::register,
        features::auth::handlers::login,
        features::auth::handlers::refresh_token,
        features::auth::handlers::get_profile,
        features::auth::handlers::update_profile,
        features::schools::handlers::list_schools,
        features::schools::handlers::get_school,
        features::schools::handlers::create_school,
        features::schools::handlers::update_school,
        features::schools::handlers::delete_school,
        features::participants::handlers::list_participants,
        features::participants::handlers::get_participant,
        features::participants::handlers::create_participant,
        features::participants::handlers::update_participant,
        features::participants::handlers::delete_participant,
        features::events::handlers::list_events,
        features::events::handlers::get_event,
        features::events::handlers::create_event,
        features::events::handlers::update_event,
        features::events::handlers::delete_event,
        features::events::handlers::list_roster,
        features::events::handlers::add_participant,
        features::events::handlers::remove_participant,
        features::events::handlers::get_results,
        features::events::handlers::record_results,
        features::notifications::handlers::list_notifications,
        features::notifications::handlers::create_notification,
        features::notifications::handlers::mark_as_read,
    ),
    components(
        schemas(
            storage::dto::user::RegisterRequest,
            storage::dto::user::LoginRequest,
            storage::dto::user::RefreshRequest,
            storage::dto::user::UpdateProfileRequest,
            storage::dto::user::UserResponse,
            storage::dto::user::LoginResponse,
            storage::dto::user::RefreshResponse,
            storage::dto::school::CreateSchoolRequest,
            storage::dto::school::UpdateSchoolRequest,
            storage::dto::school::SchoolResponse,
            storage::dto::participant::CreateParticipantRequest,
            storage::dto::participant::UpdateParticipantRequest,
            storage::dto::participant::ParticipantResponse,
            storage::dto::event::CreateEventRequest,
            storage::dto::event::UpdateEventRequest,
            storage::dto::event::EventResponse,
            storage::dto::event::RosterRequest,
            storage::dto::event::RecordResultsRequest,
            storage::dto::event::ResultEntry,
            storage::dto::event::EventResultResponse,
            storage::dto::notification::CreateNotificationRequest,
            storage::dto::notification::NotificationResponse,
            storage::dto::common::PaginationMeta,
            storage::models::UserRole,
            storage::models::Gender,
            storage::models::EventStatus,
            storage::models::NotificationType,
            storage::models::EventParticipant,
        )
    ),
    tags(
        (name = "auth", description = "Registration, login, token refresh and own profile"),
        (name = "schools", description = "School endpoints"),
        (name = "participants", description = "Participant endpoints"),
        (name = "events", description = "Event, roster and result endpoints"),
        (name = "notifications", description = "Per-user notifications"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
