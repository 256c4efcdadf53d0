use sqlx::PgPool;
use storage::{
    dto::{
        common::PaginationParams,
        event::{
            CreateEventRequest, EventFilter, EventResultResponse, ResultEntry, UpdateEventRequest,
        },
    },
    error::Result,
    models::{Event, EventParticipant},
    repository::{event::EventRepository, event_participant::EventParticipantRepository},
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

pub async fn list_events(
    pool: &PgPool,
    filter: &EventFilter,
    pagination: &PaginationParams,
) -> Result<(Vec<Event>, i64)> {
    let repo = EventRepository::new(pool);
    repo.list(filter, pagination).await
}

pub async fn get_event(pool: &PgPool, id: Uuid) -> Result<Event> {
    let repo = EventRepository::new(pool);
    repo.find_by_id(id).await
}

pub async fn create_event(pool: &PgPool, request: &CreateEventRequest) -> Result<Event> {
    let repo = EventRepository::new(pool);
    repo.create(request).await
}

/// Update an event; start/end times are checked against the merged record
pub async fn update_event(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateEventRequest,
) -> WebResult<Event> {
    let repo = EventRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    request
        .validate_times(&existing)
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    Ok(repo.update(&existing, request).await?)
}

pub async fn delete_event(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = EventRepository::new(pool);
    repo.delete(id).await
}

/// Put a participant on the roster of an existing event
pub async fn add_participant(
    pool: &PgPool,
    event_id: Uuid,
    participant_id: Uuid,
) -> Result<EventParticipant> {
    EventRepository::new(pool).find_by_id(event_id).await?;

    let repo = EventParticipantRepository::new(pool);
    repo.add(event_id, participant_id).await
}

pub async fn remove_participant(pool: &PgPool, event_id: Uuid, participant_id: Uuid) -> Result<()> {
    EventRepository::new(pool).find_by_id(event_id).await?;

    let repo = EventParticipantRepository::new(pool);
    repo.remove(event_id, participant_id).await
}

pub async fn list_results(pool: &PgPool, event_id: Uuid) -> Result<Vec<EventResultResponse>> {
    EventRepository::new(pool).find_by_id(event_id).await?;

    let repo = EventParticipantRepository::new(pool);
    repo.list_results(event_id).await
}

/// Record results for roster members and return the event's full result list
pub async fn record_results(
    pool: &PgPool,
    event_id: Uuid,
    entries: &[ResultEntry],
) -> Result<Vec<EventResultResponse>> {
    EventRepository::new(pool).find_by_id(event_id).await?;

    let repo = EventParticipantRepository::new(pool);
    repo.record_results(event_id, entries).await?;
    repo.list_results(event_id).await
}
