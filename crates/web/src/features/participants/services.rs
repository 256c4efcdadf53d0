use sqlx::PgPool;
use storage::{
    dto::{
        common::PaginationParams,
        participant::{CreateParticipantRequest, ParticipantFilter, UpdateParticipantRequest},
    },
    error::Result,
    models::Participant,
    repository::participant::ParticipantRepository,
};
use uuid::Uuid;

pub async fn list_participants(
    pool: &PgPool,
    filter: &ParticipantFilter,
    pagination: &PaginationParams,
) -> Result<(Vec<Participant>, i64)> {
    let repo = ParticipantRepository::new(pool);
    repo.list(filter, pagination).await
}

pub async fn get_participant(pool: &PgPool, id: Uuid) -> Result<Participant> {
    let repo = ParticipantRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a participant bound to an existing school
pub async fn create_participant(
    pool: &PgPool,
    request: &CreateParticipantRequest,
) -> Result<Participant> {
    let repo = ParticipantRepository::new(pool);
    repo.create(request).await
}

pub async fn update_participant(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateParticipantRequest,
) -> Result<Participant> {
    let repo = ParticipantRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, request).await
}

pub async fn delete_participant(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = ParticipantRepository::new(pool);
    repo.delete(id).await
}
