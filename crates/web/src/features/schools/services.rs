use sqlx::PgPool;
use storage::{
    dto::{
        common::PaginationParams,
        school::{CreateSchoolRequest, SchoolFilter, UpdateSchoolRequest},
    },
    error::Result,
    models::School,
    repository::school::SchoolRepository,
};
use uuid::Uuid;

/// List schools with pagination
pub async fn list_schools(
    pool: &PgPool,
    filter: &SchoolFilter,
    pagination: &PaginationParams,
) -> Result<(Vec<School>, i64)> {
    let repo = SchoolRepository::new(pool);
    repo.list(filter, pagination).await
}

pub async fn get_school(pool: &PgPool, id: Uuid) -> Result<School> {
    let repo = SchoolRepository::new(pool);
    repo.find_by_id(id).await
}

pub async fn create_school(pool: &PgPool, request: &CreateSchoolRequest) -> Result<School> {
    let repo = SchoolRepository::new(pool);
    repo.create(request).await
}

pub async fn update_school(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateSchoolRequest,
) -> Result<School> {
    let repo = SchoolRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, request).await
}

/// Delete a school and, through the schema, its participants
pub async fn delete_school(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = SchoolRepository::new(pool);
    repo.delete(id).await
}
