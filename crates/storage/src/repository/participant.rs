use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::dto::participant::{
    CreateParticipantRequest, ParticipantFilter, UpdateParticipantRequest,
};
use crate::error::{Result, StorageError};
use crate::models::Participant;

const PARTICIPANT_COLUMNS: &str = "participant_id, first_name, last_name, gender, date_of_birth, school_id, contact_phone, contact_email, created_at";

pub struct ParticipantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List participants ordered by name, optionally restricted to one school
    pub async fn list(
        &self,
        filter: &ParticipantFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Participant>, i64)> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM participants WHERE 1=1");
        if let Some(school_id) = filter.school_id {
            count.push(" AND school_id = ");
            count.push_bind(school_id);
        }
        let total_items = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::new(format!(
            "SELECT {} FROM participants WHERE 1=1",
            PARTICIPANT_COLUMNS
        ));
        if let Some(school_id) = filter.school_id {
            query.push(" AND school_id = ");
            query.push_bind(school_id);
        }
        query.push(" ORDER BY last_name, first_name, created_at LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let participants = query
            .build_query_as::<Participant>()
            .fetch_all(self.pool)
            .await?;

        Ok((participants, total_items))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Participant> {
        sqlx::query_as::<_, Participant>(&format!(
            "SELECT {} FROM participants WHERE participant_id = $1",
            PARTICIPANT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Create a participant. A `school_id` with no matching school is
    /// reported as `InvalidReference`.
    pub async fn create(&self, req: &CreateParticipantRequest) -> Result<Participant> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            r#"
            INSERT INTO participants (
                first_name, last_name, gender, date_of_birth, school_id,
                contact_phone, contact_email
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            PARTICIPANT_COLUMNS
        ))
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(req.gender)
        .bind(req.date_of_birth)
        .bind(req.school_id)
        .bind(&req.contact_phone)
        .bind(&req.contact_email)
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from_write)?;

        Ok(participant)
    }

    pub async fn update(
        &self,
        existing: &Participant,
        req: &UpdateParticipantRequest,
    ) -> Result<Participant> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            r#"
            UPDATE participants
            SET first_name = $2,
                last_name = $3,
                gender = $4,
                date_of_birth = $5,
                school_id = $6,
                contact_phone = $7,
                contact_email = $8
            WHERE participant_id = $1
            RETURNING {}
            "#,
            PARTICIPANT_COLUMNS
        ))
        .bind(existing.participant_id)
        .bind(req.first_name.as_ref().unwrap_or(&existing.first_name))
        .bind(req.last_name.as_ref().unwrap_or(&existing.last_name))
        .bind(req.gender.unwrap_or(existing.gender))
        .bind(req.date_of_birth.unwrap_or(existing.date_of_birth))
        .bind(req.school_id.unwrap_or(existing.school_id))
        .bind(
            req.contact_phone
                .as_ref()
                .map_or(existing.contact_phone.as_ref(), Option::as_ref),
        )
        .bind(
            req.contact_email
                .as_ref()
                .map_or(existing.contact_email.as_ref(), Option::as_ref),
        )
        .fetch_optional(self.pool)
        .await
        .map_err(StorageError::from_write)?
        .ok_or(StorageError::NotFound)?;

        Ok(participant)
    }

    /// Delete a participant together with its roster entries
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM participants WHERE participant_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
