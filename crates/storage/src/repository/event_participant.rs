use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::event::{EventResultResponse, ResultEntry};
use crate::error::{Result, StorageError};
use crate::models::EventParticipant;

const ENTRY_COLUMNS: &str =
    r#"event_participant_id, event_id, participant_id, position, score, "time", notes"#;

/// Roster membership and per-participant results for events
pub struct EventParticipantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventParticipantRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Put a participant on an event's roster with empty result fields.
    /// A second entry for the same pair is a `ConstraintViolation`.
    pub async fn add(&self, event_id: Uuid, participant_id: Uuid) -> Result<EventParticipant> {
        let entry = sqlx::query_as::<_, EventParticipant>(&format!(
            r#"
            INSERT INTO event_participants (event_id, participant_id)
            VALUES ($1, $2)
            RETURNING {}
            "#,
            ENTRY_COLUMNS
        ))
        .bind(event_id)
        .bind(participant_id)
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from_write)?;

        Ok(entry)
    }

    pub async fn remove(&self, event_id: Uuid, participant_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM event_participants WHERE event_id = $1 AND participant_id = $2",
        )
        .bind(event_id)
        .bind(participant_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Roster entries with participant details, ranked by position
    pub async fn list_results(&self, event_id: Uuid) -> Result<Vec<EventResultResponse>> {
        let results = sqlx::query_as::<_, EventResultResponse>(
            r#"
            SELECT ep.event_participant_id, ep.event_id, ep.participant_id,
                   p.first_name, p.last_name, p.gender, p.school_id,
                   s.name AS school_name,
                   ep.position, ep.score, ep."time", ep.notes
            FROM event_participants ep
            JOIN participants p ON p.participant_id = ep.participant_id
            JOIN schools s ON s.school_id = p.school_id
            WHERE ep.event_id = $1
            ORDER BY ep.position ASC NULLS LAST, p.last_name, p.first_name
            "#,
        )
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(results)
    }

    /// Write result fields for a batch of roster entries in one transaction.
    /// Any participant missing from the roster aborts the whole batch.
    pub async fn record_results(&self, event_id: Uuid, entries: &[ResultEntry]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for entry in entries {
            let result = sqlx::query(
                r#"
                UPDATE event_participants
                SET position = $3, score = $4, "time" = $5, notes = $6
                WHERE event_id = $1 AND participant_id = $2
                "#,
            )
            .bind(event_id)
            .bind(entry.participant_id)
            .bind(entry.position)
            .bind(entry.score)
            .bind(&entry.time)
            .bind(&entry.notes)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(StorageError::invalid_reference(
                    "participant_id",
                    format!(
                        "Participant {} is not on this event's roster",
                        entry.participant_id
                    ),
                ));
            }
        }

        tx.commit().await?;

        Ok(())
    }
}
