use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::dto::event::{CreateEventRequest, EventFilter, UpdateEventRequest};
use crate::error::{Result, StorageError};
use crate::models::Event;

const EVENT_COLUMNS: &str = "event_id, name, description, event_date, start_time, end_time, location, status, created_at";

/// Repository for Event database operations
pub struct EventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List events, most recent date first
    pub async fn list(
        &self,
        filter: &EventFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Event>, i64)> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM events WHERE 1=1");
        if let Some(status) = filter.status {
            count.push(" AND status = ");
            count.push_bind(status);
        }
        let total_items = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query =
            QueryBuilder::new(format!("SELECT {} FROM events WHERE 1=1", EVENT_COLUMNS));
        if let Some(status) = filter.status {
            query.push(" AND status = ");
            query.push_bind(status);
        }
        query.push(" ORDER BY event_date DESC, start_time DESC, created_at DESC LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let events = query.build_query_as::<Event>().fetch_all(self.pool).await?;

        Ok((events, total_items))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Event> {
        sqlx::query_as::<_, Event>(&format!(
            "SELECT {} FROM events WHERE event_id = $1",
            EVENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreateEventRequest) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (
                name, description, event_date, start_time, end_time, location, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.event_date)
        .bind(req.start_time)
        .bind(req.end_time)
        .bind(&req.location)
        .bind(req.status)
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from_write)?;

        Ok(event)
    }

    /// Update an event. `status` is stored as given; no transition order is
    /// enforced.
    pub async fn update(&self, existing: &Event, req: &UpdateEventRequest) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET name = $2,
                description = $3,
                event_date = $4,
                start_time = $5,
                end_time = $6,
                location = $7,
                status = $8
            WHERE event_id = $1
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(existing.event_id)
        .bind(req.name.as_ref().unwrap_or(&existing.name))
        .bind(req.description.as_ref().unwrap_or(&existing.description))
        .bind(req.event_date.unwrap_or(existing.event_date))
        .bind(req.start_time.unwrap_or(existing.start_time))
        .bind(req.end_time.unwrap_or(existing.end_time))
        .bind(req.location.as_ref().unwrap_or(&existing.location))
        .bind(req.status.unwrap_or(existing.status))
        .fetch_optional(self.pool)
        .await
        .map_err(StorageError::from_write)?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    /// Delete an event together with its roster entries
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
