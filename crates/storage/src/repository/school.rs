use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::dto::school::{CreateSchoolRequest, SchoolFilter, UpdateSchoolRequest};
use crate::error::{Result, StorageError};
use crate::models::School;

const SCHOOL_COLUMNS: &str = "school_id, name, address, city, state, zip_code, phone, email, website, created_at";

/// Repository for School database operations
pub struct SchoolRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SchoolRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List schools ordered by name, with the total count for pagination
    pub async fn list(
        &self,
        filter: &SchoolFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<School>, i64)> {
        let pattern = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM schools WHERE 1=1");
        push_search(&mut count, pattern.as_deref());
        let total_items = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::new(format!("SELECT {} FROM schools WHERE 1=1", SCHOOL_COLUMNS));
        push_search(&mut query, pattern.as_deref());
        query.push(" ORDER BY name, created_at LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let schools = query
            .build_query_as::<School>()
            .fetch_all(self.pool)
            .await?;

        Ok((schools, total_items))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<School> {
        sqlx::query_as::<_, School>(&format!(
            "SELECT {} FROM schools WHERE school_id = $1",
            SCHOOL_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreateSchoolRequest) -> Result<School> {
        let school = sqlx::query_as::<_, School>(&format!(
            r#"
            INSERT INTO schools (name, address, city, state, zip_code, phone, email, website)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            SCHOOL_COLUMNS
        ))
        .bind(&req.name)
        .bind(&req.address)
        .bind(&req.city)
        .bind(&req.state)
        .bind(&req.zip_code)
        .bind(&req.phone)
        .bind(&req.email)
        .bind(&req.website)
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from_write)?;

        Ok(school)
    }

    /// Update an existing school, keeping stored values for absent fields
    pub async fn update(
        &self,
        existing: &School,
        req: &UpdateSchoolRequest,
    ) -> Result<School> {
        let school = sqlx::query_as::<_, School>(&format!(
            r#"
            UPDATE schools
            SET name = $2,
                address = $3,
                city = $4,
                state = $5,
                zip_code = $6,
                phone = $7,
                email = $8,
                website = $9
            WHERE school_id = $1
            RETURNING {}
            "#,
            SCHOOL_COLUMNS
        ))
        .bind(existing.school_id)
        .bind(req.name.as_ref().unwrap_or(&existing.name))
        .bind(req.address.as_ref().unwrap_or(&existing.address))
        .bind(req.city.as_ref().unwrap_or(&existing.city))
        .bind(req.state.as_ref().unwrap_or(&existing.state))
        .bind(req.zip_code.as_ref().unwrap_or(&existing.zip_code))
        .bind(req.phone.as_ref().map_or(existing.phone.as_ref(), Option::as_ref))
        .bind(req.email.as_ref().map_or(existing.email.as_ref(), Option::as_ref))
        .bind(req.website.as_ref().map_or(existing.website.as_ref(), Option::as_ref))
        .fetch_optional(self.pool)
        .await
        .map_err(StorageError::from_write)?
        .ok_or(StorageError::NotFound)?;

        Ok(school)
    }

    /// Delete a school. Its participants (and their roster entries) go with
    /// it; users and notifications keep a null reference.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM schools WHERE school_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn push_search<'q>(query: &mut QueryBuilder<'q, sqlx::Postgres>, pattern: Option<&str>) {
    if let Some(pattern) = pattern {
        query.push(" AND (name ILIKE ");
        query.push_bind(pattern.to_string());
        query.push(" OR city ILIKE ");
        query.push_bind(pattern.to_string());
        query.push(")");
    }
}
