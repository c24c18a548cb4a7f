use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime, Time};

use super::dto::{NewEvent, UpdateEventRequest};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub event_date: Date,
    pub event_time: Time,
    pub location: Option<String>,
    pub created_by: i64,
    pub created_at: OffsetDateTime,
}

impl Event {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, event_date, event_time, location, created_by, created_at
            FROM events
            ORDER BY event_date, event_time
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn get(db: &PgPool, id: i64) -> anyhow::Result<Option<Event>> {
        let row = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, event_date, event_time, location, created_by, created_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn create(db: &PgPool, created_by: i64, event: NewEvent) -> anyhow::Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO events (title, description, event_date, event_time, location, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(event.title)
        .bind(event.description)
        .bind(event.event_date)
        .bind(event.event_time)
        .bind(event.location)
        .bind(created_by)
        .fetch_one(db)
        .await?;
        Ok(id)
    }

    /// Creator-scoped partial update; returns the number of matched rows.
    pub async fn update(
        db: &PgPool,
        id: i64,
        created_by: i64,
        patch: UpdateEventRequest,
    ) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                event_date = COALESCE($5, event_date),
                event_time = COALESCE($6, event_time),
                location = COALESCE($7, location)
            WHERE id = $1 AND created_by = $2
            "#,
        )
        .bind(id)
        .bind(created_by)
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.event_date)
        .bind(patch.event_time)
        .bind(patch.location)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(db: &PgPool, id: i64, created_by: i64) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM events
            WHERE id = $1 AND created_by = $2
            "#,
        )
        .bind(id)
        .bind(created_by)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }
}
