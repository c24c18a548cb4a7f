use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use super::dto::{NewPost, UpdatePostRequest};

/// A forum post joined with its author's display fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostWithAuthor {
    pub id: i64,
    pub user_id: i64,
    pub title: Option<String>,
    pub content: String,
    pub category: Option<String>,
    pub created_at: OffsetDateTime,
    pub student_id: String,
    pub school: Option<String>,
    pub diploma: Option<String>,
}

pub struct Post;

impl Post {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<PostWithAuthor>> {
        let rows = sqlx::query_as::<_, PostWithAuthor>(
            r#"
            SELECT p.id, p.user_id, p.title, p.content, p.category, p.created_at,
                   u.student_id, u.school, u.diploma
            FROM posts p
            JOIN users u ON u.id = p.user_id
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn get(db: &PgPool, id: i64) -> anyhow::Result<Option<PostWithAuthor>> {
        let row = sqlx::query_as::<_, PostWithAuthor>(
            r#"
            SELECT p.id, p.user_id, p.title, p.content, p.category, p.created_at,
                   u.student_id, u.school, u.diploma
            FROM posts p
            JOIN users u ON u.id = p.user_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn create(db: &PgPool, user_id: i64, post: NewPost) -> anyhow::Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO posts (user_id, title, content, category)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(post.title)
        .bind(post.content)
        .bind(post.category)
        .fetch_one(db)
        .await?;
        Ok(id)
    }

    /// Author-scoped partial update; returns the number of matched rows.
    pub async fn update(
        db: &PgPool,
        id: i64,
        user_id: i64,
        patch: UpdatePostRequest,
    ) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = COALESCE($3, title),
                content = COALESCE($4, content),
                category = COALESCE($5, category)
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(patch.title)
        .bind(patch.content)
        .bind(patch.category)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(db: &PgPool, id: i64, user_id: i64) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }
}
