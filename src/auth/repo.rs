use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub student_id: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub school: Option<String>,
    pub diploma: Option<String>,
    pub created_at: OffsetDateTime,
}

impl User {
    /// Find a user by their student id.
    pub async fn find_by_student_id(db: &PgPool, student_id: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, student_id, password_hash, school, diploma, created_at
            FROM users
            WHERE student_id = $1
            "#,
        )
        .bind(student_id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }
}
