use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::filter::{bind_filter, SqlFilter};

use super::dto::{NewNote, NoteBody, NoteFilters, NotePatch};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub content: Option<String>,
    pub pdf_url: Option<String>,
    pub school_of: String,
    pub diploma: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

const NOTE_COLUMNS: &str =
    "id, user_id, title, description, content, pdf_url, school_of, diploma, created_at, updated_at";

/// Turns present optional filters into predicates, in the fixed
/// diploma, school_of, search, created_at, updated_at order. Empty
/// strings count as absent.
fn apply_filters(filters: &NoteFilters, bound_params: usize) -> SqlFilter {
    let mut filter = SqlFilter::new(bound_params);
    if let Some(diploma) = filters.diploma.as_deref().filter(|v| !v.is_empty()) {
        filter.eq("diploma", diploma);
    }
    if let Some(school_of) = filters.school_of.as_deref().filter(|v| !v.is_empty()) {
        filter.eq("school_of", school_of);
    }
    if let Some(search) = filters.search.as_deref().filter(|v| !v.is_empty()) {
        filter.contains("title", search);
    }
    if let Some(created_at) = filters.created_at {
        filter.on_or_after("created_at", created_at);
    }
    if let Some(updated_at) = filters.updated_at {
        filter.on_or_after("updated_at", updated_at);
    }
    filter
}

impl Note {
    pub async fn list(db: &PgPool, filters: &NoteFilters) -> anyhow::Result<Vec<Note>> {
        let filter = apply_filters(filters, 0);
        let sql = format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE 1=1{} ORDER BY created_at DESC",
            filter.clause()
        );
        let query = sqlx::query_as::<_, Note>(&sql);
        let rows = bind_filter(query, filter.params()).fetch_all(db).await?;
        Ok(rows)
    }

    pub async fn list_mine(
        db: &PgPool,
        user_id: i64,
        filters: &NoteFilters,
    ) -> anyhow::Result<Vec<Note>> {
        let filter = apply_filters(filters, 1);
        let sql = format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE user_id = $1{} ORDER BY created_at DESC",
            filter.clause()
        );
        let query = sqlx::query_as::<_, Note>(&sql).bind(user_id);
        let rows = bind_filter(query, filter.params()).fetch_all(db).await?;
        Ok(rows)
    }

    pub async fn get(db: &PgPool, id: i64) -> anyhow::Result<Option<Note>> {
        let row = sqlx::query_as::<_, Note>(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn create(db: &PgPool, user_id: i64, note: NewNote) -> anyhow::Result<i64> {
        let (content, pdf_url) = match note.body {
            NoteBody::Content(content) => (Some(content), None),
            NoteBody::PdfUrl(url) => (None, Some(url)),
        };
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO notes (user_id, title, description, content, pdf_url, school_of, diploma)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(note.title)
        .bind(note.description)
        .bind(content)
        .bind(pdf_url)
        .bind(note.school_of)
        .bind(note.diploma)
        .fetch_one(db)
        .await?;
        Ok(id)
    }

    /// Owner-scoped partial update; returns the number of matched rows.
    /// A present body switches the note's material kind and clears the
    /// other column so a note never carries both.
    pub async fn update(
        db: &PgPool,
        id: i64,
        user_id: i64,
        patch: NotePatch,
    ) -> anyhow::Result<u64> {
        const SET: &str = "UPDATE notes \
             SET title = COALESCE($3, title), \
                 description = COALESCE($4, description), \
                 school_of = COALESCE($5, school_of), \
                 diploma = COALESCE($6, diploma), \
                 updated_at = NOW()";
        let body_columns = match &patch.body {
            Some(NoteBody::Content(_)) => ", content = $7, pdf_url = NULL",
            Some(NoteBody::PdfUrl(_)) => ", content = NULL, pdf_url = $7",
            None => "",
        };
        let sql = format!("{SET}{body_columns} WHERE id = $1 AND user_id = $2");

        let mut query = sqlx::query(&sql)
            .bind(id)
            .bind(user_id)
            .bind(patch.title)
            .bind(patch.description)
            .bind(patch.school_of)
            .bind(patch.diploma);
        if let Some(body) = patch.body {
            let value = match body {
                NoteBody::Content(content) => content,
                NoteBody::PdfUrl(url) => url,
            };
            query = query.bind(value);
        }
        let result = query.execute(db).await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(db: &PgPool, id: i64, user_id: i64) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM notes
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterValue;
    use time::macros::date;

    #[test]
    fn no_filters_produce_no_clause() {
        let filter = apply_filters(&NoteFilters::default(), 0);
        assert_eq!(filter.clause(), "");
    }

    #[test]
    fn filters_compose_in_fixed_order_after_owner_param() {
        let filters = NoteFilters {
            diploma: Some("CS".into()),
            school_of: Some("Engineering".into()),
            search: Some("algebra".into()),
            created_at: Some(date!(2024 - 09 - 01)),
            updated_at: Some(date!(2024 - 10 - 01)),
        };
        let filter = apply_filters(&filters, 1);
        assert_eq!(
            filter.clause(),
            " AND diploma = $2 AND school_of = $3 AND title ILIKE $4 \
             AND created_at >= $5 AND updated_at >= $6"
        );
        assert_eq!(filter.params().len(), 5);
        assert_eq!(filter.params()[2], FilterValue::Text("%algebra%".into()));
    }

    #[test]
    fn empty_string_filters_count_as_absent() {
        let filters = NoteFilters {
            diploma: Some("".into()),
            search: Some("".into()),
            ..NoteFilters::default()
        };
        let filter = apply_filters(&filters, 0);
        assert_eq!(filter.clause(), "");
    }

    #[test]
    fn subset_of_filters_skips_absent_ones() {
        let filters = NoteFilters {
            diploma: Some("CS".into()),
            search: Some("algebra".into()),
            ..NoteFilters::default()
        };
        let filter = apply_filters(&filters, 0);
        assert_eq!(filter.clause(), " AND diploma = $1 AND title ILIKE $2");
    }
}
