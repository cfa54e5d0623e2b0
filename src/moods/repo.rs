use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Mood entry record. Every query on this table that reads or mutates a
/// single entry carries the owner in its predicate.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MoodEntry {
    pub id: i64,
    pub user_id: i64,
    pub score: i16,
    pub description: String,
    pub emotions: Option<String>,
    pub date: OffsetDateTime,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl MoodEntry {
    pub async fn insert(
        db: &PgPool,
        owner_id: i64,
        score: i16,
        description: &str,
        emotions: Option<&str>,
        date: OffsetDateTime,
    ) -> sqlx::Result<MoodEntry> {
        sqlx::query_as::<_, MoodEntry>(
            r#"
            INSERT INTO moods (user_id, score, description, emotions, date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, score, description, emotions, date, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(score)
        .bind(description)
        .bind(emotions)
        .bind(date)
        .fetch_one(db)
        .await
    }

    /// All entries owned by `owner_id`, newest event first.
    pub async fn list_by_owner(db: &PgPool, owner_id: i64) -> sqlx::Result<Vec<MoodEntry>> {
        sqlx::query_as::<_, MoodEntry>(
            r#"
            SELECT id, user_id, score, description, emotions, date, created_at, updated_at
            FROM moods
            WHERE user_id = $1
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(db)
        .await
    }

    /// Partial update scoped to the owner: an entry belonging to anyone
    /// else is indistinguishable from a missing one.
    pub async fn update_owned(
        db: &PgPool,
        owner_id: i64,
        id: i64,
        score: Option<i16>,
        description: Option<&str>,
        emotions: Option<&str>,
        date: Option<OffsetDateTime>,
    ) -> sqlx::Result<Option<MoodEntry>> {
        sqlx::query_as::<_, MoodEntry>(
            r#"
            UPDATE moods
            SET score = COALESCE($3, score),
                description = COALESCE($4, description),
                emotions = COALESCE($5, emotions),
                date = COALESCE($6, date),
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, score, description, emotions, date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(score)
        .bind(description)
        .bind(emotions)
        .bind(date)
        .fetch_optional(db)
        .await
    }

    /// Owner-scoped delete; true when a row was removed.
    pub async fn delete_owned(db: &PgPool, owner_id: i64, id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM moods WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
