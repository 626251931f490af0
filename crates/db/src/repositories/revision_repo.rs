//! Repository for the `revisions` table.
//!
//! Every read and delete is scoped by `user_id`; there is no query that
//! reaches another user's rows.

use revise_core::types::DbId;
use sqlx::PgPool;

use crate::models::revision::{CreateRevision, Revision, RevisionFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, subject, revision_type, prompt, content, created_at";

/// Provides CRUD operations for saved revisions.
pub struct RevisionRepo;

impl RevisionRepo {
    /// Insert a new revision, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateRevision) -> Result<Revision, sqlx::Error> {
        let query = format!(
            "INSERT INTO revisions (user_id, subject, revision_type, prompt, content)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Revision>(&query)
            .bind(input.user_id)
            .bind(&input.subject)
            .bind(&input.revision_type)
            .bind(&input.prompt)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// List a user's revisions, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        filter: &RevisionFilter,
    ) -> Result<Vec<Revision>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM revisions
             WHERE user_id = $1
               AND ($2::TEXT IS NULL OR subject = $2)
               AND ($3::TEXT IS NULL OR revision_type = $3)
             ORDER BY created_at DESC, id DESC
             LIMIT $4"
        );
        sqlx::query_as::<_, Revision>(&query)
            .bind(user_id)
            .bind(&filter.subject)
            .bind(&filter.revision_type)
            .bind(filter.limit())
            .fetch_all(pool)
            .await
    }

    /// Find a revision by ID, only if owned by `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Revision>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM revisions WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Revision>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a revision owned by `user_id`. Returns `true` if a row was removed.
    pub async fn delete_for_user(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM revisions WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
