//! PostgreSQL-backed [`Store`].

use async_trait::async_trait;
use revise_core::types::DbId;

use crate::error::StoreError;
use crate::models::revision::{CreateRevision, Revision, RevisionFilter};
use crate::models::user::{CreateUser, User};
use crate::repositories::{RevisionRepo, UserRepo};
use crate::store::{RevisionStore, Store, UserStore};
use crate::DbPool;

/// Constraint guarding email uniqueness (see the users migration).
const EMAIL_UNIQUE_CONSTRAINT: &str = "uq_users_email";

/// PostgreSQL error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// [`Store`] implementation delegating to the sqlx repositories.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        UserRepo::create(&self.pool, input).await.map_err(|err| {
            if is_email_conflict(&err) {
                tracing::warn!(email = %input.email, "Registration rejected: email already taken");
                StoreError::DuplicateEmail(input.email.clone())
            } else {
                StoreError::Database(err)
            }
        })
    }

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }
}

#[async_trait]
impl RevisionStore for PgStore {
    async fn create_revision(&self, input: &CreateRevision) -> Result<Revision, StoreError> {
        Ok(RevisionRepo::create(&self.pool, input).await?)
    }

    async fn list_revisions(
        &self,
        user_id: DbId,
        filter: &RevisionFilter,
    ) -> Result<Vec<Revision>, StoreError> {
        Ok(RevisionRepo::list_for_user(&self.pool, user_id, filter).await?)
    }

    async fn find_revision(&self, user_id: DbId, id: DbId) -> Result<Option<Revision>, StoreError> {
        Ok(RevisionRepo::find_for_user(&self.pool, user_id, id).await?)
    }

    async fn delete_revision(&self, user_id: DbId, id: DbId) -> Result<bool, StoreError> {
        Ok(RevisionRepo::delete_for_user(&self.pool, user_id, id).await?)
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}

/// Whether `err` is the unique violation on the users email constraint.
fn is_email_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
        }
        _ => false,
    }
}
