//! Storage traits shared by the PostgreSQL and in-memory backends.

use async_trait::async_trait;
use revise_core::types::DbId;

use crate::error::StoreError;
use crate::models::revision::{CreateRevision, Revision, RevisionFilter};
use crate::models::user::{CreateUser, User};

/// User persistence.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a user. Fails with [`StoreError::DuplicateEmail`] if the email is taken.
    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError>;

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

/// Revision persistence, always scoped to the owning user.
#[async_trait]
pub trait RevisionStore: Send + Sync {
    async fn create_revision(&self, input: &CreateRevision) -> Result<Revision, StoreError>;

    /// Revisions owned by `user_id`, ordered by `created_at` then `id`, newest first.
    async fn list_revisions(
        &self,
        user_id: DbId,
        filter: &RevisionFilter,
    ) -> Result<Vec<Revision>, StoreError>;

    /// `None` if the revision does not exist or belongs to another user.
    async fn find_revision(&self, user_id: DbId, id: DbId) -> Result<Option<Revision>, StoreError>;

    /// `false` if the revision does not exist or belongs to another user.
    async fn delete_revision(&self, user_id: DbId, id: DbId) -> Result<bool, StoreError>;
}

/// A complete storage backend.
#[async_trait]
pub trait Store: UserStore + RevisionStore {
    /// Short backend name for logs and the health endpoint.
    fn backend(&self) -> &'static str;

    async fn health_check(&self) -> Result<(), StoreError>;
}
