//! In-process [`Store`] used for local development and tests.
//!
//! Data lives for the lifetime of the process. Ids are assigned from a
//! per-table counter starting at 1, mirroring BIGSERIAL.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use revise_core::types::DbId;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::revision::{CreateRevision, Revision, RevisionFilter};
use crate::models::user::{CreateUser, User};
use crate::store::{RevisionStore, Store, UserStore};

#[derive(Default)]
struct Tables {
    users: BTreeMap<DbId, User>,
    revisions: BTreeMap<DbId, Revision>,
    next_user_id: DbId,
    next_revision_id: DbId,
}

/// [`Store`] backed by in-memory maps behind a single `RwLock`.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == input.email) {
            tracing::warn!(email = %input.email, "Registration rejected: email already taken");
            return Err(StoreError::DuplicateEmail(input.email.clone()));
        }

        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            email: input.email.clone(),
            name: input.name.clone(),
            password_hash: input.password_hash.clone(),
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl RevisionStore for MemoryStore {
    async fn create_revision(&self, input: &CreateRevision) -> Result<Revision, StoreError> {
        let mut tables = self.tables.write().await;
        tables.next_revision_id += 1;
        let revision = Revision {
            id: tables.next_revision_id,
            user_id: input.user_id,
            subject: input.subject.clone(),
            revision_type: input.revision_type.clone(),
            prompt: input.prompt.clone(),
            content: input.content.clone(),
            created_at: Utc::now(),
        };
        tables.revisions.insert(revision.id, revision.clone());
        Ok(revision)
    }

    async fn list_revisions(
        &self,
        user_id: DbId,
        filter: &RevisionFilter,
    ) -> Result<Vec<Revision>, StoreError> {
        let tables = self.tables.read().await;
        let mut revisions: Vec<Revision> = tables
            .revisions
            .values()
            .filter(|r| r.user_id == user_id && filter.matches(r))
            .cloned()
            .collect();
        revisions.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        revisions.truncate(usize::try_from(filter.limit()).unwrap_or(usize::MAX));
        Ok(revisions)
    }

    async fn find_revision(&self, user_id: DbId, id: DbId) -> Result<Option<Revision>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .revisions
            .get(&id)
            .filter(|r| r.user_id == user_id)
            .cloned())
    }

    async fn delete_revision(&self, user_id: DbId, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .revisions
            .get(&id)
            .is_some_and(|r| r.user_id == user_id);
        if owned {
            tables.revisions.remove(&id);
        }
        Ok(owned)
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
