//! Saved revision model and DTOs.

use revise_core::revision::MAX_LIST_LIMIT;
use revise_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `revisions` table. Revisions are immutable once saved.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Revision {
    pub id: DbId,
    pub user_id: DbId,
    /// Catalog subject id, e.g. `"maths"`.
    pub subject: String,
    /// Catalog revision type id, e.g. `"fiche"`.
    pub revision_type: String,
    pub prompt: String,
    pub content: String,
    pub created_at: Timestamp,
}

/// DTO for saving a revision.
#[derive(Debug, Clone)]
pub struct CreateRevision {
    pub user_id: DbId,
    pub subject: String,
    pub revision_type: String,
    pub prompt: String,
    pub content: String,
}

/// Optional narrowing of a user's revision list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionFilter {
    pub subject: Option<String>,
    pub revision_type: Option<String>,
    /// Maximum rows to return; clamped to `1..=MAX_LIST_LIMIT`.
    pub limit: i64,
}

impl RevisionFilter {
    pub fn limit(&self) -> i64 {
        self.limit.clamp(1, MAX_LIST_LIMIT)
    }

    pub fn matches(&self, revision: &Revision) -> bool {
        self.subject.as_deref().is_none_or(|s| s == revision.subject)
            && self
                .revision_type
                .as_deref()
                .is_none_or(|t| t == revision.revision_type)
    }
}

impl Default for RevisionFilter {
    fn default() -> Self {
        Self {
            subject: None,
            revision_type: None,
            limit: MAX_LIST_LIMIT,
        }
    }
}
