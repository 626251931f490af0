//! Validation for revisions submitted for saving.

use crate::catalog::{RevisionType, Subject};
use crate::error::CoreError;

/// Maximum number of revisions returned by a single list call.
pub const MAX_LIST_LIMIT: i64 = 100;

/// A revision that passed validation and is ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRevision {
    pub prompt: String,
    pub subject: Subject,
    pub revision_type: RevisionType,
    pub content: String,
}

impl ValidRevision {
    /// Validate the fields of a save request.
    ///
    /// Content is stored as given; only a blank body is rejected. The prompt
    /// is trimmed but not length-capped, unlike a generation request.
    pub fn parse(
        prompt: &str,
        subject: &str,
        revision_type: &str,
        content: &str,
    ) -> Result<Self, CoreError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(CoreError::InvalidRequest(
                "Prompt must not be empty".to_string(),
            ));
        }
        let subject: Subject = subject.parse()?;
        let revision_type: RevisionType = revision_type.parse()?;
        if content.trim().is_empty() {
            return Err(CoreError::InvalidRequest(
                "Content must not be empty".to_string(),
            ));
        }

        Ok(Self {
            prompt: prompt.to_string(),
            subject,
            revision_type,
            content: content.to_string(),
        })
    }
}
