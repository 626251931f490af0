/// Errors surfaced by a [`Store`](crate::Store) implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Another user already registered this email.
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
