//! Thin query wrappers, one struct per table.

pub mod revision_repo;
pub mod user_repo;

pub use revision_repo::RevisionRepo;
pub use user_repo::UserRepo;
