pub mod revision;
pub mod user;
