//! Domain types and pure logic for the revision service.
//!
//! Nothing in this crate touches the network or the database: the catalog,
//! generation request validation and prompt building, and the markup renderer
//! are all plain functions over plain data.

pub mod catalog;
pub mod error;
pub mod generation;
pub mod markup;
pub mod revision;
pub mod types;
