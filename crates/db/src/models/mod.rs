//! Row models and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row and the input struct used to write it.

pub mod client;
pub mod measurement;
