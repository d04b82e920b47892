//! Pure domain logic for the MasterGym backend.
//!
//! Nothing in this crate touches the database. Repositories live in
//! `mastergym-db`; HTTP wiring lives in `mastergym-api`.

pub mod backup;
pub mod client;
pub mod error;
pub mod measurement;
pub mod paging;
pub mod report;
pub mod tenant;
pub mod types;
