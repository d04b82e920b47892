//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument and a `TenantId` as the second.

pub mod client_repo;
pub mod measurement_repo;

pub use client_repo::ClientRepo;
pub use measurement_repo::MeasurementRepo;
