//! Request extractors.
//!
//! - [`tenant::TenantContext`] -- Resolves the caller's gym from a JWT Bearer token.

pub mod tenant;

pub use tenant::TenantContext;
