//! Domain services sitting between HTTP handlers and repositories.
//!
//! Services own validation, tenant scoping and report assembly so handlers
//! stay thin.

pub mod measurement;

pub use measurement::{MeasurementRequest, MeasurementService, RenderedReport};
