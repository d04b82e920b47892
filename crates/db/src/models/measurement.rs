//! Body measurement model and DTOs.

use chrono::NaiveDate;
use mastergym_core::report::ReportMeasurement;
use mastergym_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `measurements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Measurement {
    pub id: DbId,
    pub gym_id: DbId,
    pub client_id: DbId,
    pub measured_on: NaiveDate,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub chest_cm: f64,
    pub waist_cm: f64,
    pub hip_cm: f64,
    pub left_arm_cm: f64,
    pub right_arm_cm: f64,
    pub left_leg_cm: f64,
    pub right_leg_cm: f64,
    pub body_fat_pct: Option<f64>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated column values written on insert and on full update.
///
/// `notes` must already be normalised: trimmed, and `None` when blank.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementValues {
    pub client_id: DbId,
    pub measured_on: NaiveDate,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub chest_cm: f64,
    pub waist_cm: f64,
    pub hip_cm: f64,
    pub left_arm_cm: f64,
    pub right_arm_cm: f64,
    pub left_leg_cm: f64,
    pub right_leg_cm: f64,
    pub body_fat_pct: Option<f64>,
    pub notes: Option<String>,
}

/// Optional predicates for listing measurements.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeasurementFilter {
    pub client_id: Option<DbId>,
}

impl From<&Measurement> for ReportMeasurement {
    fn from(m: &Measurement) -> Self {
        Self {
            id: m.id,
            measured_on: m.measured_on,
            weight_kg: m.weight_kg,
            height_cm: m.height_cm,
            chest_cm: m.chest_cm,
            waist_cm: m.waist_cm,
            hip_cm: m.hip_cm,
            left_arm_cm: m.left_arm_cm,
            right_arm_cm: m.right_arm_cm,
            left_leg_cm: m.left_leg_cm,
            right_leg_cm: m.right_leg_cm,
            body_fat_pct: m.body_fat_pct,
            notes: m.notes.clone(),
        }
    }
}
