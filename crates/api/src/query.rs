//! Query parameter types for API handlers.

use chrono::NaiveDate;
use mastergym_core::types::DbId;
use serde::Deserialize;

/// `GET /api/measurements?client_id=&page=&size=&sort=`
///
/// `page` / `size` / `sort` are validated by the page policy in
/// `mastergym_core::paging` before any query runs.
#[derive(Debug, Default, Deserialize)]
pub struct MeasurementListParams {
    pub client_id: Option<DbId>,
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
}

/// `GET /api/measurements/report/pdf?client_id=`
#[derive(Debug, Deserialize)]
pub struct ClientReportParams {
    pub client_id: Option<DbId>,
}

/// `GET /api/clients?expiring_on=YYYY-MM-DD`
#[derive(Debug, Deserialize)]
pub struct ClientListParams {
    pub expiring_on: Option<NaiveDate>,
}
