//! Measurement operations: validation, tenant scoping, CRUD and reports.

use chrono::NaiveDate;
use mastergym_core::error::CoreError;
use mastergym_core::measurement::normalize_note;
use mastergym_core::paging::{MeasurementSort, Page, PageRequest};
use mastergym_core::report::{
    client_report_filename, detail_report, detail_report_filename, list_report, render_pdf,
    ReportClient, ReportDocument, ReportMeasurement,
};
use mastergym_core::tenant::TenantId;
use mastergym_core::types::DbId;
use mastergym_db::models::client::Client;
use mastergym_db::models::measurement::{Measurement, MeasurementFilter, MeasurementValues};
use mastergym_db::repositories::{ClientRepo, MeasurementRepo};
use mastergym_db::DbPool;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Body of `POST /api/measurements` and `PUT /api/measurements/{id}`.
///
/// Every metric except body fat is required; all missing fields are
/// reported together.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct MeasurementRequest {
    #[validate(required(message = "client_id is required"))]
    pub client_id: Option<DbId>,
    #[validate(required(message = "measured_on is required"))]
    pub measured_on: Option<NaiveDate>,
    #[validate(required(message = "weight_kg is required"))]
    pub weight_kg: Option<f64>,
    #[validate(required(message = "height_cm is required"))]
    pub height_cm: Option<f64>,
    #[validate(required(message = "chest_cm is required"))]
    pub chest_cm: Option<f64>,
    #[validate(required(message = "waist_cm is required"))]
    pub waist_cm: Option<f64>,
    #[validate(required(message = "hip_cm is required"))]
    pub hip_cm: Option<f64>,
    #[validate(required(message = "left_arm_cm is required"))]
    pub left_arm_cm: Option<f64>,
    #[validate(required(message = "right_arm_cm is required"))]
    pub right_arm_cm: Option<f64>,
    #[validate(required(message = "left_leg_cm is required"))]
    pub left_leg_cm: Option<f64>,
    #[validate(required(message = "right_leg_cm is required"))]
    pub right_leg_cm: Option<f64>,
    pub body_fat_pct: Option<f64>,
    pub notes: Option<String>,
}

impl MeasurementRequest {
    /// Validate and convert into column values. Blank notes become `None`.
    fn into_values(self) -> Result<MeasurementValues, CoreError> {
        self.validate()?;

        let missing = |field: &str| CoreError::Validation(format!("{field} is required"));
        Ok(MeasurementValues {
            client_id: self.client_id.ok_or_else(|| missing("client_id"))?,
            measured_on: self.measured_on.ok_or_else(|| missing("measured_on"))?,
            weight_kg: self.weight_kg.ok_or_else(|| missing("weight_kg"))?,
            height_cm: self.height_cm.ok_or_else(|| missing("height_cm"))?,
            chest_cm: self.chest_cm.ok_or_else(|| missing("chest_cm"))?,
            waist_cm: self.waist_cm.ok_or_else(|| missing("waist_cm"))?,
            hip_cm: self.hip_cm.ok_or_else(|| missing("hip_cm"))?,
            left_arm_cm: self.left_arm_cm.ok_or_else(|| missing("left_arm_cm"))?,
            right_arm_cm: self.right_arm_cm.ok_or_else(|| missing("right_arm_cm"))?,
            left_leg_cm: self.left_leg_cm.ok_or_else(|| missing("left_leg_cm"))?,
            right_leg_cm: self.right_leg_cm.ok_or_else(|| missing("right_leg_cm"))?,
            body_fat_pct: self.body_fat_pct,
            notes: normalize_note(self.notes.as_deref()),
        })
    }
}

/// A rendered PDF and the file name it should be downloaded as.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Measurement use cases. Every method is scoped to one gym.
#[derive(Clone)]
pub struct MeasurementService {
    pool: DbPool,
}

impl MeasurementService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Validate `request` and store it for a client of `tenant`.
    pub async fn create(
        &self,
        tenant: TenantId,
        request: MeasurementRequest,
    ) -> AppResult<Measurement> {
        let values = request.into_values()?;
        self.require_client(tenant, values.client_id).await?;

        let measurement = MeasurementRepo::create(&self.pool, tenant, &values).await?;
        tracing::info!(
            gym_id = %tenant,
            client_id = measurement.client_id,
            measurement_id = measurement.id,
            "Measurement created",
        );
        Ok(measurement)
    }

    /// One page of `tenant`'s measurements, optionally for one client.
    pub async fn list(
        &self,
        tenant: TenantId,
        client_id: Option<DbId>,
        page: PageRequest,
        sort: MeasurementSort,
    ) -> AppResult<Page<Measurement>> {
        let filter = MeasurementFilter { client_id };
        let items = MeasurementRepo::list(&self.pool, tenant, &filter, sort, page).await?;
        let total = MeasurementRepo::count(&self.pool, tenant, &filter).await?;
        Ok(Page::new(items, page, total))
    }

    pub async fn get_by_id(&self, tenant: TenantId, id: DbId) -> AppResult<Measurement> {
        MeasurementRepo::find_by_id(&self.pool, tenant, id)
            .await?
            .ok_or_else(|| measurement_not_found(id))
    }

    /// Replace a measurement. Same validation and client check as create.
    pub async fn update(
        &self,
        tenant: TenantId,
        id: DbId,
        request: MeasurementRequest,
    ) -> AppResult<Measurement> {
        let values = request.into_values()?;
        self.require_client(tenant, values.client_id).await?;

        let measurement = MeasurementRepo::update(&self.pool, tenant, id, &values)
            .await?
            .ok_or_else(|| measurement_not_found(id))?;
        tracing::info!(gym_id = %tenant, measurement_id = id, "Measurement updated");
        Ok(measurement)
    }

    pub async fn delete(&self, tenant: TenantId, id: DbId) -> AppResult<()> {
        if !MeasurementRepo::delete(&self.pool, tenant, id).await? {
            return Err(measurement_not_found(id));
        }
        tracing::info!(gym_id = %tenant, measurement_id = id, "Measurement deleted");
        Ok(())
    }

    /// PDF of every measurement of one client, newest first.
    pub async fn build_report_pdf(
        &self,
        tenant: TenantId,
        client_id: Option<DbId>,
    ) -> AppResult<RenderedReport> {
        let client_id = client_id
            .ok_or_else(|| CoreError::Validation("client_id is required".into()))?;
        let client = ClientRepo::find_by_id(&self.pool, tenant, client_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Client",
                id: client_id,
            })?;

        let measurements = MeasurementRepo::list_for_client(&self.pool, tenant, client.id).await?;
        let rows: Vec<ReportMeasurement> = measurements.iter().map(Into::into).collect();
        let generated_on = chrono::Utc::now().date_naive();
        let document = list_report(&ReportClient::from(&client), &rows, generated_on);

        let bytes = render(document).await?;
        tracing::info!(
            gym_id = %tenant,
            client_id,
            measurements = rows.len(),
            size_bytes = bytes.len(),
            "Client measurement report rendered",
        );
        Ok(RenderedReport {
            filename: client_report_filename(&client.first_name, client.last_name.as_deref()),
            bytes,
        })
    }

    /// PDF of a single measurement.
    pub async fn build_detail_report_pdf(
        &self,
        tenant: TenantId,
        measurement_id: Option<DbId>,
    ) -> AppResult<RenderedReport> {
        let id = measurement_id
            .ok_or_else(|| CoreError::Validation("measurement id is required".into()))?;
        let measurement = self.get_by_id(tenant, id).await?;
        let client = ClientRepo::find_by_id(&self.pool, tenant, measurement.client_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Client",
                id: measurement.client_id,
            })?;

        let document = detail_report(
            &ReportClient::from(&client),
            &ReportMeasurement::from(&measurement),
        );

        let bytes = render(document).await?;
        tracing::info!(
            gym_id = %tenant,
            measurement_id = id,
            size_bytes = bytes.len(),
            "Measurement detail report rendered",
        );
        Ok(RenderedReport {
            filename: detail_report_filename(id),
            bytes,
        })
    }

    /// Resolve `client_id` within `tenant`, or fail validation.
    async fn require_client(&self, tenant: TenantId, client_id: DbId) -> AppResult<Client> {
        ClientRepo::find_by_id(&self.pool, tenant, client_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation(
                    "client does not belong to this gym".into(),
                ))
            })
    }
}

fn measurement_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Measurement",
        id,
    })
}

/// Lay out and serialise the PDF off the async runtime.
async fn render(document: ReportDocument) -> AppResult<Vec<u8>> {
    tokio::task::spawn_blocking(move || render_pdf(&document))
        .await
        .map_err(|e| CoreError::Internal(format!("report task failed: {e}")))?
        .map_err(CoreError::from)
        .map_err(AppError::from)
}
