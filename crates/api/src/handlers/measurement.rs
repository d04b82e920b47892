//! Handlers for the `/measurements` resource.

use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mastergym_core::paging::{MeasurementSort, Page, PageRequest};
use mastergym_core::types::DbId;
use mastergym_db::models::measurement::Measurement;

use crate::error::AppResult;
use crate::middleware::TenantContext;
use crate::query::{ClientReportParams, MeasurementListParams};
use crate::response::DataResponse;
use crate::services::{MeasurementRequest, MeasurementService, RenderedReport};
use crate::state::AppState;

/// POST /api/measurements
pub async fn create(
    State(state): State<AppState>,
    ctx: TenantContext,
    Json(input): Json<MeasurementRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Measurement>>)> {
    let measurement = MeasurementService::new(state.pool)
        .create(ctx.tenant, input)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: measurement }),
    ))
}

/// GET /api/measurements
///
/// Paged, newest first unless `sort` says otherwise. `size` may not exceed 500.
pub async fn list(
    State(state): State<AppState>,
    ctx: TenantContext,
    Query(params): Query<MeasurementListParams>,
) -> AppResult<Json<DataResponse<Page<Measurement>>>> {
    let page = PageRequest::new(params.page, params.size)?;
    let sort = match params.sort.as_deref() {
        Some(raw) => MeasurementSort::parse(raw)?,
        None => MeasurementSort::default(),
    };

    let page = MeasurementService::new(state.pool)
        .list(ctx.tenant, params.client_id, page, sort)
        .await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/measurements/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Measurement>>> {
    let measurement = MeasurementService::new(state.pool)
        .get_by_id(ctx.tenant, id)
        .await?;
    Ok(Json(DataResponse { data: measurement }))
}

/// PUT /api/measurements/{id}
pub async fn update(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<DbId>,
    Json(input): Json<MeasurementRequest>,
) -> AppResult<Json<DataResponse<Measurement>>> {
    let measurement = MeasurementService::new(state.pool)
        .update(ctx.tenant, id, input)
        .await?;
    Ok(Json(DataResponse { data: measurement }))
}

/// DELETE /api/measurements/{id}
pub async fn delete(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    MeasurementService::new(state.pool)
        .delete(ctx.tenant, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/measurements/report/pdf?client_id=
pub async fn client_report(
    State(state): State<AppState>,
    ctx: TenantContext,
    Query(params): Query<ClientReportParams>,
) -> AppResult<Response> {
    let report = MeasurementService::new(state.pool)
        .build_report_pdf(ctx.tenant, params.client_id)
        .await?;
    Ok(pdf_attachment(report))
}

/// GET /api/measurements/{id}/report/pdf
pub async fn detail_report(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let report = MeasurementService::new(state.pool)
        .build_detail_report_pdf(ctx.tenant, Some(id))
        .await?;
    Ok(pdf_attachment(report))
}

fn pdf_attachment(report: RenderedReport) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", report.filename);
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    )
        .into_response()
}
