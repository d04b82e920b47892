//! Handlers for the `/clients` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use mastergym_core::client::validate_first_name;
use mastergym_core::error::CoreError;
use mastergym_core::types::DbId;
use mastergym_db::models::client::{Client, CreateClient};
use mastergym_db::repositories::ClientRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::TenantContext;
use crate::query::ClientListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/clients
pub async fn create(
    State(state): State<AppState>,
    ctx: TenantContext,
    Json(input): Json<CreateClient>,
) -> AppResult<(StatusCode, Json<DataResponse<Client>>)> {
    validate_first_name(&input.first_name)?;
    let client = ClientRepo::create(&state.pool, ctx.tenant, &input).await?;
    tracing::info!(gym_id = %ctx.tenant, client_id = client.id, "Client created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: client })))
}

/// GET /api/clients
///
/// With `expiring_on`, only clients whose membership ends that day.
pub async fn list(
    State(state): State<AppState>,
    ctx: TenantContext,
    Query(params): Query<ClientListParams>,
) -> AppResult<Json<DataResponse<Vec<Client>>>> {
    let clients = match params.expiring_on {
        Some(date) => ClientRepo::list_expiring_on(&state.pool, ctx.tenant, date).await?,
        None => ClientRepo::list(&state.pool, ctx.tenant).await?,
    };
    Ok(Json(DataResponse { data: clients }))
}

/// GET /api/clients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Client>>> {
    let client = ClientRepo::find_by_id(&state.pool, ctx.tenant, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id,
        }))?;
    Ok(Json(DataResponse { data: client }))
}
