//! Handler for the backup trigger.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use mastergym_core::backup::BackupOutcome;

use crate::response::DataResponse;
use crate::state::AppState;

/// Header carrying the shared backup secret.
pub const BACKUP_TOKEN_HEADER: &str = "x-backup-token";

/// POST /api/backup
///
/// Not JWT-protected: the shared token is the only gate. Always 200; the
/// outcome body says whether the backup ran and how it ended.
pub async fn trigger(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<DataResponse<BackupOutcome>> {
    let token = headers
        .get(BACKUP_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());
    let outcome = state.backup.trigger(token).await;
    Json(DataResponse { data: outcome })
}
