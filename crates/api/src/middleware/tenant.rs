//! JWT-based tenant extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use mastergym_core::error::CoreError;
use mastergym_core::tenant::TenantId;
use mastergym_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller and the gym their request is scoped to.
///
/// Use this as an extractor parameter in every tenant-scoped handler:
///
/// ```ignore
/// async fn my_handler(ctx: TenantContext) -> AppResult<Json<()>> {
///     tracing::info!(gym_id = %ctx.tenant, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TenantContext {
    /// The staff user's id (from `claims.sub`).
    pub user_id: DbId,
    /// The gym every query of this request is scoped to.
    pub tenant: TenantId,
}

impl FromRequestParts<AppState> for TenantContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(TenantContext {
            user_id: claims.sub,
            tenant: TenantId::new(claims.gym_id),
        })
    }
}
