use axum::routing::post;
use axum::Router;

use crate::handlers::backup;
use crate::state::AppState;

/// Routes mounted at `/backup`.
///
/// ```text
/// POST   /   -> trigger
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(backup::trigger))
}
