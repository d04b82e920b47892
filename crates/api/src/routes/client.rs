//! Route definitions for the `/clients` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::client;
use crate::state::AppState;

/// Routes mounted at `/clients`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(client::list).post(client::create))
        .route("/{id}", get(client::get_by_id))
}
