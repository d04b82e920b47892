//! Route definitions for the `/measurements` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::measurement;
use crate::state::AppState;

/// Routes mounted at `/measurements`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /report/pdf        -> client_report
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete
/// GET    /{id}/report/pdf   -> detail_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(measurement::list).post(measurement::create))
        .route("/report/pdf", get(measurement::client_report))
        .route(
            "/{id}",
            get(measurement::get_by_id)
                .put(measurement::update)
                .delete(measurement::delete),
        )
        .route("/{id}/report/pdf", get(measurement::detail_report))
}
