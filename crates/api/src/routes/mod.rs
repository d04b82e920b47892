pub mod backup;
pub mod client;
pub mod health;
pub mod measurement;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree for the JWT-protected resources.
///
/// `/backup` is mounted separately by
/// [`build_app_router`](crate::router::build_app_router) so the request
/// timeout does not cut a running backup short.
///
/// ```text
/// /clients                          create, list (JWT)
/// /clients/{id}                     get (JWT)
///
/// /measurements                     create, list (JWT)
/// /measurements/{id}                get, update, delete (JWT)
/// /measurements/{id}/report/pdf     single-measurement PDF (JWT)
/// /measurements/report/pdf          client history PDF (JWT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/clients", client::router())
        .nest("/measurements", measurement::router())
}
