//! Contains all the routes that this application can handle.

mod api;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};

use crate::{web::Error, AppState};

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Non-POST requests on the subscribe route get an explicit JSON 405.
async fn method_not_allowed() -> Error {
    Error::MethodNotAllowed
}

/// All the routes of the server
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes(app_state))
        .route("/health-check", get(health_check))
}

/// API - Routes nested under "/api" path
fn api_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/subscribe",
            post(api::subscribe).fallback(method_not_allowed),
        )
        .with_state(app_state)
}
