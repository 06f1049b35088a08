use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::{kit_client, utils, web::data::DataParsingError};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error)]
pub enum Error {
    #[error("http method not allowed")]
    MethodNotAllowed,
    #[error("data parsing error: {0}")]
    DataParsing(#[from] DataParsingError),
    #[error("kit credentials are not configured")]
    MissingCredentials,
    #[error("kit rejected the subscription, status: {status}")]
    SubscribeRejected { status: StatusCode, details: Value },
    #[error("kit reported success without creating a subscription")]
    SubscriptionNotCreated { details: Value },

    #[error("kit client error: {0}")]
    KitClient(#[from] kit_client::Error),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        utils::error_chain_fmt(self, f)
    }
}

impl Error {
    /// Maps every failure onto the response contract: a status code and a JSON
    /// body carrying an `error` string, with upstream `details` where we have them.
    pub fn status_code_and_body(&self) -> (StatusCode, Value) {
        match self {
            Error::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({ "error": "Method not allowed" }),
            ),
            Error::DataParsing(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Email is required" }),
            ),
            Error::MissingCredentials => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Server configuration error" }),
            ),
            Error::SubscribeRejected { status, details } => (
                *status,
                json!({ "error": "Failed to subscribe", "details": details }),
            ),
            Error::SubscriptionNotCreated { details } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Subscription not created", "details": details }),
            ),
            Error::KitClient(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error" }),
            ),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("{:<12} - {self:?}", "INTO_RESP");

        let (status_code, body) = self.status_code_and_body();
        (status_code, Json(body)).into_response()
    }
}
