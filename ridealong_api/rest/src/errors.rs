use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiResponse;

pub const GENERIC_ERROR_MESSAGE: &str =
    "An error occurred while processing your request. Please try again later.";

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_MESSAGE)
}

pub fn error(code: StatusCode, message: &'static str) -> Response {
    (code, Json(ApiResponse::failure(message))).into_response()
}
