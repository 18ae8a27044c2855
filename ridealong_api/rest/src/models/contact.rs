use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ridealong_models::contact::SubmissionResult;

use super::ApiResponse;
use crate::errors::{error, GENERIC_ERROR_MESSAGE};

pub const ACCEPTED_MESSAGE: &str =
    "Your message has been sent successfully! We will get back to you soon.";
pub const VALIDATION_ERROR_MESSAGE: &str = "Validation error";

pub struct ApiSubmissionResult(pub SubmissionResult);

impl IntoResponse for ApiSubmissionResult {
    fn into_response(self) -> Response {
        match self.0 {
            SubmissionResult::Accepted { message } => {
                (StatusCode::OK, Json(ApiResponse::success(message))).into_response()
            }
            SubmissionResult::ValidationFailed { violations } => {
                let body = ApiResponse {
                    errors: Some(violations),
                    ..ApiResponse::failure(VALIDATION_ERROR_MESSAGE)
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            SubmissionResult::RelayFailed => {
                error(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_MESSAGE)
            }
        }
    }
}
