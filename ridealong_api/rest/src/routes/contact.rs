use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    routing, Router,
};
use ridealong_core_contact_contracts::{ContactService, ContactSubmitError};
use ridealong_models::contact::{SubmissionResult, Violation};
use serde_json::Value;
use tracing::debug;

use crate::{
    errors::internal_server_error,
    models::contact::{ApiSubmissionResult, ACCEPTED_MESSAGE},
};

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(submit))
        .with_state(service)
}

async fn submit(service: State<Arc<impl ContactService>>, body: Bytes) -> Response {
    // parsed by hand so that malformed bodies get the regular validation response
    let input = match serde_json::from_slice::<Value>(&body) {
        Ok(input) => input,
        Err(err) => {
            debug!("failed to parse contact submission: {err}");
            return ApiSubmissionResult(SubmissionResult::ValidationFailed {
                violations: vec![Violation::new("", "Invalid JSON body")],
            })
            .into_response();
        }
    };

    let result = match service.submit(input).await {
        Ok(()) => SubmissionResult::Accepted {
            message: ACCEPTED_MESSAGE.into(),
        },
        Err(ContactSubmitError::Validation(violations)) => {
            SubmissionResult::ValidationFailed { violations }
        }
        Err(ContactSubmitError::Relay) => SubmissionResult::RelayFailed,
        Err(ContactSubmitError::Other(err)) => return internal_server_error(err),
    };

    ApiSubmissionResult(result).into_response()
}
