use std::borrow::Cow;

use ridealong_models::contact::Violation;
use serde::Serialize;

pub mod contact;

/// Envelope shared by all JSON responses of the contact endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<Violation>>,
}

impl ApiResponse {
    pub fn success(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            success: true,
            message: message.into(),
            errors: None,
        }
    }

    pub fn failure(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
        }
    }
}
