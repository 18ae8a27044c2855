use std::{future::Future, sync::Arc};

use anyhow::Context;
use reqwest::{
    header::{HeaderValue, ACCEPT},
    StatusCode,
};
use ridealong_models::contact::{SubmissionResult, Violation};
use ridealong_utils::ridealong_version;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::state::ContactFormFields;

const CONTACT_ROUTE: &str = "/api/contact";

/// Transport used by the controller to reach the contact endpoint.
#[cfg_attr(test, mockall::automock)]
pub trait ContactApi: Send + Sync + 'static {
    /// Sends the form fields once.
    ///
    /// Errors are transport failures or responses that could not be
    /// understood. Rejections by the server are reported as
    /// [`SubmissionResult`] variants.
    fn submit(
        &self,
        fields: &ContactFormFields,
    ) -> impl Future<Output = anyhow::Result<SubmissionResult>> + Send;
}

#[derive(Debug, Clone)]
pub struct ContactApiClient {
    client: reqwest::Client,
    endpoint: Arc<Url>,
}

impl ContactApiClient {
    /// Creates a client for the REST API served at `base_url`.
    pub fn new(base_url: &Url) -> anyhow::Result<Self> {
        let endpoint = base_url
            .join(CONTACT_ROUTE)
            .context("Failed to build contact endpoint url")?;
        let client = reqwest::Client::builder()
            .user_agent(format!(
                "Ride Along Contact Client (Version {})",
                ridealong_version()
            ))
            .build()
            .context("Failed to build http client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[derive(Deserialize)]
struct ContactResponse {
    success: bool,
    message: String,
    #[serde(default)]
    errors: Vec<Violation>,
}

impl ContactApi for ContactApiClient {
    async fn submit(&self, fields: &ContactFormFields) -> anyhow::Result<SubmissionResult> {
        let response = self
            .client
            .post((*self.endpoint).clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(fields)
            .send()
            .await?;

        let status = response.status();
        debug!(%status, "contact endpoint responded");

        match status {
            StatusCode::OK => {
                let body = response.json::<ContactResponse>().await?;
                Ok(match body.success {
                    true => SubmissionResult::Accepted {
                        message: body.message,
                    },
                    false => SubmissionResult::RelayFailed,
                })
            }
            StatusCode::BAD_REQUEST => {
                let body = response.json::<ContactResponse>().await?;
                Ok(SubmissionResult::ValidationFailed {
                    violations: body.errors,
                })
            }
            _ => Ok(SubmissionResult::RelayFailed),
        }
    }
}
