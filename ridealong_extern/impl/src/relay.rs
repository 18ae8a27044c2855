use std::{sync::Arc, time::Duration};

use reqwest::header::{HeaderValue, ACCEPT};
use ridealong_extern_contracts::relay::RelayApiService;
use ridealong_models::contact::ContactSubmission;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct RelayApiServiceImpl {
    config: RelayApiServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct RelayApiServiceConfig {
    pub endpoint: Arc<Url>,
    pub timeout: Option<Duration>,
}

impl RelayApiServiceImpl {
    pub fn new(config: RelayApiServiceConfig) -> anyhow::Result<Self> {
        let client = HttpClient::new(config.timeout)?;
        Ok(Self { config, client })
    }
}

impl RelayApiService for RelayApiServiceImpl {
    async fn deliver(&self, submission: &ContactSubmission) -> anyhow::Result<bool> {
        let response = self
            .client
            .post((*self.config.endpoint).clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(&RelayRequest::from(submission))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "relay rejected submission");
            return Ok(false);
        }

        debug!(%status, "relay accepted submission");
        Ok(true)
    }
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

impl<'a> From<&'a ContactSubmission> for RelayRequest<'a> {
    fn from(value: &'a ContactSubmission) -> Self {
        Self {
            name: &value.name,
            email: value.email.as_str(),
            subject: &value.subject,
            message: &value.message,
        }
    }
}
