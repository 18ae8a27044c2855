use std::future::Future;

use ridealong_models::contact::Violation;
use serde_json::Value;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Validates the untyped `input` and forwards it to the relay.
    ///
    /// The relay is only contacted if the input passes validation.
    fn submit(&self, input: Value) -> impl Future<Output = Result<(), ContactSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("Validation error")]
    Validation(Vec<Violation>),
    #[error("The relay did not accept the message.")]
    Relay,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_submit(mut self, input: Value, result: Result<(), ContactSubmitError>) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(input))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
