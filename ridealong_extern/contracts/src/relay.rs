use std::future::Future;

use ridealong_models::contact::ContactSubmission;

/// Forwards contact submissions to the external form relay.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait RelayApiService: Send + Sync + 'static {
    /// Delivers `submission` with a single request.
    ///
    /// Returns `Ok(true)` if the relay answered with a success status and
    /// `Ok(false)` for any other status. Transport failures are returned as
    /// errors.
    fn deliver(
        &self,
        submission: &ContactSubmission,
    ) -> impl Future<Output = anyhow::Result<bool>> + Send;
}

#[cfg(feature = "mock")]
impl MockRelayApiService {
    pub fn with_deliver(mut self, submission: ContactSubmission, result: bool) -> Self {
        self.expect_deliver()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_deliver_error(mut self, submission: ContactSubmission, error: &'static str) -> Self {
        self.expect_deliver()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(Err(anyhow::anyhow!(error)))));
        self
    }
}
