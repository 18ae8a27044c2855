use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use ridealong_models::contact::SubmissionResult;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    api::ContactApi,
    state::{Banner, ContactFormFields, FormState},
};

pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent successfully.";
pub const ERROR_MESSAGE: &str =
    "Sorry, there was an error sending your message. Please try again.";

#[derive(Debug, Clone)]
pub struct ContactFormConfig {
    /// How long the success banner stays visible before the form returns to
    /// [`FormState::Idle`].
    pub success_banner_ttl: Duration,
}

impl Default for ContactFormConfig {
    fn default() -> Self {
        Self {
            success_banner_ttl: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("A submission is already in progress.")]
    Busy,
}

/// Drives one contact form instance.
///
/// Clones share the same form, so at most one submission per form can be in
/// flight at any time.
#[derive(Debug)]
pub struct ContactFormController<Api> {
    inner: Arc<Inner<Api>>,
}

impl<Api> Clone for ContactFormController<Api> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[derive(Debug)]
struct Inner<Api> {
    api: Api,
    config: ContactFormConfig,
    form: Mutex<Form>,
}

#[derive(Debug, Default)]
struct Form {
    fields: ContactFormFields,
    state: FormState,
    /// Incremented on every submission, lets stale dismissal timers detect
    /// that their banner has been replaced.
    generation: u64,
}

impl<Api> Inner<Api> {
    fn form(&self) -> MutexGuard<'_, Form> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the form to [`FormState::Idle`] if a submission is abandoned
/// before it resolves.
struct InFlight<'a, Api> {
    inner: &'a Inner<Api>,
    generation: u64,
}

impl<Api> Drop for InFlight<'_, Api> {
    fn drop(&mut self) {
        let mut form = self.inner.form();
        if form.generation == self.generation && form.state.is_pending() {
            debug!("contact submission cancelled");
            form.state = FormState::Idle;
        }
    }
}

impl<Api> ContactFormController<Api>
where
    Api: ContactApi,
{
    pub fn new(api: Api, config: ContactFormConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                config,
                form: Default::default(),
            }),
        }
    }

    pub fn state(&self) -> FormState {
        self.inner.form().state.clone()
    }

    pub fn fields(&self) -> ContactFormFields {
        self.inner.form().fields.clone()
    }

    /// Applies `f` to the current field values.
    pub fn edit(&self, f: impl FnOnce(&mut ContactFormFields)) {
        f(&mut self.inner.form().fields);
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.inner.form().state.is_pending()
    }

    /// Hides the current banner, if any.
    pub fn dismiss(&self) {
        let mut form = self.inner.form();
        if let FormState::Resolved(_) = form.state {
            form.state = FormState::Idle;
        }
    }

    /// Sends the current field values to the contact endpoint and returns
    /// the banner the form now shows.
    ///
    /// On success the fields are cleared and the banner is dismissed
    /// automatically after the configured delay. On failure the fields are
    /// kept so the user can correct and resubmit them.
    pub async fn submit(&self) -> Result<Banner, SubmitError> {
        let (fields, generation) = {
            let mut form = self.inner.form();
            if form.state.is_pending() {
                return Err(SubmitError::Busy);
            }
            form.state = FormState::Pending;
            form.generation += 1;
            (form.fields.clone(), form.generation)
        };
        let in_flight = InFlight {
            inner: &self.inner,
            generation,
        };

        let result = self.inner.api.submit(&fields).await;

        let banner = match result {
            Ok(SubmissionResult::Accepted { message }) => {
                debug!(%message, "contact message accepted");
                Banner::Success {
                    message: SUCCESS_MESSAGE.into(),
                }
            }
            Ok(SubmissionResult::ValidationFailed { violations }) => {
                debug!(?violations, "contact message rejected");
                Banner::Error {
                    message: ERROR_MESSAGE.into(),
                    violations,
                }
            }
            Ok(SubmissionResult::RelayFailed) => {
                warn!("contact message could not be delivered");
                Banner::Error {
                    message: ERROR_MESSAGE.into(),
                    violations: Vec::new(),
                }
            }
            Err(err) => {
                warn!("failed to submit contact message: {err:#}");
                Banner::Error {
                    message: ERROR_MESSAGE.into(),
                    violations: Vec::new(),
                }
            }
        };

        let success = matches!(banner, Banner::Success { .. });
        {
            let mut form = self.inner.form();
            if success {
                form.fields = ContactFormFields::default();
            }
            form.state = FormState::Resolved(banner.clone());
        }
        drop(in_flight);

        if success {
            self.schedule_dismissal(generation);
        }

        Ok(banner)
    }

    fn schedule_dismissal(&self, generation: u64) {
        let inner = Arc::clone(&self.inner);
        // the deadline is fixed now, not when the task is first polled
        let sleep = tokio::time::sleep(self.inner.config.success_banner_ttl);
        tokio::spawn(async move {
            sleep.await;
            let mut form = inner.form();
            if form.generation == generation
                && matches!(form.state, FormState::Resolved(Banner::Success { .. }))
            {
                debug!("dismissing success banner");
                form.state = FormState::Idle;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::future::ready;

    use pretty_assertions::assert_eq;
    use ridealong_models::contact::Violation;
    use ridealong_utils::assert_matches;
    use tokio::sync::oneshot;

    use super::*;
    use crate::api::MockContactApi;

    const TTL: Duration = Duration::from_secs(5);

    fn jane() -> ContactFormFields {
        ContactFormFields {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            subject: "Partnership enquiry".into(),
            message: "We would like to discuss a pilot.".into(),
        }
    }

    fn accepted() -> SubmissionResult {
        SubmissionResult::Accepted {
            message: "Your message has been sent successfully!".into(),
        }
    }

    fn make_sut(api: MockContactApi) -> ContactFormController<MockContactApi> {
        let sut = ContactFormController::new(
            api,
            ContactFormConfig {
                success_banner_ttl: TTL,
            },
        );
        sut.edit(|fields| *fields = jane());
        sut
    }

    fn expect_submit(api: &mut MockContactApi, times: usize, result: SubmissionResult) {
        api.expect_submit()
            .times(times)
            .with(mockall::predicate::eq(jane()))
            .returning(move |_| Box::pin(ready(Ok(result.clone()))));
    }

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn success_clears_fields_and_dismisses_banner() {
        // Arrange
        let mut api = MockContactApi::new();
        expect_submit(&mut api, 1, accepted());
        let sut = make_sut(api);

        // Act
        let result = sut.submit().await;

        // Assert
        let success = Banner::Success {
            message: SUCCESS_MESSAGE.into(),
        };
        assert_eq!(result, Ok(success.clone()));
        assert_eq!(sut.state(), FormState::Resolved(success.clone()));
        assert_eq!(sut.fields(), ContactFormFields::default());
        assert!(sut.can_submit());

        tokio::time::advance(TTL - Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(sut.state(), FormState::Resolved(success));

        tokio::time::advance(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(sut.state(), FormState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn validation_failure_keeps_fields() {
        // Arrange
        let violations = vec![Violation::new("name", "Name must be at least 2 characters")];
        let mut api = MockContactApi::new();
        expect_submit(
            &mut api,
            1,
            SubmissionResult::ValidationFailed {
                violations: violations.clone(),
            },
        );
        let sut = make_sut(api);

        // Act
        let result = sut.submit().await;

        // Assert
        let error = Banner::Error {
            message: ERROR_MESSAGE.into(),
            violations,
        };
        assert_eq!(result, Ok(error.clone()));
        assert_eq!(sut.fields(), jane());
        assert!(sut.can_submit());

        // error banners stay until the next submission
        tokio::time::advance(TTL * 2).await;
        settle().await;
        assert_eq!(sut.state(), FormState::Resolved(error));
    }

    #[tokio::test]
    async fn relay_failure_shows_error() {
        // Arrange
        let mut api = MockContactApi::new();
        expect_submit(&mut api, 1, SubmissionResult::RelayFailed);
        let sut = make_sut(api);

        // Act
        let result = sut.submit().await;

        // Assert
        assert_eq!(
            result,
            Ok(Banner::Error {
                message: ERROR_MESSAGE.into(),
                violations: vec![],
            })
        );
        assert_eq!(sut.fields(), jane());
    }

    #[tokio::test]
    async fn transport_failure_shows_error() {
        // Arrange
        let mut api = MockContactApi::new();
        api.expect_submit()
            .once()
            .returning(|_| Box::pin(ready(Err(anyhow::anyhow!("connection refused")))));
        let sut = make_sut(api);

        // Act
        let result = sut.submit().await;

        // Assert
        assert_matches!(result, Ok(Banner::Error { .. }));
        assert_eq!(sut.fields(), jane());
        assert!(sut.can_submit());
    }

    #[tokio::test]
    async fn resubmit_after_error() {
        // Arrange
        let mut api = MockContactApi::new();
        let mut seq = mockall::Sequence::new();
        api.expect_submit()
            .once()
            .in_sequence(&mut seq)
            .returning(|_| Box::pin(ready(Ok(SubmissionResult::RelayFailed))));
        api.expect_submit()
            .once()
            .in_sequence(&mut seq)
            .returning(|_| Box::pin(ready(Ok(accepted()))));
        let sut = make_sut(api);

        // Act
        let first = sut.submit().await;
        let second = sut.submit().await;

        // Assert
        assert_matches!(first, Ok(Banner::Error { .. }));
        assert_matches!(second, Ok(Banner::Success { .. }));
    }

    #[tokio::test]
    async fn busy_while_pending() {
        // Arrange
        let (tx, rx) = oneshot::channel::<SubmissionResult>();
        let mut api = MockContactApi::new();
        api.expect_submit().once().return_once(move |_| {
            Box::pin(async move {
                Ok::<_, anyhow::Error>(rx.await.unwrap_or(SubmissionResult::RelayFailed))
            })
        });
        let sut = make_sut(api);

        // Act
        let pending = tokio::spawn({
            let sut = sut.clone();
            async move { sut.submit().await }
        });
        settle().await;

        // Assert
        assert_eq!(sut.state(), FormState::Pending);
        assert!(!sut.can_submit());
        assert_eq!(sut.submit().await, Err(SubmitError::Busy));

        tx.send(accepted()).unwrap();
        assert_matches!(pending.await.unwrap(), Ok(Banner::Success { .. }));
        assert!(sut.can_submit());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_submit_unlocks_form() {
        // Arrange
        let mut api = MockContactApi::new();
        let mut seq = mockall::Sequence::new();
        api.expect_submit()
            .once()
            .in_sequence(&mut seq)
            .returning(|_| Box::pin(std::future::pending()));
        api.expect_submit()
            .once()
            .in_sequence(&mut seq)
            .returning(|_| Box::pin(ready(Ok(accepted()))));
        let sut = make_sut(api);

        // Act
        let cancelled = tokio::time::timeout(Duration::from_millis(10), sut.submit()).await;

        // Assert
        assert!(cancelled.is_err());
        assert_eq!(sut.state(), FormState::Idle);
        assert!(sut.can_submit());
        assert_eq!(sut.fields(), jane());
        assert_matches!(sut.submit().await, Ok(Banner::Success { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn stale_timer_keeps_newer_banner() {
        // Arrange
        let mut api = MockContactApi::new();
        expect_submit(&mut api, 2, accepted());
        let sut = make_sut(api);

        // Act
        sut.submit().await.unwrap();
        tokio::time::advance(Duration::from_secs(3)).await;
        sut.edit(|fields| *fields = jane());
        sut.submit().await.unwrap();

        // Assert
        tokio::time::advance(Duration::from_secs(2)).await;
        settle().await;
        assert_matches!(sut.state(), FormState::Resolved(Banner::Success { .. }));

        tokio::time::advance(Duration::from_secs(3)).await;
        settle().await;
        assert_eq!(sut.state(), FormState::Idle);
    }

    #[tokio::test]
    async fn dismiss() {
        let mut api = MockContactApi::new();
        expect_submit(&mut api, 1, SubmissionResult::RelayFailed);
        let sut = make_sut(api);

        sut.submit().await.unwrap();
        sut.dismiss();

        assert_eq!(sut.state(), FormState::Idle);
        assert_eq!(sut.fields(), jane());
    }
}
