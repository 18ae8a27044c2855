use ridealong_core_contact_contracts::{ContactService, ContactSubmitError};
use ridealong_extern_contracts::relay::RelayApiService;
use ridealong_models::contact::ContactSubmission;
use serde_json::Value;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Relay> {
    relay: Relay,
}

impl<Relay> ContactServiceImpl<Relay> {
    pub fn new(relay: Relay) -> Self {
        Self { relay }
    }
}

impl<Relay> ContactService for ContactServiceImpl<Relay>
where
    Relay: RelayApiService,
{
    async fn submit(&self, input: Value) -> Result<(), ContactSubmitError> {
        let submission = ContactSubmission::validate(&input).map_err(|violations| {
            debug!(?violations, "rejected contact submission");
            ContactSubmitError::Validation(violations)
        })?;

        if !self.relay.deliver(&submission).await? {
            warn!("relay did not accept contact submission");
            return Err(ContactSubmitError::Relay);
        }

        Ok(())
    }
}
