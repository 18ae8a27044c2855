use anyhow::{bail, ensure, Context};
use clap::Subcommand;
use ridealong_client::{
    Banner, ContactApiClient, ContactFormConfig, ContactFormController, ContactFormFields,
};
use ridealong_config::Config;
use ridealong_extern_contracts::relay::RelayApiService;
use ridealong_models::contact::ContactSubmission;
use serde_json::json;
use url::Url;

use crate::environment;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Submit a message through the contact endpoint of a running server
    Send {
        /// Base url of the server, defaults to the configured http address
        #[arg(long)]
        url: Option<Url>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
    /// Send a test message directly to the configured relay
    TestRelay {
        /// Reply address of the test message
        email: String,
    },
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            ContactCommand::Send {
                url,
                name,
                email,
                subject,
                message,
            } => {
                let fields = ContactFormFields {
                    name,
                    email,
                    subject,
                    message,
                };
                send(config, url, fields).await
            }
            ContactCommand::TestRelay { email } => test_relay(config, email).await,
        }
    }
}

async fn send(config: Config, url: Option<Url>, fields: ContactFormFields) -> anyhow::Result<()> {
    let url = match url {
        Some(url) => url,
        None => format!("http://{}/", config.http.address)
            .parse()
            .context("Failed to build server url")?,
    };

    let controller = ContactFormController::new(
        ContactApiClient::new(&url)?,
        ContactFormConfig {
            success_banner_ttl: config.contact.success_banner_ttl.into(),
        },
    );
    controller.edit(|form| *form = fields);

    match controller.submit().await? {
        Banner::Success { message } => {
            println!("{message}");
            Ok(())
        }
        Banner::Error {
            message,
            violations,
        } => {
            for violation in violations {
                eprintln!("{}: {}", violation.path, violation.message);
            }
            bail!("{message}")
        }
    }
}

async fn test_relay(config: Config, email: String) -> anyhow::Result<()> {
    let relay = environment::relay(&config)?;

    let submission = ContactSubmission::validate(&json!({
        "name": "Ride Along",
        "email": email,
        "subject": "Relay Deliverability Test",
        "message": "Relay deliverability seems to be working!",
    }))
    .map_err(|violations| {
        let details = violations
            .iter()
            .map(|v| format!("{}: {}", v.path, v.message))
            .collect::<Vec<_>>()
            .join(", ");
        anyhow::anyhow!("Invalid test message: {details}")
    })?;

    let ok = relay.deliver(&submission).await?;
    ensure!(ok, "Relay did not accept the message");

    Ok(())
}
