use anyhow::Context;
use once_cell::sync::OnceCell;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::{NewMember, NewMemberError, WelcomeRequest};
use crate::email_client::{EmailMessage, EmailProvider, ProviderConnector, ProviderError};
use crate::routes::error_chain_fmt;
use crate::welcome_email::{Branding, build_welcome_email};

/// Operational settings required for any send. Checked on every call, not at startup.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub api_key: Option<SecretString>,
    pub sender_email: Option<String>,
}

/// Acknowledgment that the provider accepted the message.
#[derive(serde::Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub delivered: bool,
}

#[derive(thiserror::Error)]
pub enum WelcomeEmailError {
    #[error("Missing required environment configuration: {0}.")]
    ConfigurationError(&'static str),
    #[error("{0}")]
    ValidationError(NewMemberError),
    #[error("Failed to dispatch the welcome email.")]
    DispatchError(#[source] ProviderError),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for WelcomeEmailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Sends welcome emails through a lazily connected provider.
///
/// The provider is connected on the first send that passes the
/// configuration and input checks, and reused afterwards.
pub struct WelcomeMailer<C: ProviderConnector> {
    credentials: Credentials,
    branding: Branding,
    connector: C,
    provider: OnceCell<C::Provider>,
}

impl<C: ProviderConnector> WelcomeMailer<C> {
    pub fn new(credentials: Credentials, branding: Branding, connector: C) -> Self {
        Self {
            credentials,
            branding,
            connector,
            provider: OnceCell::new(),
        }
    }

    #[tracing::instrument(
        name = "Sending a welcome email",
        skip(self, request),
        fields(recipient_email = tracing::field::Empty)
    )]
    pub async fn send_welcome_email(
        &self,
        request: WelcomeRequest,
    ) -> Result<Delivery, WelcomeEmailError> {
        let (api_key, sender_email) = self.required_credentials()?;

        let member = NewMember::parse(request).map_err(WelcomeEmailError::ValidationError)?;
        tracing::Span::current().record(
            "recipient_email",
            tracing::field::display(member.email.as_ref()),
        );

        let provider = self.provider(api_key)?;

        let email = build_welcome_email(&member, &self.branding)
            .context("Failed to render the welcome email.")?;

        let message = EmailMessage {
            to: member.email.as_ref(),
            from: sender_email,
            subject: &email.subject,
            text: &email.text,
            html: &email.html,
        };

        provider
            .send(&message)
            .await
            .map_err(WelcomeEmailError::DispatchError)?;

        Ok(Delivery { delivered: true })
    }

    fn required_credentials(&self) -> Result<(&SecretString, &str), WelcomeEmailError> {
        let api_key = self
            .credentials
            .api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
            .ok_or(WelcomeEmailError::ConfigurationError("email provider API key"))?;

        let sender_email = self
            .credentials
            .sender_email
            .as_deref()
            .filter(|sender| !sender.trim().is_empty())
            .ok_or(WelcomeEmailError::ConfigurationError("sender email address"))?;

        Ok((api_key, sender_email))
    }

    fn provider(&self, api_key: &SecretString) -> Result<&C::Provider, WelcomeEmailError> {
        self.provider
            .get_or_try_init(|| {
                tracing::info!("Connecting the email provider client");
                self.connector.connect(api_key)
            })
            .map_err(WelcomeEmailError::DispatchError)
    }
}
