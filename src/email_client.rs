use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

/// A single outbound message, borrowed from the caller.
#[derive(Debug, Clone, Copy)]
pub struct EmailMessage<'a> {
    pub to: &'a str,
    pub from: &'a str,
    pub subject: &'a str,
    pub text: &'a str,
    pub html: &'a str,
}

#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("Failed to reach the email provider.")]
    Transport(#[from] reqwest::Error),
    #[error("The email provider rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Transactional email delivery capability.
pub trait EmailProvider: Send + Sync + 'static {
    fn send(
        &self,
        message: &EmailMessage<'_>,
    ) -> impl Future<Output = Result<(), ProviderError>> + Send;
}

/// Builds a ready-to-use provider from an API key.
pub trait ProviderConnector: Send + Sync + 'static {
    type Provider: EmailProvider;

    fn connect(&self, api_key: &SecretString) -> Result<Self::Provider, ProviderError>;
}

#[derive(Debug, Clone)]
pub struct SendGridConnector {
    send_url: Url,
    timeout: Duration,
}

impl SendGridConnector {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, anyhow::Error> {
        let send_url = Url::parse(base_url)
            .and_then(|url| url.join("v3/mail/send"))
            .with_context(|| format!("Failed parsing email provider base url `{base_url}`."))?;

        Ok(Self { send_url, timeout })
    }
}

impl ProviderConnector for SendGridConnector {
    type Provider = SendGridClient;

    fn connect(&self, api_key: &SecretString) -> Result<SendGridClient, ProviderError> {
        let http_client = Client::builder().timeout(self.timeout).build()?;

        Ok(SendGridClient {
            http_client,
            send_url: self.send_url.clone(),
            api_key: api_key.clone(),
        })
    }
}

#[derive(Clone)]
pub struct SendGridClient {
    http_client: Client,
    send_url: Url,
    api_key: SecretString,
}

#[derive(Serialize)]
struct EmailUnit<'a> {
    email: &'a str,
}

impl<'a> EmailUnit<'a> {
    fn new(email: &'a str) -> Self {
        Self { email }
    }
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: Vec<EmailUnit<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'static str,
    value: &'a str,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: EmailUnit<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

impl<'a> From<&EmailMessage<'a>> for SendEmailRequest<'a> {
    fn from(message: &EmailMessage<'a>) -> Self {
        // SendGrid requires text/plain to come before text/html.
        Self {
            personalizations: vec![Personalization {
                to: vec![EmailUnit::new(message.to)],
            }],
            from: EmailUnit::new(message.from),
            subject: message.subject,
            content: vec![
                Content {
                    content_type: "text/plain",
                    value: message.text,
                },
                Content {
                    content_type: "text/html",
                    value: message.html,
                },
            ],
        }
    }
}

impl EmailProvider for SendGridClient {
    #[tracing::instrument(name = "Calling the SendGrid mail send API", skip_all)]
    async fn send(&self, message: &EmailMessage<'_>) -> Result<(), ProviderError> {
        let body = SendEmailRequest::from(message);

        let response = self
            .http_client
            .post(self.send_url.clone())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
