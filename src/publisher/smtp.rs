use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use super::{EmailMessage, Mailer};
use crate::config::SmtpConfig;
use crate::error::PublishError;

/// Sends over an implicit-TLS relay, authenticating with the account's app
/// password. One connection per message, no retry.
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn credentials(&self) -> Result<(&str, &str, &str), PublishError> {
        match (
            self.config.username.as_deref(),
            self.config.password.as_deref(),
            self.config.recipient.as_deref(),
        ) {
            (Some(username), Some(password), Some(recipient)) => Ok((username, password, recipient)),
            _ => Err(PublishError::MissingCredentials),
        }
    }

    pub fn build_message(&self, message: &EmailMessage) -> Result<Message, PublishError> {
        let (username, _, recipient) = self.credentials()?;
        let from: Mailbox = username.parse()?;
        let to: Mailbox = recipient.parse()?;

        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(message.full_subject())
            .multipart(MultiPart::mixed().singlepart(SinglePart::html(message.html_body.clone())))?;
        Ok(email)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), PublishError> {
        let email = self.build_message(message)?;
        let (username, password, _) = self.credentials()?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)?
            .port(self.config.port)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();

        let response = transport.send(email).await?;
        tracing::info!(
            "Email accepted by {} ({})",
            self.config.host,
            response.code()
        );
        Ok(())
    }
}
