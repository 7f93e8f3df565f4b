pub mod smtp;

use async_trait::async_trait;

use crate::error::PublishError;

pub use smtp::SmtpMailer;

/// One blog post delivered by email. The category rides on the subject as a
/// `#tag`, which the blog turns into a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub category: String,
    pub html_body: String,
}

impl EmailMessage {
    pub fn new(
        subject: impl Into<String>,
        category: impl Into<String>,
        html_body: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            category: category.into(),
            html_body: html_body.into(),
        }
    }

    pub fn full_subject(&self) -> String {
        format!("{} #{}", self.subject, self.category)
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), PublishError>;
}

/// Stand-in used when sending is switched off.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), PublishError> {
        tracing::info!(
            "Email sending disabled, would send {:?} ({} bytes of HTML)",
            message.full_subject(),
            message.html_body.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_subject() {
        let message = EmailMessage::new("Baby sleep tips", "育兒日記", "<p></p>");
        assert_eq!(message.full_subject(), "Baby sleep tips #育兒日記");
    }

    #[tokio::test]
    async fn test_log_mailer_always_succeeds() {
        let message = EmailMessage::new("s", "c", "<p>b</p>");
        assert!(LogMailer.send(&message).await.is_ok());
    }
}
