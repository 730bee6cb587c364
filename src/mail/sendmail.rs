use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters, TlsVersion},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;
use tracing::{error, info};

use crate::config::Config;

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);
const GREETING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum MailError {
    #[error("{0}")]
    Verification(String),

    #[error("Failed to build email: {0}")]
    Build(String),

    #[error("SMTP send failed: {0}")]
    Delivery(String),

    #[error("Invalid mailbox '{0}'")]
    Address(String),

    #[error("Failed to configure SMTP transport: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

/// A fully composed message, independent of the transport that delivers it.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEmail {
    pub from: Mailbox,
    pub to: Vec<Mailbox>,
    pub reply_to: Option<Mailbox>,
    pub subject: String,
    pub html_body: String,
    pub attachments: Vec<EmailAttachment>,
}

/// Delivery seam: the SMTP relay in production, a recording fake in tests.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Connects and authenticates without sending anything.
    async fn verify(&self) -> Result<(), MailError>;

    /// Sends exactly once; callers get no retry.
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
    port: u16,
    secure: bool,
    user: String,
}

impl SmtpMailer {
    pub fn from_config(config: &Config) -> Result<Self, MailError> {
        // Relay certificates are not validated.
        let tls_parameters = TlsParameters::builder(config.smtp_host.clone())
            .dangerous_accept_invalid_certs(true)
            .dangerous_accept_invalid_hostnames(true)
            .set_min_tls_version(TlsVersion::Tlsv12)
            .build()
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let tls = if config.smtp_secure() {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
            .port(config.smtp_port)
            .tls(tls)
            .timeout(Some(CONNECTION_TIMEOUT));

        if !config.smtp_user.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_user.clone(),
                config.smtp_pass.clone(),
            ));
        }

        Ok(SmtpMailer {
            transport: builder.build(),
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            secure: config.smtp_secure(),
            user: config.smtp_user.clone(),
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn verify(&self) -> Result<(), MailError> {
        let outcome = tokio::time::timeout(
            CONNECTION_TIMEOUT + GREETING_TIMEOUT,
            self.transport.test_connection(),
        )
        .await;

        let result = match outcome {
            Ok(Ok(true)) => Ok(()),
            Ok(Ok(false)) => Err(MailError::Verification(
                "SMTP server did not accept the connection".to_string(),
            )),
            Ok(Err(e)) => Err(MailError::Verification(e.to_string())),
            Err(_) => Err(MailError::Verification(format!(
                "Connection timed out after {}s",
                (CONNECTION_TIMEOUT + GREETING_TIMEOUT).as_secs()
            ))),
        };

        match &result {
            Ok(()) => info!("SMTP transport verified ({}:{})", self.host, self.port),
            Err(e) => error!(
                host = %self.host,
                port = self.port,
                secure = self.secure,
                user = %self.user,
                "SMTP transport verification failed: {}",
                e
            ),
        }

        result
    }

    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        let message = build_message(&email)?;

        match self.transport.send(message).await {
            Ok(response) => {
                info!(
                    "Email sent via SMTP to {} recipient(s) (code {})",
                    email.to.len(),
                    response.code()
                );
                Ok(())
            }
            Err(e) => {
                error!("SMTP send failed: {}", e);
                Err(MailError::Delivery(e.to_string()))
            }
        }
    }
}

/// Renders an [`OutboundEmail`] into a MIME message: a bare HTML part, or `multipart/mixed`
/// when there are attachments.
pub fn build_message(email: &OutboundEmail) -> Result<Message, MailError> {
    let mut builder = Message::builder()
        .from(email.from.clone())
        .subject(email.subject.clone());

    for recipient in &email.to {
        builder = builder.to(recipient.clone());
    }
    if let Some(reply_to) = &email.reply_to {
        builder = builder.reply_to(reply_to.clone());
    }

    let html_part = SinglePart::html(email.html_body.clone());

    let message = if email.attachments.is_empty() {
        builder.singlepart(html_part)
    } else {
        let mut mixed = MultiPart::mixed().singlepart(html_part);
        for attachment in &email.attachments {
            let content_type = ContentType::parse(&attachment.content_type)
                .map_err(|e| MailError::Build(e.to_string()))?;
            mixed = mixed.singlepart(
                Attachment::new(attachment.filename.clone())
                    .body(attachment.content.clone(), content_type),
            );
        }
        builder.multipart(mixed)
    };

    message.map_err(|e| MailError::Build(e.to_string()))
}

pub fn parse_mailbox(raw: &str) -> Result<Mailbox, MailError> {
    raw.trim()
        .parse::<Mailbox>()
        .map_err(|_| MailError::Address(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_email(attachments: Vec<EmailAttachment>) -> OutboundEmail {
        OutboundEmail {
            from: parse_mailbox("\"Treppan Living Prive\" <noreply@treppan.com>").unwrap(),
            to: vec![
                parse_mailbox("eoi@treppan.com").unwrap(),
                parse_mailbox("sales@treppan.com").unwrap(),
            ],
            reply_to: Some(parse_mailbox("aisha@example.com").unwrap()),
            subject: "New EOI Submission - Aisha | 2BR".to_string(),
            html_body: "<p>Hello</p>".to_string(),
            attachments,
        }
    }

    #[test]
    fn test_build_message_without_attachments() {
        let message = build_message(&sample_email(vec![])).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Subject: New EOI Submission - Aisha | 2BR"));
        assert!(raw.contains("Reply-To: aisha@example.com"));
        assert!(raw.contains("text/html"));
        assert!(!raw.contains("multipart/mixed"));
        assert_eq!(message.envelope().to().len(), 2);
    }

    #[test]
    fn test_build_message_with_attachments() {
        let email = sample_email(vec![
            EmailAttachment {
                filename: "passport.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                content: b"%PDF-1.4".to_vec(),
            },
            EmailAttachment {
                filename: "Passport_Party2".to_string(),
                content_type: "application/octet-stream".to_string(),
                content: vec![1, 2, 3],
            },
        ]);
        let raw = String::from_utf8(build_message(&email).unwrap().formatted()).unwrap();

        assert!(raw.contains("multipart/mixed"));
        assert_eq!(raw.matches("Content-Disposition: attachment").count(), 2);
        assert!(raw.contains("filename=\"passport.pdf\""));
        assert!(raw.contains("filename=\"Passport_Party2\""));
    }

    #[test]
    fn test_build_message_rejects_bad_content_type() {
        let email = sample_email(vec![EmailAttachment {
            filename: "scan".to_string(),
            content_type: "not a mime type".to_string(),
            content: vec![0],
        }]);
        assert!(matches!(build_message(&email), Err(MailError::Build(_))));
    }

    #[test]
    fn test_parse_mailbox() {
        assert!(parse_mailbox(" sales@treppan.com ").is_ok());
        assert!(matches!(parse_mailbox("not-an-address"), Err(MailError::Address(_))));
    }

    #[tokio::test]
    async fn test_verify_fails_for_unreachable_host() {
        let config = Config {
            smtp_host: "127.0.0.1".to_string(),
            smtp_port: 1,
            ..Config::default()
        };
        let mailer = SmtpMailer::from_config(&config).unwrap();

        let result = mailer.verify().await;
        assert!(matches!(result, Err(MailError::Verification(_))));
    }
}
