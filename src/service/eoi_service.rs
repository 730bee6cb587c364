use std::sync::Arc;

use lettre::message::Mailbox;
use tracing::{error, info};

use crate::{
    config::Config,
    mail::{
        mails::{compose_eoi_email, render_eoi_email},
        sendmail::{parse_mailbox, MailError, MailTransport},
    },
    models::eoimodel::SubmissionRequest,
    service::error::EoiError,
};

/// Delivers EOI submissions to the sales inbox through whatever transport it was built with.
pub struct EoiService {
    transport: Arc<dyn MailTransport>,
    sender: Mailbox,
    recipients: Vec<Mailbox>,
}

impl EoiService {
    pub fn new(config: &Config, transport: Arc<dyn MailTransport>) -> Result<Self, MailError> {
        let sender = parse_mailbox(config.sender())?;
        let recipients = config
            .eoi_recipients
            .iter()
            .map(|r| parse_mailbox(r))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(EoiService {
            transport,
            sender,
            recipients,
        })
    }

    pub fn recipients(&self) -> &[Mailbox] {
        &self.recipients
    }

    /// Verify the relay, then send one email. No retries: a failure here is the caller's to resubmit.
    pub async fn submit(&self, submission: &SubmissionRequest) -> Result<(), EoiError> {
        self.transport
            .verify()
            .await
            .map_err(|e| EoiError::SmtpVerification(e.to_string()))?;

        let html_body = render_eoi_email(submission);
        let email = compose_eoi_email(submission, html_body, &self.sender, &self.recipients);
        let attachment_count = email.attachments.len();

        self.transport.send(email).await.map_err(|e| {
            error!("Error sending EOI email for {}: {}", submission.party1.name, e);
            EoiError::Delivery(e.to_string())
        })?;

        info!(
            "EOI from {} ({}) sent to {} recipient(s) with {} attachment(s)",
            submission.party1.name,
            submission.unit.unit_type,
            self.recipients.len(),
            attachment_count
        );

        Ok(())
    }
}
