use std::sync::Mutex;

use async_trait::async_trait;

use super::sendmail::{MailError, MailTransport, OutboundEmail};

/// Records outgoing mail instead of talking to a relay.
#[derive(Default)]
pub struct FakeMailer {
    pub verify_error: Option<String>,
    pub send_error: Option<String>,
    pub sent: Mutex<Vec<OutboundEmail>>,
    pub verify_calls: Mutex<u32>,
}

impl FakeMailer {
    pub fn failing_verify(detail: &str) -> Self {
        FakeMailer {
            verify_error: Some(detail.to_string()),
            ..Default::default()
        }
    }

    pub fn failing_send(detail: &str) -> Self {
        FakeMailer {
            send_error: Some(detail.to_string()),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for FakeMailer {
    async fn verify(&self) -> Result<(), MailError> {
        *self.verify_calls.lock().unwrap() += 1;
        match &self.verify_error {
            Some(detail) => Err(MailError::Verification(detail.clone())),
            None => Ok(()),
        }
    }

    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        if let Some(detail) = &self.send_error {
            return Err(MailError::Delivery(detail.clone()));
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}
