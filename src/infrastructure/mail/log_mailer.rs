//! Mailer that writes messages to the log instead of delivering them.

use async_trait::async_trait;
use tracing::info;

use crate::application::ports::{Mailer, NotificationError, OutgoingEmail};

#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), NotificationError> {
        if !email.to.contains('@') {
            return Err(NotificationError::InvalidRecipient(email.to.clone()));
        }
        let payload = serde_json::to_string(email)
            .map_err(|e| NotificationError::Transport(e.to_string()))?;
        info!(target: "ecoconnect::mail", to = %email.to, subject = %email.subject, %payload, "Outgoing email");
        Ok(())
    }
}
