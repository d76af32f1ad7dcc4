//! Best-effort, after-commit e-mail delivery

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn, Instrument, Span};

use super::templates::Notice;
use crate::application::ports::{Mailer, OutgoingEmail};

/// How the dispatcher runs mailer calls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Spawn onto the tokio runtime and return immediately
    #[default]
    Background,
    /// Await delivery before returning
    Inline,
}

pub struct NotificationDispatcher {
    mailer: Arc<dyn Mailer>,
    from_address: String,
    mode: DeliveryMode,
}

impl NotificationDispatcher {
    pub fn new(mailer: Arc<dyn Mailer>, from_address: impl Into<String>, mode: DeliveryMode) -> Self {
        Self {
            mailer,
            from_address: from_address.into(),
            mode,
        }
    }

    /// Address the notice to `to`; blank addresses produce nothing.
    pub fn compose(&self, to: &str, notice: Notice) -> Option<OutgoingEmail> {
        let to = to.trim();
        if to.is_empty() {
            return None;
        }
        Some(OutgoingEmail {
            to: to.to_string(),
            from: self.from_address.clone(),
            subject: notice.subject,
            body: notice.body,
        })
    }

    /// Send every message. Failures are logged, never returned.
    ///
    /// In background mode the work is spawned when a tokio runtime is
    /// available and done inline otherwise.
    pub async fn dispatch(&self, messages: Vec<OutgoingEmail>) {
        if messages.is_empty() {
            return;
        }
        let mailer = self.mailer.clone();
        match (self.mode, tokio::runtime::Handle::try_current()) {
            (DeliveryMode::Background, Ok(handle)) => {
                handle.spawn(deliver_all(mailer, messages).instrument(Span::current()));
            }
            _ => deliver_all(mailer, messages).await,
        }
    }
}

async fn deliver_all(mailer: Arc<dyn Mailer>, messages: Vec<OutgoingEmail>) {
    for message in messages {
        match mailer.send(&message).await {
            Ok(()) => debug!(to = %message.to, subject = %message.subject, "Notification sent"),
            Err(e) => warn!(
                to = %message.to,
                subject = %message.subject,
                error = %e,
                "Failed to send notification"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::notifications::templates;
    use crate::infrastructure::mail::InMemoryMailer;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    #[test]
    fn blank_recipient_is_skipped() {
        let d = NotificationDispatcher::new(
            Arc::new(InMemoryMailer::new()),
            "noreply@ecoconnect.local",
            DeliveryMode::Inline,
        );
        assert!(d.compose("  ", templates::booking_confirmed("X", date())).is_none());
        let msg = d
            .compose("a@example.com", templates::booking_confirmed("X", date()))
            .unwrap();
        assert_eq!(msg.from, "noreply@ecoconnect.local");
        assert_eq!(msg.to, "a@example.com");
    }

    #[tokio::test]
    async fn inline_delivery_is_complete_on_return() {
        let mailer = Arc::new(InMemoryMailer::new());
        let d = NotificationDispatcher::new(mailer.clone(), "noreply@x", DeliveryMode::Inline);
        let msgs = ["a@example.com", "b@example.com"]
            .iter()
            .filter_map(|to| d.compose(to, templates::booking_cancelled("X", date())))
            .collect();
        d.dispatch(msgs).await;
        assert_eq!(mailer.sent().len(), 2);
    }

    #[tokio::test]
    async fn failures_are_swallowed() {
        let mailer = Arc::new(InMemoryMailer::failing());
        let d = NotificationDispatcher::new(mailer.clone(), "noreply@x", DeliveryMode::Inline);
        let msg = d
            .compose("a@example.com", templates::new_booking(date(), "alice"))
            .unwrap();
        d.dispatch(vec![msg]).await;
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn background_delivery_eventually_completes() {
        let mailer = Arc::new(InMemoryMailer::new());
        let d = NotificationDispatcher::new(mailer.clone(), "noreply@x", DeliveryMode::Background);
        let msg = d
            .compose("a@example.com", templates::new_booking(date(), "alice"))
            .unwrap();
        d.dispatch(vec![msg]).await;

        for _ in 0..50 {
            if !mailer.sent().is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(mailer.sent().len(), 1);
    }
}
