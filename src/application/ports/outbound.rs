//! Outbound ports: e-mail delivery and file storage
//!
//! Adapters live in `infrastructure::mail` and `infrastructure::storage`.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

// ── Mailer ─────────────────────────────────────────────────────

/// A single plain-text message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Mail transport error: {0}")]
    Transport(String),

    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),
}

/// Best-effort delivery. Callers log failures and carry on.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), NotificationError>;
}

// ── FileStore ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("File storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid file name: {0}")]
    InvalidName(String),
}

/// Persists uploaded files and hands back a reference to store on the record.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn put(&self, file_name: &str, bytes: &[u8]) -> Result<String, FileStoreError>;

    async fn delete(&self, reference: &str) -> Result<(), FileStoreError>;
}
