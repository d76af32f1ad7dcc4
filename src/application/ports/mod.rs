//! Application ports (hexagonal architecture boundaries)
//!
//! Outbound collaborators the workflows call but do not implement:
//! e-mail delivery and certification file storage.

pub mod outbound;

pub use outbound::{FileStore, FileStoreError, Mailer, NotificationError, OutgoingEmail};
